use std::fmt;
use std::ops::Range;

use crate::token::EndToken;

/// Represents an error that occurred while parsing LaTeX into atoms.
#[derive(Debug, Clone, PartialEq)]
pub struct LatexError(pub Range<usize>, pub(crate) LatexErrKind);

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum LatexErrKind {
    UnclosedGroup(EndToken),
    UnmatchedClose(EndToken),
    ExpectedArgumentGotClose,
    ExpectedArgumentGotEOF,
    DisallowedChar(char),
    UnknownCommand(Box<str>),
    BoundFollowedByBound,
    DuplicateSubOrSup,
    StyleSwitchAsArgument,
}

impl LatexErrKind {
    /// Returns the error message as a string.
    pub fn string(&self) -> String {
        match self {
            LatexErrKind::UnclosedGroup(expected) => {
                "Expected token \"".to_string() + <&str>::from(expected) + "\", but not found."
            }
            LatexErrKind::UnmatchedClose(got) => {
                "Unmatched closing token: \"".to_string() + <&str>::from(got) + "\"."
            }
            LatexErrKind::ExpectedArgumentGotClose => {
                "Expected argument but got closing token \"}\".".to_string()
            }
            LatexErrKind::ExpectedArgumentGotEOF => {
                "Expected argument but reached end of input.".to_string()
            }
            LatexErrKind::DisallowedChar(got) => {
                let mut text = "Disallowed character: '".to_string();
                text.push(*got);
                text += "'.";
                text
            }
            LatexErrKind::UnknownCommand(cmd) => "Unknown command \"\\".to_string() + cmd + "\".",
            LatexErrKind::BoundFollowedByBound => {
                "'^' or '_' directly followed by '^' or '_'.".to_string()
            }
            LatexErrKind::DuplicateSubOrSup => "Duplicate subscript or superscript.".to_string(),
            LatexErrKind::StyleSwitchAsArgument => {
                "A style switch cannot be used as an argument on its own; wrap it in braces."
                    .to_string()
            }
        }
    }
}

impl LatexError {
    pub fn error_message(&self) -> String {
        self.1.string()
    }
}

#[cfg(feature = "ariadne")]
impl LatexError {
    /// Convert this error into an [`ariadne::Report`] for pretty-printing.
    pub fn to_report<'name>(
        &self,
        source_name: &'name str,
        with_color: bool,
    ) -> ariadne::Report<'static, (&'name str, Range<usize>)> {
        use ariadne::{Label, Report, ReportKind};

        let label_msg = match &self.1 {
            LatexErrKind::UnclosedGroup(expected) => {
                format!(
                    "expected \"{}\" to close this group",
                    <&str>::from(expected)
                )
            }
            LatexErrKind::UnmatchedClose(got) => {
                format!("unmatched \"{}\"", <&str>::from(got))
            }
            LatexErrKind::ExpectedArgumentGotClose | LatexErrKind::ExpectedArgumentGotEOF => {
                "expected an argument here".into()
            }
            LatexErrKind::DisallowedChar(_) => "disallowed character".into(),
            LatexErrKind::UnknownCommand(_) => "unknown command".into(),
            LatexErrKind::BoundFollowedByBound => "unexpected bound".into(),
            LatexErrKind::DuplicateSubOrSup => "duplicate".into(),
            LatexErrKind::StyleSwitchAsArgument => "style switch used as argument".into(),
        };

        let mut config = ariadne::Config::default().with_index_type(ariadne::IndexType::Byte);
        if !with_color {
            config = config.with_color(false);
        }
        Report::build(ReportKind::Error, (source_name, self.0.start..self.0.start))
            .with_config(config)
            .with_message(self.1.string())
            .with_label(Label::new((source_name, self.0.clone())).with_message(label_msg))
            .finish()
    }
}

impl fmt::Display for LatexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.0.start, self.1.string())
    }
}

impl std::error::Error for LatexError {}
