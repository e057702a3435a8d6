use std::ops::Range;

use strum_macros::IntoStaticStr;

use crate::atom::AtomKind;
use crate::context::MathStyle;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Token<'source> {
    /// End of input.
    Eoi,
    /// The character `{`.
    GroupBegin,
    /// The character `}`.
    GroupEnd,
    /// The character `^` for superscripts.
    Circumflex,
    /// The character `_` for subscripts.
    Underscore,
    /// A single glyph, given by its LaTeX source: a character like `x` or `+`, or a symbol
    /// command like `\alpha`.
    Symbol(&'source str, AtomKind),
    /// `\displaystyle`, `\textstyle`, `\scriptstyle` and `\scriptscriptstyle`.
    StyleSwitch(MathStyle),
    /// `\mathchoice`
    MathChoice,
}

static_assertions::assert_eq_size!(Token<'_>, [usize; 3]);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Span {
    start: usize,
    end: usize,
}

impl Span {
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    #[inline]
    pub fn zero_width(at: usize) -> Self {
        Span { start: at, end: at }
    }

    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }
}

impl From<Span> for Range<usize> {
    #[inline]
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct TokSpan<'source>(Token<'source>, Span);

impl<'source> TokSpan<'source> {
    #[inline]
    pub fn new(token: Token<'source>, span: Span) -> Self {
        TokSpan(token, span)
    }

    #[inline]
    pub fn into_parts(self) -> (Token<'source>, Span) {
        (self.0, self.1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
pub(crate) enum EndToken {
    #[strum(serialize = r"}")]
    GroupClose,
    #[strum(serialize = r"end of input")]
    Eoi,
}

impl EndToken {
    pub fn matches(self, other: &Token) -> bool {
        matches!(
            (self, other),
            (EndToken::GroupClose, Token::GroupEnd) | (EndToken::Eoi, Token::Eoi)
        )
    }
}
