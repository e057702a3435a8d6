use crate::atom::{Atom, GroupAtom, SubsupAtom, SymbolAtom};
use crate::choice::ChoiceAtom;
use crate::context::Context;
use crate::error::{LatexErrKind, LatexError};
use crate::lexer::Lexer;
use crate::token::{EndToken, Span, TokSpan, Token};

/// Parse LaTeX into a list of atoms.
///
/// Every list the parser builds (the top-level list, group bodies, scripts and `\mathchoice`
/// variants) starts with a [`Atom::First`] placeholder.
pub fn parse_latex(latex: &str, context: &mut Context) -> Result<Vec<Atom>, Box<LatexError>> {
    let mut parser = Parser::new(Lexer::new(latex), context);
    parser.parse_list(EndToken::Eoi)
}

pub(crate) struct Parser<'source, 'context> {
    lexer: Lexer<'source>,
    context: &'context mut Context,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Script {
    Sup,
    Sub,
}

impl<'source, 'context> Parser<'source, 'context> {
    pub(crate) fn new(lexer: Lexer<'source>, context: &'context mut Context) -> Self {
        Parser { lexer, context }
    }

    #[inline]
    fn next(&mut self) -> Result<TokSpan<'source>, Box<LatexError>> {
        self.lexer.next_token()
    }

    /// Parse atoms until `end`, consuming the end token.
    fn parse_list(&mut self, end: EndToken) -> Result<Vec<Atom>, Box<LatexError>> {
        let mut list = vec![Atom::first(self.context)];
        loop {
            let (tok, span) = self.next()?.into_parts();
            if end.matches(&tok) {
                break;
            }
            match tok {
                Token::Eoi => {
                    return Err(Box::new(LatexError(
                        span.into(),
                        LatexErrKind::UnclosedGroup(end),
                    )));
                }
                Token::GroupEnd => {
                    return Err(Box::new(LatexError(
                        span.into(),
                        LatexErrKind::UnmatchedClose(EndToken::GroupClose),
                    )));
                }
                Token::StyleSwitch(style) => {
                    // A style switch applies to the rest of the enclosing list.
                    let body = self.parse_list(end)?;
                    list.push(Atom::Group(GroupAtom::new(body, Some(style), self.context)));
                    break;
                }
                tok => self.parse_atom(tok, span, &mut list)?,
            }
        }
        Ok(list)
    }

    /// Parse the atom that starts with `tok` and add it to `list`.
    fn parse_atom(
        &mut self,
        tok: Token<'source>,
        span: Span,
        list: &mut Vec<Atom>,
    ) -> Result<(), Box<LatexError>> {
        match tok {
            Token::Symbol(value, kind) => {
                let atom = SymbolAtom::new(kind, value.to_string(), self.context);
                list.push(Atom::Symbol(atom));
            }
            Token::GroupBegin => {
                let mut body = self.parse_list(EndToken::GroupClose)?;
                // `{\scriptstyle ...}` is a single styled group, not a group within a group.
                let group = if body.len() == 2
                    && let Some(Atom::Group(inner)) = body.pop_if(|atom| {
                        matches!(atom, Atom::Group(group) if group.mathstyle.is_some())
                    }) {
                    inner
                } else {
                    GroupAtom::new(body, None, self.context)
                };
                list.push(Atom::Group(group));
            }
            Token::Circumflex => self.parse_script(Script::Sup, span, list)?,
            Token::Underscore => self.parse_script(Script::Sub, span, list)?,
            Token::MathChoice => {
                let choices = [
                    self.parse_argument()?,
                    self.parse_argument()?,
                    self.parse_argument()?,
                    self.parse_argument()?,
                ];
                list.push(Atom::Choice(ChoiceAtom::new(choices, self.context)));
            }
            Token::StyleSwitch(_) | Token::GroupEnd | Token::Eoi => {
                // These are handled by `parse_list` and `parse_argument`.
                unreachable!()
            }
        }
        Ok(())
    }

    /// Attach a script to the scripts atom at the end of `list`, or start a new one.
    fn parse_script(
        &mut self,
        script: Script,
        span: Span,
        list: &mut Vec<Atom>,
    ) -> Result<(), Box<LatexError>> {
        let argument = self.parse_argument()?;
        if let Some(Atom::Subsup(scripts)) = list.last_mut() {
            let slot = match script {
                Script::Sup => &mut scripts.superscript,
                Script::Sub => &mut scripts.subscript,
            };
            if slot.is_some() {
                return Err(Box::new(LatexError(
                    span.into(),
                    LatexErrKind::DuplicateSubOrSup,
                )));
            }
            *slot = Some(argument);
            return Ok(());
        }
        let scripts = match script {
            Script::Sup => SubsupAtom::new(Some(argument), None, self.context),
            Script::Sub => SubsupAtom::new(None, Some(argument), self.context),
        };
        list.push(Atom::Subsup(scripts));
        Ok(())
    }

    /// Parse a command argument: either a braced list or a single atom.
    fn parse_argument(&mut self) -> Result<Vec<Atom>, Box<LatexError>> {
        let (tok, span) = self.next()?.into_parts();
        match tok {
            Token::GroupBegin => self.parse_list(EndToken::GroupClose),
            Token::GroupEnd => Err(Box::new(LatexError(
                span.into(),
                LatexErrKind::ExpectedArgumentGotClose,
            ))),
            Token::Eoi => Err(Box::new(LatexError(
                span.into(),
                LatexErrKind::ExpectedArgumentGotEOF,
            ))),
            Token::Circumflex | Token::Underscore => Err(Box::new(LatexError(
                span.into(),
                LatexErrKind::BoundFollowedByBound,
            ))),
            Token::StyleSwitch(_) => Err(Box::new(LatexError(
                span.into(),
                LatexErrKind::StyleSwitchAsArgument,
            ))),
            tok => {
                let mut list = vec![Atom::first(self.context)];
                self.parse_atom(tok, span, &mut list)?;
                Ok(list)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;
    use crate::atom::AtomKind;
    use crate::context::MathStyle;
    use crate::serialize::{SerializeOptions, serialize_list};

    fn roundtrip(latex: &str) -> String {
        let mut context = Context::default();
        let atoms = parse_latex(latex, &mut context).unwrap();
        serialize_list(&atoms, SerializeOptions::default())
    }

    fn error(latex: &str) -> String {
        let mut context = Context::default();
        let err = parse_latex(latex, &mut context).unwrap_err();
        format!("Error at {}..{}: {:?}", err.0.start, err.0.end, err.1)
    }

    #[test]
    fn canonical_latex() {
        let problems = [
            (r"x+y", r"x+y"),
            (r"\alpha x", r"\alpha x"),
            (r"x^2", r"x^{2}"),
            (r"x_i^2", r"x^{2}_{i}"),
            (r"{a}{}", r"{a}{}"),
            (r"{\scriptstyle a}", r"{\scriptstyle a}"),
            (r"a \displaystyle b", r"a{\displaystyle b}"),
            (r"\mathchoice{D}{T}{S}{SS}", r"\mathchoice{D}{T}{S}{SS}"),
            (r"\mathchoice abcd", r"\mathchoice{a}{b}{c}{d}"),
            (r"\mathchoice{}{}{}{}", r"\mathchoice{}{}{}{}"),
            (r"x^{\mathchoice{1}{2}{3}{4}}", r"x^{\mathchoice{1}{2}{3}{4}}"),
            (r"x^{\scriptstyle 2}", r"x^{\scriptstyle2}"),
            (r"x_{{\textstyle i}}", r"x_{\textstyle i}"),
            (r"\mathchoice{\scriptstyle a}bcd", r"\mathchoice{\scriptstyle a}{b}{c}{d}"),
            (r"x^{\scriptstyle a}_{b}", r"x^{\scriptstyle a}_{b}"),
            ("a % comment\n+ b", "a+b"),
        ];
        for (problem, expected) in problems {
            assert_eq!(roundtrip(problem), expected, "{problem}");
        }
    }

    #[test]
    fn lists_start_with_first() {
        let mut context = Context::default();
        let atoms = parse_latex(r"\mathchoice{a}{}{{b}}{c}", &mut context).unwrap();
        assert_eq!(atoms.len(), 2);
        assert!(atoms[0].is_first());
        let Atom::Choice(choice) = &atoms[1] else {
            panic!("expected a choice atom");
        };
        for variant in &choice.choices {
            assert!(variant[0].is_first());
        }
        assert_eq!(choice.choices[1].len(), 1);
        let Atom::Group(group) = &choice.choices[2][1] else {
            panic!("expected a group");
        };
        assert!(group.body[0].is_first());
    }

    #[test]
    fn style_switch_wraps_rest_of_list() {
        let mut context = Context::default();
        let atoms = parse_latex(r"a\scriptstyle bc", &mut context).unwrap();
        let kinds: Vec<_> = atoms.iter().map(Atom::kind).collect();
        assert_eq!(kinds, [AtomKind::First, AtomKind::Mord, AtomKind::Group]);
        let Atom::Group(group) = &atoms[2] else {
            unreachable!()
        };
        assert_eq!(group.mathstyle, Some(MathStyle::Script));
        assert_eq!(group.body.len(), 3);
    }

    #[test]
    fn errors() {
        assert_snapshot!(error(r"{x"), @"Error at 2..2: UnclosedGroup(GroupClose)");
        assert_snapshot!(error(r"x}"), @"Error at 1..2: UnmatchedClose(GroupClose)");
        assert_snapshot!(error(r"\mathchoice{a}{b}{c}"), @"Error at 20..20: ExpectedArgumentGotEOF");
        assert_snapshot!(error(r"{\mathchoice{a}{b}}"), @"Error at 18..19: ExpectedArgumentGotClose");
        assert_snapshot!(error(r"x^^2"), @"Error at 2..3: BoundFollowedByBound");
        assert_snapshot!(error(r"x^1^2"), @"Error at 3..4: DuplicateSubOrSup");
        assert_snapshot!(error(r"x^\scriptstyle 2"), @"Error at 2..14: StyleSwitchAsArgument");
        assert_snapshot!(error(r"\sqrt{2}"), @r#"Error at 0..5: UnknownCommand("sqrt")"#);
    }
}
