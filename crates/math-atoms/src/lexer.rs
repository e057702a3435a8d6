use std::mem;
use std::str::CharIndices;

use crate::error::{LatexErrKind, LatexError};
use crate::predefined::{char_kind, get_command};
use crate::token::{Span, TokSpan, Token};

/// Lexer
pub(crate) struct Lexer<'source> {
    input: CharIndices<'source>,
    peek: (usize, Option<char>),
    input_string: &'source str,
    input_length: usize,
}

impl<'source> Lexer<'source> {
    /// Receive the input source code and generate a LEXER instance.
    pub(crate) fn new(input: &'source str) -> Self {
        let mut lexer = Lexer {
            input: input.char_indices(),
            peek: (0, None),
            input_string: input,
            input_length: input.len(),
        };
        lexer.read_char(); // Initialize `peek`.
        lexer
    }

    /// One character progresses.
    fn read_char(&mut self) -> (usize, Option<char>) {
        mem::replace(
            &mut self.peek,
            self.input
                .next()
                .map(|(idx, ch)| (idx, Some(ch)))
                .unwrap_or((self.input_length, None)),
        )
    }

    /// Skip whitespace and comments.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek.1 {
                Some(ch) if ch.is_ascii_whitespace() => {
                    self.read_char();
                }
                Some('%') => {
                    // A comment runs until the end of the line.
                    while self.peek.1.is_some_and(|ch| ch != '\n') {
                        self.read_char();
                    }
                }
                _ => break,
            }
        }
    }

    /// Read one command name, after the backslash.
    ///
    /// Returns the name and the index of the character after it.
    #[inline]
    fn read_command(&mut self) -> (&'source str, usize) {
        let start = self.peek.0;

        // Read in all ASCII alphabetic characters.
        while self.peek.1.is_some_and(|ch| ch.is_ascii_alphabetic()) {
            self.read_char();
        }

        if start == self.peek.0 {
            // Always read at least one character.
            self.read_char();
        }

        // To get the end of the command, we take the index of the next character.
        let end = self.peek.0;
        (&self.input_string[start..end], end)
    }

    pub(crate) fn next_token(&mut self) -> Result<TokSpan<'source>, Box<LatexError>> {
        self.skip_whitespace_and_comments();

        let (loc, ch) = self.read_char();
        let Some(ch) = ch else {
            return Ok(TokSpan::new(Token::Eoi, Span::zero_width(loc)));
        };
        let span = Span::new(loc, loc + ch.len_utf8());

        let tok = match ch {
            '{' => Token::GroupBegin,
            '}' => Token::GroupEnd,
            '^' => Token::Circumflex,
            '_' => Token::Underscore,
            '\\' => {
                let (cmd, end) = self.read_command();
                let span = Span::new(loc, end);
                return match get_command(cmd, &self.input_string[loc..end]) {
                    Some(tok) => Ok(TokSpan::new(tok, span)),
                    None if cmd.is_empty() => Err(Box::new(LatexError(
                        span.into(),
                        LatexErrKind::DisallowedChar('\\'),
                    ))),
                    None => Err(Box::new(LatexError(
                        span.into(),
                        LatexErrKind::UnknownCommand(cmd.into()),
                    ))),
                };
            }
            ch => match char_kind(ch) {
                Some(kind) => Token::Symbol(&self.input_string[span.start()..span.end()], kind),
                None => {
                    return Err(Box::new(LatexError(
                        span.into(),
                        LatexErrKind::DisallowedChar(ch),
                    )));
                }
            },
        };
        Ok(TokSpan::new(tok, span))
    }
}
