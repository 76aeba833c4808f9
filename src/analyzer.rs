//! This module contains the line-oriented driver around the automaton
//! engine. The driver owns the session, tracks 1-based line numbers, skips
//! preprocessor directive lines and turns the engine's fail-fast signals
//! into errors with line context.

use std::io::BufRead;

use log::trace;

use crate::{Automaton, LexTabError, LexTabErrorKind, Result, ScanSession, Token, TokenKind};

/// The first character of a line that marks it as a preprocessor directive.
/// Directive lines are resolved before lexical analysis and never reach the
/// engine.
pub const DIRECTIVE_MARKER: char = '#';

/// A line-oriented analyzer that feeds an input source to an [`Automaton`].
///
/// The analyzer threads one [`ScanSession`] through all lines of the input,
/// so block comment state survives line boundaries. It stops at the first
/// malformed token, reporting it with its 1-based line number, and checks
/// for an unterminated block comment after the last line.
#[derive(Debug)]
pub struct Analyzer<'a> {
    automaton: &'a Automaton,
    session: ScanSession,
    line: usize,
}

impl<'a> Analyzer<'a> {
    /// Creates an analyzer over the given automaton with a fresh session.
    pub fn new(automaton: &'a Automaton) -> Self {
        Analyzer {
            automaton,
            session: ScanSession::new(),
            line: 0,
        }
    }

    /// The session holding the comment flag and the string table.
    pub fn session(&self) -> &ScanSession {
        &self.session
    }

    /// Analyzes all lines of the input and returns the tokens of the whole
    /// document in order.
    ///
    /// Fails with `MalformedToken` on the first lexeme that ends in a
    /// non-final state, and with `UnterminatedComment` if a block comment is
    /// still open after the last line. On success the session keeps the
    /// string table the returned tokens reference.
    pub fn analyze<R: BufRead>(&mut self, input: R) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        for line in input.lines() {
            let line = line?;
            self.line += 1;
            if line.starts_with(DIRECTIVE_MARKER) {
                trace!("line {}: skipping preprocessor directive", self.line);
                continue;
            }
            let line_tokens = self.automaton.scan(&line, &mut self.session)?;
            if let Some(last) = line_tokens.last() {
                if last.kind() == TokenKind::Error {
                    return Err(LexTabError::new(LexTabErrorKind::MalformedToken {
                        lexeme: last.text(self.session.strings()).to_string(),
                        line: self.line,
                    }));
                }
            }
            tokens.extend(line_tokens);
        }
        if self.session.in_comment() {
            return Err(LexTabError::new(LexTabErrorKind::UnterminatedComment));
        }
        Ok(tokens)
    }

    /// Renders a token as `{Category} lexeme`, resolving the lexeme against
    /// the analyzer's string table.
    pub fn display(&self, token: &Token) -> String {
        format!(
            "{{{}}} {}",
            token.kind(),
            token.text(self.session.strings())
        )
    }
}
