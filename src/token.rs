use crate::{LexemeId, StringTable, TokenKind};

/// One classified lexical unit.
///
/// A token never stores its lexeme text directly; it references it through
/// the session's [`StringTable`] via a stable [`LexemeId`] handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    lexeme: LexemeId,
}

impl Token {
    /// Creates a new token.
    pub fn new(kind: TokenKind, lexeme: LexemeId) -> Self {
        Token { kind, lexeme }
    }

    /// The category of the token.
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The handle of the token's lexeme.
    pub fn lexeme(&self) -> LexemeId {
        self.lexeme
    }

    /// Resolves the token's lexeme text against the given table.
    pub fn text<'t>(&self, table: &'t StringTable) -> &'t str {
        table.resolve(self.lexeme)
    }
}
