//! This module contains the string interning table that backs token values.
//! The table is append-only: a lexeme is stored once on first sight and every
//! later insertion of equal text returns the same handle.

use std::collections::HashMap;

use crate::LexemeId;

/// An append-only deduplicating store of token lexemes.
///
/// The table hands out stable [`LexemeId`] handles. Entries are never removed
/// or rewritten, so a handle stays valid for the whole lifetime of the table.
/// Equality is structural: interning equal text twice yields the same handle
/// and does not grow the table.
#[derive(Debug, Default)]
pub struct StringTable {
    /// The interned lexemes in insertion order. A `LexemeId` indexes into
    /// this vector.
    lexemes: Vec<String>,
    /// Reverse lookup from lexeme text to its handle.
    handles: HashMap<String, LexemeId>,
}

impl StringTable {
    /// Creates an empty string table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the lexeme if it is not present yet and returns its handle.
    pub fn intern(&mut self, lexeme: &str) -> LexemeId {
        if let Some(id) = self.handles.get(lexeme) {
            return *id;
        }
        let id = LexemeId::new(self.lexemes.len());
        self.lexemes.push(lexeme.to_string());
        self.handles.insert(lexeme.to_string(), id);
        id
    }

    /// Resolves a handle to the interned lexeme text.
    pub fn resolve(&self, id: LexemeId) -> &str {
        &self.lexemes[id.as_usize()]
    }

    /// Returns the number of distinct lexemes in the table.
    pub fn len(&self) -> usize {
        self.lexemes.len()
    }

    /// Returns true if no lexeme has been interned yet.
    pub fn is_empty(&self) -> bool {
        self.lexemes.is_empty()
    }
}
