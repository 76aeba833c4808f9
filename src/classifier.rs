//! This module contains the token categories and the classifier that maps a
//! terminal state's value to a category via disjoint membership sets.

use std::collections::BTreeSet;

use crate::TokenSetsData;

/// The category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A reserved word of the language.
    Keyword,
    /// An operator.
    Operator,
    /// A separator, e.g. punctuation or brackets.
    Separator,
    /// A name that is not a keyword.
    Identifier,
    /// A literal constant, e.g. a number or a quoted string.
    Constant,
    /// A lexeme that ended in a non-final state.
    Error,
}

impl TokenKind {
    /// The fixed display label of the category.
    pub fn label(&self) -> &'static str {
        match self {
            TokenKind::Keyword => "Keyword",
            TokenKind::Operator => "Operator",
            TokenKind::Separator => "Separator",
            TokenKind::Identifier => "Identifier",
            TokenKind::Constant => "Constant",
            TokenKind::Error => "Error",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Maps a terminal state's value to a token category.
///
/// The four sets are disjoint by contract and checked in priority order
/// keyword, operator, separator, constant; a value contained in none of
/// them classifies as [`TokenKind::Identifier`]. The sets are static
/// configuration data, independent of the transition table.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    keyword_values: BTreeSet<usize>,
    operator_values: BTreeSet<usize>,
    separator_values: BTreeSet<usize>,
    constant_values: BTreeSet<usize>,
}

impl Classifier {
    /// Creates a classifier from the raw classification sets.
    pub fn new(sets: &TokenSetsData) -> Self {
        let (keywords, operators, separators, constants) = sets;
        Classifier {
            keyword_values: keywords.iter().copied().collect(),
            operator_values: operators.iter().copied().collect(),
            separator_values: separators.iter().copied().collect(),
            constant_values: constants.iter().copied().collect(),
        }
    }

    /// Classifies a terminal state's value. First containing set wins.
    pub fn classify(&self, value: usize) -> TokenKind {
        if self.keyword_values.contains(&value) {
            TokenKind::Keyword
        } else if self.operator_values.contains(&value) {
            TokenKind::Operator
        } else if self.separator_values.contains(&value) {
            TokenKind::Separator
        } else if self.constant_values.contains(&value) {
            TokenKind::Constant
        } else {
            TokenKind::Identifier
        }
    }
}
