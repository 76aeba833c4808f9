//! This module contains the runtime representation of one automaton state
//! and the three-tier transition lookup over it.

use std::collections::HashMap;

use crate::StateId;

/// The sentinel value carried by dummy gap-filler states. It is never
/// produced by a real config entry, so comparing a state's value against it
/// identifies a dummy.
pub(crate) const DUMMY_VALUE: usize = usize::MAX;

/// A key in a state's transition map.
///
/// A key is either an exact input character or one of three character
/// classes. The class symbols `W`, `N` and `$` are reserved in raw config
/// keys and cannot be used as exact characters there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionKey {
    /// Matches exactly this character.
    Exact(char),
    /// Matches an ASCII letter or `_` (config symbol `W`).
    Letter,
    /// Matches any ASCII alphanumeric character (config symbol `N`).
    Alnum,
    /// Matches any character (config symbol `$`).
    Any,
}

impl TransitionKey {
    /// Interprets a raw config key char, mapping the reserved class symbols
    /// to their classes.
    pub(crate) fn from_config(key: char) -> Self {
        match key {
            'W' => TransitionKey::Letter,
            'N' => TransitionKey::Alnum,
            '$' => TransitionKey::Any,
            c => TransitionKey::Exact(c),
        }
    }

    /// Classifies an input character into the class key it belongs to.
    /// Classification is ASCII-only: any non-ASCII character falls into
    /// the wildcard class.
    pub(crate) fn class_of(c: char) -> Self {
        if c.is_ascii_alphabetic() || c == '_' {
            TransitionKey::Letter
        } else if c.is_ascii_alphanumeric() {
            TransitionKey::Alnum
        } else {
            TransitionKey::Any
        }
    }
}

impl std::fmt::Display for TransitionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransitionKey::Exact(c) => write!(f, "'{}'", c.escape_default()),
            TransitionKey::Letter => write!(f, "W"),
            TransitionKey::Alnum => write!(f, "N"),
            TransitionKey::Any => write!(f, "$"),
        }
    }
}

/// One state of the automaton.
#[derive(Debug, Clone)]
pub struct State {
    /// The semantic value of the state. It is only consulted at acceptance
    /// time, when a token ends in this state; transitions never read it.
    value: usize,
    /// Whether a token may legally end in this state.
    is_final: bool,
    /// The outgoing transitions. Keys are unique per state.
    transitions: HashMap<TransitionKey, StateId>,
}

impl State {
    pub(crate) fn new(
        value: usize,
        is_final: bool,
        transitions: HashMap<TransitionKey, StateId>,
    ) -> Self {
        State {
            value,
            is_final,
            transitions,
        }
    }

    /// Creates a dummy gap-filler state: sentinel value, not final, no
    /// transitions. Reaching one during a scan is a fatal config error.
    pub(crate) fn dummy() -> Self {
        State {
            value: DUMMY_VALUE,
            is_final: false,
            transitions: HashMap::new(),
        }
    }

    /// Get the semantic value of the state.
    pub fn value(&self) -> usize {
        self.value
    }

    /// Whether a token may legally end in this state.
    pub fn is_final(&self) -> bool {
        self.is_final
    }

    /// Whether this state is a dummy gap filler.
    pub fn is_dummy(&self) -> bool {
        self.value == DUMMY_VALUE
    }

    /// The outgoing transitions of the state.
    pub fn transitions(&self) -> &HashMap<TransitionKey, StateId> {
        &self.transitions
    }

    /// Resolves the successor state for an input character.
    ///
    /// Resolution order is strict and three-tiered:
    /// 1. an exact key for `c`,
    /// 2. the class key `c` belongs to (`W`, `N` or `$`),
    /// 3. the explicit wildcard key `$`.
    ///
    /// Returns `None` when none of the tiers match.
    pub fn target_for(&self, c: char) -> Option<StateId> {
        if let Some(next) = self.transitions.get(&TransitionKey::Exact(c)) {
            return Some(*next);
        }
        if let Some(next) = self.transitions.get(&TransitionKey::class_of(c)) {
            return Some(*next);
        }
        self.transitions.get(&TransitionKey::Any).copied()
    }
}
