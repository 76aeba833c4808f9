use std::ops::Index;

/// The identifier of a state in the automaton's transition table.
/// This is used both as the index into the dense state table and as the
/// semantic value of a declared state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct StateId(usize);

impl StateId {
    /// The universal start state. It doubles as the "empty token" rest state
    /// and as the target of the block-comment terminator transition.
    pub const START: StateId = StateId(0);

    /// Create a new state id.
    #[inline]
    pub fn new(index: usize) -> Self {
        StateId(index)
    }

    /// Get the state id as usize.
    #[inline]
    pub fn as_usize(&self) -> usize {
        self.0
    }
}

impl<T> Index<StateId> for [T] {
    type Output = T;

    #[inline]
    fn index(&self, index: StateId) -> &Self::Output {
        &self[index.0]
    }
}

impl std::fmt::Display for StateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for StateId {
    fn from(index: usize) -> Self {
        StateId::new(index)
    }
}

/// A stable handle into the [`StringTable`](crate::StringTable).
/// Tokens carry a `LexemeId` instead of the lexeme text itself; the handle
/// stays valid for the whole lifetime of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct LexemeId(usize);

impl LexemeId {
    /// Create a new lexeme id.
    #[inline]
    pub(crate) fn new(index: usize) -> Self {
        LexemeId(index)
    }

    /// Get the lexeme id as usize.
    #[inline]
    pub fn as_usize(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for LexemeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
