use thiserror::Error;

/// The result type for the `lextab` crate.
pub type Result<T> = std::result::Result<T, LexTabError>;

/// The error type for the `lextab` crate.
#[derive(Error, Debug)]
pub struct LexTabError {
    /// The source of the error.
    pub source: Box<LexTabErrorKind>,
}

impl LexTabError {
    /// Create a new `LexTabError`.
    pub fn new(kind: LexTabErrorKind) -> Self {
        LexTabError {
            source: Box::new(kind),
        }
    }
}

impl std::fmt::Display for LexTabError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}

/// The error kind type.
#[derive(Error, Debug)]
pub enum LexTabErrorKind {
    /// The automaton's static configuration is invalid. Not recoverable;
    /// raised during construction or, for [`ConfigError::DummyReached`],
    /// when scanning exposes a corrupt transition table.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A lexeme ended in a non-final state. Scanning of the offending line
    /// has stopped; the line number is 1-based.
    #[error("malformed token '{lexeme}' on line {line}")]
    MalformedToken {
        /// The partial lexeme accumulated before the failure.
        lexeme: String,
        /// The 1-based number of the line the lexeme appeared on.
        line: usize,
    },

    /// The comment flag was still set after the last line of input.
    #[error("unterminated block comment at end of input")]
    UnterminatedComment,

    /// Reading a line from the input failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<ConfigError> for LexTabError {
    fn from(error: ConfigError) -> Self {
        LexTabError::new(LexTabErrorKind::Config(error))
    }
}

impl From<std::io::Error> for LexTabError {
    fn from(error: std::io::Error) -> Self {
        LexTabError::new(LexTabErrorKind::Io(error))
    }
}

/// An error in the automaton's static configuration.
///
/// All variants are fatal: the automaton is not built, or, for
/// [`ConfigError::DummyReached`], the running scan is aborted since the
/// transition table itself is corrupt. None of them describe a property of
/// the scanned text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// State entries must be declared in non-decreasing index order.
    #[error("state {index} declared after state {previous}, entries must be ordered")]
    OutOfOrder {
        /// The offending state index.
        index: usize,
        /// The highest index declared before it.
        previous: usize,
    },

    /// A state's transition keys and targets differ in length.
    #[error("state {index} declares {keys} transition keys but {targets} targets")]
    MalformedTransitions {
        /// The offending state index.
        index: usize,
        /// The number of transition keys.
        keys: usize,
        /// The number of transition targets.
        targets: usize,
    },

    /// A state declares the same transition key twice.
    #[error("state {index} declares transition key '{key}' more than once")]
    DuplicateKey {
        /// The offending state index.
        index: usize,
        /// The duplicated key char.
        key: char,
    },

    /// A transition targets an index beyond the highest declared state.
    #[error("state {index} has a transition to undeclared state {target}")]
    TargetOutOfRange {
        /// The offending state index.
        index: usize,
        /// The out-of-range target index.
        target: usize,
    },

    /// A reserved comment entry index does not name a declared state.
    #[error("comment entry state {index} is not a declared state")]
    InvalidCommentState {
        /// The offending comment entry index.
        index: usize,
    },

    /// The config declares no states, or state 0 is missing or not final.
    #[error("automaton config has no valid start state")]
    MissingStartState,

    /// A scan transitioned into a dummy gap-filler state.
    #[error("transition into dummy state {index}, the transition table is corrupt")]
    DummyReached {
        /// The index of the dummy state that was reached.
        index: usize,
    },
}
