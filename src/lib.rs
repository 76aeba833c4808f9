#![forbid(missing_docs)]
//! The `lextab` crate provides a table-driven lexical scanner.
//! A configurable deterministic finite automaton turns lines of source text
//! into a classified stream of tokens (keywords, operators, separators,
//! identifiers, constants), handling single- and multi-line comments in-line
//! so they never appear as tokens.

/// The automaton module contains the engine: the state table, its builder
/// and the scanning algorithm.
mod automaton;
pub use automaton::{Automaton, AutomatonBuilder, ScanSession, Transition};

/// The state module contains the runtime representation of one automaton
/// state and the transition lookup over it.
mod state;
pub use state::{State, TransitionKey};

/// The classifier module maps terminal state values to token categories.
mod classifier;
pub use classifier::{Classifier, TokenKind};

/// The token module contains the classified lexical unit type.
mod token;
pub use token::Token;

/// The string_table module contains the interning table that backs token
/// values.
mod string_table;
pub use string_table::StringTable;

/// The config module contains the static data types an automaton is built
/// from.
mod config;
pub use config::{CommentData, StateData, TokenSetsData};

/// The presets module contains a ready-made C-like automaton config.
pub mod presets;

/// The analyzer module contains the line-oriented driver around the engine.
mod analyzer;
pub use analyzer::{Analyzer, DIRECTIVE_MARKER};

/// Module with conversion to graphviz dot format
#[cfg(feature = "dot")]
mod dot;
#[cfg(feature = "dot")]
pub use dot::render_to;

/// Module with error definitions
mod errors;
pub use errors::{ConfigError, LexTabError, LexTabErrorKind, Result};

/// Module that provides types for integer ids that can also be used to index
/// into slices.
mod index;
pub use index::{LexemeId, StateId};
