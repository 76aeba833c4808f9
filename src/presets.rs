//! This module contains a ready-made automaton config for a small C-like
//! token set. It serves both as the default engine configuration and as a
//! worked example of the raw config format.
//!
//! The table layout follows the usual convention: the dense low indices hold
//! the token-recognizing states, the high indices 30..=32 are reserved for
//! the comment entry states, and the gap in between is dummy-filled.

use crate::{Automaton, AutomatonBuilder, CommentData, ConfigError, StateData, TokenSetsData};

/// The state table of the C-like config.
///
/// State roles:
/// - 0: start (also the "empty token" rest state)
/// - 1: identifier body
/// - 2: integer constant, 4/5: float constant after the decimal point
/// - 3: single-character operators
/// - 6/7: `=` and `==`
/// - 8: separators
/// - 9/10: string constant body and close
/// - 11/12/13: character constant
/// - 14: `/`, which doubles as the approach to both comment openers
/// - 15..=18: keyword chains for `if`, `in` and `int`, falling back to the
///   identifier state on any other letter or digit
/// - 30: line comment entry, 31/32: block comment body and closing
pub const C_LIKE_STATES: &[StateData] = &[
    (
        0,
        true,
        "iWN+-*%<>!=;,(){}[]\"'/",
        &[
            15, 1, 2, 3, 3, 3, 3, 3, 3, 3, 6, 8, 8, 8, 8, 8, 8, 8, 8, 9, 11, 14,
        ],
    ),
    (1, true, "WN", &[1, 1]),
    (2, true, "N.", &[2, 4]),
    (3, true, "", &[]),
    (4, false, "N", &[5]),
    (5, true, "N", &[5]),
    (6, true, "=", &[7]),
    (7, true, "", &[]),
    (8, true, "", &[]),
    (9, false, "\"$", &[10, 9]),
    (10, true, "", &[]),
    (11, false, "$", &[12]),
    (12, false, "'", &[13]),
    (13, true, "", &[]),
    (14, true, "/*", &[30, 31]),
    (15, true, "fnWN", &[16, 17, 1, 1]),
    (16, true, "WN", &[1, 1]),
    (17, true, "tWN", &[18, 1, 1]),
    (18, true, "WN", &[1, 1]),
    (30, false, "", &[]),
    (31, false, "*$", &[32, 31]),
    (32, false, "/*$", &[0, 32, 31]),
];

/// The classification sets of the C-like config.
pub const C_LIKE_TOKEN_SETS: TokenSetsData = (
    // keywords
    &[16, 17, 18],
    // operators
    &[3, 6, 7, 14],
    // separators
    &[8],
    // constants
    &[2, 5, 10, 13],
);

/// The reserved comment entry states of the C-like config.
pub const C_LIKE_COMMENTS: CommentData = (30, 31, 32);

/// Builds the C-like automaton.
pub fn c_like() -> Result<Automaton, ConfigError> {
    AutomatonBuilder::new()
        .add_states(C_LIKE_STATES)?
        .token_sets(&C_LIKE_TOKEN_SETS)
        .comment_states(&C_LIKE_COMMENTS)
        .build()
}
