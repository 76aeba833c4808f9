//! This module contains the static data types an automaton is built from.
//! The data is plain `'static` tuples and slices so a full automaton config
//! can be compiled into the binary as consts.

/// The raw data of one declared automaton state:
/// `(state index, is final, transition keys, transition targets)`.
///
/// The transition keys string and the targets slice are parallel: the n-th
/// char of the keys string maps to the n-th target index. A key char is
/// either an exact input character or one of the three reserved class
/// symbols `W` (letter or underscore), `N` (any alphanumeric) and `$`
/// (wildcard). Declaring keys and targets of different lengths is a
/// configuration error.
pub type StateData = (usize, bool, &'static str, &'static [usize]);

/// The four disjoint classification sets, as state values:
/// `(keywords, operators, separators, constants)`.
///
/// A final state whose value appears in none of the sets classifies as an
/// identifier. The sets are checked in the given priority order.
pub type TokenSetsData = (
    &'static [usize],
    &'static [usize],
    &'static [usize],
    &'static [usize],
);

/// The reserved comment entry states of an automaton config:
/// `(line comment entry, block comment entry, block comment closing)`.
///
/// A transition into the line comment entry discards the rest of the line.
/// The block comment pair is the in-comment state (also the resume state
/// when a line starts inside an open block comment) and the state reached
/// after a closing-candidate character; the terminator transition out of the
/// closing state routes back to state 0.
pub type CommentData = (usize, usize, usize);
