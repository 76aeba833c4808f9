//! This module contains the automaton engine.
//! The engine owns the dense state table, builds it from static config data
//! (inserting dummy gap-filler states to keep state indices contiguous), and
//! implements the scanning algorithm that turns one line of text plus a
//! persistent comment flag into a sequence of classified tokens.

use itertools::Itertools;
use log::{debug, trace};
use std::collections::HashMap;

use crate::state::{State, TransitionKey};
use crate::{
    Classifier, CommentData, ConfigError, LexTabError, LexTabErrorKind, Result, StateData, StateId,
    StringTable, Token, TokenKind, TokenSetsData,
};

/// The result of resolving one transition.
///
/// Errors and corrupt-table detection are explicit variants instead of
/// reserved index values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The automaton advances to this state.
    Next(StateId),
    /// The state has no transition for the input character. The pending
    /// lexeme must be closed out.
    Error,
    /// The transition lands on a dummy gap-filler state. The transition
    /// table is corrupt; scanning must abort.
    Fatal(StateId),
}

/// The reserved comment entry states of an automaton.
#[derive(Debug, Clone, Copy)]
struct CommentStates {
    /// Entry of a single-line comment. Reaching it discards the rest of
    /// the line.
    line: StateId,
    /// Body of a block comment. Also the resume state for a line that
    /// starts inside an open block comment.
    block_entry: StateId,
    /// Block comment state after a closing-candidate character. Its
    /// terminator transition routes back to state 0.
    block_closing: StateId,
}

/// The mutable per-session state threaded through successive scan calls.
///
/// A session owns the comment flag that carries "currently inside an
/// unterminated block comment" across line boundaries, and the
/// [`StringTable`] the produced tokens reference. The automaton itself stays
/// immutable during scanning, so one automaton can serve any number of
/// independent sessions.
#[derive(Debug, Default)]
pub struct ScanSession {
    in_comment: bool,
    strings: StringTable,
}

impl ScanSession {
    /// Creates a fresh session with an empty string table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the session is currently inside an unterminated block comment.
    pub fn in_comment(&self) -> bool {
        self.in_comment
    }

    /// The string table backing the tokens of this session.
    pub fn strings(&self) -> &StringTable {
        &self.strings
    }

    /// Finishes the session after the last line of input.
    ///
    /// Fails with `UnterminatedComment` if the comment flag is still set,
    /// otherwise hands the string table back to the caller.
    pub fn finish(self) -> Result<StringTable> {
        if self.in_comment {
            return Err(LexTabError::new(LexTabErrorKind::UnterminatedComment));
        }
        Ok(self.strings)
    }
}

/// The automaton engine.
///
/// Built once from static config data via [`AutomatonBuilder`]; read-only
/// afterwards. All per-scan mutable state lives in the [`ScanSession`].
#[derive(Debug)]
pub struct Automaton {
    /// The densely indexed state table. Index gaps in the config are filled
    /// with dummy states.
    states: Vec<State>,
    /// The classifier mapping terminal state values to token categories.
    classifier: Classifier,
    /// The reserved comment entry states, if the config declares comments.
    comments: Option<CommentStates>,
}

impl Automaton {
    /// The states of the automaton, including dummy gap fillers.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Resolves the transition out of `from` for the input character `c`.
    pub fn step(&self, from: StateId, c: char) -> Transition {
        let states = self.states.as_slice();
        match states[from].target_for(c) {
            Some(next) if states[next].is_dummy() => Transition::Fatal(next),
            Some(next) => Transition::Next(next),
            None => Transition::Error,
        }
    }

    /// Scans one line of text and returns its tokens in order.
    ///
    /// The line must not contain the trailing newline. The same `session`
    /// instance must be threaded through every call for a given input, so
    /// block comment state survives across line boundaries.
    ///
    /// A lexeme that ends in a non-final state pushes a single token of kind
    /// [`TokenKind::Error`] carrying the partial text and stops the scan of
    /// this line; the rest of the line is discarded. The only `Err` this
    /// method returns is a [`ConfigError::DummyReached`] for a corrupt
    /// transition table, which is never a property of the input text.
    pub fn scan(&self, line: &str, session: &mut ScanSession) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        let mut lexeme = String::new();
        let mut current = if session.in_comment {
            // Resume mid-comment: the block entry state is reachable from
            // state 0 only through the comment opener, so re-enter directly.
            self.comments
                .as_ref()
                .map(|c| c.block_entry)
                .unwrap_or(StateId::START)
        } else {
            StateId::START
        };

        let chars: Vec<char> = line.chars().collect();
        let mut i = 0;

        // Leading blanks never start a token.
        while i < chars.len() && is_blank(chars[i]) {
            i += 1;
        }

        while i < chars.len() {
            let c = chars[i];
            match self.step(current, c) {
                Transition::Next(next) if self.is_line_comment(next) => {
                    // The rest of the line is comment text and produces no
                    // tokens. The buffered opener is discarded with it.
                    trace!("line comment at column {}, discarding rest of line", i);
                    lexeme.clear();
                    break;
                }
                Transition::Next(next) if self.is_block_comment(next) => {
                    if !session.in_comment {
                        trace!("block comment opened at column {}", i);
                    }
                    session.in_comment = true;
                    lexeme.clear();
                    current = next;
                    i += 1;
                }
                Transition::Next(next) if next == StateId::START => {
                    // The terminator transition of a block comment routes
                    // back to the start state. The comment body contributes
                    // no token.
                    trace!("block comment closed at column {}", i);
                    session.in_comment = false;
                    lexeme.clear();
                    current = StateId::START;
                    i += 1;
                }
                Transition::Next(next) => {
                    if !session.in_comment {
                        lexeme.push(c);
                    }
                    current = next;
                    i += 1;
                }
                Transition::Fatal(next) => {
                    return Err(ConfigError::DummyReached {
                        index: next.as_usize(),
                    }
                    .into());
                }
                Transition::Error => {
                    if lexeme.is_empty() && !is_blank(c) {
                        // No state consumes this character at all. Emit it
                        // as an Error token instead of re-examining it
                        // forever.
                        let handle = session.strings.intern(&c.to_string());
                        tokens.push(Token::new(TokenKind::Error, handle));
                        return Ok(tokens);
                    }
                    if !self.finish_token(current, &mut lexeme, &mut tokens, &mut session.strings) {
                        return Ok(tokens);
                    }
                    current = StateId::START;
                    // Blanks are consumed and dropped; any other character
                    // both ended the previous token and starts the next one,
                    // so it is re-examined against the reset automaton.
                    if is_blank(c) {
                        i += 1;
                    }
                }
            }
        }

        // End of line forces the pending lexeme to complete.
        if !lexeme.is_empty() {
            self.finish_token(current, &mut lexeme, &mut tokens, &mut session.strings);
        }

        Ok(tokens)
    }

    /// Closes out the pending lexeme.
    ///
    /// A no-op success if the lexeme is empty. In a final state the lexeme is
    /// classified, interned and pushed as a token. In a non-final state the
    /// lexeme is interned and pushed as an Error token; the `false` return
    /// tells the scan loop to stop for this line.
    fn finish_token(
        &self,
        current: StateId,
        lexeme: &mut String,
        tokens: &mut Vec<Token>,
        strings: &mut StringTable,
    ) -> bool {
        if lexeme.is_empty() {
            return true;
        }
        let state = &self.states.as_slice()[current];
        let handle = strings.intern(lexeme);
        if !state.is_final() {
            trace!("lexeme '{}' ended in non-final state {}", lexeme, current);
            tokens.push(Token::new(TokenKind::Error, handle));
            return false;
        }
        let kind = self.classifier.classify(state.value());
        trace!("token {} '{}' from state {}", kind, lexeme, current);
        tokens.push(Token::new(kind, handle));
        lexeme.clear();
        true
    }

    fn is_line_comment(&self, id: StateId) -> bool {
        self.comments.as_ref().is_some_and(|c| c.line == id)
    }

    fn is_block_comment(&self, id: StateId) -> bool {
        self.comments
            .as_ref()
            .is_some_and(|c| c.block_entry == id || c.block_closing == id)
    }
}

#[inline]
fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// An automaton builder collects static config data and validates it into
/// an [`Automaton`].
#[derive(Debug, Default)]
pub struct AutomatonBuilder {
    states: Vec<State>,
    declared: Vec<usize>,
    classifier: Classifier,
    comments: Option<CommentData>,
}

impl AutomatonBuilder {
    /// Creates a new automaton builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds state config entries to the builder.
    ///
    /// Entries must appear in increasing index order; any index gap since the
    /// previous entry is filled with dummy states so the table stays densely
    /// indexed. Fails if entries are out of order, if an entry's keys and
    /// targets differ in length, or if an entry declares a key twice.
    pub fn add_states(mut self, data: &[StateData]) -> std::result::Result<Self, ConfigError> {
        for (index, is_final, keys, targets) in data {
            let index = *index;
            if keys.chars().count() != targets.len() {
                return Err(ConfigError::MalformedTransitions {
                    index,
                    keys: keys.chars().count(),
                    targets: targets.len(),
                });
            }
            if let Some(dup) = keys.chars().duplicates().next() {
                return Err(ConfigError::DuplicateKey { index, key: dup });
            }
            if index < self.states.len() {
                return Err(ConfigError::OutOfOrder {
                    index,
                    previous: self.states.len().saturating_sub(1),
                });
            }
            while self.states.len() < index {
                self.states.push(State::dummy());
            }
            let transitions: HashMap<TransitionKey, StateId> = keys
                .chars()
                .zip(targets.iter())
                .map(|(key, target)| (TransitionKey::from_config(key), StateId::new(*target)))
                .collect();
            self.states.push(State::new(index, *is_final, transitions));
            self.declared.push(index);
        }
        Ok(self)
    }

    /// Sets the four classification sets.
    pub fn token_sets(mut self, sets: &TokenSetsData) -> Self {
        self.classifier = Classifier::new(sets);
        self
    }

    /// Declares the reserved comment entry states.
    pub fn comment_states(mut self, comments: &CommentData) -> Self {
        self.comments = Some(*comments);
        self
    }

    /// Validates the collected config and builds the automaton.
    ///
    /// Fails if no valid start state exists, if any transition targets an
    /// index beyond the highest declared state, or if a comment entry index
    /// does not name a declared state. On failure no automaton is produced.
    pub fn build(self) -> std::result::Result<Automaton, ConfigError> {
        if self.states.is_empty() || !self.states[0].is_final() || self.states[0].is_dummy() {
            return Err(ConfigError::MissingStartState);
        }
        for state in &self.states {
            for target in state.transitions().values() {
                if target.as_usize() >= self.states.len() {
                    return Err(ConfigError::TargetOutOfRange {
                        index: state.value(),
                        target: target.as_usize(),
                    });
                }
            }
        }
        let comments = match self.comments {
            Some((line, block_entry, block_closing)) => {
                for index in [line, block_entry, block_closing] {
                    let declared =
                        index < self.states.len() && !self.states[index].is_dummy();
                    if !declared {
                        return Err(ConfigError::InvalidCommentState { index });
                    }
                }
                Some(CommentStates {
                    line: StateId::new(line),
                    block_entry: StateId::new(block_entry),
                    block_closing: StateId::new(block_closing),
                })
            }
            None => None,
        };
        debug!(
            "built automaton with {} states ({} declared, {} dummies)",
            self.states.len(),
            self.declared.len(),
            self.states.len() - self.declared.len()
        );
        Ok(Automaton {
            states: self.states,
            classifier: self.classifier,
            comments,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;

    // Initialize the logger for the tests
    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn c_like() -> Automaton {
        presets::c_like().unwrap()
    }

    fn kinds_and_texts(tokens: &[Token], session: &ScanSession) -> Vec<(TokenKind, String)> {
        tokens
            .iter()
            .map(|t| (t.kind(), t.text(session.strings()).to_string()))
            .collect()
    }

    #[test]
    fn test_build_fills_gaps_with_dummies() {
        init();
        let automaton = c_like();
        // The preset reserves indices 30..=32 for comments, so the gap
        // after the last dense state is dummy-filled.
        assert_eq!(automaton.states().len(), 33);
        assert!(automaton.states()[StateId::new(19)].is_dummy());
        assert!(automaton.states()[StateId::new(29)].is_dummy());
        assert!(!automaton.states()[StateId::new(30)].is_dummy());
    }

    #[test]
    fn test_step_resolves_through_the_state_table() {
        let automaton = c_like();
        assert_eq!(
            automaton.step(StateId::START, '+'),
            Transition::Next(StateId::new(3))
        );
        assert_eq!(
            automaton.step(StateId::new(3), '+'),
            Transition::Error
        );
        assert_eq!(
            automaton.step(StateId::new(14), '*'),
            Transition::Next(StateId::new(31))
        );
    }

    #[test]
    fn test_out_of_order_config_is_rejected() {
        let result = AutomatonBuilder::new().add_states(&[
            (0, true, "", &[]),
            (2, true, "", &[]),
            (1, true, "", &[]),
        ]);
        assert!(matches!(
            result,
            Err(ConfigError::OutOfOrder { index: 1, .. })
        ));
    }

    #[test]
    fn test_mismatched_transition_list_is_rejected() {
        let result =
            AutomatonBuilder::new().add_states(&[(0, true, "ab", &[1])]);
        assert!(matches!(
            result,
            Err(ConfigError::MalformedTransitions {
                index: 0,
                keys: 2,
                targets: 1,
            })
        ));
    }

    #[test]
    fn test_duplicate_key_is_rejected() {
        let result = AutomatonBuilder::new().add_states(&[(0, true, "aa", &[1, 2])]);
        assert!(matches!(
            result,
            Err(ConfigError::DuplicateKey { index: 0, key: 'a' })
        ));
    }

    #[test]
    fn test_target_out_of_range_is_rejected() {
        let result = AutomatonBuilder::new()
            .add_states(&[(0, true, "a", &[7]), (1, true, "", &[])])
            .unwrap()
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::TargetOutOfRange { index: 0, target: 7 })
        ));
    }

    #[test]
    fn test_missing_start_state_is_rejected() {
        let result = AutomatonBuilder::new()
            .add_states(&[(0, false, "", &[])])
            .unwrap()
            .build();
        assert!(matches!(result, Err(ConfigError::MissingStartState)));
    }

    #[test]
    fn test_comment_entry_must_be_declared() {
        let result = AutomatonBuilder::new()
            .add_states(&[(0, true, "", &[])])
            .unwrap()
            .comment_states(&(5, 6, 7))
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidCommentState { index: 5 })
        ));
    }

    #[test]
    fn test_transition_into_dummy_is_fatal() {
        // State 3 is a gap filler; the transition 'b' -> 3 is legal at
        // build time but corrupt when taken.
        let automaton = AutomatonBuilder::new()
            .add_states(&[(0, true, "ab", &[1, 3]), (1, true, "", &[]), (4, true, "", &[])])
            .unwrap()
            .build()
            .unwrap();
        let mut session = ScanSession::new();
        let result = automaton.scan("b", &mut session);
        assert!(matches!(
            result.unwrap_err().source.as_ref(),
            LexTabErrorKind::Config(ConfigError::DummyReached { index: 3 })
        ));
    }

    #[test]
    fn test_empty_line_yields_no_tokens() {
        let automaton = c_like();
        let mut session = ScanSession::new();
        let tokens = automaton.scan("", &mut session).unwrap();
        assert!(tokens.is_empty());
        assert!(!session.in_comment());
    }

    #[test]
    fn test_blank_line_yields_no_tokens() {
        let automaton = c_like();
        let mut session = ScanSession::new();
        let tokens = automaton.scan(" \t  \t", &mut session).unwrap();
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_line_comment_discards_rest_of_line() {
        let automaton = c_like();
        let mut session = ScanSession::new();
        let tokens = automaton.scan("// comment text", &mut session).unwrap();
        assert!(tokens.is_empty());
        assert!(!session.in_comment());
    }

    #[test]
    fn test_tokens_before_line_comment_survive() {
        let automaton = c_like();
        let mut session = ScanSession::new();
        let tokens = automaton.scan("a // trailing", &mut session).unwrap();
        assert_eq!(
            kinds_and_texts(&tokens, &session),
            vec![(TokenKind::Identifier, "a".to_string())]
        );
    }

    #[test]
    fn test_block_comment_spans_lines() {
        let automaton = c_like();
        let mut session = ScanSession::new();

        let tokens = automaton.scan("/* start", &mut session).unwrap();
        assert!(tokens.is_empty());
        assert!(session.in_comment());

        let tokens = automaton.scan("end */", &mut session).unwrap();
        assert!(tokens.is_empty());
        assert!(!session.in_comment());
    }

    #[test]
    fn test_inline_block_comment_splits_tokens() {
        let automaton = c_like();
        let mut session = ScanSession::new();
        let tokens = automaton.scan("a/*x*/b", &mut session).unwrap();
        assert_eq!(
            kinds_and_texts(&tokens, &session),
            vec![
                (TokenKind::Identifier, "a".to_string()),
                (TokenKind::Identifier, "b".to_string()),
            ]
        );
        assert!(!session.in_comment());
    }

    #[test]
    fn test_block_comment_with_stray_stars() {
        let automaton = c_like();
        let mut session = ScanSession::new();
        let tokens = automaton.scan("/* a ** b *** */ x", &mut session).unwrap();
        assert_eq!(
            kinds_and_texts(&tokens, &session),
            vec![(TokenKind::Identifier, "x".to_string())]
        );
        assert!(!session.in_comment());
    }

    #[test]
    fn test_one_character_ends_and_starts_tokens() {
        init();
        let automaton = c_like();
        let mut session = ScanSession::new();
        let tokens = automaton.scan("a+b", &mut session).unwrap();
        assert_eq!(
            kinds_and_texts(&tokens, &session),
            vec![
                (TokenKind::Identifier, "a".to_string()),
                (TokenKind::Operator, "+".to_string()),
                (TokenKind::Identifier, "b".to_string()),
            ]
        );
    }

    #[test]
    fn test_full_declaration_line() {
        let automaton = c_like();
        let mut session = ScanSession::new();
        let tokens = automaton.scan("int count = 42;", &mut session).unwrap();
        assert_eq!(
            kinds_and_texts(&tokens, &session),
            vec![
                (TokenKind::Keyword, "int".to_string()),
                (TokenKind::Identifier, "count".to_string()),
                (TokenKind::Operator, "=".to_string()),
                (TokenKind::Constant, "42".to_string()),
                (TokenKind::Separator, ";".to_string()),
            ]
        );
    }

    #[test]
    fn test_keyword_prefix_falls_back_to_identifier() {
        let automaton = c_like();
        let mut session = ScanSession::new();
        let tokens = automaton.scan("i if ifx in int ints", &mut session).unwrap();
        assert_eq!(
            kinds_and_texts(&tokens, &session),
            vec![
                (TokenKind::Identifier, "i".to_string()),
                (TokenKind::Keyword, "if".to_string()),
                (TokenKind::Identifier, "ifx".to_string()),
                (TokenKind::Keyword, "in".to_string()),
                (TokenKind::Keyword, "int".to_string()),
                (TokenKind::Identifier, "ints".to_string()),
            ]
        );
    }

    #[test]
    fn test_two_char_operator_uses_exact_transition() {
        let automaton = c_like();
        let mut session = ScanSession::new();
        let tokens = automaton.scan("a == b = c", &mut session).unwrap();
        assert_eq!(
            kinds_and_texts(&tokens, &session),
            vec![
                (TokenKind::Identifier, "a".to_string()),
                (TokenKind::Operator, "==".to_string()),
                (TokenKind::Identifier, "b".to_string()),
                (TokenKind::Operator, "=".to_string()),
                (TokenKind::Identifier, "c".to_string()),
            ]
        );
    }

    #[test]
    fn test_slash_is_division_outside_comments() {
        let automaton = c_like();
        let mut session = ScanSession::new();
        let tokens = automaton.scan("a/b", &mut session).unwrap();
        assert_eq!(
            kinds_and_texts(&tokens, &session),
            vec![
                (TokenKind::Identifier, "a".to_string()),
                (TokenKind::Operator, "/".to_string()),
                (TokenKind::Identifier, "b".to_string()),
            ]
        );
    }

    #[test]
    fn test_string_constant_closes_on_exact_quote() {
        // The string body state has both a wildcard and an exact '"' key;
        // the exact key must win.
        let automaton = c_like();
        let mut session = ScanSession::new();
        let tokens = automaton.scan("\"hi there\";", &mut session).unwrap();
        assert_eq!(
            kinds_and_texts(&tokens, &session),
            vec![
                (TokenKind::Constant, "\"hi there\"".to_string()),
                (TokenKind::Separator, ";".to_string()),
            ]
        );
    }

    #[test]
    fn test_unterminated_string_is_single_error_token() {
        let automaton = c_like();
        let mut session = ScanSession::new();
        let tokens = automaton.scan("\"abc", &mut session).unwrap();
        assert_eq!(
            kinds_and_texts(&tokens, &session),
            vec![(TokenKind::Error, "\"abc".to_string())]
        );
    }

    #[test]
    fn test_malformed_token_stops_the_line() {
        let automaton = c_like();
        let mut session = ScanSession::new();
        // "3." ends in the non-final float-dot state; the rest of the line
        // is discarded.
        let tokens = automaton.scan("3. x y", &mut session).unwrap();
        assert_eq!(
            kinds_and_texts(&tokens, &session),
            vec![(TokenKind::Error, "3.".to_string())]
        );
    }

    #[test]
    fn test_unrecognized_character_is_an_error_token() {
        let automaton = c_like();
        let mut session = ScanSession::new();
        let tokens = automaton.scan("a @ b", &mut session).unwrap();
        assert_eq!(
            kinds_and_texts(&tokens, &session),
            vec![
                (TokenKind::Identifier, "a".to_string()),
                (TokenKind::Error, "@".to_string()),
            ]
        );
    }

    #[test]
    fn test_number_constants() {
        let automaton = c_like();
        let mut session = ScanSession::new();
        let tokens = automaton.scan("1 23 4.5 6.", &mut session).unwrap();
        assert_eq!(
            kinds_and_texts(&tokens, &session),
            vec![
                (TokenKind::Constant, "1".to_string()),
                (TokenKind::Constant, "23".to_string()),
                (TokenKind::Constant, "4.5".to_string()),
                (TokenKind::Error, "6.".to_string()),
            ]
        );
    }

    #[test]
    fn test_character_constant() {
        let automaton = c_like();
        let mut session = ScanSession::new();
        let tokens = automaton.scan("'x'", &mut session).unwrap();
        assert_eq!(
            kinds_and_texts(&tokens, &session),
            vec![(TokenKind::Constant, "'x'".to_string())]
        );
    }

    #[test]
    fn test_session_finish_flags_unterminated_comment() {
        let automaton = c_like();
        let mut session = ScanSession::new();
        automaton.scan("a", &mut session).unwrap();
        automaton.scan("/* open", &mut session).unwrap();
        let result = session.finish();
        assert!(matches!(
            result.unwrap_err().source.as_ref(),
            LexTabErrorKind::UnterminatedComment
        ));
    }

    #[test]
    fn test_session_finish_returns_the_string_table() {
        let automaton = c_like();
        let mut session = ScanSession::new();
        let tokens = automaton.scan("a a a", &mut session).unwrap();
        assert_eq!(tokens.len(), 3);
        let strings = session.finish().unwrap();
        // All three tokens share one interned lexeme.
        assert_eq!(strings.len(), 1);
    }
}
