//! Deterministic automata: subset construction, minimization, set algebra and
//! conversion back to a pattern.

use super::{
    engine::{MatchResult, Matcher, boundaries},
    nfa::StateId as NfaStateId,
};
use std::collections::{BTreeMap, BTreeSet};

pub mod algebra;
pub mod minimize;
pub mod subset;
pub mod to_regex;

pub use self::{
    algebra::{complement, intersect, totalize},
    minimize::minimize,
    subset::nfa_to_dfa,
    to_regex::to_regex,
};

/// Index of a state inside a [`Dfa`].
pub type StateId = usize;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DfaState {
    pub id: StateId,
    /// The NFA states this state stands for. Empty for states that were not
    /// produced by subset construction (trap and product states).
    pub nfa_states: BTreeSet<NfaStateId>,
    /// Partial transition map.
    pub transitions: BTreeMap<char, StateId>,
    pub is_final: bool,
}

impl DfaState {
    #[must_use]
    pub fn new(id: StateId, is_final: bool) -> Self {
        Self {
            id,
            is_final,
            ..Self::default()
        }
    }
}

/// A deterministic automaton over characters.
///
/// Totality is not guaranteed: a missing transition rejects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dfa {
    pub(crate) states: Vec<DfaState>,
    pub(crate) start: StateId,
}

impl Dfa {
    /// Builds a DFA from explicit states. Ids must be arena indexes.
    #[must_use]
    pub fn from_states(states: Vec<DfaState>, start: StateId) -> Self {
        debug_assert!(states.iter().enumerate().all(|(i, s)| s.id == i));
        debug_assert!(start < states.len());
        Self { states, start }
    }

    #[must_use]
    pub fn start(&self) -> StateId {
        self.start
    }

    #[must_use]
    pub fn states(&self) -> &[DfaState] {
        &self.states
    }

    #[must_use]
    pub fn state(&self, id: StateId) -> &DfaState {
        &self.states[id]
    }

    #[must_use]
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Ids of the accepting states.
    pub fn finals(&self) -> impl Iterator<Item = StateId> + '_ {
        self.states.iter().filter(|s| s.is_final).map(|s| s.id)
    }

    /// Every symbol that labels at least one transition.
    #[must_use]
    pub fn alphabet(&self) -> BTreeSet<char> {
        self.states
            .iter()
            .flat_map(|s| s.transitions.keys().copied())
            .collect()
    }

    /// Returns `true` if every state has a transition on every symbol of
    /// `alphabet`.
    #[must_use]
    pub fn is_total(&self, alphabet: &BTreeSet<char>) -> bool {
        self.states
            .iter()
            .all(|s| alphabet.iter().all(|c| s.transitions.contains_key(c)))
    }

    /// Follows `text` from `from`, returning the state reached, or `None` if a
    /// transition is missing.
    #[must_use]
    pub fn walk(&self, from: StateId, text: &str) -> Option<StateId> {
        text.chars()
            .try_fold(from, |state, c| self.states[state].transitions.get(&c).copied())
    }

    /// Returns `true` if the automaton accepts the whole of `text`.
    #[must_use]
    pub fn accepts(&self, text: &str) -> bool {
        self.walk(self.start, text)
            .is_some_and(|state| self.states[state].is_final)
    }

    /// The end of the longest match starting at byte offset `start`.
    fn longest_from(&self, text: &str, start: usize) -> Option<usize> {
        let mut state = self.start;
        let mut best = self.states[state].is_final.then_some(start);

        for (offset, c) in text[start..].char_indices() {
            let Some(&next) = self.states[state].transitions.get(&c) else {
                break;
            };
            state = next;
            if self.states[state].is_final {
                best = Some(start + offset + c.len_utf8());
            }
        }

        best
    }
}

impl Matcher for Dfa {
    fn r#match(&self, text: &str) -> Option<MatchResult> {
        self.accepts(text)
            .then(|| MatchResult::new(text, 0..text.len(), &BTreeMap::new()))
    }

    /// Slides the start offset and reruns the walk from each one, which is
    /// quadratic in the length of `text`.
    fn search(&self, text: &str) -> Option<MatchResult> {
        boundaries(text).find_map(|start| {
            self.longest_from(text, start)
                .map(|end| MatchResult::new(text, start..end, &BTreeMap::new()))
        })
    }

    fn is_match(&self, text: &str) -> bool {
        self.accepts(text)
    }
}
