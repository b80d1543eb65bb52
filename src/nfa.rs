//! Nondeterministic automata with named-capture pseudo-symbols.
//!
//! States live in a flat arena and refer to each other by [`StateId`], so the
//! cycles introduced by `…` never turn into ownership cycles.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};

pub mod builder;

pub use self::builder::NfaBuilder;

/// Index of a state inside its automaton's arena.
pub type StateId = usize;

/// A transition label.
///
/// Besides literal characters, three pseudo-symbols carry capture semantics.
/// None of them consume a literal character on their own: group markers
/// consume nothing, a back-reference consumes whatever its group captured.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Label {
    Char(char),
    GroupStart(String),
    GroupEnd(String),
    BackRef(String),
}

impl Label {
    /// Returns `true` for the group start and end markers.
    #[must_use]
    pub const fn is_marker(&self) -> bool {
        matches!(self, Label::GroupStart(_) | Label::GroupEnd(_))
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Char(c) => write!(f, "{c}"),
            Label::GroupStart(name) => write!(f, "({name}"),
            Label::GroupEnd(name) => write!(f, "{name})"),
            Label::BackRef(name) => write!(f, "<{name}>"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NfaState {
    pub id: StateId,
    pub transitions: BTreeMap<Label, BTreeSet<StateId>>,
    pub epsilon: BTreeSet<StateId>,
    pub is_final: bool,
}

impl NfaState {
    #[must_use]
    pub fn new(id: StateId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn add_transition(&mut self, label: Label, target: StateId) {
        self.transitions.entry(label).or_default().insert(target);
    }
}

/// A compiled NFA.
#[derive(Clone, Debug)]
pub struct Nfa {
    pub(crate) states: Vec<NfaState>,
    pub(crate) start: StateId,
    pub(crate) end: StateId,
    pub(crate) has_backrefs: bool,
}

impl Nfa {
    #[must_use]
    pub fn start(&self) -> StateId {
        self.start
    }

    /// The designated accepting state.
    #[must_use]
    pub fn end(&self) -> StateId {
        self.end
    }

    #[must_use]
    pub fn states(&self) -> &[NfaState] {
        &self.states
    }

    #[must_use]
    pub fn state(&self, id: StateId) -> &NfaState {
        &self.states[id]
    }

    #[must_use]
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Returns `true` if the pattern used a back-reference, which makes the
    /// described language non-regular.
    #[must_use]
    pub fn has_backrefs(&self) -> bool {
        self.has_backrefs
    }

    /// Reflexive-transitive closure of `states` under epsilon edges only.
    #[must_use]
    pub fn epsilon_closure(&self, states: impl IntoIterator<Item = StateId>) -> BTreeSet<StateId> {
        self.closure(states, false)
    }

    /// Like [`Nfa::epsilon_closure`], but group markers are followed as well.
    ///
    /// This is the closure used for determinization: markers consume no
    /// input, and dropping them loses capture positions but not the language.
    #[must_use]
    pub fn silent_closure(&self, states: impl IntoIterator<Item = StateId>) -> BTreeSet<StateId> {
        self.closure(states, true)
    }

    fn closure(
        &self,
        states: impl IntoIterator<Item = StateId>,
        through_markers: bool,
    ) -> BTreeSet<StateId> {
        let mut closure: BTreeSet<StateId> = states.into_iter().collect();
        let mut stack: Vec<StateId> = closure.iter().copied().collect();

        while let Some(id) = stack.pop() {
            let state = &self.states[id];
            let markers = state
                .transitions
                .iter()
                .filter(|(label, _)| through_markers && label.is_marker())
                .flat_map(|(_, targets)| targets);
            for &next in state.epsilon.iter().chain(markers) {
                if closure.insert(next) {
                    stack.push(next);
                }
            }
        }

        closure
    }

    /// All states directly reachable from `states` over `label`.
    #[must_use]
    pub fn move_on<'s>(
        &self,
        states: impl IntoIterator<Item = &'s StateId>,
        label: &Label,
    ) -> BTreeSet<StateId> {
        states
            .into_iter()
            .filter_map(|&id| self.states[id].transitions.get(label))
            .flatten()
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::compile_nfa;

    #[test]
    fn test_epsilon_closure_stops_at_markers() {
        let nfa = compile_nfa("(<g>a)").unwrap();
        let start = nfa.start();

        let epsilon = nfa.epsilon_closure([start]);
        let silent = nfa.silent_closure([start]);
        assert_eq!(epsilon, [start].into());
        assert!(silent.is_superset(&epsilon));
        assert_ne!(silent, epsilon);

        // Only the silent closure reaches the state that consumes 'a'.
        let a = super::Label::Char('a');
        assert!(nfa.move_on(&epsilon, &a).is_empty());
        assert_eq!(nfa.move_on(&silent, &a).len(), 1);
    }

    #[test]
    fn test_epsilon_closure_follows_alternatives() {
        let nfa = compile_nfa("a|b").unwrap();
        let closure = nfa.epsilon_closure([nfa.start()]);
        assert_eq!(closure.len(), 3);
        assert_eq!(closure, nfa.silent_closure([nfa.start()]));
    }
}
