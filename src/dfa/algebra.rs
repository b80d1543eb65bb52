use super::{Dfa, DfaState, StateId};
use log::debug;
use std::collections::{BTreeSet, HashMap};

/// Makes `dfa` total over `alphabet` together with the symbols `dfa` already
/// uses.
///
/// Missing transitions are routed to one added trap state that loops on every
/// symbol. An automaton that is already total is returned unchanged.
#[must_use]
pub fn totalize(dfa: &Dfa, alphabet: impl IntoIterator<Item = char>) -> Dfa {
    let mut alphabet: BTreeSet<char> = alphabet.into_iter().collect();
    alphabet.extend(dfa.alphabet());

    if dfa.is_total(&alphabet) {
        return dfa.clone();
    }

    let mut states = dfa.states.clone();
    let trap = states.len();
    states.push(DfaState {
        id: trap,
        transitions: alphabet.iter().map(|&c| (c, trap)).collect(),
        ..DfaState::default()
    });
    for state in &mut states[..trap] {
        for &c in &alphabet {
            state.transitions.entry(c).or_insert(trap);
        }
    }

    debug!("totalized DFA over {} symbols with trap state {trap}", alphabet.len());
    Dfa::from_states(states, dfa.start)
}

/// Returns an automaton accepting exactly the strings over `alphabet` (plus
/// the symbols `dfa` uses) that `dfa` rejects.
///
/// The complement is only meaningful relative to that alphabet: any other
/// character is still rejected.
#[must_use]
pub fn complement(dfa: &Dfa, alphabet: impl IntoIterator<Item = char>) -> Dfa {
    let mut total = totalize(dfa, alphabet);
    for state in &mut total.states {
        state.is_final = !state.is_final;
    }
    total
}

/// Product construction: accepts what both `left` and `right` accept.
///
/// Runs over the symbols both automata use and only materializes pairs that
/// are reachable from the pair of start states.
#[must_use]
pub fn intersect(left: &Dfa, right: &Dfa) -> Dfa {
    let alphabet: BTreeSet<char> = left
        .alphabet()
        .intersection(&right.alphabet())
        .copied()
        .collect();

    let mut states: Vec<DfaState> = Vec::new();
    // `pairs[id]` is the pair behind product state `id`; ids are handed out
    // in BFS order, so the vector doubles as the worklist.
    let mut pairs: Vec<(StateId, StateId)> = Vec::new();
    let mut index: HashMap<(StateId, StateId), StateId> = HashMap::new();

    let mut product_state = |pair: (StateId, StateId),
                             states: &mut Vec<DfaState>,
                             pairs: &mut Vec<(StateId, StateId)>| {
        *index.entry(pair).or_insert_with(|| {
            let id = states.len();
            let is_final = left.state(pair.0).is_final && right.state(pair.1).is_final;
            states.push(DfaState::new(id, is_final));
            pairs.push(pair);
            id
        })
    };

    let start = product_state((left.start, right.start), &mut states, &mut pairs);

    let mut next = 0;
    while next < pairs.len() {
        let (l, r) = pairs[next];
        for &c in &alphabet {
            if let (Some(&lt), Some(&rt)) = (
                left.state(l).transitions.get(&c),
                right.state(r).transitions.get(&c),
            ) {
                let target = product_state((lt, rt), &mut states, &mut pairs);
                states[next].transitions.insert(c, target);
            }
        }
        next += 1;
    }

    debug!(
        "intersection of {} and {} states has {} reachable pairs",
        left.state_count(),
        right.state_count(),
        states.len()
    );
    Dfa::from_states(states, start)
}

impl Dfa {
    /// See [`totalize`].
    #[must_use]
    pub fn totalize(&self, alphabet: impl IntoIterator<Item = char>) -> Dfa {
        totalize(self, alphabet)
    }

    /// See [`complement`].
    #[must_use]
    pub fn complement(&self, alphabet: impl IntoIterator<Item = char>) -> Dfa {
        complement(self, alphabet)
    }

    /// See [`intersect`].
    #[must_use]
    pub fn intersect(&self, other: &Dfa) -> Dfa {
        intersect(self, other)
    }
}
