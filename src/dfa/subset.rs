use super::{Dfa, DfaState, StateId};
use crate::nfa::{Label, Nfa, StateId as NfaStateId};
use log::{debug, trace};
use std::collections::{BTreeSet, HashMap, VecDeque};

/// Converts `nfa` into an equivalent [`Dfa`] by subset construction.
///
/// Each DFA state is keyed by the set of NFA states it subsumes, and ids are
/// handed out in discovery order starting from the start state. Group markers
/// are followed as silent moves, so the result accepts the same strings as
/// the NFA but records no captures. Back-reference edges have no
/// deterministic counterpart and are never followed.
#[must_use]
pub fn nfa_to_dfa(nfa: &Nfa) -> Dfa {
    if nfa.has_backrefs() {
        debug!("determinizing an NFA with back-references; those paths are dropped");
    }

    let mut states = Vec::new();
    let mut index: HashMap<BTreeSet<NfaStateId>, StateId> = HashMap::new();
    let mut queue = VecDeque::new();

    let start = nfa.silent_closure([nfa.start()]);
    add_state_if_new(nfa, start, &mut states, &mut index, &mut queue);

    while let Some(id) = queue.pop_front() {
        let subset: BTreeSet<NfaStateId> = states[id].nfa_states.clone();
        let symbols: BTreeSet<char> = subset
            .iter()
            .flat_map(|&s| nfa.state(s).transitions.keys())
            .filter_map(|label| match label {
                &Label::Char(c) => Some(c),
                _ => None,
            })
            .collect();

        for c in symbols {
            let moved = nfa.move_on(&subset, &Label::Char(c));
            let target = nfa.silent_closure(moved);
            let target = add_state_if_new(nfa, target, &mut states, &mut index, &mut queue);
            states[id].transitions.insert(c, target);
        }
    }

    debug!(
        "subset construction: {} NFA states -> {} DFA states",
        nfa.state_count(),
        states.len()
    );

    Dfa::from_states(states, 0)
}

fn add_state_if_new(
    nfa: &Nfa,
    subset: BTreeSet<NfaStateId>,
    states: &mut Vec<DfaState>,
    index: &mut HashMap<BTreeSet<NfaStateId>, StateId>,
    queue: &mut VecDeque<StateId>,
) -> StateId {
    if let Some(&id) = index.get(&subset) {
        return id;
    }

    let id = states.len();
    let is_final = subset.iter().any(|&s| nfa.state(s).is_final);
    trace!("add DFA state {id}{}: {subset:?}", if is_final { " (final)" } else { "" });

    index.insert(subset.clone(), id);
    states.push(DfaState {
        id,
        nfa_states: subset,
        transitions: Default::default(),
        is_final,
    });
    queue.push_back(id);
    id
}
