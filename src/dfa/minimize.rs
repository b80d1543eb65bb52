use super::{Dfa, DfaState, StateId};
use log::{debug, trace};
use std::collections::{BTreeSet, HashMap};

/// A group of mutually indistinguishable states.
type Group = Vec<StateId>;

/// For each alphabet symbol, the group the transition leads into, if any.
type Signature = Vec<Option<usize>>;

/// Minimizes `dfa` by partition refinement.
///
/// Starts from the final/non-final split and keeps splitting groups whose
/// members disagree on which group a symbol leads to, until a full pass
/// splits nothing. A missing transition counts as its own target, so partial
/// automata stay partial.
#[must_use]
pub fn minimize(dfa: &Dfa) -> Dfa {
    let alphabet: Vec<char> = dfa.alphabet().into_iter().collect();

    let (finals, non_finals): (Group, Group) =
        (0..dfa.state_count()).partition(|&id| dfa.state(id).is_final);
    let mut partition: Vec<Group> = [finals, non_finals]
        .into_iter()
        .filter(|group| !group.is_empty())
        .collect();
    let mut group_of = group_index(&partition, dfa.state_count());

    loop {
        let mut refined = Vec::with_capacity(partition.len());
        for group in &partition {
            let splits = split_group(dfa, group, &group_of, &alphabet);
            if splits.len() > 1 {
                trace!("split {group:?} into {splits:?}");
            }
            refined.extend(splits);
        }

        let changed = refined.len() != partition.len();
        partition = refined;
        group_of = group_index(&partition, dfa.state_count());
        if !changed {
            break;
        }
    }

    // Ids follow the smallest member, which keeps the numbering stable.
    partition.sort_by_key(|group| group[0]);
    group_of = group_index(&partition, dfa.state_count());

    let states = partition
        .iter()
        .enumerate()
        .map(|(id, group)| {
            let representative = dfa.state(group[0]);
            DfaState {
                id,
                nfa_states: group
                    .iter()
                    .flat_map(|&s| dfa.state(s).nfa_states.iter().copied())
                    .collect::<BTreeSet<_>>(),
                transitions: representative
                    .transitions
                    .iter()
                    .map(|(&c, &target)| (c, group_of[target]))
                    .collect(),
                is_final: representative.is_final,
            }
        })
        .collect::<Vec<_>>();

    debug!(
        "minimized DFA from {} to {} states",
        dfa.state_count(),
        states.len()
    );

    Dfa::from_states(states, group_of[dfa.start()])
}

fn group_index(partition: &[Group], state_count: usize) -> Vec<usize> {
    let mut group_of = vec![0; state_count];
    for (index, group) in partition.iter().enumerate() {
        for &state in group {
            group_of[state] = index;
        }
    }
    group_of
}

fn split_group(dfa: &Dfa, group: &Group, group_of: &[usize], alphabet: &[char]) -> Vec<Group> {
    if group.len() == 1 {
        return vec![group.clone()];
    }

    let mut splits: Vec<Group> = Vec::new();
    let mut by_signature: HashMap<Signature, usize> = HashMap::new();
    for &state in group {
        let transitions = &dfa.state(state).transitions;
        let signature: Signature = alphabet
            .iter()
            .map(|c| transitions.get(c).map(|&target| group_of[target]))
            .collect();
        let index = *by_signature.entry(signature).or_insert_with(|| {
            splits.push(Vec::new());
            splits.len() - 1
        });
        splits[index].push(state);
    }
    splits
}
