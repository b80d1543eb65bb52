//! Read-only views of automata for external visualization tools.

use super::{dfa::Dfa, nfa::Nfa};

/// Label used for epsilon edges.
pub const EPSILON: &str = "ε";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphState {
    pub id: usize,
    pub is_final: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphEdge {
    pub source: usize,
    pub label: String,
    pub target: usize,
}

/// A flat list of states and labelled edges.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Graph {
    pub start: usize,
    pub states: Vec<GraphState>,
    pub edges: Vec<GraphEdge>,
}

impl Graph {
    /// Edges leaving `source`.
    pub fn edges_from(&self, source: usize) -> impl Iterator<Item = &GraphEdge> {
        self.edges.iter().filter(move |e| e.source == source)
    }
}

impl Nfa {
    #[must_use]
    pub fn graph(&self) -> Graph {
        let mut graph = Graph {
            start: self.start(),
            ..Graph::default()
        };
        for state in self.states() {
            graph.states.push(GraphState {
                id: state.id,
                is_final: state.is_final,
            });
            for &target in &state.epsilon {
                graph.edges.push(GraphEdge {
                    source: state.id,
                    label: EPSILON.to_string(),
                    target,
                });
            }
            for (label, targets) in &state.transitions {
                for &target in targets {
                    graph.edges.push(GraphEdge {
                        source: state.id,
                        label: label.to_string(),
                        target,
                    });
                }
            }
        }
        graph
    }
}

impl Dfa {
    #[must_use]
    pub fn graph(&self) -> Graph {
        Graph {
            start: self.start(),
            states: self
                .states()
                .iter()
                .map(|s| GraphState {
                    id: s.id,
                    is_final: s.is_final,
                })
                .collect(),
            edges: self
                .states()
                .iter()
                .flat_map(|s| {
                    s.transitions.iter().map(|(c, &target)| GraphEdge {
                        source: s.id,
                        label: c.to_string(),
                        target,
                    })
                })
                .collect(),
        }
    }
}
