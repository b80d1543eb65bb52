use super::{Label, Nfa, NfaState, StateId};
use crate::{Config, Error, Result, ast::AstNode};
use log::{debug, trace};
use std::collections::HashMap;

/// A partially built automaton with one entry and one exit state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Fragment {
    start: StateId,
    end: StateId,
}

/// Thompson-style constructor.
///
/// The state counter and the named-group table belong to one builder, so
/// independent compiles never share ids or group definitions.
pub struct NfaBuilder {
    states: Vec<NfaState>,
    groups: HashMap<String, Fragment>,
    max_repeat: usize,
}

impl Default for NfaBuilder {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl NfaBuilder {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            states: Vec::new(),
            groups: HashMap::new(),
            max_repeat: config.max_repeat,
        }
    }

    /// Compiles `ast` into an [`Nfa`], consuming the builder.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UndefinedGroup`] for a back-reference that precedes its
    /// group in compile order, and [`Error::RepeatTooLarge`] for a `{n}` above
    /// the configured ceiling.
    pub fn build(mut self, ast: &AstNode) -> Result<Nfa> {
        let Fragment { start, end } = self.fragment(ast)?;
        self.states[end].is_final = true;

        debug!(
            "built NFA with {} states ({} named groups)",
            self.states.len(),
            self.groups.len()
        );

        Ok(Nfa {
            states: self.states,
            start,
            end,
            has_backrefs: ast.has_backref(),
        })
    }

    fn new_state(&mut self) -> StateId {
        let id = self.states.len();
        self.states.push(NfaState::new(id));
        id
    }

    /// Allocates an entry and a final exit state.
    fn new_fragment(&mut self) -> Fragment {
        let start = self.new_state();
        let end = self.new_state();
        self.states[end].is_final = true;
        Fragment { start, end }
    }

    fn epsilon(&mut self, from: StateId, to: StateId) {
        self.states[from].epsilon.insert(to);
    }

    /// Links `from.end` to `to.start`, demoting `from.end` from final.
    fn link(&mut self, from: Fragment, to: StateId) {
        self.epsilon(from.end, to);
        self.states[from.end].is_final = false;
    }

    fn fragment(&mut self, node: &AstNode) -> Result<Fragment> {
        match node {
            &AstNode::Char(c) => {
                let frag = self.new_fragment();
                self.states[frag.start].add_transition(Label::Char(c), frag.end);
                Ok(frag)
            }
            AstNode::Concat(items) => self.sequence(items.iter()),
            AstNode::Alt(items) => {
                let frag = self.new_fragment();
                for item in items {
                    let branch = self.fragment(item)?;
                    self.epsilon(frag.start, branch.start);
                    self.link(branch, frag.end);
                }
                Ok(frag)
            }
            AstNode::Kleene(item) => {
                let inner = self.fragment(item)?;
                let frag = self.new_fragment();
                self.epsilon(frag.start, inner.start);
                self.epsilon(frag.start, frag.end);
                self.epsilon(inner.end, inner.start);
                self.link(inner, frag.end);
                Ok(frag)
            }
            AstNode::Optional(item) => {
                let inner = self.fragment(item)?;
                let frag = self.new_fragment();
                self.epsilon(frag.start, inner.start);
                self.epsilon(frag.start, frag.end);
                self.link(inner, frag.end);
                Ok(frag)
            }
            AstNode::Repeat { count, item } => {
                if *count > self.max_repeat {
                    return Err(Error::RepeatTooLarge {
                        count: *count,
                        max: self.max_repeat,
                    });
                }
                if *count == 0 {
                    let frag = self.new_fragment();
                    self.epsilon(frag.start, frag.end);
                    return Ok(frag);
                }
                // Each copy gets fresh states so captures stay independent.
                self.sequence(std::iter::repeat_n(item.as_ref(), *count))
            }
            AstNode::NamedGroup { name, inner } => {
                let body = self.fragment(inner)?;
                let frag = self.new_fragment();
                self.states[frag.start].add_transition(Label::GroupStart(name.clone()), body.start);
                self.states[body.end].add_transition(Label::GroupEnd(name.clone()), frag.end);
                self.states[body.end].is_final = false;

                trace!("group <{name}> spans states {}..={}", frag.start, frag.end);
                self.groups.insert(name.clone(), frag);
                Ok(frag)
            }
            AstNode::NamedRef(name) => {
                if !self.groups.contains_key(name) {
                    return Err(Error::UndefinedGroup { name: name.clone() });
                }
                let frag = self.new_fragment();
                self.states[frag.start].add_transition(Label::BackRef(name.clone()), frag.end);
                Ok(frag)
            }
        }
    }

    fn sequence<'n>(&mut self, mut items: impl Iterator<Item = &'n AstNode>) -> Result<Fragment> {
        let Some(first) = items.next() else {
            let frag = self.new_fragment();
            self.epsilon(frag.start, frag.end);
            return Ok(frag);
        };

        let first = self.fragment(first)?;
        let mut end = first;
        for item in items {
            let next = self.fragment(item)?;
            self.link(end, next.start);
            end = next;
        }

        Ok(Fragment {
            start: first.start,
            end: end.end,
        })
    }
}
