//! NFA simulation with named captures and back-references.

use super::{
    Result,
    nfa::{Label, Nfa},
};
use log::trace;
use std::{
    collections::{BTreeMap, HashSet, VecDeque},
    ops::Range,
};

pub mod state;

use self::state::{Budget, Configuration};

/// A successful match.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchResult {
    /// Byte offset where the match starts.
    pub start: usize,
    /// Byte offset one past the end of the match.
    pub end: usize,
    /// The matched substring.
    pub text: String,
    /// Captured substrings by group name. A group entered more than once keeps
    /// its last capture.
    pub groups: BTreeMap<String, String>,
}

impl MatchResult {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    #[must_use]
    pub fn group(&self, name: &str) -> Option<&str> {
        self.groups.get(name).map(String::as_str)
    }

    pub(crate) fn new(text: &str, range: Range<usize>, captures: &BTreeMap<String, Range<usize>>) -> Self {
        Self {
            start: range.start,
            end: range.end,
            text: text[range].to_string(),
            groups: captures
                .iter()
                .map(|(name, range)| (name.clone(), text[range.clone()].to_string()))
                .collect(),
        }
    }
}

/// Common matching interface of [`Nfa`] and [`crate::Dfa`].
pub trait Matcher {
    /// Matches the whole of `text`.
    fn r#match(&self, text: &str) -> Option<MatchResult>;

    /// Finds the leftmost, then longest, match inside `text`.
    fn search(&self, text: &str) -> Option<MatchResult>;

    /// Returns `true` if the whole of `text` matches.
    fn is_match(&self, text: &str) -> bool {
        self.r#match(text).is_some()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    /// Accept only at the end of the subject.
    Full,
    /// Accept anywhere, preferring the furthest end.
    Longest,
}

/// Iterates the byte offsets of every character boundary, end included.
pub(crate) fn boundaries(text: &str) -> impl Iterator<Item = usize> + '_ {
    text.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
}

impl Nfa {
    /// Matches the whole of `text`, giving up after `limit` expanded
    /// configurations.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::StepLimitExceeded`] if the budget runs out.
    pub fn try_match(&self, text: &str, limit: usize) -> Result<Option<MatchResult>> {
        self.full(text, &mut Budget::limited(limit))
    }

    /// Searches `text`, giving up after `limit` expanded configurations in
    /// total across all start offsets.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::StepLimitExceeded`] if the budget runs out.
    pub fn try_search(&self, text: &str, limit: usize) -> Result<Option<MatchResult>> {
        self.find(text, &mut Budget::limited(limit))
    }

    pub(crate) fn full(&self, text: &str, budget: &mut Budget) -> Result<Option<MatchResult>> {
        Ok(self
            .simulate(text, 0, Mode::Full, budget)?
            .map(|(end, captures)| MatchResult::new(text, 0..end, &captures)))
    }

    pub(crate) fn find(&self, text: &str, budget: &mut Budget) -> Result<Option<MatchResult>> {
        for start in boundaries(text) {
            if let Some((end, captures)) = self.simulate(text, start, Mode::Longest, budget)? {
                return Ok(Some(MatchResult::new(text, start..end, &captures)));
            }
        }
        Ok(None)
    }

    /// Breadth-first simulation from `start`. Returns the accepting end offset
    /// and the captures of the configuration that reached it first.
    fn simulate(
        &self,
        text: &str,
        start: usize,
        mode: Mode,
        budget: &mut Budget,
    ) -> Result<Option<(usize, BTreeMap<String, Range<usize>>)>> {
        let mut queue = VecDeque::new();
        let mut seen = HashSet::new();
        let mut best: Option<(usize, BTreeMap<String, Range<usize>>)> = None;

        let initial = Configuration::new(self.start, start);
        seen.insert(initial.clone());
        queue.push_back(initial);

        let mut push = |queue: &mut VecDeque<Configuration>, next: Configuration| {
            if seen.insert(next.clone()) {
                queue.push_back(next);
            }
        };

        while let Some(config) = queue.pop_front() {
            budget.step()?;
            let state = self.state(config.state);

            if state.is_final {
                match mode {
                    Mode::Full if config.pos == text.len() => {
                        return Ok(Some((config.pos, config.captures)));
                    }
                    Mode::Longest if best.as_ref().is_none_or(|(end, _)| config.pos > *end) => {
                        best = Some((config.pos, config.captures.clone()));
                    }
                    _ => {}
                }
            }

            for &next in &state.epsilon {
                push(&mut queue, config.goto(next, config.pos));
            }

            let rest = &text[config.pos..];
            for (label, targets) in &state.transitions {
                for &target in targets {
                    let next = match label {
                        Label::Char(c) => {
                            if !rest.starts_with(*c) {
                                break;
                            }
                            config.goto(target, config.pos + c.len_utf8())
                        }
                        Label::GroupStart(name) => {
                            let mut next = config.goto(target, config.pos);
                            next.open_group(name, config.pos);
                            next
                        }
                        Label::GroupEnd(name) => {
                            let mut next = config.goto(target, config.pos);
                            next.close_group(name, config.pos);
                            next
                        }
                        Label::BackRef(name) => {
                            let Some(range) = config.captures.get(name) else {
                                break;
                            };
                            let captured = &text[range.clone()];
                            if !rest.starts_with(captured) {
                                break;
                            }
                            config.goto(target, config.pos + captured.len())
                        }
                    };
                    push(&mut queue, next);
                }
            }
        }

        trace!(
            "simulation from {start} ({mode:?}) expanded {} configurations",
            budget.used()
        );
        Ok(best)
    }
}

impl Matcher for Nfa {
    fn r#match(&self, text: &str) -> Option<MatchResult> {
        self.full(text, &mut Budget::unlimited()).ok().flatten()
    }

    fn search(&self, text: &str) -> Option<MatchResult> {
        self.find(text, &mut Budget::unlimited()).ok().flatten()
    }
}
