use crate::{Error, Result, nfa::StateId};
use std::{collections::BTreeMap, ops::Range};

/// One in-flight configuration of the NFA simulation.
///
/// Captures are kept as byte ranges into the subject, so two configurations
/// compare equal only if they captured at the same offsets. `open` holds a
/// stack of start offsets per name, since a group may nest inside another
/// group of the same name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Configuration {
    pub state: StateId,
    pub pos: usize,
    pub captures: BTreeMap<String, Range<usize>>,
    pub open: BTreeMap<String, Vec<usize>>,
}

impl Configuration {
    pub fn new(state: StateId, pos: usize) -> Self {
        Self {
            state,
            pos,
            captures: BTreeMap::new(),
            open: BTreeMap::new(),
        }
    }

    pub fn open_group(&mut self, name: &str, pos: usize) {
        self.open.entry(name.to_string()).or_default().push(pos);
    }

    /// Closes the innermost open group called `name` at `pos`, recording its
    /// capture. Unbalanced ends are ignored.
    pub fn close_group(&mut self, name: &str, pos: usize) {
        let Some(starts) = self.open.get_mut(name) else {
            return;
        };
        let from = starts.pop();
        if starts.is_empty() {
            self.open.remove(name);
        }
        if let Some(from) = from {
            self.captures.insert(name.to_string(), from..pos);
        }
    }

    #[inline]
    pub fn goto(&self, state: StateId, pos: usize) -> Self {
        Self {
            state,
            pos,
            ..self.clone()
        }
    }
}

/// Caps the number of configurations a simulation may expand.
#[derive(Clone, Copy, Debug)]
pub struct Budget {
    limit: Option<usize>,
    used: usize,
}

impl Budget {
    pub const fn unlimited() -> Self {
        Self {
            limit: None,
            used: 0,
        }
    }

    pub const fn limited(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            used: 0,
        }
    }

    #[inline]
    pub fn step(&mut self) -> Result<()> {
        self.used += 1;
        match self.limit {
            Some(limit) if self.used > limit => Err(Error::StepLimitExceeded { limit }),
            _ => Ok(()),
        }
    }

    pub const fn used(&self) -> usize {
        self.used
    }
}
