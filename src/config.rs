//! Compile and match settings.

/// Default ceiling for `{n}` repeat counts.
pub const DEFAULT_MAX_REPEAT: usize = 1000;

/// Settings shared by compilation and NFA simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    pub(crate) max_repeat: usize,
    pub(crate) step_limit: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_repeat: DEFAULT_MAX_REPEAT,
            step_limit: None,
        }
    }

    /// Sets the largest `n` accepted in `{n}`. Each repetition is compiled as
    /// a fresh copy, so this bounds the size of the automaton.
    #[must_use]
    pub const fn max_repeat(mut self, max_repeat: usize) -> Self {
        self.max_repeat = max_repeat;
        self
    }

    /// Sets how many configurations one NFA match or search may expand.
    /// `None` means unbounded.
    #[must_use]
    pub const fn step_limit(mut self, step_limit: Option<usize>) -> Self {
        self.step_limit = step_limit;
        self
    }

    #[must_use]
    pub const fn get_max_repeat(&self) -> usize {
        self.max_repeat
    }

    #[must_use]
    pub const fn get_step_limit(&self) -> Option<usize> {
        self.step_limit
    }
}
