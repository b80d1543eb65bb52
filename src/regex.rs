use super::{
    Config, Result,
    dfa::{Dfa, minimize, nfa_to_dfa},
    engine::{MatchResult, state::Budget},
    nfa::{Nfa, NfaBuilder},
    parser::parse_pattern,
};
use log::debug;
use std::{cell::OnceCell, fmt, str::FromStr};

/// A compiled pattern.
///
/// The NFA is built eagerly. The DFA and the minimized DFA are derived from it
/// on first use and cached.
#[derive(Debug)]
pub struct Regex {
    pattern: String,
    config: Config,
    nfa: Nfa,
    dfa: OnceCell<Dfa>,
    min_dfa: OnceCell<Dfa>,
}

impl Regex {
    /// Compiles `pattern` with the default [`Config`].
    ///
    /// # Errors
    ///
    /// If the pattern cannot be tokenized, parsed or compiled, an
    /// [`crate::Error`] is returned.
    pub fn new(pattern: &str) -> Result<Self> {
        Self::with_config(pattern, Config::default())
    }

    /// Compiles `pattern` with the given `config`.
    ///
    /// # Errors
    ///
    /// If the pattern cannot be tokenized, parsed or compiled, an
    /// [`crate::Error`] is returned.
    pub fn with_config(pattern: &str, config: Config) -> Result<Self> {
        let ast = parse_pattern(pattern)?;
        let nfa = NfaBuilder::new(&config).build(&ast)?;
        debug!("compiled {pattern:?}");

        Ok(Self {
            pattern: pattern.to_string(),
            config,
            nfa,
            dfa: OnceCell::new(),
            min_dfa: OnceCell::new(),
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn nfa(&self) -> &Nfa {
        &self.nfa
    }

    pub fn dfa(&self) -> &Dfa {
        self.dfa.get_or_init(|| nfa_to_dfa(&self.nfa))
    }

    pub fn min_dfa(&self) -> &Dfa {
        self.min_dfa.get_or_init(|| minimize(self.dfa()))
    }

    fn budget(&self) -> Budget {
        self.config
            .step_limit
            .map_or_else(Budget::unlimited, Budget::limited)
    }

    /// Matches the whole of `text` with captures.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::StepLimitExceeded`] if the configured step
    /// budget runs out.
    pub fn r#match(&self, text: &str) -> Result<Option<MatchResult>> {
        self.nfa.full(text, &mut self.budget())
    }

    /// Finds the leftmost-longest match inside `text` with captures.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::StepLimitExceeded`] if the configured step
    /// budget runs out.
    pub fn search(&self, text: &str) -> Result<Option<MatchResult>> {
        self.nfa.find(text, &mut self.budget())
    }

    /// Returns `true` if the whole of `text` matches.
    ///
    /// Uses the minimized DFA unless the pattern has back-references, which
    /// only the NFA can check.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::StepLimitExceeded`] if the NFA is used and the
    /// configured step budget runs out.
    pub fn is_match(&self, text: &str) -> Result<bool> {
        if self.nfa.has_backrefs() {
            Ok(self.r#match(text)?.is_some())
        } else {
            Ok(self.min_dfa().accepts(text))
        }
    }

    /// Recovers an equivalent pattern from the minimized DFA.
    #[must_use]
    pub fn to_regex(&self) -> Option<String> {
        self.min_dfa().to_regex()
    }

    /// The complement of this pattern's language over `alphabet`.
    #[must_use]
    pub fn complement(&self, alphabet: impl IntoIterator<Item = char>) -> Dfa {
        self.dfa().complement(alphabet)
    }

    /// The intersection of this pattern's language with `other`'s.
    #[must_use]
    pub fn intersect(&self, other: &Regex) -> Dfa {
        self.dfa().intersect(other.dfa())
    }
}

impl FromStr for Regex {
    type Err = crate::Error;

    fn from_str(pattern: &str) -> Result<Self> {
        Self::new(pattern)
    }
}

impl fmt::Display for Regex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}
