//! A small regular expression compiler and automata algebra engine.
//!
//! Patterns are lexed and parsed into an AST, compiled into an NFA with named
//! captures, and optionally determinized, minimized, combined and turned back
//! into a pattern.
//!
//! | Syntax    | Meaning                                   |
//! |-----------|-------------------------------------------|
//! | `a\|b`    | alternation                               |
//! | `a…`      | zero or more                              |
//! | `a?`      | zero or one                               |
//! | `a{n}`    | exactly `n`                               |
//! | `(a)`     | grouping                                  |
//! | `(<g>a)`  | named capturing group                     |
//! | `<g>`     | back-reference to an earlier group        |
//! | `%x%`     | the literal `x`, whatever its meaning     |
//!
//! Back-references make the language non-regular. Only the NFA engine honors
//! them; determinization drops those paths.

#![warn(clippy::pedantic, rust_2018_idioms)]
#![allow(clippy::missing_errors_doc, clippy::too_many_lines)]

pub mod ast;
pub mod config;
pub mod dfa;
pub mod engine;
pub mod graph;
pub mod lexer;
pub mod nfa;
pub mod parser;
pub mod regex;

pub use self::{
    ast::AstNode,
    config::Config,
    dfa::{Dfa, DfaState, complement, intersect, minimize, nfa_to_dfa, to_regex, totalize},
    engine::{MatchResult, Matcher},
    graph::{Graph, GraphEdge, GraphState},
    lexer::{Lexer, Token},
    nfa::{Label, Nfa, NfaBuilder, NfaState},
    parser::{Parser, parse_pattern},
    regex::Regex,
};

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A `{` was never closed.
    #[error("unterminated repeat (missing '}}') at {pos}")]
    UnterminatedRepeat { pos: usize },

    /// A `{n}` held something other than digits, or a count that overflows.
    #[error("invalid repeat count '{count}' at {pos}")]
    InvalidRepeat { pos: usize, count: String },

    /// A `(<name` was never closed with `>`.
    #[error("unterminated named group (missing '>') at {pos}")]
    UnterminatedGroup { pos: usize },

    /// A `<name` was never closed with `>`.
    #[error("unterminated named reference (missing '>') at {pos}")]
    UnterminatedReference { pos: usize },

    /// A group or reference name that is not `\w+`.
    #[error("invalid group name '{name}' at {pos}")]
    InvalidGroupName { pos: usize, name: String },

    /// A token that cannot start or continue an expression here.
    #[error("unexpected {token} at {pos}")]
    UnexpectedToken { pos: usize, token: Token },

    /// A specific token was required.
    #[error("expected {expected}, got {actual} at {pos}")]
    ExpectedToken {
        pos: usize,
        expected: Token,
        actual: Token,
    },

    /// Input left over after a complete expression.
    #[error("trailing {token} at {pos}")]
    TrailingInput { pos: usize, token: Token },

    /// A back-reference to a group not compiled before it.
    #[error("undefined group reference '<{name}>'")]
    UndefinedGroup { name: String },

    /// A `{n}` above the configured ceiling.
    #[error("repeat count {count} exceeds the limit of {max}")]
    RepeatTooLarge { count: usize, max: usize },

    /// NFA simulation expanded more configurations than allowed.
    #[error("match step limit of {limit} exceeded")]
    StepLimitExceeded { limit: usize },
}

/// The stage an [`Error`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lex,
    Parse,
    Compile,
    Match,
}

impl Error {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Error::UnterminatedRepeat { .. }
            | Error::InvalidRepeat { .. }
            | Error::UnterminatedGroup { .. }
            | Error::UnterminatedReference { .. }
            | Error::InvalidGroupName { .. } => ErrorKind::Lex,
            Error::UnexpectedToken { .. }
            | Error::ExpectedToken { .. }
            | Error::TrailingInput { .. } => ErrorKind::Parse,
            Error::UndefinedGroup { .. } | Error::RepeatTooLarge { .. } => ErrorKind::Compile,
            Error::StepLimitExceeded { .. } => ErrorKind::Match,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Compiles `pattern` into an [`Nfa`].
///
/// # Errors
///
/// If the pattern cannot be tokenized, parsed or compiled, an [`Error`] is
/// returned.
pub fn compile_nfa(pattern: &str) -> Result<Nfa> {
    compile_nfa_with(pattern, &Config::default())
}

/// Compiles `pattern` into an [`Nfa`] under `config`.
///
/// # Errors
///
/// If the pattern cannot be tokenized, parsed or compiled, an [`Error`] is
/// returned.
pub fn compile_nfa_with(pattern: &str, config: &Config) -> Result<Nfa> {
    let ast = parse_pattern(pattern)?;
    NfaBuilder::new(config).build(&ast)
}

/// Compiles `pattern` into a (non-minimized) [`Dfa`].
///
/// # Errors
///
/// If the pattern cannot be tokenized, parsed or compiled, an [`Error`] is
/// returned.
pub fn compile_dfa(pattern: &str) -> Result<Dfa> {
    Ok(nfa_to_dfa(&compile_nfa(pattern)?))
}

/// Compiles `pattern` and matches it against the whole of `text`.
pub fn r#match(pattern: &str, text: &str) -> Result<Option<MatchResult>> {
    Ok(compile_nfa(pattern)?.r#match(text))
}

/// Compiles `pattern` and finds its leftmost-longest match inside `text`.
pub fn search(pattern: &str, text: &str) -> Result<Option<MatchResult>> {
    Ok(compile_nfa(pattern)?.search(text))
}
