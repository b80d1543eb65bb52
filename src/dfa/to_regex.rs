use super::Dfa;
use crate::{ast::write_literal, lexer::KLEENE};
use log::debug;
use std::fmt::{self, Write};

/// A path expression used during state elimination.
///
/// The constructors simplify as they go: `∅` absorbs alternation and
/// annihilates concatenation, `ε` is the identity of concatenation, and
/// duplicate alternatives collapse.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Expr {
    Empty,
    Epsilon,
    Char(char),
    Concat(Vec<Expr>),
    Alt(Vec<Expr>),
    Star(Box<Expr>),
}

impl Expr {
    fn nullable(&self) -> bool {
        match self {
            Expr::Empty | Expr::Char(_) => false,
            Expr::Epsilon | Expr::Star(_) => true,
            Expr::Concat(items) => items.iter().all(Expr::nullable),
            Expr::Alt(items) => items.iter().any(Expr::nullable),
        }
    }

    fn alt(self, other: Expr) -> Expr {
        match (self, other) {
            (Expr::Empty, e) | (e, Expr::Empty) => e,
            (a, b) => {
                let mut items: Vec<Expr> = Vec::new();
                for item in [a, b].into_iter().flat_map(Expr::into_alternatives) {
                    if !items.contains(&item) {
                        items.push(item);
                    }
                }
                // ε adds nothing next to another nullable alternative.
                if items.iter().any(|e| *e != Expr::Epsilon && e.nullable()) {
                    items.retain(|e| *e != Expr::Epsilon);
                }
                if items.len() == 1 {
                    items.swap_remove(0)
                } else {
                    Expr::Alt(items)
                }
            }
        }
    }

    fn concat(self, other: Expr) -> Expr {
        match (self, other) {
            (Expr::Empty, _) | (_, Expr::Empty) => Expr::Empty,
            (Expr::Epsilon, e) | (e, Expr::Epsilon) => e,
            (a, b) => {
                let mut items = a.into_sequence();
                items.extend(b.into_sequence());
                Expr::Concat(items)
            }
        }
    }

    fn star(self) -> Expr {
        match self {
            Expr::Empty | Expr::Epsilon => Expr::Epsilon,
            Expr::Star(_) => self,
            Expr::Alt(items) if items.contains(&Expr::Epsilon) => items
                .into_iter()
                .filter(|e| *e != Expr::Epsilon)
                .fold(Expr::Empty, Expr::alt)
                .star(),
            e => Expr::Star(Box::new(e)),
        }
    }

    fn into_alternatives(self) -> Vec<Expr> {
        match self {
            Expr::Alt(items) => items,
            e => vec![e],
        }
    }

    fn into_sequence(self) -> Vec<Expr> {
        match self {
            Expr::Concat(items) => items,
            e => vec![e],
        }
    }

    /// 0 for a bare alternation, 1 for a sequence, 2 for anything that takes
    /// a suffix without parentheses.
    fn precedence(&self) -> u8 {
        match self {
            Expr::Alt(items) if !items.contains(&Expr::Epsilon) => 0,
            Expr::Concat(_) => 1,
            _ => 2,
        }
    }

    fn fmt_operand(&self, f: &mut impl Write, min: u8) -> fmt::Result {
        if self.precedence() < min {
            f.write_char('(')?;
            self.fmt_into(f)?;
            f.write_char(')')
        } else {
            self.fmt_into(f)
        }
    }

    fn fmt_into(&self, f: &mut impl Write) -> fmt::Result {
        match self {
            // `Empty` never reaches rendering; `ε` only does at the top level.
            Expr::Empty => Ok(()),
            Expr::Epsilon => f.write_str("ε{0}"),
            Expr::Char(c) => write_literal(f, *c),
            Expr::Concat(items) => items.iter().try_for_each(|e| e.fmt_operand(f, 1)),
            Expr::Alt(items) if items.contains(&Expr::Epsilon) => {
                let rest = items
                    .iter()
                    .filter(|e| **e != Expr::Epsilon)
                    .cloned()
                    .fold(Expr::Empty, Expr::alt);
                rest.fmt_operand(f, 2)?;
                f.write_char('?')
            }
            Expr::Alt(items) => {
                for (i, e) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_char('|')?;
                    }
                    e.fmt_operand(f, 1)?;
                }
                Ok(())
            }
            Expr::Star(e) => {
                e.fmt_operand(f, 2)?;
                f.write_char(KLEENE)
            }
        }
    }
}

/// Recovers a pattern for the language of `dfa` by state elimination.
///
/// `R[k][i][j]` describes the paths from `i` to `j` whose intermediate states
/// all have index below `k`; the answer is the union of `R[n][start][f]` over
/// the final states `f`. Returns `None` when the language is empty, since the
/// pattern syntax cannot express it. The language `{ε}` comes out as `ε{0}`.
///
/// The size of the result can grow exponentially with the number of states,
/// and so do time and memory. Minimize first; automata with a few dozen
/// states that count positions (such as `(a|b)…a(a|b){5}`) are already out of
/// reach.
#[must_use]
pub fn to_regex(dfa: &Dfa) -> Option<String> {
    let n = dfa.state_count();

    let mut r = vec![vec![Expr::Empty; n]; n];
    for state in dfa.states() {
        for (&c, &target) in &state.transitions {
            let cell = std::mem::replace(&mut r[state.id][target], Expr::Empty);
            r[state.id][target] = cell.alt(Expr::Char(c));
        }
        // The empty path always leads from a state to itself.
        let cell = std::mem::replace(&mut r[state.id][state.id], Expr::Empty);
        r[state.id][state.id] = cell.alt(Expr::Epsilon);
    }

    for k in 0..n {
        // Row and column `k` are read as they were before this round, so
        // every other cell can be updated in place.
        let loop_k = r[k][k].clone().star();
        let out_of_k = r[k].clone();
        let into_k: Vec<Expr> = r.iter().map(|row| row[k].clone()).collect();

        for (i, into) in into_k.iter().enumerate() {
            if *into == Expr::Empty {
                continue;
            }
            let prefix = into.clone().concat(loop_k.clone());
            for (j, out) in out_of_k.iter().enumerate() {
                if *out == Expr::Empty {
                    continue;
                }
                let through = prefix.clone().concat(out.clone());
                let cell = std::mem::replace(&mut r[i][j], Expr::Empty);
                r[i][j] = cell.alt(through);
            }
        }
    }

    let language = dfa
        .finals()
        .map(|f| r[dfa.start()][f].clone())
        .fold(Expr::Empty, Expr::alt);
    if language == Expr::Empty {
        return None;
    }

    let mut pattern = String::new();
    language.fmt_into(&mut pattern).ok()?;
    debug!("recovered pattern of {} chars from {} states", pattern.chars().count(), n);
    Some(pattern)
}

impl Dfa {
    /// See [`to_regex`].
    #[must_use]
    pub fn to_regex(&self) -> Option<String> {
        to_regex(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simplification() {
        let a = Expr::Char('a');
        assert_eq!(Expr::Empty.alt(a.clone()), a);
        assert_eq!(Expr::Empty.concat(a.clone()), Expr::Empty);
        assert_eq!(Expr::Epsilon.concat(a.clone()), a);
        assert_eq!(a.clone().alt(a.clone()), a);
        assert_eq!(Expr::Epsilon.alt(a.clone().star()), a.clone().star());
        assert_eq!(Expr::Epsilon.alt(a.clone()).star(), a.clone().star());
        assert_eq!(Expr::Empty.star(), Expr::Epsilon);
    }

    fn render(e: &Expr) -> String {
        let mut out = String::new();
        e.fmt_into(&mut out).unwrap();
        out
    }

    #[test]
    fn test_rendering_parenthesizes() {
        let a = Expr::Char('a');
        let b = Expr::Char('b');
        let ab = a.clone().alt(b.clone());
        assert_eq!(render(&ab.clone().star()), "(a|b)…");
        assert_eq!(render(&a.clone().concat(ab.clone())), "a(a|b)");
        assert_eq!(render(&Expr::Epsilon.alt(ab)), "(a|b)?");
        assert_eq!(render(&a.clone().concat(b).star()), "(ab)…");
        assert_eq!(render(&Expr::Char('|')), "%|%");
        assert_eq!(render(&Expr::Epsilon), "ε{0}");
    }
}
