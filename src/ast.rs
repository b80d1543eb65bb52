pub mod node;

pub use self::node::AstNode;
pub use super::parser::parse_pattern;

use std::fmt;

impl AstNode {
    fn precedence(&self) -> u8 {
        match self {
            AstNode::Alt(_) => 0,
            AstNode::Concat(_) => 1,
            _ => 2,
        }
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>, min: u8) -> fmt::Result {
        if self.precedence() < min {
            write!(f, "({self})")
        } else {
            write!(f, "{self}")
        }
    }
}

/// Renders the tree back into pattern syntax, adding parentheses only where
/// precedence requires them.
impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AstNode::Char(c) => write_literal(f, *c),
            AstNode::Concat(items) => items.iter().try_for_each(|item| item.fmt_operand(f, 2)),
            AstNode::Alt(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str("|")?;
                    }
                    item.fmt_operand(f, 1)?;
                }
                Ok(())
            }
            AstNode::Kleene(item) => {
                write_suffixed(f, item)?;
                write!(f, "{}", super::lexer::KLEENE)
            }
            AstNode::Optional(item) => {
                write_suffixed(f, item)?;
                f.write_str("?")
            }
            AstNode::Repeat { count, item } => {
                write_suffixed(f, item)?;
                write!(f, "{{{count}}}")
            }
            AstNode::NamedGroup { name, inner } => write!(f, "(<{name}>{inner})"),
            AstNode::NamedRef(name) => write!(f, "<{name}>"),
        }
    }
}

// A back-reference does not accept suffixes, so it is grouped first.
fn write_suffixed(f: &mut fmt::Formatter<'_>, item: &AstNode) -> fmt::Result {
    if matches!(item, AstNode::NamedRef(_)) {
        write!(f, "({item})")
    } else {
        item.fmt_operand(f, 2)
    }
}

/// Returns `true` if `c` has a meaning of its own in pattern syntax.
#[must_use]
pub fn is_meta(c: char) -> bool {
    matches!(c, '|' | '?' | '{' | '}' | '(' | ')' | '<' | '>' | '%') || c == super::lexer::KLEENE
}

/// Writes `c` so that it lexes back as a single literal character.
pub(crate) fn write_literal(f: &mut impl fmt::Write, c: char) -> fmt::Result {
    if is_meta(c) {
        write!(f, "%{c}%")
    } else {
        f.write_char(c)
    }
}
