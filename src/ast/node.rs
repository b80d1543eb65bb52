/// A node of the pattern syntax tree.
///
/// The tree is immutable once the parser has produced it.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum AstNode {
    Char(char),
    Concat(Vec<AstNode>),
    Alt(Vec<AstNode>),
    Kleene(Box<AstNode>),   // x…
    Optional(Box<AstNode>), // x?
    Repeat {
        count: usize, // x{n}
        item: Box<AstNode>,
    },

    // Named captures
    NamedGroup {
        name: String,
        inner: Box<AstNode>,
    },
    NamedRef(String), // <name>
}

impl AstNode {
    /// Returns `true` if the subtree contains a back-reference.
    #[must_use]
    pub fn has_backref(&self) -> bool {
        match self {
            AstNode::Char(_) => false,
            AstNode::NamedRef(_) => true,
            AstNode::Concat(items) | AstNode::Alt(items) => items.iter().any(AstNode::has_backref),
            AstNode::Kleene(item)
            | AstNode::Optional(item)
            | AstNode::Repeat { item, .. }
            | AstNode::NamedGroup { inner: item, .. } => item.has_backref(),
        }
    }
}
