use std::fmt;

/// A pattern string token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A literal character, either plain or escaped with `%x%`.
    Char(char),
    /// `|`
    Or,
    /// `…`. Zero or more repetitions.
    Kleene,
    /// `?`
    Optional,
    /// `{n}`
    Repeat(usize),
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `(<name>`. Opens a named capturing group.
    NamedGroupStart(String),
    /// `<name>`. Back-reference to a previously defined group.
    NamedRef(String),
    /// End of the pattern.
    Eof,
}

impl Token {
    /// Returns `true` if the token can begin an atom.
    #[must_use]
    pub const fn starts_atom(&self) -> bool {
        matches!(
            self,
            Token::Char(_) | Token::LParen | Token::NamedGroupStart(_) | Token::NamedRef(_)
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Char(c) => write!(f, "'{c}'"),
            Token::Or => f.write_str("'|'"),
            Token::Kleene => write!(f, "'{}'", super::KLEENE),
            Token::Optional => f.write_str("'?'"),
            Token::Repeat(n) => write!(f, "'{{{n}}}'"),
            Token::LParen => f.write_str("'('"),
            Token::RParen => f.write_str("')'"),
            Token::NamedGroupStart(name) => write!(f, "'(<{name}>'"),
            Token::NamedRef(name) => write!(f, "'<{name}>'"),
            Token::Eof => f.write_str("end of pattern"),
        }
    }
}

/// A [`Token`] with associated position information.
#[derive(Clone, Debug, Eq)]
pub struct PosToken {
    /// The start position of the token in the pattern string, in characters.
    pub pos: usize,
    /// The token.
    pub token: Token,
}

impl core::ops::Deref for PosToken {
    type Target = Token;

    fn deref(&self) -> &Self::Target {
        &self.token
    }
}

impl PartialEq for PosToken {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.token == other.token
    }
}
