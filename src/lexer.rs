use super::{Error, Result};

pub mod token;

pub use token::{PosToken, Token};

/// The glyph used for zero-or-more repetition.
pub const KLEENE: char = '…';

/// The escape delimiter. `%x%` is always the literal `x`.
pub const ESCAPE: char = '%';

/// Returns `true` if `name` is a valid group name (`\w+`).
#[must_use]
pub fn is_group_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_')
}

/// A lazy tokenizer over a pattern string.
///
/// Tokens are pulled one at a time, so the token list is never materialized.
/// The final token is always [`Token::Eof`]; after it the lexer is exhausted.
pub struct Lexer<'a> {
    input: &'a str,
    /// Byte offset into `input`.
    offset: usize,
    /// Character offset into `input`, used for error positions.
    pos: usize,
    done: bool,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            offset: 0,
            pos: 0,
            done: false,
        }
    }

    /// Returns the current character position.
    #[must_use]
    pub fn tell(&self) -> usize {
        self.pos
    }

    fn rest(&self) -> &'a str {
        &self.input[self.offset..]
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.rest().chars().next()?;
        self.offset += c.len_utf8();
        self.pos += 1;
        Some(c)
    }

    /// Consumes everything up to and including `delim`, returning the text
    /// between the current position and the delimiter.
    fn take_until(&mut self, delim: char) -> Option<&'a str> {
        let rest = self.rest();
        let end = rest.find(delim)?;
        let body = &rest[..end];
        self.offset += end + delim.len_utf8();
        self.pos += body.chars().count() + 1;
        Some(body)
    }

    /// Returns the next token, or `None` once [`Token::Eof`] has been produced.
    ///
    /// # Errors
    ///
    /// If the pattern contains an unterminated or malformed token, an
    /// [`Error`] is returned.
    pub fn next_token(&mut self) -> Result<Option<PosToken>> {
        if self.done {
            return Ok(None);
        }

        let pos = self.pos;
        let Some(c) = self.advance() else {
            self.done = true;
            return Ok(Some(PosToken {
                pos,
                token: Token::Eof,
            }));
        };

        if c == ESCAPE
            && let (Some(escaped), Some(ESCAPE)) = (self.peek_nth(0), self.peek_nth(1))
        {
            self.advance();
            self.advance();
            return Ok(Some(PosToken {
                pos,
                token: Token::Char(escaped),
            }));
        }

        let token = match c {
            '|' => Token::Or,
            KLEENE => Token::Kleene,
            '?' => Token::Optional,
            '{' => {
                let Some(body) = self.take_until('}') else {
                    return Err(Error::UnterminatedRepeat { pos });
                };
                if body.is_empty() || !body.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(Error::InvalidRepeat {
                        pos,
                        count: body.to_string(),
                    });
                }
                let count = body.parse().map_err(|_| Error::InvalidRepeat {
                    pos,
                    count: body.to_string(),
                })?;
                Token::Repeat(count)
            }
            '(' if self.peek_nth(0) == Some('<') => {
                self.advance();
                let Some(name) = self.take_until('>') else {
                    return Err(Error::UnterminatedGroup { pos });
                };
                if !is_group_name(name) {
                    return Err(Error::InvalidGroupName {
                        pos,
                        name: name.to_string(),
                    });
                }
                Token::NamedGroupStart(name.to_string())
            }
            '<' => {
                let Some(name) = self.take_until('>') else {
                    return Err(Error::UnterminatedReference { pos });
                };
                if !is_group_name(name) {
                    return Err(Error::InvalidGroupName {
                        pos,
                        name: name.to_string(),
                    });
                }
                Token::NamedRef(name.to_string())
            }
            '(' => Token::LParen,
            ')' => Token::RParen,
            c => Token::Char(c),
        };

        Ok(Some(PosToken { pos, token }))
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<PosToken>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Ok(Some(token)) => Some(Ok(token)),
            Ok(None) => None,
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_are_in_characters() {
        let tokens: Vec<_> = Lexer::new("a…%|%b")
            .map(|t| t.map(|t| t.pos))
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(tokens, vec![0, 1, 2, 5, 6]);
    }

    #[test]
    fn test_exhausted_after_eof() {
        let mut lexer = Lexer::new("");
        assert_eq!(lexer.next_token().unwrap().map(|t| t.token), Some(Token::Eof));
        assert_eq!(lexer.next_token().unwrap(), None);
    }

    #[test]
    fn test_stops_after_error() {
        let mut lexer = Lexer::new("{a}b");
        assert!(lexer.next().unwrap().is_err());
        assert!(lexer.next().is_none());
    }
}
