use super::{
    Error, Result,
    ast::AstNode,
    lexer::{Lexer, PosToken, Token},
};

/// Parses a pattern string into an AST.
///
/// # Errors
///
/// If the pattern string cannot be tokenized or parsed, an [`Error`] is
/// returned.
pub fn parse_pattern(pattern: &str) -> Result<AstNode> {
    Parser::new(pattern)?.parse()
}

/// Converts a pattern string into an AST by recursive descent.
///
/// Precedence, from tightest to loosest: suffix operators, concatenation,
/// alternation.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: PosToken,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given `pattern`.
    ///
    /// # Errors
    ///
    /// If the first token of the input is malformed, an [`Error`] is returned.
    pub fn new(pattern: &'a str) -> Result<Self> {
        let mut lexer = Lexer::new(pattern);
        let current = Self::pull(&mut lexer)?;
        Ok(Parser { lexer, current })
    }

    fn pull(lexer: &mut Lexer<'a>) -> Result<PosToken> {
        Ok(lexer.next_token()?.unwrap_or(PosToken {
            pos: lexer.tell(),
            token: Token::Eof,
        }))
    }

    fn advance(&mut self) -> Result<PosToken> {
        let next = Self::pull(&mut self.lexer)?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn consume(&mut self, token: &Token) -> Result<bool> {
        if self.current.token == *token {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn expect(&mut self, token: Token) -> Result<()> {
        if self.current.token == token {
            self.advance()?;
            Ok(())
        } else {
            Err(Error::ExpectedToken {
                pos: self.current.pos,
                expected: token,
                actual: self.current.token.clone(),
            })
        }
    }

    /// Converts the pattern into an [`AstNode`], consuming the parser.
    ///
    /// # Errors
    ///
    /// If the pattern string is invalid, an [`Error`] is returned.
    pub fn parse(mut self) -> Result<AstNode> {
        let ast = self.parse_expression()?;

        if *self.current != Token::Eof {
            let PosToken { pos, token } = self.current;
            return Err(Error::TrailingInput { pos, token });
        }

        Ok(ast)
    }

    fn parse_expression(&mut self) -> Result<AstNode> {
        let mut terms = vec![self.parse_concat()?];
        while self.consume(&Token::Or)? {
            terms.push(self.parse_concat()?);
        }

        Ok(if terms.len() == 1 {
            terms.swap_remove(0)
        } else {
            AstNode::Alt(terms)
        })
    }

    fn parse_concat(&mut self) -> Result<AstNode> {
        let mut items = Vec::new();

        while self.current.starts_atom() {
            let atom = self.parse_atom()?;
            items.push(if matches!(atom, AstNode::NamedRef(_)) {
                atom
            } else {
                self.parse_suffix(atom)?
            });
        }

        match items.len() {
            0 => Err(Error::UnexpectedToken {
                pos: self.current.pos,
                token: self.current.token.clone(),
            }),
            1 => Ok(items.swap_remove(0)),
            _ => Ok(AstNode::Concat(items)),
        }
    }

    fn parse_suffix(&mut self, mut item: AstNode) -> Result<AstNode> {
        loop {
            item = match *self.current {
                Token::Kleene => AstNode::Kleene(Box::new(item)),
                Token::Optional => AstNode::Optional(Box::new(item)),
                Token::Repeat(count) => AstNode::Repeat {
                    count,
                    item: Box::new(item),
                },
                _ => return Ok(item),
            };
            self.advance()?;
        }
    }

    fn parse_atom(&mut self) -> Result<AstNode> {
        let PosToken { pos, token } = self.advance()?;

        match token {
            Token::Char(c) => Ok(AstNode::Char(c)),
            Token::LParen => {
                let inner = self.parse_expression()?;
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            Token::NamedGroupStart(name) => {
                let inner = self.parse_expression()?;
                self.expect(Token::RParen)?;
                Ok(AstNode::NamedGroup {
                    name,
                    inner: Box::new(inner),
                })
            }
            Token::NamedRef(name) => Ok(AstNode::NamedRef(name)),
            token => Err(Error::UnexpectedToken { pos, token }),
        }
    }
}
