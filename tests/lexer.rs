use kleene::{
    Error, Result,
    lexer::{Lexer, token::Token},
};

fn lex_all(input: &str) -> Result<Vec<Token>> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token()? {
        tokens.push(token.token);
    }
    Ok(tokens)
}

#[test]
fn test_basic_tokens_lexer() -> Result<()> {
    assert_eq!(
        lex_all("abc")?,
        vec![
            Token::Char('a'),
            Token::Char('b'),
            Token::Char('c'),
            Token::Eof
        ]
    );
    assert_eq!(
        lex_all("a|b")?,
        vec![Token::Char('a'), Token::Or, Token::Char('b'), Token::Eof]
    );
    assert_eq!(
        lex_all("()…?")?,
        vec![
            Token::LParen,
            Token::RParen,
            Token::Kleene,
            Token::Optional,
            Token::Eof
        ]
    );
    assert_eq!(lex_all("")?, vec![Token::Eof]);
    Ok(())
}

#[test]
fn test_repeat_tokens_lexer() -> Result<()> {
    assert_eq!(
        lex_all("a{3}")?,
        vec![Token::Char('a'), Token::Repeat(3), Token::Eof]
    );
    assert_eq!(
        lex_all("a{0}b{12}")?,
        vec![
            Token::Char('a'),
            Token::Repeat(0),
            Token::Char('b'),
            Token::Repeat(12),
            Token::Eof
        ]
    );
    Ok(())
}

#[test]
fn test_named_tokens_lexer() -> Result<()> {
    assert_eq!(
        lex_all("(<g>a)<g>")?,
        vec![
            Token::NamedGroupStart("g".to_string()),
            Token::Char('a'),
            Token::RParen,
            Token::NamedRef("g".to_string()),
            Token::Eof
        ]
    );
    assert_eq!(
        lex_all("(<word_1>x)")?,
        vec![
            Token::NamedGroupStart("word_1".to_string()),
            Token::Char('x'),
            Token::RParen,
            Token::Eof
        ]
    );
    Ok(())
}

#[test]
fn test_escape_tokens_lexer() -> Result<()> {
    assert_eq!(lex_all("%|%")?, vec![Token::Char('|'), Token::Eof]);
    assert_eq!(lex_all("%…%")?, vec![Token::Char('…'), Token::Eof]);
    assert_eq!(lex_all("%(%")?, vec![Token::Char('('), Token::Eof]);
    assert_eq!(lex_all("%%%")?, vec![Token::Char('%'), Token::Eof]);
    assert_eq!(lex_all("%{%")?, vec![Token::Char('{'), Token::Eof]);
    assert_eq!(lex_all("%<%")?, vec![Token::Char('<'), Token::Eof]);
    assert_eq!(lex_all("%a%")?, vec![Token::Char('a'), Token::Eof]);
    Ok(())
}

#[test]
fn test_lone_percent_is_literal_lexer() -> Result<()> {
    assert_eq!(
        lex_all("%a")?,
        vec![Token::Char('%'), Token::Char('a'), Token::Eof]
    );
    assert_eq!(lex_all("%")?, vec![Token::Char('%'), Token::Eof]);
    Ok(())
}

#[test]
fn test_other_characters_are_literals_lexer() -> Result<()> {
    assert_eq!(
        lex_all("*+.}>")?,
        vec![
            Token::Char('*'),
            Token::Char('+'),
            Token::Char('.'),
            Token::Char('}'),
            Token::Char('>'),
            Token::Eof
        ]
    );
    assert_eq!(
        lex_all("你好")?,
        vec![Token::Char('你'), Token::Char('好'), Token::Eof]
    );
    Ok(())
}

#[test]
fn test_lexer_throw_errors() {
    assert_eq!(lex_all("a{3"), Err(Error::UnterminatedRepeat { pos: 1 }));
    assert!(matches!(
        lex_all("a{x}"),
        Err(Error::InvalidRepeat { pos: 1, .. })
    ));
    assert!(matches!(lex_all("a{}"), Err(Error::InvalidRepeat { .. })));
    assert!(matches!(lex_all("a{-1}"), Err(Error::InvalidRepeat { .. })));
    assert!(matches!(
        lex_all("a{99999999999999999999999}"),
        Err(Error::InvalidRepeat { .. })
    ));
    assert_eq!(lex_all("(<g"), Err(Error::UnterminatedGroup { pos: 0 }));
    assert_eq!(lex_all("ab<g"), Err(Error::UnterminatedReference { pos: 2 }));
    assert_eq!(
        lex_all("(<a b>x)"),
        Err(Error::InvalidGroupName {
            pos: 0,
            name: "a b".to_string()
        })
    );
    assert!(matches!(
        lex_all("(<>x)"),
        Err(Error::InvalidGroupName { .. })
    ));
    assert!(matches!(lex_all("<->"), Err(Error::InvalidGroupName { .. })));
}

#[test]
fn test_lexer_is_lazy() {
    // The error sits after the first token, so the first pull still succeeds.
    let mut lexer = Lexer::new("a{");
    assert_eq!(lexer.next().unwrap().unwrap().token, Token::Char('a'));
    assert!(lexer.next().unwrap().is_err());
}
