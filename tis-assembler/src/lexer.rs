//! # Lexer for node operands

use logos::Logos;
use tis_spec::Port;

/// Operand tokens
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t]+")]
pub enum Token {
    /// Port keyword
    #[token("UP", |_| Port::UP)]
    #[token("RIGHT", |_| Port::RIGHT)]
    #[token("DOWN", |_| Port::DOWN)]
    #[token("LEFT", |_| Port::LEFT)]
    #[token("NIL", |_| Port::Nil)]
    #[token("ACC", |_| Port::Acc)]
    #[token("ANY", |_| Port::Any)]
    #[token("LAST", |_| Port::Last)]
    Port(Port),

    /// Signed decimal number
    #[regex(r"[-+]?[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    Number(i64),

    /// Anything else that looks like a name
    #[regex(r"[A-Z_][A-Z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),

    #[token(",")]
    Comma,
}

/// Lex a single operand; `None` unless the text is exactly one token
pub fn single_token(text: &str) -> Option<Token> {
    let mut lex = Token::lexer(text);
    let token = lex.next()?.ok()?;
    match lex.next() {
        None => Some(token),
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexer_ports() {
        let mut lex = Token::lexer("UP RIGHT DOWN LEFT NIL ACC ANY LAST");
        assert_eq!(lex.next(), Some(Ok(Token::Port(Port::UP))));
        assert_eq!(lex.next(), Some(Ok(Token::Port(Port::RIGHT))));
        assert_eq!(lex.next(), Some(Ok(Token::Port(Port::DOWN))));
        assert_eq!(lex.next(), Some(Ok(Token::Port(Port::LEFT))));
        assert_eq!(lex.next(), Some(Ok(Token::Port(Port::Nil))));
        assert_eq!(lex.next(), Some(Ok(Token::Port(Port::Acc))));
        assert_eq!(lex.next(), Some(Ok(Token::Port(Port::Any))));
        assert_eq!(lex.next(), Some(Ok(Token::Port(Port::Last))));
        assert_eq!(lex.next(), None);
    }

    #[test]
    fn test_lexer_numbers() {
        let mut lex = Token::lexer("42 -10 0 +7");
        assert_eq!(lex.next(), Some(Ok(Token::Number(42))));
        assert_eq!(lex.next(), Some(Ok(Token::Number(-10))));
        assert_eq!(lex.next(), Some(Ok(Token::Number(0))));
        assert_eq!(lex.next(), Some(Ok(Token::Number(7))));
    }

    #[test]
    fn test_lexer_keyword_prefix_is_ident() {
        let mut lex = Token::lexer("UPPER LASTING");
        assert_eq!(lex.next(), Some(Ok(Token::Ident("UPPER".to_string()))));
        assert_eq!(lex.next(), Some(Ok(Token::Ident("LASTING".to_string()))));
    }

    #[test]
    fn test_lexer_operands() {
        let mut lex = Token::lexer("ACC, DOWN");
        assert_eq!(lex.next(), Some(Ok(Token::Port(Port::Acc))));
        assert_eq!(lex.next(), Some(Ok(Token::Comma)));
        assert_eq!(lex.next(), Some(Ok(Token::Port(Port::DOWN))));
    }

    #[test]
    fn test_single_token() {
        assert_eq!(single_token("ANY"), Some(Token::Port(Port::Any)));
        assert_eq!(single_token(" -5 "), Some(Token::Number(-5)));
        assert_eq!(single_token("UP DOWN"), None);
        assert_eq!(single_token(""), None);
        assert_eq!(single_token("1X"), None);
    }
}
