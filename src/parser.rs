// ABOUTME: Pull-based recursive-descent parser turning tokens into heap-allocated values

use crate::env::Env;
use crate::error::ParserError;
use crate::heap::Handle;
use crate::lexer::{Lexer, Token, TokenKind};
use crate::value::Value;

/// Parses one s-expression at a time from a shared token stream, allocating
/// every value it produces through the supplied environment's heap.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    lookahead: Option<Token>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Parser {
            lexer: Lexer::new(input),
            lookahead: None,
        }
    }

    fn peek(&mut self) -> Result<&Token, ParserError> {
        if self.lookahead.is_none() {
            self.lookahead = Some(self.lexer.next_token()?);
        }
        Ok(self.lookahead.as_ref().unwrap())
    }

    fn advance(&mut self) -> Result<Token, ParserError> {
        match self.lookahead.take() {
            Some(tok) => Ok(tok),
            None => self.lexer.next_token(),
        }
    }

    /// Parses the next top-level expression, or `None` at end of input.
    pub fn parse_next(&mut self, env: &Env) -> Result<Option<Handle>, ParserError> {
        if matches!(self.peek()?.kind, TokenKind::Eof) {
            return Ok(None);
        }
        Ok(Some(self.parse_expr(env)?))
    }

    fn parse_expr(&mut self, env: &Env) -> Result<Handle, ParserError> {
        let token = self.advance()?;
        match token.kind {
            TokenKind::Number(n) => Ok(env.manage(Value::Number(n))),
            TokenKind::String(s) => Ok(env.manage(Value::String(s))),
            TokenKind::Atom(a) => Ok(env.manage(Value::Atom(a))),
            TokenKind::True => Ok(env.manage(Value::Bool(true))),
            TokenKind::False => Ok(env.manage(Value::Bool(false))),
            TokenKind::Quote => {
                let quoted = self.parse_expr(env)?;
                let quote_atom = env.manage(Value::Atom("quote".to_string()));
                Ok(env.manage(Value::List(vec![quote_atom, quoted])))
            }
            TokenKind::LParen => {
                let mut items = Vec::new();
                loop {
                    match self.peek()?.kind {
                        TokenKind::RParen => {
                            self.advance()?;
                            break;
                        }
                        TokenKind::Eof => {
                            return Err(ParserError::new(
                                token.line,
                                token.col,
                                "Reached unexpected end-of-file inside list",
                            ))
                        }
                        _ => items.push(self.parse_expr(env)?),
                    }
                }
                Ok(env.manage(Value::List(items)))
            }
            TokenKind::RParen => {
                Err(ParserError::new(token.line, token.col, "Unexpected ')'"))
            }
            TokenKind::Eof => Err(ParserError::new(
                token.line,
                token.col,
                "Unexpected end of input",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::GlobalEnv;

    fn global() -> Env {
        Env::Global(GlobalEnv::new())
    }

    #[test]
    fn parses_atom() {
        let env = global();
        let mut parser = Parser::new("foo");
        let h = parser.parse_next(&env).unwrap().unwrap();
        assert!(matches!(env.get(h).unwrap(), Value::Atom(s) if s == "foo"));
    }

    #[test]
    fn parses_nested_list() {
        let env = global();
        let mut parser = Parser::new("(+ 1 (* 2 3))");
        let h = parser.parse_next(&env).unwrap().unwrap();
        let root = env.get(h).unwrap();
        let items = match root {
            Value::List(items) => items,
            _ => panic!("expected list"),
        };
        assert_eq!(items.len(), 3);
        let inner = env.get(items[2]).unwrap();
        assert!(matches!(inner, Value::List(ref xs) if xs.len() == 3));
    }

    #[test]
    fn quote_sugar_desugars_to_quote_form() {
        let env = global();
        let mut parser = Parser::new("'(1 2)");
        let h = parser.parse_next(&env).unwrap().unwrap();
        let items = match env.get(h).unwrap() {
            Value::List(items) => items,
            _ => panic!("expected list"),
        };
        assert_eq!(items.len(), 2);
        assert!(matches!(env.get(items[0]).unwrap(), Value::Atom(s) if s == "quote"));
    }

    #[test]
    fn multiple_top_level_expressions_parse_in_sequence() {
        let env = global();
        let mut parser = Parser::new("1 2 3");
        let mut seen = Vec::new();
        while let Some(h) = parser.parse_next(&env).unwrap() {
            match env.get(h).unwrap() {
                Value::Number(n) => seen.push(n),
                _ => panic!("expected number"),
            }
        }
        assert_eq!(seen, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn unclosed_list_is_a_parse_error() {
        let env = global();
        let mut parser = Parser::new("(+ 1 2");
        assert!(parser.parse_next(&env).is_err());
    }

    #[test]
    fn stray_close_paren_is_a_parse_error() {
        let env = global();
        let mut parser = Parser::new(")");
        assert!(parser.parse_next(&env).is_err());
    }

    #[test]
    fn empty_input_yields_no_expression() {
        let env = global();
        let mut parser = Parser::new("   ");
        assert!(parser.parse_next(&env).unwrap().is_none());
    }
}
