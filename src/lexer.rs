// ABOUTME: Character stream to token stream, with line/column tracking

use crate::error::ParserError;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    LParen,
    RParen,
    Quote,
    True,
    False,
    Atom(String),
    Number(f64),
    String(String),
    Eof,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub col: usize,
}

pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
    col: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            chars: input.chars().peekable(),
            line: 1,
            col: 1,
        }
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    /// One character of lookahead beyond `peek_char`, used only to decide
    /// whether a leading `-` opens a number or an atom.
    fn peek2_char(&self) -> Option<char> {
        let mut ahead = self.chars.clone();
        ahead.next();
        ahead.next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next();
        if let Some(ch) = c {
            if ch == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
        c
    }

    fn is_delim(c: char) -> bool {
        c.is_whitespace()
    }

    fn is_symbol_char(c: char) -> bool {
        c.is_ascii_alphabetic() || c == '.' || "!$%&|*+-/:<>=?@^_~".contains(c)
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek_char() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some(';') => {
                    while let Some(c) = self.peek_char() {
                        if c == '\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                _ => break,
            }
        }
    }

    fn lex_number(&mut self) -> TokenKind {
        let mut buf = String::new();
        if self.peek_char() == Some('-') {
            buf.push('-');
            self.bump();
        }
        while let Some(c) = self.peek_char() {
            if c.is_ascii_digit() {
                buf.push(c);
                self.bump();
            } else {
                break;
            }
        }
        if self.peek_char() == Some('.') {
            buf.push('.');
            self.bump();
            while let Some(c) = self.peek_char() {
                if c.is_ascii_digit() {
                    buf.push(c);
                    self.bump();
                } else {
                    break;
                }
            }
        }

        let next = self.peek_char();
        let terminated = next.is_none() || next == Some(')') || next.is_some_and(Self::is_delim);
        if buf != "-" && terminated {
            return TokenKind::Number(buf.parse::<f64>().unwrap_or(0.0));
        }

        // Buffer rule: what looked like a number is actually an atom
        // (e.g. "3d", or a bare "-"). Keep consuming identifier characters.
        while let Some(c) = self.peek_char() {
            if Self::is_symbol_char(c) || c.is_ascii_digit() {
                buf.push(c);
                self.bump();
            } else {
                break;
            }
        }
        TokenKind::Atom(buf)
    }

    fn lex_atom(&mut self) -> TokenKind {
        let mut buf = String::new();
        while let Some(c) = self.peek_char() {
            if Self::is_symbol_char(c) || c.is_ascii_digit() {
                buf.push(c);
                self.bump();
            } else {
                break;
            }
        }
        TokenKind::Atom(buf)
    }

    fn lex_string(&mut self, line: usize, col: usize) -> Result<TokenKind, ParserError> {
        self.bump(); // opening quote
        let mut buf = String::new();
        loop {
            match self.bump() {
                None => {
                    return Err(ParserError::new(
                        line,
                        col,
                        "Reached unexpected end-of-file: expected closing \"",
                    ))
                }
                Some('"') => break,
                Some('\\') => match self.bump() {
                    Some('"') => buf.push('"'),
                    Some('n') => buf.push('\n'),
                    Some('t') => buf.push('\t'),
                    Some('\'') => buf.push('\''),
                    Some('\\') => buf.push('\\'),
                    Some(other) => {
                        return Err(ParserError::new(
                            self.line,
                            self.col,
                            format!("Unknown escape sequence \\{other}"),
                        ))
                    }
                    None => {
                        return Err(ParserError::new(
                            line,
                            col,
                            "Reached unexpected end-of-file while parsing string escape",
                        ))
                    }
                },
                Some(c) => buf.push(c),
            }
        }
        Ok(TokenKind::String(buf))
    }

    fn lex_bool(&mut self, line: usize, col: usize) -> Result<TokenKind, ParserError> {
        self.bump(); // '#'
        let kind = self.bump();
        let next = self.peek_char();
        let terminated = next.is_none() || next == Some(')') || next.is_some_and(Self::is_delim);
        match (kind, terminated) {
            (Some('t'), true) => Ok(TokenKind::True),
            (Some('f'), true) => Ok(TokenKind::False),
            _ => Err(ParserError::new(
                line,
                col,
                "Unexpected character following #: expected t or f",
            )),
        }
    }

    pub fn next_token(&mut self) -> Result<Token, ParserError> {
        self.skip_whitespace_and_comments();
        let (line, col) = (self.line, self.col);
        let c = match self.peek_char() {
            Some(c) => c,
            None => {
                return Ok(Token {
                    kind: TokenKind::Eof,
                    line,
                    col,
                })
            }
        };

        let kind = match c {
            '(' => {
                self.bump();
                TokenKind::LParen
            }
            ')' => {
                self.bump();
                TokenKind::RParen
            }
            '\'' => {
                self.bump();
                TokenKind::Quote
            }
            '"' => self.lex_string(line, col)?,
            '#' => self.lex_bool(line, col)?,
            d if d.is_ascii_digit() => self.lex_number(),
            '-' if self.peek2_char().is_some_and(|n| n.is_ascii_digit()) => self.lex_number(),
            s if Self::is_symbol_char(s) => self.lex_atom(),
            other => {
                return Err(ParserError::new(
                    line,
                    col,
                    format!("Unexpected character '{other}'"),
                ))
            }
        };

        Ok(Token { kind, line, col })
    }
}
