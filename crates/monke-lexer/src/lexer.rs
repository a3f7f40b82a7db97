//! Lexer for the monke language
//!
//! Scans the source one byte at a time and hands out tokens on demand.
//! The lexer never fails: anything it does not recognize becomes an
//! `Illegal` token and scanning moves on.

use crate::token::{Token, TokenKind};
use monke_error::span::{Position, Span};

/// The monke language Lexer
pub struct Lexer<'src> {
    /// Source code being analyzed
    input: &'src str,
    /// Byte offset of `ch`
    position: usize,
    /// Byte offset of the next byte to read
    read_position: usize,
    /// Current byte, 0 once the input is exhausted
    ch: u8,
    /// Line of `ch` (1-indexed)
    line: u32,
    /// Column of `ch` (1-indexed)
    column: u32,
    /// Source file ID stamped on every span
    file_id: u32,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source code
    pub fn new(input: &'src str) -> Self {
        Self::with_file_id(input, 0)
    }

    /// Creates a lexer whose spans point into source `file_id`
    pub fn with_file_id(input: &'src str, file_id: u32) -> Self {
        let mut lexer = Self {
            input,
            position: 0,
            read_position: 0,
            ch: 0,
            line: 1,
            column: 1,
            file_id,
        };
        lexer.read_char();
        lexer
    }

    fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Moves the cursor one byte forward. At the end of input the cursor
    /// stays put and `ch` stays 0.
    fn read_char(&mut self) {
        if self.read_position > self.position {
            if self.ch == b'\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }

        match self.input.as_bytes().get(self.read_position) {
            Some(&byte) => {
                self.ch = byte;
                self.position = self.read_position;
                self.read_position += 1;
            }
            None => {
                self.ch = 0;
                self.position = self.input.len();
            }
        }
    }

    /// Returns the byte after `ch` without advancing
    fn peek_char(&self) -> u8 {
        self.input.as_bytes().get(self.read_position).copied().unwrap_or(0)
    }

    fn current_position(&self) -> Position {
        Position::new(self.line, self.column, self.position)
    }

    fn make_span(&self, start: Position) -> Span {
        Span::new(start, self.current_position(), self.file_id)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.ch, b' ' | b'\t' | b'\n' | b'\r') {
            self.read_char();
        }
    }

    /// Picks the two-byte kind when the next byte is `second`, consuming it
    fn either(&mut self, second: u8, two: TokenKind, one: TokenKind) -> TokenKind {
        if self.peek_char() == second {
            self.read_char();
            two
        } else {
            one
        }
    }

    /// Reads a maximal run of bytes matching `pred`
    fn read_while(&mut self, pred: fn(u8) -> bool) -> &'src str {
        let input = self.input;
        let start = self.position;
        while !self.at_end() && pred(self.ch) {
            self.read_char();
        }
        &input[start..self.position]
    }

    /// Skips one whole character, which may span several bytes
    fn skip_illegal(&mut self) {
        let width = self.input[self.position..]
            .chars()
            .next()
            .map_or(1, char::len_utf8);
        for _ in 0..width {
            self.read_char();
        }
    }

    /// Reads the next token. Past the end of input this keeps returning
    /// `Eof` with an empty literal.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.current_position();

        if self.at_end() {
            return Token::new(TokenKind::Eof, "", self.make_span(start));
        }

        if is_letter(self.ch) {
            let word = self.read_while(is_letter);
            return Token::new(TokenKind::lookup_ident(word), word, self.make_span(start));
        }

        if self.ch.is_ascii_digit() {
            let digits = self.read_while(|b| b.is_ascii_digit());
            return Token::new(TokenKind::Int, digits, self.make_span(start));
        }

        let kind = match self.ch {
            b'=' => self.either(b'=', TokenKind::Equality, TokenKind::Assign),
            b'!' => self.either(b'=', TokenKind::NEquality, TokenKind::Not),
            b'<' => self.either(b'=', TokenKind::LessOrEqual, TokenKind::LessThan),
            b'>' => self.either(b'=', TokenKind::GreaterOrEqual, TokenKind::MoreThan),
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Multiply,
            b'/' => TokenKind::Divide,
            b',' => TokenKind::Comma,
            b';' => TokenKind::Semicolon,
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b'{' => TokenKind::LBrace,
            b'}' => TokenKind::RBrace,
            _ => {
                self.skip_illegal();
                let literal = &self.input[start.offset..self.position];
                return Token::new(TokenKind::Illegal, literal, self.make_span(start));
            }
        };
        self.read_char();

        let literal = &self.input[start.offset..self.position];
        Token::new(kind, literal, self.make_span(start))
    }

    /// Tokenizes the entire source code, `Eof` included
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token();
            let is_eof = token.is_eof();
            tokens.push(token);

            if is_eof {
                break;
            }
        }

        tokens
    }
}

/// Yields tokens up to, but not including, `Eof`
impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        (!token.is_eof()).then_some(token)
    }
}

/// Tokenizes source code and returns every token, `Eof` included
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).tokenize()
}

fn is_letter(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}
