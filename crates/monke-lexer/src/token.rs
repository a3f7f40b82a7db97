//! Tokens for the monke language
//!
//! Defines every token kind the lexer can produce.

use monke_error::span::Span;
use serde::{Serialize, Serializer};
use std::fmt;

/// All token kinds of the monke language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // =========================================
    // Structural
    // =========================================
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `,`
    Comma,
    /// `;`
    Semicolon,

    // =========================================
    // Operators
    // =========================================
    /// `=`
    Assign,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `!`
    Not,
    /// `<`
    LessThan,
    /// `>`
    MoreThan,
    /// `==`
    Equality,
    /// `!=`
    NEquality,
    /// `<=`
    LessOrEqual,
    /// `>=`
    GreaterOrEqual,

    // =========================================
    // Keywords
    // =========================================
    /// `let` - binding declaration
    Let,
    /// `fn` - function literal
    Function,
    /// `when` - conditional
    When,
    /// `otherwise` - conditional alternative
    Otherwise,
    /// `yes` - boolean true
    Yes,
    /// `no` - boolean false
    No,
    /// `send` - hand a value back to the caller
    Send,

    // =========================================
    // Sentinels
    // =========================================
    /// Identifier, e.g. `total`
    Ident,
    /// Integer literal, e.g. `42`
    Int,
    /// Input the lexer does not recognize
    Illegal,
    /// End of input
    Eof,
}

impl TokenKind {
    /// Upper-case name used in error messages and serialized output
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::Comma => "COMMA",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Multiply => "MULTIPLY",
            TokenKind::Divide => "DIVIDE",
            TokenKind::Not => "NOT",
            TokenKind::LessThan => "LESSTHAN",
            TokenKind::MoreThan => "MORETHAN",
            TokenKind::Equality => "EQUALITY",
            TokenKind::NEquality => "NEQUALITY",
            TokenKind::LessOrEqual => "LESS_OR_EQUAL",
            TokenKind::GreaterOrEqual => "GREATER_OR_EQUAL",
            TokenKind::Let => "LET",
            TokenKind::Function => "FUNCTION",
            TokenKind::When => "WHEN",
            TokenKind::Otherwise => "OTHERWISE",
            TokenKind::Yes => "YES",
            TokenKind::No => "NO",
            TokenKind::Send => "SEND",
            TokenKind::Ident => "IDENT",
            TokenKind::Int => "INT",
            TokenKind::Illegal => "ILLEGAL",
            TokenKind::Eof => "EOF",
        }
    }

    /// Converts a word to its keyword kind, if it is one
    pub fn keyword_from_str(s: &str) -> Option<TokenKind> {
        match s {
            "let" => Some(TokenKind::Let),
            "fn" => Some(TokenKind::Function),
            "yes" => Some(TokenKind::Yes),
            "no" => Some(TokenKind::No),
            "when" => Some(TokenKind::When),
            "otherwise" => Some(TokenKind::Otherwise),
            "send" => Some(TokenKind::Send),
            _ => None,
        }
    }

    /// Classifies a scanned word: keyword kind, or `Ident`
    pub fn lookup_ident(word: &str) -> TokenKind {
        TokenKind::keyword_from_str(word).unwrap_or(TokenKind::Ident)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for TokenKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// A token: its kind, the exact source text, and where it sits
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Source text of the token, empty for `Eof`
    pub literal: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            literal: literal.into(),
            span,
        }
    }

    /// Checks if the token is of a specific kind
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({:?}) at {}:{}",
            self.kind, self.literal, self.span.start.line, self.span.start.column
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(TokenKind::lookup_ident("let"), TokenKind::Let);
        assert_eq!(TokenKind::lookup_ident("fn"), TokenKind::Function);
        assert_eq!(TokenKind::lookup_ident("otherwise"), TokenKind::Otherwise);
        assert_eq!(TokenKind::lookup_ident("sending"), TokenKind::Ident);
        assert_eq!(TokenKind::lookup_ident("Let"), TokenKind::Ident);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(TokenKind::LessOrEqual.to_string(), "LESS_OR_EQUAL");
        assert_eq!(TokenKind::NEquality.to_string(), "NEQUALITY");
    }

    #[test]
    fn test_token_display() {
        let token = Token::new(TokenKind::Ident, "five", Span::default());
        assert_eq!(token.to_string(), "IDENT(\"five\") at 0:0");
    }
}
