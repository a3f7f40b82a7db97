//! Parse errors
//!
//! Every failure is tied to one statement; the parser records it in that
//! statement's slot and keeps going.

use monke_error::{Diagnostic, ErrorCode, Span};
use monke_lexer::{Token, TokenKind};
use thiserror::Error;

pub type ParseResult<T> = std::result::Result<T, ParseError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A required token was missing at a fixed grammar position
    #[error("expected token kind {expected}, found {found}")]
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
        /// Kind of the token the expectation followed
        after: TokenKind,
        span: Span,
    },

    /// An expression cannot start with this token
    #[error("no prefix parse function for token kind {kind}")]
    NoPrefixParseFn { kind: TokenKind, span: Span },

    /// An `INT` token whose text does not fit a 64-bit integer
    #[error("could not parse {literal:?} as integer")]
    InvalidInteger { literal: String, span: Span },

    /// Input the lexer could not classify
    #[error("illegal character {literal:?}")]
    IllegalToken { literal: String, span: Span },

    /// Expression nesting beyond what the parser will recurse into
    #[error("expression nested deeper than {limit} levels")]
    NestingTooDeep { limit: usize, span: Span },
}

impl ParseError {
    pub(crate) fn unexpected(expected: TokenKind, after: &Token, found: &Token) -> Self {
        ParseError::UnexpectedToken {
            expected,
            found: found.kind,
            after: after.kind,
            span: found.span,
        }
    }

    pub(crate) fn illegal(token: &Token) -> Self {
        ParseError::IllegalToken {
            literal: token.literal.clone(),
            span: token.span,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. }
            | ParseError::NoPrefixParseFn { span, .. }
            | ParseError::InvalidInteger { span, .. }
            | ParseError::IllegalToken { span, .. }
            | ParseError::NestingTooDeep { span, .. } => *span,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ParseError::UnexpectedToken { .. } => ErrorCode::UNEXPECTED_TOKEN,
            ParseError::NoPrefixParseFn { .. } => ErrorCode::EXPECTED_EXPRESSION,
            ParseError::InvalidInteger { .. } => ErrorCode::INVALID_NUMBER,
            ParseError::IllegalToken { .. } => ErrorCode::ILLEGAL_CHAR,
            ParseError::NestingTooDeep { .. } => ErrorCode::NESTING_TOO_DEEP,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diagnostic = Diagnostic::error(self.to_string()).with_code(self.code());

        match self {
            ParseError::UnexpectedToken {
                expected: TokenKind::Ident,
                after: TokenKind::Let,
                span,
                ..
            } => diagnostic
                .with_label(*span, "expected identifier after `let`")
                .with_help("a let statement reads `let <name> = <value>;`"),
            ParseError::UnexpectedToken {
                expected: TokenKind::Assign,
                span,
                ..
            } => diagnostic
                .with_label(*span, "expected `=` after the binding name")
                .with_help("a let statement reads `let <name> = <value>;`"),
            ParseError::UnexpectedToken { expected, span, .. } => {
                diagnostic.with_label(*span, format!("expected {} here", expected))
            }
            ParseError::NoPrefixParseFn { span, .. } => {
                diagnostic.with_label(*span, "expected an expression")
            }
            ParseError::InvalidInteger { span, .. } => diagnostic
                .with_label(*span, "integer literal out of range")
                .with_help(format!("integers must lie between {} and {}", i64::MIN, i64::MAX)),
            ParseError::IllegalToken { span, .. } => {
                diagnostic.with_label(*span, "unrecognized character")
            }
            ParseError::NestingTooDeep { span, .. } => diagnostic
                .with_label(*span, "nesting limit reached here")
                .with_help("split the expression with intermediate `let` bindings"),
        }
    }
}
