//! monke-lexer - Lexer/Tokenizer for the monke language
//!
//! This crate converts monke source code into a stream of tokens.
//!
//! # Features
//!
//! - Tokens are produced lazily, one `next_token` call at a time
//! - Two-byte comparison operators (`==`, `!=`, `<=`, `>=`)
//! - Keywords: `let`, `fn`, `yes`, `no`, `when`, `otherwise`, `send`
//! - Unrecognized input becomes `Illegal` tokens instead of errors
//!
//! # Example
//!
//! ```rust
//! use monke_lexer::{Lexer, TokenKind};
//!
//! let mut lexer = Lexer::new("let x = 10;");
//! assert_eq!(lexer.next_token().kind, TokenKind::Let);
//!
//! let rest: Vec<TokenKind> = lexer.map(|t| t.kind).collect();
//! assert_eq!(
//!     rest,
//!     vec![TokenKind::Ident, TokenKind::Assign, TokenKind::Int, TokenKind::Semicolon]
//! );
//! ```

pub mod lexer;
pub mod token;

pub use lexer::{tokenize, Lexer};
pub use token::{Token, TokenKind};
