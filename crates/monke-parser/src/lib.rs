//! monke-parser - Parser for the monke language
//!
//! Converts a token stream into an AST (Abstract Syntax Tree). Parsing never
//! stops at the first mistake: each statement gets its own entry in the
//! resulting `Program`, carrying either a node or the error that stopped it.
//!
//! # Example
//!
//! ```rust
//! use monke_lexer::Lexer;
//! use monke_parser::Parser;
//!
//! let mut parser = Parser::new(Lexer::new("let x = 1 + 2 * 3; let y 5;"));
//! let program = parser.parse_program();
//!
//! assert_eq!(program.len(), 2);
//! assert_eq!(program.nodes().next().unwrap().to_string(), "let x = (1 + (2 * 3));");
//! assert_eq!(program.errors().count(), 1);
//! ```

pub mod ast;
pub mod error;
pub mod parser;
pub mod precedence;

pub use ast::*;
pub use error::{ParseError, ParseResult};
pub use parser::{parse, Parser, MAX_NESTING};
pub use precedence::Precedence;
