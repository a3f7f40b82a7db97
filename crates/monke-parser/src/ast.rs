//! AST - Abstract Syntax Tree for the monke language
//!
//! ```text
//! Program
//! ├── Let        let x = 5;
//! │   ├── name   Identifier("x")
//! │   └── value  IntegerLiteral(5)
//! ├── Send       send x;
//! │   └── value  Identifier("x")
//! └── Expression -x + 2
//!     └── Infix(+)
//!         ├── Prefix(-) ── Identifier("x")
//!         └── IntegerLiteral(2)
//! ```
//!
//! Every node renders back to a canonical source form through `Display`.

use crate::error::ParseError;
use monke_error::Diagnostics;
use monke_lexer::Token;
use std::fmt;

/// Behavior shared by every node of the tree
pub trait Node: fmt::Display {
    /// Literal text of the token the node starts with
    fn token_literal(&self) -> &str;
}

// =========================================
// Program
// =========================================

/// Complete program: one entry per statement, in source order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<ParsedStatement>,
}

/// Outcome of parsing a single statement
///
/// A failed statement keeps its slot: `error` is set and `statement` holds
/// whatever could be built, which is nothing when the statement was abandoned.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedStatement {
    pub statement: Option<Statement>,
    pub error: Option<ParseError>,
}

impl ParsedStatement {
    pub fn ok(statement: Statement) -> Self {
        Self {
            statement: Some(statement),
            error: None,
        }
    }

    pub fn failed(error: ParseError) -> Self {
        Self {
            statement: None,
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

impl Program {
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Statements that parsed without error
    pub fn nodes(&self) -> impl Iterator<Item = &Statement> {
        self.statements
            .iter()
            .filter(|entry| entry.is_ok())
            .filter_map(|entry| entry.statement.as_ref())
    }

    pub fn errors(&self) -> impl Iterator<Item = &ParseError> {
        self.statements.iter().filter_map(|entry| entry.error.as_ref())
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// Parse errors as renderable diagnostics
    pub fn diagnostics(&self) -> Diagnostics {
        self.errors().map(ParseError::to_diagnostic).collect()
    }
}

impl Node for Program {
    fn token_literal(&self) -> &str {
        self.statements
            .first()
            .and_then(|entry| entry.statement.as_ref())
            .map_or("", |stmt| stmt.token_literal())
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in self.nodes() {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

// =========================================
// Statements
// =========================================

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `let <name> = <value>;`
    Let(LetStatement),
    /// `send <value>;`
    Send(SendStatement),
    /// Expression used as a statement
    Expression(ExpressionStatement),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LetStatement {
    /// The `let` token
    pub token: Token,
    pub name: Identifier,
    pub value: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SendStatement {
    /// The `send` token
    pub token: Token,
    pub value: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    /// First token of the expression
    pub token: Token,
    pub expression: Expression,
}

impl Node for Statement {
    fn token_literal(&self) -> &str {
        match self {
            Statement::Let(stmt) => &stmt.token.literal,
            Statement::Send(stmt) => &stmt.token.literal,
            Statement::Expression(stmt) => &stmt.token.literal,
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let(stmt) => write!(f, "let {} = {};", stmt.name, stmt.value),
            Statement::Send(stmt) => write!(f, "send {};", stmt.value),
            Statement::Expression(stmt) => write!(f, "{}", stmt.expression),
        }
    }
}

// =========================================
// Expressions
// =========================================

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(Identifier),
    Integer(IntegerLiteral),
    Boolean(BooleanLiteral),
    /// `!x`, `-x`
    Prefix(PrefixExpression),
    /// `a + b`, `a <= b`, ...
    Infix(InfixExpression),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub token: Token,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntegerLiteral {
    pub token: Token,
    pub value: i64,
}

/// `yes` or `no`
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanLiteral {
    pub token: Token,
    pub value: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpression {
    pub token: Token,
    pub operator: String,
    pub right: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InfixExpression {
    /// The operator token
    pub token: Token,
    pub operator: String,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
}

impl Node for Expression {
    fn token_literal(&self) -> &str {
        match self {
            Expression::Identifier(expr) => &expr.token.literal,
            Expression::Integer(expr) => &expr.token.literal,
            Expression::Boolean(expr) => &expr.token.literal,
            Expression::Prefix(expr) => &expr.token.literal,
            Expression::Infix(expr) => &expr.token.literal,
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(ident) => write!(f, "{}", ident),
            Expression::Integer(int) => write!(f, "{}", int.value),
            Expression::Boolean(b) => f.write_str(if b.value { "yes" } else { "no" }),
            Expression::Prefix(expr) => write!(f, "({}{})", expr.operator, expr.right),
            Expression::Infix(expr) => {
                write!(f, "({} {} {})", expr.left, expr.operator, expr.right)
            }
        }
    }
}

impl Node for Identifier {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
