//! Parser for the monke language
//!
//! Statements are parsed by recursive descent; expressions by Pratt parsing,
//! driven by per-token prefix and infix tables and the `Precedence` levels.

use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::precedence::Precedence;
use monke_lexer::{Lexer, Token, TokenKind};
use std::collections::HashMap;

/// Builds an expression starting at the current token
type PrefixParseFn<'src> = fn(&mut Parser<'src>) -> ParseResult<Expression>;
/// Extends an already parsed left operand; the current token is the operator
type InfixParseFn<'src> = fn(&mut Parser<'src>, Expression) -> ParseResult<Expression>;

/// Deepest expression nesting accepted before the statement fails
pub const MAX_NESTING: usize = 128;

/// Parser for the monke language
pub struct Parser<'src> {
    lexer: Lexer<'src>,
    cur_token: Token,
    /// One token of lookahead beyond `cur_token`
    peek_token: Token,
    prefix_fns: HashMap<TokenKind, PrefixParseFn<'src>>,
    infix_fns: HashMap<TokenKind, InfixParseFn<'src>>,
    /// Expressions currently being parsed, innermost included
    depth: usize,
}

impl<'src> Parser<'src> {
    /// Creates a new parser, priming both lookahead slots from `lexer`
    pub fn new(mut lexer: Lexer<'src>) -> Self {
        let cur_token = lexer.next_token();
        let peek_token = lexer.next_token();

        let mut parser = Self {
            lexer,
            cur_token,
            peek_token,
            prefix_fns: HashMap::new(),
            infix_fns: HashMap::new(),
            depth: 0,
        };

        parser.register_prefix(TokenKind::Ident, Self::parse_identifier);
        parser.register_prefix(TokenKind::Int, Self::parse_integer_literal);
        parser.register_prefix(TokenKind::Yes, Self::parse_boolean);
        parser.register_prefix(TokenKind::No, Self::parse_boolean);
        parser.register_prefix(TokenKind::Not, Self::parse_prefix_expression);
        parser.register_prefix(TokenKind::Minus, Self::parse_prefix_expression);
        parser.register_prefix(TokenKind::LParen, Self::parse_grouped_expression);

        for kind in [
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Multiply,
            TokenKind::Divide,
            TokenKind::LessThan,
            TokenKind::MoreThan,
            TokenKind::LessOrEqual,
            TokenKind::GreaterOrEqual,
            TokenKind::Equality,
            TokenKind::NEquality,
        ] {
            parser.register_infix(kind, Self::parse_infix_expression);
        }

        tracing::debug!(
            "registered {} prefix and {} infix parse functions",
            parser.prefix_fns.len(),
            parser.infix_fns.len()
        );

        parser
    }

    /// Creates a parser directly over source text
    pub fn from_source(source: &'src str) -> Self {
        Self::new(Lexer::new(source))
    }

    fn register_prefix(&mut self, kind: TokenKind, func: PrefixParseFn<'src>) {
        self.prefix_fns.insert(kind, func);
    }

    fn register_infix(&mut self, kind: TokenKind, func: InfixParseFn<'src>) {
        self.infix_fns.insert(kind, func);
    }

    // =========================================
    // Helpers
    // =========================================

    fn next_token(&mut self) {
        self.cur_token = std::mem::replace(&mut self.peek_token, self.lexer.next_token());
    }

    fn cur_token_is(&self, kind: TokenKind) -> bool {
        self.cur_token.is(kind)
    }

    fn peek_token_is(&self, kind: TokenKind) -> bool {
        self.peek_token.is(kind)
    }

    /// Advances only if the next token is `kind`
    fn expect_peek(&mut self, kind: TokenKind) -> ParseResult<()> {
        if self.peek_token_is(kind) {
            self.next_token();
            Ok(())
        } else if self.peek_token_is(TokenKind::Illegal) {
            Err(ParseError::illegal(&self.peek_token))
        } else {
            Err(ParseError::unexpected(kind, &self.cur_token, &self.peek_token))
        }
    }

    fn skip_optional_semicolon(&mut self) {
        if self.peek_token_is(TokenKind::Semicolon) {
            self.next_token();
        }
    }

    fn peek_precedence(&self) -> Precedence {
        Precedence::of(self.peek_token.kind)
    }

    fn cur_precedence(&self) -> Precedence {
        Precedence::of(self.cur_token.kind)
    }

    /// Skips the rest of a failed statement starting at byte `start`.
    ///
    /// Stops on its `;` or at the end of input and returns false, or stops
    /// on a later `let`/`send` and returns true: that token already begins
    /// the next statement and must not be consumed.
    fn synchronize(&mut self, start: usize) -> bool {
        loop {
            match self.cur_token.kind {
                TokenKind::Semicolon | TokenKind::Eof => return false,
                TokenKind::Let | TokenKind::Send if self.cur_token.span.start.offset != start => {
                    return true;
                }
                _ => self.next_token(),
            }
        }
    }

    // =========================================
    // Main parsing
    // =========================================

    /// Parses the complete program. Each statement gets one entry, failed
    /// statements included.
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::default();

        while !self.cur_token_is(TokenKind::Eof) {
            let start = self.cur_token.span.start.offset;
            let (entry, at_next_statement) = match self.parse_statement() {
                Ok(stmt) => (ParsedStatement::ok(stmt), false),
                Err(err) => {
                    tracing::debug!("statement {} failed: {}", program.len() + 1, err);
                    let resumed = self.synchronize(start);
                    (ParsedStatement::failed(err), resumed)
                }
            };
            program.statements.push(entry);
            if !at_next_statement {
                self.next_token();
            }
        }

        tracing::trace!("parsed {} statements", program.len());
        program
    }

    fn parse_statement(&mut self) -> ParseResult<Statement> {
        match self.cur_token.kind {
            TokenKind::Let => self.parse_let_statement(),
            TokenKind::Send => self.parse_send_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    /// Parse: `let <ident> = <expr>[;]`
    fn parse_let_statement(&mut self) -> ParseResult<Statement> {
        let token = self.cur_token.clone();

        self.expect_peek(TokenKind::Ident)?;
        let name = Identifier {
            token: self.cur_token.clone(),
            value: self.cur_token.literal.clone(),
        };

        self.expect_peek(TokenKind::Assign)?;
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_optional_semicolon();

        Ok(Statement::Let(LetStatement { token, name, value }))
    }

    /// Parse: `send <expr>[;]`
    fn parse_send_statement(&mut self) -> ParseResult<Statement> {
        let token = self.cur_token.clone();
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_optional_semicolon();

        Ok(Statement::Send(SendStatement { token, value }))
    }

    fn parse_expression_statement(&mut self) -> ParseResult<Statement> {
        let token = self.cur_token.clone();

        let expression = self.parse_expression(Precedence::Lowest)?;
        self.skip_optional_semicolon();

        Ok(Statement::Expression(ExpressionStatement { token, expression }))
    }

    // =========================================
    // Expressions
    // =========================================

    /// Parses an expression whose operators all bind tighter than `precedence`
    fn parse_expression(&mut self, precedence: Precedence) -> ParseResult<Expression> {
        if self.depth >= MAX_NESTING {
            return Err(ParseError::NestingTooDeep {
                limit: MAX_NESTING,
                span: self.cur_token.span,
            });
        }

        self.depth += 1;
        let expression = self.parse_expression_at(precedence);
        self.depth -= 1;
        expression
    }

    fn parse_expression_at(&mut self, precedence: Precedence) -> ParseResult<Expression> {
        if self.cur_token_is(TokenKind::Illegal) {
            return Err(ParseError::illegal(&self.cur_token));
        }

        let Some(prefix) = self.prefix_fns.get(&self.cur_token.kind).copied() else {
            return Err(ParseError::NoPrefixParseFn {
                kind: self.cur_token.kind,
                span: self.cur_token.span,
            });
        };
        let mut left = prefix(self)?;

        while !self.peek_token_is(TokenKind::Semicolon) && precedence < self.peek_precedence() {
            let Some(infix) = self.infix_fns.get(&self.peek_token.kind).copied() else {
                return Ok(left);
            };
            self.next_token();
            left = infix(self, left)?;
        }

        Ok(left)
    }

    fn parse_identifier(&mut self) -> ParseResult<Expression> {
        Ok(Expression::Identifier(Identifier {
            token: self.cur_token.clone(),
            value: self.cur_token.literal.clone(),
        }))
    }

    fn parse_integer_literal(&mut self) -> ParseResult<Expression> {
        let token = self.cur_token.clone();
        let value = token
            .literal
            .parse::<i64>()
            .map_err(|_| ParseError::InvalidInteger {
                literal: token.literal.clone(),
                span: token.span,
            })?;

        Ok(Expression::Integer(IntegerLiteral { token, value }))
    }

    fn parse_boolean(&mut self) -> ParseResult<Expression> {
        Ok(Expression::Boolean(BooleanLiteral {
            token: self.cur_token.clone(),
            value: self.cur_token_is(TokenKind::Yes),
        }))
    }

    /// Parse: `!<expr>` or `-<expr>`
    fn parse_prefix_expression(&mut self) -> ParseResult<Expression> {
        let token = self.cur_token.clone();
        self.next_token();

        let right = self.parse_expression(Precedence::Prefix)?;

        Ok(Expression::Prefix(PrefixExpression {
            operator: token.literal.clone(),
            token,
            right: Box::new(right),
        }))
    }

    /// Parse: `<left> <op> <expr>`
    fn parse_infix_expression(&mut self, left: Expression) -> ParseResult<Expression> {
        let token = self.cur_token.clone();
        let precedence = self.cur_precedence();
        self.next_token();

        let right = self.parse_expression(precedence)?;

        Ok(Expression::Infix(InfixExpression {
            operator: token.literal.clone(),
            token,
            left: Box::new(left),
            right: Box::new(right),
        }))
    }

    /// Parse: `( <expr> )`
    fn parse_grouped_expression(&mut self) -> ParseResult<Expression> {
        self.next_token();

        let expression = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RParen)?;

        Ok(expression)
    }
}

/// Parses a complete source text
pub fn parse(source: &str) -> Program {
    Parser::from_source(source).parse_program()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn single_statement(source: &str) -> Statement {
        let program = parse(source);
        assert_eq!(program.len(), 1, "expected one statement in {:?}", source);
        let entry = program.statements.into_iter().next().unwrap();
        assert_eq!(entry.error, None, "unexpected error in {:?}", source);
        entry.statement.unwrap()
    }

    fn single_error(source: &str) -> ParseError {
        let program = parse(source);
        let errors: Vec<_> = program.errors().cloned().collect();
        assert_eq!(errors.len(), 1, "expected one error in {:?}, got {:?}", source, errors);
        errors.into_iter().next().unwrap()
    }

    #[test]
    fn test_let_statements() {
        let program = parse("let x = 5;\nlet y = yes;\nlet foobar = y;");
        assert!(!program.has_errors());

        let expected = [("x", "5"), ("y", "yes"), ("foobar", "y")];
        let nodes: Vec<_> = program.nodes().collect();
        assert_eq!(nodes.len(), expected.len());

        for (stmt, (name, value)) in nodes.iter().zip(expected) {
            match stmt {
                Statement::Let(let_stmt) => {
                    assert_eq!(let_stmt.token.kind, TokenKind::Let);
                    assert_eq!(let_stmt.name.value, name);
                    assert_eq!(let_stmt.name.token_literal(), name);
                    assert_eq!(let_stmt.value.to_string(), value);
                }
                other => panic!("expected let statement, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_let_renders_round_trip() {
        let stmt = single_statement("let myVar = anotherVar;");
        assert_eq!(stmt.to_string(), "let myVar = anotherVar;");
    }

    #[test]
    fn test_let_without_semicolon_at_end_of_input() {
        let stmt = single_statement("let total = a + b");
        assert_eq!(stmt.to_string(), "let total = (a + b);");
    }

    #[test]
    fn test_let_missing_identifier() {
        let err = single_error("let = 5;");
        assert!(matches!(
            err,
            ParseError::UnexpectedToken {
                expected: TokenKind::Ident,
                found: TokenKind::Assign,
                after: TokenKind::Let,
                ..
            }
        ));
    }

    #[test]
    fn test_error_isolated_to_statement() {
        let program = parse("let x 5; let y = 7;");
        assert_eq!(program.len(), 2);

        let first = &program.statements[0];
        assert_eq!(first.statement, None);
        assert_eq!(
            first.error.as_ref().map(ToString::to_string).as_deref(),
            Some("expected token kind ASSIGN, found INT")
        );

        let second = &program.statements[1];
        assert_eq!(second.error, None);
        assert_eq!(second.statement.as_ref().unwrap().to_string(), "let y = 7;");
    }

    #[test]
    fn test_recovery_stops_before_next_statement_keyword() {
        let program = parse("let 5 let y = 1; send y");
        assert_eq!(program.len(), 3);
        assert!(!program.statements[0].is_ok());
        assert_eq!(program.to_string(), "let y = 1;send y;");
    }

    #[test]
    fn test_missing_value_does_not_swallow_next_let() {
        let program = parse("let x =\nlet y = 2;");
        assert_eq!(program.len(), 2);
        assert!(matches!(
            program.statements[0].error,
            Some(ParseError::NoPrefixParseFn { kind: TokenKind::Let, .. })
        ));
        assert_eq!(program.to_string(), "let y = 2;");
    }

    #[test]
    fn test_missing_value_does_not_swallow_next_send() {
        let program = parse("send\nsend 5;");
        assert_eq!(program.len(), 2);
        assert!(!program.statements[0].is_ok());
        assert_eq!(program.to_string(), "send 5;");
    }

    #[test]
    fn test_failed_statement_keyword_is_not_a_resume_point() {
        let program = parse("let; let z = 3;");
        assert_eq!(program.len(), 2);
        assert_eq!(program.to_string(), "let z = 3;");
    }

    #[test]
    fn test_send_statements() {
        let program = parse("send 5;\nsend 10\nsend -x;");
        assert!(!program.has_errors());

        let rendered: Vec<_> = program.nodes().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["send 5;", "send 10;", "send (-x);"]);
        assert!(program.nodes().all(|s| s.token_literal() == "send"));
    }

    #[test]
    fn test_identifier_expression() {
        match single_statement("foobar;") {
            Statement::Expression(stmt) => match stmt.expression {
                Expression::Identifier(ident) => {
                    assert_eq!(ident.value, "foobar");
                    assert_eq!(ident.token.literal, "foobar");
                }
                other => panic!("expected identifier, got {:?}", other),
            },
            other => panic!("expected expression statement, got {:?}", other),
        }
    }

    #[test]
    fn test_integer_literal_expression() {
        match single_statement("5;") {
            Statement::Expression(stmt) => {
                assert_eq!(stmt.token.literal, "5");
                assert!(matches!(stmt.expression, Expression::Integer(IntegerLiteral { value: 5, .. })));
            }
            other => panic!("expected expression statement, got {:?}", other),
        }
    }

    #[test]
    fn test_boolean_expressions() {
        assert_eq!(single_statement("yes").to_string(), "yes");
        assert_eq!(single_statement("no;").to_string(), "no");
    }

    #[test]
    fn test_prefix_expressions() {
        let cases = [("!5;", "!", 5), ("-14;", "-", 14)];

        for (source, operator, operand) in cases {
            let Statement::Expression(stmt) = single_statement(source) else {
                panic!("expected expression statement for {:?}", source);
            };
            let Expression::Prefix(prefix) = &stmt.expression else {
                panic!("expected prefix expression for {:?}", source);
            };
            assert_eq!(prefix.operator, operator);
            assert!(matches!(
                *prefix.right,
                Expression::Integer(IntegerLiteral { value, .. }) if value == operand
            ));
            assert_eq!(stmt.expression.to_string(), format!("({}{})", operator, operand));
        }
    }

    #[test]
    fn test_infix_expressions() {
        let operators = ["+", "-", "*", "/", "<", ">", "==", "!=", "<=", ">="];

        for op in operators {
            let source = format!("5 {} 6;", op);
            let Statement::Expression(stmt) = single_statement(&source) else {
                panic!("expected expression statement for {:?}", source);
            };
            let Expression::Infix(infix) = &stmt.expression else {
                panic!("expected infix expression for {:?}", source);
            };
            assert_eq!(infix.operator, op);
            assert_eq!(infix.left.to_string(), "5");
            assert_eq!(infix.right.to_string(), "6");
        }
    }

    #[test]
    fn test_operator_precedence() {
        let cases = [
            ("-a * b", "((-a) * b)"),
            ("!-a", "(!(-a))"),
            ("a + b + c", "((a + b) + c)"),
            ("a - b - c", "((a - b) - c)"),
            ("a * b / c", "((a * b) / c)"),
            ("1 + 2 * 3", "(1 + (2 * 3))"),
            ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
            ("3 + 4; -5 * 5", "(3 + 4)((-5) * 5)"),
            ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
            ("5 <= 4 != 3 >= 4", "((5 <= 4) != (3 >= 4))"),
            ("1 < 2 == yes", "((1 < 2) == yes)"),
            ("3 + 4 * 5 == 3 * 1 + 4 * 5", "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))"),
            ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4)"),
            ("(1 + 2) * 3", "((1 + 2) * 3)"),
            ("-(5 + 5)", "(-(5 + 5))"),
            ("!(yes == no)", "(!(yes == no))"),
        ];

        for (source, expected) in cases {
            let program = parse(source);
            assert!(!program.has_errors(), "errors in {:?}: {:?}", source, program.diagnostics());
            assert_eq!(program.to_string(), expected, "source: {:?}", source);
        }
    }

    #[test]
    fn test_call_precedence_without_handler_ends_expression() {
        let program = parse("a (b)");
        assert!(!program.has_errors());
        let rendered: Vec<_> = program.nodes().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["a", "b"]);
    }

    #[test]
    fn test_no_prefix_parse_function() {
        let err = single_error("+ 5;");
        assert_eq!(err.to_string(), "no prefix parse function for token kind PLUS");

        let err = single_error("let x = fn;");
        assert!(matches!(err, ParseError::NoPrefixParseFn { kind: TokenKind::Function, .. }));
    }

    #[test]
    fn test_missing_operand() {
        let program = parse("1 + ; 2");
        assert_eq!(program.len(), 2);
        assert!(matches!(
            program.statements[0].error,
            Some(ParseError::NoPrefixParseFn { kind: TokenKind::Semicolon, .. })
        ));
        assert_eq!(program.to_string(), "2");
    }

    #[test]
    fn test_unclosed_group() {
        let err = single_error("(1 + 2");
        assert!(matches!(
            err,
            ParseError::UnexpectedToken {
                expected: TokenKind::RParen,
                found: TokenKind::Eof,
                ..
            }
        ));
    }

    #[test]
    fn test_integer_out_of_range() {
        let program = parse("let big = 99999999999999999999; let small = 1;");
        assert_eq!(program.len(), 2);
        assert!(matches!(
            &program.statements[0].error,
            Some(ParseError::InvalidInteger { literal, .. }) if literal == "99999999999999999999"
        ));
        assert!(program.statements[1].is_ok());
    }

    #[test]
    fn test_illegal_token_is_reported() {
        let program = parse("let a = @; let b = 2;");
        assert_eq!(program.len(), 2);
        assert!(matches!(
            &program.statements[0].error,
            Some(ParseError::IllegalToken { literal, .. }) if literal == "@"
        ));
        assert_eq!(program.to_string(), "let b = 2;");

        let err = single_error("let # = 1;");
        assert!(matches!(err, ParseError::IllegalToken { .. }));
    }

    #[test]
    fn test_error_span_points_at_offending_token() {
        let err = single_error("let x\n  5;");
        assert_eq!(err.span().start.line, 2);
        assert_eq!(err.span().start.column, 3);
    }

    #[test]
    fn test_deep_prefix_nesting_fails_the_statement() {
        let source = format!("{}1; send 2;", "-".repeat(200_000));
        let program = parse(&source);

        assert_eq!(program.len(), 2);
        assert!(matches!(
            program.statements[0].error,
            Some(ParseError::NestingTooDeep { limit: MAX_NESTING, .. })
        ));
        assert_eq!(program.to_string(), "send 2;");
    }

    #[test]
    fn test_deep_grouping_fails_the_statement() {
        let source = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
        let err = single_error(&source);
        assert!(matches!(err, ParseError::NestingTooDeep { .. }));
        assert_eq!(err.code().to_string(), "EP003");
    }

    #[test]
    fn test_nesting_below_the_limit_parses() {
        let depth = MAX_NESTING - 1;
        let source = format!("{}1", "!".repeat(depth - 1));
        let stmt = single_statement(&source);
        assert!(stmt.to_string().starts_with("(!(!"));

        let parser_depth_resets = parse(&format!("{}1;\n!yes", "-".repeat(MAX_NESTING * 2)));
        assert_eq!(parser_depth_resets.to_string(), "(!yes)");
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
        assert!(parse("  \n\t").is_empty());
    }

    #[test]
    fn test_every_failure_keeps_a_slot() {
        let program = parse("let; send; +; x");
        assert_eq!(program.len(), 4);
        assert_eq!(program.errors().count(), 3);
        assert_eq!(program.to_string(), "x");
    }
}
