use monke_lexer::TokenKind;

/// Binding power of operators, weakest first
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    /// `==`, `!=`
    Equality,
    /// `<`, `>`, `<=`, `>=`
    LessMore,
    /// `+`, `-`
    Sum,
    /// `*`, `/`
    Product,
    /// `-x`, `!x`
    Prefix,
    /// `f(x)`
    Call,
}

impl Precedence {
    /// Precedence a token has when it appears in infix position
    pub fn of(kind: TokenKind) -> Precedence {
        match kind {
            TokenKind::Equality | TokenKind::NEquality => Precedence::Equality,
            TokenKind::LessThan
            | TokenKind::MoreThan
            | TokenKind::LessOrEqual
            | TokenKind::GreaterOrEqual => Precedence::LessMore,
            TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
            TokenKind::Multiply | TokenKind::Divide => Precedence::Product,
            TokenKind::LParen => Precedence::Call,
            _ => Precedence::Lowest,
        }
    }
}
