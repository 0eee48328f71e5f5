// ============================================================================
// Tokens
// Lexical units shared by the tokenizer, shunting-yard and postfix stages
// ============================================================================

use crate::domain::operator::Operator;
use crate::numeric::DecimalValue;
use std::fmt;

/// A literal number or an operator taken from the operator table
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Literal(DecimalValue),
    Operator(Operator),
}

impl Token {
    #[inline]
    pub fn is_literal(&self) -> bool {
        matches!(self, Token::Literal(_))
    }

    pub fn as_literal(&self) -> Option<&DecimalValue> {
        match self {
            Token::Literal(value) => Some(value),
            Token::Operator(_) => None,
        }
    }

    pub fn as_operator(&self) -> Option<&Operator> {
        match self {
            Token::Operator(op) => Some(op),
            Token::Literal(_) => None,
        }
    }

    /// Literal or `)`: whatever follows starts a new operand
    pub(crate) fn ends_operand(&self) -> bool {
        match self {
            Token::Literal(_) => true,
            Token::Operator(op) => op.is_right_paren(),
        }
    }

    /// Literal, `(` or a prefix function
    pub(crate) fn starts_operand(&self) -> bool {
        match self {
            Token::Literal(_) => true,
            Token::Operator(op) => op.is_left_paren() || op.is_unary(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Literal(value) => write!(f, "{value}"),
            Token::Operator(op) => write!(f, "{op}"),
        }
    }
}

impl From<DecimalValue> for Token {
    fn from(value: DecimalValue) -> Self {
        Token::Literal(value)
    }
}

impl From<Operator> for Token {
    fn from(op: Operator) -> Self {
        Token::Operator(op)
    }
}

/// Render a token sequence separated by single spaces.
pub fn format_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(Token::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
