// ============================================================================
// Evaluation Errors
// Error types for decimal arithmetic and expression evaluation
// ============================================================================

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Errors raised by decimal arithmetic and the expression pipeline.
///
/// Every error is detected at the point of violation and returned to the
/// caller unchanged; nothing inside the crate retries or recovers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// Malformed numeral string
    #[error("bad number format: {input:?}")]
    Format { input: String },

    /// Operator or function name not present in the operator table
    #[error("invalid operator: {token:?}")]
    UnknownToken { token: String },

    /// Closing parenthesis without an opener, or an opener left unclosed
    #[error("mismatched parenthesis")]
    MismatchedParenthesis,

    /// Postfix reduction did not leave exactly one value
    #[error("invalid expression: {reason}")]
    InvalidExpression { reason: String },

    /// Argument outside the mathematical domain of the operation
    #[error("{reason}")]
    Domain { reason: String },

    /// Attempted division or modulo by zero
    #[error("division by zero")]
    DivisionByZero,

    /// Negative rounding or decimal-place count
    #[error("{argument} should be at least 0, got {value}")]
    ArgumentRange { argument: &'static str, value: i64 },

    /// Value does not fit the requested native representation
    #[error("value is too large or too small for the target type")]
    Overflow,

    /// Evaluator configuration rejected by validation
    #[error("invalid configuration: {reason}")]
    Config { reason: String },
}

/// Coarse classification of [`EvalError`] for callers that only need to
/// branch on the failure family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ErrorKind {
    Format,
    UnknownToken,
    InvalidExpression,
    Domain,
    DivisionByZero,
    ArgumentRange,
    Overflow,
    Config,
}

impl EvalError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EvalError::Format { .. } => ErrorKind::Format,
            EvalError::UnknownToken { .. } | EvalError::MismatchedParenthesis => {
                ErrorKind::UnknownToken
            }
            EvalError::InvalidExpression { .. } => ErrorKind::InvalidExpression,
            EvalError::Domain { .. } => ErrorKind::Domain,
            EvalError::DivisionByZero => ErrorKind::DivisionByZero,
            EvalError::ArgumentRange { .. } => ErrorKind::ArgumentRange,
            EvalError::Overflow => ErrorKind::Overflow,
            EvalError::Config { .. } => ErrorKind::Config,
        }
    }

    pub(crate) fn format(input: impl Into<String>) -> Self {
        EvalError::Format {
            input: input.into(),
        }
    }

    pub(crate) fn unknown_token(token: impl Into<String>) -> Self {
        EvalError::UnknownToken {
            token: token.into(),
        }
    }

    pub(crate) fn invalid_expression(reason: impl Into<String>) -> Self {
        EvalError::InvalidExpression {
            reason: reason.into(),
        }
    }

    pub(crate) fn domain(reason: impl Into<String>) -> Self {
        EvalError::Domain {
            reason: reason.into(),
        }
    }
}

/// Result type alias for arithmetic and evaluation
pub type EvalResult<T> = Result<T, EvalError>;
