// ============================================================================
// Operators
// Operator descriptors and the arithmetic each one performs
// ============================================================================

use crate::domain::config::EvaluatorConfig;
use crate::numeric::{math, DecimalValue, EvalError, EvalResult};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Precedence given to parentheses; no operator may reach it.
pub const PAREN_PRECEDENCE: u16 = 1000;

/// Number of operands an operation consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Arity {
    /// Prefix function of one operand (`neg`, `abs`, `sin`, ...)
    Unary,
    /// Infix operator of two operands (`+`, `*`, `pow`, ...)
    Binary,
}

/// Computation behind an operator symbol.
///
/// Several symbols may share one operation (`^` and `pow`, `%` and `mod`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Operation {
    LeftParen,
    RightParen,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
    Positive,
    Negate,
    Abs,
    Floor,
    Ceil,
    Factorial,
    Sine,
    Cosine,
    Tangent,
    Cotangent,
}

impl Operation {
    /// Operand count, `None` for parentheses.
    pub fn arity(self) -> Option<Arity> {
        match self {
            Operation::LeftParen | Operation::RightParen => None,
            Operation::Add
            | Operation::Subtract
            | Operation::Multiply
            | Operation::Divide
            | Operation::Modulo
            | Operation::Power => Some(Arity::Binary),
            Operation::Positive
            | Operation::Negate
            | Operation::Abs
            | Operation::Floor
            | Operation::Ceil
            | Operation::Factorial
            | Operation::Sine
            | Operation::Cosine
            | Operation::Tangent
            | Operation::Cotangent => Some(Arity::Unary),
        }
    }

    /// Apply the operation.
    ///
    /// Unary operations read `operand` only; binary operations read
    /// `operand` as the left-hand side and `rhs` as the right-hand side.
    ///
    /// # Errors
    /// - `InvalidExpression` when a binary operation gets no right operand or
    ///   a parenthesis is applied
    /// - whatever the underlying arithmetic reports (`DivisionByZero`, `Domain`, ...)
    pub fn apply(
        self,
        operand: &DecimalValue,
        rhs: Option<&DecimalValue>,
        config: &EvaluatorConfig,
    ) -> EvalResult<DecimalValue> {
        let right = || {
            rhs.ok_or_else(|| {
                EvalError::invalid_expression(format!("{self:?} needs two operands"))
            })
        };

        match self {
            Operation::LeftParen | Operation::RightParen => Err(EvalError::invalid_expression(
                "parenthesis cannot be applied as an operator",
            )),
            Operation::Add => Ok(operand + right()?),
            Operation::Subtract => Ok(operand - right()?),
            Operation::Multiply => Ok(operand * right()?),
            Operation::Divide => {
                math::divide_with_decimals(operand, right()?, config.division_places)
            }
            Operation::Modulo => operand.checked_rem(right()?),
            Operation::Power => math::power(operand, right()?, config.division_places),
            Operation::Positive => Ok(operand.clone()),
            Operation::Negate => Ok(operand.negate()),
            Operation::Abs => Ok(operand.abs()),
            Operation::Floor => Ok(math::floor(operand)),
            Operation::Ceil => Ok(math::ceil(operand)),
            Operation::Factorial => math::factorial(operand),
            Operation::Sine => math::sine(operand, config.trig_places, config.trig_terms),
            Operation::Cosine => math::cosine(operand, config.trig_places, config.trig_terms),
            Operation::Tangent => math::tangent(operand, config.trig_places, config.trig_terms),
            Operation::Cotangent => {
                math::cotangent(operand, config.trig_places, config.trig_terms)
            }
        }
    }
}

/// An entry of the operator table: symbol, binding strength and operation.
///
/// Lower precedence numbers bind tighter; parentheses carry
/// [`PAREN_PRECEDENCE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Operator {
    pub symbol: &'static str,
    pub precedence: u16,
    pub operation: Operation,
}

impl Operator {
    pub const fn new(symbol: &'static str, precedence: u16, operation: Operation) -> Self {
        Self {
            symbol,
            precedence,
            operation,
        }
    }

    #[inline]
    pub fn arity(&self) -> Option<Arity> {
        self.operation.arity()
    }

    #[inline]
    pub fn is_unary(&self) -> bool {
        self.arity() == Some(Arity::Unary)
    }

    #[inline]
    pub fn is_binary(&self) -> bool {
        self.arity() == Some(Arity::Binary)
    }

    #[inline]
    pub fn is_left_paren(&self) -> bool {
        self.operation == Operation::LeftParen
    }

    #[inline]
    pub fn is_right_paren(&self) -> bool {
        self.operation == Operation::RightParen
    }

    /// See [`Operation::apply`].
    pub fn apply(
        &self,
        operand: &DecimalValue,
        rhs: Option<&DecimalValue>,
        config: &EvaluatorConfig,
    ) -> EvalResult<DecimalValue> {
        self.operation.apply(operand, rhs, config)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol)
    }
}
