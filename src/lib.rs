// ============================================================================
// Decimal Evaluator Library
// Arbitrary-precision decimal arithmetic with an infix expression evaluator
// ============================================================================

//! # Decimal Evaluator
//!
//! Exact decimal arithmetic on numbers of any length, and an evaluator for
//! infix expressions over them.
//!
//! ## Features
//!
//! - **Arbitrary precision**: digits are stored explicitly, no floating point
//! - **Floored division** with remainder, division to N decimal places
//! - **Math functions**: `abs`, `floor`, `ceil`, `fact`, `pow`/`^`,
//!   `sin`, `cos`, `tan`, `cot` (radians, power series)
//! - **Shunting-yard parser** with unary `+`/`-` and implicit multiplication
//! - **Event hooks** for logging and auditing every evaluation stage
//!
//! ## Example
//!
//! ```rust
//! use decimal_evaluator::prelude::*;
//! use std::sync::Arc;
//!
//! // One-off evaluation with default precision
//! let value = decimal_evaluator::evaluate("2(3 + 4) - 10 mod 4").unwrap();
//! assert_eq!(value.to_string(), "12");
//!
//! // Configured evaluator
//! let evaluator = EvaluatorBuilder::new()
//!     .with_division_places(20)
//!     .with_event_handler(Arc::new(LoggingEvaluationHandler))
//!     .build()
//!     .unwrap();
//! assert_eq!(
//!     evaluator.evaluate("2299 / 66").unwrap().to_string(),
//!     "34.83333333333333333333"
//! );
//!
//! // Direct arithmetic
//! let a: DecimalValue = "0.1".parse().unwrap();
//! let b: DecimalValue = "0.2".parse().unwrap();
//! assert_eq!((a + b).to_string(), "0.3");
//! ```

pub mod domain;
pub mod engine;
pub mod interfaces;
pub mod numeric;

use numeric::{DecimalValue, EvalResult};

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{
        format_tokens, Arity, EvaluatorConfig, Operation, Operator, Token,
    };
    pub use crate::engine::{
        create_from_config, Evaluator, EvaluatorBuilder, IntegralError, OperatorTable,
    };
    pub use crate::interfaces::{
        EvaluationEvent, EvaluationHandler, EvaluationId, LoggingEvaluationHandler,
        NoOpEvaluationHandler,
    };
    pub use crate::numeric::{math, DecimalValue, ErrorKind, EvalError, EvalResult};
}

/// Evaluate an expression with the default configuration and the standard
/// operator table.
///
/// # Errors
/// Any [`EvalError`](numeric::EvalError) raised while tokenizing, reordering
/// or evaluating.
pub fn evaluate(expression: &str) -> EvalResult<DecimalValue> {
    engine::Evaluator::default().evaluate(expression)
}
