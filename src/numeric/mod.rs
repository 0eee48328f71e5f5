// ============================================================================
// Numeric Module
// Arbitrary-precision decimal arithmetic
// ============================================================================
//
// This module provides:
// - DecimalValue: signed decimal with unbounded digit sequences
// - Arithmetic: add, subtract, multiply, floored division and remainder
// - math: division to N places, floor/ceil, factorial, power, trigonometry
// - EvalError: error types shared with the expression pipeline
//
// Design principles:
// - No floating-point operations
// - Values are immutable and always in canonical form
// - Fallible operations return Result (no panics)

mod arithmetic;
mod decimal_value;
mod errors;
pub mod math;

pub use decimal_value::DecimalValue;
pub use errors::{ErrorKind, EvalError, EvalResult};
