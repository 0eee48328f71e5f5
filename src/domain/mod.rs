// ============================================================================
// Domain Models Module
// Operators, tokens and evaluator configuration
// ============================================================================

pub mod config;
pub mod operator;
pub mod token;

pub use config::EvaluatorConfig;
pub use operator::{Arity, Operation, Operator, PAREN_PRECEDENCE};
pub use token::{format_tokens, Token};
