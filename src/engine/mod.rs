// ============================================================================
// Engine Module
// Contains the expression pipeline: tokenizer, shunting-yard, postfix
// evaluation and the evaluator that ties them together
// ============================================================================

mod evaluator;
mod integral;
mod operator_table;
mod postfix;
mod shunting_yard;
mod tokenizer;

pub mod factory;

pub use evaluator::Evaluator;
pub use factory::{create_from_config, EvaluatorBuilder};
pub use integral::IntegralError;
pub use operator_table::OperatorTable;
pub use postfix::evaluate_postfix;
pub use shunting_yard::to_postfix;
pub use tokenizer::Tokenizer;
