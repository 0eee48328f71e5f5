// ============================================================================
// Postfix Evaluator
// Stack machine reducing a postfix token sequence to one value
// ============================================================================

use crate::domain::{Arity, EvaluatorConfig, Token};
use crate::numeric::{DecimalValue, EvalError, EvalResult};
use smallvec::SmallVec;

fn missing_operand(symbol: &str) -> EvalError {
    EvalError::invalid_expression(format!("missing operand for {symbol:?}"))
}

/// Evaluate a postfix token sequence.
///
/// # Errors
/// - `InvalidExpression` when an operator lacks operands or more than one
///   value is left over (including the empty sequence)
/// - any arithmetic error raised by an operator
pub fn evaluate_postfix(postfix: &[Token], config: &EvaluatorConfig) -> EvalResult<DecimalValue> {
    let mut stack: SmallVec<[DecimalValue; 16]> = SmallVec::new();

    for token in postfix {
        let op = match token {
            Token::Literal(value) => {
                stack.push(value.clone());
                continue;
            }
            Token::Operator(op) => op,
        };

        let value = match op.arity() {
            Some(Arity::Unary) => {
                let operand = stack.pop().ok_or_else(|| missing_operand(op.symbol))?;
                op.apply(&operand, None, config)?
            }
            Some(Arity::Binary) => {
                let rhs = stack.pop().ok_or_else(|| missing_operand(op.symbol))?;
                let lhs = stack.pop().ok_or_else(|| missing_operand(op.symbol))?;
                op.apply(&lhs, Some(&rhs), config)?
            }
            None => {
                return Err(EvalError::invalid_expression(format!(
                    "unexpected {:?} in postfix sequence",
                    op.symbol
                )))
            }
        };
        stack.push(value);
    }

    match (stack.pop(), stack.is_empty()) {
        (Some(result), true) => Ok(result),
        (None, _) => Err(EvalError::invalid_expression("nothing to evaluate")),
        (Some(_), false) => Err(EvalError::invalid_expression(format!(
            "{} values left without an operator",
            stack.len() + 1
        ))),
    }
}
