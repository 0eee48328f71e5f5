// ============================================================================
// Shunting-Yard
// Infix token sequence -> postfix token sequence
// ============================================================================

use crate::domain::{Operator, Token};
use crate::numeric::{EvalError, EvalResult};
use smallvec::SmallVec;

/// Reorder an infix token sequence into postfix order.
///
/// Binary operators pop every stacked operator whose precedence number is
/// less than or equal to their own (lower numbers bind tighter), which makes
/// all binary operators left-associative. Unary prefix operators are pushed
/// without popping since their operand has not been read yet.
///
/// # Errors
/// `MismatchedParenthesis` for a `)` without an opener or an unclosed `(`.
///
/// # Example
/// ```
/// use decimal_evaluator::domain::format_tokens;
/// use decimal_evaluator::engine::{to_postfix, OperatorTable, Tokenizer};
///
/// let table = OperatorTable::standard();
/// let infix = Tokenizer::new(&table).tokenize("1 + 2 * 3").unwrap();
/// assert_eq!(format_tokens(&to_postfix(&infix).unwrap()), "1 2 3 * +");
/// ```
pub fn to_postfix(infix: &[Token]) -> EvalResult<Vec<Token>> {
    let mut output = Vec::with_capacity(infix.len());
    let mut stack: SmallVec<[Operator; 16]> = SmallVec::new();

    for token in infix {
        let op = match token {
            Token::Literal(_) => {
                output.push(token.clone());
                continue;
            }
            Token::Operator(op) => *op,
        };

        if op.is_left_paren() || op.is_unary() {
            stack.push(op);
        } else if op.is_right_paren() {
            loop {
                match stack.pop() {
                    Some(top) if top.is_left_paren() => break,
                    Some(top) => output.push(Token::Operator(top)),
                    None => return Err(EvalError::MismatchedParenthesis),
                }
            }
        } else {
            while let Some(&top) = stack.last() {
                if top.is_left_paren() || top.precedence > op.precedence {
                    break;
                }
                output.push(Token::Operator(top));
                stack.pop();
            }
            stack.push(op);
        }
    }

    while let Some(top) = stack.pop() {
        if top.is_left_paren() {
            return Err(EvalError::MismatchedParenthesis);
        }
        output.push(Token::Operator(top));
    }

    Ok(output)
}
