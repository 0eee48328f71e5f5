// ============================================================================
// Tokenizer
// Raw expression text -> infix token sequence
// ============================================================================

use crate::domain::Token;
use crate::engine::operator_table::OperatorTable;
use crate::numeric::{DecimalValue, EvalResult};

/// Character classes; a token is a maximal run of one class
/// (symbols are always single characters).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Whitespace,
    Numeral,
    Word,
    Symbol,
}

impl CharClass {
    fn of(c: char) -> Self {
        if c.is_whitespace() {
            CharClass::Whitespace
        } else if c.is_ascii_digit() || c == '.' {
            CharClass::Numeral
        } else if c.is_ascii_lowercase() {
            CharClass::Word
        } else {
            CharClass::Symbol
        }
    }
}

/// Splits expressions into literals and operators of one operator table.
///
/// Input is case-insensitive. `+`/`-` become the unary `pos`/`neg` unless they
/// follow a literal or `)`, and a `*` is inserted wherever juxtaposition
/// implies multiplication: `2(3)`, `(2)(3)`, `2sin(1)`, `(2)3`.
pub struct Tokenizer<'t> {
    table: &'t OperatorTable,
}

impl<'t> Tokenizer<'t> {
    pub fn new(table: &'t OperatorTable) -> Self {
        Self { table }
    }

    /// Tokenize an expression.
    ///
    /// # Errors
    /// - `Format` for a malformed numeral (`1.2.3`, `5.`)
    /// - `UnknownToken` for a word or symbol missing from the table
    pub fn tokenize(&self, expression: &str) -> EvalResult<Vec<Token>> {
        let lowered = expression.to_lowercase();

        let mut tokens = Vec::new();
        let mut pending = String::new();
        let mut pending_class = CharClass::Whitespace;

        for c in lowered.chars() {
            let class = CharClass::of(c);
            if class != pending_class || class == CharClass::Symbol {
                self.flush(pending_class, &pending, &mut tokens)?;
                pending.clear();
                pending_class = class;
            }
            if class != CharClass::Whitespace {
                pending.push(c);
            }
        }
        self.flush(pending_class, &pending, &mut tokens)?;

        let tokens = self.insert_implicit_multiplication(tokens)?;
        tracing::trace!(count = tokens.len(), "tokenized {:?}", expression);
        Ok(tokens)
    }

    fn flush(&self, class: CharClass, text: &str, tokens: &mut Vec<Token>) -> EvalResult<()> {
        if text.is_empty() {
            return Ok(());
        }

        match class {
            CharClass::Whitespace => {}
            CharClass::Numeral => {
                tokens.push(Token::Literal(text.parse::<DecimalValue>()?));
            }
            CharClass::Word | CharClass::Symbol => {
                let follows_operand = tokens.last().is_some_and(Token::ends_operand);
                let symbol = match text {
                    "+" if !follows_operand => "pos",
                    "-" if !follows_operand => "neg",
                    other => other,
                };
                tokens.push(Token::Operator(self.table.lookup(symbol)?));
            }
        }
        Ok(())
    }

    fn insert_implicit_multiplication(&self, tokens: Vec<Token>) -> EvalResult<Vec<Token>> {
        let multiply = self.table.lookup("*")?;

        let mut out = Vec::with_capacity(tokens.len() * 2);
        for token in tokens {
            if out.last().is_some_and(Token::ends_operand) && token.starts_operand() {
                out.push(Token::Operator(multiply));
            }
            out.push(token);
        }
        Ok(out)
    }
}
