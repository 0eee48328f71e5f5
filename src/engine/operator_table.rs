// ============================================================================
// Operator Table
// Symbol lookup for every operator and function the evaluator understands
// ============================================================================

use crate::domain::{Operation, Operator, PAREN_PRECEDENCE};
use crate::numeric::{EvalError, EvalResult};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Standard operator set.
///
/// Lower precedence numbers bind tighter. Unary prefix functions sit at the
/// tightest levels, `pow` next, then `pos`/`neg`, the multiplicative group,
/// and finally `+`/`-`.
const STANDARD_OPERATORS: [Operator; 20] = [
    Operator::new("(", PAREN_PRECEDENCE, Operation::LeftParen),
    Operator::new(")", PAREN_PRECEDENCE, Operation::RightParen),
    Operator::new("+", 4, Operation::Add),
    Operator::new("-", 4, Operation::Subtract),
    Operator::new("*", 3, Operation::Multiply),
    Operator::new("/", 3, Operation::Divide),
    Operator::new("mod", 3, Operation::Modulo),
    Operator::new("%", 3, Operation::Modulo),
    Operator::new("pos", 2, Operation::Positive),
    Operator::new("neg", 2, Operation::Negate),
    Operator::new("pow", 1, Operation::Power),
    Operator::new("^", 1, Operation::Power),
    Operator::new("abs", 0, Operation::Abs),
    Operator::new("floor", 0, Operation::Floor),
    Operator::new("ceil", 0, Operation::Ceil),
    Operator::new("fact", 0, Operation::Factorial),
    Operator::new("sin", 0, Operation::Sine),
    Operator::new("cos", 0, Operation::Cosine),
    Operator::new("tan", 0, Operation::Tangent),
    Operator::new("cot", 0, Operation::Cotangent),
];

/// Immutable mapping from symbol to operator.
///
/// The standard table is built once per process and shared; customized
/// tables are produced by [`OperatorTable::with_precedence`].
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorTable {
    operators: HashMap<&'static str, Operator>,
}

impl OperatorTable {
    /// Shared standard table
    pub fn standard() -> Arc<OperatorTable> {
        static STANDARD: OnceLock<Arc<OperatorTable>> = OnceLock::new();
        STANDARD
            .get_or_init(|| Arc::new(Self::from_operators(&STANDARD_OPERATORS)))
            .clone()
    }

    fn from_operators(operators: &[Operator]) -> Self {
        Self {
            operators: operators.iter().map(|op| (op.symbol, *op)).collect(),
        }
    }

    /// Look up a symbol.
    #[inline]
    pub fn get(&self, symbol: &str) -> Option<Operator> {
        self.operators.get(symbol).copied()
    }

    /// Look up a symbol.
    ///
    /// # Errors
    /// `UnknownToken` when the symbol is not in the table.
    pub fn lookup(&self, symbol: &str) -> EvalResult<Operator> {
        self.get(symbol)
            .ok_or_else(|| EvalError::unknown_token(symbol))
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.operators.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }

    /// All operators, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Operator> {
        self.operators.values()
    }

    /// Copy of this table with a new precedence for `symbol` and every alias
    /// of the same operation.
    ///
    /// # Errors
    /// - `UnknownToken` when the symbol is not in the table
    /// - `Config` for parentheses, or a precedence at or above the
    ///   parenthesis level
    pub fn with_precedence(&self, symbol: &str, precedence: u16) -> EvalResult<OperatorTable> {
        let target = self.lookup(symbol)?;
        if target.is_left_paren() || target.is_right_paren() {
            return Err(EvalError::Config {
                reason: "parenthesis precedence is fixed".to_string(),
            });
        }
        if precedence >= PAREN_PRECEDENCE {
            return Err(EvalError::Config {
                reason: format!(
                    "precedence of {symbol:?} must be below {PAREN_PRECEDENCE}, got {precedence}"
                ),
            });
        }

        let mut table = self.clone();
        for op in table.operators.values_mut() {
            if op.operation == target.operation {
                op.precedence = precedence;
            }
        }
        Ok(table)
    }
}

impl Default for OperatorTable {
    fn default() -> Self {
        Self::from_operators(&STANDARD_OPERATORS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Arity;

    #[test]
    fn test_standard_table() {
        let table = OperatorTable::standard();
        assert_eq!(table.len(), STANDARD_OPERATORS.len());
        assert!(!table.is_empty());

        let plus = table.lookup("+").unwrap();
        assert_eq!(plus.precedence, 4);
        assert_eq!(plus.arity(), Some(Arity::Binary));

        assert_eq!(table.lookup("^").unwrap().operation, Operation::Power);
        assert_eq!(table.lookup("%").unwrap().operation, Operation::Modulo);
        assert_eq!(table.lookup("neg").unwrap().arity(), Some(Arity::Unary));
        assert_eq!(table.lookup("(").unwrap().precedence, PAREN_PRECEDENCE);
        assert!(table.iter().all(|op| table.contains(op.symbol)));
    }

    #[test]
    fn test_standard_table_is_shared() {
        let a = OperatorTable::standard();
        let b = OperatorTable::standard();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(*a, OperatorTable::default());
    }

    #[test]
    fn test_unknown_symbol() {
        let table = OperatorTable::standard();
        assert_eq!(table.lookup("sqrt"), Err(EvalError::unknown_token("sqrt")));
        assert!(table.get("").is_none());
    }

    #[test]
    fn test_with_precedence_updates_aliases() {
        let table = OperatorTable::standard().with_precedence("^", 5).unwrap();
        assert_eq!(table.lookup("^").unwrap().precedence, 5);
        assert_eq!(table.lookup("pow").unwrap().precedence, 5);
        assert_eq!(table.lookup("*").unwrap().precedence, 3);

        // the shared standard table is untouched
        assert_eq!(OperatorTable::standard().lookup("pow").unwrap().precedence, 1);
    }

    #[test]
    fn test_with_precedence_rejects() {
        let table = OperatorTable::standard();
        assert!(matches!(
            table.with_precedence("(", 3),
            Err(EvalError::Config { .. })
        ));
        assert!(matches!(
            table.with_precedence("+", PAREN_PRECEDENCE),
            Err(EvalError::Config { .. })
        ));
        assert_eq!(
            table.with_precedence("sqrt", 1),
            Err(EvalError::unknown_token("sqrt"))
        );
    }
}
