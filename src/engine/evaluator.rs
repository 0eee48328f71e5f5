// ============================================================================
// Evaluator
// Tokenize -> shunting-yard -> postfix evaluation
// ============================================================================

use crate::domain::{format_tokens, EvaluatorConfig, Token};
use crate::engine::operator_table::OperatorTable;
use crate::engine::postfix::evaluate_postfix;
use crate::engine::shunting_yard::to_postfix;
use crate::engine::tokenizer::Tokenizer;
use crate::interfaces::{
    EvaluationEvent, EvaluationHandler, EvaluationId, NoOpEvaluationHandler,
};
use crate::numeric::{DecimalValue, EvalError, EvalResult};
use chrono::Utc;
use std::sync::Arc;

/// Expression evaluator over [`DecimalValue`].
///
/// Holds no mutable state; one instance can serve any number of threads.
pub struct Evaluator {
    /// Precision settings shared by all operators
    config: EvaluatorConfig,

    /// Operator and function lookup
    table: Arc<OperatorTable>,

    /// Event handler for processing events
    event_handler: Arc<dyn EvaluationHandler>,
}

impl Evaluator {
    /// Create a new evaluator.
    ///
    /// The configuration is taken as-is; use
    /// [`EvaluatorBuilder`](crate::engine::EvaluatorBuilder) for validation.
    pub fn new(
        config: EvaluatorConfig,
        table: Arc<OperatorTable>,
        event_handler: Arc<dyn EvaluationHandler>,
    ) -> Self {
        Self {
            config,
            table,
            event_handler,
        }
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    pub fn operator_table(&self) -> &OperatorTable {
        &self.table
    }

    /// Tokenize an expression without evaluating it.
    pub fn tokenize(&self, expression: &str) -> EvalResult<Vec<Token>> {
        Tokenizer::new(&self.table).tokenize(expression)
    }

    /// Reorder infix tokens into postfix order.
    pub fn to_postfix(&self, infix: &[Token]) -> EvalResult<Vec<Token>> {
        to_postfix(infix)
    }

    /// Reduce postfix tokens to a value using this evaluator's precision.
    pub fn evaluate_postfix(&self, postfix: &[Token]) -> EvalResult<DecimalValue> {
        evaluate_postfix(postfix, &self.config)
    }

    /// Evaluate an infix expression.
    ///
    /// # Errors
    /// Any [`EvalError`]; the first failing stage aborts the evaluation.
    ///
    /// # Example
    /// ```
    /// use decimal_evaluator::prelude::*;
    ///
    /// let evaluator = Evaluator::default();
    /// assert_eq!(evaluator.evaluate("2(3 + 4) - 1").unwrap().to_string(), "13");
    /// ```
    pub fn evaluate(&self, expression: &str) -> EvalResult<DecimalValue> {
        let id = EvaluationId::new();
        self.emit(|| EvaluationEvent::Received {
            evaluation_id: id,
            expression: expression.to_string(),
            timestamp: Utc::now(),
        });

        let result = self.run(id, expression);

        match &result {
            Ok(value) => {
                tracing::debug!(evaluation_id = %id, "evaluated to {}", value);
                self.emit(|| EvaluationEvent::Evaluated {
                    evaluation_id: id,
                    result: value.clone(),
                    timestamp: Utc::now(),
                });
            }
            Err(error) => {
                tracing::debug!(evaluation_id = %id, "evaluation failed: {}", error);
                self.emit(|| EvaluationEvent::Failed {
                    evaluation_id: id,
                    kind: error.kind(),
                    message: error.to_string(),
                    timestamp: Utc::now(),
                });
            }
        }

        result
    }

    fn run(&self, id: EvaluationId, expression: &str) -> EvalResult<DecimalValue> {
        if let Some(limit) = self.config.max_expression_len {
            let len = expression.chars().count();
            if len > limit {
                return Err(EvalError::invalid_expression(format!(
                    "expression has {len} characters, limit is {limit}"
                )));
            }
        }

        let infix = self.tokenize(expression)?;
        tracing::debug!(evaluation_id = %id, tokens = infix.len(), "tokenized");
        self.emit(|| EvaluationEvent::Tokenized {
            evaluation_id: id,
            tokens: format_tokens(&infix),
            token_count: infix.len(),
            timestamp: Utc::now(),
        });

        let postfix = self.to_postfix(&infix)?;
        tracing::trace!(evaluation_id = %id, "postfix: {}", format_tokens(&postfix));
        self.emit(|| EvaluationEvent::ConvertedToPostfix {
            evaluation_id: id,
            postfix: format_tokens(&postfix),
            timestamp: Utc::now(),
        });

        self.evaluate_postfix(&postfix)
    }

    /// Build and deliver an event, skipping the work for disabled handlers.
    fn emit(&self, event: impl FnOnce() -> EvaluationEvent) {
        if self.event_handler.is_enabled() {
            self.event_handler.on_event(event());
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(
            EvaluatorConfig::default(),
            OperatorTable::standard(),
            Arc::new(NoOpEvaluationHandler),
        )
    }
}
