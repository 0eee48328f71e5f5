// ============================================================================
// Evaluator Factory
// Creates evaluators with validated configuration
// ============================================================================

use crate::domain::EvaluatorConfig;
use crate::engine::{Evaluator, OperatorTable};
use crate::interfaces::{EvaluationHandler, NoOpEvaluationHandler};
use crate::numeric::EvalResult;
use std::sync::Arc;

// ============================================================================
// Factory Functions
// ============================================================================

/// Creates an evaluator from configuration using the standard operator table
///
/// # Arguments
/// * `config` - Precision and limit settings
/// * `event_handler` - Event handler for evaluation events
///
/// # Returns
/// * `EvalResult<Evaluator>` - Configured evaluator or the validation error
///
/// # Example
/// ```
/// use decimal_evaluator::prelude::*;
/// use std::sync::Arc;
///
/// let config = EvaluatorConfig::extended();
/// let evaluator = create_from_config(config, Arc::new(NoOpEvaluationHandler)).unwrap();
/// assert_eq!(evaluator.evaluate("1 / 4").unwrap().to_string(), "0.25");
/// ```
pub fn create_from_config(
    config: EvaluatorConfig,
    event_handler: Arc<dyn EvaluationHandler>,
) -> EvalResult<Evaluator> {
    config.validate()?;
    Ok(Evaluator::new(config, OperatorTable::standard(), event_handler))
}

// ============================================================================
// Builder Pattern for Advanced Configuration
// ============================================================================

/// Builder for creating evaluators with fluent API
///
/// # Example
/// ```
/// use decimal_evaluator::prelude::*;
/// use std::sync::Arc;
///
/// let evaluator = EvaluatorBuilder::new()
///     .with_division_places(4)
///     .with_precedence("+", 2)
///     .with_event_handler(Arc::new(LoggingEvaluationHandler))
///     .build()
///     .unwrap();
/// assert_eq!(evaluator.evaluate("2 / 3").unwrap().to_string(), "0.6667");
/// ```
pub struct EvaluatorBuilder {
    config: EvaluatorConfig,
    precedence_overrides: Vec<(String, u16)>,
    event_handler: Option<Arc<dyn EvaluationHandler>>,
}

impl EvaluatorBuilder {
    /// Create a new builder with default precision
    pub fn new() -> Self {
        Self::from_config(EvaluatorConfig::default())
    }

    /// Start from an existing configuration
    pub fn from_config(config: EvaluatorConfig) -> Self {
        Self {
            config,
            precedence_overrides: Vec::new(),
            event_handler: None,
        }
    }

    // ========================================================================
    // Precision Configuration
    // ========================================================================

    /// Set fractional digits kept by `/` and negative powers
    pub fn with_division_places(mut self, places: i64) -> Self {
        self.config.division_places = places;
        self
    }

    /// Set fractional digits of trigonometric results
    pub fn with_trig_places(mut self, places: i64) -> Self {
        self.config.trig_places = places;
        self
    }

    /// Set the number of cosine series terms
    pub fn with_trig_terms(mut self, terms: usize) -> Self {
        self.config.trig_terms = terms;
        self
    }

    /// Set maximum expression length
    pub fn with_max_expression_len(mut self, len: usize) -> Self {
        self.config.max_expression_len = Some(len);
        self
    }

    // ========================================================================
    // Operator Table Configuration
    // ========================================================================

    /// Change the precedence of an operator (and its aliases).
    /// Checked when the evaluator is built.
    pub fn with_precedence(mut self, symbol: impl Into<String>, precedence: u16) -> Self {
        self.precedence_overrides.push((symbol.into(), precedence));
        self
    }

    /// Set the event handler (defaults to [`NoOpEvaluationHandler`])
    pub fn with_event_handler(mut self, handler: Arc<dyn EvaluationHandler>) -> Self {
        self.event_handler = Some(handler);
        self
    }

    // ========================================================================
    // Preset Configurations
    // ========================================================================

    /// Apply desktop-calculator precision
    pub fn reference_precision() -> Self {
        Self::from_config(EvaluatorConfig::reference())
    }

    /// Apply high precision
    pub fn extended_precision() -> Self {
        Self::from_config(EvaluatorConfig::extended())
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Validate the configuration and build the evaluator
    ///
    /// # Errors
    /// - `ArgumentRange`/`Config` from [`EvaluatorConfig::validate`]
    /// - `UnknownToken`/`Config` from an invalid precedence override
    pub fn build(self) -> EvalResult<Evaluator> {
        self.config.validate()?;

        let table = if self.precedence_overrides.is_empty() {
            OperatorTable::standard()
        } else {
            let mut table = OperatorTable::standard().as_ref().clone();
            for (symbol, precedence) in &self.precedence_overrides {
                table = table.with_precedence(symbol, *precedence)?;
            }
            Arc::new(table)
        };

        let handler = self
            .event_handler
            .unwrap_or_else(|| Arc::new(NoOpEvaluationHandler));

        Ok(Evaluator::new(self.config, table, handler))
    }

    /// Get the configuration without building (for inspection)
    pub fn get_config(&self) -> &EvaluatorConfig {
        &self.config
    }
}

impl Default for EvaluatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
