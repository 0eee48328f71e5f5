// ============================================================================
// Evaluator Configuration
// Precision settings and limits for expression evaluation
// ============================================================================

use crate::numeric::{EvalError, EvalResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default fractional digits kept by the `/` operator and negative powers.
pub const DEFAULT_DIVISION_PLACES: i64 = 10;

/// Default fractional digits of trigonometric results.
pub const DEFAULT_TRIG_PLACES: i64 = 10;

/// Default number of Taylor-series terms for cosine (and everything derived
/// from it).
pub const DEFAULT_TRIG_TERMS: usize = 20;

/// Precision and limit settings shared by all operators of an evaluator.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EvaluatorConfig {
    /// Fractional digits kept by `/` and by negative-exponent `pow`
    pub division_places: i64,

    /// Fractional digits of `sin`, `cos`, `tan` and `cot` results
    pub trig_places: i64,

    /// Taylor-series terms summed for cosine (leading `1` included)
    pub trig_terms: usize,

    /// Optional: reject expressions longer than this many characters.
    /// None means no limit
    pub max_expression_len: Option<usize>,
}

impl EvaluatorConfig {
    pub fn new() -> Self {
        Self {
            division_places: DEFAULT_DIVISION_PLACES,
            trig_places: DEFAULT_TRIG_PLACES,
            trig_terms: DEFAULT_TRIG_TERMS,
            max_expression_len: None,
        }
    }

    /// Builder method: Set division places
    pub fn with_division_places(mut self, places: i64) -> Self {
        self.division_places = places;
        self
    }

    /// Builder method: Set trigonometric places
    pub fn with_trig_places(mut self, places: i64) -> Self {
        self.trig_places = places;
        self
    }

    /// Builder method: Set the number of series terms
    pub fn with_trig_terms(mut self, terms: usize) -> Self {
        self.trig_terms = terms;
        self
    }

    /// Builder method: Set maximum expression length
    pub fn with_max_expression_len(mut self, len: usize) -> Self {
        self.max_expression_len = Some(len);
        self
    }

    /// Validate the configuration
    ///
    /// # Errors
    /// - `ArgumentRange` for negative place counts
    /// - `Config` for a zero term count or a zero length limit
    pub fn validate(&self) -> EvalResult<()> {
        if self.division_places < 0 {
            return Err(EvalError::ArgumentRange {
                argument: "division places",
                value: self.division_places,
            });
        }

        if self.trig_places < 0 {
            return Err(EvalError::ArgumentRange {
                argument: "trigonometric places",
                value: self.trig_places,
            });
        }

        if self.trig_terms == 0 {
            return Err(EvalError::Config {
                reason: "trigonometric series needs at least one term".to_string(),
            });
        }

        if self.max_expression_len == Some(0) {
            return Err(EvalError::Config {
                reason: "maximum expression length must be positive".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Preset Configurations (Factory Methods)
// ============================================================================

impl EvaluatorConfig {
    /// Desktop-calculator precision
    /// - 10 places for division
    /// - 3 places for trigonometry, 10 series terms
    pub fn reference() -> Self {
        Self::new().with_trig_places(3).with_trig_terms(10)
    }

    /// High precision
    /// - 30 places for division
    /// - 20 places for trigonometry, 30 series terms
    pub fn extended() -> Self {
        Self::new()
            .with_division_places(30)
            .with_trig_places(20)
            .with_trig_terms(30)
    }
}
