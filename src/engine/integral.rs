// ============================================================================
// Polynomial Integral
// Definite integral of c0 + c1*x + c2*x^2 + ... between two bounds
// ============================================================================

use crate::engine::Evaluator;
use crate::numeric::{math, DecimalValue, EvalError};
use thiserror::Error;

/// Failure of [`Evaluator::integrate_polynomial`], naming the input at fault
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegralError {
    #[error("polynomial has no coefficients")]
    EmptyPolynomial,

    #[error("error in lower bound: {0}")]
    LowerBound(#[source] EvalError),

    #[error("error in upper bound: {0}")]
    UpperBound(#[source] EvalError),

    #[error("error in coefficient of x^{index}: {source}")]
    Coefficient { index: usize, source: EvalError },
}

impl Evaluator {
    /// Definite integral of a polynomial.
    ///
    /// `coefficients[k]` is an expression for the coefficient of `x^k`; the
    /// bounds are expressions too. The result is
    /// `sum(c_k * (upper^(k + 1) - lower^(k + 1)) / (k + 1))` with each
    /// term divided once, rounded to the configured `division_places`.
    ///
    /// # Errors
    /// The first input that fails to evaluate, wrapped with its position.
    ///
    /// # Example
    /// ```
    /// use decimal_evaluator::prelude::*;
    ///
    /// let evaluator = Evaluator::default();
    /// // integral of 3x^2 from 0 to 2
    /// let area = evaluator.integrate_polynomial(&["0", "0", "3"], "0", "2").unwrap();
    /// assert_eq!(area.to_string(), "8");
    /// ```
    pub fn integrate_polynomial<S: AsRef<str>>(
        &self,
        coefficients: &[S],
        lower: &str,
        upper: &str,
    ) -> Result<DecimalValue, IntegralError> {
        if coefficients.is_empty() {
            return Err(IntegralError::EmptyPolynomial);
        }

        let upper = self.evaluate(upper).map_err(IntegralError::UpperBound)?;
        let lower = self.evaluate(lower).map_err(IntegralError::LowerBound)?;

        let mut total = DecimalValue::zero();
        let mut upper_power = upper.clone();
        let mut lower_power = lower.clone();

        for (index, expression) in coefficients.iter().enumerate() {
            let coefficient_error = |source| IntegralError::Coefficient { index, source };

            let coefficient = self
                .evaluate(expression.as_ref())
                .map_err(coefficient_error)?;
            let span = &coefficient * &(&upper_power - &lower_power);
            let term = math::divide_with_decimals(
                &span,
                &DecimalValue::from(index + 1),
                self.config().division_places,
            )
            .map_err(coefficient_error)?;

            total = &total + &term;

            upper_power = &upper_power * &upper;
            lower_power = &lower_power * &lower;
        }

        tracing::debug!(terms = coefficients.len(), "integrated polynomial to {}", total);
        Ok(total)
    }
}
