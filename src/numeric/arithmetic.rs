// ============================================================================
// Decimal Arithmetic
// Digit-wise add/subtract/multiply, long division, rounding
// ============================================================================

use super::decimal_value::{cmp_magnitude, DecimalValue};
use super::errors::{EvalError, EvalResult};
use std::cmp::Ordering;
use std::ops::{Add, Mul, Neg, Sub};

/// Validate a decimal-place count.
///
/// # Errors
/// `ArgumentRange` for negative values.
pub(crate) fn places_arg(value: i64, argument: &'static str) -> EvalResult<usize> {
    if value < 0 {
        return Err(EvalError::ArgumentRange { argument, value });
    }
    usize::try_from(value).map_err(|_| EvalError::Overflow)
}

// ============================================================================
// Magnitude Helpers
// ============================================================================

/// Integral and fractional digits of both operands padded to common widths
/// and concatenated. Returns `(lhs, rhs, fractional_width)`.
fn aligned(a: &DecimalValue, b: &DecimalValue) -> (Vec<u8>, Vec<u8>, usize) {
    let int_width = a.integral.len().max(b.integral.len());
    let frac_width = a.fractional.len().max(b.fractional.len());

    let pad = |v: &DecimalValue| {
        let mut digits = Vec::with_capacity(int_width + frac_width);
        digits.resize(int_width - v.integral.len(), 0);
        digits.extend_from_slice(&v.integral);
        digits.extend_from_slice(&v.fractional);
        digits.resize(int_width + frac_width, 0);
        digits
    };

    (pad(a), pad(b), frac_width)
}

fn split_point(mut digits: Vec<u8>, frac_width: usize) -> DecimalValue {
    while digits.len() <= frac_width {
        digits.insert(0, 0);
    }
    let fractional = digits.split_off(digits.len() - frac_width);
    DecimalValue::from_parts(true, digits, fractional)
}

/// |a| + |b|
pub(crate) fn abs_sum(a: &DecimalValue, b: &DecimalValue) -> DecimalValue {
    let (x, y, frac_width) = aligned(a, b);

    let mut out = vec![0u8; x.len()];
    let mut carry = 0u8;
    for i in (0..x.len()).rev() {
        let sum = x[i] + y[i] + carry;
        out[i] = sum % 10;
        carry = sum / 10;
    }
    if carry > 0 {
        out.insert(0, carry);
    }

    split_point(out, frac_width)
}

/// ||a| - |b||
pub(crate) fn abs_diff(a: &DecimalValue, b: &DecimalValue) -> DecimalValue {
    let (larger, smaller) = match cmp_magnitude(a, b) {
        Ordering::Less => (b, a),
        _ => (a, b),
    };
    let (x, y, frac_width) = aligned(larger, smaller);

    let mut out = vec![0u8; x.len()];
    let mut borrow = 0u8;
    for i in (0..x.len()).rev() {
        let subtrahend = y[i] + borrow;
        if x[i] >= subtrahend {
            out[i] = x[i] - subtrahend;
            borrow = 0;
        } else {
            out[i] = x[i] + 10 - subtrahend;
            borrow = 1;
        }
    }

    split_point(out, frac_width)
}

/// `digits * factor` for a single decimal digit `factor`.
fn scale_digits(digits: &[u8], factor: u8) -> Vec<u8> {
    let mut out = Vec::with_capacity(digits.len() + 1);
    let mut carry = 0u8;
    for &d in digits.iter().rev() {
        let product = d * factor + carry;
        out.push(product % 10);
        carry = product / 10;
    }
    if carry > 0 {
        out.push(carry);
    }
    out.reverse();
    out
}

// ============================================================================
// Add / Subtract / Multiply
// ============================================================================

impl DecimalValue {
    fn add_ref(&self, rhs: &DecimalValue) -> DecimalValue {
        let magnitude = if self.non_negative == rhs.non_negative {
            abs_sum(self, rhs)
        } else {
            abs_diff(self, rhs)
        };

        // Result takes the sign of the larger-magnitude operand.
        let negative = match cmp_magnitude(self, rhs) {
            Ordering::Less => rhs.is_negative(),
            _ => self.is_negative(),
        };
        magnitude.into_signed(negative)
    }

    fn sub_ref(&self, rhs: &DecimalValue) -> DecimalValue {
        let magnitude = if self.non_negative == rhs.non_negative {
            abs_diff(self, rhs)
        } else {
            abs_sum(self, rhs)
        };

        let negative = match cmp_magnitude(self, rhs) {
            Ordering::Less => rhs.non_negative,
            _ => self.is_negative(),
        };
        magnitude.into_signed(negative)
    }

    /// Schoolbook multiplication.
    ///
    /// The operand with fewer non-zero digits drives the outer loop so that
    /// zero digits cost nothing.
    fn mul_ref(&self, rhs: &DecimalValue) -> DecimalValue {
        let lhs_digits: Vec<u8> = self.integral.iter().chain(&self.fractional).copied().collect();
        let rhs_digits: Vec<u8> = rhs.integral.iter().chain(&rhs.fractional).copied().collect();

        let non_zero = |digits: &[u8]| digits.iter().filter(|&&d| d != 0).count();
        let (outer, inner) = if non_zero(&lhs_digits) > non_zero(&rhs_digits) {
            (rhs_digits, lhs_digits)
        } else {
            (lhs_digits, rhs_digits)
        };

        let mut acc = DecimalValue::zero();
        for (shift, &digit) in outer.iter().rev().enumerate() {
            if digit == 0 {
                continue;
            }
            let mut partial = scale_digits(&inner, digit);
            partial.resize(partial.len() + shift, 0);
            acc = abs_sum(&acc, &DecimalValue::from_parts(true, partial, Vec::new()));
        }

        let places = self.fractional.len() + rhs.fractional.len();
        split_point(acc.integral, places).into_signed(self.non_negative != rhs.non_negative)
    }

    /// `self + 1`
    pub fn increment(&self) -> DecimalValue {
        self.add_ref(&DecimalValue::one())
    }

    /// `self - 1`
    pub fn decrement(&self) -> DecimalValue {
        self.sub_ref(&DecimalValue::one())
    }

    // ========================================================================
    // Decimal point shifts
    // ========================================================================

    /// Multiply by `10^places` exactly.
    pub(crate) fn scale_up(&self, places: usize) -> DecimalValue {
        let mut integral = self.integral.clone();
        let mut fractional = self.fractional.clone();
        let moved = places.min(fractional.len());
        integral.extend(fractional.drain(..moved));
        integral.resize(integral.len() + (places - moved), 0);
        DecimalValue::from_parts(self.non_negative, integral, fractional)
    }

    /// Divide by `10^places` exactly.
    pub(crate) fn scale_down(&self, places: usize) -> DecimalValue {
        let digits: Vec<u8> = self.integral.iter().chain(&self.fractional).copied().collect();
        split_point(digits, self.fractional.len() + places).into_signed(self.is_negative())
    }
}

impl Add for &DecimalValue {
    type Output = DecimalValue;

    fn add(self, rhs: &DecimalValue) -> DecimalValue {
        self.add_ref(rhs)
    }
}

impl Add for DecimalValue {
    type Output = DecimalValue;

    fn add(self, rhs: DecimalValue) -> DecimalValue {
        self.add_ref(&rhs)
    }
}

impl Sub for &DecimalValue {
    type Output = DecimalValue;

    fn sub(self, rhs: &DecimalValue) -> DecimalValue {
        self.sub_ref(rhs)
    }
}

impl Sub for DecimalValue {
    type Output = DecimalValue;

    fn sub(self, rhs: DecimalValue) -> DecimalValue {
        self.sub_ref(&rhs)
    }
}

impl Mul for &DecimalValue {
    type Output = DecimalValue;

    fn mul(self, rhs: &DecimalValue) -> DecimalValue {
        self.mul_ref(rhs)
    }
}

impl Mul for DecimalValue {
    type Output = DecimalValue;

    fn mul(self, rhs: DecimalValue) -> DecimalValue {
        self.mul_ref(&rhs)
    }
}

impl Neg for DecimalValue {
    type Output = DecimalValue;

    fn neg(self) -> DecimalValue {
        let negative = self.non_negative;
        self.into_signed(negative)
    }
}

impl Neg for &DecimalValue {
    type Output = DecimalValue;

    fn neg(self) -> DecimalValue {
        self.negate()
    }
}

// ============================================================================
// Division
// ============================================================================

/// Long division of a non-negative integer (given as digits) by a positive
/// integer. Returns `(quotient, remainder)`.
fn long_division(dividend: &[u8], divisor: &DecimalValue) -> (DecimalValue, DecimalValue) {
    let multiples: Vec<DecimalValue> = (0..10u8)
        .map(|d| {
            DecimalValue::from_parts(true, scale_digits(&divisor.integral, d), Vec::new())
        })
        .collect();

    let mut quotient = Vec::with_capacity(dividend.len());
    let mut remainder = DecimalValue::zero();
    for &digit in dividend {
        let mut trial = remainder.integral;
        trial.push(digit);
        let trial = DecimalValue::from_parts(true, trial, Vec::new());

        let q = multiples.iter().rposition(|m| *m <= trial).unwrap_or(0);
        quotient.push(q as u8);
        remainder = abs_diff(&trial, &multiples[q]);
    }

    (
        DecimalValue::from_parts(true, quotient, Vec::new()),
        remainder,
    )
}

impl DecimalValue {
    /// Magnitude quotient (truncated) and exact magnitude remainder.
    ///
    /// Both operands are shifted by the larger fractional width so the long
    /// division runs on integers; the remainder is shifted back afterwards.
    fn divide_magnitudes(&self, rhs: &DecimalValue) -> EvalResult<(DecimalValue, DecimalValue)> {
        if rhs.is_zero() {
            return Err(EvalError::DivisionByZero);
        }

        let shift = self.scale().max(rhs.scale());
        let dividend = self.abs().scale_up(shift);
        let divisor = rhs.abs().scale_up(shift);

        let (quotient, remainder) = long_division(&dividend.integral, &divisor);
        Ok((quotient, remainder.scale_down(shift)))
    }

    /// Floored division: `self = rhs * quotient + remainder`, where the
    /// remainder is zero or carries the divisor's sign.
    ///
    /// # Errors
    /// `DivisionByZero` when `rhs` is zero.
    ///
    /// # Example
    /// ```
    /// use decimal_evaluator::numeric::DecimalValue;
    ///
    /// let a: DecimalValue = "25".parse().unwrap();
    /// let b: DecimalValue = "-6".parse().unwrap();
    /// let (q, r) = a.div_rem(&b).unwrap();
    /// assert_eq!(q.to_string(), "-5");
    /// assert_eq!(r.to_string(), "-5");
    /// ```
    pub fn div_rem(&self, rhs: &DecimalValue) -> EvalResult<(DecimalValue, DecimalValue)> {
        let (quotient, remainder) = self.divide_magnitudes(rhs)?;

        if self.non_negative == rhs.non_negative {
            return Ok((quotient, remainder.into_signed(rhs.is_negative())));
        }

        if remainder.is_zero() {
            return Ok((quotient.into_signed(true), remainder));
        }

        let quotient = quotient.increment().into_signed(true);
        let remainder = abs_diff(rhs, &remainder).into_signed(rhs.is_negative());
        Ok((quotient, remainder))
    }

    /// Integer quotient, truncated toward zero.
    ///
    /// # Errors
    /// `DivisionByZero` when `rhs` is zero.
    pub fn checked_div(&self, rhs: &DecimalValue) -> EvalResult<DecimalValue> {
        let (quotient, _) = self.divide_magnitudes(rhs)?;
        Ok(quotient.into_signed(self.non_negative != rhs.non_negative))
    }

    /// Remainder of floored division; takes the divisor's sign.
    ///
    /// # Errors
    /// `DivisionByZero` when `rhs` is zero.
    pub fn checked_rem(&self, rhs: &DecimalValue) -> EvalResult<DecimalValue> {
        self.div_rem(rhs).map(|(_, remainder)| remainder)
    }

    // ========================================================================
    // Rounding
    // ========================================================================

    /// Round half-up (away from zero) to `places` fractional digits.
    ///
    /// # Errors
    /// `ArgumentRange` when `places` is negative.
    pub fn round(&self, places: i64) -> EvalResult<DecimalValue> {
        let keep = places_arg(places, "decimal places")?;
        if self.fractional.len() <= keep {
            return Ok(self.clone());
        }

        let truncated = DecimalValue::from_parts(
            true,
            self.integral.clone(),
            self.fractional[..keep].to_vec(),
        );

        let magnitude = if self.fractional[keep] >= 5 {
            let mut unit = vec![0u8; keep];
            match unit.last_mut() {
                Some(last) => *last = 1,
                None => return Ok(truncated.increment().into_signed(self.is_negative())),
            }
            abs_sum(&truncated, &DecimalValue::from_parts(true, vec![0], unit))
        } else {
            truncated
        };

        Ok(magnitude.into_signed(self.is_negative()))
    }

    /// Drop the fractional digits, keeping the sign.
    pub fn trunc(&self) -> DecimalValue {
        DecimalValue::from_parts(self.non_negative, self.integral.clone(), Vec::new())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn dv(s: &str) -> DecimalValue {
        s.parse().unwrap()
    }

    #[test]
    fn test_addition() {
        let cases = [
            ("999.001", "000.999", "1000"),
            ("-606.0606", "-404.0404", "-1010.101"),
            ("10101.01010", "-0909.0909", "9191.9192"),
            ("-5", "5", "0"),
            ("0.1", "0.2", "0.3"),
            ("-0.25", "0.05", "-0.2"),
            ("1", "-3", "-2"),
        ];
        for (a, b, expected) in cases {
            assert_eq!((dv(a) + dv(b)).to_string(), expected, "{a} + {b}");
        }
    }

    #[test]
    fn test_subtraction() {
        let cases = [
            ("1000", "0.001", "999.999"),
            ("1", "2", "-1"),
            ("-1", "-2", "1"),
            ("-1", "1", "-2"),
            ("0", "5.5", "-5.5"),
            ("12.5", "12.5", "0"),
        ];
        for (a, b, expected) in cases {
            assert_eq!((&dv(a) - &dv(b)).to_string(), expected, "{a} - {b}");
        }
    }

    #[test]
    fn test_multiplication() {
        let cases = [
            ("1234567890", "000090087650", "111219319975558500"),
            ("9870654.30210", "-012034.560789", "-118788989225.8268203569"),
            ("0.0001", "10", "0.001"),
            ("-3", "-4", "12"),
            ("0", "-12.5", "0"),
            ("2.5", "0.4", "1"),
        ];
        for (a, b, expected) in cases {
            assert_eq!((dv(a) * dv(b)).to_string(), expected, "{a} * {b}");
        }
    }

    #[test]
    fn test_increment_decrement() {
        assert_eq!(dv("9.5").increment().to_string(), "10.5");
        assert_eq!(dv("-0.5").increment().to_string(), "0.5");
        assert_eq!(dv("0").decrement().to_string(), "-1");
    }

    #[test]
    fn test_integer_division() {
        let cases = [
            ("4", "2", "2"),
            ("1000", "500", "2"),
            ("1024", "16", "64"),
            ("1000000000000000000000000000000", "10", "100000000000000000000000000000"),
            ("10.24", "0.000000000064", "160000000000"),
            ("7", "2", "3"),
            ("-7", "2", "-3"),
            ("1", "3", "0"),
        ];
        for (a, b, expected) in cases {
            assert_eq!(dv(a).checked_div(&dv(b)).unwrap().to_string(), expected, "{a} / {b}");
        }
    }

    #[test]
    fn test_modulus() {
        let cases = [
            ("25", "6", "1"),
            ("25", "-6", "-5"),
            ("-25", "6", "5"),
            ("-25", "-6", "-1"),
            ("25.7", "5.1", "0.2"),
            ("25.7", "-5.1", "-4.9"),
            ("-25.7", "5.1", "4.9"),
            ("-25.7", "-5.1", "-0.2"),
            ("24", "6", "0"),
            ("-24", "6", "0"),
        ];
        for (a, b, expected) in cases {
            assert_eq!(dv(a).checked_rem(&dv(b)).unwrap().to_string(), expected, "{a} % {b}");
        }
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(dv("1").checked_div(&dv("0")), Err(EvalError::DivisionByZero));
        assert_eq!(dv("1").checked_rem(&dv("0.000")), Err(EvalError::DivisionByZero));
        assert!(dv("0").div_rem(&dv("0")).is_err());
    }

    #[test]
    fn test_rounding() {
        let cases = [
            ("12.3456", 3, "12.346"),
            ("-12.3456", 3, "-12.346"),
            ("12.3456", 2, "12.35"),
            ("12.3446", 2, "12.34"),
            ("1.2", 0, "1"),
            ("1.5", 0, "2"),
            ("-1.5", 0, "-2"),
            ("9.995", 2, "10"),
            ("0.0004", 3, "0"),
            ("-0.0004", 3, "0"),
            ("7", 4, "7"),
        ];
        for (input, places, expected) in cases {
            assert_eq!(dv(input).round(places).unwrap().to_string(), expected, "{input} @ {places}");
        }
    }

    #[test]
    fn test_rounding_negative_places() {
        assert_eq!(
            dv("1.5").round(-1),
            Err(EvalError::ArgumentRange {
                argument: "decimal places",
                value: -1
            })
        );
    }

    #[test]
    fn test_scale_shifts() {
        assert_eq!(dv("12.345").scale_up(2).to_string(), "1234.5");
        assert_eq!(dv("0.5").scale_up(3).to_string(), "500");
        assert_eq!(dv("-1234.5").scale_down(5).to_string(), "-0.012345");
        assert_eq!(dv("12.34").trunc().to_string(), "12");
    }

    fn arb_decimal() -> impl Strategy<Value = DecimalValue> {
        ("-?[0-9]{1,12}", proptest::option::of("[0-9]{1,8}")).prop_map(|(int, frac)| {
            let text = match frac {
                Some(frac) => format!("{int}.{frac}"),
                None => int,
            };
            text.parse().unwrap()
        })
    }

    proptest! {
        #[test]
        fn prop_add_sub_inverse(a in arb_decimal(), b in arb_decimal()) {
            prop_assert_eq!(&(&a + &b) - &b, a);
        }

        #[test]
        fn prop_add_commutes(a in arb_decimal(), b in arb_decimal()) {
            prop_assert_eq!(&a + &b, &b + &a);
        }

        #[test]
        fn prop_additive_inverse(a in arb_decimal(), b in arb_decimal()) {
            prop_assert!((&a + &(-&a)).is_zero());
            prop_assert_eq!(&a - &b, &a + &(-&b));
        }

        #[test]
        fn prop_divide_then_multiply(a in arb_decimal(), b in arb_decimal()) {
            prop_assume!(!b.is_zero());
            let q = crate::numeric::math::divide_with_decimals(&a, &b, 12).unwrap();
            // |q*b - a| <= |b| * 0.5e-12
            let tolerance = &b.abs() * &DecimalValue::from_parts(true, vec![0], {
                let mut d = vec![0u8; 12];
                d.push(5);
                d
            });
            prop_assert!((&(&q * &b) - &a).abs() <= tolerance);
        }

        #[test]
        fn prop_mul_commutes(a in arb_decimal(), b in arb_decimal()) {
            prop_assert_eq!(&a * &b, &b * &a);
        }

        #[test]
        fn prop_div_rem_identity(a in arb_decimal(), b in arb_decimal()) {
            prop_assume!(!b.is_zero());
            let (q, r) = a.div_rem(&b).unwrap();
            prop_assert!(q.is_integer());
            prop_assert_eq!(&(&b * &q) + &r, a);
            prop_assert!(r.is_zero() || r.is_negative() == b.is_negative());
            prop_assert!(r.abs() < b.abs());
        }

        #[test]
        fn prop_round_is_close(a in arb_decimal(), places in 0i64..6) {
            let rounded = a.round(places).unwrap();
            prop_assert!(rounded.scale() <= places as usize);
            let half_unit = DecimalValue::from_parts(true, vec![0], {
                let mut d = vec![0u8; places as usize];
                d.push(5);
                d
            });
            prop_assert!((&rounded - &a).abs() <= half_unit);
        }
    }
}
