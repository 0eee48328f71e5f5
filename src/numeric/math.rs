// ============================================================================
// Derived Decimal Math
// Division to N places, floor/ceil, factorial, power, trigonometry
// ============================================================================

use super::arithmetic::places_arg;
use super::decimal_value::DecimalValue;
use super::errors::{EvalError, EvalResult};
use std::sync::OnceLock;

/// Extra digits carried through the trigonometric series before the final
/// rounding.
const TRIG_GUARD_PLACES: i64 = 10;

const PI_INT: &str = "3";
const PI_FRAC: &str = "14159265358979323846264338327950288419716939937510";
const TWO_PI_INT: &str = "6";
const TWO_PI_FRAC: &str = "28318530717958647692528676655900576839433879875021";
const HALF_PI_INT: &str = "1";
const HALF_PI_FRAC: &str = "57079632679489661923132169163975144209858469968755";

/// π to 50 fractional digits.
pub fn pi() -> &'static DecimalValue {
    static PI: OnceLock<DecimalValue> = OnceLock::new();
    PI.get_or_init(|| DecimalValue::from_digit_str(true, PI_INT, PI_FRAC))
}

fn two_pi() -> &'static DecimalValue {
    static TWO_PI: OnceLock<DecimalValue> = OnceLock::new();
    TWO_PI.get_or_init(|| DecimalValue::from_digit_str(true, TWO_PI_INT, TWO_PI_FRAC))
}

fn half_pi() -> &'static DecimalValue {
    static HALF_PI: OnceLock<DecimalValue> = OnceLock::new();
    HALF_PI.get_or_init(|| DecimalValue::from_digit_str(true, HALF_PI_INT, HALF_PI_FRAC))
}

// ============================================================================
// Division and integer rounding
// ============================================================================

/// `n / n1` rounded half-up to `places` fractional digits.
///
/// One guard digit is computed past `places` and then rounded away.
///
/// # Errors
/// - `ArgumentRange` when `places` is negative
/// - `DivisionByZero` when `n1` is zero
///
/// # Example
/// ```
/// use decimal_evaluator::numeric::{math, DecimalValue};
///
/// let two: DecimalValue = "2".parse().unwrap();
/// let three: DecimalValue = "3".parse().unwrap();
/// assert_eq!(math::divide_with_decimals(&two, &three, 4).unwrap().to_string(), "0.6667");
/// ```
pub fn divide_with_decimals(
    n: &DecimalValue,
    n1: &DecimalValue,
    places: i64,
) -> EvalResult<DecimalValue> {
    let guarded = places_arg(places, "decimal places")? + 1;
    if n1.is_zero() {
        return Err(EvalError::DivisionByZero);
    }

    let quotient = n.scale_up(guarded).checked_div(n1)?;
    quotient.scale_down(guarded).round(places)
}

/// Largest integer not greater than `n`.
pub fn floor(n: &DecimalValue) -> DecimalValue {
    let truncated = n.trunc();
    if n.is_negative() && !n.is_integer() {
        truncated.decrement()
    } else {
        truncated
    }
}

/// Smallest integer not less than `n`.
pub fn ceil(n: &DecimalValue) -> DecimalValue {
    let truncated = n.trunc();
    if !n.is_negative() && !n.is_integer() {
        truncated.increment()
    } else {
        truncated
    }
}

// ============================================================================
// Factorial and power
// ============================================================================

/// `n!` for non-negative integers.
///
/// # Errors
/// `Domain` for negative or fractional `n`.
pub fn factorial(n: &DecimalValue) -> EvalResult<DecimalValue> {
    if n.is_negative() || !n.is_integer() {
        return Err(EvalError::domain(
            "factorial is only defined for zero and positive integers",
        ));
    }

    let mut result = DecimalValue::one();
    let mut i = DecimalValue::one();
    while i <= *n {
        result = &result * &i;
        i = i.increment();
    }
    Ok(result)
}

/// `base` raised to an integer `exponent`.
///
/// Non-negative exponents use square-and-multiply; negative exponents return
/// `1 / base^|exponent|` rounded to `places`.
///
/// # Errors
/// - `Domain` for `0^0` or a fractional exponent
/// - `DivisionByZero` for zero raised to a negative exponent
pub fn power(base: &DecimalValue, exponent: &DecimalValue, places: i64) -> EvalResult<DecimalValue> {
    if !exponent.is_integer() {
        return Err(EvalError::domain("decimal exponents are not supported"));
    }
    if base.is_zero() && exponent.is_zero() {
        return Err(EvalError::domain("zero raised to zero is undefined"));
    }

    if exponent.is_negative() {
        let positive = integer_power(base, &exponent.abs())?;
        return divide_with_decimals(&DecimalValue::one(), &positive, places);
    }
    integer_power(base, exponent)
}

fn integer_power(base: &DecimalValue, exponent: &DecimalValue) -> EvalResult<DecimalValue> {
    let two = DecimalValue::from(2u32);
    let mut result = DecimalValue::one();
    let mut factor = base.clone();
    let mut remaining = exponent.clone();

    while !remaining.is_zero() {
        let (half, bit) = remaining.div_rem(&two)?;
        if !bit.is_zero() {
            result = &result * &factor;
        }
        remaining = half;
        if !remaining.is_zero() {
            factor = &factor * &factor;
        }
    }
    Ok(result)
}

// ============================================================================
// Trigonometry (radians)
// ============================================================================

/// Reduce an angle into `(-π, π]`.
fn reduce_angle(x: &DecimalValue) -> EvalResult<DecimalValue> {
    let (_, reduced) = x.div_rem(two_pi())?;
    if reduced > *pi() {
        Ok(&reduced - two_pi())
    } else {
        Ok(reduced)
    }
}

/// `places` plus the guard digits carried through a series evaluation.
fn guarded(places: i64) -> EvalResult<i64> {
    places_arg(places, "trigonometric places")?;
    places
        .checked_add(TRIG_GUARD_PLACES)
        .ok_or(EvalError::ArgumentRange {
            argument: "trigonometric places",
            value: places,
        })
}

/// Cosine via its Taylor series, summing `terms` terms (the leading `1`
/// included) at `places + 10` digits and rounding the sum to `places`.
///
/// # Errors
/// `ArgumentRange` when `places` is negative or too large to carry guard
/// digits.
pub fn cosine(x: &DecimalValue, places: i64, terms: usize) -> EvalResult<DecimalValue> {
    let working = guarded(places)?;

    let reduced = reduce_angle(x)?;
    let square = (&reduced * &reduced).round(working)?;

    let mut sum = DecimalValue::one();
    let mut term = DecimalValue::one();
    for k in 1..terms {
        let denominator = DecimalValue::from((2 * k - 1) * (2 * k));
        term = divide_with_decimals(&(&term * &square), &denominator, working)?;
        if term.is_zero() {
            break;
        }
        sum = if k % 2 == 1 { &sum - &term } else { &sum + &term };
    }

    sum.round(places)
}

/// `sin(x) = cos(π/2 - x)`
pub fn sine(x: &DecimalValue, places: i64, terms: usize) -> EvalResult<DecimalValue> {
    cosine(&(half_pi() - x), places, terms)
}

/// `sin(x) / cos(x)`
///
/// Both factors keep guard digits so only the quotient is rounded.
///
/// # Errors
/// `DivisionByZero` when the cosine vanishes at the guarded precision.
pub fn tangent(x: &DecimalValue, places: i64, terms: usize) -> EvalResult<DecimalValue> {
    let working = guarded(places)?;
    let sin = sine(x, working, terms)?;
    let cos = cosine(x, working, terms)?;
    divide_with_decimals(&sin, &cos, places)
}

/// `cos(x) / sin(x)`
///
/// # Errors
/// `DivisionByZero` when the sine vanishes at the guarded precision.
pub fn cotangent(x: &DecimalValue, places: i64, terms: usize) -> EvalResult<DecimalValue> {
    let working = guarded(places)?;
    let sin = sine(x, working, terms)?;
    let cos = cosine(x, working, terms)?;
    divide_with_decimals(&cos, &sin, places)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;

    fn dv(s: &str) -> DecimalValue {
        s.parse().unwrap()
    }

    fn assert_close(actual: &DecimalValue, expected: &str, tolerance: &str) {
        let diff = (actual - &dv(expected)).abs();
        assert!(
            diff <= dv(tolerance),
            "{actual} differs from {expected} by more than {tolerance}"
        );
    }

    #[test]
    fn test_divide_with_decimals() {
        let cases = [
            ("2299", "66", 20, "34.83333333333333333333"),
            ("2", "3", 10, "0.6666666667"),
            ("1", "8", 2, "0.13"),
            ("-1", "8", 2, "-0.13"),
            ("10", "4", 0, "3"),
            ("1", "3", 0, "0"),
            ("-7.5", "-2.5", 5, "3"),
            ("0", "7", 5, "0"),
        ];
        for (a, b, places, expected) in cases {
            assert_eq!(
                divide_with_decimals(&dv(a), &dv(b), places).unwrap().to_string(),
                expected,
                "{a} / {b} @ {places}"
            );
        }
    }

    #[test]
    fn test_divide_with_decimals_errors() {
        assert_eq!(
            divide_with_decimals(&dv("1"), &dv("0"), 5),
            Err(EvalError::DivisionByZero)
        );
        assert!(matches!(
            divide_with_decimals(&dv("1"), &dv("2"), -1),
            Err(EvalError::ArgumentRange { value: -1, .. })
        ));
    }

    #[test]
    fn test_floor_ceil() {
        let cases = [
            ("1.5", "1", "2"),
            ("-1.5", "-2", "-1"),
            ("3", "3", "3"),
            ("-3", "-3", "-3"),
            ("0.0001", "0", "1"),
            ("-0.0001", "-1", "0"),
        ];
        for (input, expected_floor, expected_ceil) in cases {
            assert_eq!(floor(&dv(input)).to_string(), expected_floor, "floor {input}");
            assert_eq!(ceil(&dv(input)).to_string(), expected_ceil, "ceil {input}");
        }
    }

    #[test]
    fn test_factorial() {
        let cases = [
            ("0", "1"),
            ("1", "1"),
            ("5", "120"),
            ("20", "2432902008176640000"),
            ("29", "8841761993739701954543616000000"),
        ];
        for (input, expected) in cases {
            assert_eq!(factorial(&dv(input)).unwrap().to_string(), expected, "{input}!");
        }
    }

    #[test]
    fn test_factorial_domain() {
        for input in ["-1", "1.1", "-1.1"] {
            assert!(
                matches!(factorial(&dv(input)), Err(EvalError::Domain { .. })),
                "{input}!"
            );
        }
    }

    #[test]
    fn test_power() {
        let cases = [
            ("3.3", "3", "35.937"),
            ("2", "-2", "0.25"),
            ("-2", "0", "1"),
            ("-2", "3", "-8"),
            ("2", "10", "1024"),
            ("10", "-3", "0.001"),
            ("0", "5", "0"),
            ("1.5", "2", "2.25"),
        ];
        for (base, exponent, expected) in cases {
            assert_eq!(
                power(&dv(base), &dv(exponent), 10).unwrap().to_string(),
                expected,
                "{base} ^ {exponent}"
            );
        }
        assert_eq!(power(&dv("3"), &dv("-1"), 4).unwrap().to_string(), "0.3333");
    }

    #[test]
    fn test_power_errors() {
        assert!(matches!(
            power(&dv("0"), &dv("0"), 10),
            Err(EvalError::Domain { .. })
        ));
        assert!(matches!(
            power(&dv("1"), &dv("1.1"), 10),
            Err(EvalError::Domain { .. })
        ));
        assert_eq!(
            power(&dv("0"), &dv("-1"), 10),
            Err(EvalError::DivisionByZero)
        );
    }

    #[test]
    fn test_cosine_and_sine() {
        assert_eq!(cosine(&dv("0"), 10, 20).unwrap().to_string(), "1");
        assert_eq!(sine(&dv("0"), 10, 20).unwrap().to_string(), "0");
        assert_eq!(cosine(pi(), 10, 20).unwrap().to_string(), "-1");
        assert_eq!(cosine(&dv("1"), 10, 20).unwrap().to_string(), "0.5403023059");
        assert_eq!(sine(&dv("1"), 10, 20).unwrap().to_string(), "0.8414709848");
        assert_eq!(sine(&dv("-1"), 10, 20).unwrap().to_string(), "-0.8414709848");
    }

    #[test]
    fn test_trig_reduces_large_angles() {
        let shifted = dv("1") + two_pi().clone() + two_pi().clone();
        assert_eq!(cosine(&shifted, 10, 20).unwrap().to_string(), "0.5403023059");
        assert_close(&sine(&dv("100"), 10, 20).unwrap(), "-0.5063656411", "0.0000000002");
    }

    #[test]
    fn test_tangent_and_cotangent() {
        assert_eq!(tangent(&dv("0"), 10, 20).unwrap().to_string(), "0");
        assert_close(&tangent(&dv("1"), 10, 20).unwrap(), "1.5574077247", "0.000000001");
        assert_close(&cotangent(&dv("1"), 10, 20).unwrap(), "0.6420926159", "0.000000001");
        assert_eq!(cotangent(&dv("0"), 10, 20), Err(EvalError::DivisionByZero));
        assert_eq!(tangent(half_pi(), 10, 20), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn test_tangent_near_pole_keeps_all_places() {
        // tan(1.57) = 1255.76559150069160...
        assert_eq!(
            tangent(&dv("1.57"), 10, 20).unwrap().to_string(),
            "1255.7655915007"
        );
        // tan(1.5707) = 10381.32741757139...
        assert_eq!(
            tangent(&dv("1.5707"), 10, 20).unwrap().to_string(),
            "10381.3274175714"
        );
    }

    #[test]
    fn test_cotangent_of_tiny_angle() {
        // cot(1e-11) is about 1e11, not a division by zero
        let value = cotangent(&dv("0.00000000001"), 10, 20).unwrap();
        assert_close(&value, "100000000000", "1000");
    }

    #[test]
    fn test_trig_negative_places() {
        assert!(matches!(
            cosine(&dv("1"), -2, 20),
            Err(EvalError::ArgumentRange { value: -2, .. })
        ));
    }

    #[test]
    fn test_trig_places_overflow() {
        assert!(matches!(
            cosine(&dv("1"), i64::MAX, 20),
            Err(EvalError::ArgumentRange { value: i64::MAX, .. })
        ));
        assert!(matches!(
            tangent(&dv("1"), i64::MAX - 5, 20),
            Err(EvalError::ArgumentRange { .. })
        ));
    }

    quickcheck! {
        fn qc_floor_le_ceil(units: i64, hundredths: u8) -> bool {
            let text = format!("{}.{:02}", units, hundredths % 100);
            let value: DecimalValue = text.parse().unwrap();
            let lo = floor(&value);
            let hi = ceil(&value);
            lo <= value && value <= hi && (&hi - &lo) <= DecimalValue::one()
        }

        fn qc_power_matches_repeated_multiplication(base: i32, exponent: u8) -> bool {
            let exponent = exponent % 12;
            let base = DecimalValue::from(base % 1000);
            if base.is_zero() && exponent == 0 {
                return true;
            }
            let mut expected = DecimalValue::one();
            for _ in 0..exponent {
                expected = &expected * &base;
            }
            power(&base, &DecimalValue::from(u32::from(exponent)), 10).unwrap() == expected
        }
    }
}
