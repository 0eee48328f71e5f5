// ============================================================================
// Arbitrary-Precision Decimal
// Signed decimal numbers stored as explicit digit sequences
// ============================================================================

use super::errors::EvalError;
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Largest scale a `rust_decimal::Decimal` can carry.
const NATIVE_MAX_SCALE: usize = 28;

/// Arbitrary-precision signed decimal number.
///
/// The value is kept in canonical form at all times:
/// - `integral` has no leading zero unless it is exactly `[0]`
/// - `fractional` has no trailing zero (empty when the value is an integer)
/// - zero is never negative
///
/// Digits are stored most-significant first, one decimal digit per byte.
/// Instances are immutable; every operation returns a new value.
///
/// # Example
/// ```
/// use decimal_evaluator::numeric::DecimalValue;
///
/// let x: DecimalValue = "0012.3400".parse().unwrap();
/// assert_eq!(x.to_string(), "12.34");
/// assert_eq!(x.integral_part(), "12");
/// assert_eq!(x.fractional_part(), "34");
/// ```
#[derive(Clone)]
pub struct DecimalValue {
    pub(crate) non_negative: bool,
    pub(crate) integral: Vec<u8>,
    pub(crate) fractional: Vec<u8>,
}

// ============================================================================
// Construction
// ============================================================================

impl DecimalValue {
    /// Build a value from raw digit sequences, normalizing on the way.
    ///
    /// This is the only constructor; every other path funnels through it so the
    /// canonical-form invariants hold for every instance.
    pub(crate) fn from_parts(non_negative: bool, integral: Vec<u8>, fractional: Vec<u8>) -> Self {
        let mut integral = integral;
        let mut fractional = fractional;

        let leading = integral.iter().take_while(|&&d| d == 0).count();
        integral.drain(..leading);
        if integral.is_empty() {
            integral.push(0);
        }

        while fractional.last() == Some(&0) {
            fractional.pop();
        }

        let is_zero = integral == [0] && fractional.is_empty();

        Self {
            non_negative: non_negative || is_zero,
            integral,
            fractional,
        }
    }

    /// Build a value from internal constant digit strings (ASCII digits only).
    pub(crate) fn from_digit_str(non_negative: bool, integral: &str, fractional: &str) -> Self {
        let digits = |s: &str| s.bytes().map(|b| b - b'0').collect::<Vec<u8>>();
        Self::from_parts(non_negative, digits(integral), digits(fractional))
    }

    fn from_unsigned(non_negative: bool, mut magnitude: u128) -> Self {
        let mut digits = Vec::new();
        while magnitude > 0 {
            digits.push((magnitude % 10) as u8);
            magnitude /= 10;
        }
        digits.reverse();
        Self::from_parts(non_negative, digits, Vec::new())
    }

    /// Zero
    pub fn zero() -> Self {
        Self {
            non_negative: true,
            integral: vec![0],
            fractional: Vec::new(),
        }
    }

    /// One (1)
    pub fn one() -> Self {
        Self {
            non_negative: true,
            integral: vec![1],
            fractional: Vec::new(),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Integral digits, most-significant first.
    #[inline]
    pub fn integral_digits(&self) -> &[u8] {
        &self.integral
    }

    /// Fractional digits, most-significant first. Empty for integers.
    #[inline]
    pub fn fractional_digits(&self) -> &[u8] {
        &self.fractional
    }

    /// Integral digits rendered as text (no sign).
    pub fn integral_part(&self) -> String {
        digits_to_string(&self.integral)
    }

    /// Fractional digits rendered as text (no sign, no point).
    pub fn fractional_part(&self) -> String {
        digits_to_string(&self.fractional)
    }

    /// Number of fractional digits.
    #[inline]
    pub fn scale(&self) -> usize {
        self.fractional.len()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.integral == [0] && self.fractional.is_empty()
    }

    /// True for negative values. Zero is never negative.
    #[inline]
    pub fn is_negative(&self) -> bool {
        !self.non_negative
    }

    /// True for zero and positive values.
    #[inline]
    pub fn is_sign_non_negative(&self) -> bool {
        self.non_negative
    }

    /// True when the fractional part is zero.
    #[inline]
    pub fn is_integer(&self) -> bool {
        self.fractional.is_empty()
    }

    /// Absolute value.
    pub fn abs(&self) -> Self {
        Self {
            non_negative: true,
            integral: self.integral.clone(),
            fractional: self.fractional.clone(),
        }
    }

    /// Same magnitude with the opposite sign. Zero stays zero.
    pub fn negate(&self) -> Self {
        self.with_sign(self.non_negative)
    }

    /// Same magnitude, negative when `negative` is set (and the value is non-zero).
    pub(crate) fn with_sign(&self, negative: bool) -> Self {
        Self::from_parts(!negative, self.integral.clone(), self.fractional.clone())
    }

    /// Consume the value and return it with the requested sign.
    pub(crate) fn into_signed(self, negative: bool) -> Self {
        Self::from_parts(!negative, self.integral, self.fractional)
    }
}

fn digits_to_string(digits: &[u8]) -> String {
    digits.iter().map(|d| char::from(b'0' + d)).collect()
}

// ============================================================================
// Comparison
// ============================================================================

/// Digit of `digits` at `index` after left-padding to `width`.
#[inline]
fn left_padded(digits: &[u8], width: usize, index: usize) -> u8 {
    let pad = width - digits.len();
    if index < pad {
        0
    } else {
        digits[index - pad]
    }
}

/// Compare magnitudes, ignoring sign.
///
/// Integral parts are compared as if left-padded with zeros to equal length,
/// fractional parts as if right-padded, integral part first.
pub(crate) fn cmp_magnitude(a: &DecimalValue, b: &DecimalValue) -> Ordering {
    let width = a.integral.len().max(b.integral.len());
    for i in 0..width {
        let ord = left_padded(&a.integral, width, i).cmp(&left_padded(&b.integral, width, i));
        if ord != Ordering::Equal {
            return ord;
        }
    }

    let width = a.fractional.len().max(b.fractional.len());
    for i in 0..width {
        let x = a.fractional.get(i).copied().unwrap_or(0);
        let y = b.fractional.get(i).copied().unwrap_or(0);
        let ord = x.cmp(&y);
        if ord != Ordering::Equal {
            return ord;
        }
    }

    Ordering::Equal
}

impl PartialEq for DecimalValue {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DecimalValue {}

impl PartialOrd for DecimalValue {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DecimalValue {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.non_negative != other.non_negative {
            return if self.non_negative {
                Ordering::Greater
            } else {
                Ordering::Less
            };
        }

        let ord = cmp_magnitude(self, other);
        if self.non_negative {
            ord
        } else {
            ord.reverse()
        }
    }
}

// Canonical form makes the stored digits identical to the canonical string,
// so hashing them agrees with `Eq`.
impl Hash for DecimalValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.non_negative.hash(state);
        self.integral.hash(state);
        self.fractional.hash(state);
    }
}

impl Default for DecimalValue {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}

// ============================================================================
// Display and Debug
// ============================================================================

impl fmt::Display for DecimalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.non_negative {
            f.write_str("-")?;
        }
        f.write_str(&self.integral_part())?;
        if !self.fractional.is_empty() {
            write!(f, ".{}", self.fractional_part())?;
        }
        Ok(())
    }
}

impl fmt::Debug for DecimalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DecimalValue({})", self)
    }
}

// ============================================================================
// String Parsing
// ============================================================================

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

impl FromStr for DecimalValue {
    type Err = EvalError;

    /// Parse `[+|-]? (digits)? (. digits)?` with at least one digit.
    ///
    /// # Examples
    /// - "012030.030210" -> 12030.03021
    /// - "-00000.000" -> 0
    /// - ".5" -> 0.5
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (non_negative, body) = match s.as_bytes().first() {
            Some(b'-') => (false, &s[1..]),
            Some(b'+') => (true, &s[1..]),
            _ => (true, s),
        };

        let (int_str, frac_str) = match body.split_once('.') {
            Some((int_str, frac_str)) => (int_str, Some(frac_str)),
            None => (body, None),
        };

        let valid = match frac_str {
            Some(frac) => !frac.is_empty() && is_digits(frac) && is_digits(int_str),
            None => !int_str.is_empty() && is_digits(int_str),
        };
        if !valid {
            return Err(EvalError::format(s));
        }

        Ok(Self::from_digit_str(
            non_negative,
            int_str,
            frac_str.unwrap_or(""),
        ))
    }
}

// ============================================================================
// Conversion from native integers
// ============================================================================

impl From<u64> for DecimalValue {
    fn from(value: u64) -> Self {
        Self::from_unsigned(true, u128::from(value))
    }
}

impl From<u32> for DecimalValue {
    fn from(value: u32) -> Self {
        Self::from_unsigned(true, u128::from(value))
    }
}

impl From<i64> for DecimalValue {
    fn from(value: i64) -> Self {
        Self::from_unsigned(value >= 0, u128::from(value.unsigned_abs()))
    }
}

impl From<i32> for DecimalValue {
    fn from(value: i32) -> Self {
        Self::from_unsigned(value >= 0, u128::from(value.unsigned_abs()))
    }
}

impl From<usize> for DecimalValue {
    fn from(value: usize) -> Self {
        Self::from_unsigned(true, value as u128)
    }
}

// ============================================================================
// Conversion from/to rust_decimal (native fixed-precision decimal)
// ============================================================================

impl From<Decimal> for DecimalValue {
    /// Digit-by-digit conversion of the mantissa, splitting at the scale.
    fn from(value: Decimal) -> Self {
        let scale = value.scale() as usize;
        let mut mantissa = value.mantissa().unsigned_abs();

        let mut digits = Vec::new();
        while mantissa > 0 {
            digits.push((mantissa % 10) as u8);
            mantissa /= 10;
        }
        while digits.len() <= scale {
            digits.push(0);
        }
        digits.reverse();

        let fractional = digits.split_off(digits.len() - scale);
        Self::from_parts(!value.is_sign_negative(), digits, fractional)
    }
}

impl TryFrom<&DecimalValue> for Decimal {
    type Error = EvalError;

    /// Convert to `rust_decimal::Decimal`.
    ///
    /// Fractional digits beyond the native scale limit are rounded half-up.
    ///
    /// # Errors
    /// Returns `Overflow` when the magnitude does not fit the 96-bit mantissa.
    fn try_from(value: &DecimalValue) -> Result<Self, Self::Error> {
        let rounded;
        let value = if value.scale() > NATIVE_MAX_SCALE {
            rounded = value.round(NATIVE_MAX_SCALE as i64)?;
            &rounded
        } else {
            value
        };

        let mut mantissa: i128 = 0;
        for &digit in value.integral.iter().chain(value.fractional.iter()) {
            mantissa = mantissa
                .checked_mul(10)
                .and_then(|m| m.checked_add(i128::from(digit)))
                .ok_or(EvalError::Overflow)?;
        }
        if value.is_negative() {
            mantissa = -mantissa;
        }

        Decimal::try_from_i128_with_scale(mantissa, value.scale() as u32)
            .map_err(|_| EvalError::Overflow)
    }
}

impl TryFrom<DecimalValue> for Decimal {
    type Error = EvalError;

    fn try_from(value: DecimalValue) -> Result<Self, Self::Error> {
        Decimal::try_from(&value)
    }
}

// ============================================================================
// Serde (canonical string form)
// ============================================================================

#[cfg(feature = "serde")]
impl serde::Serialize for DecimalValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for DecimalValue {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Tests
// ============================================================================
