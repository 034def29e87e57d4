//! Parsing and comparison of Kubernetes memory quantity strings.
//!
//! Thresholds arrive as annotation values like "512Mi", "1Gi" or "129e6" and
//! usage arrives as quantity strings from the metrics API. Both sides are
//! normalized here so every comparison happens in the same unit.

use std::fmt;
use std::iter::Sum;
use std::str::FromStr;

/// Failure to parse a quantity string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseQuantityError {
    #[error("quantity string is empty")]
    Empty,
    #[error("quantity '{0}' has no valid number")]
    InvalidNumber(String),
    #[error("quantity '{0}' has an unrecognized suffix")]
    InvalidSuffix(String),
    #[error("quantity '{0}' is outside the supported range")]
    OutOfRange(String),
}

/// A memory quantity normalized to millibytes.
///
/// The Kubernetes quantity grammar mixes binary suffixes ("512Mi"), decimal
/// suffixes ("129M"), decimal exponents ("129e6") and sub-unit suffixes
/// ("100m"). Millibyte integers keep all of them exact, so a threshold
/// comparison never depends on which notation the operator picked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemoryQuantity(i128);

impl MemoryQuantity {
    /// The zero quantity, also the usage of a pod with no samples.
    #[must_use]
    pub const fn zero() -> Self {
        Self(0)
    }

    #[must_use]
    pub const fn from_bytes(bytes: i64) -> Self {
        Self(bytes as i128 * 1000)
    }

    #[must_use]
    pub const fn as_millibytes(self) -> i128 {
        self.0
    }

    /// Whole bytes, rounded toward negative infinity.
    #[must_use]
    pub const fn as_bytes(self) -> i128 {
        self.0.div_euclid(1000)
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Parse a quantity string per the Kubernetes grammar: an optional sign,
    /// a decimal significand, and one of the binary suffixes Ki/Mi/Gi/Ti/Pi/Ei,
    /// the decimal suffixes n/u/m/k/M/G/T/P/E, or a decimal exponent such as
    /// "e6". Sub-millibyte remainders round up, matching the canonicalization
    /// the Kubernetes quantity type applies.
    pub fn parse(input: &str) -> Result<Self, ParseQuantityError> {
        if input.is_empty() {
            return Err(ParseQuantityError::Empty);
        }

        let bytes = input.as_bytes();
        let mut pos = 0;
        let negative = match bytes[0] {
            b'+' => {
                pos = 1;
                false
            }
            b'-' => {
                pos = 1;
                true
            }
            _ => false,
        };

        let mut mantissa: i128 = 0;
        let mut fraction_digits: i32 = 0;
        let mut digits = 0usize;
        let mut seen_dot = false;
        while pos < bytes.len() {
            match bytes[pos] {
                digit @ b'0'..=b'9' => {
                    mantissa = mantissa
                        .checked_mul(10)
                        .and_then(|m| m.checked_add(i128::from(digit - b'0')))
                        .ok_or_else(|| ParseQuantityError::OutOfRange(input.to_string()))?;
                    if seen_dot {
                        fraction_digits += 1;
                    }
                    digits += 1;
                    pos += 1;
                }
                b'.' if !seen_dot => {
                    seen_dot = true;
                    pos += 1;
                }
                _ => break,
            }
        }
        if digits == 0 {
            return Err(ParseQuantityError::InvalidNumber(input.to_string()));
        }

        let (pow2, pow10) = parse_suffix(input, &input[pos..])?;

        let mut value = if negative { -mantissa } else { mantissa };
        if pow2 > 0 {
            value = value
                .checked_mul(1i128 << pow2)
                .ok_or_else(|| ParseQuantityError::OutOfRange(input.to_string()))?;
        }
        // +3 converts bytes to millibytes.
        let exponent = pow10 + 3 - fraction_digits;
        apply_pow10(value, exponent)
            .map(Self)
            .ok_or_else(|| ParseQuantityError::OutOfRange(input.to_string()))
    }
}

/// Decompose a quantity suffix into a binary power and a decimal power.
fn parse_suffix(input: &str, suffix: &str) -> Result<(u32, i32), ParseQuantityError> {
    let (pow2, pow10) = match suffix {
        "" => (0, 0),
        "Ki" => (10, 0),
        "Mi" => (20, 0),
        "Gi" => (30, 0),
        "Ti" => (40, 0),
        "Pi" => (50, 0),
        "Ei" => (60, 0),
        "n" => (0, -9),
        "u" => (0, -6),
        "m" => (0, -3),
        "k" => (0, 3),
        "M" => (0, 6),
        "G" => (0, 9),
        "T" => (0, 12),
        "P" => (0, 15),
        "E" => (0, 18),
        _ => {
            let rest = suffix
                .strip_prefix(['e', 'E'])
                .ok_or_else(|| ParseQuantityError::InvalidSuffix(input.to_string()))?;
            let exponent: i32 = rest.parse().map_err(|_| {
                let unsigned = rest.strip_prefix(['+', '-']).unwrap_or(rest);
                if !unsigned.is_empty() && unsigned.bytes().all(|b| b.is_ascii_digit()) {
                    ParseQuantityError::OutOfRange(input.to_string())
                } else {
                    ParseQuantityError::InvalidSuffix(input.to_string())
                }
            })?;
            if !(-9999..=9999).contains(&exponent) {
                return Err(ParseQuantityError::OutOfRange(input.to_string()));
            }
            (0, exponent)
        }
    };
    Ok((pow2, pow10))
}

/// Scale `value` by `10^exp`, rounding toward positive infinity when the
/// power is negative. Returns `None` on overflow.
fn apply_pow10(value: i128, exp: i32) -> Option<i128> {
    use std::cmp::Ordering;

    match exp.cmp(&0) {
        Ordering::Equal => Some(value),
        Ordering::Greater => {
            if value == 0 {
                return Some(0);
            }
            let factor = 10i128.checked_pow(exp as u32)?;
            value.checked_mul(factor)
        }
        Ordering::Less => {
            let magnitude = (-exp) as u32;
            // 10^39 exceeds i128; anything positive still rounds up to one.
            if magnitude > 38 {
                return Some(if value > 0 { 1 } else { 0 });
            }
            let divisor = 10i128.pow(magnitude);
            let quotient = value.div_euclid(divisor);
            Some(if value.rem_euclid(divisor) != 0 {
                quotient + 1
            } else {
                quotient
            })
        }
    }
}

impl FromStr for MemoryQuantity {
    type Err = ParseQuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Sum for MemoryQuantity {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), MemoryQuantity::saturating_add)
    }
}

impl fmt::Display for MemoryQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 1000 != 0 {
            return write!(f, "{}m", self.0);
        }
        let bytes = self.0 / 1000;
        if bytes != 0 {
            const SUFFIXES: [(i128, &str); 6] = [
                (1 << 60, "Ei"),
                (1 << 50, "Pi"),
                (1 << 40, "Ti"),
                (1 << 30, "Gi"),
                (1 << 20, "Mi"),
                (1 << 10, "Ki"),
            ];
            for (unit, suffix) in SUFFIXES {
                if bytes % unit == 0 {
                    return write!(f, "{}{suffix}", bytes / unit);
                }
            }
        }
        write!(f, "{bytes}")
    }
}
