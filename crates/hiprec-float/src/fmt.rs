//! Decimal formatting and parsing.
//!
//! Decimal output rounds to nearest (ties away from zero); parsing rounds
//! the exact decimal value toward negative infinity once.

use std::fmt;
use std::str::FromStr;

use dashu::integer::IBig;

use crate::error::FloatError;
use crate::float::{is_negative, log2_bound, Big, Kind, PrecFloat, EXPONENT_LIMIT};
use crate::precision::Precision;

/// Layout of a decimal rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Notation {
    /// `digits` digits after the decimal point: `3.1416`.
    Fixed,
    /// `digits` significant digits, trailing zeros removed, switching to
    /// scientific notation for very large or small magnitudes, like C's
    /// `%g`.
    General,
    /// One leading digit and `digits` digits after the point: `3.1416e0`.
    Scientific,
}

fn pow10(n: usize) -> IBig {
    let mut result = IBig::ONE;
    let mut base = IBig::from(10);
    let mut n = n;
    while n > 0 {
        if n & 1 == 1 {
            result *= &base;
        }
        base = &base * &base;
        n >>= 1;
    }
    result
}

/// `round(|big| * 10^k)` to nearest, ties away from zero.
fn scaled_decimal(big: &Big, k: isize) -> IBig {
    let repr = big.repr();
    let significand = repr.significand().clone();
    let mut numerator = if is_negative(big) { -significand } else { significand };
    let mut denominator = IBig::ONE;
    let exponent = repr.exponent();
    if exponent >= 0 {
        numerator = numerator << exponent.unsigned_abs();
    } else {
        denominator = denominator << exponent.unsigned_abs();
    }
    if k >= 0 {
        numerator *= pow10(k.unsigned_abs());
    } else {
        denominator *= pow10(k.unsigned_abs());
    }
    ((numerator << 1) + &denominator) / (denominator << 1)
}

/// Returns `(D, E)` with `D` holding exactly `significant` digits and
/// `|big| ≈ D * 10^(E + 1 - significant)`.
fn significant_digits(big: &Big, significant: usize) -> (IBig, isize) {
    let significant = significant.max(1);
    let log2 = log2_bound(big) as f64;
    let mut exponent = ((log2 - 1.0) * std::f64::consts::LOG10_2).floor() as isize;
    let upper = pow10(significant);
    let lower = pow10(significant - 1);
    loop {
        let k = significant as isize - 1 - exponent;
        let digits = scaled_decimal(big, k);
        if digits >= upper {
            exponent += 1;
        } else if digits < lower {
            exponent -= 1;
        } else {
            return (digits, exponent);
        }
        // Rounding up to a power of ten lands exactly on the upper bound.
        if digits == upper {
            return (lower, exponent);
        }
    }
}

fn fixed(big: &Big, fractional: usize) -> String {
    let digits = scaled_decimal(big, fractional as isize).to_string();
    let digits = format!("{digits:0>width$}", width = fractional + 1);
    let (integer, fraction) = digits.split_at(digits.len() - fractional);
    if fractional == 0 {
        integer.to_string()
    } else {
        format!("{integer}.{fraction}")
    }
}

fn scientific(big: &Big, fractional: usize) -> String {
    let (digits, exponent) = significant_digits(big, fractional + 1);
    let digits = digits.to_string();
    let (lead, rest) = digits.split_at(1);
    if rest.is_empty() {
        format!("{lead}e{exponent}")
    } else {
        format!("{lead}.{rest}e{exponent}")
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

fn general(big: &Big, significant: usize) -> String {
    let significant = significant.max(1);
    let (_, exponent) = significant_digits(big, significant);
    if exponent < -4 || exponent >= significant as isize {
        let s = scientific(big, significant - 1);
        match s.split_once('e') {
            Some((mantissa, exp)) => format!("{}e{exp}", trim_fraction(mantissa)),
            None => s,
        }
    } else {
        let fractional = (significant as isize - 1 - exponent).max(0).unsigned_abs();
        trim_fraction(&fixed(big, fractional)).to_string()
    }
}

impl PrecFloat {
    /// Renders the value in decimal.
    ///
    /// `digits` counts digits after the point for [`Notation::Fixed`] and
    /// [`Notation::Scientific`], and significant digits for
    /// [`Notation::General`].
    #[must_use]
    pub fn to_string_with(&self, digits: usize, notation: Notation) -> String {
        let big = match &self.kind {
            Kind::Nan => return "NaN".to_string(),
            Kind::PosInfinity => return "inf".to_string(),
            Kind::NegInfinity => return "-inf".to_string(),
            Kind::Finite(big) => big,
        };
        let body = if big.repr().is_zero() {
            match notation {
                Notation::Fixed if digits > 0 => format!("0.{}", "0".repeat(digits)),
                Notation::Scientific if digits > 0 => format!("0.{}e0", "0".repeat(digits)),
                Notation::Scientific => "0e0".to_string(),
                _ => "0".to_string(),
            }
        } else {
            match notation {
                Notation::Fixed => fixed(big, digits),
                Notation::General => general(big, digits),
                Notation::Scientific => scientific(big, digits),
            }
        };
        if is_negative(big) {
            format!("-{body}")
        } else {
            body
        }
    }

    /// Parses a decimal string at the given precision.
    ///
    /// Accepts an optional sign, digits with an optional point, an
    /// optional exponent (`e` or `E`), and the words `inf`, `infinity`
    /// and `nan` in any case.
    ///
    /// # Errors
    ///
    /// Returns [`FloatError::Parse`] for malformed input.
    pub fn parse_at(s: &str, precision: Precision) -> Result<Self, FloatError> {
        let trimmed = s.trim();
        let (negative, body) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };
        let lower = body.to_ascii_lowercase();
        if lower == "inf" || lower == "infinity" {
            return Ok(Self::signed_infinity(negative, precision));
        }
        if lower == "nan" {
            return Ok(Self::nan(precision));
        }

        let parse_error = || FloatError::Parse(s.to_string());
        let (mantissa, exponent) = match lower.split_once('e') {
            Some((m, e)) => (m, e.parse::<i64>().map_err(|_| parse_error())?),
            None => (lower.as_str(), 0),
        };
        let (integer, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (integer.is_empty() && fraction.is_empty())
            || !all_digits(integer)
            || !all_digits(fraction)
        {
            return Err(parse_error());
        }

        let digits = format!("{integer}{fraction}");
        let digits = digits.trim_start_matches('0');
        if digits.is_empty() {
            return Ok(Self::zero_at(precision));
        }
        let mut value: IBig = digits.parse().map_err(|_| parse_error())?;
        if negative {
            value = -value;
        }
        let length = i64::try_from(fraction.len()).map_err(|_| parse_error())?;
        let decimal_exponent = exponent.saturating_sub(length);

        // Decide overflow and underflow before materialising 10^|e|.
        let magnitude = (decimal_exponent as f64 + digits.len() as f64) * std::f64::consts::LOG2_10;
        if magnitude > EXPONENT_LIMIT as f64 + 4.0 {
            return Ok(Self::signed_infinity(negative, precision));
        }
        if magnitude < -(EXPONENT_LIMIT as f64) - 4.0 {
            return Ok(Self::zero_at(precision));
        }

        let scale = pow10(decimal_exponent.unsigned_abs() as usize);
        if decimal_exponent >= 0 {
            return Ok(Self::from_big(Big::from_parts(value * scale, 0), precision));
        }
        let quotient = precision
            .context()
            .div(Big::from_parts(value, 0).repr(), Big::from_parts(scale, 0).repr())
            .value();
        Ok(Self::from_big(quotient, precision))
    }
}

impl fmt::Display for PrecFloat {
    /// `{}` prints the significant digits of the value's precision;
    /// `{:.n}` prints `n` significant digits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = f.precision().unwrap_or_else(|| self.precision.digits());
        let s = self.to_string_with(digits.max(1), Notation::General);
        f.write_str(&s)
    }
}

impl fmt::LowerExp for PrecFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fractional = f
            .precision()
            .unwrap_or_else(|| self.precision.digits().saturating_sub(1));
        f.write_str(&self.to_string_with(fractional, Notation::Scientific))
    }
}

impl FromStr for PrecFloat {
    type Err = FloatError;

    /// Parses at the process-wide default precision.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_at(s, Precision::current())
    }
}
