//! Safe conversion of loosely-typed source values
//!
//! Record sources deliver values as JSON: numbers, numeric strings, blank
//! strings, or nothing at all. Every conversion here succeeds; a value that
//! cannot be read cleanly degrades to a type-appropriate default (`0`, `0.0`
//! or an empty string), and the returned [`Parsed`] records why so callers can
//! tell a clean read from a fallback.
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use statline_model::parse::{DefaultReason, Parsed, parse_count, parse_float};
//!
//! assert_eq!(parse_float(Some(&json!("25.7"))), Parsed::Clean(25.7));
//! assert_eq!(
//!     parse_count(Some(&json!(""))),
//!     Parsed::Defaulted { value: 0, reason: DefaultReason::Blank },
//! );
//! assert_eq!(
//!     parse_float(None),
//!     Parsed::Defaulted { value: 0.0, reason: DefaultReason::Missing },
//! );
//! ```

use serde_json::Value;

/// Why a value fell back to its default.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum DefaultReason {
    /// The field was absent from the record.
    #[display("missing")]
    Missing,
    /// The field was present but null.
    #[display("null")]
    Null,
    /// The field was an empty or whitespace-only string.
    #[display("blank")]
    Blank,
    /// The field held a value that could not be converted.
    #[display("malformed value {_0}")]
    Malformed(String),
}

/// Result of a safe conversion.
#[derive(Debug, Clone, PartialEq, derive_more::IsVariant)]
pub enum Parsed<T> {
    /// The source value converted without loss.
    Clean(T),
    /// The source value was unusable and `value` is the default.
    Defaulted { value: T, reason: DefaultReason },
}

impl<T> Parsed<T> {
    fn defaulted(reason: DefaultReason) -> Self
    where
        T: Default,
    {
        Self::Defaulted {
            value: T::default(),
            reason,
        }
    }

    #[must_use]
    pub fn value(&self) -> &T {
        match self {
            Self::Clean(value) | Self::Defaulted { value, .. } => value,
        }
    }

    #[must_use]
    pub fn reason(&self) -> Option<&DefaultReason> {
        match self {
            Self::Clean(_) => None,
            Self::Defaulted { reason, .. } => Some(reason),
        }
    }

    pub fn into_parts(self) -> (T, Option<DefaultReason>) {
        match self {
            Self::Clean(value) => (value, None),
            Self::Defaulted { value, reason } => (value, Some(reason)),
        }
    }
}

/// Classifies the absent, null and blank cases shared by every conversion.
fn classify(value: Option<&Value>) -> Result<&Value, DefaultReason> {
    match value {
        None => Err(DefaultReason::Missing),
        Some(Value::Null) => Err(DefaultReason::Null),
        Some(Value::String(s)) if s.trim().is_empty() => Err(DefaultReason::Blank),
        Some(value) => Ok(value),
    }
}

fn malformed<T>(value: &Value) -> Parsed<T>
where
    T: Default,
{
    Parsed::defaulted(DefaultReason::Malformed(value.to_string()))
}

/// Converts a non-negative count such as games played or age.
///
/// Integral numbers and integer strings convert cleanly. Fractional numbers
/// are truncated toward zero. Negative values, fractional strings and
/// non-numeric values are malformed.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn parse_count(value: Option<&Value>) -> Parsed<u32> {
    let value = match classify(value) {
        Ok(value) => value,
        Err(reason) => return Parsed::defaulted(reason),
    };
    match value {
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                return u32::try_from(v).map_or_else(|_| malformed(value), Parsed::Clean);
            }
            match n.as_f64() {
                Some(f) if f.is_finite() && f >= 0.0 && f <= f64::from(u32::MAX) => {
                    Parsed::Clean(f.trunc() as u32)
                }
                _ => malformed(value),
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<u32>()
            .map_or_else(|_| malformed(value), Parsed::Clean),
        _ => malformed(value),
    }
}

/// Converts a per-game or percentage stat.
///
/// Numbers and numeric strings convert cleanly as long as they are finite.
#[must_use]
pub fn parse_float(value: Option<&Value>) -> Parsed<f64> {
    let value = match classify(value) {
        Ok(value) => value,
        Err(reason) => return Parsed::defaulted(reason),
    };
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(f) if f.is_finite() => Parsed::Clean(f),
        _ => malformed(value),
    }
}

/// Converts a descriptive text field such as a name, team or position.
///
/// Strings are kept verbatim (including empty ones) and numbers are rendered
/// in their JSON form. Absent and null fields default to an empty string.
#[must_use]
pub fn parse_text(value: Option<&Value>) -> Parsed<String> {
    match value {
        None => Parsed::defaulted(DefaultReason::Missing),
        Some(Value::Null) => Parsed::defaulted(DefaultReason::Null),
        Some(Value::String(s)) => Parsed::Clean(s.clone()),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => Parsed::Clean(v.to_string()),
        Some(v) => malformed(v),
    }
}
