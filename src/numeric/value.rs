// ============================================================================
// Numeric Value
// Decomposes number-like input into sign, digit strings, and exponent
// ============================================================================

use super::errors::{ParseError, ParseResult};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

/// The numeric grammar: optional sign, integer digits, optional dot,
/// decimal digits, optional exponent marker. Anchored so that malformed
/// input is a parse failure rather than a partial match.
static NUMERIC_GRAMMAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(-?)(\d*)(\.?)(\d*)([eE][+-]?\d+)?$").expect("numeric grammar compiles")
});

// ============================================================================
// Value Input
// ============================================================================

/// Anything the engine accepts as a value: numbers or numeric-looking text.
///
/// Text inputs preserve their written form, so `"0.50"` keeps both decimal
/// digits in the layout even though it compares equal to `0.5`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueInput {
    Int(i64),
    Float(f64),
    Decimal(Decimal),
    Text(String),
}

impl From<i32> for ValueInput {
    fn from(value: i32) -> Self {
        Self::Int(value as i64)
    }
}

impl From<i64> for ValueInput {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for ValueInput {
    fn from(value: u32) -> Self {
        Self::Int(value as i64)
    }
}

impl From<f64> for ValueInput {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<f32> for ValueInput {
    fn from(value: f32) -> Self {
        Self::Float(value as f64)
    }
}

impl From<Decimal> for ValueInput {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<&str> for ValueInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ValueInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

// ============================================================================
// Numeric Value
// ============================================================================

/// A parsed numeric value, decomposed for position-by-position layout.
///
/// `value` carries the exact magnitude for equality and ordering; all layout
/// decisions run on the digit strings, never on the numeric value. The
/// exponent marker is captured so scientific-notation text round-trips, but
/// it never participates in layout.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericValue {
    pub value: Decimal,
    pub is_negative: bool,
    pub integer_digits: String,
    pub has_dot: bool,
    pub decimal_digits: String,
    pub exponent: Option<String>,
}

impl NumericValue {
    /// Parse an input into its numeric components.
    ///
    /// # Errors
    /// - `NonFinite` for NaN or infinite floats
    /// - `Invalid` when the text does not match the numeric grammar
    /// - `Empty` when the text contains no digits
    /// - `OutOfRange` when the magnitude exceeds exact decimal range
    pub fn parse(input: impl Into<ValueInput>) -> ParseResult<Self> {
        let rendered = match input.into() {
            ValueInput::Int(v) => v.to_string(),
            ValueInput::Float(v) => {
                if !v.is_finite() {
                    return Err(ParseError::NonFinite);
                }
                v.to_string()
            },
            ValueInput::Decimal(v) => v.to_string(),
            ValueInput::Text(v) => v.trim().to_string(),
        };

        Self::parse_str(&rendered)
    }

    fn parse_str(rendered: &str) -> ParseResult<Self> {
        let captures = NUMERIC_GRAMMAR
            .captures(rendered)
            .ok_or_else(|| ParseError::Invalid(rendered.to_string()))?;

        let is_negative = !captures[1].is_empty();
        let integer_digits = captures[2].to_string();
        let has_dot = !captures[3].is_empty();
        let decimal_digits = captures[4].to_string();
        let exponent = captures.get(5).map(|m| m.as_str().to_string());

        if integer_digits.is_empty() && decimal_digits.is_empty() {
            return Err(ParseError::Empty);
        }

        let value = Self::exact_value(
            is_negative,
            &integer_digits,
            &decimal_digits,
            exponent.as_deref(),
        )
        .ok_or_else(|| ParseError::OutOfRange(rendered.to_string()))?;

        Ok(Self {
            value,
            is_negative,
            integer_digits,
            has_dot,
            decimal_digits,
            exponent,
        })
    }

    /// Rebuild the exact magnitude from the captured components. Empty digit
    /// groups default to zero, so inputs like `".5"` and `"5."` stay valid.
    fn exact_value(
        is_negative: bool,
        integer_digits: &str,
        decimal_digits: &str,
        exponent: Option<&str>,
    ) -> Option<Decimal> {
        let mut canonical = String::with_capacity(
            integer_digits.len() + decimal_digits.len() + exponent.map_or(0, str::len) + 2,
        );
        if is_negative {
            canonical.push('-');
        }
        canonical.push_str(if integer_digits.is_empty() {
            "0"
        } else {
            integer_digits
        });
        if !decimal_digits.is_empty() {
            canonical.push('.');
            canonical.push_str(decimal_digits);
        }

        match exponent {
            Some(exp) => {
                canonical.push_str(exp);
                Decimal::from_scientific(&canonical).ok()
            },
            None => Decimal::from_str(&canonical).ok(),
        }
    }
}
