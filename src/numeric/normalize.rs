// ============================================================================
// Isometric Normalizer
// Pads and groups two values into position-aligned string layouts
// ============================================================================

use super::value::NumericValue;
use crate::domain::config::OdometerConfig;
use rust_decimal::Decimal;

/// Which side of a digit string receives zero padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadSide {
    Left,
    Right,
}

/// Pad `digits` with zeros on the given side until it reaches `width`.
///
/// # Example
/// `zero_pad("123", 5, PadSide::Left)` → `"00123"`
pub fn zero_pad(digits: &str, width: usize, side: PadSide) -> String {
    let missing = width.saturating_sub(digits.len());
    if missing == 0 {
        return digits.to_string();
    }

    let mut padded = String::with_capacity(width);
    match side {
        PadSide::Left => {
            padded.extend(std::iter::repeat('0').take(missing));
            padded.push_str(digits);
        },
        PadSide::Right => {
            padded.push_str(digits);
            padded.extend(std::iter::repeat('0').take(missing));
        },
    }
    padded
}

/// Insert `mark` every three digits, counting from the right.
///
/// # Example
/// `group_digits("0000012", ',')` → `"0,000,012"`
pub fn group_digits(digits: &str, mark: char) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(mark);
        }
        grouped.push(c);
    }
    grouped
}

// ============================================================================
// Normalized Value
// ============================================================================

/// A numeric value padded and grouped to match its transition partner.
///
/// Two values normalized together have isometric strings of identical length
/// with mark characters at identical positions, ready for
/// position-by-position comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedValue {
    pub value: Decimal,
    pub is_negative: bool,
    /// Integer part after padding and (possibly) grouping.
    pub integer_digits: String,
    pub has_dot: bool,
    pub decimal_digits: String,
    pub exponent: Option<String>,
    /// Sign + grouped integer + decimal mark + decimals, assembled with the
    /// configured marks.
    pub isometric: String,
}

/// Normalize two parsed values into isometric layouts under `cfg`.
///
/// Total over parsed inputs: padding, grouping, and assembly cannot fail.
///
/// Grouping applies to both integer parts when a radix mark is configured
/// and any of the following holds:
/// - the *new* value's raw integer digits span a group boundary,
/// - `commafy_leading_zeros` is set,
/// - the configured minimum integer width itself spans a group boundary.
///
/// The decimal part is never grouped, and no decimal mark is emitted when
/// both decimal strings come out empty.
pub fn isometric_pair(
    old: &NumericValue,
    new: &NumericValue,
    cfg: &OdometerConfig,
) -> (NormalizedValue, NormalizedValue) {
    let int_width = old
        .integer_digits
        .len()
        .max(new.integer_digits.len())
        .max(cfg.min_integers_length);
    let dec_width = old
        .decimal_digits
        .len()
        .max(new.decimal_digits.len())
        .max(cfg.min_decimals_length);

    let mut old_int = zero_pad(&old.integer_digits, int_width, PadSide::Left);
    let mut new_int = zero_pad(&new.integer_digits, int_width, PadSide::Left);
    let old_dec = zero_pad(&old.decimal_digits, dec_width, PadSide::Right);
    let new_dec = zero_pad(&new.decimal_digits, dec_width, PadSide::Right);

    if let Some(mark) = cfg.radix_mark {
        let natural_boundary = new.integer_digits.len() > 3;
        let padded_boundary = cfg.min_integers_length > 3;
        if cfg.commafy_leading_zeros || natural_boundary || padded_boundary {
            old_int = group_digits(&old_int, mark);
            new_int = group_digits(&new_int, mark);
        }
    }

    let normalized_old = NormalizedValue {
        value: old.value,
        is_negative: old.is_negative,
        isometric: assemble(old.is_negative, &old_int, &old_dec, cfg.decimal_mark),
        integer_digits: old_int,
        has_dot: !old_dec.is_empty(),
        decimal_digits: old_dec,
        exponent: old.exponent.clone(),
    };
    let normalized_new = NormalizedValue {
        value: new.value,
        is_negative: new.is_negative,
        isometric: assemble(new.is_negative, &new_int, &new_dec, cfg.decimal_mark),
        integer_digits: new_int,
        has_dot: !new_dec.is_empty(),
        decimal_digits: new_dec,
        exponent: new.exponent.clone(),
    };

    (normalized_old, normalized_new)
}

fn assemble(is_negative: bool, integer: &str, decimals: &str, decimal_mark: char) -> String {
    let mut out = String::with_capacity(integer.len() + decimals.len() + 2);
    if is_negative {
        out.push('-');
    }
    out.push_str(integer);
    if !decimals.is_empty() {
        out.push(decimal_mark);
        out.push_str(decimals);
    }
    out
}
