// ============================================================================
// Odometer Configuration
// Formatting, animation, and currency decoration settings
// ============================================================================

use crate::engine::easing::{default_easing, EasingFunction};
use crate::numeric::ValueInput;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Radix (thousands) marks the engine accepts.
///
/// `None` on the config disables the grouping glyph entirely. The set covers
/// the common typographic separators: comma, apostrophe, dot above, dot,
/// and thin space.
pub const SUPPORTED_RADIX_MARKS: [char; 5] = [',', '\'', '˙', '.', ' '];

/// Decimal marks the engine accepts.
pub const SUPPORTED_DECIMAL_MARKS: [char; 2] = ['.', ','];

/// Default per-reel animation length.
pub const DEFAULT_ANIMATION_DURATION_MS: f64 = 1800.0;

// ============================================================================
// Currency Position
// ============================================================================

/// Where the currency glyph sits relative to the digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CurrencyPosition {
    #[default]
    Start,
    End,
}

impl CurrencyPosition {
    /// Parse a position name, falling back to `Start` for anything
    /// unrecognized.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "end" => CurrencyPosition::End,
            _ => CurrencyPosition::Start,
        }
    }
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Fatal configuration faults: unsupported or conflicting marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    UnsupportedRadixMark(char),
    UnsupportedDecimalMark(char),
    /// Radix and decimal mark are the same character
    MarkConflict(char),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnsupportedRadixMark(mark) => {
                write!(f, "unsupported radix mark: '{mark}'")
            },
            ConfigError::UnsupportedDecimalMark(mark) => {
                write!(f, "unsupported decimal mark: '{mark}'")
            },
            ConfigError::MarkConflict(mark) => {
                write!(f, "radix mark and decimal mark are both '{mark}'")
            },
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Odometer Configuration
// ============================================================================

/// Immutable-per-transition configuration for an odometer.
///
/// Constructed with builder methods, validated eagerly with [`validate`],
/// and normalized once at construction time. Mutating a configuration while
/// a transition is being built is caller responsibility.
///
/// [`validate`]: OdometerConfig::validate
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OdometerConfig {
    /// Grouping mark inserted every three integer digits; `None` disables
    /// the glyph.
    pub radix_mark: Option<char>,
    pub decimal_mark: char,
    /// Empty string disables currency decoration.
    pub currency_symbol: String,
    pub currency_position: CurrencyPosition,
    /// Force grouping even when only zero-padded leading zeros produce a
    /// group boundary.
    pub commafy_leading_zeros: bool,
    /// Minimum rendered integer width, always at least 1.
    pub min_integers_length: usize,
    /// Minimum rendered decimal width.
    pub min_decimals_length: usize,
    pub animation_duration_ms: f64,
    /// Position curve: `(elapsed, start, distance, duration) -> position`.
    #[cfg_attr(feature = "serde", serde(skip, default = "default_easing"))]
    pub easing: EasingFunction,
    /// Value rendered by the seed transition at construction.
    pub init_value: ValueInput,
}

impl Default for OdometerConfig {
    fn default() -> Self {
        Self {
            radix_mark: None,
            decimal_mark: '.',
            currency_symbol: String::new(),
            currency_position: CurrencyPosition::Start,
            commafy_leading_zeros: false,
            min_integers_length: 1,
            min_decimals_length: 0,
            animation_duration_ms: DEFAULT_ANIMATION_DURATION_MS,
            easing: default_easing(),
            init_value: ValueInput::Int(0),
        }
    }
}

impl fmt::Debug for OdometerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OdometerConfig")
            .field("radix_mark", &self.radix_mark)
            .field("decimal_mark", &self.decimal_mark)
            .field("currency_symbol", &self.currency_symbol)
            .field("currency_position", &self.currency_position)
            .field("commafy_leading_zeros", &self.commafy_leading_zeros)
            .field("min_integers_length", &self.min_integers_length)
            .field("min_decimals_length", &self.min_decimals_length)
            .field("animation_duration_ms", &self.animation_duration_ms)
            .field("easing", &"<fn>")
            .field("init_value", &self.init_value)
            .finish()
    }
}

impl OdometerConfig {
    // ========================================================================
    // Builder Methods
    // ========================================================================

    pub fn with_radix_mark(mut self, mark: Option<char>) -> Self {
        self.radix_mark = mark;
        self
    }

    pub fn with_decimal_mark(mut self, mark: char) -> Self {
        self.decimal_mark = mark;
        self
    }

    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    pub fn with_currency_position(mut self, position: CurrencyPosition) -> Self {
        self.currency_position = position;
        self
    }

    pub fn with_commafy_leading_zeros(mut self, enabled: bool) -> Self {
        self.commafy_leading_zeros = enabled;
        self
    }

    pub fn with_min_integers_length(mut self, length: usize) -> Self {
        self.min_integers_length = length;
        self
    }

    pub fn with_min_decimals_length(mut self, length: usize) -> Self {
        self.min_decimals_length = length;
        self
    }

    pub fn with_animation_duration_ms(mut self, duration: f64) -> Self {
        self.animation_duration_ms = duration;
        self
    }

    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_init_value(mut self, value: impl Into<ValueInput>) -> Self {
        self.init_value = value.into();
        self
    }

    // ========================================================================
    // Validation and Normalization
    // ========================================================================

    /// Validate the mark configuration.
    ///
    /// # Errors
    /// - `UnsupportedRadixMark` / `UnsupportedDecimalMark` for characters
    ///   outside the supported sets
    /// - `MarkConflict` when both marks are the same character
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(mark) = self.radix_mark {
            if !SUPPORTED_RADIX_MARKS.contains(&mark) {
                return Err(ConfigError::UnsupportedRadixMark(mark));
            }
        }
        if !SUPPORTED_DECIMAL_MARKS.contains(&self.decimal_mark) {
            return Err(ConfigError::UnsupportedDecimalMark(self.decimal_mark));
        }
        if self.radix_mark == Some(self.decimal_mark) {
            return Err(ConfigError::MarkConflict(self.decimal_mark));
        }
        Ok(())
    }

    /// Clamp out-of-range numeric settings to usable values: integer width
    /// at least 1, non-positive durations back to the default.
    pub fn normalized(mut self) -> Self {
        self.min_integers_length = self.min_integers_length.max(1);
        if !(self.animation_duration_ms > 0.0) {
            self.animation_duration_ms = DEFAULT_ANIMATION_DURATION_MS;
        }
        self
    }

    // ========================================================================
    // Preset Configurations
    // ========================================================================

    /// US-style currency display: `$1,234.56`.
    pub fn us_currency() -> Self {
        Self::default()
            .with_radix_mark(Some(','))
            .with_decimal_mark('.')
            .with_currency_symbol("$")
            .with_min_decimals_length(2)
    }

    /// Continental European grouping: `1.234,56`.
    pub fn european() -> Self {
        Self::default()
            .with_radix_mark(Some('.'))
            .with_decimal_mark(',')
    }

    /// Swiss-style apostrophe grouping: `1'234.56`.
    pub fn swiss_francs() -> Self {
        Self::default()
            .with_radix_mark(Some('\''))
            .with_decimal_mark('.')
            .with_currency_symbol("CHF")
            .with_currency_position(CurrencyPosition::End)
            .with_min_decimals_length(2)
    }
}
