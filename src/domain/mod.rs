// ============================================================================
// Domain Models Module
// Core types: configuration, symbol columns, and reels
// ============================================================================

pub mod column;
pub mod config;
pub mod reel;

pub use column::{spin_sequence, ColumnKind, DigitSequence, SpinDirection, SymbolColumn};
pub use config::{
    ConfigError, CurrencyPosition, OdometerConfig, DEFAULT_ANIMATION_DURATION_MS,
    SUPPORTED_DECIMAL_MARKS, SUPPORTED_RADIX_MARKS,
};
pub use reel::{Reel, ReelId, ReelPhase};
