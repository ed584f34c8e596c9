// ============================================================================
// Odometer Engine Library
// Digit-transition engine for odometer-style numeric displays
// ============================================================================

//! # Odometer Engine
//!
//! A digit-transition engine for mechanical-odometer-style numeric widgets:
//! each decimal position is an independently rolling reel that travels from
//! its old digit to its new one, with locale-aware grouping, a configurable
//! decimal mark, currency decoration, and fixed-width zero padding.
//!
//! ## Features
//!
//! - **Isometric layouts**: two values are padded and grouped into
//!   position-aligned strings before comparison
//! - **Cascading stagger**: each spinning reel travels one extra full
//!   revolution more than the reel before it, all over the same duration
//! - **Pluggable collaborators**: rendering, frame timing, and event
//!   observation are traits; the engine never touches a concrete display
//! - **Epoch-guarded re-entrancy**: a `set` issued mid-animation replaces
//!   the live reel set, and the superseded callbacks become no-ops
//! - **Deferred pruning**: leading zero and grouping reels that become
//!   unnecessary are removed after a grace delay once everything settles
//!
//! ## Example
//!
//! ```rust
//! use odometer_engine::prelude::*;
//! use std::sync::Arc;
//!
//! let renderer = Arc::new(TextRenderer::new());
//! let clock = Arc::new(ManualFrameClock::new());
//! let target = renderer.create_container();
//!
//! let odometer = Odometer::new(
//!     target,
//!     OdometerConfig::default()
//!         .with_radix_mark(Some(','))
//!         .with_min_integers_length(6),
//!     Arc::clone(&renderer) as Arc<dyn Renderer>,
//!     Arc::clone(&clock) as Arc<dyn FrameClock>,
//!     Arc::new(NoOpObserver),
//! ).unwrap();
//!
//! odometer.set(123).unwrap();
//! clock.run_to_idle();
//!
//! assert_eq!(renderer.display_string(target), "000,123");
//! assert_eq!(odometer.current_value(), 123.into());
//! ```

pub mod domain;
pub mod engine;
pub mod interfaces;
pub mod numeric;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{
        ColumnKind, ConfigError, CurrencyPosition, OdometerConfig, Reel, ReelPhase, SpinDirection,
        SymbolColumn,
    };
    pub use crate::engine::easing::{self, EasingFunction};
    pub use crate::engine::{Odometer, OdometerBuilder, OdometerError};
    pub use crate::interfaces::{
        FrameClock, LoggingObserver, ManualFrameClock, NodeHandle, NoOpObserver, NoOpRenderer,
        Renderer, TextRenderer, TransitionEvent, TransitionObserver,
    };
    pub use crate::numeric::{NumericValue, ParseError, ValueInput};

    #[cfg(feature = "async")]
    pub use crate::interfaces::TokioFrameClock;
}
