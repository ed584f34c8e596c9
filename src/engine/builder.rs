// ============================================================================
// Odometer Builder
// Creates odometers with fluent configuration
// ============================================================================

use crate::domain::config::{CurrencyPosition, OdometerConfig};
use crate::engine::easing::EasingFunction;
use crate::engine::odometer::{Odometer, OdometerError};
use crate::interfaces::renderer::{NodeHandle, Renderer};
use crate::interfaces::{FrameClock, ManualFrameClock, NoOpObserver, NoOpRenderer, TransitionObserver};
use crate::numeric::ValueInput;
use std::sync::Arc;

/// Builder for creating odometers with a fluent API
///
/// Collaborators default to the headless implementations (`NoOpRenderer`,
/// `ManualFrameClock`, `NoOpObserver`), so a builder is always buildable;
/// swap in real ones for an actual display.
///
/// # Example
/// ```
/// use odometer_engine::prelude::*;
/// use std::sync::Arc;
///
/// let renderer = Arc::new(TextRenderer::new());
/// let clock = Arc::new(ManualFrameClock::new());
/// let odometer = OdometerBuilder::new()
///     .with_renderer(Arc::clone(&renderer) as Arc<dyn Renderer>)
///     .with_clock(Arc::clone(&clock) as Arc<dyn FrameClock>)
///     .radix_mark(Some(','))
///     .min_integers_length(6)
///     .init_value(0)
///     .build()
///     .unwrap();
///
/// odometer.set(123).unwrap();
/// clock.run_to_idle();
/// assert_eq!(renderer.display_string(odometer.target()), "000,123");
/// ```
pub struct OdometerBuilder {
    target: Option<NodeHandle>,
    config: OdometerConfig,
    renderer: Arc<dyn Renderer>,
    clock: Arc<dyn FrameClock>,
    observer: Arc<dyn TransitionObserver>,
}

impl OdometerBuilder {
    /// Start from the default configuration.
    pub fn new() -> Self {
        Self::with_config(OdometerConfig::default())
    }

    /// Start from an existing configuration.
    pub fn with_config(config: OdometerConfig) -> Self {
        Self {
            target: None,
            config,
            renderer: Arc::new(NoOpRenderer),
            clock: Arc::new(ManualFrameClock::new()),
            observer: Arc::new(NoOpObserver),
        }
    }

    // ========================================================================
    // Collaborators
    // ========================================================================

    /// Render into an existing node instead of a fresh container.
    pub fn on_target(mut self, target: NodeHandle) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_renderer(mut self, renderer: Arc<dyn Renderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn FrameClock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn TransitionObserver>) -> Self {
        self.observer = observer;
        self
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    pub fn radix_mark(mut self, mark: Option<char>) -> Self {
        self.config.radix_mark = mark;
        self
    }

    pub fn decimal_mark(mut self, mark: char) -> Self {
        self.config.decimal_mark = mark;
        self
    }

    pub fn currency(mut self, symbol: impl Into<String>, position: CurrencyPosition) -> Self {
        self.config.currency_symbol = symbol.into();
        self.config.currency_position = position;
        self
    }

    pub fn commafy_leading_zeros(mut self, enabled: bool) -> Self {
        self.config.commafy_leading_zeros = enabled;
        self
    }

    pub fn min_integers_length(mut self, length: usize) -> Self {
        self.config.min_integers_length = length;
        self
    }

    pub fn min_decimals_length(mut self, length: usize) -> Self {
        self.config.min_decimals_length = length;
        self
    }

    pub fn animation_duration_ms(mut self, duration: f64) -> Self {
        self.config.animation_duration_ms = duration;
        self
    }

    pub fn easing(mut self, easing: EasingFunction) -> Self {
        self.config.easing = easing;
        self
    }

    pub fn init_value(mut self, value: impl Into<ValueInput>) -> Self {
        self.config.init_value = value.into();
        self
    }

    // ========================================================================
    // Preset Configurations
    // ========================================================================

    /// Apply the US currency preset: `$1,234.56`.
    pub fn us_currency() -> Self {
        Self::with_config(OdometerConfig::us_currency())
    }

    /// Apply the continental European preset: `1.234,56`.
    pub fn european() -> Self {
        Self::with_config(OdometerConfig::european())
    }

    /// Apply the Swiss franc preset: `1'234.56 CHF`.
    pub fn swiss_francs() -> Self {
        Self::with_config(OdometerConfig::swiss_francs())
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Build the odometer and run its seed transition.
    ///
    /// # Errors
    /// `ConfigError` (wrapped) for unsupported or conflicting marks.
    pub fn build(self) -> Result<Odometer, OdometerError> {
        let target = self
            .target
            .unwrap_or_else(|| self.renderer.create_container());
        Odometer::new(target, self.config, self.renderer, self.clock, self.observer)
    }

    /// Inspect the configuration without building.
    pub fn get_config(&self) -> &OdometerConfig {
        &self.config
    }
}

impl Default for OdometerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::TextRenderer;

    #[test]
    fn test_default_builder_builds() {
        let odometer = OdometerBuilder::new().build().unwrap();
        assert_eq!(odometer.current_display().as_deref(), Some("0"));
    }

    #[test]
    fn test_builder_wires_collaborators() {
        let renderer = Arc::new(TextRenderer::new());
        let clock = Arc::new(ManualFrameClock::new());
        let odometer = OdometerBuilder::new()
            .with_renderer(Arc::clone(&renderer) as Arc<dyn Renderer>)
            .with_clock(Arc::clone(&clock) as Arc<dyn FrameClock>)
            .min_integers_length(3)
            .init_value(7)
            .build()
            .unwrap();

        clock.run_to_idle();
        assert_eq!(renderer.display_string(odometer.target()), "007");
    }

    #[test]
    fn test_builder_rejects_conflicting_marks() {
        let result = OdometerBuilder::new()
            .radix_mark(Some(','))
            .decimal_mark(',')
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_preset_builders() {
        let us = OdometerBuilder::us_currency();
        assert_eq!(us.get_config().currency_symbol, "$");

        let european = OdometerBuilder::european().build().unwrap();
        assert_eq!(european.options().decimal_mark, ',');
    }
}
