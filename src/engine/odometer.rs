// ============================================================================
// Odometer
// Core transition pipeline: parse, normalize, build reels, animate, prune
// ============================================================================

use crate::domain::column::{ColumnKind, SymbolColumn};
use crate::domain::config::{ConfigError, CurrencyPosition, OdometerConfig};
use crate::domain::reel::{Reel, ReelPhase};
use crate::engine::easing::EasingFunction;
use crate::engine::matrix::{build_matrix, SymbolMatrix};
use crate::interfaces::renderer::{NodeHandle, Renderer};
use crate::interfaces::{FrameClock, TransitionEvent, TransitionObserver};
use crate::numeric::{isometric_pair, NormalizedValue, NumericValue, ParseError, ValueInput};
use chrono::Utc;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Delay between marking a stale reel for removal and actually removing it,
/// leaving room for an exit transition.
pub const REMOVAL_GRACE_MS: f64 = 400.0;

// ============================================================================
// Errors
// ============================================================================

/// Errors surfaced by the odometer facade.
#[derive(Debug, Clone, PartialEq)]
pub enum OdometerError {
    Config(ConfigError),
    Parse(ParseError),
}

impl fmt::Display for OdometerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OdometerError::Config(err) => write!(f, "configuration error: {err}"),
            OdometerError::Parse(err) => write!(f, "parse error: {err}"),
        }
    }
}

impl std::error::Error for OdometerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OdometerError::Config(err) => Some(err),
            OdometerError::Parse(err) => Some(err),
        }
    }
}

impl From<ConfigError> for OdometerError {
    fn from(err: ConfigError) -> Self {
        OdometerError::Config(err)
    }
}

impl From<ParseError> for OdometerError {
    fn from(err: ParseError) -> Self {
        OdometerError::Parse(err)
    }
}

// ============================================================================
// Engine State
// ============================================================================

struct LiveTransition {
    epoch: u64,
    reels: Vec<Reel>,
    /// Animatable reels that have not yet settled.
    pending: usize,
    duration_ms: f64,
    easing: EasingFunction,
    /// Container holding every node of this transition.
    wrapper: NodeHandle,
}

struct EngineState {
    config: OdometerConfig,
    current: Option<Decimal>,
    current_display: Option<String>,
    transition: Option<LiveTransition>,
}

struct Shared {
    /// Bumped on every accepted transition; callbacks carrying an older
    /// epoch are orphaned and must not touch anything.
    epoch: AtomicU64,
    state: Mutex<EngineState>,
}

// ============================================================================
// Odometer
// ============================================================================

/// Odometer facade: owns the committed value and configuration, and drives
/// value transitions end-to-end through the injected renderer, frame clock,
/// and observer.
///
/// `set` returns as soon as the new reel set is built and committed;
/// animation and the deferred pruning of stale leading-zero/grouping reels
/// proceed on the frame clock. A second `set` issued mid-animation replaces
/// the live reel set; the superseded ticks and deferred removals observe a
/// bumped epoch and become no-ops.
pub struct Odometer {
    target: NodeHandle,
    renderer: Arc<dyn Renderer>,
    clock: Arc<dyn FrameClock>,
    observer: Arc<dyn TransitionObserver>,
    shared: Arc<Shared>,
}

impl Odometer {
    /// Create an odometer on `target` and render the configured initial
    /// value.
    ///
    /// # Errors
    /// `ConfigError` for unsupported or conflicting marks; the error is also
    /// rendered into `target` as a visible error state.
    pub fn new(
        target: NodeHandle,
        config: OdometerConfig,
        renderer: Arc<dyn Renderer>,
        clock: Arc<dyn FrameClock>,
        observer: Arc<dyn TransitionObserver>,
    ) -> Result<Self, OdometerError> {
        if let Err(err) = config.validate() {
            renderer.render_error(target, &err.to_string());
            return Err(err.into());
        }
        let config = config.normalized();
        let init_value = config.init_value.clone();

        let odometer = Self {
            target,
            renderer,
            clock,
            observer,
            shared: Arc::new(Shared {
                epoch: AtomicU64::new(0),
                state: Mutex::new(EngineState {
                    config,
                    current: None,
                    current_display: None,
                    transition: None,
                }),
            }),
        };

        odometer.set(init_value)?;
        Ok(odometer)
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Transition the display to `value`.
    ///
    /// A value equal to the committed one is a guaranteed no-op: no rebuild,
    /// no animation. The committed value and display target update
    /// synchronously; reels animate on the frame clock afterwards.
    ///
    /// # Errors
    /// `ParseError` when the input cannot be decomposed; the committed state
    /// is left untouched.
    pub fn set(&self, value: impl Into<ValueInput>) -> Result<(), OdometerError> {
        let new_value = NumericValue::parse(value)?;

        let mut events = Vec::new();
        let mut animatable_indices = Vec::new();
        let epoch;
        let completed;
        {
            let mut state = self.shared.state.lock();

            if state.current == Some(new_value.value) {
                tracing::debug!(value = %new_value.value, "set with equal value is a no-op");
                return Ok(());
            }

            let old_value = match state.current {
                Some(committed) => NumericValue::parse(committed)?,
                None => NumericValue::parse(0)?,
            };

            let cfg = state.config.clone();
            let (old_norm, new_norm) = isometric_pair(&old_value, &new_value, &cfg);
            let matrix = build_matrix(&old_norm, &new_norm, &cfg);

            // Supersede any live transition: bump the epoch first so its
            // in-flight callbacks go stale, then drop its visual tree.
            epoch = self.shared.epoch.fetch_add(1, Ordering::AcqRel) + 1;
            if let Some(previous) = state.transition.take() {
                self.renderer.remove(previous.wrapper);
            }

            let transition = self.build_reels(&matrix, &new_norm, &cfg, epoch);

            tracing::debug!(
                from = %old_norm.value,
                to = %new_norm.value,
                display = %new_norm.isometric,
                reels = transition.reels.len(),
                animatable = transition.pending,
                "transition started"
            );

            events.push(TransitionEvent::TransitionStarted {
                from: state.current,
                to: new_value.value,
                display_target: new_norm.isometric.clone(),
                reel_count: transition.reels.len(),
                animatable_count: transition.pending,
                timestamp: Utc::now(),
            });

            animatable_indices.extend(
                transition
                    .reels
                    .iter()
                    .enumerate()
                    .filter(|(_, r)| r.is_animatable())
                    .map(|(i, _)| i),
            );

            completed = transition.pending == 0;
            state.transition = Some(transition);
            state.current = Some(new_value.value);
            state.current_display = Some(new_norm.isometric);
        }

        self.observer.on_events(events);

        if completed {
            complete_transition(
                &self.shared,
                &self.renderer,
                &self.clock,
                &self.observer,
                epoch,
            );
        }

        for index in animatable_indices {
            schedule_reel_tick(
                Arc::clone(&self.shared),
                Arc::clone(&self.renderer),
                Arc::clone(&self.clock),
                Arc::clone(&self.observer),
                epoch,
                index,
            );
        }

        Ok(())
    }

    /// Build the visual tree and reel set for one transition: currency
    /// glyphs at the configured position, a sign glyph for negative targets,
    /// and one reel per matrix column, all under a fresh wrapper.
    fn build_reels(
        &self,
        matrix: &SymbolMatrix,
        target: &NormalizedValue,
        cfg: &OdometerConfig,
        epoch: u64,
    ) -> LiveTransition {
        let wrapper = self.renderer.create_container();
        self.renderer.attach(self.target, wrapper);

        if cfg.currency_position == CurrencyPosition::Start {
            self.attach_currency(wrapper, &cfg.currency_symbol);
        }

        if target.is_negative {
            let sign = self
                .renderer
                .create_symbol_node(&SymbolColumn::Static('-'), &ColumnKind::Sign.css_classes());
            self.renderer.attach(wrapper, sign);
        }

        let mut reels = Vec::with_capacity(matrix.columns.len());
        for matrix_column in &matrix.columns {
            let node = self.renderer.create_symbol_node(
                &matrix_column.column,
                &matrix_column.kind.css_classes(),
            );
            self.renderer.attach(wrapper, node);
            reels.push(Reel::new(
                matrix_column.column.clone(),
                matrix_column.kind,
                node,
                matrix.is_decreasing,
            ));
        }

        if cfg.currency_position == CurrencyPosition::End {
            self.attach_currency(wrapper, &cfg.currency_symbol);
        }

        let pending = reels.iter().filter(|r| r.is_animatable()).count();

        LiveTransition {
            epoch,
            reels,
            pending,
            duration_ms: cfg.animation_duration_ms,
            easing: cfg.easing.clone(),
            wrapper,
        }
    }

    fn attach_currency(&self, wrapper: NodeHandle, symbol: &str) {
        for glyph in symbol.chars() {
            let node = self.renderer.create_symbol_node(
                &SymbolColumn::Static(glyph),
                &ColumnKind::Currency.css_classes(),
            );
            self.renderer.attach(wrapper, node);
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The last committed value; zero before the seed transition commits.
    pub fn current_value(&self) -> Decimal {
        self.shared.state.lock().current.unwrap_or(Decimal::ZERO)
    }

    /// The isometric string the display settles at.
    pub fn current_display(&self) -> Option<String> {
        self.shared.state.lock().current_display.clone()
    }

    /// Defensive copy of the live configuration.
    pub fn options(&self) -> OdometerConfig {
        self.shared.state.lock().config.clone()
    }

    /// True when no reel of the live transition is still travelling.
    pub fn is_settled(&self) -> bool {
        self.shared
            .state
            .lock()
            .transition
            .as_ref()
            .map_or(true, |t| t.pending == 0)
    }

    /// Number of reels in the live transition, static columns included.
    pub fn reel_count(&self) -> usize {
        self.shared
            .state
            .lock()
            .transition
            .as_ref()
            .map_or(0, |t| t.reels.len())
    }

    /// The render target this odometer was constructed on.
    pub fn target(&self) -> NodeHandle {
        self.target
    }

    // ========================================================================
    // Configuration Setters
    // ========================================================================

    /// Change the grouping mark. Does not trigger a transition; the next
    /// `set` call renders with the new mark.
    ///
    /// # Errors
    /// `ConfigError` for an unsupported mark or one that collides with the
    /// decimal mark; the error is also rendered into the target.
    pub fn set_radix_mark(&self, mark: Option<char>) -> Result<(), ConfigError> {
        self.update_marks(|config| config.radix_mark = mark)
    }

    /// Change the decimal mark. Does not trigger a transition.
    ///
    /// # Errors
    /// `ConfigError` for an unsupported mark or one that collides with the
    /// radix mark; the error is also rendered into the target.
    pub fn set_decimal_mark(&self, mark: char) -> Result<(), ConfigError> {
        self.update_marks(|config| config.decimal_mark = mark)
    }

    fn update_marks(&self, mutate: impl FnOnce(&mut OdometerConfig)) -> Result<(), ConfigError> {
        let mut state = self.shared.state.lock();
        let mut candidate = state.config.clone();
        mutate(&mut candidate);
        match candidate.validate() {
            Ok(()) => {
                state.config = candidate;
                Ok(())
            },
            Err(err) => {
                drop(state);
                self.renderer.render_error(self.target, &err.to_string());
                Err(err)
            },
        }
    }

    /// Minimum rendered integer width; values below 1 clamp to 1.
    pub fn set_leading_zeros_length(&self, length: usize) {
        self.shared.state.lock().config.min_integers_length = length.max(1);
    }

    /// Minimum rendered decimal width.
    pub fn set_trailing_zeros_length(&self, length: usize) {
        self.shared.state.lock().config.min_decimals_length = length;
    }

    pub fn set_currency_position(&self, position: CurrencyPosition) {
        self.shared.state.lock().config.currency_position = position;
    }
}

// ============================================================================
// Frame-Clock Callbacks
// ============================================================================

/// Request one animation step for the reel at `index`. The callback
/// re-requests itself until the reel settles; a bumped epoch turns any
/// still-queued step into a no-op.
fn schedule_reel_tick(
    shared: Arc<Shared>,
    renderer: Arc<dyn Renderer>,
    clock: Arc<dyn FrameClock>,
    observer: Arc<dyn TransitionObserver>,
    epoch: u64,
    index: usize,
) {
    let tick_clock = Arc::clone(&clock);
    tick_clock.request_tick(Box::new(move |now_ms| {
        if shared.epoch.load(Ordering::Acquire) != epoch {
            tracing::trace!(epoch, "stale reel tick dropped");
            return;
        }

        let mut events = Vec::new();
        let mut reschedule = false;
        let mut completed = false;
        {
            let mut state = shared.state.lock();
            let Some(transition) = state.transition.as_mut() else {
                return;
            };
            if transition.epoch != epoch {
                return;
            }

            let easing = Arc::clone(&transition.easing);
            let duration_ms = transition.duration_ms;
            let reel = &mut transition.reels[index];
            let was_settled = reel.phase().is_terminal();

            let phase = reel.tick(now_ms, &easing, duration_ms);
            renderer.set_offset(reel.node, reel.signed_offset());

            match phase {
                ReelPhase::Settled if !was_settled => {
                    events.push(TransitionEvent::ReelSettled {
                        reel_id: reel.id,
                        timestamp: Utc::now(),
                    });
                    transition.pending = transition.pending.saturating_sub(1);
                    completed = transition.pending == 0;
                },
                ReelPhase::Settled => {},
                ReelPhase::Idle | ReelPhase::Animating => reschedule = true,
            }
        }

        if !events.is_empty() {
            observer.on_events(events);
        }
        if completed {
            complete_transition(&shared, &renderer, &clock, &observer, epoch);
        }
        if reschedule {
            schedule_reel_tick(shared, renderer, clock, observer, epoch, index);
        }
    }));
}

/// Joint-completion barrier: once every reel has settled, emit the
/// completion signal and schedule the pruning of now-unnecessary leading
/// zero and grouping reels.
fn complete_transition(
    shared: &Arc<Shared>,
    renderer: &Arc<dyn Renderer>,
    clock: &Arc<dyn FrameClock>,
    observer: &Arc<dyn TransitionObserver>,
    epoch: u64,
) {
    let mut events = Vec::new();
    {
        let state = shared.state.lock();
        let min_integers = state.config.min_integers_length;

        let Some(transition) = state.transition.as_ref() else {
            return;
        };
        if transition.epoch != epoch {
            return;
        }

        events.push(TransitionEvent::TransitionSettled {
            value: state.current.unwrap_or(Decimal::ZERO),
            display: state.current_display.clone().unwrap_or_default(),
            timestamp: Utc::now(),
        });

        let doomed = prune_candidates(&transition.reels, min_integers);
        if doomed.zero_reels > 0 || doomed.mark_reels > 0 {
            tracing::debug!(
                zeros = doomed.zero_reels,
                marks = doomed.mark_reels,
                "pruning stale reels after settlement"
            );
            events.push(TransitionEvent::ReelsPruned {
                zero_reels: doomed.zero_reels,
                mark_reels: doomed.mark_reels,
                timestamp: Utc::now(),
            });
            for node in doomed.nodes {
                schedule_removal(
                    Arc::clone(shared),
                    Arc::clone(renderer),
                    Arc::clone(clock),
                    epoch,
                    node,
                    None,
                );
            }
        }
    }
    observer.on_events(events);
}

struct PruneSet {
    nodes: Vec<NodeHandle>,
    zero_reels: usize,
    mark_reels: usize,
}

/// Decide which settled reels are now unnecessary. Leading integer reels
/// resting on zero go first, while the ungrouped integer width stays above
/// the configured minimum; grouping marks whose position
/// (`3 × remaining marks + 1`) falls outside the surviving width follow.
fn prune_candidates(reels: &[Reel], min_integers: usize) -> PruneSet {
    let integer_reels: Vec<&Reel> = reels
        .iter()
        .filter(|r| matches!(r.kind, ColumnKind::Integer { .. }))
        .collect();
    let mark_reels: Vec<&Reel> = reels
        .iter()
        .filter(|r| r.kind == ColumnKind::RadixMark)
        .collect();

    let mut nodes = Vec::new();
    let mut surviving = integer_reels.len();
    let mut zero_reels = 0;

    for reel in &integer_reels {
        if surviving <= min_integers || reel.column.final_symbol() != '0' {
            break;
        }
        nodes.push(reel.node);
        surviving -= 1;
        zero_reels += 1;
    }

    let mut pruned_marks = 0;
    let mut leading_mark_position = 3 * mark_reels.len() + 1;
    for reel in &mark_reels {
        if leading_mark_position <= surviving {
            break;
        }
        nodes.push(reel.node);
        leading_mark_position -= 3;
        pruned_marks += 1;
    }

    PruneSet {
        nodes,
        zero_reels,
        mark_reels: pruned_marks,
    }
}

/// One-shot deferred removal. The first firing stamps the grace deadline;
/// subsequent firings wait for it. A bumped epoch cancels the removal, and
/// renderers treat removal of an already-gone node as a no-op.
fn schedule_removal(
    shared: Arc<Shared>,
    renderer: Arc<dyn Renderer>,
    clock: Arc<dyn FrameClock>,
    epoch: u64,
    node: NodeHandle,
    due_ms: Option<f64>,
) {
    let tick_clock = Arc::clone(&clock);
    tick_clock.request_tick(Box::new(move |now_ms| {
        if shared.epoch.load(Ordering::Acquire) != epoch {
            tracing::trace!(epoch, "stale deferred removal dropped");
            return;
        }
        match due_ms {
            Some(due) if now_ms >= due => renderer.remove(node),
            Some(due) => schedule_removal(shared, renderer, clock, epoch, node, Some(due)),
            None => schedule_removal(
                shared,
                renderer,
                clock,
                epoch,
                node,
                Some(now_ms + REMOVAL_GRACE_MS),
            ),
        }
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::{ManualFrameClock, NoOpObserver, TextRenderer};

    fn fixture(config: OdometerConfig) -> (Arc<TextRenderer>, Arc<ManualFrameClock>, Odometer) {
        let renderer = Arc::new(TextRenderer::new());
        let clock = Arc::new(ManualFrameClock::new());
        let target = renderer.create_container();
        let odometer = Odometer::new(
            target,
            config,
            Arc::clone(&renderer) as Arc<dyn Renderer>,
            Arc::clone(&clock) as Arc<dyn FrameClock>,
            Arc::new(NoOpObserver),
        )
        .unwrap();
        (renderer, clock, odometer)
    }

    #[test]
    fn test_seed_transition_renders_initial_value() {
        let (renderer, clock, odometer) =
            fixture(OdometerConfig::default().with_init_value(42).with_min_integers_length(4));
        clock.run_to_idle();
        assert_eq!(renderer.display_string(odometer.target()), "0042");
        assert_eq!(odometer.current_value(), Decimal::from(42));
    }

    #[test]
    fn test_construction_rejects_conflicting_marks() {
        let renderer = Arc::new(TextRenderer::new());
        let clock = Arc::new(ManualFrameClock::new());
        let target = renderer.create_container();
        let result = Odometer::new(
            target,
            OdometerConfig::default()
                .with_radix_mark(Some('.'))
                .with_decimal_mark('.'),
            Arc::clone(&renderer) as Arc<dyn Renderer>,
            clock as Arc<dyn FrameClock>,
            Arc::new(NoOpObserver),
        );
        assert!(matches!(
            result,
            Err(OdometerError::Config(ConfigError::MarkConflict('.')))
        ));
        // The error is rendered into the target.
        assert!(renderer.display_string(target).contains("decimal mark"));
    }

    #[test]
    fn test_set_animates_to_new_value() {
        let (renderer, clock, odometer) = fixture(
            OdometerConfig::default()
                .with_animation_duration_ms(200.0)
                .with_min_integers_length(3),
        );
        clock.run_to_idle();

        odometer.set(256).unwrap();
        assert_eq!(odometer.current_value(), Decimal::from(256));
        assert!(!odometer.is_settled());

        clock.run_to_idle();
        assert!(odometer.is_settled());
        assert_eq!(renderer.display_string(odometer.target()), "256");
    }

    #[test]
    fn test_equal_value_set_is_noop() {
        let (renderer, clock, odometer) = fixture(OdometerConfig::default().with_init_value(5));
        clock.run_to_idle();
        let nodes_before = renderer.node_count();

        odometer.set(5).unwrap();
        assert_eq!(clock.pending(), 0);
        assert_eq!(renderer.node_count(), nodes_before);

        // Numerically equal text is also a no-op.
        odometer.set("5.0").unwrap();
        assert_eq!(clock.pending(), 0);
        assert_eq!(renderer.node_count(), nodes_before);
    }

    #[test]
    fn test_parse_error_leaves_committed_state() {
        let (_, clock, odometer) = fixture(OdometerConfig::default().with_init_value(9));
        clock.run_to_idle();

        let err = odometer.set("12a").unwrap_err();
        assert!(matches!(err, OdometerError::Parse(ParseError::Invalid(_))));
        assert_eq!(odometer.current_value(), Decimal::from(9));
        assert_eq!(odometer.current_display().as_deref(), Some("9"));
    }

    #[test]
    fn test_currency_and_sign_decoration() {
        let (renderer, clock, odometer) = fixture(
            OdometerConfig::default()
                .with_currency_symbol("$")
                .with_min_decimals_length(2)
                .with_animation_duration_ms(100.0),
        );
        clock.run_to_idle();
        assert_eq!(renderer.display_string(odometer.target()), "$0.00");

        odometer.set(-3.5).unwrap();
        clock.run_to_idle();
        assert_eq!(renderer.display_string(odometer.target()), "$-3.50");
    }

    #[test]
    fn test_currency_at_end() {
        let (renderer, clock, odometer) = fixture(
            OdometerConfig::default()
                .with_currency_symbol("CHF")
                .with_currency_position(CurrencyPosition::End),
        );
        clock.run_to_idle();
        assert_eq!(renderer.display_string(odometer.target()), "0CHF");
    }

    #[test]
    fn test_reentrant_set_supersedes_live_transition() {
        let (renderer, clock, odometer) = fixture(
            OdometerConfig::default().with_animation_duration_ms(2000.0),
        );
        clock.run_to_idle();

        odometer.set(8).unwrap();
        // A few frames in, the first transition is still travelling.
        clock.fire_frame(0.0);
        clock.fire_frame(16.0);
        assert!(!odometer.is_settled());

        odometer.set(3).unwrap();
        assert_eq!(odometer.current_value(), Decimal::from(3));

        // Orphaned callbacks fire harmlessly; the display settles on the
        // superseding value.
        clock.run_to_idle();
        assert_eq!(renderer.display_string(odometer.target()), "3");
        assert!(odometer.is_settled());
    }

    #[test]
    fn test_mark_setters_validate() {
        let (renderer, clock, odometer) = fixture(OdometerConfig::default());
        clock.run_to_idle();

        odometer.set_radix_mark(Some('\'')).unwrap();
        assert_eq!(odometer.options().radix_mark, Some('\''));

        let err = odometer.set_radix_mark(Some('#')).unwrap_err();
        assert_eq!(err, ConfigError::UnsupportedRadixMark('#'));
        // Rejected mark left the config untouched and rendered the fault.
        assert_eq!(odometer.options().radix_mark, Some('\''));
        assert!(renderer
            .display_string(odometer.target())
            .contains("unsupported radix mark"));

        let err = odometer.set_decimal_mark(',').and(odometer.set_radix_mark(Some(',')));
        assert_eq!(err, Err(ConfigError::MarkConflict(',')));
    }

    #[test]
    fn test_length_setters_clamp() {
        let (_, clock, odometer) = fixture(OdometerConfig::default());
        clock.run_to_idle();

        odometer.set_leading_zeros_length(0);
        assert_eq!(odometer.options().min_integers_length, 1);
        odometer.set_leading_zeros_length(4);
        assert_eq!(odometer.options().min_integers_length, 4);
        odometer.set_trailing_zeros_length(2);
        assert_eq!(odometer.options().min_decimals_length, 2);
    }

    #[test]
    fn test_setters_do_not_trigger_transitions() {
        let (_, clock, odometer) = fixture(OdometerConfig::default().with_init_value(7));
        clock.run_to_idle();

        odometer.set_leading_zeros_length(5);
        odometer.set_currency_position(CurrencyPosition::End);
        assert_eq!(clock.pending(), 0);
        assert_eq!(odometer.current_display().as_deref(), Some("7"));
    }

    #[test]
    fn test_cleanup_prunes_leading_zeros_after_grace() {
        let (renderer, clock, odometer) = fixture(
            OdometerConfig::default().with_animation_duration_ms(100.0),
        );
        clock.run_to_idle();

        odometer.set(123456).unwrap();
        clock.run_to_idle();
        assert_eq!(renderer.display_string(odometer.target()), "123456");

        odometer.set(5).unwrap();
        assert_eq!(odometer.current_display().as_deref(), Some("000005"));
        let settled_at = clock.run_to_idle();

        // The pruning drained within the run: leading zeros down to width 1.
        assert_eq!(renderer.display_string(odometer.target()), "5");
        assert!(settled_at >= REMOVAL_GRACE_MS);
    }

    #[test]
    fn test_cleanup_removes_orphaned_grouping_marks() {
        let (renderer, clock, odometer) = fixture(
            OdometerConfig::default()
                .with_radix_mark(Some(','))
                .with_commafy_leading_zeros(true)
                .with_animation_duration_ms(100.0),
        );
        clock.run_to_idle();

        odometer.set(123456).unwrap();
        clock.run_to_idle();
        assert_eq!(renderer.display_string(odometer.target()), "123,456");

        odometer.set(42).unwrap();
        // Width stays at six until settlement; forced grouping keeps the
        // mark through the zero padding.
        assert_eq!(odometer.current_display().as_deref(), Some("000,042"));
        clock.run_to_idle();

        assert_eq!(renderer.display_string(odometer.target()), "42");
    }

    #[test]
    fn test_cleanup_respects_minimum_width() {
        let (renderer, clock, odometer) = fixture(
            OdometerConfig::default()
                .with_min_integers_length(4)
                .with_animation_duration_ms(100.0),
        );
        clock.run_to_idle();

        odometer.set(123456).unwrap();
        clock.run_to_idle();
        odometer.set(7).unwrap();
        clock.run_to_idle();

        assert_eq!(renderer.display_string(odometer.target()), "0007");
    }

    #[test]
    fn test_reentrant_set_cancels_pending_removals() {
        let (renderer, clock, odometer) = fixture(
            OdometerConfig::default().with_animation_duration_ms(100.0),
        );
        clock.run_to_idle();

        odometer.set(1234).unwrap();
        clock.run_to_idle();

        odometer.set(5).unwrap();
        // Drive just past settlement, inside the removal grace window.
        let mut now = 0.0;
        while !odometer.is_settled() {
            clock.fire_frame(now);
            now += 16.0;
        }

        // Supersede before the grace elapses; the deferred removals must not
        // touch the new transition's nodes.
        odometer.set(6789).unwrap();
        clock.run_to_idle();
        assert_eq!(renderer.display_string(odometer.target()), "6789");
    }
}
