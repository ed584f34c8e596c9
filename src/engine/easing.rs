// ============================================================================
// Easing Functions
// Pluggable position curves for reel animation
// ============================================================================

use std::sync::Arc;

/// Position curve signature: `(elapsed, start, distance, duration)` →
/// position. Pure; the engine clamps the output, so curves may overshoot
/// or regress past their peak.
///
/// Modeled as an injected function rather than a trait so closures and
/// plain `fn` items both plug in.
pub type EasingFunction = Arc<dyn Fn(f64, f64, f64, f64) -> f64 + Send + Sync>;

/// Constant-velocity curve.
pub fn linear(elapsed: f64, start: f64, distance: f64, duration: f64) -> f64 {
    distance * elapsed / duration + start
}

/// Quadratic ease-out: fast start, decelerating landing. The default.
pub fn ease_out_quad(elapsed: f64, start: f64, distance: f64, duration: f64) -> f64 {
    let t = elapsed / duration;
    -distance * t * (t - 2.0) + start
}

/// Cubic ease-in-out: slow start, fast middle, slow landing.
pub fn ease_in_out_cubic(elapsed: f64, start: f64, distance: f64, duration: f64) -> f64 {
    let t = 2.0 * elapsed / duration;
    if t < 1.0 {
        distance / 2.0 * t * t * t + start
    } else {
        let t = t - 2.0;
        distance / 2.0 * (t * t * t + 2.0) + start
    }
}

/// The engine's default curve.
pub fn default_easing() -> EasingFunction {
    Arc::new(ease_out_quad)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVES: [fn(f64, f64, f64, f64) -> f64; 3] = [linear, ease_out_quad, ease_in_out_cubic];

    #[test]
    fn test_curves_hit_both_endpoints() {
        for curve in CURVES {
            assert!((curve(0.0, 0.0, 10.0, 200.0) - 0.0).abs() < 1e-9);
            assert!((curve(200.0, 0.0, 10.0, 200.0) - 10.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_start_offset_shifts_output() {
        for curve in CURVES {
            assert!((curve(200.0, 5.0, 10.0, 200.0) - 15.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_ease_out_quad_front_loads_progress() {
        let halfway = ease_out_quad(100.0, 0.0, 10.0, 200.0);
        assert!(halfway > 5.0);
    }

    #[test]
    fn test_ease_out_quad_regresses_past_duration() {
        // Past t = d the parabola falls away; the reel state machine relies
        // on detecting this to snap to the final offset.
        let at_end = ease_out_quad(200.0, 0.0, 10.0, 200.0);
        let beyond = ease_out_quad(300.0, 0.0, 10.0, 200.0);
        assert!(beyond < at_end);
    }

    #[test]
    fn test_ease_in_out_cubic_is_symmetric() {
        let early = ease_in_out_cubic(50.0, 0.0, 10.0, 200.0);
        let late = ease_in_out_cubic(150.0, 0.0, 10.0, 200.0);
        assert!((early + late - 10.0).abs() < 1e-9);
    }
}
