// ============================================================================
// Basic Usage Example
// ============================================================================

use odometer_engine::prelude::*;
use std::sync::Arc;

fn main() {
    println!("=== Odometer Engine Example ===\n");

    let renderer = Arc::new(TextRenderer::new());
    let clock = Arc::new(ManualFrameClock::new());

    // Create an odometer with US-style grouping and a dollar sign
    let odometer = OdometerBuilder::us_currency()
        .with_renderer(Arc::clone(&renderer) as Arc<dyn Renderer>)
        .with_clock(Arc::clone(&clock) as Arc<dyn FrameClock>)
        .with_observer(Arc::new(LoggingObserver))
        .min_integers_length(6)
        .animation_duration_ms(800.0)
        .build()
        .expect("valid configuration");

    clock.run_to_idle();
    println!(
        "Seeded display:   {}",
        renderer.display_string(odometer.target())
    );

    // Roll up to a larger value and watch a few frames go by
    odometer.set(1234.5).expect("parsable value");
    println!("\nRolling to 1234.5 ...");
    for frame in 0..5 {
        clock.fire_frame(frame as f64 * 160.0);
        println!(
            "  frame {:>2}:       {}",
            frame,
            renderer.display_string(odometer.target())
        );
    }
    clock.run_to_idle();
    println!(
        "Settled display:  {}",
        renderer.display_string(odometer.target())
    );

    // Roll back down; the engine prunes stale leading zeros afterwards
    odometer.set(7).expect("parsable value");
    clock.run_to_idle();
    println!(
        "\nAfter set(7):     {}",
        renderer.display_string(odometer.target())
    );

    println!("\nCommitted value:  {}", odometer.current_value());
    println!("Display target:   {:?}", odometer.current_display());
}
