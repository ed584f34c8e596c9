// ============================================================================
// Transition Observer Interface
// Defines the contract for handling transition lifecycle events
// ============================================================================

use crate::domain::ReelId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Events emitted by the odometer engine
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TransitionEvent {
    /// A value transition was accepted and its reels were built
    TransitionStarted {
        /// Previously committed value; `None` for the seed transition
        from: Option<Decimal>,
        to: Decimal,
        /// The isometric string the display will settle at
        display_target: String,
        reel_count: usize,
        animatable_count: usize,
        timestamp: DateTime<Utc>,
    },

    /// One reel reached its resting position
    ReelSettled {
        reel_id: ReelId,
        timestamp: DateTime<Utc>,
    },

    /// All reels of the transition settled; this is the completion signal
    TransitionSettled {
        value: Decimal,
        display: String,
        timestamp: DateTime<Utc>,
    },

    /// Stale leading-zero and grouping reels were scheduled for removal
    ReelsPruned {
        zero_reels: usize,
        mark_reels: usize,
        timestamp: DateTime<Utc>,
    },
}

/// Observer trait for processing transition events
/// Implementations can handle logging, metrics, completion signalling, etc.
pub trait TransitionObserver: Send + Sync {
    /// Handle a transition event
    fn on_event(&self, event: TransitionEvent);

    /// Batch event handler (optional optimization)
    fn on_events(&self, events: Vec<TransitionEvent>) {
        for event in events {
            self.on_event(event);
        }
    }
}

/// No-op observer for testing
pub struct NoOpObserver;

impl TransitionObserver for NoOpObserver {
    fn on_event(&self, _event: TransitionEvent) {
        // Do nothing
    }
}

/// Logging observer
pub struct LoggingObserver;

impl TransitionObserver for LoggingObserver {
    fn on_event(&self, event: TransitionEvent) {
        tracing::debug!("Odometer event: {:?}", event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_observer() {
        let observer = NoOpObserver;
        observer.on_event(TransitionEvent::ReelSettled {
            reel_id: ReelId::new(),
            timestamp: Utc::now(),
        });
        // Should not panic
    }

    #[test]
    fn test_batch_delivery_preserves_order() {
        use parking_lot::Mutex;

        struct Recorder(Mutex<Vec<String>>);
        impl TransitionObserver for Recorder {
            fn on_event(&self, event: TransitionEvent) {
                let label = match event {
                    TransitionEvent::TransitionStarted { .. } => "started",
                    TransitionEvent::ReelSettled { .. } => "reel",
                    TransitionEvent::TransitionSettled { .. } => "settled",
                    TransitionEvent::ReelsPruned { .. } => "pruned",
                };
                self.0.lock().push(label.to_string());
            }
        }

        let recorder = Recorder(Mutex::new(Vec::new()));
        recorder.on_events(vec![
            TransitionEvent::ReelSettled {
                reel_id: ReelId::new(),
                timestamp: Utc::now(),
            },
            TransitionEvent::TransitionSettled {
                value: Decimal::from(5),
                display: "5".to_string(),
                timestamp: Utc::now(),
            },
        ]);
        assert_eq!(recorder.0.lock().as_slice(), &["reel", "settled"]);
    }
}
