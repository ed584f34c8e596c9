// ============================================================================
// Frame Clock Interface
// Defines the contract for per-frame timing callbacks
// ============================================================================

use parking_lot::Mutex;

/// A one-shot animation callback, invoked with the clock's current
/// timestamp in milliseconds.
pub type TickCallback = Box<dyn FnOnce(f64) + Send>;

/// Display-timing collaborator.
///
/// `request_tick` schedules `callback` to be invoked exactly once,
/// asynchronously, before the next display refresh. Implementations must
/// never invoke the callback synchronously from inside `request_tick`: the
/// engine re-requests ticks while holding its state lock. Animation loops
/// re-request a tick for every step.
pub trait FrameClock: Send + Sync {
    fn request_tick(&self, callback: TickCallback);
}

// ============================================================================
// Manual Frame Clock
// ============================================================================

/// Deterministic clock driven by the caller.
///
/// Callbacks queue until [`fire_frame`] delivers them with a caller-chosen
/// timestamp. Callbacks scheduled during a frame (animation steps
/// re-requesting themselves) land in the next frame, matching a real
/// display clock.
///
/// [`fire_frame`]: ManualFrameClock::fire_frame
pub struct ManualFrameClock {
    queue: Mutex<Vec<TickCallback>>,
}

impl ManualFrameClock {
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(Vec::new()),
        }
    }

    /// Number of callbacks waiting for the next frame.
    pub fn pending(&self) -> usize {
        self.queue.lock().len()
    }

    /// Deliver one frame at `timestamp_ms`. Returns how many callbacks ran.
    pub fn fire_frame(&self, timestamp_ms: f64) -> usize {
        let frame: Vec<TickCallback> = std::mem::take(&mut *self.queue.lock());
        let count = frame.len();
        for callback in frame {
            callback(timestamp_ms);
        }
        count
    }

    /// Fire frames at a fixed interval until the queue drains or the frame
    /// budget runs out. Returns the timestamp after the last frame, a
    /// convenient base for driving subsequent deferred actions.
    pub fn run(&self, start_ms: f64, step_ms: f64, max_frames: usize) -> f64 {
        let mut now = start_ms;
        for _ in 0..max_frames {
            if self.fire_frame(now) == 0 {
                break;
            }
            now += step_ms;
        }
        now
    }

    /// Drive frames at a 16ms cadence until the clock goes idle.
    pub fn run_to_idle(&self) -> f64 {
        self.run(0.0, 16.0, 100_000)
    }
}

impl Default for ManualFrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for ManualFrameClock {
    fn request_tick(&self, callback: TickCallback) {
        self.queue.lock().push(callback);
    }
}

// ============================================================================
// Tokio Frame Clock
// ============================================================================

/// Real-time clock backed by the tokio timer. Each requested tick fires
/// after one frame interval with the elapsed wall-clock time since the
/// clock was created.
///
/// Must be used from within a tokio runtime; callbacks run on runtime
/// worker threads.
#[cfg(feature = "async")]
pub struct TokioFrameClock {
    started_at: std::time::Instant,
    frame_interval: std::time::Duration,
}

#[cfg(feature = "async")]
impl TokioFrameClock {
    /// A clock ticking at roughly 60 frames per second.
    pub fn new() -> Self {
        Self::with_frame_interval(std::time::Duration::from_millis(16))
    }

    pub fn with_frame_interval(frame_interval: std::time::Duration) -> Self {
        Self {
            started_at: std::time::Instant::now(),
            frame_interval,
        }
    }
}

#[cfg(feature = "async")]
impl Default for TokioFrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "async")]
impl FrameClock for TokioFrameClock {
    fn request_tick(&self, callback: TickCallback) {
        let started_at = self.started_at;
        let frame_interval = self.frame_interval;
        tokio::spawn(async move {
            tokio::time::sleep(frame_interval).await;
            callback(started_at.elapsed().as_secs_f64() * 1000.0);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_callbacks_wait_for_a_frame() {
        let clock = ManualFrameClock::new();
        let fired = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&fired);
        clock.request_tick(Box::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert_eq!(clock.fire_frame(0.0), 1);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn test_rerequest_lands_in_next_frame() {
        let clock = Arc::new(ManualFrameClock::new());
        let timestamps = Arc::new(Mutex::new(Vec::new()));

        let clock2 = Arc::clone(&clock);
        let seen = Arc::clone(&timestamps);
        clock.request_tick(Box::new(move |ts| {
            seen.lock().push(ts);
            let seen2 = Arc::clone(&seen);
            clock2.request_tick(Box::new(move |ts| {
                seen2.lock().push(ts);
            }));
        }));

        clock.fire_frame(100.0);
        assert_eq!(timestamps.lock().as_slice(), &[100.0]);
        clock.fire_frame(116.0);
        assert_eq!(timestamps.lock().as_slice(), &[100.0, 116.0]);
    }

    #[test]
    fn test_run_drains_chained_callbacks() {
        let clock = Arc::new(ManualFrameClock::new());
        let fired = Arc::new(AtomicUsize::new(0));

        fn chain(clock: Arc<ManualFrameClock>, fired: Arc<AtomicUsize>, remaining: usize) {
            if remaining == 0 {
                return;
            }
            let c = Arc::clone(&clock);
            clock.request_tick(Box::new(move |_| {
                fired.fetch_add(1, Ordering::SeqCst);
                chain(c.clone(), fired, remaining - 1);
            }));
        }

        chain(Arc::clone(&clock), Arc::clone(&fired), 5);
        let end = clock.run(0.0, 16.0, 100);
        assert_eq!(fired.load(Ordering::SeqCst), 5);
        assert_eq!(end, 80.0);
        assert_eq!(clock.pending(), 0);
    }
}
