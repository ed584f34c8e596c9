// ============================================================================
// Interfaces Module
// Contains all collaborator trait definitions and contracts
// ============================================================================

mod frame_clock;
mod observer;
pub mod renderer;

pub use frame_clock::{FrameClock, ManualFrameClock, TickCallback};
pub use observer::{LoggingObserver, NoOpObserver, TransitionEvent, TransitionObserver};
pub use renderer::{NodeHandle, NoOpRenderer, Renderer, TextRenderer};

#[cfg(feature = "async")]
pub use frame_clock::TokioFrameClock;
