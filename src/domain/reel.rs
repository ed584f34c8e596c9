// ============================================================================
// Reel
// One animatable column and its position state machine
// ============================================================================

use crate::domain::column::{ColumnKind, SymbolColumn};
use crate::engine::easing::EasingFunction;
use crate::interfaces::renderer::NodeHandle;
use uuid::Uuid;

// ============================================================================
// Value Objects
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReelId(Uuid);

impl ReelId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ReelId {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Reel State Machine
// ============================================================================

/// Lifecycle of a reel: `Idle --first tick--> Animating --travel
/// reached--> Settled`. Non-animatable reels are born settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReelPhase {
    Idle,
    Animating,
    Settled,
}

impl ReelPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ReelPhase::Settled)
    }
}

/// A single character position bound to one symbol column.
///
/// The position cursor is monotonic: the maximum eased position seen so far
/// is retained, so a non-monotonic easing function can never make the reel
/// regress visually. An eased value that drops below the retained maximum
/// means the curve is past its peak, and the reel snaps to its final offset.
#[derive(Debug, Clone)]
pub struct Reel {
    pub id: ReelId,
    pub column: SymbolColumn,
    pub kind: ColumnKind,
    pub node: NodeHandle,
    is_decreasing: bool,
    position: f64,
    started_at: Option<f64>,
    phase: ReelPhase,
}

impl Reel {
    pub fn new(column: SymbolColumn, kind: ColumnKind, node: NodeHandle, is_decreasing: bool) -> Self {
        let phase = if column.is_animatable() {
            ReelPhase::Idle
        } else {
            ReelPhase::Settled
        };
        Self {
            id: ReelId::new(),
            column,
            kind,
            node,
            is_decreasing,
            position: 0.0,
            started_at: None,
            phase,
        }
    }

    pub fn is_animatable(&self) -> bool {
        self.column.is_animatable()
    }

    /// Distance to travel: one unit per symbol spun.
    pub fn travel(&self) -> f64 {
        (self.column.len() - 1) as f64
    }

    pub fn phase(&self) -> ReelPhase {
        self.phase
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    /// Offset pushed to the renderer: positive when the transition is
    /// decreasing, negative otherwise.
    pub fn signed_offset(&self) -> f64 {
        if self.is_decreasing {
            self.position
        } else {
            -self.position
        }
    }

    /// Advance the animation to `now_ms`. The first tick records the start
    /// time; settlement happens when the eased position reaches the travel
    /// distance, the duration elapses, or the easing output regresses.
    pub fn tick(&mut self, now_ms: f64, easing: &EasingFunction, duration_ms: f64) -> ReelPhase {
        if self.phase == ReelPhase::Settled {
            return self.phase;
        }

        let started_at = *self.started_at.get_or_insert(now_ms);
        self.phase = ReelPhase::Animating;

        let elapsed = now_ms - started_at;
        let travel = self.travel();
        let eased = (easing)(elapsed, 0.0, travel, duration_ms);

        if elapsed >= duration_ms || eased < self.position {
            self.position = travel;
            self.phase = ReelPhase::Settled;
        } else {
            self.position = self.position.max(eased.min(travel));
            if self.position >= travel {
                self.phase = ReelPhase::Settled;
            }
        }

        self.phase
    }
}
