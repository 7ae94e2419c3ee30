//! Animation state of the engine.

use serde::{Deserialize, Serialize};

/// Direction of travel along the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// +1 forward, -1 backward.
    #[inline]
    pub fn signum(self) -> i8 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }

    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }

    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
        }
    }
}

/// Traversal state of the engine. The fractional offset along the
/// active segment lives on the engine itself (it is equally alive
/// while animating and while paused).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationState {
    /// No leg in flight; the cursor names the current scene.
    Idle,
    /// A leg is in flight and advances on every tick.
    Animating(Direction),
    /// A leg is suspended mid-segment; the leading edge stays put.
    Paused(Direction),
}

impl AnimationState {
    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        matches!(self, Self::Animating(_))
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        matches!(self, Self::Paused(_))
    }

    /// Direction of the active or suspended leg, if any.
    #[inline]
    pub fn heading(&self) -> Option<Direction> {
        match self {
            Self::Idle => None,
            Self::Animating(dir) | Self::Paused(dir) => Some(*dir),
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Animating(_) => "animating",
            Self::Paused(_) => "paused",
        }
    }
}
