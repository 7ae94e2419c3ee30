//! Wayscene core (surface-agnostic)
//!
//! Drives a map view through an ordered sequence of geographic scenes:
//! a progressively drawn path whose leading edge advances along
//! great-circle arcs, and camera choreography (fit-to-bounds, pan,
//! completion signalling) sequenced against a rendering surface that
//! only reports readiness asynchronously.
//!
//! The host owns the clock and the surface: it calls
//! [`PathAnimationEngine::tick`] once per frame while
//! [`PathAnimationEngine::wants_tick`] is true, and forwards the
//! surface's "settled" notifications through
//! [`PathAnimationEngine::notify_settled`].

pub mod camera;
pub mod config;
pub mod engine;
pub mod error;
pub mod interp;
pub mod path;
pub mod state;
pub mod surface;
pub mod waypoint;

// Re-exports for consumers (hosts and adapters)
pub use camera::{CameraTransitionCoordinator, SettleHandle, TransitionCallback};
pub use config::EngineConfig;
pub use engine::PathAnimationEngine;
pub use error::PathError;
pub use interp::interpolate;
pub use path::PathBuffer;
pub use state::{AnimationState, Direction};
pub use surface::MapSurface;
pub use waypoint::{GeoBounds, Waypoint};

/// Result type for path edits.
pub type Result<T> = core::result::Result<T, PathError>;
