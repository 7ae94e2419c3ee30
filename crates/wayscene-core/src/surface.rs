//! Boundary to the host's rendering surface.

use crate::waypoint::{GeoBounds, Waypoint};

/// Camera commands and queries against the host's map view.
///
/// Commands take visual effect asynchronously: the surface reports
/// readiness out-of-band with a one-shot "settled" notification, which
/// the host forwards to the engine via
/// [`notify_settled`](crate::PathAnimationEngine::notify_settled)
/// together with the handle from
/// [`pending_settle`](crate::PathAnimationEngine::pending_settle).
pub trait MapSurface {
    /// Move the camera so that `bounds` is fully in view.
    fn fit_bounds(&mut self, bounds: GeoBounds);

    /// Move the camera so that `point` is centered.
    fn pan_to(&mut self, point: Waypoint);

    /// Current camera center.
    fn center(&self) -> Waypoint;
}
