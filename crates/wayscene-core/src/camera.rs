//! Camera transition sequencing against an asynchronously settling
//! surface.
//!
//! The coordinator turns "cover these points, optionally ending
//! centered on the last one" into exactly one camera command followed
//! by exactly one completion, on a surface that only reports readiness
//! through a one-shot settle notification. At most one settle
//! subscription is ever outstanding; every camera-moving call replaces
//! it, and a monotonic handle compared at fire time keeps stale settle
//! events from completing the wrong request.

use crate::surface::MapSurface;
use crate::waypoint::{GeoBounds, Waypoint};

/// Callback invoked once when a requested transition has completed.
pub type TransitionCallback = Box<dyn FnOnce()>;

/// Identifies the single outstanding settle subscription. The host
/// echoes this back when the surface reports that the camera settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SettleHandle(u64);

/// What to do when the pending settle fires.
enum SettleAction {
    /// The transition is done; run the callback.
    Complete,
    /// Fit finished; chain into a pan whose own settle completes.
    PanThen { point: Waypoint },
}

struct PendingSettle {
    handle: SettleHandle,
    action: SettleAction,
    on_complete: Option<TransitionCallback>,
}

/// Sequences fit-bounds → pan → completion against the attached
/// surface. Owns the surface handle and the one pending subscription.
#[derive(Default)]
pub struct CameraTransitionCoordinator {
    surface: Option<Box<dyn MapSurface>>,
    pending: Option<PendingSettle>,
    next_handle: u64,
}

impl CameraTransitionCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap the rendering surface. Any pending settle is dropped: it
    /// belonged to a command on the previous surface.
    pub fn attach_surface(&mut self, surface: Option<Box<dyn MapSurface>>) {
        self.stop_transition();
        self.surface = surface;
    }

    #[inline]
    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    /// Handle of the outstanding settle subscription, if any.
    #[inline]
    pub fn pending_settle(&self) -> Option<SettleHandle> {
        self.pending.as_ref().map(|p| p.handle)
    }

    /// Cancel any pending settle subscription. Idempotent; the stale
    /// completion can never fire afterwards.
    pub fn stop_transition(&mut self) {
        if self.pending.take().is_some() {
            log::trace!("camera: cancelled pending settle");
        }
    }

    /// Frame the camera on every valid point in `points`. With
    /// `pan_to_last`, the fit's settle chains into a pan to the last
    /// valid point, whose own settle completes the request.
    ///
    /// Degenerate regions (zero extent in both dimensions) skip the
    /// fit and degrade to [`pan_to`](Self::pan_to) on the last valid
    /// point. Without a surface the request completes synchronously.
    pub fn fit_to_bounds(
        &mut self,
        points: &[Waypoint],
        pan_to_last: bool,
        on_complete: Option<TransitionCallback>,
    ) {
        self.stop_transition();

        let last_valid = points.iter().rev().copied().find(Waypoint::is_valid);
        let bounds = GeoBounds::from_points(points);
        let fittable = self.surface.is_some()
            && bounds.map(|b| !b.is_degenerate()).unwrap_or(false);
        if !fittable {
            match last_valid {
                Some(point) => self.pan_to(point, on_complete),
                None => {
                    if let Some(cb) = on_complete {
                        cb();
                    }
                }
            }
            return;
        }

        let handle = self.alloc_handle();
        if let (Some(surface), Some(bounds)) = (self.surface.as_mut(), bounds) {
            log::trace!("camera: fit bounds {:?}", bounds);
            surface.fit_bounds(bounds);
        }
        let action = match (pan_to_last, last_valid) {
            (true, Some(point)) => SettleAction::PanThen { point },
            _ => SettleAction::Complete,
        };
        self.pending = Some(PendingSettle {
            handle,
            action,
            on_complete,
        });
    }

    /// Center the camera on `point`. An invalid point, a missing
    /// surface, or a camera already centered there completes
    /// synchronously without issuing a command; this is the single
    /// sanctioned synchronous completion path.
    pub fn pan_to(&mut self, point: Waypoint, on_complete: Option<TransitionCallback>) {
        self.stop_transition();

        let needs_pan = point.is_valid()
            && self
                .surface
                .as_ref()
                .map(|s| s.center() != point)
                .unwrap_or(false);
        if !needs_pan {
            if let Some(cb) = on_complete {
                cb();
            }
            return;
        }

        let handle = self.alloc_handle();
        if let Some(surface) = self.surface.as_mut() {
            log::trace!("camera: pan to {:?}", point);
            surface.pan_to(point);
        }
        self.pending = Some(PendingSettle {
            handle,
            action: SettleAction::Complete,
            on_complete,
        });
    }

    /// Entry point for the surface's one-shot settle notification.
    /// Only the handle of the outstanding subscription is honored;
    /// anything else is a stale completion and is ignored.
    pub fn notify_settled(&mut self, handle: SettleHandle) {
        match self.pending.take() {
            Some(pending) if pending.handle == handle => match pending.action {
                SettleAction::Complete => {
                    if let Some(cb) = pending.on_complete {
                        cb();
                    }
                }
                SettleAction::PanThen { point } => self.pan_to(point, pending.on_complete),
            },
            other => {
                if other.is_some() {
                    log::trace!("camera: ignoring stale settle {:?}", handle);
                }
                self.pending = other;
            }
        }
    }

    fn alloc_handle(&mut self) -> SettleHandle {
        let handle = SettleHandle(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);
        handle
    }
}
