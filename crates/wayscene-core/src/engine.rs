//! Path traversal engine: dual scene buffers, the leg state machine,
//! and the tick-driven interpolation loop.
//!
//! The logical path lives in two buffers sharing a tail element:
//! `traveled` holds scenes up to the cursor in order, `upcoming` holds
//! the rest in reverse. Starting a leg appends a transient copy of the
//! shared tail to the buffer in the direction of travel; every tick
//! writes the interpolated leading edge into both tails; finishing a
//! leg snaps the edge onto the arrival scene and pops the trailing
//! buffer's duplicate. The cursor is never stored: it is
//! `traveled.len() - 1`, so structural edits shift it naturally.

use crate::camera::{CameraTransitionCoordinator, SettleHandle, TransitionCallback};
use crate::config::EngineConfig;
use crate::error::PathError;
use crate::interp;
use crate::path::PathBuffer;
use crate::state::{AnimationState, Direction};
use crate::surface::MapSurface;
use crate::waypoint::Waypoint;
use crate::Result;

/// Drives the scene path and delegates all camera motion to its
/// [`CameraTransitionCoordinator`].
pub struct PathAnimationEngine {
    camera: CameraTransitionCoordinator,
    traveled: PathBuffer,
    upcoming: PathBuffer,
    state: AnimationState,
    /// Fraction already traveled along the active segment, in the
    /// forward sense regardless of direction. Meaningful while a leg
    /// is animating or paused.
    offset: f64,
    /// Seconds into the current leg; reconstructed on resume so
    /// progress continues instead of restarting.
    elapsed: f64,
    on_leg_complete: Option<TransitionCallback>,
    cfg: EngineConfig,
}

impl Default for PathAnimationEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl PathAnimationEngine {
    pub fn new(cfg: EngineConfig) -> Self {
        Self {
            camera: CameraTransitionCoordinator::new(),
            traveled: PathBuffer::new(),
            upcoming: PathBuffer::new(),
            state: AnimationState::Idle,
            offset: 0.0,
            elapsed: 0.0,
            on_leg_complete: None,
            cfg,
        }
    }

    /// Swap the rendering surface. A surface arriving while the path
    /// is idle and non-empty gets one framing of the whole path.
    pub fn attach_surface(&mut self, surface: Option<Box<dyn MapSurface>>) {
        let attached = surface.is_some();
        self.camera.attach_surface(surface);
        if attached && self.state.is_idle() && !self.is_empty() {
            let points = self.waypoints();
            self.camera.fit_to_bounds(&points, false, None);
        }
    }

    // ---- queries ------------------------------------------------------

    /// Number of scenes in the logical path. The transient leading
    /// edge of an in-flight leg is not counted.
    pub fn len(&self) -> usize {
        if self.traveled.is_empty() {
            return 0;
        }
        let shared = if self.state.is_idle() { 1 } else { 2 };
        self.traveled.len() + self.upcoming.len() - shared
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.traveled.is_empty()
    }

    /// Index of the current scene: the cursor while idle, the target
    /// scene while a leg runs in either direction.
    pub fn current_index(&self) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        let cursor = self.cursor();
        match self.state.heading() {
            Some(Direction::Backward) => Some(cursor.saturating_sub(1)),
            _ => Some(cursor),
        }
    }

    /// The current scene's waypoint (see [`current_index`](Self::current_index)).
    pub fn current_waypoint(&self) -> Option<Waypoint> {
        self.current_index().and_then(|i| self.waypoint_at(i))
    }

    /// Whether a real scene exists beyond the current one in the
    /// forward sense, accounting for the transient step a forward leg
    /// has already taken.
    pub fn has_next(&self) -> bool {
        if self.is_empty() {
            return false;
        }
        match self.state {
            AnimationState::Paused(Direction::Forward) => true,
            AnimationState::Animating(Direction::Backward)
            | AnimationState::Paused(Direction::Backward) => true,
            _ => self.cursor() + 1 < self.len(),
        }
    }

    /// Symmetric to [`has_next`](Self::has_next) for backward motion.
    pub fn has_prev(&self) -> bool {
        if self.is_empty() {
            return false;
        }
        match self.state {
            AnimationState::Paused(Direction::Backward) => true,
            AnimationState::Animating(Direction::Forward)
            | AnimationState::Paused(Direction::Forward) => true,
            AnimationState::Animating(Direction::Backward) => self.cursor() >= 2,
            AnimationState::Idle => self.cursor() >= 1,
        }
    }

    /// +1 while heading forward, -1 backward, 0 when idle.
    #[inline]
    pub fn heading_of_animation(&self) -> i8 {
        self.state.heading().map(Direction::signum).unwrap_or(0)
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.state.is_idle()
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.state.is_animating()
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.state.is_paused()
    }

    #[inline]
    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// Fractional progress along the active segment, forward sense.
    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Whether the host should keep delivering frames.
    #[inline]
    pub fn wants_tick(&self) -> bool {
        self.state.is_animating()
    }

    /// Scenes already traversed, tail shared with
    /// [`upcoming`](Self::upcoming); render with the "visited" stroke.
    #[inline]
    pub fn traveled(&self) -> &PathBuffer {
        &self.traveled
    }

    /// Scenes still ahead, stored in reverse, tail shared with
    /// [`traveled`](Self::traveled).
    #[inline]
    pub fn upcoming(&self) -> &PathBuffer {
        &self.upcoming
    }

    /// Waypoint at a logical path index.
    pub fn waypoint_at(&self, index: usize) -> Option<Waypoint> {
        let n = self.len();
        if index >= n {
            return None;
        }
        if index < self.traveled_real() {
            self.traveled.get(index)
        } else {
            self.upcoming.get(n - 1 - index)
        }
    }

    /// The logical path, in order.
    pub fn waypoints(&self) -> Vec<Waypoint> {
        (0..self.len()).filter_map(|i| self.waypoint_at(i)).collect()
    }

    // ---- settle plumbing ---------------------------------------------

    /// Handle of the outstanding camera settle subscription, if any.
    #[inline]
    pub fn pending_settle(&self) -> Option<SettleHandle> {
        self.camera.pending_settle()
    }

    /// Forward a surface settle notification (host entry point).
    #[inline]
    pub fn notify_settled(&mut self, handle: SettleHandle) {
        self.camera.notify_settled(handle);
    }

    // ---- traversal ----------------------------------------------------

    /// Advance toward the next scene. Resumes a paused forward leg;
    /// otherwise finishes any in-flight leg abruptly and starts a
    /// fresh forward leg. Without a next scene this is a no-op.
    pub fn next(&mut self, on_complete: Option<TransitionCallback>) {
        if let AnimationState::Paused(Direction::Forward) = self.state {
            self.resume(Direction::Forward, on_complete);
            return;
        }
        if !self.has_next() {
            log::debug!("next: no scene ahead, ignoring");
            return;
        }
        if !self.state.is_idle() {
            self.finish_leg(false);
        }
        self.start_leg(Direction::Forward, on_complete);
    }

    /// Advance toward the previous scene; mirror of [`next`](Self::next).
    pub fn prev(&mut self, on_complete: Option<TransitionCallback>) {
        if let AnimationState::Paused(Direction::Backward) = self.state {
            self.resume(Direction::Backward, on_complete);
            return;
        }
        if !self.has_prev() {
            log::debug!("prev: no scene behind, ignoring");
            return;
        }
        if !self.state.is_idle() {
            self.finish_leg(false);
        }
        self.start_leg(Direction::Backward, on_complete);
    }

    /// Suspend the in-flight leg; the leading edge stays where the
    /// last tick left it. Only meaningful while animating.
    pub fn pause(&mut self) {
        if let AnimationState::Animating(dir) = self.state {
            self.camera.stop_transition();
            self.state = AnimationState::Paused(dir);
            log::debug!("paused {} leg at offset {:.3}", dir.name(), self.offset);
        }
    }

    /// Jump to `index` without animating: any leg finishes abruptly,
    /// the buffers are rebuilt around the new cursor and the camera
    /// pans to the scene.
    pub fn set_cursor(&mut self, index: usize, on_complete: Option<TransitionCallback>) {
        if !self.state.is_idle() {
            self.finish_leg(false);
        }
        let n = self.len();
        if n == 0 {
            if let Some(cb) = on_complete {
                cb();
            }
            return;
        }
        let index = index.min(n - 1);
        let points = self.waypoints();
        self.rebuild(&points, index);
        log::debug!("cursor set to {index}");
        self.camera.pan_to(points[index], on_complete);
    }

    /// Drive the in-flight leg by `dt` seconds. Non-animating states
    /// and non-positive deltas are no-ops. Returns whether further
    /// frames are wanted.
    pub fn tick(&mut self, dt: f64) -> bool {
        let dir = match self.state {
            AnimationState::Animating(dir) => dir,
            _ => return false,
        };
        if !(dt > 0.0) || !dt.is_finite() {
            return true;
        }

        self.elapsed += dt;
        let duration = self.cfg.segment_duration.max(f64::MIN_POSITIVE);
        let raw = self.elapsed / duration;
        if raw >= 1.0 {
            self.finish_leg(true);
            return false;
        }

        self.offset = match dir {
            Direction::Forward => raw,
            Direction::Backward => 1.0 - raw,
        };
        let (low, high) = match self.segment() {
            Some(segment) => segment,
            None => return false,
        };
        let point = interp::interpolate(low, high, self.offset);
        self.traveled.set_last(point);
        self.upcoming.set_last(point);

        // Keep the moving edge and its destination in view.
        let arrival = match dir {
            Direction::Forward => high,
            Direction::Backward => low,
        };
        self.camera.fit_to_bounds(&[point, arrival], false, None);
        true
    }

    /// Drop every scene and return to idle. Pending callbacks and
    /// settle subscriptions are discarded.
    pub fn clear(&mut self) {
        self.camera.stop_transition();
        self.traveled.clear();
        self.upcoming.clear();
        self.state = AnimationState::Idle;
        self.offset = 0.0;
        self.elapsed = 0.0;
        self.on_leg_complete = None;
        log::debug!("path cleared");
    }

    // ---- structural edits ---------------------------------------------

    /// Insert `point` so it becomes scene `index` (clamped to the path
    /// length; the end appends). Invalid waypoints are ignored.
    /// Inserting at or before the cursor shifts the cursor forward.
    pub fn insert_at(&mut self, index: usize, point: Waypoint) {
        if !point.is_valid() {
            return;
        }
        let n = self.len();
        if n == 0 {
            // First scene: it is the shared tail of both buffers.
            self.traveled.push(point);
            self.upcoming.push(point);
            self.camera.pan_to(point, None);
            return;
        }
        let index = index.min(n);
        let before = self.segment();
        if index < self.traveled_real() {
            self.traveled.insert(index, point);
        } else {
            self.upcoming.insert(n - index, point);
        }
        self.reframe_if_segment_changed(before);
    }

    /// Replace scene `index` with `point`. Out-of-range indices and
    /// invalid waypoints are ignored. Replacing the idle cursor scene
    /// updates the shared tail in both buffers and pans the camera
    /// there without animating.
    pub fn set_at(&mut self, index: usize, point: Waypoint) {
        if !point.is_valid() || index >= self.len() {
            return;
        }
        if self.state.is_idle() && index == self.cursor() {
            self.traveled.set_last(point);
            self.upcoming.set_last(point);
            self.camera.pan_to(point, None);
            return;
        }
        let n = self.len();
        let before = self.segment();
        if index < self.traveled_real() {
            self.traveled.set(index, point);
        } else {
            self.upcoming.set(n - 1 - index, point);
        }
        self.reframe_if_segment_changed(before);
    }

    /// Remove scene `index`. Out-of-range indices are a no-op; the
    /// sole remaining scene clears the path. Removing the idle cursor
    /// scene with siblings present, or either endpoint of the active
    /// segment mid-leg, is rejected with the state untouched.
    pub fn remove_at(&mut self, index: usize) -> Result<()> {
        let n = self.len();
        if n == 0 || index >= n {
            return Ok(());
        }
        if n == 1 {
            self.clear();
            return Ok(());
        }
        let cursor = self.cursor();
        if self.state.is_idle() {
            if index == cursor {
                return Err(PathError::RemoveCurrent { index });
            }
        } else if index + 1 == cursor || index == cursor {
            return Err(PathError::RemoveActiveEndpoint { index });
        }

        if index < self.traveled_real() {
            self.traveled.remove(index);
        } else {
            self.upcoming.remove(n - 1 - index);
        }
        Ok(())
    }

    // ---- internals ----------------------------------------------------

    /// Logical cursor, derived from the traveled buffer. While a
    /// forward leg runs the transient edge lives in `traveled`, so the
    /// cursor already names the target scene; a backward leg keeps the
    /// departure index until it finishes.
    #[inline]
    fn cursor(&self) -> usize {
        self.traveled.len().saturating_sub(1)
    }

    /// Count of real (non-transient) scenes stored in `traveled`;
    /// global indices below this live there, the rest map into the
    /// reversed `upcoming` buffer.
    #[inline]
    fn traveled_real(&self) -> usize {
        let transient = if self.state.is_idle() { 0 } else { 1 };
        self.traveled.len() - transient
    }

    /// Endpoints of the active segment, lower index first. Derived
    /// from the buffers on every call so structural edits take effect
    /// immediately; `None` while idle.
    fn segment(&self) -> Option<(Waypoint, Waypoint)> {
        if self.state.is_idle() {
            return None;
        }
        Some((self.traveled.second_last()?, self.upcoming.second_last()?))
    }

    fn start_leg(&mut self, dir: Direction, on_complete: Option<TransitionCallback>) {
        self.camera.stop_transition();
        let tail = match self.traveled.last() {
            Some(tail) => tail,
            None => return,
        };
        // The transient copy of the shared tail is the point every
        // tick moves; it goes to the buffer in the direction of travel.
        match dir {
            Direction::Forward => self.traveled.push(tail),
            Direction::Backward => self.upcoming.push(tail),
        }
        self.state = AnimationState::Animating(dir);
        self.offset = match dir {
            Direction::Forward => 0.0,
            Direction::Backward => 1.0,
        };
        self.elapsed = 0.0;
        self.on_leg_complete = on_complete;
        log::debug!("starting {} leg at cursor {}", dir.name(), self.cursor());
        self.frame_segment();
    }

    /// Resume a paused leg in the same direction, continuing from the
    /// stored offset. A provided callback replaces the stored one.
    fn resume(&mut self, dir: Direction, on_complete: Option<TransitionCallback>) {
        self.camera.stop_transition();
        let raw = match dir {
            Direction::Forward => self.offset,
            Direction::Backward => 1.0 - self.offset,
        };
        self.elapsed = raw * self.cfg.segment_duration;
        self.state = AnimationState::Animating(dir);
        if on_complete.is_some() {
            self.on_leg_complete = on_complete;
        }
        log::debug!("resuming {} leg at offset {:.3}", dir.name(), self.offset);
        self.frame_segment();
    }

    /// Complete the active leg: snap the leading edge onto the arrival
    /// scene, drop the trailing buffer's duplicated tail and go idle.
    /// With `commit` the camera pans to the new current scene and the
    /// stored callback defers to that pan; otherwise the callback runs
    /// immediately with no further camera motion.
    fn finish_leg(&mut self, commit: bool) {
        let dir = match self.state.heading() {
            Some(dir) => dir,
            None => return,
        };
        if let Some((low, high)) = self.segment() {
            match dir {
                Direction::Forward => {
                    self.traveled.set_last(high);
                    self.upcoming.pop();
                }
                Direction::Backward => {
                    self.upcoming.set_last(low);
                    self.traveled.pop();
                }
            }
        }
        self.state = AnimationState::Idle;
        self.offset = 0.0;
        self.elapsed = 0.0;
        let on_complete = self.on_leg_complete.take();
        log::debug!(
            "finished {} leg at cursor {} (commit: {commit})",
            dir.name(),
            self.cursor()
        );
        if commit {
            match self.traveled.last() {
                Some(point) => self.camera.pan_to(point, on_complete),
                None => {
                    if let Some(cb) = on_complete {
                        cb();
                    }
                }
            }
        } else if let Some(cb) = on_complete {
            cb();
        }
    }

    /// Frame the moving edge and the arrival scene of the active leg.
    fn frame_segment(&mut self) {
        let (low, high) = match self.segment() {
            Some(segment) => segment,
            None => return,
        };
        let edge = match self.traveled.last() {
            Some(edge) => edge,
            None => return,
        };
        let arrival = match self.state.heading() {
            Some(Direction::Forward) => high,
            Some(Direction::Backward) => low,
            None => return,
        };
        self.camera.fit_to_bounds(&[edge, arrival], false, None);
    }

    /// Re-frame the camera when an edit redirected the active segment.
    fn reframe_if_segment_changed(&mut self, before: Option<(Waypoint, Waypoint)>) {
        if !self.state.is_idle() && self.segment() != before {
            self.frame_segment();
        }
    }

    /// Rebuild both buffers for `points` with the cursor at `index`.
    fn rebuild(&mut self, points: &[Waypoint], index: usize) {
        self.traveled.clear();
        self.upcoming.clear();
        for p in &points[..=index] {
            self.traveled.push(*p);
        }
        for p in points[index..].iter().rev() {
            self.upcoming.push(*p);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wp(i: usize) -> Waypoint {
        Waypoint::new(i as f64, i as f64)
    }

    fn engine_with(points: &[Waypoint]) -> PathAnimationEngine {
        let mut engine = PathAnimationEngine::default();
        for (i, p) in points.iter().enumerate() {
            engine.insert_at(i, *p);
        }
        engine
    }

    #[test]
    fn index_mapping_spans_both_buffers() {
        let engine = engine_with(&[wp(0), wp(1), wp(2)]);
        assert_eq!(engine.len(), 3);
        assert_eq!(engine.waypoint_at(0), Some(wp(0)));
        assert_eq!(engine.waypoint_at(1), Some(wp(1)));
        assert_eq!(engine.waypoint_at(2), Some(wp(2)));
        assert_eq!(engine.waypoint_at(3), None);
        assert_eq!(engine.waypoints(), vec![wp(0), wp(1), wp(2)]);
    }

    #[test]
    fn index_mapping_skips_the_transient_edge() {
        let mut engine = engine_with(&[wp(0), wp(1), wp(2)]);
        engine.next(None);
        assert_eq!(engine.len(), 3);
        assert_eq!(engine.waypoints(), vec![wp(0), wp(1), wp(2)]);

        engine.tick(10.0); // finish forward leg
        engine.prev(None);
        assert_eq!(engine.len(), 3);
        assert_eq!(engine.waypoints(), vec![wp(0), wp(1), wp(2)]);
    }

    #[test]
    fn buffer_shapes_through_a_forward_leg() {
        let mut engine = engine_with(&[wp(0), wp(1), wp(2)]);
        assert_eq!(engine.traveled().len(), 1);
        assert_eq!(engine.upcoming().len(), 3);

        engine.next(None);
        assert_eq!(engine.traveled().len(), 2);
        assert_eq!(engine.upcoming().len(), 3);

        engine.tick(10.0);
        assert!(engine.is_idle());
        assert_eq!(engine.traveled().len(), 2);
        assert_eq!(engine.upcoming().len(), 2);
        assert_eq!(engine.traveled().last(), engine.upcoming().last());
    }

    #[test]
    fn shared_tail_moves_on_every_tick() {
        let mut engine = engine_with(&[Waypoint::new(0.0, 0.0), Waypoint::new(0.0, 10.0)]);
        engine.next(None);
        engine.tick(1.0); // half of the default duration
        let tail = engine.traveled().last().unwrap();
        assert_eq!(Some(tail), engine.upcoming().last());
        assert!(tail.lng > 0.0 && tail.lng < 10.0);
    }
}
