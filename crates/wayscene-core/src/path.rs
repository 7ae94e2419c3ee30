//! Drawable waypoint sequences.
//!
//! The engine keeps the logical path as two of these buffers (traveled
//! and upcoming) sharing a tail element, so a host can render the two
//! halves with distinct stroke treatments and the animation loop gets
//! O(1) access to the segment endpoints.

use serde::{Deserialize, Serialize};

use crate::waypoint::Waypoint;

/// Growable ordered sequence of waypoints with cheap tail access.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathBuffer {
    points: Vec<Waypoint>,
}

impl PathBuffer {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Waypoint> {
        self.points.get(index).copied()
    }

    /// Replace the element at `index`. Out-of-range writes are ignored.
    #[inline]
    pub fn set(&mut self, index: usize, point: Waypoint) {
        if let Some(slot) = self.points.get_mut(index) {
            *slot = point;
        }
    }

    /// Insert before `index`, clamped to the buffer length.
    #[inline]
    pub fn insert(&mut self, index: usize, point: Waypoint) {
        let index = index.min(self.points.len());
        self.points.insert(index, point);
    }

    /// Remove and return the element at `index`, if any.
    #[inline]
    pub fn remove(&mut self, index: usize) -> Option<Waypoint> {
        if index < self.points.len() {
            Some(self.points.remove(index))
        } else {
            None
        }
    }

    #[inline]
    pub fn push(&mut self, point: Waypoint) {
        self.points.push(point);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<Waypoint> {
        self.points.pop()
    }

    #[inline]
    pub fn last(&self) -> Option<Waypoint> {
        self.points.last().copied()
    }

    /// The element just beneath the tail; during an animation this is
    /// a real segment endpoint while the tail itself is the moving
    /// interpolated point.
    #[inline]
    pub fn second_last(&self) -> Option<Waypoint> {
        let n = self.points.len();
        if n >= 2 {
            Some(self.points[n - 2])
        } else {
            None
        }
    }

    /// Overwrite the tail element. No-op on an empty buffer.
    #[inline]
    pub fn set_last(&mut self, point: Waypoint) {
        if let Some(slot) = self.points.last_mut() {
            *slot = point;
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.points.clear();
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Waypoint> {
        self.points.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Waypoint] {
        &self.points
    }
}
