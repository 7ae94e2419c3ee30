//! Shared fixtures for wayscene tests: canned routes of real city
//! coordinates and a recording mock surface.

use std::cell::RefCell;
use std::rc::Rc;

use wayscene_core::{GeoBounds, MapSurface, Waypoint};

pub const LISBON: Waypoint = Waypoint {
    lat: 38.7223,
    lng: -9.1393,
};
pub const MADRID: Waypoint = Waypoint {
    lat: 40.4168,
    lng: -3.7038,
};
pub const PARIS: Waypoint = Waypoint {
    lat: 48.8566,
    lng: 2.3522,
};
pub const BERLIN: Waypoint = Waypoint {
    lat: 52.52,
    lng: 13.405,
};
pub const WARSAW: Waypoint = Waypoint {
    lat: 52.2297,
    lng: 21.0122,
};

/// West-to-east route across European capitals.
pub fn capitals() -> Vec<Waypoint> {
    vec![LISBON, MADRID, PARIS, BERLIN, WARSAW]
}

/// The three-scene route most scenario tests use.
pub fn short_route() -> Vec<Waypoint> {
    vec![MADRID, PARIS, BERLIN]
}

/// One camera command observed by a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum CameraCommand {
    FitBounds(GeoBounds),
    PanTo(Waypoint),
}

#[derive(Debug)]
struct SurfaceState {
    commands: Vec<CameraCommand>,
    center: Waypoint,
}

/// Mock surface that records every camera command and tracks its own
/// center (a pan centers on the target, a fit centers on the bounds
/// midpoint, as a real camera eventually would). Clones share state,
/// so tests keep one handle while the engine owns the boxed other.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    state: Rc<RefCell<SurfaceState>>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(SurfaceState {
                commands: Vec::new(),
                center: Waypoint::new(0.0, 0.0),
            })),
        }
    }

    pub fn commands(&self) -> Vec<CameraCommand> {
        self.state.borrow().commands.clone()
    }

    pub fn last_command(&self) -> Option<CameraCommand> {
        self.state.borrow().commands.last().cloned()
    }

    pub fn command_count(&self) -> usize {
        self.state.borrow().commands.len()
    }

    pub fn clear_commands(&self) {
        self.state.borrow_mut().commands.clear();
    }

    pub fn set_center(&self, point: Waypoint) {
        self.state.borrow_mut().center = point;
    }

    pub fn current_center(&self) -> Waypoint {
        self.state.borrow().center
    }
}

impl MapSurface for RecordingSurface {
    fn fit_bounds(&mut self, bounds: GeoBounds) {
        let mut state = self.state.borrow_mut();
        state.center = bounds.center();
        state.commands.push(CameraCommand::FitBounds(bounds));
    }

    fn pan_to(&mut self, point: Waypoint) {
        let mut state = self.state.borrow_mut();
        state.center = point;
        state.commands.push(CameraCommand::PanTo(point));
    }

    fn center(&self) -> Waypoint {
        self.state.borrow().center
    }
}
