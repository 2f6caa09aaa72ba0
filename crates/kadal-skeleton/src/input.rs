//! Pointer input fed into each tick
//!
//! Hosts record mouse and touch events into a [`PointerTracker`] as they
//! arrive; the tick samples one [`InputSnapshot`] from it. The latest event
//! wins.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Pointer position for one tick, in canvas-local coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub pointer: Vec2,
}

impl InputSnapshot {
    pub fn new(pointer: Vec2) -> Self {
        Self { pointer }
    }

    /// Translate a viewport-space pointer into canvas-local space
    pub fn from_viewport(viewport: Vec2, canvas_origin: Vec2) -> Self {
        Self {
            pointer: viewport - canvas_origin,
        }
    }
}

/// Last-write-wins record of the pointer in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerTracker {
    viewport: Vec2,
    events: u64,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starting position before any event arrives
    pub fn with_position(viewport: Vec2) -> Self {
        Self { viewport, events: 0 }
    }

    pub fn record_mouse(&mut self, viewport: Vec2) {
        self.viewport = viewport;
        self.events += 1;
    }

    /// Only the first touch point steers; an empty touch list is ignored
    pub fn record_touches(&mut self, touches: &[Vec2]) {
        if let Some(&first) = touches.first() {
            self.record_mouse(first);
        }
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Number of pointer events recorded so far
    pub fn events(&self) -> u64 {
        self.events
    }

    pub fn snapshot(&self, canvas_origin: Vec2) -> InputSnapshot {
        InputSnapshot::from_viewport(self.viewport, canvas_origin)
    }
}
