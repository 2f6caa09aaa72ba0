//! Drawing surface abstraction
//!
//! The skeleton only ever clears the surface and strokes straight lines, so
//! a host can back this with a browser canvas, a GPU line batch or a CPU
//! pixel buffer.

use glam::Vec2;

/// A 2D surface that can be cleared and stroked with lines
pub trait Canvas {
    /// Erase the whole surface
    fn clear(&mut self);

    /// Stroke a single line segment in surface coordinates
    fn stroke_line(&mut self, from: Vec2, to: Vec2);
}

/// Canvas that records strokes instead of rasterizing them
#[derive(Debug, Clone, Default)]
pub struct LineRecorder {
    pub lines: Vec<(Vec2, Vec2)>,
    pub clears: usize,
}

impl LineRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

impl Canvas for LineRecorder {
    fn clear(&mut self) {
        self.lines.clear();
        self.clears += 1;
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2) {
        self.lines.push((from, to));
    }
}
