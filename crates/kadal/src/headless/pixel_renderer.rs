//! CPU-based pixel buffer renderer for headless GIF capture
//!
//! Rasterizes the creature's line strokes into a pixel buffer without GPU
//! dependencies.

use glam::Vec2;
use kadal_skeleton::Canvas;

/// CPU-based canvas that outputs to a pixel buffer
pub struct PixelRenderer {
    /// Width of the surface in pixels
    pub width: usize,
    /// Height of the surface in pixels
    pub height: usize,
    /// RGBA pixel buffer (4 bytes per pixel)
    pub buffer: Vec<u8>,
    background: [u8; 4],
    stroke: [u8; 4],
}

impl PixelRenderer {
    /// Create a new renderer, white strokes on black
    pub fn new(width: usize, height: usize) -> Self {
        let mut renderer = Self {
            width,
            height,
            buffer: vec![0u8; width * height * 4],
            background: [0, 0, 0, 255],
            stroke: [255, 255, 255, 255],
        };
        renderer.fill(renderer.background);
        renderer
    }

    pub fn with_colors(mut self, background: [u8; 3], stroke: [u8; 3]) -> Self {
        self.background = [background[0], background[1], background[2], 255];
        self.stroke = [stroke[0], stroke[1], stroke[2], 255];
        self.fill(self.background);
        self
    }

    fn fill(&mut self, color: [u8; 4]) {
        for pixel in self.buffer.chunks_exact_mut(4) {
            pixel.copy_from_slice(&color);
        }
    }

    /// Read back one pixel, `None` outside the surface
    pub fn pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            let idx = (y as usize * self.width + x as usize) * 4;
            let mut color = [0u8; 4];
            color.copy_from_slice(&self.buffer[idx..idx + 4]);
            Some(color)
        } else {
            None
        }
    }

    /// Set a single pixel at screen coordinates
    pub fn set_pixel(&mut self, x: i32, y: i32, color: [u8; 4]) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            let idx = (y as usize * self.width + x as usize) * 4;
            self.buffer[idx..idx + 4].copy_from_slice(&color);
        }
    }

    /// Draw a line using Bresenham's algorithm
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: [u8; 4]) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let mut x = x0;
        let mut y = y0;

        loop {
            self.set_pixel(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Get RGB buffer (without alpha) for GIF encoding
    pub fn get_rgb_buffer(&self) -> Vec<u8> {
        self.buffer
            .chunks_exact(4)
            .flat_map(|pixel| [pixel[0], pixel[1], pixel[2]])
            .collect()
    }
}

/// Pixels far off-surface are skipped; lines that start there would take
/// needlessly long to walk.
const OFFSCREEN_MARGIN: f32 = 4096.0;

impl Canvas for PixelRenderer {
    fn clear(&mut self) {
        self.fill(self.background);
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2) {
        let limit = |p: Vec2| {
            p.is_finite()
                && p.x.abs() < self.width as f32 + OFFSCREEN_MARGIN
                && p.y.abs() < self.height as f32 + OFFSCREEN_MARGIN
        };
        if !limit(from) || !limit(to) {
            return;
        }
        let color = self.stroke;
        self.draw_line(
            from.x.round() as i32,
            from.y.round() as i32,
            to.x.round() as i32,
            to.y.round() as i32,
            color,
        );
    }
}
