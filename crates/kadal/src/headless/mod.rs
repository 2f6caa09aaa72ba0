//! Headless rendering for capture runs
//!
//! This module renders the lizard without a window:
//! - Pixel buffer rasterization of the creature's strokes
//! - Animated GIF encoding of captured frames
//! - A fixed-step runner that drives the simulation along a scripted pointer

mod gif_capture;
mod pixel_renderer;
mod runner;

pub use gif_capture::GifCapture;
pub use pixel_renderer::PixelRenderer;
pub use runner::{CaptureRun, RunSummary};
