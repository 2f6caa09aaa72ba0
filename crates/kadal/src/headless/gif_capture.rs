//! Animated GIF output for headless runs

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use gif::{Encoder, Frame, Repeat};

use super::PixelRenderer;

/// Collects rendered frames and encodes them as a looping GIF
pub struct GifCapture {
    /// Collected frames (RGB data)
    frames: Vec<Vec<u8>>,
    width: u16,
    height: u16,
    /// Delay between frames in centiseconds
    frame_delay: u16,
}

impl GifCapture {
    /// `fps` is converted to a centisecond frame delay; zero falls back to 10 fps
    pub fn new(width: u16, height: u16, fps: u16) -> Self {
        let frame_delay = if fps > 0 { (100 / fps).max(1) } else { 10 };

        Self {
            frames: Vec::new(),
            width,
            height,
            frame_delay,
        }
    }

    pub fn capture_frame(&mut self, renderer: &PixelRenderer) {
        self.frames.push(renderer.get_rgb_buffer());
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frame_delay(&self) -> u16 {
        self.frame_delay
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// Save captured frames as an animated GIF
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if self.frames.is_empty() {
            anyhow::bail!("No frames to save");
        }

        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("Failed to create GIF file {}", path.display()))?;

        let mut encoder = Encoder::new(file, self.width, self.height, &[])
            .context("Failed to create GIF encoder")?;

        encoder
            .set_repeat(Repeat::Infinite)
            .context("Failed to set GIF repeat")?;

        for frame_data in &self.frames {
            let mut frame = Frame::from_rgb(self.width, self.height, frame_data);
            frame.delay = self.frame_delay;

            encoder
                .write_frame(&frame)
                .context("Failed to write GIF frame")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use kadal_skeleton::Canvas;

    #[test]
    fn test_gif_capture_creation() {
        let capture = GifCapture::new(128, 128, 10);
        assert_eq!(capture.width, 128);
        assert_eq!(capture.frame_delay(), 10);
        assert_eq!(capture.frame_count(), 0);

        assert_eq!(GifCapture::new(8, 8, 0).frame_delay(), 10);
        assert_eq!(GifCapture::new(8, 8, 500).frame_delay(), 1);
    }

    #[test]
    fn test_frame_capture_and_clear() {
        let mut capture = GifCapture::new(64, 64, 10);
        let renderer = PixelRenderer::new(64, 64);

        capture.capture_frame(&renderer);
        capture.capture_frame(&renderer);
        assert_eq!(capture.frame_count(), 2);

        capture.clear();
        assert_eq!(capture.frame_count(), 0);
    }

    #[test]
    fn test_save_requires_frames() {
        let dir = tempfile::tempdir().unwrap();
        let capture = GifCapture::new(8, 8, 10);
        assert!(capture.save(dir.path().join("empty.gif")).is_err());
    }

    #[test]
    fn test_save_writes_gif() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lines.gif");

        let mut renderer = PixelRenderer::new(16, 16);
        let mut capture = GifCapture::new(16, 16, 10);
        for i in 0..3 {
            renderer.clear();
            renderer.stroke_line(Vec2::new(0.0, i as f32), Vec2::new(15.0, 15.0));
            capture.capture_frame(&renderer);
        }
        capture.save(&path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"GIF89a"));
    }
}
