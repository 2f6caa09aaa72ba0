//! Headless capture run
//!
//! Drives a lizard simulation along a scripted pointer path, rasterizes
//! every `frame_every`-th tick and writes the frames out as a GIF.

use std::path::PathBuf;

use anyhow::{Context, Result};
use glam::Vec2;
use indicatif::{ProgressBar, ProgressStyle};
use kadal_skeleton::{InputSnapshot, LizardConfig, Simulation, TICK_INTERVAL};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use web_time::Instant;

use super::{GifCapture, PixelRenderer};
use crate::config::AppConfig;
use crate::pointer_path::PointerPath;

/// What a finished capture run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub ticks: u64,
    pub frames: usize,
    pub output: Option<PathBuf>,
    pub lizard: LizardConfig,
    /// Body position after the last tick
    pub final_position: Vec2,
    /// Mean distance between body and pointer over the run
    pub mean_lag: f32,
}

/// Headless driver holding the simulation and its output surfaces
pub struct CaptureRun {
    simulation: Simulation,
    pointer: PointerPath,
    renderer: PixelRenderer,
    capture: GifCapture,
    lizard: LizardConfig,
    config: AppConfig,
}

impl CaptureRun {
    pub fn new(config: AppConfig) -> Result<Self> {
        let center = config.canvas.center();
        let lizard = if config.creature.randomize {
            let mut rng = Xoshiro256StarStar::seed_from_u64(config.seed);
            LizardConfig::random(&mut rng)
        } else {
            config.creature.lizard()
        };

        let simulation = Simulation::lizard(&lizard, center, config.seed)
            .context("Failed to build lizard")?;
        let pointer = config.pointer.build(center)?;
        let renderer = PixelRenderer::new(config.canvas.width as usize, config.canvas.height as usize)
            .with_colors(config.canvas.background, config.canvas.stroke);
        let capture = GifCapture::new(config.canvas.width, config.canvas.height, config.capture.fps);

        Ok(Self {
            simulation,
            pointer,
            renderer,
            capture,
            lizard,
            config,
        })
    }

    /// Progress bar style for capture runs
    fn progress_style() -> Result<ProgressStyle> {
        Ok(ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")?
            .progress_chars("█▓░"))
    }

    /// Run every tick, then save the GIF unless `save` is false
    pub fn run(mut self, save: bool) -> Result<RunSummary> {
        let ticks = self.config.capture.ticks;
        let frame_every = self.config.capture.frame_every.max(1);

        let pb = ProgressBar::new(ticks);
        pb.set_style(Self::progress_style()?);
        pb.println(format!(
            "Capturing {} ticks: {} leg pairs, tail {}, pointer path {}",
            ticks, self.lizard.leg_pairs, self.lizard.tail, self.pointer.kind
        ));

        let started = Instant::now();
        let mut lag_total = 0.0;

        for tick in 0..ticks {
            let input = InputSnapshot::new(self.pointer.sample(tick));
            self.simulation.step(&input)?;

            let position = self
                .simulation
                .creature()
                .map(|creature| creature.position())
                .unwrap_or(input.pointer);
            lag_total += position.distance(input.pointer);

            if tick % frame_every == 0 {
                self.simulation.render(&mut self.renderer)?;
                self.capture.capture_frame(&self.renderer);
            }

            if self.config.capture.realtime {
                let due = TICK_INTERVAL * (tick as u32 + 1);
                let elapsed = started.elapsed();
                if due > elapsed {
                    std::thread::sleep(due - elapsed);
                }
            }

            pb.inc(1);
        }
        pb.finish_with_message("done");

        let final_position = self
            .simulation
            .creature()
            .map(|creature| creature.position())
            .unwrap_or_default();
        self.simulation.dispose();

        let output = if save {
            let path = PathBuf::from(&self.config.capture.output);
            self.capture.save(&path)?;
            log::info!(
                "Saved {} frames to {}",
                self.capture.frame_count(),
                path.display()
            );
            Some(path)
        } else {
            None
        };

        Ok(RunSummary {
            ticks,
            frames: self.capture.frame_count(),
            output,
            lizard: self.lizard,
            final_position,
            mean_lag: if ticks > 0 { lag_total / ticks as f32 } else { 0.0 },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.canvas.width = 96;
        config.canvas.height = 64;
        config.creature.scale = 1.0;
        config.creature.leg_pairs = 2;
        config.creature.tail = 6;
        config.capture.ticks = 20;
        config.capture.frame_every = 5;
        config.pointer.radius = 20.0;
        config
    }

    #[test]
    fn test_run_captures_every_nth_tick() {
        let summary = CaptureRun::new(small_config()).unwrap().run(false).unwrap();
        assert_eq!(summary.ticks, 20);
        assert_eq!(summary.frames, 4);
        assert!(summary.output.is_none());
        assert!(summary.final_position.is_finite());
    }

    #[test]
    fn test_run_writes_gif() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = small_config();
        config.capture.output = dir.path().join("run.gif").to_string_lossy().into_owned();

        let summary = CaptureRun::new(config).unwrap().run(true).unwrap();
        let output = summary.output.unwrap();
        assert!(output.exists());
    }

    #[test]
    fn test_random_lizard_from_seed() {
        let mut config = small_config();
        config.creature.randomize = true;
        config.capture.ticks = 2;

        let a = CaptureRun::new(config.clone()).unwrap().run(false).unwrap();
        let b = CaptureRun::new(config).unwrap().run(false).unwrap();
        assert_eq!(a.lizard, b.lizard);
        assert!((1..=12).contains(&a.lizard.leg_pairs));
    }

    #[test]
    fn test_unknown_pointer_path_fails() {
        let mut config = small_config();
        config.pointer.path = "spiral".to_string();
        assert!(CaptureRun::new(config).is_err());
    }
}
