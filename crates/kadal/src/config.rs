//! Run configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `kadal.ron` file (if exists)
//! 3. Environment variables prefixed with `KADAL_`
//!
//! Example environment variable: `KADAL_CREATURE__LEG_PAIRS=6`

use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, ConfigBuilder, Environment, File};
use glam::Vec2;
use kadal_skeleton::LizardConfig;
use serde::{Deserialize, Serialize};

use crate::pointer_path::{PointerPath, PointerPathKind};

/// Main run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub canvas: CanvasConfig,

    #[serde(default)]
    pub creature: CreatureConfig,

    #[serde(default)]
    pub capture: CaptureConfig,

    #[serde(default)]
    pub pointer: PointerConfig,

    /// Seed for the footstep jitter and random lizards
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_seed() -> u64 {
    42
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            creature: CreatureConfig::default(),
            capture: CaptureConfig::default(),
            pointer: PointerConfig::default(),
            seed: default_seed(),
        }
    }
}

/// Drawing surface settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Surface width in pixels
    pub width: u16,
    /// Surface height in pixels
    pub height: u16,
    /// Background color (RGB)
    pub background: [u8; 3],
    /// Stroke color (RGB)
    pub stroke: [u8; 3],
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            background: [0, 0, 0],
            stroke: [255, 255, 255],
        }
    }
}

impl CanvasConfig {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32) / 2.0
    }
}

/// Lizard shape settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatureConfig {
    /// Overall body scale
    pub scale: f32,
    /// Leg pairs along the torso
    pub leg_pairs: usize,
    /// Tail bones
    pub tail: usize,
    /// Roll a random lizard from the seed instead
    pub randomize: bool,
}

impl Default for CreatureConfig {
    fn default() -> Self {
        Self {
            scale: 4.0,
            leg_pairs: 4,
            tail: 20,
            randomize: false,
        }
    }
}

impl CreatureConfig {
    pub fn lizard(&self) -> LizardConfig {
        LizardConfig::new(self.scale, self.leg_pairs, self.tail)
    }
}

/// Headless capture settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Simulation ticks to run
    pub ticks: u64,
    /// Capture one frame every this many ticks
    pub frame_every: u64,
    /// GIF playback rate
    pub fps: u16,
    /// Output GIF path
    pub output: String,
    /// Pace ticks against the wall clock instead of running flat out
    pub realtime: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            ticks: 300,
            frame_every: 3,
            fps: 10,
            output: "kadal.gif".to_string(),
            realtime: false,
        }
    }
}

/// Scripted pointer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointerConfig {
    /// static, circle, figure-eight or waypoints
    pub path: String,
    /// Path radius in pixels
    pub radius: f32,
    /// Ticks per lap
    pub period: u64,
    /// Loop points for the waypoints path, in canvas coordinates
    #[serde(default)]
    pub waypoints: Vec<[f32; 2]>,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            path: "circle".to_string(),
            radius: 160.0,
            period: 300,
            waypoints: Vec::new(),
        }
    }
}

impl PointerConfig {
    /// Resolve the scripted path around `center`
    pub fn build(&self, center: Vec2) -> Result<PointerPath> {
        let kind: PointerPathKind = self.path.parse().map_err(anyhow::Error::msg)?;
        let waypoints = self.waypoints.iter().map(|&p| Vec2::from_array(p)).collect();
        Ok(PointerPath::new(kind, center, self.radius, self.period).with_waypoints(waypoints))
    }
}

impl AppConfig {
    /// Load configuration with layered priority:
    /// 1. Compiled defaults (lowest priority)
    /// 2. `kadal.ron` file (if exists)
    /// 3. Environment variables prefixed with `KADAL_` (highest priority)
    pub fn load() -> Result<Self> {
        let builder = Self::defaults()?
            .add_source(
                File::with_name("kadal")
                    .format(config::FileFormat::Ron)
                    .required(false),
            )
            .add_source(Environment::with_prefix("KADAL").separator("__"));

        Self::finish(builder)
    }

    /// Load defaults overlaid with one explicit RON file, which must exist
    pub fn load_from(path: &Path) -> Result<Self> {
        let builder = Self::defaults()?.add_source(
            File::from(path)
                .format(config::FileFormat::Ron)
                .required(true),
        );

        Self::finish(builder).with_context(|| format!("Failed to load {}", path.display()))
    }

    /// Render the effective configuration as a `kadal.ron` file body
    pub fn to_ron(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .context("Failed to serialize configuration")
    }

    fn defaults() -> Result<ConfigBuilder<config::builder::DefaultState>> {
        let builder = Config::builder()
            .set_default("canvas.width", 640_i64)?
            .set_default("canvas.height", 480_i64)?
            .set_default("canvas.background", vec![0_i64, 0, 0])?
            .set_default("canvas.stroke", vec![255_i64, 255, 255])?
            .set_default("creature.scale", 4.0)?
            .set_default("creature.leg_pairs", 4_i64)?
            .set_default("creature.tail", 20_i64)?
            .set_default("creature.randomize", false)?
            .set_default("capture.ticks", 300_i64)?
            .set_default("capture.frame_every", 3_i64)?
            .set_default("capture.fps", 10_i64)?
            .set_default("capture.output", "kadal.gif")?
            .set_default("capture.realtime", false)?
            .set_default("pointer.path", "circle")?
            .set_default("pointer.radius", 160.0)?
            .set_default("pointer.period", 300_i64)?
            .set_default("seed", 42_i64)?;
        Ok(builder)
    }

    fn finish(builder: ConfigBuilder<config::builder::DefaultState>) -> Result<Self> {
        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
