use std::path::PathBuf;

use clap::Parser;
use kadal::headless::CaptureRun;
use kadal::{AppConfig, PointerPathKind};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file to load instead of ./kadal.ron
    #[arg(long)]
    config: Option<PathBuf>,

    /// Simulation ticks to run
    #[arg(long)]
    ticks: Option<u64>,

    /// Leg pairs along the torso
    #[arg(long)]
    legs: Option<usize>,

    /// Tail bones
    #[arg(long)]
    tail: Option<usize>,

    /// Body scale
    #[arg(long)]
    scale: Option<f32>,

    /// Roll a random lizard from the seed
    #[arg(long)]
    random: bool,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Pointer path: static, circle, figure-eight, waypoints
    #[arg(long)]
    path: Option<String>,

    /// Output GIF path
    #[arg(short, long)]
    output: Option<String>,

    /// Canvas width in pixels
    #[arg(long)]
    width: Option<u16>,

    /// Canvas height in pixels
    #[arg(long)]
    height: Option<u16>,

    /// Pace ticks at the simulation rate
    #[arg(long)]
    realtime: bool,

    /// Simulate without writing the GIF
    #[arg(long)]
    dry_run: bool,

    /// List available pointer paths
    #[arg(long)]
    list_paths: bool,

    /// Print the effective configuration as RON and exit
    #[arg(long)]
    print_config: bool,
}

impl Args {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(ticks) = self.ticks {
            config.capture.ticks = ticks;
        }
        if let Some(legs) = self.legs {
            config.creature.leg_pairs = legs;
        }
        if let Some(tail) = self.tail {
            config.creature.tail = tail;
        }
        if let Some(scale) = self.scale {
            config.creature.scale = scale;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(path) = &self.path {
            config.pointer.path = path.clone();
        }
        if let Some(output) = &self.output {
            config.capture.output = output.clone();
        }
        if let Some(width) = self.width {
            config.canvas.width = width;
        }
        if let Some(height) = self.height {
            config.canvas.height = height;
        }
        config.creature.randomize |= self.random;
        config.capture.realtime |= self.realtime;
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.list_paths {
        for kind in PointerPathKind::all() {
            println!("{}", kind);
        }
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    args.apply(&mut config);

    if args.print_config {
        print!("{}", config.to_ron()?);
        return Ok(());
    }

    log::info!("Starting kadal (seed {})", config.seed);

    let summary = CaptureRun::new(config)?.run(!args.dry_run)?;

    println!(
        "{} ticks, {} frames, {} leg pairs, mean pointer distance {:.1}",
        summary.ticks, summary.frames, summary.lizard.leg_pairs, summary.mean_lag
    );
    if let Some(output) = summary.output {
        println!("Wrote {}", output.display());
    }

    Ok(())
}
