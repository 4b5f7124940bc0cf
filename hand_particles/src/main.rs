//! hand_particles — interactive entry point.

use clap::Parser;
use hand_particles::app::{run, AppConfig, HandSource};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Hand-openness controlled particle cloud
#[derive(Parser, Debug)]
#[command(name = "hand_particles")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of particles on the sphere
    #[arg(short, long, default_value_t = 3000)]
    count: usize,

    /// Sphere radius in world units
    #[arg(short, long, default_value_t = 2.0)]
    radius: f32,

    /// Seed for a reproducible cloud
    #[arg(long)]
    seed: Option<u64>,

    /// Initial window width
    #[arg(long, default_value_t = 1024)]
    width: usize,

    /// Initial window height
    #[arg(long, default_value_t = 768)]
    height: usize,

    /// Hand observation rate (frames per second)
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Logging verbosity level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Use a LeapMotion controller instead of the keyboard
    #[cfg(feature = "leap")]
    #[arg(long)]
    leap: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Hand Particles v{}", env!("CARGO_PKG_VERSION"));

    #[cfg(feature = "leap")]
    let source = if cli.leap { HandSource::Leap } else { HandSource::Simulated };
    #[cfg(not(feature = "leap"))]
    let source = HandSource::Simulated;

    match source {
        HandSource::Simulated => {
            info!("Mode: keyboard simulation (Space = show hand, Up/Down = open/close, Q = quit)")
        }
        #[cfg(feature = "leap")]
        HandSource::Leap => info!("Mode: LeapMotion hardware"),
    }

    let mut cfg = AppConfig {
        particle_count: cli.count,
        radius:         cli.radius,
        seed:           cli.seed,
        window_width:   cli.width,
        window_height:  cli.height,
        source,
        ..AppConfig::default()
    };
    cfg.camera.fps = cli.fps;

    run(cfg)?;
    Ok(())
}
