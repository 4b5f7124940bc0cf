//! Application wiring.
//!
//! `run` builds the particle cloud, opens the window, starts the frame pump
//! on its own thread, and drives the render loop on the calling thread until
//! the window closes.

use std::sync::mpsc;

use hand_openness::ControlCell;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sphere_cloud::{generate, generate_with, ParticleSystem, PointMaterial, DEFAULT_COUNT, DEFAULT_RADIUS};
use tracing::{info, warn};

use crate::error::AppError;
use crate::observer::{DetectorConfig, SimHandObserver, SimInput};
use crate::pump::{spawn_frame_pump, CameraConfig};
use crate::render_loop::{RenderLoop, StopSignal, SPIN_PER_FRAME};
use crate::scene::{CameraView, Scene};
use crate::visualizer::{Visualizer, DEFAULT_WIN_H, DEFAULT_WIN_W};

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Where hand observations come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandSource {
    /// Keyboard-driven synthetic hand.
    Simulated,
    /// LeapMotion controller via LeapC.
    #[cfg(feature = "leap")]
    Leap,
}

/// Configuration for the full application.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub particle_count: usize,
    pub radius:         f32,
    /// Fixed RNG seed for a reproducible cloud; `None` draws from the OS.
    pub seed:           Option<u64>,
    pub material:       PointMaterial,
    pub spin_per_frame: f64,
    pub view:           CameraView,
    pub window_width:   usize,
    pub window_height:  usize,
    pub camera:         CameraConfig,
    pub detector:       DetectorConfig,
    pub source:         HandSource,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            particle_count: DEFAULT_COUNT,
            radius:         DEFAULT_RADIUS,
            seed:           None,
            material:       PointMaterial::default(),
            spin_per_frame: SPIN_PER_FRAME,
            view:           CameraView::default(),
            window_width:   DEFAULT_WIN_W,
            window_height:  DEFAULT_WIN_H,
            camera:         CameraConfig::default(),
            detector:       DetectorConfig::default(),
            source:         HandSource::Simulated,
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(AppError::Config(format!("radius must be positive, got {}", self.radius)));
        }
        if self.window_width == 0 || self.window_height == 0 {
            return Err(AppError::Config("window size must be non-zero".into()));
        }
        if self.camera.fps == 0 {
            return Err(AppError::Config("camera fps must be at least 1".into()));
        }
        let d = &self.detector;
        for (name, v) in [
            ("min_detection_confidence", d.min_detection_confidence),
            ("min_tracking_confidence",  d.min_tracking_confidence),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(AppError::Config(format!("{} must be in [0, 1], got {}", name, v)));
            }
        }
        Ok(())
    }

    /// Generate the particle system described by this config.
    pub fn build_particles(&self) -> ParticleSystem {
        let points = match self.seed {
            Some(seed) => generate_with(&mut StdRng::seed_from_u64(seed), self.particle_count, self.radius),
            None       => generate(self.particle_count, self.radius),
        };
        ParticleSystem::new(points).with_material(self.material)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the full application.
///
/// This is the entry point called from `main.rs`.  The render loop owns the
/// window on this thread; the frame pump talks to it only through the
/// shared [`ControlCell`] and [`StopSignal`].
pub fn run(cfg: AppConfig) -> Result<(), AppError> {
    cfg.validate()?;

    let control = ControlCell::default();
    let stop    = StopSignal::new();

    // ── Window (owns the sim input sender) ───────────────────────────────
    let (sim_tx, sim_rx) = mpsc::channel::<SimInput>();
    let mut vis = Visualizer::new(cfg.window_width, cfg.window_height, sim_tx)?;

    // ── Hand observer on the pump thread ─────────────────────────────────
    let detector = cfg.detector;
    let pump = match cfg.source {
        HandSource::Simulated => spawn_frame_pump(
            move || Ok(SimHandObserver::new(sim_rx, detector)),
            cfg.camera, control.clone(), stop.clone(),
        ),
        #[cfg(feature = "leap")]
        HandSource::Leap => spawn_frame_pump(
            move || crate::observer::LeapHandObserver::open(detector),
            cfg.camera, control.clone(), stop.clone(),
        ),
    };

    // ── Scene + render loop ──────────────────────────────────────────────
    let particles = cfg.build_particles();
    info!(
        particles = particles.len(),
        radius = cfg.radius,
        source = ?cfg.source,
        "particle cloud ready"
    );
    let scene = Scene::new(cfg.window_width, cfg.window_height, cfg.view);
    let mut render = RenderLoop::new(particles, scene, control).with_spin(cfg.spin_per_frame);

    let rendered = render.run(&mut vis, &stop);
    stop.stop();

    let pumped = pump.join().map_err(|_| AppError::PumpPanicked)?;

    // A detector failure ends the render loop via the stop signal; report it
    // ahead of anything the render loop saw afterwards.
    let stats = pumped?;
    match rendered {
        Ok(frames) => {
            info!(frames, camera_frames = stats.frames, hand_frames = stats.hand_frames, "shutdown");
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, "render loop ended with an error");
            Err(e)
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
