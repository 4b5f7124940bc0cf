//! Per-frame loop: read the control value, scale and spin the cloud, draw.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use hand_openness::ControlCell;
use sphere_cloud::ParticleSystem;
use tracing::{debug, trace};

use crate::error::AppError;
use crate::scene::Scene;

/// Rotation added about Y every frame (radians).
pub const SPIN_PER_FRAME: f64 = 0.003;

// ════════════════════════════════════════════════════════════════════════════
// StopSignal
// ════════════════════════════════════════════════════════════════════════════

/// Shared shutdown flag.  Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self { Self::default() }
    pub fn stop(&self) { self.0.store(true, Ordering::Release); }
    pub fn is_stopped(&self) -> bool { self.0.load(Ordering::Acquire) }
}

// ════════════════════════════════════════════════════════════════════════════
// Surface — where finished frames go
// ════════════════════════════════════════════════════════════════════════════

/// A presentation target: a window, or a stand-in for tests.
pub trait Surface {
    /// Pump input.  Returns false once the surface wants to close.
    fn poll(&mut self) -> bool;
    /// Current drawable size in pixels.
    fn size(&self) -> (usize, usize);
    fn present(&mut self, buf: &[u32], width: usize, height: usize) -> Result<(), AppError>;
}

// ════════════════════════════════════════════════════════════════════════════
// RenderLoop
// ════════════════════════════════════════════════════════════════════════════

pub struct RenderLoop {
    particles: ParticleSystem,
    scene:     Scene,
    control:   ControlCell,
    spin:      f64,
    frames:    u64,
}

impl RenderLoop {
    pub fn new(particles: ParticleSystem, scene: Scene, control: ControlCell) -> Self {
        RenderLoop { particles, scene, control, spin: SPIN_PER_FRAME, frames: 0 }
    }

    pub fn with_spin(mut self, spin: f64) -> Self {
        self.spin = spin;
        self
    }

    pub fn particles(&self) -> &ParticleSystem { &self.particles }
    pub fn scene(&self) -> &Scene { &self.scene }
    pub fn frames(&self) -> u64 { self.frames }

    /// One iteration: apply the latest expansion, spin, render.
    pub fn step(&mut self) {
        let expansion = self.control.get();
        self.particles.set_scale(expansion);
        self.particles.spin(self.spin);
        self.scene.render(&self.particles);
        self.frames += 1;
        trace!(frame = self.frames, expansion, "rendered");
    }

    /// Step and present until the surface closes or `stop` fires.  Returns
    /// the number of frames drawn by this loop so far.
    pub fn run<S: Surface>(&mut self, surface: &mut S, stop: &StopSignal) -> Result<u64, AppError> {
        while !stop.is_stopped() && surface.poll() {
            let (w, h) = surface.size();
            if (w, h) != self.scene.size() && w > 0 && h > 0 {
                debug!(width = w, height = h, "viewport resized");
                self.scene.resize(w, h);
            }

            self.step();

            let (w, h) = self.scene.size();
            surface.present(self.scene.buffer(), w, h)?;
        }
        Ok(self.frames)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{CameraView, BLACK};
    use sphere_cloud::{ParticlePoint, DEFAULT_RADIUS};

    /// Surface that stays open for `frames` polls and can change size midway.
    struct FakeSurface {
        remaining: usize,
        size:      (usize, usize),
        resize_at: Option<(usize, (usize, usize))>,
        presented: Vec<(usize, usize)>,
        fail:      bool,
    }

    impl FakeSurface {
        fn open_for(frames: usize) -> Self {
            FakeSurface { remaining: frames, size: (64, 48), resize_at: None, presented: Vec::new(), fail: false }
        }
    }

    impl Surface for FakeSurface {
        fn poll(&mut self) -> bool {
            if self.remaining == 0 { return false; }
            if let Some((at, size)) = self.resize_at {
                if self.remaining == at { self.size = size; }
            }
            self.remaining -= 1;
            true
        }
        fn size(&self) -> (usize, usize) { self.size }
        fn present(&mut self, buf: &[u32], w: usize, h: usize) -> Result<(), AppError> {
            assert_eq!(buf.len(), w * h);
            if self.fail {
                return Err(AppError::Detector("present failed".into()));
            }
            self.presented.push((w, h));
            Ok(())
        }
    }

    fn make_loop(control: ControlCell) -> RenderLoop {
        let pts = vec![ParticlePoint { position: [DEFAULT_RADIUS, 0.0, 0.0], color: [1.0, 0.2, 1.0] }];
        RenderLoop::new(ParticleSystem::new(pts), Scene::new(64, 48, CameraView::default()), control)
    }

    #[test]
    fn rotation_after_n_steps() {
        let mut rl = make_loop(ControlCell::default());
        for _ in 0..1000 { rl.step(); }
        assert_eq!(rl.frames(), 1000);
        let expected = (1000.0 * SPIN_PER_FRAME).rem_euclid(std::f64::consts::TAU);
        assert!((rl.particles().rotation() - expected).abs() < 1e-9);
    }

    #[test]
    fn scale_tracks_control_value() {
        let control = ControlCell::default();
        let mut rl = make_loop(control.clone());
        rl.step();
        assert_eq!(rl.particles().scale(), 1.0);
        control.set(2.5);
        rl.step();
        assert_eq!(rl.particles().scale(), 2.5);
        control.set(0.7);
        rl.step();
        assert_eq!(rl.particles().scale(), 0.7);
    }

    #[test]
    fn step_draws_something() {
        let mut rl = make_loop(ControlCell::default());
        rl.step();
        assert!(rl.scene().buffer().iter().any(|&p| p != BLACK));
    }

    #[test]
    fn run_stops_when_surface_closes() {
        let mut rl = make_loop(ControlCell::default());
        let mut surface = FakeSurface::open_for(5);
        let frames = rl.run(&mut surface, &StopSignal::new()).unwrap();
        assert_eq!(frames, 5);
        assert_eq!(surface.presented.len(), 5);
    }

    #[test]
    fn run_honours_stop_signal() {
        let mut rl = make_loop(ControlCell::default());
        let mut surface = FakeSurface::open_for(100);
        let stop = StopSignal::new();
        stop.stop();
        assert_eq!(rl.run(&mut surface, &stop).unwrap(), 0);
        assert!(surface.presented.is_empty());
    }

    #[test]
    fn run_follows_viewport_resize() {
        let mut rl = make_loop(ControlCell::default());
        let mut surface = FakeSurface::open_for(4);
        surface.resize_at = Some((2, (128, 32)));
        rl.run(&mut surface, &StopSignal::new()).unwrap();
        assert_eq!(surface.presented, vec![(64, 48), (64, 48), (128, 32), (128, 32)]);
        assert!((rl.scene().camera().aspect - 4.0).abs() < 1e-6);
    }

    #[test]
    fn run_propagates_present_errors() {
        let mut rl = make_loop(ControlCell::default());
        let mut surface = FakeSurface::open_for(3);
        surface.fail = true;
        assert!(rl.run(&mut surface, &StopSignal::new()).is_err());
        assert_eq!(rl.frames(), 1);
    }

    #[test]
    fn stop_signal_is_shared() {
        let a = StopSignal::new();
        let b = a.clone();
        assert!(!b.is_stopped());
        a.stop();
        assert!(b.is_stopped());
    }
}
