//! Point generation.
//!
//! Samples are drawn with the equal-area transform
//! `θ = 2πu`, `φ = acos(2v − 1)`; drawing `φ` uniformly instead would bunch
//! points at the poles.

use glam::Vec3;
use rand::Rng;
use std::f32::consts::PI;

// ════════════════════════════════════════════════════════════════════════════
// Defaults
// ════════════════════════════════════════════════════════════════════════════

pub const DEFAULT_COUNT:  usize = 3000;
pub const DEFAULT_RADIUS: f32   = 2.0;

/// Fixed green/blue channels; red varies per point in `[0.5, 1.0)`.
pub const POINT_GREEN: f32 = 0.2;
pub const POINT_BLUE:  f32 = 1.0;

// ════════════════════════════════════════════════════════════════════════════
// ParticlePoint
// ════════════════════════════════════════════════════════════════════════════

/// One point of the cloud: model-space position and linear RGB color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticlePoint {
    pub position: [f32; 3],
    pub color:    [f32; 3],
}

impl ParticlePoint {
    pub fn radius(&self) -> f32 {
        Vec3::from(self.position).length()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Generation
// ════════════════════════════════════════════════════════════════════════════

/// One uniformly distributed point on a sphere of radius `r`.
pub fn random_point_on_sphere<R: Rng + ?Sized>(rng: &mut R, r: f32) -> [f32; 3] {
    let u: f32 = rng.gen();
    let v: f32 = rng.gen();
    let theta = 2.0 * PI * u;
    let phi   = (2.0 * v - 1.0).clamp(-1.0, 1.0).acos();
    [
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
    ]
}

/// Decorative per-point color.
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> [f32; 3] {
    [0.5 + rng.gen::<f32>() * 0.5, POINT_GREEN, POINT_BLUE]
}

/// Generate `count` points on a sphere of radius `r` from the given RNG.
pub fn generate_with<R: Rng + ?Sized>(rng: &mut R, count: usize, r: f32) -> Vec<ParticlePoint> {
    (0..count)
        .map(|_| {
            let position = random_point_on_sphere(rng, r);
            let color    = random_color(rng);
            ParticlePoint { position, color }
        })
        .collect()
}

/// Generate `count` points using the thread-local RNG.
pub fn generate(count: usize, r: f32) -> Vec<ParticlePoint> {
    generate_with(&mut rand::thread_rng(), count, r)
}

/// Split a cloud into the parallel position/color buffers a GPU upload or
/// file export expects (`3 * len` floats each).
pub fn to_buffers(points: &[ParticlePoint]) -> (Vec<f32>, Vec<f32>) {
    let mut positions = Vec::with_capacity(points.len() * 3);
    let mut colors    = Vec::with_capacity(points.len() * 3);
    for p in points {
        positions.extend_from_slice(&p.position);
        colors.extend_from_slice(&p.color);
    }
    (positions, colors)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
