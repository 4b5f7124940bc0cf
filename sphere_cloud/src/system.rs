//! The particle system: immutable points plus one mutable transform.

use std::f64::consts::TAU;

use glam::{Quat, Vec3};

use crate::geometry::ParticlePoint;

/// Rendering attributes shared by every point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointMaterial {
    /// World-space edge length of each point sprite.
    pub size:    f32,
    /// 0.0 = invisible, 1.0 = opaque.
    pub opacity: f32,
}

impl Default for PointMaterial {
    fn default() -> Self {
        PointMaterial { size: 0.08, opacity: 0.9 }
    }
}

/// Uniform scale followed by a rotation about the Y axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub scale:      f32,
    /// Radians, always in `[0, 2π)`.
    pub rotation_y: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Transform { scale: 1.0, rotation_y: 0.0 }
    }
}

impl Transform {
    /// Model → world.
    pub fn apply(&self, p: Vec3) -> Vec3 {
        Quat::from_rotation_y(self.rotation_y as f32) * (p * self.scale)
    }
}

#[derive(Clone, Debug)]
pub struct ParticleSystem {
    points:        Vec<ParticlePoint>,
    pub material:  PointMaterial,
    pub transform: Transform,
}

impl ParticleSystem {
    pub fn new(points: Vec<ParticlePoint>) -> Self {
        ParticleSystem {
            points,
            material:  PointMaterial::default(),
            transform: Transform::default(),
        }
    }

    pub fn with_material(mut self, material: PointMaterial) -> Self {
        self.material = material;
        self
    }

    pub fn points(&self) -> &[ParticlePoint] { &self.points }
    pub fn len(&self) -> usize { self.points.len() }
    pub fn is_empty(&self) -> bool { self.points.is_empty() }

    pub fn set_scale(&mut self, scale: f32) { self.transform.scale = scale; }
    pub fn scale(&self) -> f32 { self.transform.scale }

    /// Advance the Y rotation, wrapping into `[0, 2π)`.
    pub fn spin(&mut self, delta: f64) {
        self.transform.rotation_y = (self.transform.rotation_y + delta).rem_euclid(TAU);
    }
    pub fn rotation(&self) -> f64 { self.transform.rotation_y }

    /// World-space positions paired with their colors.
    pub fn world_points(&self) -> impl Iterator<Item = (Vec3, [f32; 3])> + '_ {
        let t = self.transform;
        self.points.iter().map(move |p| (t.apply(Vec3::from(p.position)), p.color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn approx(a: Vec3, b: Vec3) -> bool {
        a.abs_diff_eq(b, 1e-5)
    }

    #[test]
    fn identity_transform_is_noop() {
        let t = Transform::default();
        assert_eq!(t.apply(Vec3::new(1.0, 2.0, 3.0)), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn scale_is_uniform() {
        let t = Transform { scale: 2.5, rotation_y: 0.0 };
        assert!(approx(t.apply(Vec3::new(1.0, -2.0, 0.5)), Vec3::new(2.5, -5.0, 1.25)));
    }

    #[test]
    fn quarter_turn_about_y() {
        let t = Transform { scale: 1.0, rotation_y: FRAC_PI_2 };
        // +X swings to −Z, Y untouched.
        assert!(approx(t.apply(Vec3::X), Vec3::NEG_Z));
        assert!(approx(t.apply(Vec3::Y), Vec3::Y));
    }

    #[test]
    fn scale_applies_before_rotation() {
        let t = Transform { scale: 2.0, rotation_y: FRAC_PI_2 };
        assert!(approx(t.apply(Vec3::Z), Vec3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn world_points_follow_transform() {
        let pts = vec![ParticlePoint { position: [0.0, 2.0, 0.0], color: [1.0, 0.2, 1.0] }];
        let mut sys = ParticleSystem::new(pts);
        sys.set_scale(0.5);
        let (pos, col) = sys.world_points().next().unwrap();
        assert!(approx(pos, Vec3::new(0.0, 1.0, 0.0)));
        assert_eq!(col, [1.0, 0.2, 1.0]);
    }

    #[test]
    fn spin_accumulates() {
        let mut sys = ParticleSystem::new(Vec::new());
        for _ in 0..10 { sys.spin(0.1); }
        assert!((sys.rotation() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn spin_wraps_into_one_turn() {
        let mut sys = ParticleSystem::new(Vec::new());
        sys.spin(TAU - 0.001);
        sys.spin(0.003);
        assert!((sys.rotation() - 0.002).abs() < 1e-12);
        sys.spin(-0.004);
        assert!((sys.rotation() - (TAU - 0.002)).abs() < 1e-12);
    }

    #[test]
    fn spin_stays_exact_over_millions_of_frames() {
        // About 23 hours at 60 fps.
        let mut sys = ParticleSystem::new(Vec::new());
        let n = 5_000_000u64;
        for _ in 0..n { sys.spin(0.003); }
        let expected = (n as f64 * 0.003).rem_euclid(TAU);
        assert!((sys.rotation() - expected).abs() < 1e-6,
                "rotation {} expected {}", sys.rotation(), expected);
        assert!((0.0..TAU).contains(&sys.rotation()));

        let before = sys.rotation();
        sys.spin(0.003);
        assert!((sys.rotation() - before - 0.003).abs() < 1e-9);
    }

    #[test]
    fn default_material_matches_reference_look() {
        let m = PointMaterial::default();
        assert_eq!(m.size, 0.08);
        assert_eq!(m.opacity, 0.9);
    }
}
