//! Software point renderer.
//!
//! The scene owns a perspective camera and an ARGB pixel buffer.  Each
//! frame every particle is transformed, projected, and splatted as a square
//! sprite whose size shrinks with depth, alpha-blended over the background.

use glam::Vec3;
use sphere_cloud::ParticleSystem;

// ════════════════════════════════════════════════════════════════════════════
// Colors
// ════════════════════════════════════════════════════════════════════════════

pub const BLACK: u32 = 0xFF000000;

/// Linear `[0, 1]` RGB → packed ARGB (0xAARRGGBB, A=0xFF).
pub fn rgb_to_argb(c: [f32; 3]) -> u32 {
    let ch = |v: f32| (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u32;
    0xFF000000 | (ch(c[0]) << 16) | (ch(c[1]) << 8) | ch(c[2])
}

/// Blend `src` over `dst` with coverage `alpha`.
fn blend_over(dst: u32, src: u32, alpha: f32) -> u32 {
    let a = alpha.clamp(0.0, 1.0);
    let mix = |d: u32, s: u32| (s as f32 * a + d as f32 * (1.0 - a) + 0.5) as u32;
    let r = mix((dst >> 16) & 0xFF, (src >> 16) & 0xFF);
    let g = mix((dst >>  8) & 0xFF, (src >>  8) & 0xFF);
    let b = mix( dst        & 0xFF,  src        & 0xFF);
    0xFF000000 | (r << 16) | (g << 8) | b
}

// ════════════════════════════════════════════════════════════════════════════
// PerspectiveCamera
// ════════════════════════════════════════════════════════════════════════════

/// Camera placement and lens, independent of the viewport size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraView {
    /// Vertical field of view in degrees.
    pub fov_y_deg: f32,
    pub near:      f32,
    pub far:       f32,
    /// Eye position; the camera always looks at the origin with +Y up.
    pub position:  Vec3,
}

impl Default for CameraView {
    fn default() -> Self {
        CameraView { fov_y_deg: 60.0, near: 0.1, far: 100.0, position: Vec3::new(0.0, 0.0, 8.0) }
    }
}

/// A point after projection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
    /// Pixel coordinates, origin top-left.
    pub x:     f32,
    pub y:     f32,
    /// Distance along the view direction.
    pub depth: f32,
}

#[derive(Clone, Debug)]
pub struct PerspectiveCamera {
    pub view:   CameraView,
    pub aspect: f32,
    right:   Vec3,
    up:      Vec3,
    forward: Vec3,
    /// tan(fov_y / 2)
    tan_half: f32,
}

impl PerspectiveCamera {
    pub fn new(view: CameraView, aspect: f32) -> Self {
        let forward = (Vec3::ZERO - view.position).normalize_or_zero();
        // Looking straight up or down: pick another reference so `right` exists.
        let world_up = if forward.cross(Vec3::Y).length_squared() < 1e-12 {
            Vec3::NEG_Z
        } else {
            Vec3::Y
        };
        let right = forward.cross(world_up).normalize_or_zero();
        let up    = right.cross(forward).normalize_or_zero();
        PerspectiveCamera {
            view,
            aspect,
            right,
            up,
            forward,
            tan_half: (view.fov_y_deg.to_radians() / 2.0).tan(),
        }
    }

    pub fn set_aspect(&mut self, aspect: f32) { self.aspect = aspect; }

    /// Project a world point onto a `width × height` viewport.  Points outside
    /// the near/far range return `None`; lateral clipping is left to the caller.
    pub fn project(&self, p: Vec3, width: usize, height: usize) -> Option<Projected> {
        let d = p - self.view.position;
        let depth = d.dot(self.forward);
        if depth < self.view.near || depth > self.view.far {
            return None;
        }
        let ndc_x = d.dot(self.right) / (depth * self.tan_half * self.aspect);
        let ndc_y = d.dot(self.up)    / (depth * self.tan_half);
        Some(Projected {
            x: (ndc_x + 1.0) * 0.5 * width as f32,
            y: (1.0 - ndc_y) * 0.5 * height as f32,
            depth,
        })
    }

    /// On-screen edge length in pixels of a point sprite of `size` at `depth`.
    ///
    /// Same attenuation as a three.js `PointsMaterial`: half the viewport
    /// height over depth, independent of the field of view.
    pub fn sprite_px(&self, size: f32, depth: f32, height: usize) -> f32 {
        size * (height as f32 * 0.5) / depth
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Scene
// ════════════════════════════════════════════════════════════════════════════

pub struct Scene {
    camera:     PerspectiveCamera,
    width:      usize,
    height:     usize,
    buf:        Vec<u32>,
    pub background: u32,
}

impl Scene {
    pub fn new(width: usize, height: usize, view: CameraView) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        Scene {
            camera:     PerspectiveCamera::new(view, width as f32 / height as f32),
            width,
            height,
            buf:        vec![BLACK; width * height],
            background: BLACK,
        }
    }

    pub fn size(&self)   -> (usize, usize)       { (self.width, self.height) }
    pub fn buffer(&self) -> &[u32]               { &self.buf }
    pub fn camera(&self) -> &PerspectiveCamera   { &self.camera }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.buf[y * self.width + x])
    }

    /// Match a new viewport size.  Zero-sized viewports (minimised windows)
    /// are ignored.
    pub fn resize(&mut self, width: usize, height: usize) {
        if width == 0 || height == 0 || (width, height) == (self.width, self.height) {
            return;
        }
        self.width  = width;
        self.height = height;
        self.camera.set_aspect(width as f32 / height as f32);
        self.buf = vec![self.background; width * height];
    }

    /// Draw one frame of `particles` into the buffer.
    pub fn render(&mut self, particles: &ParticleSystem) {
        self.buf.fill(self.background);

        let material = particles.material;
        for (pos, color) in particles.world_points() {
            let Some(p) = self.camera.project(pos, self.width, self.height) else { continue };
            let side = self.camera.sprite_px(material.size, p.depth, self.height).max(1.0);
            self.splat(p.x, p.y, side, rgb_to_argb(color), material.opacity);
        }
    }

    fn splat(&mut self, cx: f32, cy: f32, side: f32, color: u32, alpha: f32) {
        let half = side * 0.5;
        let x0 = (cx - half).round() as isize;
        let y0 = (cy - half).round() as isize;
        // Always cover at least one pixel.
        let x1 = ((cx + half).round() as isize).max(x0 + 1);
        let y1 = ((cy + half).round() as isize).max(y0 + 1);

        let (w, h) = (self.width as isize, self.height as isize);
        if x1 <= 0 || y1 <= 0 || x0 >= w || y0 >= h {
            return;
        }
        let (x0, y0) = (x0.max(0) as usize, y0.max(0) as usize);
        let (x1, y1) = (x1.min(w) as usize, y1.min(h) as usize);

        for row in y0..y1 {
            for col in x0..x1 {
                let i = row * self.width + col;
                self.buf[i] = blend_over(self.buf[i], color, alpha);
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use sphere_cloud::{ParticlePoint, PointMaterial};

    fn system(points: &[[f32; 3]]) -> ParticleSystem {
        ParticleSystem::new(
            points.iter()
                .map(|&position| ParticlePoint { position, color: [1.0, 1.0, 1.0] })
                .collect(),
        )
    }

    #[test]
    fn argb_packing() {
        assert_eq!(rgb_to_argb([1.0, 0.0, 0.0]), 0xFFFF0000);
        assert_eq!(rgb_to_argb([0.0, 0.2, 1.0]), 0xFF0033FF);
        assert_eq!(rgb_to_argb([-1.0, 2.0, 0.0]), 0xFF00FF00);
    }

    #[test]
    fn blend_endpoints() {
        assert_eq!(blend_over(BLACK, 0xFFFFFFFF, 0.0), BLACK);
        assert_eq!(blend_over(BLACK, 0xFFFFFFFF, 1.0), 0xFFFFFFFF);
        let r = (blend_over(BLACK, 0xFFFFFFFF, 0.9) >> 16) & 0xFF;
        assert!((229..=230).contains(&r));
    }

    #[test]
    fn default_camera_matches_reference_setup() {
        let v = CameraView::default();
        assert_eq!(v.fov_y_deg, 60.0);
        assert_eq!(v.near, 0.1);
        assert_eq!(v.far, 100.0);
        assert_eq!(v.position, Vec3::new(0.0, 0.0, 8.0));
    }

    #[test]
    fn origin_projects_to_centre() {
        let cam = PerspectiveCamera::new(CameraView::default(), 4.0 / 3.0);
        let p = cam.project(Vec3::ZERO, 800, 600).unwrap();
        assert!((p.x - 400.0).abs() < 1e-3);
        assert!((p.y - 300.0).abs() < 1e-3);
        assert!((p.depth - 8.0).abs() < 1e-5);
    }

    #[test]
    fn up_is_up_and_right_is_right() {
        let cam = PerspectiveCamera::new(CameraView::default(), 1.0);
        let up    = cam.project(Vec3::Y, 100, 100).unwrap();
        let right = cam.project(Vec3::X, 100, 100).unwrap();
        assert!(up.y < 50.0);
        assert!(right.x > 50.0);
    }

    #[test]
    fn points_behind_camera_or_past_far_are_culled() {
        let cam = PerspectiveCamera::new(CameraView::default(), 1.0);
        assert!(cam.project(Vec3::new(0.0, 0.0, 9.0), 100, 100).is_none());
        assert!(cam.project(Vec3::new(0.0, 0.0, 7.95), 100, 100).is_none());
        assert!(cam.project(Vec3::new(0.0, 0.0, -95.0), 100, 100).is_none());
    }

    #[test]
    fn top_down_camera_still_projects() {
        let view = CameraView { position: Vec3::new(0.0, 8.0, 0.0), ..CameraView::default() };
        let cam = PerspectiveCamera::new(view, 1.0);
        let p = cam.project(Vec3::ZERO, 100, 100).unwrap();
        assert!((p.x - 50.0).abs() < 1e-3 && (p.y - 50.0).abs() < 1e-3);
    }

    #[test]
    fn empty_scene_renders_black() {
        let mut scene = Scene::new(64, 48, CameraView::default());
        scene.render(&system(&[]));
        assert!(scene.buffer().iter().all(|&p| p == BLACK));
    }

    #[test]
    fn particle_at_origin_lights_centre_pixel() {
        let mut scene = Scene::new(64, 48, CameraView::default());
        scene.render(&system(&[[0.0, 0.0, 0.0]]));
        let c = scene.pixel(32, 24).unwrap();
        assert_ne!(c, BLACK);
        assert_eq!(c, blend_over(BLACK, 0xFFFFFFFF, PointMaterial::default().opacity));
        assert_eq!(scene.pixel(0, 0), Some(BLACK));
    }

    #[test]
    fn render_clears_previous_frame() {
        let mut scene = Scene::new(64, 48, CameraView::default());
        scene.render(&system(&[[0.0, 0.0, 0.0]]));
        scene.render(&system(&[]));
        assert_eq!(scene.pixel(32, 24), Some(BLACK));
    }

    #[test]
    fn off_screen_particles_are_skipped() {
        let mut scene = Scene::new(32, 32, CameraView::default());
        scene.render(&system(&[[50.0, 0.0, 0.0], [0.0, -50.0, 0.0]]));
        assert!(scene.buffer().iter().all(|&p| p == BLACK));
    }

    #[test]
    fn resize_updates_aspect_and_buffer() {
        let mut scene = Scene::new(100, 100, CameraView::default());
        scene.resize(200, 50);
        assert_eq!(scene.size(), (200, 50));
        assert_eq!(scene.buffer().len(), 200 * 50);
        assert!((scene.camera().aspect - 4.0).abs() < 1e-6);
    }

    #[test]
    fn resize_to_zero_is_ignored() {
        let mut scene = Scene::new(100, 80, CameraView::default());
        scene.resize(0, 80);
        scene.resize(100, 0);
        assert_eq!(scene.size(), (100, 80));
    }

    #[test]
    fn sprites_shrink_with_distance() {
        let cam = PerspectiveCamera::new(CameraView::default(), 1.0);
        let near = cam.sprite_px(0.08, 4.0, 768);
        let far  = cam.sprite_px(0.08, 8.0, 768);
        assert!((near - 2.0 * far).abs() < 1e-4);
    }

    #[test]
    fn sprite_size_ignores_field_of_view() {
        // 0.08 × (768 / 2) / 8 at the default eye distance.
        let narrow = PerspectiveCamera::new(CameraView { fov_y_deg: 30.0, ..CameraView::default() }, 1.0);
        let wide   = PerspectiveCamera::new(CameraView::default(), 1.0);
        assert!((wide.sprite_px(0.08, 8.0, 768) - 3.84).abs() < 1e-4);
        assert_eq!(narrow.sprite_px(0.08, 8.0, 768), wide.sprite_px(0.08, 8.0, 768));
    }
}
