//! Hand landmarks in the detector's normalized convention.
//!
//! `x` and `y` are image-plane coordinates in `[0, 1]` (origin top-left),
//! `z` is depth relative to the wrist, roughly on the same scale as `x`.

use glam::Vec3;
use thiserror::Error;

// ════════════════════════════════════════════════════════════════════════════
// Landmark indices
// ════════════════════════════════════════════════════════════════════════════

/// Number of landmarks in one detected hand.
pub const LANDMARK_COUNT: usize = 21;

pub const WRIST:      usize = 0;
pub const THUMB_CMC:  usize = 1;
pub const THUMB_MCP:  usize = 2;
pub const THUMB_IP:   usize = 3;
pub const THUMB_TIP:  usize = 4;
pub const INDEX_MCP:  usize = 5;
pub const INDEX_PIP:  usize = 6;
pub const INDEX_DIP:  usize = 7;
pub const INDEX_TIP:  usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP:   usize = 13;
pub const RING_PIP:   usize = 14;
pub const RING_DIP:   usize = 15;
pub const RING_TIP:   usize = 16;
pub const PINKY_MCP:  usize = 17;
pub const PINKY_PIP:  usize = 18;
pub const PINKY_DIP:  usize = 19;
pub const PINKY_TIP:  usize = 20;

/// First landmark of each finger chain (thumb … pinky); each chain is four
/// consecutive indices ending at the fingertip.
pub const FINGER_BASES: [usize; 5] = [THUMB_CMC, INDEX_MCP, MIDDLE_MCP, RING_MCP, PINKY_MCP];

// ════════════════════════════════════════════════════════════════════════════
// Landmark
// ════════════════════════════════════════════════════════════════════════════

/// A single anatomical point on a detected hand.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Landmark { x, y, z }
    }

    /// Euclidean distance over all three coordinates.
    ///
    /// `z` is not rescaled to match `x`/`y`; the openness constants were
    /// tuned against this exact metric.
    pub fn distance(&self, other: &Landmark) -> f32 {
        self.to_vec3().distance(other.to_vec3())
    }

    pub fn to_vec3(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// LandmarkSet
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LandmarkError {
    #[error("expected 21 landmarks, got {0}")]
    WrongCount(usize),
}

/// One detected hand: exactly [`LANDMARK_COUNT`] ordered landmarks.
#[derive(Clone, Debug, PartialEq)]
pub struct LandmarkSet {
    points: [Landmark; LANDMARK_COUNT],
}

impl LandmarkSet {
    pub fn new(points: [Landmark; LANDMARK_COUNT]) -> Self {
        LandmarkSet { points }
    }

    /// Build from a slice, as delivered by detectors that return a list.
    pub fn from_slice(points: &[Landmark]) -> Result<Self, LandmarkError> {
        let points: [Landmark; LANDMARK_COUNT] = points
            .try_into()
            .map_err(|_| LandmarkError::WrongCount(points.len()))?;
        Ok(LandmarkSet { points })
    }

    pub fn wrist(&self) -> &Landmark { &self.points[WRIST] }
    pub fn middle_tip(&self) -> &Landmark { &self.points[MIDDLE_TIP] }

    /// Wrist to middle-fingertip distance, the raw openness signal.
    pub fn reach(&self) -> f32 {
        self.wrist().distance(self.middle_tip())
    }
}

impl std::ops::Index<usize> for LandmarkSet {
    type Output = Landmark;
    fn index(&self, i: usize) -> &Landmark { &self.points[i] }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
