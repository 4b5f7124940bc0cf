//! Openness → expansion mapping.

use crate::landmark::LandmarkSet;

// ════════════════════════════════════════════════════════════════════════════
// Constants (empirically tuned)
// ════════════════════════════════════════════════════════════════════════════

/// Expansion used when no hand is in view.
pub const NO_HAND_EXPANSION: f32 = 0.7;

/// Reach at or below which the hand counts as fully closed.
pub const CLOSED_REACH: f32 = 0.05;

/// Reach span from fully closed to fully open.
pub const REACH_SPAN: f32 = 0.25;

pub const MIN_EXPANSION: f32 = 0.5;
pub const MAX_EXPANSION: f32 = 3.0;

// ════════════════════════════════════════════════════════════════════════════
// Mapping
// ════════════════════════════════════════════════════════════════════════════

/// Normalised openness in `[0, 1]` for a wrist → middle-tip distance.
///
/// A NaN reach yields NaN; callers go through [`map_openness`], which turns
/// that into the no-hand fallback.
pub fn openness_from_reach(reach: f32) -> f32 {
    ((reach - CLOSED_REACH) / REACH_SPAN).clamp(0.0, 1.0)
}

/// Affine remap of openness onto the expansion range.
pub fn expansion_from_openness(openness: f32) -> f32 {
    MIN_EXPANSION + openness * (MAX_EXPANSION - MIN_EXPANSION)
}

/// Map an optional detected hand to the particle expansion factor.
///
/// * `None` → [`NO_HAND_EXPANSION`]
/// * `Some(hand)` → `0.5 + 2.5 · clamp((reach − 0.05) / 0.25, 0, 1)`
///
/// The result is always finite: garbage landmarks that produce a NaN reach
/// are treated like a missing hand.
pub fn map_openness(hand: Option<&LandmarkSet>) -> f32 {
    let Some(hand) = hand else { return NO_HAND_EXPANSION };
    let reach = hand.reach();
    if reach.is_nan() {
        return NO_HAND_EXPANSION;
    }
    expansion_from_openness(openness_from_reach(reach))
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::{Landmark, LANDMARK_COUNT, MIDDLE_TIP, WRIST};

    const EPS: f32 = 1e-5;

    fn hand(wrist: Landmark, tip: Landmark) -> LandmarkSet {
        let mut pts = [Landmark::default(); LANDMARK_COUNT];
        pts[WRIST] = wrist;
        pts[MIDDLE_TIP] = tip;
        LandmarkSet::new(pts)
    }

    fn expansion_at(reach: f32) -> f32 {
        map_openness(Some(&hand(Landmark::default(), Landmark::new(reach, 0.0, 0.0))))
    }

    #[test]
    fn no_hand_is_exact_fallback() {
        assert_eq!(map_openness(None), 0.7);
    }

    #[test]
    fn closed_hand_is_minimum() {
        assert_eq!(expansion_at(0.0), 0.5);
    }

    #[test]
    fn fully_open_hand_is_maximum() {
        assert!((expansion_at(0.3) - 3.0).abs() < EPS);
    }

    #[test]
    fn midpoint_reach_gives_midpoint_expansion() {
        assert!((expansion_at(0.175) - 1.75).abs() < EPS);
    }

    #[test]
    fn reach_beyond_span_clamps() {
        assert_eq!(expansion_at(5.0), 3.0);
        assert_eq!(expansion_at(f32::INFINITY), 3.0);
    }

    #[test]
    fn z_contributes_to_distance() {
        let e = map_openness(Some(&hand(
            Landmark::new(0.5, 0.5, 0.0),
            Landmark::new(0.5, 0.5, -0.3),
        )));
        assert!((e - 3.0).abs() < EPS);
    }

    #[test]
    fn nan_landmarks_fall_back() {
        let e = map_openness(Some(&hand(Landmark::default(), Landmark::new(f32::NAN, 0.0, 0.0))));
        assert_eq!(e, NO_HAND_EXPANSION);
    }

    #[test]
    fn expansion_is_monotonic_in_reach() {
        let mut prev = expansion_at(0.0);
        for i in 1..=400 {
            let e = expansion_at(i as f32 * 0.001);
            assert!(e >= prev, "expansion dropped at reach {}", i as f32 * 0.001);
            assert!((MIN_EXPANSION..=MAX_EXPANSION).contains(&e));
            prev = e;
        }
    }
}
