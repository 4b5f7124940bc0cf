//! Prints the reach → expansion curve.

use hand_openness::{
    map_openness, openness_from_reach, Landmark, LandmarkSet, LANDMARK_COUNT, MIDDLE_TIP,
};

fn hand_with_reach(reach: f32) -> LandmarkSet {
    let mut pts = [Landmark::default(); LANDMARK_COUNT];
    pts[MIDDLE_TIP] = Landmark::new(0.0, -reach, 0.0);
    LandmarkSet::new(pts)
}

fn main() {
    println!("\n=== Hand Openness Curve ===\n");
    println!("   {:>6}  {:>9}  {:>9}", "reach", "openness", "expansion");
    for i in 0..=8 {
        let reach = i as f32 * 0.05;
        let e = map_openness(Some(&hand_with_reach(reach)));
        let bar = "█".repeat((e * 10.0) as usize);
        println!("   {:>6.3}  {:>9.3}  {:>9.3}  {}", reach, openness_from_reach(reach), e, bar);
    }
    println!("   {:>6}  {:>9}  {:>9.3}", "—", "no hand", map_openness(None));
    println!();
}
