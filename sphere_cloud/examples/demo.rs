//! Generates a seeded cloud and prints a few points and distribution stats.

use rand::{rngs::StdRng, SeedableRng};
use sphere_cloud::{generate_with, to_buffers, ParticleSystem, DEFAULT_COUNT, DEFAULT_RADIUS};

fn main() {
    println!("\n=== Sphere Cloud Demo ===\n");

    let mut rng = StdRng::seed_from_u64(2024);
    let cloud = generate_with(&mut rng, DEFAULT_COUNT, DEFAULT_RADIUS);

    // ── 1. First points ──────────────────────────────────────────────────
    println!("1. First five points (radius {})", DEFAULT_RADIUS);
    for p in cloud.iter().take(5) {
        let [x, y, z] = p.position;
        let [r, g, b] = p.color;
        println!("   ({:>6.3}, {:>6.3}, {:>6.3})  |p|={:.4}  rgb=({:.2}, {:.2}, {:.2})",
                 x, y, z, p.radius(), r, g, b);
    }
    println!();

    // ── 2. Band counts: equal-area sampling gives flat bands in z ───────
    println!("2. Points per z band");
    let bands = 8;
    let mut counts = vec![0usize; bands];
    for p in &cloud {
        let t = (p.position[2] / DEFAULT_RADIUS + 1.0) / 2.0;
        let i = ((t * bands as f32) as usize).min(bands - 1);
        counts[i] += 1;
    }
    for (i, c) in counts.iter().enumerate() {
        println!("   band {}  {:>4}  {}", i, c, "▪".repeat(c / 20));
    }
    println!();

    // ── 3. Flat buffers ──────────────────────────────────────────────────
    let (positions, colors) = to_buffers(&cloud);
    println!("3. Flat buffers: {} position floats, {} color floats", positions.len(), colors.len());
    println!();

    // ── 4. Transform ─────────────────────────────────────────────────────
    println!("4. After scale 3.0 and 100 spins of 0.003 rad");
    let mut sys = ParticleSystem::new(cloud);
    sys.set_scale(3.0);
    for _ in 0..100 { sys.spin(0.003); }
    if let Some((pos, _)) = sys.world_points().next() {
        println!("   first point → ({:.3}, {:.3}, {:.3})  rotation={:.3}",
                 pos.x, pos.y, pos.z, sys.rotation());
    }
    println!();
}
