//! # sphere_cloud
//!
//! A fixed-size cloud of colored points on the surface of a sphere, plus the
//! single transform (uniform scale, spin about Y) applied to the whole cloud
//! each frame.
//!
//! ```rust
//! use rand::{rngs::StdRng, SeedableRng};
//! use sphere_cloud::{generate_with, ParticleSystem, DEFAULT_RADIUS};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let cloud = generate_with(&mut rng, 100, DEFAULT_RADIUS);
//! let mut system = ParticleSystem::new(cloud);
//!
//! system.set_scale(1.75);
//! system.spin(0.003);
//! assert_eq!(system.len(), 100);
//! ```

pub mod geometry;
pub mod system;

pub use geometry::*;
pub use system::*;
