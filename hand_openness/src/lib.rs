//! # hand_openness
//!
//! Turns a stream of hand-landmark observations into a single scalar control
//! value, the **expansion** factor that scales the particle cloud.
//!
//! | Input | Output |
//! |---|---|
//! | no hand | `0.7` |
//! | fist (wrist → middle tip ≲ 0.05) | `0.5` |
//! | open hand (wrist → middle tip ≳ 0.30) | `3.0` |
//!
//! ## Quick start
//!
//! ```rust
//! use hand_openness::{ControlCell, Landmark, LandmarkSet, map_openness, MIDDLE_TIP};
//!
//! let mut points = [Landmark::default(); 21];
//! points[MIDDLE_TIP] = Landmark::new(0.3, 0.0, 0.0);
//! let hand = LandmarkSet::new(points);
//!
//! let cell = ControlCell::default();
//! cell.set(map_openness(Some(&hand)));
//! assert!((cell.get() - 3.0).abs() < 1e-5);
//!
//! cell.set(map_openness(None));
//! assert_eq!(cell.get(), 0.7);
//! ```

pub mod control;
pub mod landmark;
pub mod openness;

pub use control::ControlCell;
pub use landmark::*;
pub use openness::*;
