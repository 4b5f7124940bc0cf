//! # hand_particles
//!
//! A sphere of 3000 points that breathes with your hand: open the hand and
//! the cloud expands up to 3×, close it and the cloud shrinks to ½×, take the
//! hand away and it settles at 0.7×.  The cloud spins slowly about its
//! vertical axis the whole time.
//!
//! ## Pipeline
//!
//! ```text
//! camera frame ─▶ HandObserver ─▶ Option<LandmarkSet> ─▶ map_openness ─▶ ControlCell
//!                 (pump thread)                                            │
//!                                                                          ▼
//!                              window ◀─ Scene::render ◀─ RenderLoop::step (main thread)
//! ```
//!
//! ## Feature flags
//!
//! * (default) — **Simulation mode**: keyboard shortcuts drive a synthetic hand.
//! * `leap` — **Hardware mode**: polls a real LeapMotion controller via LeapC.
//!
//! ### Simulation keyboard shortcuts
//!
//! | Key | Action |
//! |---|---|
//! | `Space` / `H` | Show / hide the hand |
//! | `Up` (hold) | Open the hand |
//! | `Down` (hold) | Close the hand |
//! | `Q` / `Escape` | Quit |

pub mod error;
pub mod observer;
pub mod scene;
pub mod render_loop;
pub mod pump;
pub mod visualizer;
pub mod app;

pub use error::AppError;
