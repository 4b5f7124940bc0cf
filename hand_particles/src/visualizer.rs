//! Window front end using `minifb`.
//!
//! Presents the scene's pixel buffer, reports the live window size so the
//! render loop can follow resizes, and turns key presses into [`SimInput`]
//! events for the simulated hand.
//!
//! | Key | Action |
//! |---|---|
//! | `Space` / `H` | Show / hide the hand |
//! | `Up` (hold) | Open the hand |
//! | `Down` (hold) | Close the hand |
//! | `Q` / `Escape` | Quit |

use std::sync::mpsc::Sender;
use std::time::Duration;

use minifb::{Key, KeyRepeat, ScaleMode, Window, WindowOptions};

use crate::error::AppError;
use crate::observer::{SimInput, SimKey};
use crate::render_loop::Surface;

pub const WINDOW_TITLE: &str = "Hand Particles";
pub const DEFAULT_WIN_W: usize = 1024;
pub const DEFAULT_WIN_H: usize = 768;

pub struct Visualizer {
    window: Window,
    sim_tx: Sender<SimInput>,
}

impl Visualizer {
    pub fn new(width: usize, height: usize, sim_tx: Sender<SimInput>) -> Result<Self, AppError> {
        let mut window = Window::new(
            WINDOW_TITLE,
            width, height,
            WindowOptions {
                resize: true,
                scale_mode: ScaleMode::UpperLeft,
                ..WindowOptions::default()
            },
        )?;

        window.limit_update_rate(Some(Duration::from_millis(16))); // ~60fps

        Ok(Visualizer { window, sim_tx })
    }

    fn send(&self, key: SimKey) {
        // The observer may already be gone (hardware mode); nothing to do then.
        let _ = self.sim_tx.send(SimInput::KeyDown(key));
    }
}

impl Surface for Visualizer {
    fn poll(&mut self) -> bool {
        if !self.window.is_open() { return false; }

        // Keys that trigger on first press only
        let one_shot = |k: Key| self.window.is_key_pressed(k, KeyRepeat::No);
        // Keys that repeat while held
        let held     = |k: Key| self.window.is_key_pressed(k, KeyRepeat::Yes);

        if one_shot(Key::Q) || one_shot(Key::Escape) {
            self.send(SimKey::Quit);
            return false;
        }
        if one_shot(Key::Space) || one_shot(Key::H) {
            self.send(SimKey::ToggleHand);
        }
        if held(Key::Up) {
            self.send(SimKey::Open);
        }
        if held(Key::Down) {
            self.send(SimKey::Close);
        }
        true
    }

    fn size(&self) -> (usize, usize) { self.window.get_size() }

    fn present(&mut self, buf: &[u32], width: usize, height: usize) -> Result<(), AppError> {
        self.window.update_with_buffer(buf, width, height)?;
        Ok(())
    }
}
