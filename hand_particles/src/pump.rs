//! Camera-cadence frame pump.
//!
//! Produces one [`CameraFrame`] per camera interval, asks the observer for a
//! hand, maps it to an expansion and stores it in the [`ControlCell`].  Runs
//! on its own thread until the [`StopSignal`] fires.

use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use hand_openness::{map_openness, ControlCell};
use tracing::{debug, info};

use crate::error::AppError;
use crate::observer::{CameraFrame, HandObserver};
use crate::render_loop::StopSignal;

// ════════════════════════════════════════════════════════════════════════════
// CameraConfig
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraConfig {
    pub width:  u32,
    pub height: u32,
    pub fps:    u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        CameraConfig { width: 640, height: 480, fps: 30 }
    }
}

impl CameraConfig {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps.max(1) as f64)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// FramePump
// ════════════════════════════════════════════════════════════════════════════

/// Counters reported when the pump exits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PumpStats {
    pub frames:      u64,
    pub hand_frames: u64,
}

pub struct FramePump<O: HandObserver> {
    observer: O,
    camera:   CameraConfig,
    control:  ControlCell,
    started:  Instant,
    stats:    PumpStats,
    had_hand: bool,
}

impl<O: HandObserver> FramePump<O> {
    pub fn new(observer: O, camera: CameraConfig, control: ControlCell) -> Self {
        FramePump {
            observer,
            camera,
            control,
            started:  Instant::now(),
            stats:    PumpStats::default(),
            had_hand: false,
        }
    }

    pub fn stats(&self) -> PumpStats { self.stats }
    pub fn observer(&self) -> &O { &self.observer }

    /// Process one camera frame.  Returns the expansion written.
    pub fn step(&mut self) -> f32 {
        let frame = CameraFrame {
            seq:       self.stats.frames,
            width:     self.camera.width,
            height:    self.camera.height,
            timestamp: self.started.elapsed(),
        };

        let hand = self.observer.observe(&frame);
        let expansion = map_openness(hand.as_ref());
        self.control.set(expansion);

        let has_hand = hand.is_some();
        if has_hand != self.had_hand {
            if has_hand {
                info!(frame = frame.seq, expansion, "hand acquired");
            } else {
                info!(frame = frame.seq, "hand lost");
            }
            self.had_hand = has_hand;
        }

        self.stats.frames += 1;
        if has_hand { self.stats.hand_frames += 1; }
        expansion
    }

    /// Step at the camera rate until `stop` fires.  A slow observer is not
    /// caught up: the schedule restarts from now, so late frames are skipped.
    pub fn run(mut self, stop: &StopSignal) -> PumpStats {
        let interval = self.camera.frame_interval();
        let mut next = Instant::now();
        while !stop.is_stopped() {
            self.step();
            next += interval;
            let now = Instant::now();
            if next > now {
                thread::sleep(next - now);
            } else {
                next = now;
            }
        }
        debug!(frames = self.stats.frames, "frame pump stopped");
        self.stats
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Spawn helper
// ════════════════════════════════════════════════════════════════════════════

/// Build an observer on a new thread and pump frames through it.
///
/// The observer is constructed on the pump thread itself, so hardware
/// handles never cross threads.  Construction errors are returned from the
/// join handle.
pub fn spawn_frame_pump<O, F>(
    make_observer: F,
    camera:        CameraConfig,
    control:       ControlCell,
    stop:          StopSignal,
) -> JoinHandle<Result<PumpStats, AppError>>
where
    O: HandObserver,
    F: FnOnce() -> Result<O, AppError> + Send + 'static,
{
    thread::spawn(move || {
        let observer = match make_observer() {
            Ok(o) => o,
            Err(e) => {
                // Nothing will ever update the control value; shut down.
                stop.stop();
                return Err(e);
            }
        };
        info!(width = camera.width, height = camera.height, fps = camera.fps, "frame pump started");
        Ok(FramePump::new(observer, camera, control).run(&stop))
    })
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
