//! Hand observation from LeapMotion hardware, keyboard simulation, or a
//! canned script.
//!
//! The public interface is the [`HandObserver`] trait: one camera frame in,
//! zero or one hand out.  Consumers don't need to know whether the landmarks
//! came from real hardware or the simulator.

use std::collections::VecDeque;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

use hand_openness::{Landmark, LandmarkSet, FINGER_BASES, LANDMARK_COUNT, WRIST};

// ════════════════════════════════════════════════════════════════════════════
// CameraFrame / DetectorConfig
// ════════════════════════════════════════════════════════════════════════════

/// One tick of the camera clock, handed to the observer.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraFrame {
    /// 0-based frame counter since the pump started.
    pub seq:       u64,
    pub width:     u32,
    pub height:    u32,
    /// Time since the pump started.
    pub timestamp: Duration,
}

/// Detector options.  Detections scoring below the active threshold are
/// reported as "no hand".
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectorConfig {
    pub max_num_hands:            usize,
    /// 0 = lite, 1 = full.  Passed through to detectors that support it.
    pub model_complexity:         u8,
    /// Threshold while no hand is being tracked.
    pub min_detection_confidence: f32,
    /// Threshold once a hand is being tracked.
    pub min_tracking_confidence:  f32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        DetectorConfig {
            max_num_hands:            1,
            model_complexity:         1,
            min_detection_confidence: 0.6,
            min_tracking_confidence:  0.6,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HandObserver trait — unified interface for hw, sim and tests
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can turn a camera frame into zero or one detected hand.
pub trait HandObserver {
    fn observe(&mut self, frame: &CameraFrame) -> Option<LandmarkSet>;
}

impl<O: HandObserver + ?Sized> HandObserver for Box<O> {
    fn observe(&mut self, frame: &CameraFrame) -> Option<LandmarkSet> {
        (**self).observe(frame)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HandGate — confidence thresholds and max-hands
// ════════════════════════════════════════════════════════════════════════════

/// A raw candidate from a detector, before thresholds are applied.
#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    pub landmarks: LandmarkSet,
    pub score:     f32,
}

/// Applies [`DetectorConfig`] to raw detections.
///
/// While nothing is tracked, candidates must reach `min_detection_confidence`;
/// once a hand is tracked, `min_tracking_confidence` applies until a frame
/// yields no hand.
#[derive(Clone, Debug)]
pub struct HandGate {
    config:   DetectorConfig,
    tracking: bool,
}

impl HandGate {
    pub fn new(config: DetectorConfig) -> Self {
        HandGate { config, tracking: false }
    }

    pub fn is_tracking(&self) -> bool { self.tracking }

    /// Pick the hand to report for this frame, if any.
    pub fn select(&mut self, detections: Vec<Detection>) -> Option<LandmarkSet> {
        let threshold = if self.tracking {
            self.config.min_tracking_confidence
        } else {
            self.config.min_detection_confidence
        };
        let hand = detections
            .into_iter()
            .filter(|d| d.score >= threshold)
            .take(self.config.max_num_hands)
            .next()
            .map(|d| d.landmarks);
        self.tracking = hand.is_some();
        hand
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Synthetic hand
// ════════════════════════════════════════════════════════════════════════════

/// Wrist position in normalized image coordinates.
const SIM_WRIST: (f32, f32) = (0.5, 0.75);

/// Per finger (thumb … pinky): base offset from the wrist, splay angle from
/// vertical (radians), and the three segment lengths.
const SIM_FINGERS: [((f32, f32), f32, [f32; 3]); 5] = [
    ((-0.04, -0.04),  -0.70, [0.040, 0.035, 0.030]),
    ((-0.03, -0.11),  -0.12, [0.050, 0.030, 0.025]),
    (( 0.00, -0.12),   0.00, [0.070, 0.060, 0.050]),
    (( 0.025, -0.11),  0.10, [0.050, 0.030, 0.025]),
    (( 0.05, -0.095),  0.22, [0.040, 0.025, 0.020]),
];

/// Bend at the base, middle and distal joints of a fully curled finger.
const SIM_JOINT_BENDS: [f32; 3] = [1.57, 1.60, 0.80];

/// Build a plausible right hand, palm facing the camera.
///
/// `curl` = 0.0 is a flat open hand (wrist → middle tip 0.30), 1.0 a fist
/// (≈ 0.04).  Fingers curl toward the camera, so `z` goes negative.
pub fn synthetic_hand(curl: f32) -> LandmarkSet {
    let curl = curl.clamp(0.0, 1.0);
    let mut pts = [Landmark::default(); LANDMARK_COUNT];
    let (wx, wy) = SIM_WRIST;
    pts[WRIST] = Landmark::new(wx, wy, 0.0);

    for (&base, &((ox, oy), splay, lengths)) in FINGER_BASES.iter().zip(SIM_FINGERS.iter()) {
        let (dx, dy) = (splay.sin(), -splay.cos());
        let mut p = Landmark::new(wx + ox, wy + oy, 0.0);
        pts[base] = p;

        let mut bend = 0.0_f32;
        for (k, (&len, &max_bend)) in lengths.iter().zip(SIM_JOINT_BENDS.iter()).enumerate() {
            bend += curl * max_bend;
            let planar = len * bend.cos();
            p = Landmark::new(p.x + dx * planar, p.y + dy * planar, p.z - len * bend.sin());
            pts[base + k + 1] = p;
        }
    }
    LandmarkSet::new(pts)
}

// ════════════════════════════════════════════════════════════════════════════
// SimHandObserver — keyboard simulation (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Raw input event from the simulation window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimInput {
    KeyDown(SimKey),
}

/// Simulated key codes (mapped from minifb Key).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimKey {
    ToggleHand, // Space / H
    Open,       // Up
    Close,      // Down
    Quit,       // Q / Escape
}

/// Curl change per Open/Close key event.
const SIM_CURL_STEP: f32 = 0.05;

/// Confidence reported for the synthetic hand.
const SIM_SCORE: f32 = 0.95;

/// Observer driven by [`SimInput`] events from the visualizer's window.
///
/// The hand starts out of view; `ToggleHand` brings it in fully open.
pub struct SimHandObserver {
    rx:      Receiver<SimInput>,
    gate:    HandGate,
    present: bool,
    curl:    f32,
}

impl SimHandObserver {
    pub fn new(rx: Receiver<SimInput>, config: DetectorConfig) -> Self {
        SimHandObserver { rx, gate: HandGate::new(config), present: false, curl: 0.0 }
    }

    pub fn curl(&self) -> f32 { self.curl }
    pub fn is_present(&self) -> bool { self.present }

    fn apply(&mut self, input: SimInput) {
        match input {
            SimInput::KeyDown(SimKey::ToggleHand) => self.present = !self.present,
            SimInput::KeyDown(SimKey::Open)  => self.curl = (self.curl - SIM_CURL_STEP).max(0.0),
            SimInput::KeyDown(SimKey::Close) => self.curl = (self.curl + SIM_CURL_STEP).min(1.0),
            SimInput::KeyDown(SimKey::Quit)  => {}
        }
    }
}

impl HandObserver for SimHandObserver {
    fn observe(&mut self, _frame: &CameraFrame) -> Option<LandmarkSet> {
        loop {
            match self.rx.try_recv() {
                Ok(input) => self.apply(input),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        let detections = if self.present {
            vec![Detection { landmarks: synthetic_hand(self.curl), score: SIM_SCORE }]
        } else {
            Vec::new()
        };
        self.gate.select(detections)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ScriptedObserver — canned results
// ════════════════════════════════════════════════════════════════════════════

/// Replays a fixed sequence of results, one per frame, then reports no hand.
#[derive(Clone, Debug, Default)]
pub struct ScriptedObserver {
    script: VecDeque<Option<LandmarkSet>>,
    seen:   Vec<u64>,
}

impl ScriptedObserver {
    pub fn new<I: IntoIterator<Item = Option<LandmarkSet>>>(script: I) -> Self {
        ScriptedObserver { script: script.into_iter().collect(), seen: Vec::new() }
    }

    /// Sequence numbers of every frame observed so far.
    pub fn frames_seen(&self) -> &[u64] { &self.seen }
}

impl HandObserver for ScriptedObserver {
    fn observe(&mut self, frame: &CameraFrame) -> Option<LandmarkSet> {
        self.seen.push(frame.seq);
        self.script.pop_front().flatten()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// LeapHandObserver — real hardware (feature = "leap")
// ════════════════════════════════════════════════════════════════════════════

/// Observer backed by a real LeapMotion controller.
///
/// Requires the `leap` feature flag and the LeapC shared library installed.
///
/// Leap reports joints in millimetres above the device.  They are mapped into
/// the normalized image convention so the openness constants still apply:
/// x and z are divided by [`LEAP_SPAN_MM`], y is flipped and centred on
/// [`LEAP_CENTER_Y_MM`].  A relaxed open hand (≈ 190 mm wrist → middle tip)
/// lands near the top of the openness range.
#[cfg(feature = "leap")]
pub struct LeapHandObserver {
    connection: leaprs::Connection,
    gate:       HandGate,
    /// Last result, repeated while LeapC delivers non-tracking events.
    last:       Option<LandmarkSet>,
}

#[cfg(feature = "leap")]
pub const LEAP_SPAN_MM: f32 = 600.0;
#[cfg(feature = "leap")]
pub const LEAP_CENTER_Y_MM: f32 = 200.0;

#[cfg(feature = "leap")]
const LEAP_POLL_MS: u32 = 10;

#[cfg(feature = "leap")]
impl LeapHandObserver {
    pub fn open(config: DetectorConfig) -> Result<Self, crate::error::AppError> {
        use crate::error::AppError;
        use leaprs::*;

        let mut connection = Connection::create(ConnectionConfig::default())
            .map_err(|e| AppError::Detector(format!("LeapC connection: {:?}", e)))?;
        connection
            .open()
            .map_err(|e| AppError::Detector(format!("LeapMotion device: {:?}", e)))?;

        Ok(LeapHandObserver { connection, gate: HandGate::new(config), last: None })
    }
}

#[cfg(feature = "leap")]
impl HandObserver for LeapHandObserver {
    fn observe(&mut self, _frame: &CameraFrame) -> Option<LandmarkSet> {
        use leaprs::*;

        let msg = match self.connection.poll(LEAP_POLL_MS) {
            Ok(m)  => m,
            Err(_) => return self.last.clone(),
        };

        if let Event::Tracking(frame) = msg.event() {
            // LeapC only reports hands it is tracking; treat them as certain.
            let detections: Vec<Detection> = frame
                .hands()
                .filter_map(|h| leap_landmarks(&h))
                .map(|landmarks| Detection { landmarks, score: 1.0 })
                .collect();
            self.last = self.gate.select(detections);
        }
        self.last.clone()
    }
}

#[cfg(feature = "leap")]
fn leap_landmarks(hand: &leaprs::Hand) -> Option<LandmarkSet> {
    let norm = |x: f32, y: f32, z: f32| Landmark::new(
        0.5 + x / LEAP_SPAN_MM,
        0.5 - (y - LEAP_CENTER_Y_MM) / LEAP_SPAN_MM,
        z / LEAP_SPAN_MM,
    );

    let digits: Vec<_> = hand.digits().collect();
    if digits.len() < 5 { return None; }

    let mut pts = [Landmark::default(); LANDMARK_COUNT];
    // Base of the middle metacarpal sits on the wrist crease.
    let w = digits[2].metacarpal().prev_joint();
    pts[WRIST] = norm(w.x, w.y, w.z);

    for (digit, &base) in digits.iter().zip(FINGER_BASES.iter()) {
        let joints = [
            digit.proximal().prev_joint(),
            digit.intermediate().prev_joint(),
            digit.distal().prev_joint(),
            digit.distal().next_joint(),
        ];
        for (k, j) in joints.iter().enumerate() {
            pts[base + k] = norm(j.x, j.y, j.z);
        }
    }
    Some(LandmarkSet::new(pts))
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
