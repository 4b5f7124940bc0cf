//! Shared control value: one writer (the frame pump), one reader (the render
//! loop), latest value wins.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Default expansion before the first observation arrives.
pub const DEFAULT_EXPANSION: f32 = 1.0;

/// Lock-free `f32` cell. Clones share the same value.
#[derive(Clone, Debug)]
pub struct ControlCell {
    bits: Arc<AtomicU32>,
}

impl ControlCell {
    pub fn new(initial: f32) -> Self {
        let initial = if initial.is_finite() { initial } else { DEFAULT_EXPANSION };
        ControlCell { bits: Arc::new(AtomicU32::new(initial.to_bits())) }
    }

    pub fn get(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Relaxed))
    }

    /// Store `value`. Non-finite values are dropped and `false` is returned;
    /// the cell keeps its last finite value.
    pub fn set(&self, value: f32) -> bool {
        if !value.is_finite() {
            return false;
        }
        self.bits.store(value.to_bits(), Ordering::Relaxed);
        true
    }
}

impl Default for ControlCell {
    fn default() -> Self { ControlCell::new(DEFAULT_EXPANSION) }
}
