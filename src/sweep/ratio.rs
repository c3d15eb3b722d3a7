//! Lock-free ratio cell shared between a sweep task and the render path.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// A resample ratio readable from any thread.
///
/// The value is stored as the bit pattern of an `f64` in an `AtomicU64`, so a
/// reader never observes a torn value. Only the owning sweep task writes it;
/// the render path may lag by at most one tick, which is inaudible.
#[derive(Debug, Clone)]
pub struct SharedRatio(Arc<AtomicU64>);

impl SharedRatio {
    /// Creates a cell holding `ratio`.
    pub fn new(ratio: f64) -> Self {
        Self(Arc::new(AtomicU64::new(ratio.to_bits())))
    }

    /// Current ratio.
    pub fn load(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Acquire))
    }

    pub(crate) fn store(&self, ratio: f64) {
        self.0.store(ratio.to_bits(), Ordering::Release);
    }
}
