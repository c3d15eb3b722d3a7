//! Endless silence.

use crate::{Frame, Streamer};

/// Emits `[0.0, 0.0]` forever.
///
/// Used for rests; give it a length with
/// [`bounded`](crate::StreamerExt::bounded).
#[derive(Debug, Clone, Default)]
pub struct Silence {
    position: usize,
}

impl Silence {
    /// Creates a silence source.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Streamer for Silence {
    fn stream(&mut self, buffer: &mut [Frame]) -> (usize, bool) {
        buffer.fill([0.0, 0.0]);
        self.position += buffer.len();
        (buffer.len(), true)
    }

    fn position(&self) -> usize {
        self.position
    }
}
