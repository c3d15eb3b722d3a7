//! White noise generator implementation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{Frame, Streamer};

/// A stereo white noise generator.
///
/// Every channel of every frame is an independent draw of
/// `amplitude * (U[0, 1) * 2 - 1)`, so the channels are uncorrelated.
/// The generator never ends on its own; wrap it with
/// [`bounded`](crate::StreamerExt::bounded) to give it a length.
pub struct WhiteNoise<R: Rng = StdRng> {
    /// Peak amplitude
    amplitude: f64,
    /// Random number generator
    rng: R,
    /// Frames emitted so far
    position: usize,
}

impl WhiteNoise<StdRng> {
    /// Creates a white noise generator seeded from system entropy.
    ///
    /// `StdRng` is `Send`, so the generator can live inside a
    /// [`Queue`](crate::Queue) that moves into an audio callback.
    ///
    /// # Examples
    ///
    /// ```
    /// use tonequeue::{Streamer, WhiteNoise};
    ///
    /// let mut noise = WhiteNoise::new(0.5);
    /// let mut buffer = [[0.0; 2]; 64];
    /// assert_eq!(noise.stream(&mut buffer), (64, true));
    /// ```
    pub fn new(amplitude: f64) -> Self {
        Self::with_rng(amplitude, StdRng::from_entropy())
    }
}

impl<R: Rng> WhiteNoise<R> {
    /// Creates a white noise generator with a custom RNG.
    ///
    /// # Examples
    ///
    /// ```
    /// use rand::SeedableRng;
    /// use tonequeue::WhiteNoise;
    ///
    /// let rng = rand::rngs::StdRng::seed_from_u64(42);
    /// let noise = WhiteNoise::with_rng(0.5, rng);
    /// ```
    pub fn with_rng(amplitude: f64, rng: R) -> Self {
        Self {
            amplitude,
            rng,
            position: 0,
        }
    }

    fn draw(&mut self) -> f64 {
        self.amplitude * (self.rng.gen_range(0.0..1.0) * 2.0 - 1.0)
    }
}

impl<R: Rng> Streamer for WhiteNoise<R> {
    fn stream(&mut self, buffer: &mut [Frame]) -> (usize, bool) {
        for frame in buffer.iter_mut() {
            *frame = [self.draw(), self.draw()];
        }
        self.position += buffer.len();
        (buffer.len(), true)
    }

    fn position(&self) -> usize {
        self.position
    }
}
