//! Streamer combinators for bounding, scaling and observing audio streams.
//!
//! Every combinator here wraps another [`Streamer`] and is itself a
//! `Streamer`, so they can be stacked freely. The [`StreamerExt`] trait
//! provides the fluent way to build them.

use crate::sweep::{RateSweep, Resampler, Sweep};
use crate::{Error, Frame, Streamer};

/// Truncates a streamer to a fixed number of frames (a bounded source).
///
/// Once `limit` frames have been emitted the wrapper reports exhaustion,
/// whether or not the inner streamer still has data. If the inner streamer
/// ends first, that exhaustion is passed through unchanged.
///
/// # Examples
///
/// ```
/// use tonequeue::{Silence, Streamer, StreamerExt};
///
/// let mut rest = Silence::new().bounded(3);
/// let mut buffer = [[1.0; 2]; 8];
/// assert_eq!(rest.stream(&mut buffer), (3, true));
/// assert_eq!(rest.stream(&mut buffer), (0, false));
/// ```
pub struct Bounded<S: Streamer> {
    source: S,
    limit: usize,
    position: usize,
}

impl<S: Streamer> Bounded<S> {
    /// Wraps `source`, allowing at most `limit` frames through.
    pub fn new(source: S, limit: usize) -> Self {
        Self {
            source,
            limit,
            position: 0,
        }
    }

    /// Frames still allowed through.
    pub fn remaining(&self) -> usize {
        self.limit - self.position
    }

    /// Returns the wrapped streamer.
    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<S: Streamer> Streamer for Bounded<S> {
    fn stream(&mut self, buffer: &mut [Frame]) -> (usize, bool) {
        if self.position >= self.limit {
            return (0, false);
        }

        let want = buffer.len().min(self.remaining());
        let (n, more) = self.source.stream(&mut buffer[..want]);
        self.position += n;
        (n, more)
    }

    fn position(&self) -> usize {
        self.position
    }

    fn total_len(&self) -> Option<usize> {
        match self.source.total_len() {
            Some(inner) => Some(inner.min(self.limit)),
            None => Some(self.limit),
        }
    }
}

/// Scales a streamer exponentially: every sample is multiplied by `base^volume`.
///
/// With the default base of 2, `volume = 0` leaves the signal untouched,
/// `-1` halves it and `1` doubles it. This is not a linear volume knob.
///
/// # Examples
///
/// ```
/// use tonequeue::{Shape, Streamer, StreamerExt, Tone, Format};
///
/// let mut quieter = Tone::with_len(Shape::Square, 1.0, Format::CD, 10).volume(-1.0);
/// let mut buffer = [[0.0; 2]; 2];
/// quieter.stream(&mut buffer);
/// assert_eq!(buffer[1], [0.5, 0.5]);
/// ```
pub struct Volume<S: Streamer> {
    pub source: S,
    pub base: f64,
    pub volume: f64,
    pub silent: bool,
}

impl<S: Streamer> Volume<S> {
    /// Wraps `source` with base 2 and the given volume exponent.
    pub fn new(source: S, volume: f64) -> Self {
        Self {
            source,
            base: 2.0,
            volume,
            silent: false,
        }
    }

    /// The multiplier currently applied to each sample.
    pub fn gain(&self) -> f64 {
        if self.silent {
            0.0
        } else {
            self.base.powf(self.volume)
        }
    }
}

impl<S: Streamer> Streamer for Volume<S> {
    fn stream(&mut self, buffer: &mut [Frame]) -> (usize, bool) {
        let (n, more) = self.source.stream(buffer);
        let gain = self.gain();
        for frame in &mut buffer[..n] {
            frame[0] *= gain;
            frame[1] *= gain;
        }
        (n, more)
    }

    fn position(&self) -> usize {
        self.source.position()
    }

    fn total_len(&self) -> Option<usize> {
        self.source.total_len()
    }
}

/// Fires a callback exactly once, when the inner streamer first reports
/// `more == false`.
///
/// Placed around a bounded pipeline this is the completion signal a caller
/// waits on to learn that playback has ended.
///
/// # Examples
///
/// ```
/// use std::sync::mpsc;
/// use tonequeue::{Silence, Streamer, StreamerExt};
///
/// let (done_tx, done_rx) = mpsc::channel();
/// let mut stream = Silence::new().bounded(4).on_complete(move || {
///     let _ = done_tx.send(());
/// });
///
/// let mut buffer = [[0.0; 2]; 8];
/// stream.stream(&mut buffer);
/// stream.stream(&mut buffer);
/// assert!(done_rx.try_recv().is_ok());
/// ```
pub struct OnComplete<S: Streamer, F: FnOnce()> {
    source: S,
    callback: Option<F>,
}

impl<S: Streamer, F: FnOnce()> OnComplete<S, F> {
    /// Wraps `source`, running `callback` once it is drained.
    pub fn new(source: S, callback: F) -> Self {
        Self {
            source,
            callback: Some(callback),
        }
    }

    /// Whether the callback has already fired.
    pub fn is_complete(&self) -> bool {
        self.callback.is_none()
    }
}

impl<S: Streamer, F: FnOnce()> Streamer for OnComplete<S, F> {
    fn stream(&mut self, buffer: &mut [Frame]) -> (usize, bool) {
        let (n, more) = self.source.stream(buffer);
        if !more && let Some(callback) = self.callback.take() {
            callback();
        }
        (n, more)
    }

    fn position(&self) -> usize {
        self.source.position()
    }

    fn total_len(&self) -> Option<usize> {
        self.source.total_len()
    }
}

/// Extension trait providing combinator methods on any [`Streamer`].
///
/// # Examples
///
/// ```
/// use tonequeue::{StreamerExt, WhiteNoise};
///
/// // A quarter second of quiet noise at 44.1 kHz
/// let hat = WhiteNoise::new(0.5).volume(-2.0).bounded(11025);
/// ```
pub trait StreamerExt: Streamer + Sized {
    /// Truncates this streamer to `limit` frames.
    fn bounded(self, limit: usize) -> Bounded<Self> {
        Bounded::new(self, limit)
    }

    /// Scales this streamer by `2^volume`.
    fn volume(self, volume: f64) -> Volume<Self> {
        Volume::new(self, volume)
    }

    /// Runs `callback` once this streamer is drained.
    fn on_complete<F: FnOnce()>(self, callback: F) -> OnComplete<Self, F> {
        OnComplete::new(self, callback)
    }

    /// Plays this streamer back at a fixed speed ratio.
    fn resample(self, ratio: f64) -> Resampler<Self> {
        Resampler::new(self, ratio)
    }

    /// Plays this streamer back with a speed ratio swept over time by a
    /// background task.
    fn rate_sweep(self, sweep: Sweep) -> Result<RateSweep<Self>, Error> {
        RateSweep::new(self, sweep)
    }

    /// Boxes this streamer for use in heterogeneous collections.
    fn boxed(self) -> Box<dyn Streamer + Send>
    where
        Self: Send + 'static,
    {
        Box::new(self)
    }
}

// Blanket implementation for all Streamer types
impl<T: Streamer> StreamerExt for T {}
