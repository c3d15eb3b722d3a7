//! Periodic tone generator with a fixed length.

use std::f64::consts::TAU;
use std::time::Duration;

use crate::{Format, Frame, Streamer};

/// Periodic waveform shapes a [`Tone`] can render.
///
/// Each shape maps an angle `x` (radians) to a value in `[-1.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shape {
    /// `sin(x)`
    #[default]
    Sine,
    /// `sign(sin(x))`, with `sign(0) == 0`
    Square,
    /// `2 * (x/2π - floor(x/2π + 0.5))`
    Sawtooth,
}

impl Shape {
    /// Evaluates the shape at angle `x`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tonequeue::Shape;
    ///
    /// assert_eq!(Shape::Sine.eval(0.0), 0.0);
    /// assert_eq!(Shape::Square.eval(1.0), 1.0);
    /// assert_eq!(Shape::Sawtooth.eval(std::f64::consts::PI / 2.0), 0.5);
    /// ```
    pub fn eval(self, x: f64) -> f64 {
        match self {
            Shape::Sine => x.sin(),
            Shape::Square => {
                let s = x.sin();
                if s > 0.0 {
                    1.0
                } else if s < 0.0 {
                    -1.0
                } else {
                    0.0
                }
            }
            Shape::Sawtooth => {
                let cycles = x / TAU;
                2.0 * (cycles - (cycles + 0.5).floor())
            }
        }
    }
}

/// A sine, square or sawtooth tone that ends after a fixed number of frames.
///
/// The sample for frame `n` is `amplitude * shape(2π · frequency · n / sample_rate)`,
/// written identically to both channels. Time is derived from the frame
/// position rather than an accumulated phase, so long tones do not drift.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use tonequeue::{Format, Shape, Streamer, Tone};
///
/// let mut tone = Tone::new(Shape::Sine, 440.0, Format::CD, Duration::from_millis(10));
/// assert_eq!(tone.total_len(), Some(441));
///
/// let mut buffer = [[0.0; 2]; 512];
/// assert_eq!(tone.stream(&mut buffer), (441, true));
/// assert_eq!(tone.stream(&mut buffer), (0, false));
/// ```
#[derive(Debug, Clone)]
pub struct Tone {
    shape: Shape,
    frequency: f64,
    amplitude: f64,
    sample_rate: f64,
    position: usize,
    total: usize,
}

impl Tone {
    /// Creates a tone lasting `duration`, rounded to whole frames by `format`.
    pub fn new(shape: Shape, frequency: f64, format: Format, duration: Duration) -> Self {
        Self::with_len(shape, frequency, format, format.samples(duration))
    }

    /// Creates a tone lasting exactly `total` frames.
    pub fn with_len(shape: Shape, frequency: f64, format: Format, total: usize) -> Self {
        Self {
            shape,
            frequency,
            amplitude: 1.0,
            sample_rate: format.sample_rate() as f64,
            position: 0,
            total,
        }
    }

    /// Sets the peak amplitude (default `1.0`).
    pub fn amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Frequency in Hz.
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Waveform shape.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    fn sample_at(&self, position: usize) -> f64 {
        let t = position as f64 / self.sample_rate;
        self.amplitude * self.shape.eval(TAU * self.frequency * t)
    }
}

impl Streamer for Tone {
    fn stream(&mut self, buffer: &mut [Frame]) -> (usize, bool) {
        if self.position >= self.total {
            return (0, false);
        }

        let n = buffer.len().min(self.total - self.position);
        for frame in &mut buffer[..n] {
            let value = self.sample_at(self.position);
            *frame = [value, value];
            self.position += 1;
        }
        (n, true)
    }

    fn position(&self) -> usize {
        self.position
    }

    fn total_len(&self) -> Option<usize> {
        Some(self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::streamer::testing::collect;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_exact_length_across_calls() {
        for (len, chunk) in [(5512, 512), (100, 7), (1, 1), (64, 64)] {
            let mut tone = Tone::with_len(Shape::Square, 220.0, Format::CD, len);
            let mut total = 0;
            let mut buffer = vec![[0.0; 2]; chunk];
            loop {
                let (n, more) = tone.stream(&mut buffer);
                total += n;
                if !more {
                    break;
                }
            }
            assert_eq!(total, len);
            assert_eq!(tone.position(), len);
        }
    }

    #[test]
    fn test_stays_drained() {
        let mut tone = Tone::with_len(Shape::Sine, 440.0, Format::CD, 10);
        let mut buffer = [[0.0; 2]; 16];
        assert_eq!(tone.stream(&mut buffer), (10, true));
        for _ in 0..3 {
            assert_eq!(tone.stream(&mut buffer), (0, false));
        }
    }

    #[test]
    fn test_zero_length_tone() {
        let mut tone = Tone::with_len(Shape::Sine, 440.0, Format::CD, 0);
        let mut buffer = [[0.0; 2]; 4];
        assert_eq!(tone.stream(&mut buffer), (0, false));
    }

    #[test]
    fn test_sine_starts_at_zero() {
        let mut tone = Tone::with_len(Shape::Sine, 440.0, Format::CD, 4);
        let mut buffer = [[1.0; 2]; 1];
        tone.stream(&mut buffer);
        assert!(buffer[0][0].abs() < EPSILON);
        assert!(buffer[0][1].abs() < EPSILON);
    }

    #[test]
    fn test_sine_matches_formula() {
        let mut tone = Tone::with_len(Shape::Sine, 440.0, Format::CD, 256).amplitude(0.5);
        let frames = collect(&mut tone, 256, 100);
        for (i, frame) in frames.iter().enumerate() {
            let expected = 0.5 * (TAU * 440.0 * i as f64 / 44100.0).sin();
            assert!((frame[0] - expected).abs() < EPSILON);
            assert_eq!(frame[0], frame[1]);
        }
    }

    #[test]
    fn test_amplitude_never_exceeded() {
        for shape in [Shape::Sine, Shape::Square, Shape::Sawtooth] {
            let mut tone = Tone::with_len(shape, 1234.5, Format::CD, 44100).amplitude(0.3);
            for frame in collect(&mut tone, 44100, 1024) {
                assert!(frame[0].abs() <= 0.3 + EPSILON, "{shape:?} exceeded amplitude");
            }
        }
    }

    #[test]
    fn test_square_levels() {
        assert_eq!(Shape::Square.eval(0.0), 0.0);
        assert_eq!(Shape::Square.eval(0.5), 1.0);
        assert_eq!(Shape::Square.eval(TAU * 0.75), -1.0);
    }

    #[test]
    fn test_sawtooth_ramp() {
        assert!((Shape::Sawtooth.eval(0.0)).abs() < EPSILON);
        assert!((Shape::Sawtooth.eval(TAU * 0.25) - 0.5).abs() < EPSILON);
        // Jumps from +1 to -1 at half a cycle
        assert!((Shape::Sawtooth.eval(TAU * 0.499) - 0.998).abs() < 1e-6);
        assert!((Shape::Sawtooth.eval(TAU * 0.5) + 1.0).abs() < EPSILON);
        assert!((Shape::Sawtooth.eval(TAU * 0.75) + 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_duration_constructor_rounds() {
        let tone = Tone::new(Shape::Sine, 440.0, Format::CD, Duration::from_millis(125));
        assert_eq!(tone.total_len(), Some(5512));
    }
}
