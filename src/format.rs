//! Sample-rate bookkeeping shared by every component.

use std::time::Duration;

use crate::Error;

/// Audio format shared by a pipeline.
///
/// All duration ↔ sample-count conversions go through this type so that
/// every component rounds the same way: half-way values round to the nearest
/// even count (`5512.5 → 5512`, `5513.5 → 5514`).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use tonequeue::Format;
///
/// let format = Format::new(44100).unwrap();
/// assert_eq!(format.samples(Duration::from_millis(125)), 5512);
/// assert_eq!(format.samples_for_secs(1.0), 44100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Format {
    sample_rate: u32,
}

impl Format {
    /// CD-quality 44.1 kHz.
    pub const CD: Format = Format {
        sample_rate: 44_100,
    };

    /// Creates a format, rejecting a zero sample rate.
    pub fn new(sample_rate: u32) -> Result<Self, Error> {
        if sample_rate == 0 {
            return Err(Error::InvalidSampleRate);
        }
        Ok(Self { sample_rate })
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of frames covering `duration`.
    pub fn samples(&self, duration: Duration) -> usize {
        self.samples_for_secs(duration.as_secs_f64())
    }

    /// Number of frames covering `secs` seconds. Negative or NaN input yields 0.
    pub fn samples_for_secs(&self, secs: f64) -> usize {
        let exact = secs * self.sample_rate as f64;
        if exact.is_nan() || exact <= 0.0 {
            return 0;
        }
        exact.round_ties_even() as usize
    }

    /// Playback time of `samples` frames.
    pub fn duration(&self, samples: usize) -> Duration {
        Duration::from_secs_f64(samples as f64 / self.sample_rate as f64)
    }
}

impl Default for Format {
    fn default() -> Self {
        Format::CD
    }
}
