//! Time-varying playback rate.
//!
//! A [`RateSweep`] wraps a streamer in a [`Resampler`] and starts a background
//! task that moves the resample ratio along a [`SweepCurve`] for a fixed
//! duration. The ratio lives in a [`SharedRatio`] cell: the task writes it
//! every tick, the render path reads it every frame.

mod controller;
mod curve;
mod ratio;
mod resampler;

pub use controller::RateSweep;
pub use curve::SweepCurve;
pub use ratio::SharedRatio;
pub use resampler::Resampler;

use std::time::Duration;

use crate::Error;

/// Largest playback ratio a resampler will follow. Ratios above it are
/// treated like invalid ones and hold the current frame.
pub const MAX_RATIO: f64 = 256.0;

/// Whether `ratio` is one a resampler can play.
pub(crate) fn is_playable(ratio: f64) -> bool {
    ratio > 0.0 && ratio <= MAX_RATIO
}

/// Parameters of a rate sweep.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use tonequeue::Sweep;
///
/// let sweep = Sweep::linear(1.0, 2.0, Duration::from_secs(1));
/// assert_eq!(sweep.ratio_at(Duration::ZERO), 1.0);
/// assert_eq!(sweep.ratio_at(Duration::from_millis(500)), 1.5);
/// assert_eq!(sweep.ratio_at(Duration::from_secs(3)), 2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sweep {
    /// Ratio at the start (only used by [`SweepCurve::Linear`])
    pub start: f64,
    /// Ratio once the sweep has finished
    pub end: f64,
    /// How long the sweep takes
    pub duration: Duration,
    pub curve: SweepCurve,
    /// Interval between ratio updates
    pub tick: Duration,
}

impl Sweep {
    /// Default update interval of the background task.
    pub const DEFAULT_TICK: Duration = Duration::from_millis(10);

    /// Creates a sweep with the default tick.
    pub fn new(start: f64, end: f64, duration: Duration, curve: SweepCurve) -> Self {
        Self {
            start,
            end,
            duration,
            curve,
            tick: Self::DEFAULT_TICK,
        }
    }

    /// Linear sweep from `start` to `end`.
    pub fn linear(start: f64, end: f64, duration: Duration) -> Self {
        Self::new(start, end, duration, SweepCurve::Linear)
    }

    /// Exponential sweep from 1.0 to `end`.
    pub fn exponential(end: f64, duration: Duration) -> Self {
        Self::new(1.0, end, duration, SweepCurve::Exponential)
    }

    /// Logarithmic sweep from 1.0 to `end`.
    pub fn logarithmic(end: f64, duration: Duration) -> Self {
        Self::new(1.0, end, duration, SweepCurve::Logarithmic)
    }

    /// Overrides the update interval.
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    /// Progress in `[0, 1]` after `elapsed`.
    pub fn progress(&self, elapsed: Duration) -> f64 {
        if elapsed >= self.duration {
            return 1.0;
        }
        elapsed.as_secs_f64() / self.duration.as_secs_f64()
    }

    /// Ratio after `elapsed`. Pinned at `end` once the duration has passed.
    pub fn ratio_at(&self, elapsed: Duration) -> f64 {
        self.curve
            .ratio(self.start, self.end, self.progress(elapsed))
    }

    /// Checks that the sweep can only produce positive ratios no larger than
    /// [`MAX_RATIO`].
    pub fn validate(&self) -> Result<(), Error> {
        if !is_playable(self.start) || !is_playable(self.end) {
            return Err(Error::InvalidSweep(format!(
                "ratios must be in (0, {MAX_RATIO}], got {} -> {}",
                self.start, self.end
            )));
        }
        if !self.curve.has_start() && self.start != 1.0 {
            return Err(Error::InvalidSweep(format!(
                "{:?} sweeps start at 1.0, got {}",
                self.curve, self.start
            )));
        }
        if self.duration.is_zero() {
            return Err(Error::InvalidSweep("duration must be non-zero".into()));
        }
        if self.tick.is_zero() {
            return Err(Error::InvalidSweep("tick must be non-zero".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_sweep_samples() {
        let sweep = Sweep::linear(1.0, 2.0, Duration::from_secs(1));
        assert_eq!(sweep.ratio_at(Duration::ZERO), 1.0);
        assert!((sweep.ratio_at(Duration::from_millis(500)) - 1.5).abs() < 1e-12);
        assert_eq!(sweep.ratio_at(Duration::from_secs(1)), 2.0);
        assert_eq!(sweep.ratio_at(Duration::from_secs(10)), 2.0);
    }

    #[test]
    fn test_progress_clamps() {
        let sweep = Sweep::exponential(2.0, Duration::from_millis(200));
        assert_eq!(sweep.progress(Duration::ZERO), 0.0);
        assert_eq!(sweep.progress(Duration::from_millis(100)), 0.5);
        assert_eq!(sweep.progress(Duration::from_millis(300)), 1.0);
    }

    #[test]
    fn test_default_tick() {
        let sweep = Sweep::logarithmic(3.0, Duration::from_secs(1));
        assert_eq!(sweep.tick, Duration::from_millis(10));
        let sweep = sweep.with_tick(Duration::from_millis(1));
        assert_eq!(sweep.tick, Duration::from_millis(1));
    }

    #[test]
    fn test_validate() {
        let second = Duration::from_secs(1);
        assert!(Sweep::linear(1.0, 2.0, second).validate().is_ok());
        assert!(Sweep::linear(0.0, 2.0, second).validate().is_err());
        assert!(Sweep::linear(1.0, f64::INFINITY, second).validate().is_err());
        assert!(Sweep::linear(1.0, MAX_RATIO, second).validate().is_ok());
        assert!(Sweep::linear(1e17, 1.0, second).validate().is_err());
        assert!(Sweep::exponential(MAX_RATIO * 2.0, second).validate().is_err());
        assert!(Sweep::linear(1.0, 2.0, Duration::ZERO).validate().is_err());
        assert!(
            Sweep::linear(1.0, 2.0, second)
                .with_tick(Duration::ZERO)
                .validate()
                .is_err()
        );
        let shifted = Sweep::new(2.0, 4.0, second, SweepCurve::Exponential);
        assert!(matches!(shifted.validate(), Err(Error::InvalidSweep(_))));
    }
}
