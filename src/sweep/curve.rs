//! Interpolation curves for rate sweeps.
//!
//! A curve maps sweep progress in `[0, 1]` to a resample ratio between the
//! sweep's start and end values.

use std::f64::consts::E;

/// Shape of a rate sweep over its duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SweepCurve {
    /// `start + (end - start) * p`
    #[default]
    Linear,

    /// `end^p`. Always starts from a ratio of 1.0.
    Exponential,

    /// `1 + (end - 1) * ln(1 + p(e - 1))`. Always starts from a ratio of 1.0;
    /// moves fast at first and settles towards `end`.
    Logarithmic,
}

impl SweepCurve {
    /// Whether this curve honours a custom start ratio.
    ///
    /// Exponential and logarithmic sweeps are anchored at 1.0.
    pub fn has_start(&self) -> bool {
        matches!(self, SweepCurve::Linear)
    }

    /// Ratio at `progress`, clamped to `[0, 1]`.
    ///
    /// At full progress the result is exactly `end`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tonequeue::SweepCurve;
    ///
    /// assert_eq!(SweepCurve::Linear.ratio(1.0, 2.0, 0.5), 1.5);
    /// assert!((SweepCurve::Exponential.ratio(1.0, 4.0, 0.5) - 2.0).abs() < 1e-12);
    /// assert_eq!(SweepCurve::Logarithmic.ratio(1.0, 3.0, 1.0), 3.0);
    /// ```
    pub fn ratio(&self, start: f64, end: f64, progress: f64) -> f64 {
        let p = progress.clamp(0.0, 1.0);
        if p >= 1.0 {
            return end;
        }
        match self {
            SweepCurve::Linear => start + (end - start) * p,
            SweepCurve::Exponential => end.powf(p),
            SweepCurve::Logarithmic => 1.0 + (end - 1.0) * (1.0 + p * (E - 1.0)).ln(),
        }
    }
}
