//! Variable-ratio resampler.

use super::{SharedRatio, is_playable};
use crate::{Frame, Streamer};

/// Frames pulled from the inner streamer per refill.
const INPUT_CHUNK: usize = 512;

/// Plays a streamer back at a speed given by a (possibly changing) ratio.
///
/// A ratio above 1 consumes the inner streamer faster than it emits frames
/// (higher pitch, shorter), below 1 slower. Output frames are linearly
/// interpolated between neighbouring input frames. The ratio is re-read for
/// every output frame, so a sweep task can change it while audio is
/// rendering.
///
/// The input scratch buffer is allocated once, at construction.
///
/// # Examples
///
/// ```
/// use tonequeue::{Silence, Streamer, StreamerExt};
///
/// // Twice as fast: 100 frames of input become 50 frames of output
/// let mut fast = Silence::new().bounded(100).resample(2.0);
/// let mut buffer = [[0.0; 2]; 128];
/// assert_eq!(fast.stream(&mut buffer), (50, false));
/// ```
pub struct Resampler<S: Streamer> {
    source: S,
    ratio: SharedRatio,
    input: Vec<Frame>,
    input_pos: usize,
    input_len: usize,
    source_done: bool,
    primed: bool,
    /// Input frame at the integer part of the read position
    current: Option<Frame>,
    /// The input frame after `current`
    next: Option<Frame>,
    /// Fractional read position between `current` and `next`
    frac: f64,
    position: usize,
}

impl<S: Streamer> Resampler<S> {
    /// Creates a resampler with a fixed ratio.
    ///
    /// Ratios that are not positive, not finite, or above
    /// [`MAX_RATIO`](super::MAX_RATIO) stall playback at the current frame.
    pub fn new(source: S, ratio: f64) -> Self {
        Self::with_ratio(source, SharedRatio::new(ratio))
    }

    pub(crate) fn with_ratio(source: S, ratio: SharedRatio) -> Self {
        Self {
            source,
            ratio,
            input: vec![[0.0; 2]; INPUT_CHUNK],
            input_pos: 0,
            input_len: 0,
            source_done: false,
            primed: false,
            current: None,
            next: None,
            frac: 0.0,
            position: 0,
        }
    }

    /// Ratio the next frame will be rendered with.
    pub fn ratio(&self) -> f64 {
        self.ratio.load()
    }

    /// Changes the playback ratio of a fixed-ratio resampler.
    pub fn set_ratio(&mut self, ratio: f64) {
        self.ratio.store(ratio);
    }

    fn pull(&mut self) -> Option<Frame> {
        if self.input_pos >= self.input_len {
            if self.source_done {
                return None;
            }
            let (n, more) = self.source.stream(&mut self.input);
            self.input_pos = 0;
            self.input_len = n;
            if !more || n == 0 {
                self.source_done = true;
            }
            if n == 0 {
                return None;
            }
        }
        let frame = self.input[self.input_pos];
        self.input_pos += 1;
        Some(frame)
    }

    fn advance(&mut self) {
        self.current = self.next;
        self.next = match self.current {
            Some(_) => self.pull(),
            None => None,
        };
    }
}

impl<S: Streamer> Streamer for Resampler<S> {
    fn stream(&mut self, buffer: &mut [Frame]) -> (usize, bool) {
        if !self.primed {
            self.current = self.pull();
            self.next = self.pull();
            self.primed = true;
        }

        for (i, frame) in buffer.iter_mut().enumerate() {
            let Some(a) = self.current else {
                self.position += i;
                return (i, false);
            };
            // The last input frame is held until the read position moves past it
            let b = self.next.unwrap_or(a);
            *frame = [
                a[0] + (b[0] - a[0]) * self.frac,
                a[1] + (b[1] - a[1]) * self.frac,
            ];

            let step = self.ratio.load();
            if is_playable(step) {
                self.frac += step;
            }
            let whole = self.frac.floor();
            self.frac -= whole;
            for _ in 0..whole as usize {
                self.advance();
                if self.current.is_none() {
                    break;
                }
            }
        }

        self.position += buffer.len();
        (buffer.len(), true)
    }

    fn position(&self) -> usize {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::streamer::testing::{Ramp, collect};

    fn lefts(frames: &[Frame]) -> Vec<f64> {
        frames.iter().map(|f| f[0]).collect()
    }

    #[test]
    fn test_unity_ratio_is_transparent() {
        let mut resampler = Resampler::new(Ramp::new(0.0, 1000), 1.0);
        let frames = collect(&mut resampler, 2000, 333);
        assert_eq!(frames.len(), 1000);
        for (i, frame) in frames.iter().enumerate() {
            assert_eq!(*frame, [i as f64, -(i as f64)]);
        }
    }

    #[test]
    fn test_double_speed_skips_frames() {
        let mut resampler = Resampler::new(Ramp::new(0.0, 10), 2.0);
        let frames = collect(&mut resampler, 100, 64);
        assert_eq!(lefts(&frames), vec![0.0, 2.0, 4.0, 6.0, 8.0]);
    }

    #[test]
    fn test_half_speed_interpolates() {
        let mut resampler = Resampler::new(Ramp::new(0.0, 4), 0.5);
        let frames = collect(&mut resampler, 100, 3);
        assert_eq!(
            lefts(&frames),
            vec![0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.0]
        );
    }

    #[test]
    fn test_ends_with_both_exhaustion_shapes() {
        // Output ends exactly at a buffer boundary: short call first, then (0, false)
        let mut resampler = Resampler::new(Ramp::eager(0.0, 4), 1.0);
        let mut buffer = [[0.0; 2]; 4];
        assert_eq!(resampler.stream(&mut buffer), (4, true));
        assert_eq!(resampler.stream(&mut buffer), (0, false));

        // Output ends mid-buffer
        let mut resampler = Resampler::new(Ramp::new(0.0, 3), 1.0);
        let mut buffer = [[0.0; 2]; 8];
        assert_eq!(resampler.stream(&mut buffer), (3, false));
        assert_eq!(resampler.stream(&mut buffer), (0, false));
        assert_eq!(resampler.position(), 3);
    }

    #[test]
    fn test_empty_source() {
        let mut resampler = Resampler::new(Ramp::new(0.0, 0), 1.0);
        let mut buffer = [[0.0; 2]; 8];
        assert_eq!(resampler.stream(&mut buffer), (0, false));
    }

    #[test]
    fn test_ratio_change_takes_effect_next_frame() {
        let mut resampler = Resampler::new(Ramp::new(0.0, 100), 1.0);
        let mut buffer = [[0.0; 2]; 4];
        resampler.stream(&mut buffer);
        assert_eq!(lefts(&buffer), vec![0.0, 1.0, 2.0, 3.0]);
        resampler.set_ratio(2.0);
        assert_eq!(resampler.ratio(), 2.0);
        resampler.stream(&mut buffer);
        assert_eq!(lefts(&buffer), vec![4.0, 6.0, 8.0, 10.0]);
    }

    #[test]
    fn test_invalid_ratio_holds_position() {
        let mut resampler = Resampler::new(Ramp::new(5.0, 10), f64::NAN);
        let mut buffer = [[0.0; 2]; 3];
        assert_eq!(resampler.stream(&mut buffer), (3, true));
        assert_eq!(lefts(&buffer), vec![5.0, 5.0, 5.0]);
    }

    #[test]
    fn test_oversized_ratio_holds_position() {
        use crate::Silence;

        // An endless source must not trap the read loop
        let mut resampler = Resampler::new(Silence::new(), 1e17);
        let mut buffer = [[1.0; 2]; 4];
        assert_eq!(resampler.stream(&mut buffer), (4, true));
        assert_eq!(buffer, [[0.0; 2]; 4]);

        let mut resampler = Resampler::new(Ramp::new(3.0, 10), f64::INFINITY);
        let mut buffer = [[0.0; 2]; 2];
        resampler.stream(&mut buffer);
        assert_eq!(lefts(&buffer), vec![3.0, 3.0]);
    }

    #[test]
    fn test_maximum_ratio_skips_whole_chunks() {
        use crate::sweep::MAX_RATIO;

        let mut resampler = Resampler::new(Ramp::new(0.0, 2000), MAX_RATIO);
        let frames = collect(&mut resampler, 100, 16);
        let expected: Vec<f64> = (0..8).map(|i| i as f64 * 256.0).collect();
        assert_eq!(lefts(&frames), expected);
    }
}
