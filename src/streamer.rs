//! The pull-based streaming contract shared by every source and combinator.
//!
//! A [`Streamer`] is asked to fill a buffer of stereo [`Frame`]s. It writes as
//! many frames as it can, left-aligned, and reports whether it has anything
//! left to give. Consumers such as [`Queue`](crate::Queue) rely on nothing
//! else.

/// One stereo sample pair: `[left, right]`.
pub type Frame = [f64; 2];

/// A boxed streamer that can move into an audio callback thread.
pub type BoxedStreamer = Box<dyn Streamer + Send>;

/// Common interface for everything that produces audio frames.
///
/// # Contract
///
/// `stream(buffer)` returns `(filled, more)`:
///
/// - `filled` frames were written to `buffer[..filled]`. Frames past `filled`
///   are left untouched, callers must not assume they were zeroed.
/// - `more == false` means the streamer is drained for this call and every
///   later call. A streamer may report it together with the last frames it
///   wrote, or return a short `(filled, true)` and then `(0, false)`.
/// - `more == true` with `filled < buffer.len()` only happens on the call in
///   which the signal ends.
///
/// # Examples
///
/// ```
/// use tonequeue::{Silence, Streamer};
///
/// let mut silence = Silence::new();
/// let mut buffer = [[1.0, 1.0]; 8];
/// assert_eq!(silence.stream(&mut buffer), (8, true));
/// assert_eq!(buffer[3], [0.0, 0.0]);
/// ```
pub trait Streamer {
    /// Fills `buffer` with frames, returning how many were written and
    /// whether more will follow.
    fn stream(&mut self, buffer: &mut [Frame]) -> (usize, bool);

    /// Number of frames this streamer has emitted so far.
    fn position(&self) -> usize;

    /// Total number of frames the streamer will emit, or `None` if unbounded.
    fn total_len(&self) -> Option<usize> {
        None
    }
}

impl<S: Streamer + ?Sized> Streamer for Box<S> {
    fn stream(&mut self, buffer: &mut [Frame]) -> (usize, bool) {
        (**self).stream(buffer)
    }

    fn position(&self) -> usize {
        (**self).position()
    }

    fn total_len(&self) -> Option<usize> {
        (**self).total_len()
    }
}

impl<S: Streamer + ?Sized> Streamer for &mut S {
    fn stream(&mut self, buffer: &mut [Frame]) -> (usize, bool) {
        (**self).stream(buffer)
    }

    fn position(&self) -> usize {
        (**self).position()
    }

    fn total_len(&self) -> Option<usize> {
        (**self).total_len()
    }
}


#[cfg(test)]
mod tests {
    use super::testing::Ramp;
    use super::*;

    #[test]
    fn test_boxed_streamer_delegates() {
        let mut boxed: BoxedStreamer = Box::new(Ramp::new(0.0, 3));
        let mut buffer = [[0.0; 2]; 4];
        assert_eq!(boxed.stream(&mut buffer), (3, true));
        assert_eq!(boxed.position(), 3);
        assert_eq!(boxed.total_len(), Some(3));
        assert_eq!(boxed.stream(&mut buffer), (0, false));
    }

    #[test]
    fn test_untouched_tail() {
        let mut ramp = Ramp::new(1.0, 2);
        let mut buffer = [[9.0, 9.0]; 4];
        ramp.stream(&mut buffer);
        assert_eq!(buffer[0], [1.0, -1.0]);
        assert_eq!(buffer[1], [2.0, -2.0]);
        assert_eq!(buffer[2], [9.0, 9.0]);
    }

    #[test]
    fn test_mut_ref_streams() {
        let mut ramp = Ramp::new(0.0, 5);
        {
            let mut borrowed = &mut ramp;
            let mut buffer = [[0.0; 2]; 2];
            assert_eq!(borrowed.stream(&mut buffer), (2, true));
        }
        assert_eq!(ramp.position(), 2);
    }
}
