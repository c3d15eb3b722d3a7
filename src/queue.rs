//! Sequential concatenation of streamers.

use std::collections::VecDeque;

use tracing::trace;

use crate::{BoxedStreamer, Frame, Streamer};

/// Plays a list of streamers back to back as one continuous stream.
///
/// Only the front streamer is read. When it reports `more == false` it is
/// popped, the frames it wrote in that call are kept, and the next streamer
/// continues filling the same buffer, so a single call can span several
/// sources with no gap at the boundaries.
///
/// A queue never ends: once empty it emits silence and still reports
/// `(buffer.len(), true)`. Stopping playback is a separate concern; wrap the
/// queue with [`bounded`](crate::StreamerExt::bounded) to give it a length.
///
/// [`add`](Queue::add) and [`stream`](Streamer::stream) both take `&mut self`,
/// so callers sharing a queue with an audio callback serialize them behind
/// whatever lock owns the queue.
///
/// # Examples
///
/// ```
/// use tonequeue::{Format, Queue, Shape, Silence, Streamer, StreamerExt, Tone};
///
/// let mut queue = Queue::new();
/// queue.add(Tone::with_len(Shape::Sine, 440.0, Format::CD, 100));
/// queue.add(Silence::new().bounded(50));
///
/// let mut buffer = [[1.0; 2]; 200];
/// assert_eq!(queue.stream(&mut buffer), (200, true));
/// assert!(queue.is_idle());
/// assert_eq!(buffer[199], [0.0, 0.0]);
/// ```
#[derive(Default)]
pub struct Queue {
    streamers: VecDeque<BoxedStreamer>,
    position: usize,
}

impl Queue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a streamer to the tail.
    pub fn add<S: Streamer + Send + 'static>(&mut self, streamer: S) {
        self.streamers.push_back(Box::new(streamer));
    }

    /// Appends a boxed streamer to the tail.
    pub fn add_boxed(&mut self, streamer: BoxedStreamer) {
        self.streamers.push_back(streamer);
    }

    /// Number of streamers still waiting, including the one playing.
    pub fn pending(&self) -> usize {
        self.streamers.len()
    }

    /// Whether the queue has run dry and is emitting silence.
    pub fn is_idle(&self) -> bool {
        self.streamers.is_empty()
    }

    /// Drops every pending streamer.
    pub fn clear(&mut self) {
        self.streamers.clear();
    }
}

impl Extend<BoxedStreamer> for Queue {
    fn extend<I: IntoIterator<Item = BoxedStreamer>>(&mut self, iter: I) {
        self.streamers.extend(iter);
    }
}

impl FromIterator<BoxedStreamer> for Queue {
    fn from_iter<I: IntoIterator<Item = BoxedStreamer>>(iter: I) -> Self {
        Self {
            streamers: iter.into_iter().collect(),
            position: 0,
        }
    }
}

impl Streamer for Queue {
    fn stream(&mut self, buffer: &mut [Frame]) -> (usize, bool) {
        let mut filled = 0;
        while filled < buffer.len() {
            let Some(front) = self.streamers.front_mut() else {
                buffer[filled..].fill([0.0, 0.0]);
                break;
            };

            let (n, more) = front.stream(&mut buffer[filled..]);
            if !more {
                self.streamers.pop_front();
                trace!(pending = self.streamers.len(), "queue advanced");
            }
            filled += n;
        }

        self.position += buffer.len();
        (buffer.len(), true)
    }

    fn position(&self) -> usize {
        self.position
    }
}
