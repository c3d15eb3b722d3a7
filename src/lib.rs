//! Tonequeue - pull-based audio streaming for Rust
//!
//! Sources implement [`Streamer`] and fill caller-provided buffers of stereo
//! [`Frame`]s. They are composed with the [`StreamerExt`] combinators, lined
//! up back to back in a [`Queue`], and played through any driver that calls
//! [`Streamer::stream`] in a loop.
//!
//! ```
//! use std::time::Duration;
//! use tonequeue::{Format, Queue, Shape, Silence, Streamer, StreamerExt, Tone};
//!
//! let format = Format::CD;
//! let mut queue = Queue::new();
//! queue.add(Tone::new(Shape::Sine, 440.0, format, Duration::from_millis(125)));
//! queue.add(Silence::new().bounded(100));
//!
//! let mut song = queue.bounded(6000);
//! let mut buffer = vec![[0.0; 2]; 4096];
//! assert_eq!(song.stream(&mut buffer), (4096, true));
//! assert_eq!(song.stream(&mut buffer), (1904, true));
//! assert_eq!(song.stream(&mut buffer), (0, false));
//! ```

pub mod combinators;
pub mod error;
pub mod format;
pub mod noise;
pub mod oscillators;
pub mod queue;
pub mod silence;
pub mod streamer;
pub mod sweep;

#[cfg(feature = "music")]
pub mod music;

#[cfg(feature = "wav")]
pub mod wav;

// Re-export commonly used types at the crate root
pub use combinators::{Bounded, OnComplete, StreamerExt, Volume};
pub use error::{Error, ParseError};
pub use format::Format;
pub use noise::WhiteNoise;
pub use oscillators::{Shape, Tone};
pub use queue::Queue;
pub use silence::Silence;
pub use streamer::{BoxedStreamer, Frame, Streamer};
pub use sweep::{RateSweep, Resampler, SharedRatio, Sweep, SweepCurve};

#[cfg(feature = "music")]
pub use music::{Note, Song, Waveform};

#[cfg(feature = "macros")]
pub use tonequeue_macros::hz;
