//! Periodic waveform generators.

mod tone;

pub use tone::{Shape, Tone};
