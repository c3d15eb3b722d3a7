//! Musical layer: pitches, notes, songs and the note compiler.
//!
//! A [`Song`] is a tempo plus a list of [`Note`]s. [`compile`] turns a single
//! note into a bounded source, and [`Song::compile`] lines every note up in a
//! [`Queue`](crate::Queue).

mod compiler;
mod note;
mod pitch;
mod song;

pub use compiler::{NOISE_AMPLITUDE, TONE_AMPLITUDE, compile, compiled_len};
pub use note::{Note, Waveform};
pub use pitch::{A4_HZ, NoteName, Pitch, midi_to_freq};
pub use song::Song;
