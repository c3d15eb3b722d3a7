//! Turns notes into bounded, volume-scaled sources.

use tracing::trace;

use super::{Note, Waveform};
use crate::{BoxedStreamer, Error, Format, Silence, StreamerExt, Tone, WhiteNoise};

/// Peak amplitude of tonal waveforms before volume scaling.
pub const TONE_AMPLITUDE: f64 = 1.0;

/// Peak amplitude of noise before volume scaling.
pub const NOISE_AMPLITUDE: f64 = 0.5;

/// Builds the source for `note` at `bpm`, returning it with its length in
/// seconds.
///
/// The note lasts `duration_beats · 60 / bpm` seconds, rounded to whole frames
/// by `format`. Tonal waveforms play at `note.frequency`, noise and rests ignore
/// it. The source is scaled by `2^volume` and ends after exactly that many
/// frames.
///
/// # Errors
///
/// Fails if the tempo, length or volume are not finite, if the tempo or length
/// are not positive, or if a tonal note has a non-positive frequency.
///
/// # Examples
///
/// ```
/// use tonequeue::music::{compile, Note, Waveform};
/// use tonequeue::{Format, Streamer};
///
/// let note = Note::new(440.0, 0.25, 0.0, Waveform::Sine);
/// let (mut source, secs) = compile(&note, 120.0, Format::CD).unwrap();
/// assert_eq!(secs, 0.125);
/// assert_eq!(source.total_len(), Some(5512));
/// ```
pub fn compile(note: &Note, bpm: f64, format: Format) -> Result<(BoxedStreamer, f64), Error> {
    let secs = validate(note, bpm)?;
    let len = format.samples_for_secs(secs);
    trace!(
        waveform = %note.waveform,
        frequency = note.frequency,
        frames = len,
        "compiled note"
    );

    let source = match note.waveform.shape() {
        Some(shape) => Tone::with_len(shape, note.frequency, format, len)
            .amplitude(TONE_AMPLITUDE)
            .volume(note.volume)
            .bounded(len)
            .boxed(),
        None if note.waveform == Waveform::Noise => WhiteNoise::new(NOISE_AMPLITUDE)
            .volume(note.volume)
            .bounded(len)
            .boxed(),
        None => Silence::new().volume(note.volume).bounded(len).boxed(),
    };

    Ok((source, secs))
}

/// Number of frames [`compile`] would produce for `note`, without building it.
pub fn compiled_len(note: &Note, bpm: f64, format: Format) -> Result<usize, Error> {
    validate(note, bpm).map(|secs| format.samples_for_secs(secs))
}

/// Checks a note against its tempo and returns its length in seconds.
fn validate(note: &Note, bpm: f64) -> Result<f64, Error> {
    if !bpm.is_finite() || bpm <= 0.0 {
        return Err(Error::InvalidTempo(bpm));
    }
    if !note.duration_beats.is_finite() || note.duration_beats <= 0.0 {
        return Err(Error::InvalidDuration(note.duration_beats));
    }
    if !note.volume.is_finite() {
        return Err(Error::InvalidVolume(note.volume));
    }
    if note.waveform.shape().is_some() && !(note.frequency.is_finite() && note.frequency > 0.0) {
        return Err(Error::InvalidFrequency(note.frequency));
    }
    Ok(note.duration_beats * 60.0 / bpm)
}
