//! Error types.
//!
//! Running out of frames is never an error: it is the `more == false` half of
//! the [`Streamer`](crate::Streamer) contract. The variants here cover
//! malformed input that would otherwise turn into NaN or garbage audio.

/// Errors raised while building sources, sweeps or songs.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A tone frequency was zero, negative or not finite.
    #[error("frequency must be positive and finite, got {0} Hz")]
    InvalidFrequency(f64),

    /// A note length was zero, negative or not finite.
    #[error("note duration must be positive and finite, got {0} beats")]
    InvalidDuration(f64),

    /// A tempo was zero, negative or not finite.
    #[error("tempo must be positive and finite, got {0} bpm")]
    InvalidTempo(f64),

    /// A volume exponent was not finite.
    #[error("volume must be finite, got {0}")]
    InvalidVolume(f64),

    /// A format was requested with a zero sample rate.
    #[error("sample rate must be greater than 0")]
    InvalidSampleRate,

    /// Rate sweep parameters that cannot produce a usable ratio.
    #[error("invalid rate sweep: {0}")]
    InvalidSweep(String),

    /// The background sweep thread could not be started.
    #[error("failed to spawn rate sweep task: {0}")]
    Spawn(#[from] std::io::Error),

    /// Song text could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Writing a WAV file failed.
    #[cfg(feature = "wav")]
    #[error("wav output failed: {0}")]
    Wav(#[from] hound::Error),
}

/// Errors from the textual song and pitch formats.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The input string was empty.
    #[error("input string is empty")]
    Empty,

    /// The pitch name was not recognized.
    #[error("invalid pitch name: '{0}'")]
    InvalidPitch(String),

    /// The octave was missing its digits or out of range.
    #[error("invalid octave: '{0}'")]
    InvalidOctave(String),

    /// A numeric field could not be read.
    #[error("invalid number for {field}: '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    /// A note line did not have the expected fields.
    #[error("line {line}: {message}")]
    InvalidLine { line: usize, message: String },

    /// The song did not declare its tempo.
    #[error("missing 'bpm' header")]
    MissingTempo,
}
