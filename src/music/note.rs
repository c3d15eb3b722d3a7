//! Note events and waveform selection.

use std::fmt;
use std::str::FromStr;

use tracing::warn;

use super::NoteName;
use crate::{ParseError, Shape};

/// What a note is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Waveform {
    #[default]
    Sine,
    Square,
    Sawtooth,
    /// White noise; the note's frequency is ignored
    Noise,
    /// Silence for the note's length
    Rest,
}

impl Waveform {
    /// Looks a waveform up by name, case-insensitively.
    ///
    /// Unknown names fall back to [`Waveform::Sine`] with a warning, so a
    /// song with a typo still plays.
    ///
    /// # Examples
    ///
    /// ```
    /// use tonequeue::music::Waveform;
    ///
    /// assert_eq!(Waveform::from_name("Square"), Waveform::Square);
    /// assert_eq!(Waveform::from_name("saw"), Waveform::Sawtooth);
    /// assert_eq!(Waveform::from_name("kazoo"), Waveform::Sine);
    /// ```
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "sine" | "sin" => Waveform::Sine,
            "square" | "sq" => Waveform::Square,
            "sawtooth" | "saw" => Waveform::Sawtooth,
            "noise" => Waveform::Noise,
            "rest" | "silence" | "-" => Waveform::Rest,
            _ => {
                warn!(name, "unknown waveform, using sine");
                Waveform::Sine
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Square => "square",
            Waveform::Sawtooth => "sawtooth",
            Waveform::Noise => "noise",
            Waveform::Rest => "rest",
        }
    }

    /// Oscillator shape for tonal waveforms, `None` for noise and rests.
    pub fn shape(self) -> Option<Shape> {
        match self {
            Waveform::Sine => Some(Shape::Sine),
            Waveform::Square => Some(Shape::Square),
            Waveform::Sawtooth => Some(Shape::Sawtooth),
            Waveform::Noise | Waveform::Rest => None,
        }
    }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One entry of a song: what to play, for how many beats, how loud.
///
/// `volume` is a base-2 exponent: 0 plays at unity gain, -1 at half
/// amplitude, 1 at double.
///
/// # Examples
///
/// ```
/// use tonequeue::music::{Note, Waveform};
///
/// let note: Note = "C#4 0.5 -1 square".parse().unwrap();
/// assert_eq!(note.duration_beats, 0.5);
/// assert_eq!(note.volume, -1.0);
/// assert_eq!(note.waveform, Waveform::Square);
/// assert!((note.frequency - 277.18).abs() < 0.01);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    /// Frequency in Hz (ignored for noise and rests)
    pub frequency: f64,
    pub duration_beats: f64,
    pub volume: f64,
    pub waveform: Waveform,
}

impl Note {
    pub fn new(frequency: f64, duration_beats: f64, volume: f64, waveform: Waveform) -> Self {
        Self {
            frequency,
            duration_beats,
            volume,
            waveform,
        }
    }

    /// A rest lasting `duration_beats`.
    pub fn rest(duration_beats: f64) -> Self {
        Self::new(0.0, duration_beats, 0.0, Waveform::Rest)
    }

    /// A tone at a named pitch.
    pub fn pitched(name: NoteName, duration_beats: f64, volume: f64, waveform: Waveform) -> Self {
        Self::new(name.frequency(), duration_beats, volume, waveform)
    }
}

/// Writes the note in the one-line text form read by [`Note::from_str`].
impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pitchless = self.frequency == 0.0
            || (self.waveform.shape().is_none()
                && !(self.frequency.is_finite() && self.frequency > 0.0));
        if pitchless {
            f.write_str("-")?;
        } else {
            write!(f, "{}", self.frequency)?;
        }
        write!(
            f,
            " {} {} {}",
            self.duration_beats, self.volume, self.waveform
        )
    }
}

/// Parses `<pitch> <beats> <volume> <waveform>`.
///
/// The pitch is a note name (`A4`, `C#4`, `C 4`, `Bb3`), a frequency in Hz,
/// or `-` for none.
impl FromStr for Note {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split_whitespace().collect();
        if fields.is_empty() {
            return Err(ParseError::Empty);
        }
        // A spaced name like "C# 4" takes two fields
        if !(4..=5).contains(&fields.len()) {
            return Err(ParseError::InvalidLine {
                line: 0,
                message: format!(
                    "expected '<pitch> <beats> <volume> <waveform>', got '{}'",
                    s.trim()
                ),
            });
        }

        let (pitch, rest) = fields.split_at(fields.len() - 3);
        let frequency = parse_frequency(&pitch.join(" "))?;
        let duration_beats = parse_number("beats", rest[0])?;
        let volume = parse_number("volume", rest[1])?;
        let waveform = Waveform::from_name(rest[2]);

        Ok(Self::new(frequency, duration_beats, volume, waveform))
    }
}

fn parse_frequency(field: &str) -> Result<f64, ParseError> {
    if field == "-" {
        return Ok(0.0);
    }
    if field.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return parse_number("frequency", field);
    }
    Ok(field.parse::<NoteName>()?.frequency())
}

fn parse_number(field: &'static str, value: &str) -> Result<f64, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}
