//! Songs: a tempo and an ordered list of notes.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use super::{Note, compile, compiled_len};
use crate::{Error, Format, ParseError, Queue};

/// A monophonic song played one note after another at a fixed tempo.
///
/// Songs have a plain-text form, one note per line:
///
/// ```text
/// # lines starting with '#' are comments
/// bpm 120
/// A4   0.5  -1  square
/// 440  1     0  sine
/// -    1     0  rest
/// C 2  0.25  0  noise
/// ```
///
/// The `bpm` header is required. Note lines use the format of [`Note`]'s
/// `FromStr` implementation.
///
/// # Examples
///
/// ```
/// use tonequeue::music::Song;
/// use tonequeue::Format;
///
/// let song: Song = "bpm 120\nA4 1 0 sine\n- 1 0 rest\n".parse().unwrap();
/// assert_eq!(song.notes.len(), 2);
/// assert_eq!(song.total_samples(Format::CD).unwrap(), 44100);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Song {
    pub bpm: f64,
    pub notes: Vec<Note>,
}

impl Song {
    /// Creates an empty song.
    pub fn new(bpm: f64) -> Self {
        Self {
            bpm,
            notes: Vec::new(),
        }
    }

    /// Appends a note.
    pub fn with_note(mut self, note: Note) -> Self {
        self.notes.push(note);
        self
    }

    /// Plays the note list `times` times in a row.
    pub fn repeat(&self, times: usize) -> Self {
        let capacity = self.notes.len().checked_mul(times).unwrap_or_default();
        let mut notes = Vec::with_capacity(capacity);
        if !self.notes.is_empty() {
            for _ in 0..times {
                notes.extend_from_slice(&self.notes);
            }
        }
        Self {
            bpm: self.bpm,
            notes,
        }
    }

    /// Compiles every note, in order, into a [`Queue`].
    ///
    /// The queue keeps playing silence after the last note; bound it with
    /// [`total_samples`](Song::total_samples) to end playback.
    ///
    /// # Errors
    ///
    /// The first note that fails validation aborts compilation; no partial
    /// queue is returned.
    pub fn compile(&self, format: Format) -> Result<Queue, Error> {
        let mut queue = Queue::new();
        for note in &self.notes {
            let (source, _) = compile(note, self.bpm, format)?;
            queue.add_boxed(source);
        }
        debug!(notes = self.notes.len(), bpm = self.bpm, "compiled song");
        Ok(queue)
    }

    /// Total length in frames of the compiled song.
    pub fn total_samples(&self, format: Format) -> Result<usize, Error> {
        self.notes
            .iter()
            .map(|note| compiled_len(note, self.bpm, format))
            .sum()
    }
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "bpm {}", self.bpm)?;
        for note in &self.notes {
            writeln!(f, "{note}")?;
        }
        Ok(())
    }
}

impl FromStr for Song {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bpm = None;
        let mut notes = Vec::new();

        for (index, line) in s.lines().enumerate() {
            let line_no = index + 1;
            let line = line.trim();
            // '#' only opens a comment at the start of a line, since it also spells sharps
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(value) = header_value(line) {
                if bpm.is_some() {
                    return Err(invalid_line(line_no, "duplicate 'bpm' header"));
                }
                let value = value.parse::<f64>().map_err(|_| {
                    invalid_line(line_no, format!("invalid number for bpm: '{value}'"))
                })?;
                bpm = Some(value);
                continue;
            }

            let note = line.parse::<Note>().map_err(|err| match err {
                ParseError::InvalidLine { message, .. } => invalid_line(line_no, message),
                other => invalid_line(line_no, other.to_string()),
            })?;
            notes.push(note);
        }

        let bpm = bpm.ok_or(ParseError::MissingTempo)?;
        Ok(Self { bpm, notes })
    }
}

fn header_value(line: &str) -> Option<&str> {
    let (key, value) = line.split_once(char::is_whitespace)?;
    key.eq_ignore_ascii_case("bpm").then(|| value.trim())
}

fn invalid_line(line: usize, message: impl Into<String>) -> ParseError {
    ParseError::InvalidLine {
        line,
        message: message.into(),
    }
}
