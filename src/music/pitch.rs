//! Pitch names and equal-tempered frequencies.

use std::fmt;
use std::str::FromStr;

use crate::ParseError;

/// Frequency of A4, the tuning reference.
pub const A4_HZ: f64 = 440.0;

/// The twelve pitch classes of the chromatic scale, spelled with sharps.
///
/// # Examples
///
/// ```
/// use tonequeue::music::Pitch;
///
/// assert_eq!("Bb".parse::<Pitch>().unwrap(), Pitch::ASharp);
/// assert_eq!(Pitch::A.to_midi_note(4), 69);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pitch {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

impl Pitch {
    /// All pitch classes in ascending order from C.
    pub const ALL: [Pitch; 12] = [
        Pitch::C,
        Pitch::CSharp,
        Pitch::D,
        Pitch::DSharp,
        Pitch::E,
        Pitch::F,
        Pitch::FSharp,
        Pitch::G,
        Pitch::GSharp,
        Pitch::A,
        Pitch::ASharp,
        Pitch::B,
    ];

    /// Semitones above C (0-11).
    pub fn semitone_offset(self) -> u8 {
        self as u8
    }

    /// MIDI note number of this pitch in `octave`, where C4 is 60.
    ///
    /// Octaves below -1 give negative numbers; they still map to valid
    /// (inaudible) frequencies.
    pub fn to_midi_note(self, octave: i8) -> i16 {
        (i16::from(octave) + 1) * 12 + i16::from(self.semitone_offset())
    }

    /// Equal-tempered frequency of this pitch in `octave`.
    pub fn frequency(self, octave: i8) -> f64 {
        midi_to_freq(self.to_midi_note(octave))
    }

    /// Canonical sharp spelling, e.g. `"C#"`.
    pub fn name(self) -> &'static str {
        match self {
            Pitch::C => "C",
            Pitch::CSharp => "C#",
            Pitch::D => "D",
            Pitch::DSharp => "D#",
            Pitch::E => "E",
            Pitch::F => "F",
            Pitch::FSharp => "F#",
            Pitch::G => "G",
            Pitch::GSharp => "G#",
            Pitch::A => "A",
            Pitch::ASharp => "A#",
            Pitch::B => "B",
        }
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Pitch {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "C" | "B#" => Ok(Pitch::C),
            "C#" | "DB" => Ok(Pitch::CSharp),
            "D" => Ok(Pitch::D),
            "D#" | "EB" => Ok(Pitch::DSharp),
            "E" | "FB" => Ok(Pitch::E),
            "F" | "E#" => Ok(Pitch::F),
            "F#" | "GB" => Ok(Pitch::FSharp),
            "G" => Ok(Pitch::G),
            "G#" | "AB" => Ok(Pitch::GSharp),
            "A" => Ok(Pitch::A),
            "A#" | "BB" => Ok(Pitch::ASharp),
            "B" | "CB" => Ok(Pitch::B),
            "" => Err(ParseError::Empty),
            _ => Err(ParseError::InvalidPitch(s.to_string())),
        }
    }
}

/// Converts a MIDI note number to Hz: `440 · 2^((m − 69) / 12)`.
pub fn midi_to_freq(midi_note: i16) -> f64 {
    A4_HZ * 2f64.powf((f64::from(midi_note) - 69.0) / 12.0)
}

/// A pitch class with an octave, written `C#4`, `C# 4` or `Bb3`.
///
/// Octaves run from -1 to 9, the MIDI range.
///
/// # Examples
///
/// ```
/// use tonequeue::music::NoteName;
///
/// let a4: NoteName = "A4".parse().unwrap();
/// assert_eq!(a4.frequency(), 440.0);
///
/// let c4: NoteName = "C 4".parse().unwrap();
/// assert_eq!(c4.midi_note(), 60);
/// assert_eq!(c4.to_string(), "C4");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoteName {
    pub pitch: Pitch,
    pub octave: i8,
}

impl NoteName {
    pub const MIN_OCTAVE: i8 = -1;
    pub const MAX_OCTAVE: i8 = 9;

    pub fn new(pitch: Pitch, octave: i8) -> Self {
        Self { pitch, octave }
    }

    pub fn midi_note(&self) -> i16 {
        self.pitch.to_midi_note(self.octave)
    }

    pub fn frequency(&self) -> f64 {
        self.pitch.frequency(self.octave)
    }
}

impl fmt::Display for NoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pitch, self.octave)
    }
}

impl FromStr for NoteName {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.char_indices();
        let Some((_, letter)) = chars.next() else {
            return Err(ParseError::Empty);
        };
        if !letter.is_ascii_alphabetic() {
            return Err(ParseError::InvalidPitch(s.to_string()));
        }

        // Letter plus an optional accidental
        let split = match chars.next() {
            Some((i, '#' | 'b')) => i + 1,
            Some((i, _)) => i,
            None => s.len(),
        };
        let (name, octave_str) = s.split_at(split);
        let pitch: Pitch = name.parse()?;

        let octave_str = octave_str.trim();
        if octave_str.is_empty() {
            return Err(ParseError::InvalidOctave(s.to_string()));
        }
        let octave = octave_str
            .parse::<i8>()
            .ok()
            .and_then(|written| written.checked_add(octave_carry(name)))
            .filter(|octave| (Self::MIN_OCTAVE..=Self::MAX_OCTAVE).contains(octave))
            .ok_or_else(|| ParseError::InvalidOctave(octave_str.to_string()))?;

        Ok(Self { pitch, octave })
    }
}

/// Octave shift for spellings that cross the B/C boundary: `Cb4` is B3 and
/// `B#3` is C4.
fn octave_carry(name: &str) -> i8 {
    match name.to_uppercase().as_str() {
        "CB" => -1,
        "B#" => 1,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn test_pitch_offsets() {
        for (i, pitch) in Pitch::ALL.iter().enumerate() {
            assert_eq!(pitch.semitone_offset() as usize, i);
        }
    }

    #[test]
    fn test_pitch_spellings() {
        assert_eq!("c#".parse::<Pitch>().unwrap(), Pitch::CSharp);
        assert_eq!("Db".parse::<Pitch>().unwrap(), Pitch::CSharp);
        assert_eq!("E#".parse::<Pitch>().unwrap(), Pitch::F);
        assert_eq!("Cb".parse::<Pitch>().unwrap(), Pitch::B);
        assert_eq!(
            "H".parse::<Pitch>(),
            Err(ParseError::InvalidPitch("H".into()))
        );
        assert_eq!("".parse::<Pitch>(), Err(ParseError::Empty));
    }

    #[test]
    fn test_midi_numbers() {
        assert_eq!(Pitch::C.to_midi_note(4), 60);
        assert_eq!(Pitch::A.to_midi_note(4), 69);
        assert_eq!(Pitch::C.to_midi_note(-1), 0);
        assert_eq!(Pitch::G.to_midi_note(9), 127);
    }

    #[test]
    fn test_equal_temperament() {
        assert_eq!(Pitch::A.frequency(4), 440.0);
        assert_eq!(Pitch::A.frequency(5), 880.0);
        assert!(close(Pitch::C.frequency(4), 261.63));
        assert!(close(Pitch::ASharp.frequency(3), 233.08));
        assert!(close(Pitch::C.frequency(2), 65.41));
    }

    #[test]
    fn test_parse_note_names() {
        let parse = |s: &str| s.parse::<NoteName>();
        assert_eq!(parse("A4").unwrap(), NoteName::new(Pitch::A, 4));
        assert_eq!(parse("C#4").unwrap(), NoteName::new(Pitch::CSharp, 4));
        assert_eq!(parse("C# 4").unwrap(), NoteName::new(Pitch::CSharp, 4));
        assert_eq!(parse("C 4").unwrap(), NoteName::new(Pitch::C, 4));
        assert_eq!(parse("Bb3").unwrap(), NoteName::new(Pitch::ASharp, 3));
        assert_eq!(parse("b3").unwrap(), NoteName::new(Pitch::B, 3));
        assert_eq!(parse(" G-1 ").unwrap(), NoteName::new(Pitch::G, -1));
    }

    #[test]
    fn test_spellings_across_octave_boundary() {
        let parse = |s: &str| s.parse::<NoteName>().unwrap();
        assert_eq!(parse("Cb4"), NoteName::new(Pitch::B, 3));
        assert_eq!(parse("Cb4").midi_note(), parse("B3").midi_note());
        assert_eq!(parse("cb 4").frequency(), parse("B3").frequency());
        assert_eq!(parse("B#3"), NoteName::new(Pitch::C, 4));
        assert_eq!(parse("B#3").midi_note(), 60);
        // Enharmonics inside the octave keep it
        assert_eq!(parse("E#4"), NoteName::new(Pitch::F, 4));
        assert_eq!(parse("Fb4"), NoteName::new(Pitch::E, 4));
        // The carry can push a note out of range
        assert_eq!(
            "Cb-1".parse::<NoteName>(),
            Err(ParseError::InvalidOctave("-1".into()))
        );
        assert_eq!(
            "B#9".parse::<NoteName>(),
            Err(ParseError::InvalidOctave("9".into()))
        );
    }

    #[test]
    fn test_parse_note_name_errors() {
        let parse = |s: &str| s.parse::<NoteName>();
        assert_eq!(parse(""), Err(ParseError::Empty));
        assert_eq!(parse("C"), Err(ParseError::InvalidOctave("C".into())));
        assert_eq!(parse("C10"), Err(ParseError::InvalidOctave("10".into())));
        assert_eq!(parse("Cx4"), Err(ParseError::InvalidOctave("x4".into())));
        assert!(matches!(parse("4C"), Err(ParseError::InvalidPitch(_))));
    }

    #[test]
    fn test_display_round_trips() {
        let name = NoteName::new(Pitch::FSharp, 2);
        assert_eq!(name.to_string(), "F#2");
        assert_eq!(name.to_string().parse::<NoteName>().unwrap(), name);
    }
}
