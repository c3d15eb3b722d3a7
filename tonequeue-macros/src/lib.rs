use proc_macro::TokenStream;
use quote::quote;
use syn::{LitStr, parse_macro_input};

/// Converts a note name to its equal-tempered frequency in Hz at compile time.
///
/// The macro expands to a plain `f64` literal, so it can be used in `const`
/// items and costs nothing at runtime. Malformed names are compile errors.
///
/// # Format
///
/// `<letter>[#|b][ ]<octave>`:
/// - `letter` is A to G, in either case
/// - an optional `#` (sharp) or `b` (flat)
/// - an optional space, as in `"C 4"`
/// - `octave` is required and runs from -1 to 9
///
/// Tuning is A4 = 440 Hz.
///
/// # Examples
///
/// ```ignore
/// use tonequeue::hz;
///
/// const A4: f64 = hz!("A4");
/// let middle_c = hz!("C 4");
/// let c_sharp = hz!("C#4");
/// let b_flat = hz!("Bb3");
/// ```
#[proc_macro]
pub fn hz(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as LitStr);
    let name = input.value();

    match parse_note(&name) {
        Ok((semitone, octave)) => {
            let frequency = midi_to_freq(midi_note(semitone, octave));
            TokenStream::from(quote! { #frequency })
        }
        Err(e) => syn::Error::new(input.span(), format!("invalid note '{name}': {e}"))
            .to_compile_error()
            .into(),
    }
}

/// Semitones above C for a letter plus optional accidental, and the octave
/// shift for `Cb` (-1) and `B#` (+1).
fn semitone(letter: char, accidental: Option<char>) -> Result<(i16, i8), String> {
    let natural: i16 = match letter.to_ascii_uppercase() {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        other => return Err(format!("invalid pitch '{other}'")),
    };
    let shifted = match accidental {
        Some('#') => natural + 1,
        Some('b') => natural - 1,
        _ => natural,
    };
    let carry = if shifted < 0 {
        -1
    } else if shifted > 11 {
        1
    } else {
        0
    };
    Ok((shifted.rem_euclid(12), carry))
}

fn parse_note(s: &str) -> Result<(i16, i8), String> {
    let s = s.trim();
    let mut chars = s.chars();
    let letter = chars.next().ok_or("empty string")?;

    let rest = chars.as_str();
    let (accidental, rest) = match rest.chars().next() {
        Some(c @ ('#' | 'b')) => (Some(c), &rest[1..]),
        _ => (None, rest),
    };
    let (semitone, carry) = semitone(letter, accidental)?;

    let octave_str = rest.trim();
    if octave_str.is_empty() {
        return Err("missing octave".to_string());
    }
    let written = octave_str
        .parse::<i8>()
        .map_err(|_| format!("invalid octave '{octave_str}'"))?;
    let octave = written
        .checked_add(carry)
        .filter(|octave| (-1..=9).contains(octave))
        .ok_or_else(|| format!("octave {octave_str} out of range (-1 to 9)"))?;

    Ok((semitone, octave))
}

fn midi_note(semitone: i16, octave: i8) -> i16 {
    (i16::from(octave) + 1) * 12 + semitone
}

fn midi_to_freq(midi_note: i16) -> f64 {
    440.0 * 2.0_f64.powf((f64::from(midi_note) - 69.0) / 12.0)
}
