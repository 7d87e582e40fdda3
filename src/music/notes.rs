/*
Equal Temperament Note Math
===========================

Everything here is anchored to A4 = 440 Hz. A note is (name, octave) in
scientific pitch notation; the distance between adjacent notes is one
semitone = 100 cents, and one octave = 12 semitones = a doubling in
frequency.

The two directions:

  (name, octave) -> Hz     note_frequency()
  Hz -> (name, octave)     nearest_note(), which also reports how many
                           cents the input sits away from the note center

The second direction is what a tuner does: snap the measured frequency to
the nearest chromatic note and show the signed error.
*/

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Concert pitch reference: A above middle C.
pub const A4_HZ: f32 = 440.0;

/// The twelve chromatic note names. Sharps only (no flat spellings).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NoteName {
    C,
    Cs,
    D,
    Ds,
    E,
    F,
    Fs,
    G,
    Gs,
    A,
    As,
    B,
}

impl NoteName {
    /// All names in chromatic order starting from C.
    pub const ALL: [NoteName; 12] = [
        NoteName::C,
        NoteName::Cs,
        NoteName::D,
        NoteName::Ds,
        NoteName::E,
        NoteName::F,
        NoteName::Fs,
        NoteName::G,
        NoteName::Gs,
        NoteName::A,
        NoteName::As,
        NoteName::B,
    ];

    /// Semitone index within the octave (C = 0 .. B = 11).
    pub fn semitone(self) -> i32 {
        self as i32
    }
}

impl std::fmt::Display for NoteName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            NoteName::C => "C",
            NoteName::Cs => "C#",
            NoteName::D => "D",
            NoteName::Ds => "D#",
            NoteName::E => "E",
            NoteName::F => "F",
            NoteName::Fs => "F#",
            NoteName::G => "G",
            NoteName::Gs => "G#",
            NoteName::A => "A",
            NoteName::As => "A#",
            NoteName::B => "B",
        };
        f.write_str(s)
    }
}

/// Frequency of a note in scientific pitch notation.
///
/// `note_frequency(NoteName::A, 4)` is exactly [`A4_HZ`].
pub fn note_frequency(name: NoteName, octave: i32) -> f32 {
    let semitones_from_a4 = (octave - 4) * 12 + (name.semitone() - NoteName::A.semitone());
    (A4_HZ as f64 * (semitones_from_a4 as f64 / 12.0).exp2()) as f32
}

/// A measured frequency snapped to the nearest chromatic note.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestNote {
    pub name: NoteName,
    pub octave: i32,
    /// Signed distance from the note center, negative = flat.
    pub cents: f32,
}

impl std::fmt::Display for NearestNote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.name, self.octave)
    }
}

/// Snap a frequency to the nearest chromatic note.
///
/// Returns `None` for non-positive input (there is no nearest note to
/// silence).
pub fn nearest_note(frequency: f32) -> Option<NearestNote> {
    if frequency <= 0.0 {
        return None;
    }

    let semitones_from_a4 = 12.0 * (frequency as f64 / A4_HZ as f64).log2();
    let rounded = semitones_from_a4.round();
    let cents = ((semitones_from_a4 - rounded) * 100.0) as f32;

    // Offset by A's index so the wrap lands on note names, then re-split
    // into (name, octave).
    let a_index = NoteName::A.semitone();
    let absolute = rounded as i32 + a_index;
    let name = NoteName::ALL[absolute.rem_euclid(12) as usize];
    let octave = 4 + (absolute as f64 / 12.0).floor() as i32;

    Some(NearestNote {
        name,
        octave,
        cents,
    })
}

/// Parse a `"F#3"` style spelling. Sharps only, octaves 0-9.
pub fn parse_note(s: &str) -> Option<(NoteName, i32)> {
    let octave_digit = s.chars().last()?.to_digit(10)? as i32;
    let name = match &s[..s.len() - 1] {
        "C" => NoteName::C,
        "C#" => NoteName::Cs,
        "D" => NoteName::D,
        "D#" => NoteName::Ds,
        "E" => NoteName::E,
        "F" => NoteName::F,
        "F#" => NoteName::Fs,
        "G" => NoteName::G,
        "G#" => NoteName::Gs,
        "A" => NoteName::A,
        "A#" => NoteName::As,
        "B" => NoteName::B,
        _ => return None,
    };
    Some((name, octave_digit))
}
