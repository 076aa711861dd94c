//! Spelled pitches: letters, accidentals, and octave numbers.
//!
//! Note names use scientific pitch notation: a letter, an optional
//! accidental (`#`, `##`, `b`, `bb`), and an octave number, so `C4` is
//! MIDI 60. The octave digit follows the letter, which means `Cb4` sits a
//! semitone *below* `C4` and `B#3` coincides with `C4`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, Result};

/// The seven letter names of the gamut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    /// Semitone of the natural letter within an octave (C = 0).
    pub fn semitone(self) -> i8 {
        match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        }
    }

    /// All letters in gamut order.
    pub fn all() -> [Letter; 7] {
        [
            Letter::C,
            Letter::D,
            Letter::E,
            Letter::F,
            Letter::G,
            Letter::A,
            Letter::B,
        ]
    }

    /// Position within the letter cycle (C = 0 .. B = 6).
    pub fn index(self) -> usize {
        match self {
            Letter::C => 0,
            Letter::D => 1,
            Letter::E => 2,
            Letter::F => 3,
            Letter::G => 4,
            Letter::A => 5,
            Letter::B => 6,
        }
    }

    /// The letter a given number of positions up the cycle, wrapping at B.
    pub fn cycle(self, steps: usize) -> Letter {
        Letter::all()[(self.index() + steps) % 7]
    }

    /// Parse from a character (case-insensitive).
    pub fn from_char(c: char) -> Option<Letter> {
        match c.to_ascii_uppercase() {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            _ => None,
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::G => 'G',
            Letter::A => 'A',
            Letter::B => 'B',
        };
        write!(f, "{}", c)
    }
}

/// Accidentals up to double sharps and flats. A natural is the absence of
/// an accidental.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Accidental {
    DoubleFlat,
    Flat,
    Sharp,
    DoubleSharp,
}

impl Accidental {
    /// Semitone alteration applied to the natural letter.
    pub fn semitone_offset(self) -> i8 {
        match self {
            Accidental::DoubleFlat => -2,
            Accidental::Flat => -1,
            Accidental::Sharp => 1,
            Accidental::DoubleSharp => 2,
        }
    }

    /// Parse from the text form used in note names.
    pub fn parse(s: &str) -> Option<Accidental> {
        match s {
            "#" => Some(Accidental::Sharp),
            "##" => Some(Accidental::DoubleSharp),
            "b" => Some(Accidental::Flat),
            "bb" => Some(Accidental::DoubleFlat),
            _ => None,
        }
    }
}

impl fmt::Display for Accidental {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Accidental::DoubleFlat => "bb",
            Accidental::Flat => "b",
            Accidental::Sharp => "#",
            Accidental::DoubleSharp => "##",
        };
        write!(f, "{}", s)
    }
}

/// A spelled pitch class: letter plus optional accidental, no octave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PitchClass {
    pub letter: Letter,
    pub accidental: Option<Accidental>,
}

impl PitchClass {
    pub fn new(letter: Letter, accidental: Option<Accidental>) -> Self {
        PitchClass { letter, accidental }
    }

    /// Chromatic pitch class 0-11. `Cb` wraps to 11, `B#` to 0.
    pub fn semitone(&self) -> u8 {
        let alteration = self.accidental.map(|a| a.semitone_offset()).unwrap_or(0);
        (self.letter.semitone() + alteration).rem_euclid(12) as u8
    }

    /// Parse a pitch-class name such as `C`, `F#`, or `Bb`. The whole
    /// input must be consumed.
    pub fn parse(s: &str) -> Option<PitchClass> {
        let mut chars = s.chars();
        let letter = Letter::from_char(chars.next()?)?;
        let rest = chars.as_str();
        let accidental = if rest.is_empty() {
            None
        } else {
            Some(Accidental::parse(rest)?)
        };
        Some(PitchClass { letter, accidental })
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter)?;
        if let Some(acc) = self.accidental {
            write!(f, "{}", acc)?;
        }
        Ok(())
    }
}

/// A pitch: spelled pitch class plus octave number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pitch {
    pub class: PitchClass,
    pub octave: i8,
}

impl Pitch {
    pub fn new(letter: Letter, accidental: Option<Accidental>, octave: i8) -> Self {
        Pitch {
            class: PitchClass::new(letter, accidental),
            octave,
        }
    }

    /// Semitone index with C4 = 60. Returned as `i16` so pitches outside
    /// the MIDI range are still well-defined for interval arithmetic.
    pub fn midi(&self) -> i16 {
        let alteration = self
            .class
            .accidental
            .map(|a| a.semitone_offset())
            .unwrap_or(0);
        (self.octave as i16 + 1) * 12 + self.class.letter.semitone() as i16 + alteration as i16
    }

    /// Parse a note name such as `C4`, `F#3`, `Bb2`, or `C-1`.
    pub fn parse(s: &str) -> Result<Pitch> {
        let err = || Error::InvalidPitch(s.to_string());

        let first = s.chars().next().ok_or_else(err)?;
        let letter = Letter::from_char(first).ok_or_else(err)?;

        let rest = &s[first.len_utf8()..];
        let acc_len = rest
            .bytes()
            .take_while(|&b| b == b'#' || b == b'b')
            .count();
        let accidental = if acc_len == 0 {
            None
        } else {
            Some(Accidental::parse(&rest[..acc_len]).ok_or_else(err)?)
        };

        let octave: i8 = rest[acc_len..].parse().map_err(|_| err())?;

        Ok(Pitch {
            class: PitchClass { letter, accidental },
            octave,
        })
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.class, self.octave)
    }
}

/// Parse a list of note names. A single element may also hold several
/// whitespace-separated names (`"C4 E4 G4"`).
pub fn parse_names<S: AsRef<str>>(names: &[S]) -> Result<Vec<Pitch>> {
    names
        .iter()
        .flat_map(|s| s.as_ref().split_whitespace())
        .map(Pitch::parse)
        .collect()
}

/// Render pitches back to note names.
pub fn format_names(pitches: &[Pitch]) -> Vec<String> {
    pitches.iter().map(|p| p.to_string()).collect()
}
