//! Scale construction and scale-degree arithmetic.
//!
//! A [`Scale`] is an ordered, octave-repeating sequence of spelled
//! degrees anchored to a root pitch class. Construction is a pluggable
//! strategy ([`ScaleBuilder`]): major by default, harmonic minor and
//! interval-defined custom scales included.
//!
//! Seven-degree scales are spelled one letter per degree, so Db major
//! comes out `Db Eb F Gb Ab Bb C` and A harmonic minor ends on `G#`.
//! Other sizes fall back to chromatic spelling.

use serde::{Deserialize, Serialize};

use crate::pitch::{Accidental, Letter, Pitch, PitchClass};
use crate::{Error, Result};

/// Semitone steps of the major scale.
const MAJOR_INTERVALS: [u8; 7] = [0, 2, 4, 5, 7, 9, 11];

/// Semitone steps of the harmonic minor scale.
const HARMONIC_MINOR_INTERVALS: [u8; 7] = [0, 2, 3, 5, 7, 8, 11];

/// Pitch classes conventionally spelled with flats.
const FLAT_ROOTS: [u8; 6] = [1, 3, 5, 6, 8, 10];

/// One degree of a constructed scale: its spelling and its semitone
/// offset above the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleDegree {
    pub letter: Letter,
    pub accidental: Option<Accidental>,
    /// Semitones above the root within one cycle.
    pub offset: u8,
}

impl ScaleDegree {
    pub fn class(&self) -> PitchClass {
        PitchClass::new(self.letter, self.accidental)
    }
}

/// An ordered, octave-repeating scale anchored to a spelled root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    root: PitchClass,
    degrees: Vec<ScaleDegree>,
}

/// Strategy for building a [`Scale`] from a root pitch class.
pub trait ScaleBuilder: Send + Sync {
    fn build(&self, root: PitchClass) -> Result<Scale>;
}

/// The default scale construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct MajorScale;

impl ScaleBuilder for MajorScale {
    fn build(&self, root: PitchClass) -> Result<Scale> {
        Scale::diatonic(root, &MAJOR_INTERVALS)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HarmonicMinorScale;

impl ScaleBuilder for HarmonicMinorScale {
    fn build(&self, root: PitchClass) -> Result<Scale> {
        Scale::diatonic(root, &HARMONIC_MINOR_INTERVALS)
    }
}

/// A custom scale defined by its semitone intervals from the root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntervalScale {
    name: String,
    intervals: Vec<u8>,
}

impl IntervalScale {
    pub fn new(name: impl Into<String>, intervals: Vec<u8>) -> Self {
        IntervalScale {
            name: name.into(),
            intervals,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl ScaleBuilder for IntervalScale {
    fn build(&self, root: PitchClass) -> Result<Scale> {
        if self.intervals.is_empty() {
            return Err(Error::EmptyScale);
        }
        if self.intervals.len() == 7 {
            let mut intervals = [0u8; 7];
            intervals.copy_from_slice(&self.intervals);
            // Odd interval sets may not admit a one-letter-per-degree
            // spelling; fall back to chromatic spelling when they don't.
            match Scale::diatonic(root, &intervals) {
                Ok(scale) => return Ok(scale),
                Err(Error::UnspellableDegree { .. }) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(Scale::chromatic(root, &self.intervals))
    }
}

impl Scale {
    /// Build a seven-degree scale with one letter per degree.
    fn diatonic(root: PitchClass, intervals: &[u8; 7]) -> Result<Scale> {
        let root_pc = root.semitone();
        let mut degrees = Vec::with_capacity(7);

        for (i, &interval) in intervals.iter().enumerate() {
            let letter = root.letter.cycle(i);
            let target = (root_pc + interval % 12) % 12;

            // Smallest signed alteration that lands the letter on the target.
            let mut alteration = target as i8 - letter.semitone();
            if alteration > 6 {
                alteration -= 12;
            }
            if alteration < -6 {
                alteration += 12;
            }

            let accidental =
                spell_alteration(alteration).ok_or_else(|| Error::UnspellableDegree {
                    root: root.to_string(),
                    degree: i + 1,
                })?;

            degrees.push(ScaleDegree {
                letter,
                accidental,
                offset: interval,
            });
        }

        Ok(Scale { root, degrees })
    }

    /// Chromatic spelling for scales that are not seven degrees: sharps
    /// by default, flats for flat-side roots.
    fn chromatic(root: PitchClass, intervals: &[u8]) -> Scale {
        let root_pc = root.semitone();
        let flats = FLAT_ROOTS.contains(&root_pc)
            || matches!(
                root.accidental,
                Some(Accidental::Flat) | Some(Accidental::DoubleFlat)
            );

        let degrees = intervals
            .iter()
            .map(|&interval| {
                let (letter, accidental) = spell_semitone((root_pc + interval % 12) % 12, flats);
                ScaleDegree {
                    letter,
                    accidental,
                    offset: interval,
                }
            })
            .collect();

        Scale { root, degrees }
    }

    pub fn root(&self) -> &PitchClass {
        &self.root
    }

    pub fn degrees(&self) -> &[ScaleDegree] {
        &self.degrees
    }

    pub fn len(&self) -> usize {
        self.degrees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.degrees.is_empty()
    }

    /// Index of the degree matching a pitch class, by enharmonic identity.
    pub fn degree_of(&self, class: &PitchClass) -> Option<usize> {
        let rel = (class.semitone() as i8 - self.root.semitone() as i8).rem_euclid(12) as u8;
        self.degrees.iter().position(|d| d.offset % 12 == rel)
    }

    /// Nearest degree for an out-of-scale offset, with the signed semitone
    /// correction that snaps onto it. Ties resolve to the lower degree.
    fn nearest(&self, rel: u8) -> (usize, i8) {
        let mut best_index = 0;
        let mut best_correction = i8::MAX;
        let mut best_distance = u8::MAX;

        for (i, degree) in self.degrees.iter().enumerate() {
            let offset = (degree.offset % 12) as i8;
            for candidate in [offset - 12, offset, offset + 12] {
                let correction = candidate - rel as i8;
                let distance = correction.unsigned_abs();
                if distance < best_distance
                    || (distance == best_distance && correction < best_correction)
                {
                    best_distance = distance;
                    best_correction = correction;
                    best_index = i;
                }
            }
        }

        (best_index, best_correction)
    }

    /// Shift a pitch by the given number of scale steps.
    ///
    /// The pitch's degree is located enharmonically (out-of-scale input
    /// snaps to the nearest degree first), the step count is added with
    /// octave carry for full-cycle multiples, and the result is re-spelled
    /// from the target degree.
    pub fn transpose(&self, pitch: &Pitch, steps: i32) -> Result<Pitch> {
        if self.degrees.is_empty() {
            return Err(Error::EmptyScale);
        }

        let midi = pitch.midi();
        let rel = (midi - self.root.semitone() as i16).rem_euclid(12) as u8;

        let (index, snapped_midi) = match self.degrees.iter().position(|d| d.offset % 12 == rel) {
            Some(i) => (i, midi),
            None => {
                let (i, correction) = self.nearest(rel);
                (i, midi + correction as i16)
            }
        };

        let cycle_root = snapped_midi - self.degrees[index].offset as i16;

        let len = self.degrees.len() as i64;
        let shifted = index as i64 + steps as i64;
        let target_index = shifted.rem_euclid(len) as usize;
        let carry = shifted.div_euclid(len) as i16;

        let degree = &self.degrees[target_index];
        let target = cycle_root + carry * 12 + degree.offset as i16;

        // The octave digit follows the letter in scientific notation, so
        // derive it from the target semitone and the degree's spelling.
        let alteration = degree.accidental.map(|a| a.semitone_offset()).unwrap_or(0);
        let octave = ((target - degree.letter.semitone() as i16 - alteration as i16) / 12 - 1) as i8;

        Ok(Pitch {
            class: degree.class(),
            octave,
        })
    }
}

/// Accidental for a signed alteration, `None` inside for naturals.
fn spell_alteration(alteration: i8) -> Option<Option<Accidental>> {
    match alteration {
        -2 => Some(Some(Accidental::DoubleFlat)),
        -1 => Some(Some(Accidental::Flat)),
        0 => Some(None),
        1 => Some(Some(Accidental::Sharp)),
        2 => Some(Some(Accidental::DoubleSharp)),
        _ => None,
    }
}

/// Spell a chromatic pitch class with single accidentals.
fn spell_semitone(pc: u8, flats: bool) -> (Letter, Option<Accidental>) {
    match pc % 12 {
        0 => (Letter::C, None),
        1 if flats => (Letter::D, Some(Accidental::Flat)),
        1 => (Letter::C, Some(Accidental::Sharp)),
        2 => (Letter::D, None),
        3 if flats => (Letter::E, Some(Accidental::Flat)),
        3 => (Letter::D, Some(Accidental::Sharp)),
        4 => (Letter::E, None),
        5 => (Letter::F, None),
        6 if flats => (Letter::G, Some(Accidental::Flat)),
        6 => (Letter::F, Some(Accidental::Sharp)),
        7 => (Letter::G, None),
        8 if flats => (Letter::A, Some(Accidental::Flat)),
        8 => (Letter::G, Some(Accidental::Sharp)),
        9 => (Letter::A, None),
        10 if flats => (Letter::B, Some(Accidental::Flat)),
        10 => (Letter::A, Some(Accidental::Sharp)),
        _ => (Letter::B, None),
    }
}
