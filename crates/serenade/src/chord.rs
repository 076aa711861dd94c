//! Chord symbols and their resolution to notes.
//!
//! A symbol is a root name (letter plus optional `#`/`b`) followed by a
//! quality/extension suffix looked up in a static template table. The
//! canonical suffixes use `maj`/`min`/`dim`; `M`, `m`, and `°` are
//! accepted as aliases.

use gamut::PitchClass;

use crate::{Error, Result};

/// A chord quality or extension: its canonical suffix and the semitone
/// intervals from the root.
pub struct ChordTemplate {
    pub suffix: &'static str,
    pub intervals: &'static [u8],
}

/// All recognized qualities and extensions, canonical spellings.
pub static TEMPLATES: &[ChordTemplate] = &[
    // Triads; the bare root is a major triad
    ChordTemplate { suffix: "", intervals: &[0, 4, 7] },
    ChordTemplate { suffix: "maj", intervals: &[0, 4, 7] },
    ChordTemplate { suffix: "min", intervals: &[0, 3, 7] },
    ChordTemplate { suffix: "dim", intervals: &[0, 3, 6] },
    ChordTemplate { suffix: "aug", intervals: &[0, 4, 8] },
    // Sixths and sevenths
    ChordTemplate { suffix: "6", intervals: &[0, 4, 7, 9] },
    ChordTemplate { suffix: "min6", intervals: &[0, 3, 7, 9] },
    ChordTemplate { suffix: "7", intervals: &[0, 4, 7, 10] },
    ChordTemplate { suffix: "maj7", intervals: &[0, 4, 7, 11] },
    ChordTemplate { suffix: "min7", intervals: &[0, 3, 7, 10] },
    ChordTemplate { suffix: "minmaj7", intervals: &[0, 3, 7, 11] },
    ChordTemplate { suffix: "dim7", intervals: &[0, 3, 6, 9] },
    ChordTemplate { suffix: "hdim7", intervals: &[0, 3, 6, 10] },
    ChordTemplate { suffix: "aug7", intervals: &[0, 4, 8, 10] },
    // Extensions
    ChordTemplate { suffix: "9", intervals: &[0, 4, 7, 10, 14] },
    ChordTemplate { suffix: "maj9", intervals: &[0, 4, 7, 11, 14] },
    ChordTemplate { suffix: "min9", intervals: &[0, 3, 7, 10, 14] },
    ChordTemplate { suffix: "11", intervals: &[0, 4, 7, 10, 14, 17] },
    ChordTemplate { suffix: "maj11", intervals: &[0, 4, 7, 11, 14, 17] },
    ChordTemplate { suffix: "min11", intervals: &[0, 3, 7, 10, 14, 17] },
    ChordTemplate { suffix: "13", intervals: &[0, 4, 7, 10, 14, 17, 21] },
    ChordTemplate { suffix: "maj13", intervals: &[0, 4, 7, 11, 14, 17, 21] },
    ChordTemplate { suffix: "min13", intervals: &[0, 3, 7, 10, 14, 17, 21] },
];

/// Resolve a quality suffix, expanding the `M`/`m`/`°` aliases.
fn lookup_suffix(suffix: &str) -> Option<&'static [u8]> {
    if let Some(template) = TEMPLATES.iter().find(|t| t.suffix == suffix) {
        return Some(template.intervals);
    }

    let canonical = if let Some(rest) = suffix.strip_prefix('M') {
        format!("maj{}", rest)
    } else if let Some(rest) = suffix.strip_prefix('m') {
        format!("min{}", rest)
    } else if let Some(rest) = suffix.strip_prefix('°') {
        format!("dim{}", rest)
    } else {
        return None;
    };

    TEMPLATES
        .iter()
        .find(|t| t.suffix == canonical)
        .map(|t| t.intervals)
}

/// Split a chord symbol into its root pitch class and quality intervals.
pub fn parse_chord(symbol: &str) -> Result<(PitchClass, &'static [u8])> {
    let first = symbol.chars().next().ok_or_else(|| Error::UnknownRoot {
        symbol: symbol.to_string(),
    })?;
    if !first.is_ascii_alphabetic() {
        return Err(Error::UnknownRoot {
            symbol: symbol.to_string(),
        });
    }

    // Root is the leading letter plus at most one accidental.
    let rest = &symbol[1..];
    let root_len = if rest.starts_with('#') || rest.starts_with('b') {
        2
    } else {
        1
    };
    let (root_str, suffix) = symbol.split_at(root_len);

    let root = PitchClass::parse(root_str).ok_or_else(|| Error::UnknownRoot {
        symbol: symbol.to_string(),
    })?;

    let intervals = lookup_suffix(suffix).ok_or_else(|| Error::UnknownQuality {
        symbol: symbol.to_string(),
        quality: suffix.to_string(),
    })?;

    Ok((root, intervals))
}

/// Resolves a chord symbol to the MIDI notes that voice it.
pub trait ChordSource: Send + Sync {
    fn notes(&self, symbol: &str) -> Result<Vec<u8>>;
}

/// The default voicing: roots anchored in octave 4 (C = 60), template
/// intervals stacked above.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateChords;

impl ChordSource for TemplateChords {
    fn notes(&self, symbol: &str) -> Result<Vec<u8>> {
        let (root, intervals) = parse_chord(symbol)?;
        let root_midi = 60 + root.semitone() as i16;
        Ok(intervals
            .iter()
            .map(|&i| (root_midi + i as i16).clamp(0, 127) as u8)
            .collect())
    }
}
