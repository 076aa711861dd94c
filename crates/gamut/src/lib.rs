//! Pitch names, scales, and scale-relative transposition.
//!
//! This crate models spelled pitches (`C4`, `F#3`, `Bb2`), builds scales
//! from a root name and a pluggable construction strategy, and shifts
//! melodic lines by scale steps rather than chromatic semitones.
//!
//! # Example
//!
//! ```
//! use gamut::transpose_names;
//!
//! let shifted = transpose_names(&["C4", "E4", "B3", "C4"], -2, "C").unwrap();
//! assert_eq!(shifted, vec!["A3", "C4", "G3", "A3"]);
//! ```

pub mod pitch;
pub mod scale;
pub mod transpose;

pub use pitch::{format_names, parse_names, Accidental, Letter, Pitch, PitchClass};
pub use scale::{
    HarmonicMinorScale, IntervalScale, MajorScale, Scale, ScaleBuilder, ScaleDegree,
};
pub use transpose::{
    transpose_name_tracks, transpose_name_tracks_in, transpose_names, transpose_names_in,
    transpose_track, transpose_tracks, Steps, Track,
};

/// Errors from pitch parsing, scale construction, and transposition.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid pitch name: {0:?}")]
    InvalidPitch(String),
    #[error("invalid scale root: {0:?}")]
    InvalidRoot(String),
    #[error("degree {degree} of the scale on {root} cannot be spelled within double accidentals")]
    UnspellableDegree { root: String, degree: usize },
    #[error("step sequence has {found} entries but tracks have {expected} positions")]
    StepCountMismatch { expected: usize, found: usize },
    #[error("scale has no degrees")]
    EmptyScale,
}

pub type Result<T> = std::result::Result<T, Error>;
