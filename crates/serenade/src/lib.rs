//! Chord progressions rendered to MIDI files and WAV audio.
//!
//! A progression is an ordered sequence of chord descriptors, each a bare
//! symbol (`"G7"`) or a symbol with a duration in ticks. Symbols resolve
//! to notes through a pluggable [`ChordSource`], each chord is laid out in
//! time by a pluggable [`ChordRenderer`], and the result is written as a
//! Standard MIDI File and, optionally, synthesized to WAV by the external
//! `fluidsynth` converter.
//!
//! # Example
//!
//! ```no_run
//! use serenade::{
//!     default_progression, progression_to_wav, BlockChord, MidiParams, RenderConfig,
//!     TemplateChords,
//! };
//!
//! let config = RenderConfig::load()?;
//! let wav = progression_to_wav(
//!     &default_progression(),
//!     "demo",
//!     &TemplateChords,
//!     &BlockChord,
//!     &MidiParams::default(),
//!     &config,
//! )?;
//! println!("{}", wav.display());
//! # Ok::<(), serenade::Error>(())
//! ```

pub mod chord;
pub mod config;
pub mod midi;
pub mod progression;
pub mod render;
pub mod wav;

pub use chord::{parse_chord, ChordSource, TemplateChords};
pub use config::{ConfigError, RenderConfig};
pub use midi::{progression_to_midi, write_midi, MidiParams};
pub use progression::{default_progression, ChordSpec, DEFAULT_DURATION};
pub use render::{Arpeggio, BlockChord, ChordRenderer, EventBuffer, RendererRegistry};
pub use wav::{midi_to_wav, progression_to_wav};

/// Errors from chord parsing, rendering, and conversion.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown chord root in {symbol:?}")]
    UnknownRoot { symbol: String },
    #[error("unknown chord quality {quality:?} in {symbol:?}")]
    UnknownQuality { symbol: String, quality: String },
    #[error("unknown chord renderer {0:?}")]
    UnknownRenderer(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("fluidsynth not found on PATH")]
    ConverterMissing,
    #[error("fluidsynth exited with {status}")]
    ConverterFailed { status: std::process::ExitStatus },
    #[error(transparent)]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
