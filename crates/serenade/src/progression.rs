//! Chord progression descriptors.

use serde::{Deserialize, Serialize};

/// Default chord duration in ticks: two beats at the default 480 PPQ.
pub const DEFAULT_DURATION: u32 = 960;

/// One entry of a progression: a bare symbol takes the default duration,
/// a timed entry carries its own ticks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChordSpec {
    Symbol(String),
    Timed(String, u32),
}

impl ChordSpec {
    pub fn symbol(&self) -> &str {
        match self {
            ChordSpec::Symbol(symbol) => symbol,
            ChordSpec::Timed(symbol, _) => symbol,
        }
    }

    pub fn duration_or(&self, default: u32) -> u32 {
        match self {
            ChordSpec::Symbol(_) => default,
            ChordSpec::Timed(_, duration) => *duration,
        }
    }
}

impl From<&str> for ChordSpec {
    fn from(symbol: &str) -> Self {
        ChordSpec::Symbol(symbol.to_string())
    }
}

impl From<(&str, u32)> for ChordSpec {
    fn from((symbol, duration): (&str, u32)) -> Self {
        ChordSpec::Timed(symbol.to_string(), duration)
    }
}

/// The demo progression: a ii-V-I flavored cadence into C major.
pub fn default_progression() -> Vec<ChordSpec> {
    vec![
        ("Bdim", 120).into(),
        ("Em11", 120).into(),
        ("Amin9", 120).into(),
        ("Dm7", 120).into(),
        "G7".into(),
        "Cmaj7".into(),
    ]
}
