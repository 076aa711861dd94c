//! Render a chord progression to MIDI and WAV.
//!
//! Usage: cargo run --example render_progression -- [name]
//!
//! Writes `<name>.mid` and `<name>.wav` (default name: "progression").
//! Requires fluidsynth on PATH and a configured soundfont, e.g.
//! `SERENADE_SOUNDFONT=~/sf2/general.sf2`.

use serenade::{
    default_progression, progression_to_wav, BlockChord, MidiParams, RenderConfig, TemplateChords,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let name = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "progression".to_string());

    let config = RenderConfig::load()?;
    let wav = progression_to_wav(
        &default_progression(),
        &name,
        &TemplateChords,
        &BlockChord,
        &MidiParams::default(),
        &config,
    )?;

    println!("wrote {}", wav.display());
    Ok(())
}
