//! MIDI to WAV conversion through fluidsynth.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::info;

use crate::chord::ChordSource;
use crate::config::RenderConfig;
use crate::midi::{write_midi, MidiParams};
use crate::progression::ChordSpec;
use crate::render::ChordRenderer;
use crate::{Error, Result};

/// Synthesize a WAV from a MIDI file by invoking fluidsynth.
///
/// With no explicit output path the WAV lands next to the MIDI file with
/// the extension swapped. The soundfont comes from `config` and must
/// exist before the converter is spawned.
pub fn midi_to_wav(midi: &Path, wav: Option<&Path>, config: &RenderConfig) -> Result<PathBuf> {
    let soundfont = config.soundfont()?;
    let wav = match wav {
        Some(path) => path.to_path_buf(),
        None => midi.with_extension("wav"),
    };

    info!(
        midi = %midi.display(),
        wav = %wav.display(),
        soundfont = %soundfont.display(),
        "converting MIDI to WAV"
    );

    let status = Command::new("fluidsynth")
        .arg("-ni")
        .arg(&soundfont)
        .arg(midi)
        .arg("-F")
        .arg(&wav)
        .arg("-r")
        .arg(config.sample_rate.to_string())
        .status()
        .map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                Error::ConverterMissing
            } else {
                Error::Io(e)
            }
        })?;

    if !status.success() {
        return Err(Error::ConverterFailed { status });
    }

    Ok(wav)
}

/// Render a progression to `<name>.mid`, then convert it to `<name>.wav`.
///
/// The MIDI file is written first and left in place; the returned path is
/// the WAV.
pub fn progression_to_wav(
    specs: &[ChordSpec],
    name: &str,
    source: &dyn ChordSource,
    renderer: &dyn ChordRenderer,
    params: &MidiParams,
    config: &RenderConfig,
) -> Result<PathBuf> {
    let midi_path = PathBuf::from(format!("{}.mid", name));
    let wav_path = PathBuf::from(format!("{}.wav", name));

    write_midi(&midi_path, specs, source, renderer, params)?;
    midi_to_wav(&midi_path, Some(&wav_path), config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chord::TemplateChords;
    use crate::progression::default_progression;
    use crate::render::BlockChord;
    use crate::ConfigError;

    #[test]
    fn conversion_requires_a_soundfont() {
        let result = midi_to_wav(
            Path::new("whatever.mid"),
            None,
            &RenderConfig::default(),
        );
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::SoundfontUnset))
        ));
    }

    #[test]
    fn midi_lands_even_when_conversion_cannot_run() {
        let dir = tempfile::tempdir().unwrap();
        let name = dir.path().join("progression");
        let name = name.to_string_lossy();

        let result = progression_to_wav(
            &default_progression(),
            &name,
            &TemplateChords,
            &BlockChord,
            &MidiParams::default(),
            &RenderConfig::default(),
        );

        // No soundfont configured: the conversion fails, but the MIDI
        // file was already written.
        assert!(result.is_err());
        assert!(PathBuf::from(format!("{}.mid", name)).is_file());
    }

    #[test]
    fn soundfont_must_exist_before_the_converter_spawns() {
        let config = RenderConfig {
            soundfont: Some(PathBuf::from("/missing.sf2")),
            sample_rate: 44_100,
        };
        let result = midi_to_wav(Path::new("song.mid"), None, &config);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::SoundfontMissing(_)))
        ));
    }
}
