//! Rendering configuration.
//!
//! Values load in order (later wins):
//! 1. Compiled defaults
//! 2. `~/.config/serenade/config.toml`
//! 3. `./serenade.toml`
//! 4. Environment variables (`SERENADE_SOUNDFONT`, `SERENADE_SAMPLE_RATE`)

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("no soundfont configured; set SERENADE_SOUNDFONT or the soundfont key in serenade.toml")]
    SoundfontUnset,

    #[error("soundfont not found at {0}")]
    SoundfontMissing(PathBuf),
}

/// Where the soundfont lives and how fluidsynth should sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Path to the SoundFont (.sf2) used for WAV synthesis.
    #[serde(default)]
    pub soundfont: Option<PathBuf>,

    /// Output sample rate in Hz.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
}

fn default_sample_rate() -> u32 {
    44_100
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            soundfont: None,
            sample_rate: default_sample_rate(),
        }
    }
}

impl RenderConfig {
    /// Load configuration from all sources.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = RenderConfig::default();
        for path in discover_config_files() {
            config = merge(config, load_from_file(&path)?);
        }
        apply_env_overrides(&mut config);
        Ok(config)
    }

    /// Load from a specific file, then apply environment overrides.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut config = merge(RenderConfig::default(), load_from_file(path)?);
        apply_env_overrides(&mut config);
        Ok(config)
    }

    /// The configured soundfont, verified to exist on disk.
    pub fn soundfont(&self) -> Result<PathBuf, ConfigError> {
        let path = self.soundfont.clone().ok_or(ConfigError::SoundfontUnset)?;
        if !path.is_file() {
            return Err(ConfigError::SoundfontMissing(path));
        }
        Ok(path)
    }
}

/// Discover config files in standard locations, in load order. Only
/// returns files that exist.
fn discover_config_files() -> Vec<PathBuf> {
    let mut files = Vec::new();

    if let Some(base) = directories::BaseDirs::new() {
        let user = base.config_dir().join("serenade/config.toml");
        if user.exists() {
            files.push(user);
        }
    }

    let local = PathBuf::from("serenade.toml");
    if local.exists() {
        files.push(local);
    }

    files
}

fn load_from_file(path: &Path) -> Result<RenderConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut config: RenderConfig =
        toml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    if let Some(soundfont) = config.soundfont.take() {
        config.soundfont = Some(expand_path(&soundfont.to_string_lossy()));
    }

    Ok(config)
}

/// Merge two configs, with `overlay` taking precedence.
fn merge(base: RenderConfig, overlay: RenderConfig) -> RenderConfig {
    RenderConfig {
        soundfont: overlay.soundfont.or(base.soundfont),
        sample_rate: if overlay.sample_rate != default_sample_rate() {
            overlay.sample_rate
        } else {
            base.sample_rate
        },
    }
}

fn apply_env_overrides(config: &mut RenderConfig) {
    if let Ok(v) = env::var("SERENADE_SOUNDFONT") {
        config.soundfont = Some(expand_path(&v));
    }
    if let Ok(v) = env::var("SERENADE_SAMPLE_RATE") {
        if let Ok(rate) = v.parse() {
            config.sample_rate = rate;
        }
    }
}

/// Expand a leading `~` in a path.
fn expand_path(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf()) {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.soundfont, None);
        assert_eq!(config.sample_rate, 44_100);
    }

    #[test]
    fn parse_full_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "soundfont = \"/sf2/general.sf2\"").unwrap();
        writeln!(file, "sample_rate = 48000").unwrap();

        let config = load_from_file(file.path()).unwrap();
        assert_eq!(config.soundfont, Some(PathBuf::from("/sf2/general.sf2")));
        assert_eq!(config.sample_rate, 48_000);
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "soundfont = \"/sf2/general.sf2\"").unwrap();

        let config = load_from_file(file.path()).unwrap();
        assert_eq!(config.sample_rate, 44_100);
    }

    #[test]
    fn parse_error_names_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "soundfont = [not toml").unwrap();

        let err = load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn overlay_wins_in_merge() {
        let base = RenderConfig {
            soundfont: Some(PathBuf::from("/base.sf2")),
            sample_rate: 22_050,
        };
        let overlay = RenderConfig {
            soundfont: Some(PathBuf::from("/overlay.sf2")),
            sample_rate: default_sample_rate(),
        };

        let merged = merge(base, overlay);
        assert_eq!(merged.soundfont, Some(PathBuf::from("/overlay.sf2")));
        // Overlay left the sample rate at its default, so the base value holds.
        assert_eq!(merged.sample_rate, 22_050);
    }

    #[test]
    fn unset_soundfont_is_an_error() {
        let config = RenderConfig::default();
        assert!(matches!(
            config.soundfont(),
            Err(ConfigError::SoundfontUnset)
        ));
    }

    #[test]
    fn missing_soundfont_file_is_an_error() {
        let config = RenderConfig {
            soundfont: Some(PathBuf::from("/definitely/not/here.sf2")),
            sample_rate: 44_100,
        };
        assert!(matches!(
            config.soundfont(),
            Err(ConfigError::SoundfontMissing(_))
        ));
    }

    #[test]
    fn env_overrides_beat_files() {
        let mut config = RenderConfig {
            soundfont: Some(PathBuf::from("/from-file.sf2")),
            sample_rate: 44_100,
        };

        env::set_var("SERENADE_SOUNDFONT", "/from-env.sf2");
        env::set_var("SERENADE_SAMPLE_RATE", "48000");
        apply_env_overrides(&mut config);
        env::remove_var("SERENADE_SOUNDFONT");
        env::remove_var("SERENADE_SAMPLE_RATE");

        assert_eq!(config.soundfont, Some(PathBuf::from("/from-env.sf2")));
        assert_eq!(config.sample_rate, 48_000);
    }

    #[test]
    fn tilde_paths_expand() {
        let expanded = expand_path("~/sf2/general.sf2");
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("sf2/general.sf2"));
    }
}
