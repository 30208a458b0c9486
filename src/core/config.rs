//=========================================================================
// JSON Configuration
//=========================================================================
//
// Persistence for settings structs.
//
//   load(path)  → file missing or undecodable: Default + warning
//   save(path)  → creates parent directories, writes pretty JSON
//
// Fields missing from an older file fall back to their defaults when the
// implementing type carries `#[serde(default)]`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

//=== ConfigError =========================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot access config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    /// True when the file does not exist.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

//=== JsonConfig ==========================================================

/// A settings struct stored as a JSON file.
///
/// ```no_run
/// use serde::{Deserialize, Serialize};
/// use stagehand::core::config::JsonConfig;
///
/// #[derive(Default, Serialize, Deserialize)]
/// #[serde(default)]
/// struct Settings {
///     volume: u8,
///     fullscreen: bool,
/// }
///
/// impl JsonConfig for Settings {}
///
/// let mut settings = Settings::load("settings.json");
/// settings.volume = 80;
/// settings.save("settings.json").unwrap();
/// ```
pub trait JsonConfig: Serialize + DeserializeOwned + Default {
    /// Loads the file at `path`, falling back to the default value.
    fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(config) => config,
            Err(err) if err.is_missing() => {
                warn!(target: "config", "No config file at {:?}, using defaults", path);
                Self::default()
            }
            Err(err) => {
                warn!(target: "config", "{}, using defaults", err);
                Self::default()
            }
        }
    }

    /// Loads the file at `path`, reporting why it could not be read.
    fn try_load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!(target: "config", "Loading config file {:?}", path);

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Writes the value to `path` as pretty-printed JSON.
    fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let io_error = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(io_error)?;

        info!(target: "config", "Saved config file {:?}", path);
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::tempdir;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct Settings {
        volume: u8,
        name: String,
        fullscreen: bool,
    }

    impl JsonConfig for Settings {}

    fn sample() -> Settings {
        Settings {
            volume: 80,
            name: "player".to_string(),
            fullscreen: true,
        }
    }

    #[test]
    fn save_then_load_restores_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");

        sample().save(&path).unwrap();

        assert_eq!(Settings::load(&path), sample());
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("settings.json");

        sample().save(&path).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.json");

        assert_eq!(Settings::load(&path), Settings::default());
        assert!(Settings::try_load(&path).unwrap_err().is_missing());
    }

    #[test]
    fn undecodable_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        assert_eq!(Settings::load(&path), Settings::default());
        assert!(matches!(Settings::try_load(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn missing_fields_keep_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("partial.json");
        fs::write(&path, r#"{ "volume": 30 }"#).unwrap();

        let settings = Settings::load(&path);

        assert_eq!(settings.volume, 30);
        assert_eq!(settings.name, "");
        assert!(!settings.fullscreen);
    }

    #[test]
    fn saved_json_is_pretty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");

        sample().save(&path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n  \"volume\": 80"));
    }
}
