//! Settings file loading.
//!
//! Settings live in `settings.toml` in the platform config folder:
//! - macOS: ~/Library/Application Support/io.qtsel.qtsel/
//! - Windows: %APPDATA%/qtsel/qtsel/config/
//! - Linux: ~/.config/qtsel/
//!
//! Command-line flags override whatever the file says.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use qtsel_output::RenderConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const APP_QUALIFIER: &str = "io";
const APP_ORG: &str = "qtsel";
const APP_NAME: &str = "qtsel";
const CONFIG_FILENAME: &str = "settings.toml";

/// Where metadata documents come from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataSettings {
    /// Root of the on-disk metadata cache.
    pub cache_dir: Option<PathBuf>,
    /// Mirror the cache was populated from, shown in diagnostics.
    pub base_url: Option<String>,
}

/// Everything the settings file may configure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub metadata: MetadataSettings,
    pub render: RenderConfig,
}

/// A settings file that exists but cannot be used.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse settings file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Path of the default settings file, if the platform has a config folder.
pub fn settings_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Default root of the metadata cache.
pub fn default_cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().join("metadata"))
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
}

impl Settings {
    /// Parse settings from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load settings from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml(&text).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Load from an explicit path, or from the default location when it exists.
    ///
    /// An explicit path must exist; a missing default file yields defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, SettingsError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match settings_path() {
            Some(path) if path.is_file() => Self::load(&path),
            Some(path) => {
                tracing::debug!(path = %path.display(), "no settings file, using defaults");
                Ok(Self::default())
            }
            None => {
                tracing::warn!("Could not determine settings path, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// The cache root: the explicit override, then the file, then the platform default.
    #[must_use]
    pub fn cache_dir(&self, explicit: Option<&Path>) -> Option<PathBuf> {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| self.metadata.cache_dir.clone())
            .or_else(default_cache_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qtsel_model::Host;

    #[test]
    fn test_empty_file_is_default() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_sections() {
        let settings = Settings::from_toml(
            r#"
            [metadata]
            cache_dir = "/var/cache/qt-meta"

            [render]
            aqt_program = "python -m aqt"
            "#,
        )
        .unwrap();
        assert_eq!(
            settings.metadata.cache_dir.as_deref(),
            Some(Path::new("/var/cache/qt-meta"))
        );
        assert_eq!(settings.metadata.base_url, None);
        assert_eq!(settings.render.aqt_program, "python -m aqt");
        assert_eq!(settings.render.action_repository, "jurplel/install-qt-action");
        assert_eq!(
            settings.render.unified_installer(Host::Linux),
            "qt-unified-linux-x64-online.run"
        );
    }

    #[test]
    fn test_explicit_cache_dir_wins() {
        let settings = Settings {
            metadata: MetadataSettings {
                cache_dir: Some(PathBuf::from("/from/file")),
                base_url: None,
            },
            ..Settings::default()
        };
        assert_eq!(
            settings.cache_dir(Some(Path::new("/from/flag"))),
            Some(PathBuf::from("/from/flag"))
        );
        assert_eq!(settings.cache_dir(None), Some(PathBuf::from("/from/file")));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = Settings::resolve(Some(Path::new("/nonexistent/qtsel/settings.toml")))
            .unwrap_err();
        assert!(matches!(err, SettingsError::Read { .. }));
    }

    #[test]
    fn test_default_settings_serializable() {
        let text = toml::to_string_pretty(&Settings::default()).unwrap();
        let parsed = Settings::from_toml(&text).unwrap();
        assert_eq!(parsed, Settings::default());
    }
}
