//! Optional `snapward.toml` project settings for the command line tool.
//!
//! ```toml
//! [metadata]
//! version = 1
//!
//! [snapshots]
//! dir = "tests/testdata/snapshots"
//! normalization = "raw"
//! ```

use crate::location::DEFAULT_SUBDIR;
use crate::normalize::Normalization;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const SETTINGS_FILENAME: &str = "snapward.toml";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(std::io::Error),
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Unsupported settings version: {0}")]
    UnsupportedVersion(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
struct Metadata {
    version: u32,
}

/// Only the metadata section; everything else is ignored so that a file
/// from a newer version is rejected for its version, not its contents.
#[derive(Debug, Deserialize)]
struct MetadataOnly {
    metadata: Metadata,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnapshotSettings {
    pub dir: Option<PathBuf>,
    pub normalization: Option<Normalization>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    metadata: Metadata,
    #[serde(default)]
    pub snapshots: SnapshotSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            metadata: Metadata {
                version: Self::SUPPORTED_VERSION,
            },
            snapshots: SnapshotSettings::default(),
        }
    }
}

impl Settings {
    const SUPPORTED_VERSION: u32 = 1;

    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let metadata_only: MetadataOnly = toml::from_str(content)?;

        if metadata_only.metadata.version != Self::SUPPORTED_VERSION {
            return Err(SettingsError::UnsupportedVersion(
                metadata_only.metadata.version,
            ));
        }

        Ok(toml::from_str(content)?)
    }

    /// Load `snapward.toml` from `dir`, falling back to defaults when the
    /// file does not exist.
    pub fn load_from_dir(dir: &Path) -> Result<Self, SettingsError> {
        let path = dir.join(SETTINGS_FILENAME);
        match std::fs::read_to_string(&path) {
            Ok(content) => Self::from_toml(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                Err(SettingsError::PermissionDenied(path))
            }
            Err(e) => Err(SettingsError::Io(e)),
        }
    }

    /// Baseline directory: the override if given, then the settings file,
    /// then `testdata/snapshots`.
    pub fn snapshot_dir(&self, cli_override: Option<&Path>) -> PathBuf {
        cli_override
            .map(Path::to_path_buf)
            .or_else(|| self.snapshots.dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SUBDIR))
    }

    /// Normalization: the override if given, then the settings file, then
    /// visual.
    pub fn normalization(&self, cli_override: Option<Normalization>) -> Normalization {
        cli_override
            .or(self.snapshots.normalization)
            .unwrap_or_default()
    }
}
