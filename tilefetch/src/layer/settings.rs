//! Persisted layer configuration document.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reading or writing a layer document.
#[derive(Debug, Error)]
pub enum LayerConfigError {
    #[error("invalid layer document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to access layer file {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
}

/// JSON form of a remote layer: `{"url": "<template>"}`.
///
/// Unknown keys are ignored on load so documents written by richer clients
/// still parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerSettings {
    pub url: String,
}

impl LayerSettings {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn from_json(json: &str) -> Result<Self, LayerConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, LayerConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self, LayerConfigError> {
        let json = fs::read_to_string(path).map_err(|source| LayerConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn save(&self, path: &Path) -> Result<(), LayerConfigError> {
        let io_err = |source: io::Error| LayerConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, self.to_json()?).map_err(io_err)
    }
}
