//! Remembered user profile
//!
//! A tiny key-value file that keeps the last entered username across
//! sessions so the wizard only asks for it once.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::common::{paths, Error, Result};

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// File-backed profile storage
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the platform data directory
    pub fn open_default() -> Option<Self> {
        paths::profile_path().map(Self::new)
    }

    /// Load the profile; a missing file is an empty profile
    pub fn load(&self) -> Result<Profile> {
        if !self.path.exists() {
            return Ok(Profile::default());
        }
        let content = std::fs::read_to_string(&self.path).map_err(|e| Error::FileRead {
            path: self.path.display().to_string(),
            error: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| Error::ConfigParse(e.to_string()))
    }

    fn save(&self, profile: &Profile) -> Result<()> {
        let content =
            toml::to_string(profile).map_err(|e| Error::Internal(e.to_string()))?;
        if let Some(dir) = self.path.parent() {
            paths::ensure_dir(dir)?;
        }
        std::fs::write(&self.path, content).map_err(|e| Error::FileWrite {
            path: self.path.display().to_string(),
            error: e.to_string(),
        })
    }

    pub fn remembered_username(&self) -> Result<Option<String>> {
        Ok(self.load()?.username)
    }

    pub fn remember_username(&self, username: &str) -> Result<()> {
        let username = username.trim();
        if username.is_empty() {
            return Ok(());
        }
        let mut profile = self.load()?;
        profile.username = Some(username.to_string());
        self.save(&profile)?;
        tracing::debug!(path = %self.path.display(), "Username remembered");
        Ok(())
    }

    pub fn forget_username(&self) -> Result<()> {
        let mut profile = self.load()?;
        profile.username = None;
        self.save(&profile)
    }
}
