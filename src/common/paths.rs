//! Platform configuration and data paths
//!
//! Uses the directories crate for platform-appropriate locations:
//! - Linux: `~/.config/uat-wizard/` and `~/.local/share/uat-wizard/`
//! - macOS: `~/Library/Application Support/uat-wizard/`
//! - Windows: `%APPDATA%\uat-wizard\`

use std::io;
use std::path::{Path, PathBuf};

/// Application name used for every directory lookup
const APP_NAME: &str = "uat-wizard";

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", APP_NAME)
}

/// Get the configuration directory path
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the configuration file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the data directory path
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

/// Get the path to the log directory
pub fn log_dir() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("logs"))
}

/// Default directory for saved reports
pub fn reports_dir() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("reports"))
}

/// Path of the remembered-user profile
pub fn profile_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("profile.toml"))
}

/// Ensure a directory exists, creating parents as needed
pub fn ensure_dir(dir: &Path) -> io::Result<()> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}
