//! Platform-specific configuration paths

use crate::error::{CliError, CliResult};
use std::path::{Path, PathBuf};

/// Environment variable overriding the configuration directory.
pub const CONFIG_DIR_ENV: &str = "GOVGATE_CONFIG_DIR";

/// Files the CLI keeps between runs
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Base configuration directory
    pub config_dir: PathBuf,
    /// Path to config.json
    pub config_file: PathBuf,
    /// Path to session.json (role and identity of the logged-in account)
    pub session_file: PathBuf,
    /// Path to credentials.enc (used when the OS keyring is unavailable)
    pub credentials_file: PathBuf,
}

impl ConfigPaths {
    /// Paths for the current platform
    ///
    /// - Linux: ~/.config/govgate/
    /// - macOS: ~/Library/Application Support/govgate/
    /// - Windows: %APPDATA%\govgate\
    pub fn new() -> CliResult<Self> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(Self::in_dir(dir));
        }

        let base_dir = dirs::config_dir().ok_or_else(|| {
            CliError::Config("Could not determine configuration directory".to_string())
        })?;

        Ok(Self::in_dir(base_dir.join("govgate")))
    }

    /// Paths rooted at an explicit directory.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let config_dir = dir.as_ref().to_path_buf();
        Self {
            config_file: config_dir.join("config.json"),
            session_file: config_dir.join("session.json"),
            credentials_file: config_dir.join("credentials.enc"),
            config_dir,
        }
    }

    /// Ensure the configuration directory exists
    pub fn ensure_dir_exists(&self) -> CliResult<()> {
        if !self.config_dir.exists() {
            std::fs::create_dir_all(&self.config_dir)?;
        }
        Ok(())
    }
}
