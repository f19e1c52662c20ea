//! Tool settings.
//!
//! Sources, lowest to highest precedence:
//! 1. Built-in defaults
//! 2. `CLASSIC Settings.yaml` in the current working directory (optional)
//! 3. `CLASSIC_*` environment variables (e.g. `CLASSIC_DATA_DIR`, `CLASSIC_DEBUG`)

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::services::ParseMode;

/// Default settings file name (extension resolved by the `config` crate)
pub const SETTINGS_FILE: &str = "CLASSIC Settings";

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "CLASSIC";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppSettings {
    /// Directory holding the `databases` folder
    pub data_dir: Utf8PathBuf,
    pub log_dir: Utf8PathBuf,
    pub log_prefix: String,
    pub debug: bool,
    /// Reject unknown database keys instead of ignoring them
    pub strict: bool,
    /// Game whose database is loaded when none is named
    pub game: String,
}

impl AppSettings {
    /// Load settings from `CLASSIC Settings.*` in the current working
    /// directory and the environment.
    pub fn load() -> Result<Self> {
        Self::load_from(SETTINGS_FILE)
    }

    /// Load settings from `path` (missing file is fine) and the environment.
    ///
    /// A relative `path` resolves against the current working directory.
    pub fn load_from(path: &str) -> Result<Self> {
        let settings = Config::builder()
            .set_default("data_dir", "CLASSIC Data")?
            .set_default("log_dir", "logs")?
            .set_default("log_prefix", "classic")?
            .set_default("debug", false)?
            .set_default("strict", false)?
            .set_default("game", "Fallout4")?
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .with_context(|| format!("Failed to read settings from {}", path))?;

        settings
            .try_deserialize()
            .with_context(|| format!("Invalid settings in {}", path))
    }

    pub fn parse_mode(&self) -> ParseMode {
        if self.strict {
            ParseMode::Strict
        } else {
            ParseMode::Tolerant
        }
    }
}
