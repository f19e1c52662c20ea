use camino::{Utf8Path, Utf8PathBuf};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use super::schema::{ParseMode, parse_document};
use crate::models::ClassicYamlConfig;

/// Errors that can occur while loading a crash database
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("YAML configuration file not found: {path}")]
    NotFound { path: Utf8PathBuf },

    #[error("Failed to parse YAML configuration: {0}")]
    Parse(String),

    #[error("Failed to read YAML configuration {path}: {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration load was cancelled before it completed")]
    Cancelled,
}

impl ConfigError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConfigError::NotFound { .. })
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, ConfigError::Parse(_))
    }
}

impl From<serde_yaml_ng::Error> for ConfigError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// Where database text comes from.
///
/// The loader only ever asks whether a path exists and for its full text.
#[cfg_attr(test, mockall::automock)]
pub trait FileSource: Send + Sync {
    fn exists(&self, path: &Utf8Path) -> bool;
    fn read_to_string(&self, path: &Utf8Path) -> std::io::Result<String>;
}

/// [`FileSource`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileSource;

impl FileSource for StdFileSource {
    fn exists(&self, path: &Utf8Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Utf8Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// Loader for CLASSIC crash databases.
///
/// Stateless apart from its parse mode and file source: each call parses into
/// a fresh [`ClassicYamlConfig`], so one service can be shared freely between
/// threads and tasks.
///
/// # Load semantics
///
/// - Empty or whitespace-only text yields an empty config
/// - Unknown keys are dropped under [`ParseMode::Tolerant`] (the default)
/// - Malformed YAML, or a value of the wrong shape for its section, fails
///   the whole load with [`ConfigError::Parse`]
/// - Path loads fail with [`ConfigError::NotFound`] before any read if the
///   file does not exist
///
/// The `_async` variants run the same code on tokio's blocking pool.
pub struct YamlConfigService<F = StdFileSource> {
    mode: ParseMode,
    source: Arc<F>,
}

impl<F> Clone for YamlConfigService<F> {
    fn clone(&self) -> Self {
        Self {
            mode: self.mode,
            source: Arc::clone(&self.source),
        }
    }
}

impl<F> fmt::Debug for YamlConfigService<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YamlConfigService")
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

impl YamlConfigService<StdFileSource> {
    /// Create a tolerant service reading from the local file system
    pub fn new() -> Self {
        Self::with_source(StdFileSource)
    }
}

impl Default for YamlConfigService<StdFileSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FileSource> YamlConfigService<F> {
    pub fn with_source(source: F) -> Self {
        Self {
            mode: ParseMode::default(),
            source: Arc::new(source),
        }
    }

    /// Set how unknown keys are handled
    pub fn with_mode(mut self, mode: ParseMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> ParseMode {
        self.mode
    }

    /// Load the database at `path`.
    pub fn load_config<P: AsRef<Utf8Path>>(
        &self,
        path: P,
    ) -> Result<ClassicYamlConfig, ConfigError> {
        let path = path.as_ref();

        if !self.source.exists(path) {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let yaml = self
            .source
            .read_to_string(path)
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let config = self.load_config_from_str(&yaml)?;
        tracing::info!("Loaded crash database from {}", path);
        Ok(config)
    }

    /// Parse database text.
    pub fn load_config_from_str(&self, yaml: &str) -> Result<ClassicYamlConfig, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(ClassicYamlConfig::default());
        }

        let config = parse_document(yaml, self.mode)?;

        tracing::debug!(
            "Parsed crash database - error checks: {}, stack checks: {}, core mods: {}, \
             frequent mods: {}, hints: {}",
            config.crashlog_error_check.len(),
            config.crashlog_stack_check.len(),
            config.mods_core.len(),
            config.mods_freq.len(),
            config.game_hints.len()
        );

        Ok(config)
    }
}

impl<F: FileSource + 'static> YamlConfigService<F> {
    /// Async counterpart of [`load_config`](Self::load_config).
    pub async fn load_config_async<P: AsRef<Utf8Path>>(
        &self,
        path: P,
    ) -> Result<ClassicYamlConfig, ConfigError> {
        let service = self.clone();
        let path = path.as_ref().to_path_buf();
        run_blocking(move || service.load_config(&path)).await
    }

    /// Async counterpart of [`load_config_from_str`](Self::load_config_from_str).
    pub async fn load_config_from_str_async(
        &self,
        yaml: impl Into<String>,
    ) -> Result<ClassicYamlConfig, ConfigError> {
        let service = self.clone();
        let yaml = yaml.into();
        run_blocking(move || service.load_config_from_str(&yaml)).await
    }
}

/// Run a load on the blocking pool, re-raising panics on the awaiting task.
async fn run_blocking<W>(work: W) -> Result<ClassicYamlConfig, ConfigError>
where
    W: FnOnce() -> Result<ClassicYamlConfig, ConfigError> + Send + 'static,
{
    match tokio::task::spawn_blocking(work).await {
        Ok(result) => result,
        Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
        Err(_) => Err(ConfigError::Cancelled),
    }
}
