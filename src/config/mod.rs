use crate::models::ClassicYamlConfig;
use crate::services::YamlConfigService;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};

/// Folder under the data directory holding the per-game databases
pub const DATABASES_DIR: &str = "databases";

/// Configuration manager for the CLASSIC data directory.
///
/// Resolves and loads the per-game crash databases:
/// - `CLASSIC Data/databases/CLASSIC Fallout4.yaml`
/// - `CLASSIC Data/databases/CLASSIC Skyrim.yaml`
/// - ...
#[derive(Debug, Clone)]
pub struct ConfigManager {
    data_dir: Utf8PathBuf,
    databases_dir: Utf8PathBuf,
    loader: YamlConfigService,
}

impl ConfigManager {
    /// Create a new ConfigManager over the specified data directory.
    ///
    /// # Arguments
    /// * `data_dir` - Directory containing the `databases` folder (e.g., "CLASSIC Data")
    pub fn new<P: AsRef<Utf8Path>>(data_dir: P) -> Self {
        Self::with_loader(data_dir, YamlConfigService::new())
    }

    /// Create a ConfigManager that loads through a preconfigured service
    pub fn with_loader<P: AsRef<Utf8Path>>(data_dir: P, loader: YamlConfigService) -> Self {
        let data_dir = data_dir.as_ref().to_path_buf();

        if !data_dir.exists() {
            tracing::warn!("Data directory not found at {}", data_dir);
        }

        Self {
            databases_dir: data_dir.join(DATABASES_DIR),
            data_dir,
            loader,
        }
    }

    /// Path of the database for `game` (e.g. "Fallout4").
    pub fn database_path(&self, game: &str) -> Utf8PathBuf {
        self.databases_dir.join(format!("CLASSIC {}.yaml", game))
    }

    /// Load the crash database for `game`.
    ///
    /// Unlike settings files there is no sensible default database, so a
    /// missing file is an error. The underlying
    /// [`ConfigError`](crate::services::ConfigError) can be recovered with
    /// `downcast_ref`.
    pub fn load_database(&self, game: &str) -> Result<ClassicYamlConfig> {
        let path = self.database_path(game);

        let config = self
            .loader
            .load_config(&path)
            .with_context(|| format!("Failed to load {} database: {}", game, path))?;

        tracing::info!(
            "Loaded {} database: {} error checks, {} stack checks",
            game,
            config.crashlog_error_check.len(),
            config.crashlog_stack_check.len()
        );
        Ok(config)
    }

    /// Async counterpart of [`load_database`](Self::load_database).
    pub async fn load_database_async(&self, game: &str) -> Result<ClassicYamlConfig> {
        let path = self.database_path(game);

        self.loader
            .load_config_async(&path)
            .await
            .with_context(|| format!("Failed to load {} database: {}", game, path))
    }

    /// Load an arbitrary database file, outside the data directory if need be.
    pub fn load_file<P: AsRef<Utf8Path>>(&self, path: P) -> Result<ClassicYamlConfig> {
        let path = path.as_ref();
        self.loader
            .load_config(path)
            .with_context(|| format!("Failed to load database file: {}", path))
    }

    /// Games with a database present, sorted by name.
    ///
    /// Returns an empty list if the databases folder does not exist.
    pub fn available_databases(&self) -> Result<Vec<String>> {
        if !self.databases_dir.exists() {
            tracing::warn!("Databases folder not found at {}", self.databases_dir);
            return Ok(Vec::new());
        }

        let entries = self
            .databases_dir
            .read_dir_utf8()
            .with_context(|| format!("Failed to list databases in {}", self.databases_dir))?;

        let mut games = Vec::new();
        for entry in entries {
            let entry = entry
                .with_context(|| format!("Failed to read entry in {}", self.databases_dir))?;
            let game = entry
                .file_name()
                .strip_prefix("CLASSIC ")
                .and_then(|rest| rest.strip_suffix(".yaml"));

            if let Some(game) = game {
                games.push(game.to_string());
            }
        }

        games.sort();
        Ok(games)
    }

    /// Get the data directory path.
    pub fn data_dir(&self) -> &Utf8Path {
        &self.data_dir
    }

    pub fn loader(&self) -> &YamlConfigService {
        &self.loader
    }
}
