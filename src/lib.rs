// classic-config - Crash database loader for CLASSIC
//
// This is the library crate: the database model, the YAML loader and the
// data directory layer. The binary crate (main.rs) is a small inspection tool.

pub mod config;
pub mod logging;
pub mod models;
pub mod services;
pub mod settings;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use models::{ClassicYamlConfig, CrashPattern, GameInfo, ModCategory, ModInfo, StackCheckValue};
pub use services::{ConfigError, ParseMode, YamlConfigService};
pub use settings::AppSettings;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
