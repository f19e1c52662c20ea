//! Services module - loading CLASSIC crash databases.
//!
//! # Components
//!
//! - [`YamlConfigService`]: turns database text, or a database file, into a
//!   [`ClassicYamlConfig`](crate::models::ClassicYamlConfig). Sync and async
//!   entry points share one implementation.
//! - [`ConfigError`]: `NotFound` for a missing file, `Parse` for anything the
//!   YAML layer rejects.
//! - [`schema`]: the external key tables ([`SECTION_ALIASES`],
//!   [`GAME_INFO_ALIASES`]) and [`ParseMode`].
//! - [`FileSource`]: the file system seam, so path handling can be tested
//!   without touching disk.
//!
//! # Usage Example
//!
//! ```ignore
//! use classic_config::services::{ParseMode, YamlConfigService};
//!
//! let service = YamlConfigService::new();
//! let config = service.load_config("CLASSIC Data/databases/CLASSIC Fallout4.yaml")?;
//! println!("{}", config.game_info.xse_acronym);
//!
//! // Reject keys the schema does not know about
//! let strict = YamlConfigService::new().with_mode(ParseMode::Strict);
//! let config = strict.load_config_from_str(&text)?;
//! ```

pub mod schema;
pub mod yaml_config;

pub use schema::{GAME_INFO_ALIASES, GameInfoField, ParseMode, SECTION_ALIASES, Section};
pub use yaml_config::{ConfigError, FileSource, StdFileSource, YamlConfigService};
