//! Data models for CLASSIC crash databases.
//!
//! - [`ClassicYamlConfig`]: the raw database document, one field per section
//! - [`GameInfo`]: game, crash logger and script extender versions
//! - [`StackCheckValue`]: the shapes a `Crashlog_Stack_Check` entry can take
//! - [`CrashPattern`] / [`ModInfo`]: normalized views built from the raw
//!   mappings by analysis code, never by the loader

pub mod config;
pub mod patterns;

pub use config::{ClassicYamlConfig, GameInfo, StackCheckValue};
pub use patterns::{
    CrashPattern, ModCategory, ModInfo, PatternKeyError, extract_link, parse_severity_key,
    split_composite_key,
};
