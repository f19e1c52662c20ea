use indexmap::IndexMap;

use super::patterns::{CrashPattern, ModCategory, ModInfo};

/// Parsed contents of a CLASSIC crash database (e.g. `CLASSIC Fallout4.yaml`).
///
/// Every section is always present: sections missing from the document come
/// back as empty containers. Built by
/// [`YamlConfigService`](crate::services::YamlConfigService); the external key
/// of each section lives in [`SECTION_ALIASES`](crate::services::SECTION_ALIASES).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassicYamlConfig {
    pub game_info: GameInfo,

    /// `"<severity> | <name>"` → substring expected in the main error line
    pub crashlog_error_check: IndexMap<String, String>,

    /// `"<severity> | <name>"` → call stack signature(s)
    pub crashlog_stack_check: IndexMap<String, StackCheckValue>,

    pub mods_core: IndexMap<String, String>,
    pub mods_freq: IndexMap<String, String>,
    pub mods_conf: IndexMap<String, String>,
    pub mods_solu: IndexMap<String, String>,

    pub warnings_crashgen: IndexMap<String, String>,
    pub warnings_xse: IndexMap<String, String>,

    pub game_hints: Vec<String>,
}

/// Version metadata for the game, its crash logger and its script extender.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameInfo {
    pub game_version: String,
    pub game_version_new: String,
    pub crashgen_latest_ver: String,
    pub xse_acronym: String,
    pub xse_full_name: String,
    pub xse_ver_latest: String,
    pub xse_ver_latest_ng: String,
}

/// A `Crashlog_Stack_Check` value.
///
/// Most entries are a list of prefixed sub-patterns, some are a single
/// string, and nothing stops an author from nesting a mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum StackCheckValue {
    Text(String),
    List(Vec<StackCheckValue>),
    Nested(IndexMap<String, StackCheckValue>),
}

impl StackCheckValue {
    /// The string payload, if this is a `Text` value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            StackCheckValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Text entries at the top level of this value.
    ///
    /// A `Text` yields itself, a `List` yields its `Text` items, and a
    /// `Nested` mapping yields nothing.
    pub fn texts(&self) -> Vec<&str> {
        match self {
            StackCheckValue::Text(text) => vec![text.as_str()],
            StackCheckValue::List(items) => items.iter().filter_map(|i| i.as_text()).collect(),
            StackCheckValue::Nested(_) => Vec::new(),
        }
    }
}

impl ClassicYamlConfig {
    /// True when every section is empty, as for a blank document.
    pub fn is_empty(&self) -> bool {
        self.game_info == GameInfo::default()
            && self.crashlog_error_check.is_empty()
            && self.crashlog_stack_check.is_empty()
            && self.mods_core.is_empty()
            && self.mods_freq.is_empty()
            && self.mods_conf.is_empty()
            && self.mods_solu.is_empty()
            && self.warnings_crashgen.is_empty()
            && self.warnings_xse.is_empty()
            && self.game_hints.is_empty()
    }

    /// Get the raw mod mapping for a category
    pub fn mod_section(&self, category: ModCategory) -> &IndexMap<String, String> {
        match category {
            ModCategory::Core => &self.mods_core,
            ModCategory::Frequent => &self.mods_freq,
            ModCategory::Config => &self.mods_conf,
            ModCategory::Solutions => &self.mods_solu,
        }
    }

    /// Build [`CrashPattern`]s from `Crashlog_Error_Check`.
    ///
    /// Entries whose key does not follow `"<severity> | <name>"` are skipped
    /// and logged.
    pub fn crash_patterns(&self) -> Vec<CrashPattern> {
        self.crashlog_error_check
            .iter()
            .filter_map(|(key, pattern)| match CrashPattern::from_error_check(key, pattern) {
                Ok(p) => Some(p),
                Err(e) => {
                    tracing::warn!("Skipping error check {:?}: {}", key, e);
                    None
                }
            })
            .collect()
    }

    /// Build [`CrashPattern`]s from `Crashlog_Stack_Check`, skipping malformed keys.
    pub fn stack_patterns(&self) -> Vec<CrashPattern> {
        self.crashlog_stack_check
            .iter()
            .filter_map(|(key, value)| match CrashPattern::from_stack_check(key, value) {
                Ok(p) => Some(p),
                Err(e) => {
                    tracing::warn!("Skipping stack check {:?}: {}", key, e);
                    None
                }
            })
            .collect()
    }

    /// Build [`ModInfo`] entries for one mod category, in document order.
    pub fn mods(&self, category: ModCategory) -> Vec<ModInfo> {
        self.mod_section(category)
            .iter()
            .map(|(key, text)| ModInfo::from_entry(category, key, text))
            .collect()
    }
}
