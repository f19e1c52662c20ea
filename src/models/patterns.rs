//! Normalized views over the raw database mappings.
//!
//! The loader hands back the document exactly as authored. Analysis code
//! wants explicit fields instead of composite keys and prefixed strings, so
//! [`CrashPattern`] and [`ModInfo`] are built from the raw entries on demand.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

use super::config::StackCheckValue;

static LINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*Link:\s*(\S+)").expect("Invalid link regex"));

static COUNT_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\|(.*)$").expect("Invalid count prefix regex"));

/// Errors from splitting a `"<severity> | <name>"` key
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternKeyError {
    #[error("Key {0:?} has no '|' separator")]
    MissingSeparator(String),

    #[error("Key {0:?} does not start with a numeric severity")]
    InvalidSeverity(String),

    #[error("Key {0:?} has an empty name")]
    EmptyName(String),
}

/// A crash signature with its severity and match rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrashPattern {
    pub severity: u8,
    pub name: String,
    /// Substring searched for in the main error line (error checks only)
    pub pattern: String,
    pub stack_patterns: Vec<String>,
    pub required_in_main_error: Vec<String>,
    pub optional_in_main_error: Vec<String>,
    pub not_patterns: Vec<String>,
    pub min_occurrences: u32,
}

impl CrashPattern {
    fn named(severity: u8, name: String) -> Self {
        Self {
            severity,
            name,
            pattern: String::new(),
            stack_patterns: Vec::new(),
            required_in_main_error: Vec::new(),
            optional_in_main_error: Vec::new(),
            not_patterns: Vec::new(),
            min_occurrences: 1,
        }
    }

    /// Build from a `Crashlog_Error_Check` entry.
    pub fn from_error_check(key: &str, pattern: &str) -> Result<Self, PatternKeyError> {
        let (severity, name) = parse_severity_key(key)?;
        let mut crash = Self::named(severity, name);
        crash.pattern = pattern.to_string();
        Ok(crash)
    }

    /// Build from a `Crashlog_Stack_Check` entry.
    ///
    /// Each text item is classified by its prefix:
    /// - `ME-REQ|x`: must appear in the main error
    /// - `ME-OPT|x`: may appear in the main error
    /// - `NOT|x`: must not appear in the call stack
    /// - `<n>|x`: must appear in the call stack at least `n` times
    /// - anything else: must appear in the call stack
    pub fn from_stack_check(key: &str, value: &StackCheckValue) -> Result<Self, PatternKeyError> {
        let (severity, name) = parse_severity_key(key)?;
        let mut crash = Self::named(severity, name);

        for item in value.texts() {
            if let Some(rest) = item.strip_prefix("ME-REQ|") {
                crash.required_in_main_error.push(rest.to_string());
            } else if let Some(rest) = item.strip_prefix("ME-OPT|") {
                crash.optional_in_main_error.push(rest.to_string());
            } else if let Some(rest) = item.strip_prefix("NOT|") {
                crash.not_patterns.push(rest.to_string());
            } else if let Some(caps) = COUNT_PREFIX.captures(item) {
                // Counts too large for u32 are clamped rather than rejected
                let count = caps[1].parse::<u32>().unwrap_or(u32::MAX);
                crash.min_occurrences = crash.min_occurrences.max(count);
                crash.stack_patterns.push(caps[2].to_string());
            } else {
                crash.stack_patterns.push(item.to_string());
            }
        }

        Ok(crash)
    }
}

/// Which `Mods_*` section an entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModCategory {
    Core,
    Frequent,
    Config,
    Solutions,
}

impl ModCategory {
    pub const ALL: [ModCategory; 4] = [
        ModCategory::Core,
        ModCategory::Frequent,
        ModCategory::Config,
        ModCategory::Solutions,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ModCategory::Core => "Core",
            ModCategory::Frequent => "Frequent",
            ModCategory::Config => "Config",
            ModCategory::Solutions => "Solutions",
        }
    }
}

/// A mod note with its detection patterns, link and remedy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModInfo {
    pub name: String,
    pub description: String,
    pub category: ModCategory,
    /// Plugin/internal ids that identify the mod in a load order
    pub patterns: Vec<String>,
    pub conflicts_with: Vec<String>,
    pub solution: Option<String>,
    pub link: Option<String>,
}

impl ModInfo {
    /// Build from one `Mods_*` entry.
    ///
    /// `Mods_CONF` keys name a conflicting pair (`"ModA | ModB"`); every other
    /// section uses `"<InternalId> | <DisplayName>"` or a bare id.
    pub fn from_entry(category: ModCategory, key: &str, text: &str) -> Self {
        let (id, second) = split_composite_key(key);
        let description = strip_link_lines(text);
        let link = extract_link(text);

        let (name, conflicts_with) = match (category, second) {
            (ModCategory::Config, Some(other)) => (id.to_string(), vec![other.to_string()]),
            (_, Some(display)) => (display.to_string(), Vec::new()),
            (_, None) => (id.to_string(), Vec::new()),
        };

        let solution = (category == ModCategory::Solutions && !description.is_empty())
            .then(|| description.clone());

        Self {
            name,
            description,
            category,
            patterns: vec![id.to_string()],
            conflicts_with,
            solution,
            link,
        }
    }
}

/// Split `"5 | Stack Overflow Crash"` into `(5, "Stack Overflow Crash")`.
pub fn parse_severity_key(key: &str) -> Result<(u8, String), PatternKeyError> {
    let (severity, name) = key
        .split_once('|')
        .ok_or_else(|| PatternKeyError::MissingSeparator(key.to_string()))?;

    let severity = severity
        .trim()
        .parse::<u8>()
        .map_err(|_| PatternKeyError::InvalidSeverity(key.to_string()))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(PatternKeyError::EmptyName(key.to_string()));
    }

    Ok((severity, name.to_string()))
}

/// Split `"Id | Display"` into `("Id", Some("Display"))`; a bare id has no second part.
pub fn split_composite_key(key: &str) -> (&str, Option<&str>) {
    match key.split_once('|') {
        Some((id, rest)) => {
            let rest = rest.trim();
            (id.trim(), (!rest.is_empty()).then_some(rest))
        }
        None => (key.trim(), None),
    }
}

/// URL following a `Link:` marker, if the text has one.
pub fn extract_link(text: &str) -> Option<String> {
    LINK_PATTERN
        .captures(text)
        .map(|caps| caps[1].to_string())
}

fn strip_link_lines(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim_start().starts_with("Link:"))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
