//! Document schema: external key tables and the serde visitors that apply them.
//!
//! Field aliases are declared once, here, as plain tables. The visitors look
//! every key up in these tables; matching is exact and case-sensitive. A key
//! that is not in the table is dropped in [`ParseMode::Tolerant`] and rejected
//! in [`ParseMode::Strict`].

use indexmap::IndexMap;
use serde::de::{
    self, DeserializeSeed, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor,
};
use serde::Deserialize;
use std::fmt;

use crate::models::{ClassicYamlConfig, GameInfo, StackCheckValue};

/// How keys missing from the schema are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParseMode {
    /// Drop unknown keys. Databases gain sections faster than this crate does.
    #[default]
    Tolerant,
    /// Fail the load on the first unknown key.
    Strict,
}

/// Top-level sections of a crash database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    GameInfo,
    CrashlogErrorCheck,
    CrashlogStackCheck,
    ModsCore,
    ModsFreq,
    ModsConf,
    ModsSolu,
    WarningsCrashgen,
    WarningsXse,
    GameHints,
}

pub const SECTION_ALIASES: &[(&str, Section)] = &[
    ("Game_Info", Section::GameInfo),
    ("Crashlog_Error_Check", Section::CrashlogErrorCheck),
    ("Crashlog_Stack_Check", Section::CrashlogStackCheck),
    ("Mods_CORE", Section::ModsCore),
    ("Mods_FREQ", Section::ModsFreq),
    ("Mods_CONF", Section::ModsConf),
    ("Mods_SOLU", Section::ModsSolu),
    ("Warnings_CRASHGEN", Section::WarningsCrashgen),
    ("Warnings_XSE", Section::WarningsXse),
    ("Game_Hints", Section::GameHints),
];

/// Fields of the `Game_Info` record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameInfoField {
    GameVersion,
    GameVersionNew,
    CrashgenLatestVer,
    XseAcronym,
    XseFullName,
    XseVerLatest,
    XseVerLatestNg,
}

pub const GAME_INFO_ALIASES: &[(&str, GameInfoField)] = &[
    ("GameVersion", GameInfoField::GameVersion),
    ("GameVersionNEW", GameInfoField::GameVersionNew),
    ("CRASHGEN_LatestVer", GameInfoField::CrashgenLatestVer),
    ("XSE_Acronym", GameInfoField::XseAcronym),
    ("XSE_FullName", GameInfoField::XseFullName),
    ("XSE_Ver_Latest", GameInfoField::XseVerLatest),
    ("XSE_Ver_Latest_NG", GameInfoField::XseVerLatestNg),
];

fn lookup<T: Copy>(table: &[(&str, T)], key: &str) -> Option<T> {
    table
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, item)| *item)
}

fn reverse<T: Copy + PartialEq>(table: &[(&'static str, T)], item: T) -> &'static str {
    table
        .iter()
        .find(|(_, candidate)| *candidate == item)
        .map(|(alias, _)| *alias)
        .unwrap_or_default()
}

fn expected_keys<T>(table: &[(&str, T)]) -> String {
    table
        .iter()
        .map(|(alias, _)| format!("`{}`", alias))
        .collect::<Vec<_>>()
        .join(", ")
}

impl Section {
    pub fn from_alias(key: &str) -> Option<Self> {
        lookup(SECTION_ALIASES, key)
    }

    /// External key for this section
    pub fn alias(self) -> &'static str {
        reverse(SECTION_ALIASES, self)
    }
}

impl GameInfoField {
    pub fn from_alias(key: &str) -> Option<Self> {
        lookup(GAME_INFO_ALIASES, key)
    }

    pub fn alias(self) -> &'static str {
        reverse(GAME_INFO_ALIASES, self)
    }

    fn slot(self, info: &mut GameInfo) -> &mut String {
        match self {
            GameInfoField::GameVersion => &mut info.game_version,
            GameInfoField::GameVersionNew => &mut info.game_version_new,
            GameInfoField::CrashgenLatestVer => &mut info.crashgen_latest_ver,
            GameInfoField::XseAcronym => &mut info.xse_acronym,
            GameInfoField::XseFullName => &mut info.xse_full_name,
            GameInfoField::XseVerLatest => &mut info.xse_ver_latest,
            GameInfoField::XseVerLatestNg => &mut info.xse_ver_latest_ng,
        }
    }
}

/// A string slot: scalars keep their source text, null becomes `""`.
struct Text(String);

impl<'de> Deserialize<'de> for Text {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer).map(|s| Text(s.unwrap_or_default()))
    }
}

fn next_text_map<'de, A>(map: &mut A) -> Result<IndexMap<String, String>, A::Error>
where
    A: MapAccess<'de>,
{
    let raw: Option<IndexMap<String, Text>> = map.next_value()?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(key, Text(value))| (key, value))
        .collect())
}

fn skip_unknown<'de, A>(
    map: &mut A,
    mode: ParseMode,
    scope: &str,
    key: &str,
    expected: String,
) -> Result<(), A::Error>
where
    A: MapAccess<'de>,
{
    if mode == ParseMode::Strict {
        return Err(de::Error::custom(format!(
            "unknown key `{}` in {}, expected one of {}",
            key, scope, expected
        )));
    }
    tracing::debug!("Ignoring unknown key {:?} in {}", key, scope);
    map.next_value::<IgnoredAny>()?;
    Ok(())
}

/// Parse a whole database document.
///
/// Runs two passes over the text. The first records the container layout of
/// every `Crashlog_Stack_Check` section. The second builds the config and uses
/// that layout to read stack-check scalars as their source text.
pub(crate) fn parse_document(
    yaml: &str,
    mode: ParseMode,
) -> Result<ClassicYamlConfig, serde_yaml_ng::Error> {
    let layout = LayoutSeed.deserialize(serde_yaml_ng::Deserializer::from_str(yaml))?;
    DocumentSeed {
        mode,
        layout: &layout,
    }
    .deserialize(serde_yaml_ng::Deserializer::from_str(yaml))
}

const LAYOUT_MISMATCH: &str = "document layout changed between passes";

/// Seed for a whole database document.
///
/// `layout` holds one slot per top-level entry, in document order.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DocumentSeed<'a> {
    pub mode: ParseMode,
    pub layout: &'a [Option<Shape>],
}

impl<'de> DeserializeSeed<'de> for DocumentSeed<'_> {
    type Value = ClassicYamlConfig;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for DocumentSeed<'_> {
    type Value = ClassicYamlConfig;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a mapping of CLASSIC database sections")
    }

    // Document with no content (comments only, a bare `---`, `~`)
    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ClassicYamlConfig::default())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ClassicYamlConfig::default())
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut config = ClassicYamlConfig::default();
        let mut slots = self.layout.iter();

        while let Some(key) = map.next_key::<String>()? {
            let slot = slots.next().ok_or_else(|| de::Error::custom(LAYOUT_MISMATCH))?;
            let Some(section) = Section::from_alias(&key) else {
                skip_unknown(
                    &mut map,
                    self.mode,
                    "document root",
                    &key,
                    expected_keys(SECTION_ALIASES),
                )?;
                continue;
            };

            // A repeated section replaces the earlier one
            match section {
                Section::GameInfo => {
                    config.game_info = map.next_value_seed(GameInfoSeed { mode: self.mode })?
                }
                Section::CrashlogErrorCheck => {
                    config.crashlog_error_check = next_text_map(&mut map)?
                }
                Section::CrashlogStackCheck => {
                    let shape = slot
                        .as_ref()
                        .ok_or_else(|| de::Error::custom(LAYOUT_MISMATCH))?;
                    config.crashlog_stack_check = map.next_value_seed(StackSectionSeed { shape })?;
                }
                Section::ModsCore => config.mods_core = next_text_map(&mut map)?,
                Section::ModsFreq => config.mods_freq = next_text_map(&mut map)?,
                Section::ModsConf => config.mods_conf = next_text_map(&mut map)?,
                Section::ModsSolu => config.mods_solu = next_text_map(&mut map)?,
                Section::WarningsCrashgen => {
                    config.warnings_crashgen = next_text_map(&mut map)?
                }
                Section::WarningsXse => config.warnings_xse = next_text_map(&mut map)?,
                Section::GameHints => {
                    let raw: Option<Vec<Text>> = map.next_value()?;
                    config.game_hints = raw
                        .unwrap_or_default()
                        .into_iter()
                        .map(|Text(hint)| hint)
                        .collect();
                }
            }
        }

        Ok(config)
    }
}

/// Container layout of an untyped value.
///
/// `deserialize_any` resolves plain scalars (`0x0F` arrives as `15`), so the
/// layout is learned in a first pass and the second pass reads every
/// `Scalar` position as a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Shape {
    Scalar,
    Seq(Vec<Shape>),
    /// Mapping values in document order, duplicates included
    Map(Vec<Shape>),
}

impl<'de> Deserialize<'de> for Shape {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ShapeVisitor)
    }
}

struct ShapeVisitor;

impl<'de> Visitor<'de> for ShapeVisitor {
    type Value = Shape;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a scalar, a list or a mapping")
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
        Ok(Shape::Scalar)
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<Self::Value, E> {
        Ok(Shape::Scalar)
    }

    fn visit_i128<E: de::Error>(self, _: i128) -> Result<Self::Value, E> {
        Ok(Shape::Scalar)
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<Self::Value, E> {
        Ok(Shape::Scalar)
    }

    fn visit_u128<E: de::Error>(self, _: u128) -> Result<Self::Value, E> {
        Ok(Shape::Scalar)
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<Self::Value, E> {
        Ok(Shape::Scalar)
    }

    fn visit_str<E: de::Error>(self, _: &str) -> Result<Self::Value, E> {
        Ok(Shape::Scalar)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Shape::Scalar)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Shape::Scalar)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        Shape::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Shape::Seq(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut values = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((IgnoredAny, value)) = map.next_entry::<IgnoredAny, Shape>()? {
            values.push(value);
        }
        Ok(Shape::Map(values))
    }
}

/// First pass: the shape of each `Crashlog_Stack_Check` entry at the root,
/// `None` for every other top-level entry.
struct LayoutSeed;

impl<'de> DeserializeSeed<'de> for LayoutSeed {
    type Value = Vec<Option<Shape>>;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for LayoutSeed {
    type Value = Vec<Option<Shape>>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a mapping of CLASSIC database sections")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut layout = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(key) = map.next_key::<String>()? {
            if Section::from_alias(&key) == Some(Section::CrashlogStackCheck) {
                layout.push(Some(map.next_value::<Shape>()?));
            } else {
                map.next_value::<IgnoredAny>()?;
                layout.push(None);
            }
        }
        Ok(layout)
    }
}

/// The `Crashlog_Stack_Check` section. Null reads as empty.
struct StackSectionSeed<'a> {
    shape: &'a Shape,
}

impl<'de> DeserializeSeed<'de> for StackSectionSeed<'_> {
    type Value = IndexMap<String, StackCheckValue>;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        match self.shape {
            Shape::Map(values) => deserializer.deserialize_map(StackEntriesVisitor { values }),
            // Accepts null, reports anything else as the wrong type
            _ => Option::<IndexMap<String, IgnoredAny>>::deserialize(deserializer)
                .map(|_| IndexMap::new()),
        }
    }
}

/// A single stack-check value guided by its recorded shape.
struct StackValueSeed<'a> {
    shape: &'a Shape,
}

impl<'de> DeserializeSeed<'de> for StackValueSeed<'_> {
    type Value = StackCheckValue;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        match self.shape {
            Shape::Scalar => {
                Text::deserialize(deserializer).map(|Text(text)| StackCheckValue::Text(text))
            }
            Shape::Seq(items) => deserializer.deserialize_seq(StackListVisitor { items }),
            Shape::Map(values) => deserializer
                .deserialize_map(StackEntriesVisitor { values })
                .map(StackCheckValue::Nested),
        }
    }
}

struct StackListVisitor<'a> {
    items: &'a [Shape],
}

impl<'de> Visitor<'de> for StackListVisitor<'_> {
    type Value = StackCheckValue;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a list of stack-check values")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(self.items.len());
        for shape in self.items {
            match seq.next_element_seed(StackValueSeed { shape })? {
                Some(item) => items.push(item),
                None => return Err(de::Error::custom(LAYOUT_MISMATCH)),
            }
        }
        Ok(StackCheckValue::List(items))
    }
}

struct StackEntriesVisitor<'a> {
    values: &'a [Shape],
}

impl<'de> Visitor<'de> for StackEntriesVisitor<'_> {
    type Value = IndexMap<String, StackCheckValue>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a mapping of stack-check entries")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = IndexMap::with_capacity(self.values.len());
        let mut shapes = self.values.iter();
        while let Some(key) = map.next_key::<String>()? {
            let shape = shapes.next().ok_or_else(|| de::Error::custom(LAYOUT_MISMATCH))?;
            let value = map.next_value_seed(StackValueSeed { shape })?;
            entries.insert(key, value);
        }
        Ok(entries)
    }
}

/// Seed for the `Game_Info` record.
#[derive(Debug, Clone, Copy)]
struct GameInfoSeed {
    mode: ParseMode,
}

impl<'de> DeserializeSeed<'de> for GameInfoSeed {
    type Value = GameInfo;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for GameInfoSeed {
    type Value = GameInfo;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a Game_Info mapping")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(GameInfo::default())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(GameInfo::default())
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut info = GameInfo::default();

        while let Some(key) = map.next_key::<String>()? {
            match GameInfoField::from_alias(&key) {
                Some(field) => {
                    let Text(value) = map.next_value()?;
                    *field.slot(&mut info) = value;
                }
                None => skip_unknown(
                    &mut map,
                    self.mode,
                    Section::GameInfo.alias(),
                    &key,
                    expected_keys(GAME_INFO_ALIASES),
                )?,
            }
        }

        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_section_alias_table_is_complete_and_unique() {
        assert_eq!(SECTION_ALIASES.len(), 10);

        let aliases: HashSet<_> = SECTION_ALIASES.iter().map(|(a, _)| *a).collect();
        let sections: HashSet<_> = SECTION_ALIASES.iter().map(|(_, s)| *s).collect();
        assert_eq!(aliases.len(), SECTION_ALIASES.len());
        assert_eq!(sections.len(), SECTION_ALIASES.len());
    }

    #[test]
    fn test_game_info_alias_table_order() {
        let aliases: Vec<_> = GAME_INFO_ALIASES.iter().map(|(a, _)| *a).collect();
        assert_eq!(
            aliases,
            vec![
                "GameVersion",
                "GameVersionNEW",
                "CRASHGEN_LatestVer",
                "XSE_Acronym",
                "XSE_FullName",
                "XSE_Ver_Latest",
                "XSE_Ver_Latest_NG",
            ]
        );
    }

    #[test]
    fn test_alias_lookup_is_exact() {
        assert_eq!(Section::from_alias("Mods_CORE"), Some(Section::ModsCore));
        assert_eq!(Section::from_alias("mods_core"), None);
        assert_eq!(Section::from_alias("Mods_CORE "), None);
        assert_eq!(
            GameInfoField::from_alias("XSE_Ver_Latest_NG"),
            Some(GameInfoField::XseVerLatestNg)
        );
        assert_eq!(GameInfoField::from_alias("xse_ver_latest_ng"), None);
    }

    #[test]
    fn test_alias_round_trip() {
        for (alias, section) in SECTION_ALIASES {
            assert_eq!(section.alias(), *alias);
        }
        for (alias, field) in GAME_INFO_ALIASES {
            assert_eq!(field.alias(), *alias);
        }
    }

    #[test]
    fn test_game_info_slots_are_distinct() {
        let mut info = GameInfo::default();
        for (alias, field) in GAME_INFO_ALIASES {
            *field.slot(&mut info) = alias.to_string();
        }
        assert_eq!(info.game_version, "GameVersion");
        assert_eq!(info.game_version_new, "GameVersionNEW");
        assert_eq!(info.crashgen_latest_ver, "CRASHGEN_LatestVer");
        assert_eq!(info.xse_acronym, "XSE_Acronym");
        assert_eq!(info.xse_full_name, "XSE_FullName");
        assert_eq!(info.xse_ver_latest, "XSE_Ver_Latest");
        assert_eq!(info.xse_ver_latest_ng, "XSE_Ver_Latest_NG");
    }

    #[test]
    fn test_document_tolerant_and_strict() {
        let yaml = "Unknown_Section: 1\nGame_Hints:\n  - hint\n";

        let config = parse_document(yaml, ParseMode::Tolerant).unwrap();
        assert_eq!(config.game_hints, vec!["hint"]);

        let err = parse_document(yaml, ParseMode::Strict).unwrap_err();
        assert!(err.to_string().contains("Unknown_Section"));
    }

    #[test]
    fn test_layout_records_only_stack_sections() {
        let yaml = "Game_Hints: [a]\nCrashlog_Stack_Check:\n  k: [1, {x: y}]\n  j: ~\n";
        let layout = LayoutSeed
            .deserialize(serde_yaml_ng::Deserializer::from_str(yaml))
            .unwrap();

        assert_eq!(
            layout,
            vec![
                None,
                Some(Shape::Map(vec![
                    Shape::Seq(vec![Shape::Scalar, Shape::Map(vec![Shape::Scalar])]),
                    Shape::Scalar,
                ])),
            ]
        );
    }

    #[test]
    fn test_stack_check_value_shapes() {
        let yaml = r#"
Crashlog_Stack_Check:
  single: BSResource
  list:
    - ME-REQ|EXCEPTION_ACCESS_VIOLATION
    - 2|BSResource
  nested:
    inner:
      - a
      - b
"#;
        let stack = parse_document(yaml, ParseMode::Tolerant)
            .unwrap()
            .crashlog_stack_check;

        assert_eq!(stack["single"], StackCheckValue::Text("BSResource".to_string()));
        assert_eq!(
            stack["list"].texts(),
            vec!["ME-REQ|EXCEPTION_ACCESS_VIOLATION", "2|BSResource"]
        );
        match &stack["nested"] {
            StackCheckValue::Nested(map) => {
                assert_eq!(map.len(), 1);
                assert_eq!(map["inner"].texts(), vec!["a", "b"]);
            }
            other => panic!("expected nested value, got {:?}", other),
        }
    }

    #[test]
    fn test_stack_check_scalars_keep_source_text() {
        let yaml = r#"
Crashlog_Stack_Check:
  4 | Single: 0x0F
  5 | Listed:
    - 0x000100000000
    - 1.10
    - 1e3
    - 42
    - true
    - ~
    - "quoted"
  3 | Deep:
    offsets:
      - 0x7FF6
"#;
        let stack = parse_document(yaml, ParseMode::Tolerant)
            .unwrap()
            .crashlog_stack_check;

        assert_eq!(stack["4 | Single"], StackCheckValue::Text("0x0F".to_string()));
        assert_eq!(
            stack["5 | Listed"].texts(),
            vec!["0x000100000000", "1.10", "1e3", "42", "true", "", "quoted"]
        );
        match &stack["3 | Deep"] {
            StackCheckValue::Nested(map) => assert_eq!(map["offsets"].texts(), vec!["0x7FF6"]),
            other => panic!("expected nested value, got {:?}", other),
        }
    }

    #[test]
    fn test_stack_check_duplicates_and_repeated_sections() {
        let yaml = "Crashlog_Stack_Check:\n  k: [0x1]\n  k: 0x2\n\
                    Game_Hints: []\n\
                    Crashlog_Stack_Check:\n  a: 010\n  b: [x, 0o7]\n";
        let stack = parse_document(yaml, ParseMode::Tolerant)
            .unwrap()
            .crashlog_stack_check;

        // The second section replaces the first
        assert_eq!(stack.len(), 2);
        assert_eq!(stack["a"], StackCheckValue::Text("010".to_string()));
        assert_eq!(stack["b"].texts(), vec!["x", "0o7"]);

        let yaml = "Crashlog_Stack_Check:\n  k: [0x1]\n  k: 0x2\n";
        let stack = parse_document(yaml, ParseMode::Tolerant)
            .unwrap()
            .crashlog_stack_check;
        assert_eq!(stack["k"], StackCheckValue::Text("0x2".to_string()));
    }

    #[test]
    fn test_stack_section_wrong_shape_fails() {
        assert!(parse_document("Crashlog_Stack_Check: text\n", ParseMode::Tolerant).is_err());
        assert!(parse_document("Crashlog_Stack_Check: [a]\n", ParseMode::Tolerant).is_err());
        assert!(
            parse_document("Crashlog_Stack_Check:\n", ParseMode::Tolerant)
                .unwrap()
                .crashlog_stack_check
                .is_empty()
        );
    }
}
