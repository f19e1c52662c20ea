//! Integration tests for CrashPattern and ModInfo normalization
//!
//! These tests verify that a loaded database converts into the structured
//! shapes analysis code works with, and that malformed keys are skipped.

use classic_config::{ModCategory, YamlConfigService};

const DATABASE: &str = r#"
Crashlog_Error_Check:
  5 | Stack Overflow Crash: EXCEPTION_STACK_OVERFLOW
  3 | C++ Redist Crash: MSVC
  Missing Severity Crash: SOMETHING

Crashlog_Stack_Check:
  5 | Bad INI Crash:
    - ME-REQ|EXCEPTION_ACCESS_VIOLATION
    - ME-OPT|Fallout4.exe
    - NOT|BSTEventSource
    - 2|BSResource
  4 | Water Collision Crash: BSWaterCollisionManager
  broken key: BSSomething

Mods_CORE:
  CanarySaveFileMonitor | Canary Save File Monitor: |
    This is a highly recommended mod that can detect save file corruption.
    Link: https://www.nexusmods.com/fallout4/mods/44949?tab=files
  HighFPSPhysicsFix: |
    Fixes physics issues at high frame rates.

Mods_CONF:
  BetterPowerArmor | KnockoutFramework: |
    These mods conflict with each other.

Mods_SOLU:
  DLCUltraHighResolution: |
    Disable the high resolution texture pack.
"#;

#[test]
fn test_crash_patterns_from_error_checks() {
    let config = YamlConfigService::new().load_config_from_str(DATABASE).unwrap();
    let patterns = config.crash_patterns();

    // The key without a severity prefix is skipped
    assert_eq!(patterns.len(), 2);
    assert_eq!(patterns[0].severity, 5);
    assert_eq!(patterns[0].name, "Stack Overflow Crash");
    assert_eq!(patterns[0].pattern, "EXCEPTION_STACK_OVERFLOW");
    assert_eq!(patterns[0].min_occurrences, 1);
    assert_eq!(patterns[1].severity, 3);
}

#[test]
fn test_crash_patterns_from_stack_checks() {
    let config = YamlConfigService::new().load_config_from_str(DATABASE).unwrap();
    let patterns = config.stack_patterns();

    assert_eq!(patterns.len(), 2);

    let ini = &patterns[0];
    assert_eq!(ini.name, "Bad INI Crash");
    assert_eq!(ini.required_in_main_error, vec!["EXCEPTION_ACCESS_VIOLATION"]);
    assert_eq!(ini.optional_in_main_error, vec!["Fallout4.exe"]);
    assert_eq!(ini.not_patterns, vec!["BSTEventSource"]);
    assert_eq!(ini.stack_patterns, vec!["BSResource"]);
    assert_eq!(ini.min_occurrences, 2);

    let water = &patterns[1];
    assert_eq!(water.severity, 4);
    assert_eq!(water.stack_patterns, vec!["BSWaterCollisionManager"]);
}

#[test]
fn test_core_mods() {
    let config = YamlConfigService::new().load_config_from_str(DATABASE).unwrap();
    let mods = config.mods(ModCategory::Core);

    assert_eq!(mods.len(), 2);
    assert_eq!(mods[0].name, "Canary Save File Monitor");
    assert_eq!(mods[0].patterns, vec!["CanarySaveFileMonitor"]);
    assert_eq!(
        mods[0].link.as_deref(),
        Some("https://www.nexusmods.com/fallout4/mods/44949?tab=files")
    );
    assert!(!mods[0].description.contains("Link:"));

    assert_eq!(mods[1].name, "HighFPSPhysicsFix");
    assert_eq!(mods[1].link, None);
}

#[test]
fn test_conflict_and_solution_mods() {
    let config = YamlConfigService::new().load_config_from_str(DATABASE).unwrap();

    let conflicts = config.mods(ModCategory::Config);
    assert_eq!(conflicts[0].name, "BetterPowerArmor");
    assert_eq!(conflicts[0].conflicts_with, vec!["KnockoutFramework"]);

    let solutions = config.mods(ModCategory::Solutions);
    assert_eq!(
        solutions[0].solution.as_deref(),
        Some("Disable the high resolution texture pack.")
    );

    assert!(config.mods(ModCategory::Frequent).is_empty());
}
