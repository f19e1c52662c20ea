//! classic-config - inspect a CLASSIC crash database
//!
//! Usage:
//!
//! ```text
//! classic-config                         # database for the configured game
//! classic-config Skyrim                  # CLASSIC Data/databases/CLASSIC Skyrim.yaml
//! classic-config path/to/database.yaml   # any database file
//! ```
//!
//! Settings come from `CLASSIC Settings.yaml` and `CLASSIC_*` environment
//! variables (see [`AppSettings`]). A summary of the loaded database is
//! written to the log and the console.

use anyhow::Result;
use camino::Utf8Path;
use classic_config::{APP_NAME, AppSettings, ConfigManager, ModCategory, VERSION, YamlConfigService};

fn main() -> Result<()> {
    let settings = AppSettings::load()?;

    let _guard = classic_config::logging::setup_logging(
        &settings.log_dir,
        &settings.log_prefix,
        settings.debug,
        true,
    )?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let loader = YamlConfigService::new().with_mode(settings.parse_mode());
    let manager = ConfigManager::with_loader(&settings.data_dir, loader);

    let target = std::env::args().nth(1);
    let config = match target.as_deref() {
        Some(arg) if arg.ends_with(".yaml") || arg.ends_with(".yml") => {
            manager.load_file(Utf8Path::new(arg))?
        }
        Some(game) => manager.load_database(game)?,
        None => manager.load_database(&settings.game)?,
    };

    let info = &config.game_info;
    tracing::info!(
        "Game {} ({}), crash logger {}, {} {} / NG {}",
        info.game_version,
        info.game_version_new,
        info.crashgen_latest_ver,
        info.xse_acronym,
        info.xse_ver_latest,
        info.xse_ver_latest_ng
    );

    tracing::info!(
        "Crash signatures: {} error checks ({} usable), {} stack checks ({} usable)",
        config.crashlog_error_check.len(),
        config.crash_patterns().len(),
        config.crashlog_stack_check.len(),
        config.stack_patterns().len()
    );

    for category in ModCategory::ALL {
        let mods = config.mods(category);
        let linked = mods.iter().filter(|m| m.link.is_some()).count();
        tracing::info!("{} mods: {} ({} with links)", category.label(), mods.len(), linked);
    }

    tracing::info!(
        "Warnings: {} crash logger, {} script extender; {} game hints",
        config.warnings_crashgen.len(),
        config.warnings_xse.len(),
        config.game_hints.len()
    );

    Ok(())
}
