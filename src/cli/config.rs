//! CLI commands for configuration

use clap::Subcommand;

use crate::config::{Settings, TallyPaths};
use crate::error::TallyResult;

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write the default settings file
    Init {
        /// Overwrite an existing settings file
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle `tally config`; with no subcommand, show paths and settings
pub fn handle_config_command(
    paths: &TallyPaths,
    settings: &Settings,
    cmd: Option<ConfigCommands>,
) -> TallyResult<()> {
    match cmd {
        Some(ConfigCommands::Init { force }) => {
            if paths.is_initialized() && !force {
                println!(
                    "Settings already exist at {} (use --force to overwrite)",
                    paths.settings_file().display()
                );
                return Ok(());
            }

            Settings::default().save(paths)?;
            println!("Wrote default settings to {}", paths.settings_file().display());
        }
        None => {
            println!("Tally Configuration");
            println!("===================");
            println!("Config directory: {}", paths.base_dir().display());
            println!(
                "Settings file:    {}{}",
                paths.settings_file().display(),
                if paths.is_initialized() { "" } else { " (not written, using defaults)" }
            );
            println!();
            println!("Settings:");
            println!(
                "  Budget thresholds: warning > {:.0}%, over > {:.0}%",
                settings.budget.warning_ratio * 100.0,
                settings.budget.over_ratio * 100.0
            );
            println!("  Anomaly threshold: {}%", settings.anomaly_threshold_percent);
            println!(
                "  Forecast:          {} over {} months, horizon {} (max {})",
                settings.forecast.algorithm,
                settings.forecast.history_months,
                settings.forecast.horizon,
                settings.forecast.max_horizon
            );
            println!("  Currency symbol:   {}", settings.currency_symbol);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_settings() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TallyPaths::with_base_dir(temp_dir.path().join("tally"));

        let init = Some(ConfigCommands::Init { force: false });
        handle_config_command(&paths, &Settings::default(), init).unwrap();
        assert!(paths.is_initialized());

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "€");
    }

    #[test]
    fn test_init_keeps_existing_without_force() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TallyPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut custom = Settings::default();
        custom.currency_symbol = "$".into();
        custom.save(&paths).unwrap();

        let init = Some(ConfigCommands::Init { force: false });
        handle_config_command(&paths, &custom, init).unwrap();
        assert_eq!(Settings::load_or_create(&paths).unwrap().currency_symbol, "$");

        handle_config_command(&paths, &custom, Some(ConfigCommands::Init { force: true })).unwrap();
        assert_eq!(Settings::load_or_create(&paths).unwrap().currency_symbol, "€");
    }
}
