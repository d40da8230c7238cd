use crate::cli::parser::Commands;
use crate::config::Config;
use crate::config::migrate::upgrade_config_file;
use crate::core::calculator::expected::FlatPolicy;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{error, info, success, warning};
use std::process::Command;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        // ---- PRINT ----
        if *print_config {
            println!("📄 Current configuration ({}):\n", path.display());
            println!("{}", cfg.to_yaml()?);
        }

        // ---- CHECK / UPGRADE ----
        if *check {
            if !path.exists() {
                return Err(AppError::Config(format!(
                    "Configuration file not found: {} (run `punchclock init`)",
                    path.display()
                )));
            }

            let added = upgrade_config_file(&path)?;
            if added.is_empty() {
                success("Configuration file is up to date.");
            } else {
                warning(format!("Added missing fields: {}", added.join(", ")));
            }

            // values must also make sense
            let reloaded = Config::load()?;
            FlatPolicy::from_config(&reloaded)?;
            info(format!(
                "Expected daily hours: {} | rest days: {}",
                reloaded.expected_daily_hours,
                reloaded.rest_days.join(", ")
            ));
        }

        // ---- EDIT ----
        if *edit_config {
            let default_editor = std::env::var("EDITOR")
                .or_else(|_| std::env::var("VISUAL"))
                .unwrap_or_else(|_| {
                    if cfg!(target_os = "windows") {
                        "notepad".to_string()
                    } else {
                        "nano".to_string()
                    }
                });

            let editor_to_use = editor.clone().unwrap_or_else(|| default_editor.clone());

            match Command::new(&editor_to_use).arg(&path).status() {
                Ok(s) if s.success() => {
                    success(format!(
                        "Configuration file edited successfully using '{}'",
                        editor_to_use
                    ));
                }
                _ if editor_to_use != default_editor => {
                    warning(format!(
                        "Editor '{}' not available, falling back to '{}'",
                        editor_to_use, default_editor
                    ));

                    match Command::new(&default_editor).arg(&path).status() {
                        Ok(s) if s.success() => success(format!(
                            "Configuration file edited successfully using fallback '{}'",
                            default_editor
                        )),
                        _ => error(format!(
                            "Failed to edit configuration file using fallback '{}'",
                            default_editor
                        )),
                    }
                }
                _ => error(format!(
                    "Failed to edit configuration file using '{}'",
                    editor_to_use
                )),
            }
        }
    }

    Ok(())
}
