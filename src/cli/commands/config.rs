use crate::cli::parser::Commands;
use crate::config::Config;
use crate::config::migrate::{fill_missing_fields, missing_fields};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{error, info, success, warning};
use std::process::Command;

fn default_editor() -> String {
    std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        })
}

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Config {
        print_config,
        check,
        migrate,
        edit_config,
        editor,
    } = cmd
    else {
        return Ok(());
    };

    let path = cfg.source.clone().unwrap_or_else(Config::config_file);

    if *print_config {
        println!("📄 Current configuration ({}):\n", path.display());
        println!("{}", serde_yaml::to_string(cfg)?);
    }

    if *check {
        if !path.exists() {
            return Err(AppError::Config(format!(
                "{} not found, run `rcheckin init` first",
                path.display()
            )));
        }
        let missing = missing_fields(&path)?;
        if missing.is_empty() {
            success("Configuration is complete.");
        } else {
            warning(format!("Missing fields: {}", missing.join(", ")));
            info("Run `rcheckin config --migrate` to add them with default values.");
        }
        cfg.validate()?;
    }

    if *migrate {
        fill_missing_fields(&path)?;
    }

    if *edit_config {
        let fallback = default_editor();
        let editor_to_use = editor.clone().unwrap_or_else(|| fallback.clone());

        match Command::new(&editor_to_use).arg(&path).status() {
            Ok(s) if s.success() => {
                success(format!(
                    "Configuration file edited successfully using '{editor_to_use}'"
                ));
            }
            Ok(_) | Err(_) => {
                warning(format!(
                    "Editor '{editor_to_use}' not available, falling back to '{fallback}'"
                ));
                match Command::new(&fallback).arg(&path).status() {
                    Ok(s) if s.success() => success(format!(
                        "Configuration file edited successfully using fallback '{fallback}'"
                    )),
                    Ok(_) | Err(_) => error(format!(
                        "Failed to edit configuration file using fallback '{fallback}'"
                    )),
                }
            }
        }
    }

    Ok(())
}
