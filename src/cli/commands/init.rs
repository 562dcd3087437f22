use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::store;
use crate::ui::messages::{info, success, warning};

/// Handle the `init` command
///
/// This initializes:
///  - the configuration file (with the effective store location)
///  - the store: worksheets with headers and default settings, or the SQLite schema
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Init { admin_password } = cmd else {
        return Ok(());
    };

    let mut cfg = cfg.clone();
    if let Some(pw) = admin_password {
        cfg.admin_password = pw.clone();
    }
    if cfg.store.trim().is_empty() {
        cfg.store = cfg.store_path().to_string_lossy().to_string();
    }

    let path = cfg.source.clone().unwrap_or_else(Config::config_file);

    info("Initializing rcheckin…");
    info(format!("Config file : {}", path.display()));
    info(format!("Store       : {} ({:?})", cfg.store_path().display(), cfg.backend));

    cfg.save(&path)?;

    let mut repo = store::create(&cfg)?;
    success(format!("Store initialized at {}", cfg.store_path().display()));

    if cfg.admin_secret().is_empty() {
        warning("No admin password configured: the admin panel is disabled.");
    }

    let name = repo.name();
    if let Err(e) = repo.log("init", &name, "Store initialized") {
        warning(format!("Failed to write operation journal: {e}"));
    }

    success("rcheckin initialization completed!");
    Ok(())
}
