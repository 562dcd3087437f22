//! rcheckin library root.
//! Exposes the CLI parser, the high-level run() function, and the kiosk modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod models;
pub mod session;
pub mod store;
pub mod ui;
pub mod utils;
pub mod web;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use std::path::Path;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init { .. } => cli::commands::init::handle(&cli.command, cfg),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Check => cli::commands::check::handle(&cli.command, cfg),
        Commands::Import { .. } => cli::commands::import::handle(&cli.command, cfg),
        Commands::Process { .. } => cli::commands::process::handle(&cli.command, cfg),
        Commands::List { .. } => cli::commands::list::handle(&cli.command, cfg),
        Commands::Status => cli::commands::status::handle(&cli.command, cfg),
        Commands::Settings { .. } => cli::commands::settings::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg),
        Commands::Serve { .. } => cli::commands::serve::handle(&cli.command, cfg),
    }
}

/// Load the configuration once and apply the command-line overrides.
pub fn load_config(cli: &Cli) -> AppResult<Config> {
    let mut cfg = Config::load(cli.config.as_deref().map(Path::new))?;

    if let Some(backend) = cli.backend
        && backend != cfg.backend
    {
        cfg.backend = backend;
        // the configured store belongs to the other backend
        if cli.store.is_none() {
            cfg.store = Config::default_store(backend).to_string_lossy().to_string();
        }
    }
    if let Some(store) = &cli.store {
        cfg.store = store.clone();
    }

    Ok(cfg)
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();
    let cfg = load_config(&cli)?;
    dispatch(&cli, &cfg)
}
