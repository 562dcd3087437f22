use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::Kiosk;
use crate::errors::AppResult;
use crate::store;
use crate::ui::messages::{info, warning};
use crate::web;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Serve { bind } = cmd else {
        return Ok(());
    };

    cfg.validate()?;
    web::init_tracing();

    // an unreachable store halts the server before it starts listening
    let kiosk = Kiosk::new(store::open(cfg)?, cfg)?;
    for w in cfg.serve_warnings() {
        warning(&w);
        tracing::warn!("{w}");
    }

    let bind = bind.clone().unwrap_or_else(|| cfg.bind.clone());
    info(format!("Serving kiosk on http://{bind} (store: {})", kiosk.store_name()));

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(web::serve(kiosk, cfg, &bind))
}
