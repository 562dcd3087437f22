//! HTTP kiosk: one session per browser, JSON API plus a minimal page.

pub mod handlers;

use crate::config::Config;
use crate::core::Kiosk;
use crate::errors::AppResult;
use crate::session::SessionRegistry;
use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_FILTER: &str = "rcheckin=info,tower_http=info";
const PRUNE_INTERVAL: Duration = Duration::from_secs(60);

pub struct AppState {
    pub kiosk: Kiosk,
    pub sessions: SessionRegistry,
    pub fingerprint_script: String,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(kiosk: Kiosk, cfg: &Config) -> Self {
        Self {
            kiosk,
            sessions: SessionRegistry::with_capacity(cfg.session_idle(), cfg.max_sessions),
            fingerprint_script: cfg.fingerprint_script.clone(),
        }
    }
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/state", get(handlers::get_state))
        .route("/api/fingerprint", post(handlers::post_fingerprint))
        .route("/api/confirm", post(handlers::post_confirm))
        .route("/api/admin/login", post(handlers::admin_login))
        .route("/api/admin/logout", post(handlers::admin_logout))
        .route(
            "/api/admin/settings",
            get(handlers::get_settings).put(handlers::put_settings),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `RUST_LOG` wins over the built-in filter.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // a subscriber may already be installed (tests)
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init();
}

pub async fn serve(kiosk: Kiosk, cfg: &Config, bind: &str) -> AppResult<()> {
    let state: SharedState = Arc::new(AppState::new(kiosk, cfg));
    let app = router(Arc::clone(&state));

    let pruner = Arc::clone(&state);
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(PRUNE_INTERVAL);
        loop {
            tick.tick().await;
            let dropped = pruner.sessions.prune(Instant::now());
            if dropped > 0 {
                tracing::debug!(dropped, "pruned idle sessions");
            }
        }
    });

    let listener = TcpListener::bind(bind).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        store = state.kiosk.store_name(),
        "kiosk listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
