use crate::errors::KioskError;
use crate::models::feedback::Feedback;
use crate::models::mode::Mode;
use crate::models::settings::EventSettings;
use crate::session::{SESSION_COOKIE, Session, SharedSession, lock};
use crate::web::{AppState, SharedState};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};

const PAGE: &str = include_str!("static/index.html");

/// Everything the page needs to draw itself.
#[derive(Debug, Serialize)]
pub struct StateView {
    pub version: &'static str,
    pub mode: Mode,
    pub window_start: String,
    pub window_end: String,
    pub open: bool,
    pub ready: bool,
    pub device_id: Option<String>,
    pub search_term: String,
    pub feedback: Option<Feedback>,
    pub authenticated: bool,
}

#[derive(Debug, Deserialize)]
pub struct FingerprintRequest {
    pub visitor_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ConfirmRequest {
    #[serde(default)]
    pub identifier: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SettingsRequest {
    pub mode: String,
    pub start: String,
    pub end: String,
}

/// Resolve the browser's session, issuing a cookie when a new one is created.
fn session_for(state: &AppState, jar: CookieJar) -> (CookieJar, SharedSession) {
    let current = jar.get(SESSION_COOKIE).map(|c| c.value().to_string());
    let (id, session) = state.sessions.get_or_create(current.as_deref());

    if current.as_deref() == Some(id.as_str()) {
        return (jar, session);
    }

    let cookie = Cookie::build((SESSION_COOKIE, id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    (jar.add(cookie), session)
}

/// Build the render view, consuming the pending feedback.
fn render(state: &AppState, session: &mut Session) -> StateView {
    let settings = match state.kiosk.settings() {
        Ok(s) => s,
        Err(e) => {
            if session.feedback.is_none() {
                session.feedback = Some(KioskError::from(e).into());
            }
            EventSettings::default()
        }
    };
    let now = state.kiosk.now().time();

    StateView {
        version: env!("CARGO_PKG_VERSION"),
        mode: settings.mode,
        window_start: crate::utils::time::format_hhmm(settings.start),
        window_end: crate::utils::time::format_hhmm(settings.end),
        open: crate::core::gate::is_open(&settings, now),
        ready: session.device.is_ready(),
        device_id: session.device.get().map(str::to_string),
        search_term: session.search_term.clone(),
        feedback: session.take_feedback(),
        authenticated: session.authenticated,
    }
}

fn admin_status(e: &KioskError) -> StatusCode {
    match e {
        KioskError::InvalidPassword | KioskError::NotAuthenticated => StatusCode::UNAUTHORIZED,
        KioskError::AdminDisabled => StatusCode::FORBIDDEN,
        _ => StatusCode::OK,
    }
}

fn admin_error(e: KioskError) -> Response {
    let status = admin_status(&e);
    (status, Json(Feedback::from(e))).into_response()
}

pub async fn index(State(state): State<SharedState>) -> Html<String> {
    Html(PAGE.replace("{{FINGERPRINT_SCRIPT}}", &state.fingerprint_script))
}

/// Run store-touching kiosk work on the blocking pool.
async fn blocking<F>(work: F) -> Response
where
    F: FnOnce() -> Response + Send + 'static,
{
    match tokio::task::spawn_blocking(work).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(error = %e, "kiosk task failed");
            let body = Json(Feedback::error("Internal error, please try again."));
            (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
        }
    }
}

pub async fn get_state(
    State(state): State<SharedState>,
    jar: CookieJar,
) -> (CookieJar, Response) {
    let (jar, session) = session_for(&state, jar);
    let response = blocking(move || {
        let view = render(&state, &mut lock(&session));
        Json(view).into_response()
    })
    .await;
    (jar, response)
}

pub async fn post_fingerprint(
    State(state): State<SharedState>,
    jar: CookieJar,
    Json(req): Json<FingerprintRequest>,
) -> (CookieJar, Response) {
    let (jar, session) = session_for(&state, jar);
    let response = blocking(move || {
        let mut session = lock(&session);
        if session.device.resolve(&req.visitor_id) {
            tracing::info!(device = %req.visitor_id.trim(), "device fingerprint resolved");
        }
        Json(render(&state, &mut session)).into_response()
    })
    .await;
    (jar, response)
}

pub async fn post_confirm(
    State(state): State<SharedState>,
    jar: CookieJar,
    Json(req): Json<ConfirmRequest>,
) -> (CookieJar, Response) {
    let (jar, session) = session_for(&state, jar);
    let response = blocking(move || {
        let mut session = lock(&session);
        let now = state.kiosk.now();
        let feedback = state.kiosk.confirm(&mut session, &req.identifier, now);
        tracing::info!(
            identifier = %req.identifier.trim(),
            severity = ?feedback.severity,
            "confirm: {}",
            feedback.text
        );
        Json(render(&state, &mut session)).into_response()
    })
    .await;
    (jar, response)
}

pub async fn admin_login(
    State(state): State<SharedState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> (CookieJar, Response) {
    let (jar, session) = session_for(&state, jar);
    let response = blocking(move || {
        let mut session = lock(&session);
        match state.kiosk.admin_login(&mut session, &req.password) {
            Ok(()) => {
                session.feedback = Some(Feedback::success("Authenticated"));
                Json(render(&state, &mut session)).into_response()
            }
            Err(e) => admin_error(e),
        }
    })
    .await;
    (jar, response)
}

pub async fn admin_logout(
    State(state): State<SharedState>,
    jar: CookieJar,
) -> (CookieJar, Response) {
    let (jar, session) = session_for(&state, jar);
    let response = blocking(move || {
        let mut session = lock(&session);
        state.kiosk.admin_logout(&mut session);
        Json(render(&state, &mut session)).into_response()
    })
    .await;
    (jar, response)
}

pub async fn get_settings(
    State(state): State<SharedState>,
    jar: CookieJar,
) -> (CookieJar, Response) {
    let (jar, session) = session_for(&state, jar);
    let response = blocking(move || {
        if !lock(&session).authenticated {
            return admin_error(KioskError::NotAuthenticated);
        }
        match state.kiosk.settings() {
            Ok(settings) => Json(settings).into_response(),
            Err(e) => Json(Feedback::from(KioskError::from(e))).into_response(),
        }
    })
    .await;
    (jar, response)
}

pub async fn put_settings(
    State(state): State<SharedState>,
    jar: CookieJar,
    Json(req): Json<SettingsRequest>,
) -> (CookieJar, Response) {
    let (jar, session) = session_for(&state, jar);
    let response = blocking(move || {
        let session = lock(&session);
        if !session.authenticated {
            return admin_error(KioskError::NotAuthenticated);
        }

        let settings = match EventSettings::from_strings(&req.mode, &req.start, &req.end) {
            Ok(s) => s,
            Err(e) => {
                let body = Json(Feedback::error(e.to_string()));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
        };

        let feedback = match state.kiosk.save_settings(&session, settings) {
            Ok(()) => {
                tracing::info!(mode = settings.mode.to_db_str(), "settings saved");
                Feedback::success("Settings saved!")
            }
            Err(e @ (KioskError::NotAuthenticated | KioskError::AdminDisabled)) => {
                return admin_error(e);
            }
            Err(e) => Feedback::error(format!("Failed to save settings: {e}")),
        };
        Json(feedback).into_response()
    })
    .await;
    (jar, response)
}
