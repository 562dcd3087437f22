//! Request boundary: composes the store, the caches, the gate and the engine,
//! and turns every failure into user-facing feedback.

use crate::config::Config;
use crate::core::cache::TtlCache;
use crate::core::engine::{self, Outcome};
use crate::core::gate;
use crate::errors::{AppResult, KioskError};
use crate::models::attendee::AttendeeTable;
use crate::models::feedback::Feedback;
use crate::models::settings::EventSettings;
use crate::session::Session;
use crate::store::Repository;
use crate::ui::messages::warning;
use crate::utils::time::{format_hhmm, now_at};
use chrono::{FixedOffset, NaiveDateTime};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

struct Inner {
    store: Box<dyn Repository>,
    attendees: TtlCache<AttendeeTable>,
    settings: TtlCache<EventSettings>,
}

impl Inner {
    /// Append to the operation journal; a failing journal never fails the request.
    fn journal(&mut self, operation: &str, target: &str, message: &str) {
        if let Err(e) = self.store.log(operation, target, message) {
            warning(format!("Failed to write operation journal: {e}"));
            tracing::warn!(error = %e, operation, "journal write failed");
        }
    }
}

pub struct Kiosk {
    inner: Mutex<Inner>,
    store_name: String,
    offset: Option<FixedOffset>,
    secret: String,
}

impl Kiosk {
    pub fn new(store: Box<dyn Repository>, cfg: &Config) -> AppResult<Self> {
        Ok(Self::with_parts(
            store,
            cfg.attendee_ttl(),
            cfg.settings_ttl(),
            cfg.offset()?,
            cfg.admin_secret(),
        ))
    }

    pub fn with_parts(
        store: Box<dyn Repository>,
        attendee_ttl: Duration,
        settings_ttl: Duration,
        offset: Option<FixedOffset>,
        secret: String,
    ) -> Self {
        let store_name = store.name();
        Self {
            inner: Mutex::new(Inner {
                store,
                attendees: TtlCache::new(attendee_ttl),
                settings: TtlCache::new(settings_ttl),
            }),
            store_name,
            offset,
            secret,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn store_name(&self) -> &str {
        &self.store_name
    }

    /// Wall-clock time at the event location.
    pub fn now(&self) -> NaiveDateTime {
        now_at(self.offset)
    }

    /// Current settings, served from the short-lived cache.
    pub fn settings(&self) -> AppResult<EventSettings> {
        let mut guard = self.lock();
        let Inner {
            store, settings, ..
        } = &mut *guard;
        settings.get_or_load(|| store.load_settings())
    }

    /// Attendee snapshot for views; mutating requests always read fresh.
    pub fn attendees(&self) -> AppResult<AttendeeTable> {
        let mut guard = self.lock();
        let Inner {
            store, attendees, ..
        } = &mut *guard;
        attendees.get_or_load(|| store.load_attendees())
    }

    /// Handle one confirm action for `session`. The resulting feedback is also
    /// left pending on the session for the next render.
    pub fn confirm(&self, session: &mut Session, identifier: &str, now: NaiveDateTime) -> Feedback {
        session.search_term = identifier.trim().to_string();

        let feedback = match self.try_confirm(session, identifier, now) {
            Ok(outcome) => outcome.feedback(),
            Err(e) => e.into(),
        };

        session.search_term.clear();
        session.feedback = Some(feedback.clone());
        feedback
    }

    fn try_confirm(
        &self,
        session: &Session,
        identifier: &str,
        now: NaiveDateTime,
    ) -> Result<Outcome, KioskError> {
        let fingerprint = session
            .device
            .get()
            .ok_or(KioskError::FingerprintUnavailable)?
            .to_string();

        let settings = self.settings()?;
        gate::ensure_open(&settings, now.time())?;

        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(KioskError::EmptyInput);
        }

        let mut inner = self.lock();
        let table = inner.store.load_attendees()?;
        let result = engine::process(
            inner.store.as_mut(),
            identifier,
            settings.mode,
            &fingerprint,
            &table,
            now,
        );
        inner.attendees.invalidate();

        let outcome = result?;
        match &outcome {
            Outcome::CheckedIn { name, at, .. } => inner.journal(
                "check-in",
                outcome.employee_id(),
                &format!("{name} checked in at {at} (device {fingerprint})"),
            ),
            Outcome::CheckedOut { name, at, .. } => inner.journal(
                "check-out",
                outcome.employee_id(),
                &format!("{name} checked out at {at}"),
            ),
        }

        Ok(outcome)
    }

    /// Plaintext comparison against the configured secret.
    pub fn admin_login(&self, session: &mut Session, password: &str) -> Result<(), KioskError> {
        if self.secret.is_empty() {
            return Err(KioskError::AdminDisabled);
        }
        if password != self.secret {
            return Err(KioskError::InvalidPassword);
        }
        session.authenticated = true;
        Ok(())
    }

    pub fn admin_logout(&self, session: &mut Session) {
        session.authenticated = false;
    }

    /// Persist new settings. Requires an authenticated session.
    pub fn save_settings(
        &self,
        session: &Session,
        settings: EventSettings,
    ) -> Result<(), KioskError> {
        if !session.authenticated {
            return Err(KioskError::NotAuthenticated);
        }
        self.apply_settings(settings)
    }

    /// Persist new settings once the caller has been authorized.
    pub fn apply_settings(&self, settings: EventSettings) -> Result<(), KioskError> {
        let mut inner = self.lock();
        inner.store.save_settings(&settings)?;
        inner.settings.put(settings);

        let mode = settings.mode.to_db_str();
        inner.journal(
            "settings",
            mode,
            &format!(
                "Mode {mode}, window {}-{}",
                format_hhmm(settings.start),
                format_hhmm(settings.end)
            ),
        );
        Ok(())
    }

    /// Verify the admin secret without a session (operator CLI).
    pub fn verify_secret(&self, password: &str) -> Result<(), KioskError> {
        let mut session = Session::new();
        self.admin_login(&mut session, password)
    }
}
