//! Per-browser session contexts.
//!
//! Each browser gets its own [`Session`], keyed by a random id carried in the
//! `rcheckin_session` cookie. The registry lives in the server state; nothing
//! here is a process-wide singleton.

use crate::models::feedback::Feedback;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use std::time::{Duration, Instant};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "rcheckin_session";

/// Set-once device fingerprint delivered asynchronously by the browser.
/// The first resolved value wins; later values are ignored.
#[derive(Debug, Default)]
pub struct DeviceSlot {
    value: OnceLock<String>,
}

impl DeviceSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the fingerprint if the slot is still empty. Blank values are
    /// ignored. Returns `true` when this call filled the slot.
    pub fn resolve(&self, fingerprint: &str) -> bool {
        let fp = fingerprint.trim();
        if fp.is_empty() {
            return false;
        }
        self.value.set(fp.to_string()).is_ok()
    }

    pub fn get(&self) -> Option<&str> {
        self.value.get().map(String::as_str)
    }

    pub fn is_ready(&self) -> bool {
        self.value.get().is_some()
    }
}

#[derive(Debug)]
pub struct Session {
    pub search_term: String,
    /// Pending message, consumed by the next render.
    pub feedback: Option<Feedback>,
    pub device: DeviceSlot,
    pub authenticated: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            search_term: String::new(),
            feedback: None,
            device: DeviceSlot::new(),
            authenticated: false,
        }
    }

    /// Session with an already resolved device, used by the operator CLI.
    pub fn with_device(fingerprint: &str) -> Self {
        let session = Self::new();
        session.device.resolve(fingerprint);
        session
    }

    pub fn take_feedback(&mut self) -> Option<Feedback> {
        self.feedback.take()
    }
}

pub type SharedSession = Arc<Mutex<Session>>;

/// Lock a session, recovering from a poisoned mutex.
pub fn lock(session: &SharedSession) -> MutexGuard<'_, Session> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Default upper bound on live sessions.
pub const DEFAULT_MAX_SESSIONS: usize = 5_000;

struct Entry {
    session: SharedSession,
    last_seen: Instant,
}

/// Sessions keyed by cookie id. Idle times are tracked here, so pruning
/// never waits on a session that is busy serving a request.
pub struct SessionRegistry {
    sessions: Mutex<HashMap<String, Entry>>,
    idle: Duration,
    max: usize,
}

impl SessionRegistry {
    pub fn new(idle: Duration) -> Self {
        Self::with_capacity(idle, DEFAULT_MAX_SESSIONS)
    }

    /// Registry holding at most `max` sessions; the least recently seen one
    /// is evicted to make room.
    pub fn with_capacity(idle: Duration, max: usize) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            idle,
            max: max.max(1),
        }
    }

    fn map(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Look up the session for `id`, creating a fresh one when the id is
    /// missing, unknown or expired. Returns the effective id.
    pub fn get_or_create(&self, id: Option<&str>) -> (String, SharedSession) {
        let now = Instant::now();
        let mut map = self.map();
        self.prune_locked(&mut map, now);

        if let Some(id) = id
            && let Some(entry) = map.get_mut(id)
        {
            entry.last_seen = now;
            return (id.to_string(), Arc::clone(&entry.session));
        }

        while map.len() >= self.max {
            let oldest = map
                .iter()
                .min_by_key(|(_, e)| e.last_seen)
                .map(|(k, _)| k.clone());
            match oldest {
                Some(k) => {
                    map.remove(&k);
                    tracing::debug!("session registry full, evicted the oldest session");
                }
                None => break,
            }
        }

        let id = Uuid::new_v4().to_string();
        let session = Arc::new(Mutex::new(Session::new()));
        map.insert(
            id.clone(),
            Entry {
                session: Arc::clone(&session),
                last_seen: now,
            },
        );
        (id, session)
    }

    /// Drop sessions idle for longer than the configured limit.
    pub fn prune(&self, now: Instant) -> usize {
        let mut map = self.map();
        self.prune_locked(&mut map, now)
    }

    fn prune_locked(&self, map: &mut HashMap<String, Entry>, now: Instant) -> usize {
        let before = map.len();
        let idle = self.idle;
        map.retain(|_, e| now.saturating_duration_since(e.last_seen) <= idle);
        before - map.len()
    }

    pub fn len(&self) -> usize {
        self.map().len()
    }

    pub fn is_empty(&self) -> bool {
        self.map().is_empty()
    }
}
