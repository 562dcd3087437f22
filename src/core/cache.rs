use crate::errors::AppResult;
use std::time::{Duration, Instant};

/// Snapshot cache with a time-to-live and explicit invalidation.
#[derive(Debug)]
pub struct TtlCache<T> {
    ttl: Duration,
    slot: Option<(Instant, T)>,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, slot: None }
    }

    /// Cached value if it is still fresh.
    pub fn get(&self) -> Option<T> {
        match &self.slot {
            Some((at, value)) if at.elapsed() < self.ttl => Some(value.clone()),
            _ => None,
        }
    }

    pub fn put(&mut self, value: T) {
        self.slot = Some((Instant::now(), value));
    }

    pub fn get_or_load<F>(&mut self, load: F) -> AppResult<T>
    where
        F: FnOnce() -> AppResult<T>,
    {
        if let Some(v) = self.get() {
            return Ok(v);
        }
        let value = load()?;
        self.put(value.clone());
        Ok(value)
    }

    pub fn invalidate(&mut self) {
        self.slot = None;
    }
}
