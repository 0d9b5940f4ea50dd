use arc_swap::ArcSwapOption;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;

/// Payload and the time it was fetched
#[derive(Debug)]
pub struct CachedEntry<T> {
    pub data: Arc<T>,
    pub last_updated_at: DateTime<Utc>,
}

/// Single-entry cache with a fixed time-to-live.
///
/// Writes replace the whole entry through one atomic pointer swap, so there is
/// no lock and no way to observe `data` without its matching timestamp.
#[derive(Debug)]
pub struct CacheSlot<T> {
    entry: ArcSwapOption<CachedEntry<T>>,
    ttl: Duration,
}

impl<T> CacheSlot<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entry: ArcSwapOption::empty(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Current snapshot, fresh or not
    pub fn read(&self) -> Option<Arc<CachedEntry<T>>> {
        self.entry.load_full()
    }

    /// True iff the slot holds data and `now - last_updated_at < ttl`.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        match &*self.entry.load() {
            Some(entry) => Self::entry_is_fresh(entry, now, self.ttl),
            None => false,
        }
    }

    /// Fresh snapshot only, checked against the same loaded entry
    pub fn read_fresh(&self, now: DateTime<Utc>) -> Option<Arc<CachedEntry<T>>> {
        self.read().filter(|entry| Self::entry_is_fresh(entry, now, self.ttl))
    }

    pub fn replace(&self, data: Arc<T>, now: DateTime<Utc>) {
        self.entry.store(Some(Arc::new(CachedEntry {
            data,
            last_updated_at: now,
        })));
    }

    fn entry_is_fresh(entry: &CachedEntry<T>, now: DateTime<Utc>, ttl: Duration) -> bool {
        // A negative age means the wall clock went backwards; keep serving.
        match (now - entry.last_updated_at).to_std() {
            Ok(age) => age < ttl,
            Err(_) => true,
        }
    }
}
