use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::cache::CacheSlot;
use crate::clients::UpstreamAdapter;
use crate::errors::FetchError;

/// Read-through cache in front of one upstream.
///
/// A fresh slot is served as is. Otherwise every read fetches: on success the
/// slot is replaced, on failure it is left untouched and the error goes back to
/// the caller. Stale data is never handed out as a fallback, and concurrent stale
/// reads each fetch on their own (last write wins).
pub struct RefreshCoordinator<A: UpstreamAdapter> {
    adapter: Arc<A>,
    slot: Arc<CacheSlot<A::Payload>>,
}

impl<A: UpstreamAdapter> RefreshCoordinator<A> {
    pub fn new(adapter: A, ttl: Duration) -> Self {
        Self {
            adapter: Arc::new(adapter),
            slot: Arc::new(CacheSlot::new(ttl)),
        }
    }

    pub fn slot(&self) -> &CacheSlot<A::Payload> {
        &self.slot
    }

    /// Serve the feed against the wall clock
    pub async fn get(&self) -> Result<Arc<A::Payload>, FetchError> {
        self.load(Utc::now(), Utc::now).await
    }

    /// Serve the feed as if the current time were `now`
    pub async fn get_at(&self, now: DateTime<Utc>) -> Result<Arc<A::Payload>, FetchError> {
        self.load(now, move || now).await
    }

    async fn load<F>(
        &self,
        now: DateTime<Utc>,
        completed_at: F,
    ) -> Result<Arc<A::Payload>, FetchError>
    where
        F: FnOnce() -> DateTime<Utc> + Send + 'static,
    {
        let name = self.adapter.name();

        if let Some(entry) = self.slot.read_fresh(now) {
            debug!("Cache hit for {} (updated at {})", name, entry.last_updated_at);
            return Ok(entry.data.clone());
        }

        info!(
            "Cache stale or empty for {} (ttl {}s), fetching upstream",
            name,
            self.slot.ttl().as_secs()
        );

        // The fetch and slot write run detached so a disconnecting client
        // cannot abort them halfway.
        let adapter = self.adapter.clone();
        let slot = self.slot.clone();
        let refresh = tokio::spawn(async move {
            let data = Arc::new(adapter.fetch().await?);
            slot.replace(data.clone(), completed_at());
            Ok::<_, FetchError>(data)
        });

        match refresh.await? {
            Ok(data) => {
                info!("Refreshed {} cache", name);
                Ok(data)
            }
            Err(e) => {
                warn!("Refreshing {} failed, cache left as is: {}", name, e);
                Err(e)
            }
        }
    }
}
