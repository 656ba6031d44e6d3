//! Caching layer for MVG incident data.
//!
//! The feed is slow-moving, so one in-memory snapshot with a minimum
//! freshness window (default 10 minutes) is enough. Refresh is
//! single-flight: the fetch-and-replace step is serialized, and stale
//! readers that arrive during a fetch observe its single result instead of
//! issuing redundant upstream calls.
//!
//! Policy: a failed fetch propagates to the caller and never falls back to
//! the stale snapshot. Previously cached items stay in place for later
//! fresh reads and for status introspection.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};

use crate::mvg::{Incident, IncidentSource, MvgError};

/// Default minimum freshness window in minutes.
pub const DEFAULT_CACHE_MINUTES: u64 = 10;

/// Configuration for the incident cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Minimum validity window for a fetched snapshot, in minutes.
    pub duration_minutes: u64,
}

impl CacheConfig {
    /// Create a config with the given freshness window.
    pub fn minutes(duration_minutes: u64) -> Self {
        Self { duration_minutes }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            duration_minutes: DEFAULT_CACHE_MINUTES,
        }
    }
}

/// Freshness classification of the cached snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Freshness {
    /// A snapshot exists and is within the freshness window.
    Valid,
    /// A snapshot exists but the freshness window has elapsed.
    Expired,
    /// No successful fetch has happened yet.
    Empty,
}

/// Introspection snapshot of the cache. Pure read, triggers no fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheStatus {
    pub status: Freshness,

    /// Number of incidents currently held.
    pub cached_items: usize,

    /// Time of the last successful fetch, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cached_at: Option<DateTime<Utc>>,

    /// When the current snapshot stops being fresh, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,

    /// Configured freshness window in minutes.
    pub cache_duration_minutes: u64,
}

/// Committed cache contents. Replaced wholesale on each successful fetch.
#[derive(Debug, Default)]
struct CacheState {
    items: Arc<Vec<Incident>>,
    fetched_at: Option<DateTime<Utc>>,
}

/// In-memory incident cache with a minimum freshness window.
///
/// Holds the single shared incident collection for the process. All reads
/// go through [`get_incidents`](Self::get_incidents); the committed state
/// is only mutated by a successful fetch and is lost on process exit.
pub struct IncidentCache<S> {
    source: S,
    duration: TimeDelta,
    duration_minutes: u64,
    /// Last-committed snapshot. Never held across a fetch, so status reads
    /// do not block behind in-flight refreshes.
    state: RwLock<CacheState>,
    /// Serializes the fetch-and-replace step (single-flight).
    refresh: Mutex<()>,
}

impl<S: IncidentSource> IncidentCache<S> {
    /// Create an empty cache in front of the given source.
    pub fn new(source: S, config: &CacheConfig) -> Self {
        Self {
            source,
            duration: TimeDelta::minutes(config.duration_minutes as i64),
            duration_minutes: config.duration_minutes,
            state: RwLock::new(CacheState::default()),
            refresh: Mutex::new(()),
        }
    }

    /// Get the current incidents, fetching from upstream when the snapshot
    /// is stale or `force_refresh` is set.
    ///
    /// On fetch failure the error propagates and the committed state is
    /// left untouched; the stale snapshot is deliberately not returned.
    pub async fn get_incidents(
        &self,
        force_refresh: bool,
    ) -> Result<Arc<Vec<Incident>>, MvgError> {
        if !force_refresh {
            if let Some(items) = self.fresh_items().await {
                tracing::debug!(count = items.len(), "serving incidents from cache");
                return Ok(items);
            }
        }

        let _guard = self.refresh.lock().await;

        // Another caller may have refreshed while we waited for the guard.
        // A forced refresh skips this and always fetches.
        if !force_refresh {
            if let Some(items) = self.fresh_items().await {
                return Ok(items);
            }
        }

        tracing::info!(force_refresh, "fetching fresh incident data from upstream");
        let incidents = self.source.fetch_incidents().await?;
        let items = Arc::new(incidents);

        let now = Utc::now();
        let expires_at = now + self.duration;
        {
            let mut state = self.state.write().await;
            state.items = Arc::clone(&items);
            state.fetched_at = Some(now);
        }
        tracing::info!(count = items.len(), %expires_at, "cached incident snapshot");

        Ok(items)
    }

    /// Current cache status. Reads the last-committed state only.
    pub async fn status(&self) -> CacheStatus {
        let state = self.state.read().await;
        match state.fetched_at {
            None => CacheStatus {
                status: Freshness::Empty,
                cached_items: 0,
                cached_at: None,
                expires_at: None,
                cache_duration_minutes: self.duration_minutes,
            },
            Some(fetched_at) => {
                let expires_at = fetched_at + self.duration;
                let status = if Utc::now() < expires_at {
                    Freshness::Valid
                } else {
                    Freshness::Expired
                };
                CacheStatus {
                    status,
                    cached_items: state.items.len(),
                    cached_at: Some(fetched_at),
                    expires_at: Some(expires_at),
                    cache_duration_minutes: self.duration_minutes,
                }
            }
        }
    }

    /// Return the committed snapshot if it is still fresh.
    async fn fresh_items(&self) -> Option<Arc<Vec<Incident>>> {
        let state = self.state.read().await;
        let fetched_at = state.fetched_at?;
        if Utc::now() - fetched_at < self.duration {
            Some(Arc::clone(&state.items))
        } else {
            None
        }
    }
}
