//! MVG message feed client.
//!
//! Key characteristics of the feed:
//! - public JSON endpoint, no authentication
//! - returns all current messages; only `type == "INCIDENT"` matters here
//! - timestamps are Unix milliseconds; `validTo` is absent for ongoing
//!   disruptions
//! - the same line can appear several times within one message

use std::future::Future;
use std::sync::Arc;

mod client;
mod enrich;
mod error;
mod mock;
mod types;

pub use client::{MvgClient, MvgConfig};
pub use enrich::{PROVIDER, enrich_messages};
pub use error::MvgError;
pub use mock::MockFeed;
pub use types::{Incident, Line, RawMessage, TransportType};

/// Source of enriched incidents.
///
/// Implemented by the HTTP client and by [`MockFeed`] for tests. The cache
/// layer is generic over this trait so freshness and single-flight behavior
/// can be exercised without network access.
pub trait IncidentSource: Send + Sync {
    /// Fetch the current incident list from upstream.
    fn fetch_incidents(&self) -> impl Future<Output = Result<Vec<Incident>, MvgError>> + Send;
}

impl<S: IncidentSource> IncidentSource for Arc<S> {
    fn fetch_incidents(&self) -> impl Future<Output = Result<Vec<Incident>, MvgError>> + Send {
        (**self).fetch_incidents()
    }
}
