//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::cache::CacheStatus;
use crate::mvg::Incident;

/// Query parameters for fetching incidents.
#[derive(Debug, Default, Deserialize)]
pub struct GetIncidentsRequest {
    /// Refresh the cache even if it is still fresh.
    #[serde(default)]
    pub force_refresh: bool,
}

/// Query parameters for searching incidents.
#[derive(Debug, Deserialize)]
pub struct SearchIncidentsRequest {
    /// Search query; matches title, description, and line labels.
    pub query: Option<String>,

    /// Restrict to incidents affecting this exact line label, e.g. "U6".
    pub line: Option<String>,
}

/// Response for the incident listing.
#[derive(Debug, Serialize)]
pub struct IncidentsResponse {
    /// Current incidents, feed order.
    pub incidents: Vec<Incident>,

    /// Number of incidents returned.
    pub count: usize,

    /// Cache status at the time of the response.
    pub cache_info: CacheStatus,
}

/// Response for an incident search.
#[derive(Debug, Serialize)]
pub struct SearchIncidentsResponse {
    /// Matching incidents, source order.
    pub incidents: Vec<Incident>,

    /// Number of matches.
    pub count: usize,

    /// The query that was searched for.
    pub query: String,

    /// The line filter, if one was applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<String>,

    /// Size of the collection that was searched.
    pub total_incidents: usize,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Machine-readable error kind ("validation", "network",
    /// "upstream_format", "internal").
    pub kind: String,

    /// Human-readable error message.
    pub error: String,
}
