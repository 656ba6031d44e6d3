//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::IncidentCache;
use crate::mvg::MvgClient;

/// Shared application state.
///
/// One incident cache instance serves all requests for the process
/// lifetime; handlers get an explicit handle rather than a global.
#[derive(Clone)]
pub struct AppState {
    /// Cached incident feed
    pub cache: Arc<IncidentCache<MvgClient>>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(cache: IncidentCache<MvgClient>) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }
}
