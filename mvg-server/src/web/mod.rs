//! Web layer for the MVG disruption server.
//!
//! Provides the HTTP query surface over the incident cache: listing,
//! search, status introspection, and two read-only JSON resources.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
