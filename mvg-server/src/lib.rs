//! MVG disruption server.
//!
//! Fetches Störung (disruption) notices from the Munich public transport
//! (MVG) message feed, caches them in memory with a minimum freshness
//! window, and serves them over a small HTTP query API.

pub mod cache;
pub mod mvg;
pub mod search;
pub mod web;
