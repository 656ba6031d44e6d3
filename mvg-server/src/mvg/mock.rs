//! Mock feed for testing without network access.
//!
//! Serves a configurable message list through the same [`IncidentSource`]
//! interface as the real client, with optional failure injection and an
//! artificial fetch delay for concurrency tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::enrich::enrich_messages;
use super::error::MvgError;
use super::types::{Incident, RawMessage};
use super::IncidentSource;

/// Mock incident source backed by an in-memory message list.
pub struct MockFeed {
    messages: Mutex<Vec<RawMessage>>,
    failure: Mutex<Option<MvgError>>,
    delay: Option<Duration>,
    fetches: AtomicUsize,
}

impl MockFeed {
    /// Create a mock feed serving the given messages.
    pub fn new(messages: Vec<RawMessage>) -> Self {
        Self {
            messages: Mutex::new(messages),
            failure: Mutex::new(None),
            delay: None,
            fetches: AtomicUsize::new(0),
        }
    }

    /// Add an artificial delay to every fetch.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Replace the served message list.
    pub fn set_messages(&self, messages: Vec<RawMessage>) {
        *self.messages.lock().expect("mock feed lock poisoned") = messages;
    }

    /// Make every subsequent fetch fail with the given error.
    pub fn fail_with(&self, error: MvgError) {
        *self.failure.lock().expect("mock feed lock poisoned") = Some(error);
    }

    /// Clear a previously injected failure.
    pub fn clear_failure(&self) {
        *self.failure.lock().expect("mock feed lock poisoned") = None;
    }

    /// Number of fetches issued against this feed so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl IncidentSource for MockFeed {
    async fn fetch_incidents(&self) -> Result<Vec<Incident>, MvgError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let failure = self.failure.lock().expect("mock feed lock poisoned").clone();
        if let Some(error) = failure {
            return Err(error);
        }

        let messages = self.messages.lock().expect("mock feed lock poisoned").clone();
        Ok(enrich_messages(messages))
    }
}
