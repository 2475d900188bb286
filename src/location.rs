//! Location search.
//!
//! Geocoding is an external collaborator; this module defines the interface
//! the configurator consumes, a stub implementation, and a trailing debounce
//! that only lets the last query of a burst through.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;

/// Default quiet period before a query is sent.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// One geocoding hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub display_name: String,
    /// `[lng, lat]`
    pub center: [f64; 2],
}

/// A free-text location lookup.
pub trait LocationSearch {
    fn search(&self, query: &str) -> Result<Vec<SearchResult>>;
}

/// Lookup that never finds anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct StubGeocoder;

impl LocationSearch for StubGeocoder {
    fn search(&self, _query: &str) -> Result<Vec<SearchResult>> {
        Ok(Vec::new())
    }
}

/// Run a search, turning any failure into an empty result set.
pub fn search_or_empty(service: &dyn LocationSearch, query: &str) -> Vec<SearchResult> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }

    service.search(query).unwrap_or_else(|e| {
        warn!(error = %e, query, "location search failed");
        Vec::new()
    })
}

/// Trailing debounce around a `LocationSearch`.
///
/// `submit` records the latest query; `poll` runs it once the quiet period has
/// elapsed without a newer submission. Time is passed in so callers control
/// the clock.
#[derive(Debug)]
pub struct DebouncedSearch<L: LocationSearch> {
    service: L,
    window: Duration,
    pending: Option<(String, Instant)>,
}

impl<L: LocationSearch> DebouncedSearch<L> {
    pub fn new(service: L, window: Duration) -> Self {
        Self {
            service,
            window,
            pending: None,
        }
    }

    /// Queue `query`, replacing any query not yet sent.
    pub fn submit(&mut self, query: impl Into<String>, now: Instant) {
        self.pending = Some((query.into(), now));
    }

    /// Run the pending query if it has been quiet for the whole window.
    pub fn poll(&mut self, now: Instant) -> Option<Vec<SearchResult>> {
        let (_, submitted) = self.pending.as_ref()?;
        if now.duration_since(*submitted) < self.window {
            return None;
        }
        let (query, _) = self.pending.take()?;
        Some(search_or_empty(&self.service, &query))
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}
