//! Snapshot handle for the current page map.
//!
//! [`PageMapIndex`] holds the most recent raw page map for reuse by the
//! query API. The map is an immutable value behind an `Arc`; replacing it is
//! a whole-reference swap, so readers racing a writer observe either the old
//! or the new map, never a partial one. Replacing with an identical map is
//! idempotent and safe from multiple writers.
//!
//! The handle is explicit state the application owns: construct one, query
//! it, drop it. Nothing here reaches into ambient process globals.

use std::sync::{Arc, RwLock};
use std::time::Instant;

use sitenav_pagemap::PageMap;

use crate::error::MalformedTreeError;
use crate::normalize::{NormalizeOptions, Normalized, normalize_pages};
use crate::query;
use crate::summary::PageSummary;

/// Convert elapsed time to milliseconds as f64.
fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// Thread-safe handle to the current page map snapshot.
pub struct PageMapIndex {
    current: RwLock<Arc<PageMap>>,
}

impl PageMapIndex {
    /// Create an index holding the given page map.
    #[must_use]
    pub fn new(page_map: PageMap) -> Self {
        Self {
            current: RwLock::new(Arc::new(page_map)),
        }
    }

    /// Get the current snapshot.
    ///
    /// Returns an `Arc<PageMap>` usable without holding any lock; the map is
    /// internally consistent for as long as the caller keeps the `Arc`.
    ///
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn current(&self) -> Arc<PageMap> {
        self.current.read().unwrap().clone()
    }

    /// Replace the snapshot with a new page map.
    ///
    /// Atomic whole-reference swap. Current readers continue using their
    /// existing `Arc`; new readers see the new map.
    ///
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    pub fn replace(&self, page_map: PageMap) {
        let start = Instant::now();
        let item_count = page_map.items.len();
        *self.current.write().unwrap() = Arc::new(page_map);
        tracing::debug!(
            item_count,
            elapsed_ms = elapsed_ms(start),
            "Page map replaced"
        );
    }

    /// Normalize the current snapshot for a request.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedTreeError`] when the tree nests past the depth
    /// guard.
    pub fn normalize(&self, options: &NormalizeOptions) -> Result<Normalized, MalformedTreeError> {
        normalize_pages(&self.current().items, options)
    }

    /// [`query::get_all_pages`] against the current snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedTreeError`] when the tree nests past the depth
    /// guard.
    pub fn all_pages(
        &self,
        locale: Option<&str>,
    ) -> Result<Vec<PageSummary>, MalformedTreeError> {
        query::get_all_pages(&self.current(), locale)
    }

    /// [`query::get_current_level_pages`] against the current snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedTreeError`] when the tree nests past the depth
    /// guard.
    pub fn current_level_pages(
        &self,
        route: &str,
        locale: Option<&str>,
    ) -> Result<Vec<PageSummary>, MalformedTreeError> {
        query::get_current_level_pages(&self.current(), route, locale)
    }

    /// [`query::get_pages_under_route`] against the current snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedTreeError`] when the tree nests past the depth
    /// guard.
    pub fn pages_under_route(
        &self,
        route: &str,
        locale: Option<&str>,
    ) -> Result<Vec<PageSummary>, MalformedTreeError> {
        query::get_pages_under_route(&self.current(), route, locale)
    }
}

impl Default for PageMapIndex {
    fn default() -> Self {
        Self::new(PageMap::default())
    }
}
