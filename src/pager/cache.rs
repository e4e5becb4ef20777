//! In-memory page cache for one search session.

use std::collections::HashMap;

use crate::models::ResultPage;

/// Cache of fetched result pages, keyed by page number.
///
/// Entries are only ever valid for the search parameters they were
/// fetched under; the pager clears the cache whenever the parameters
/// change, before any new fetch.
#[derive(Debug, Default)]
pub struct PageCache {
    entries: HashMap<u32, ResultPage>,
}

impl PageCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a page, overwriting any existing entry for that number.
    pub fn put(&mut self, page: ResultPage) {
        self.entries.insert(page.page, page);
    }

    /// Return and remove the entry for `page`, if present.
    ///
    /// Consume-on-read: a cached page is handed out exactly once and a
    /// revisit re-fetches. This is the policy chosen for the crate (see
    /// DESIGN.md) — it keeps the cache trivially bounded and coherent.
    pub fn take(&mut self, page: u32) -> Option<ResultPage> {
        self.entries.remove(&page)
    }

    /// Whether an entry for `page` is present.
    pub fn contains(&self, page: u32) -> bool {
        self.entries.contains_key(&page)
    }

    /// Drop all entries. Invoked whenever the search parameters change.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached pages.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no pages.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
