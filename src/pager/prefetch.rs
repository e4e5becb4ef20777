//! Speculative prefetch of likely-next result pages.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::api::WorkFetcher;
use crate::models::SearchParams;
use crate::pager::cache::PageCache;

/// Hard ceiling on page numbers the prefetcher will request.
pub const DEFAULT_HARD_LIMIT: u32 = 400;

/// How many pages past the current one are prefetched.
pub const DEFAULT_LOOKAHEAD: u32 = 4;

/// Fetches a bounded run of pages after the current one and stores them
/// in the shared page cache.
///
/// Fetches are sequential, one page at a time in page order, to respect
/// backend load. A run stops at the first empty page (end of results),
/// on the first fetch error (logged, swallowed) or when the candidate
/// page exceeds the hard limit. The session generation is re-checked
/// before every cache write so a run orphaned by a new search never
/// stores stale pages.
#[derive(Debug)]
pub struct Prefetcher {
    fetcher: Arc<dyn WorkFetcher>,
    cache: Arc<Mutex<PageCache>>,
    generation: Arc<AtomicU64>,
    per_page: usize,
    lookahead: u32,
    hard_limit: u32,
    active: AtomicBool,
}

impl Prefetcher {
    pub fn new(
        fetcher: Arc<dyn WorkFetcher>,
        cache: Arc<Mutex<PageCache>>,
        generation: Arc<AtomicU64>,
        per_page: usize,
        lookahead: u32,
        hard_limit: u32,
    ) -> Self {
        Self {
            fetcher,
            cache,
            generation,
            per_page,
            lookahead,
            hard_limit,
            active: AtomicBool::new(false),
        }
    }

    /// How many pages this prefetcher looks ahead.
    pub fn lookahead(&self) -> u32 {
        self.lookahead
    }

    /// Prefetch up to `lookahead` pages following `from_page`.
    ///
    /// `generation` is the session generation captured when the run was
    /// triggered; the run goes quiet as soon as it no longer matches.
    /// Only one run is live at a time — a trigger that overlaps a live
    /// run is skipped, since that run already covers the following pages.
    pub async fn run(&self, params: SearchParams, from_page: u32, generation: u64) {
        if self.lookahead == 0 {
            return;
        }
        if self.active.swap(true, Ordering::SeqCst) {
            tracing::debug!(from_page, "prefetch already running, skipping");
            return;
        }
        self.run_inner(params, from_page, generation).await;
        self.active.store(false, Ordering::SeqCst);
    }

    async fn run_inner(&self, params: SearchParams, from_page: u32, generation: u64) {
        let first = from_page + 1;
        for page in first..first + self.lookahead {
            if page > self.hard_limit {
                tracing::debug!(page, limit = self.hard_limit, "prefetch hit page limit");
                break;
            }
            if self.generation.load(Ordering::SeqCst) != generation {
                tracing::debug!(page, "prefetch superseded by a new search");
                return;
            }
            if self.cache.lock().unwrap().contains(page) {
                continue;
            }

            match self.fetcher.fetch_page(&params, page, self.per_page).await {
                Ok(result_page) => {
                    if result_page.is_empty() {
                        tracing::debug!(page, "prefetch reached end of results");
                        break;
                    }
                    // The fetch may have raced a new search; never store
                    // a page for a stale generation.
                    if self.generation.load(Ordering::SeqCst) != generation {
                        tracing::debug!(page, "discarding stale prefetched page");
                        return;
                    }
                    tracing::debug!(page, works = result_page.works.len(), "prefetched page");
                    self.cache.lock().unwrap().put(result_page);
                }
                Err(err) => {
                    // Prefetch failures are non-fatal: the user only pays
                    // if they navigate to the page, which then fetches live.
                    tracing::warn!(page, error = %err, "prefetch failed");
                    break;
                }
            }
        }
    }
}
