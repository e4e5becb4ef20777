//! Client-side pagination with a consume-on-read page cache and
//! speculative prefetch.
//!
//! A [`Pager`] owns all state for one search session: the current page,
//! the search parameters, the page cache and the generation counter that
//! invalidates in-flight work after a new search. Page changes resolve
//! from the cache first and fall back to the live fetcher; every
//! successful page change launches a detached prefetch run for the
//! following pages.

pub mod cache;
pub mod prefetch;

pub use cache::PageCache;
pub use prefetch::Prefetcher;

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

use crate::api::{ApiError, WorkFetcher};
use crate::config::Config;
use crate::models::{PageView, SearchParams};

/// Errors surfaced by pager operations.
#[derive(Debug, thiserror::Error)]
pub enum PagerError {
    /// Another page request is in flight; at most one runs at a time
    #[error("a page request is already in flight")]
    Busy,

    /// `go_to_page` before any `new_search`
    #[error("no search has been submitted yet")]
    NoSearch,

    /// Page numbers are 1-based
    #[error("page numbers start at 1")]
    InvalidPage,

    /// A new search replaced this session while the fetch was in flight
    #[error("result discarded: a new search superseded this request")]
    Superseded,

    /// The live fetch failed
    #[error(transparent)]
    Fetch(#[from] ApiError),
}

/// Pager status, visible to the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerStatus {
    /// No request in flight; ready for the next page change
    Idle,
    /// A page fetch is in flight
    Loading,
    /// The last page fetch failed; the page number stays committed
    Error,
}

/// Tunables for a pager instance.
#[derive(Debug, Clone, Copy)]
pub struct PagerOptions {
    /// Results per page
    pub per_page: usize,

    /// Pages prefetched past the current one (0 disables prefetch)
    pub lookahead: u32,

    /// Highest page number the prefetcher will request
    pub hard_limit: u32,
}

impl Default for PagerOptions {
    fn default() -> Self {
        Self {
            per_page: 25,
            lookahead: prefetch::DEFAULT_LOOKAHEAD,
            hard_limit: prefetch::DEFAULT_HARD_LIMIT,
        }
    }
}

impl PagerOptions {
    /// Derive pager options from the application config.
    pub fn from_config(config: &Config) -> Self {
        Self {
            per_page: config.search.per_page,
            lookahead: if config.prefetch.enabled {
                config.prefetch.lookahead
            } else {
                0
            },
            hard_limit: config.prefetch.hard_limit,
        }
    }
}

#[derive(Debug)]
struct SessionState {
    params: Option<SearchParams>,
    current_page: u32,
    status: PagerStatus,
}

/// One search session: current page, parameters, cache and prefetch.
///
/// All state is owned by the instance — construct one per session. The
/// loading flag is checked at entry only (advisory); the generation
/// counter is what actually protects against a slow request finishing
/// after a new search reset the session.
#[derive(Debug)]
pub struct Pager {
    fetcher: Arc<dyn WorkFetcher>,
    cache: Arc<Mutex<PageCache>>,
    generation: Arc<AtomicU64>,
    prefetcher: Arc<Prefetcher>,
    prefetch_task: Mutex<Option<JoinHandle<()>>>,
    is_loading: AtomicBool,
    state: Mutex<SessionState>,
    per_page: usize,
}

impl Pager {
    /// Create a pager over the given fetcher.
    pub fn new(fetcher: Arc<dyn WorkFetcher>, options: PagerOptions) -> Self {
        let cache = Arc::new(Mutex::new(PageCache::new()));
        let generation = Arc::new(AtomicU64::new(0));
        let prefetcher = Arc::new(Prefetcher::new(
            fetcher.clone(),
            cache.clone(),
            generation.clone(),
            options.per_page,
            options.lookahead,
            options.hard_limit,
        ));

        Self {
            fetcher,
            cache,
            generation,
            prefetcher,
            prefetch_task: Mutex::new(None),
            is_loading: AtomicBool::new(false),
            state: Mutex::new(SessionState {
                params: None,
                current_page: 0,
                status: PagerStatus::Idle,
            }),
            per_page: options.per_page,
        }
    }

    /// Start a new search session: replaces the parameters, clears the
    /// page cache, resets the current page and loads page 1.
    ///
    /// Bumping the generation first means any in-flight page fetch or
    /// prefetch run from the previous session discards its result.
    pub async fn new_search(&self, params: SearchParams) -> Result<PageView, PagerError> {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.cache.lock().unwrap().clear();
        {
            let mut state = self.state.lock().unwrap();
            state.params = Some(params);
            state.current_page = 0;
            state.status = PagerStatus::Idle;
        }
        self.go_to_page(1).await
    }

    /// Navigate to page `page` (1-based) of the current search.
    ///
    /// Resolution order: cache `take` first, live fetch on a miss. The
    /// page number is committed before the fetch, so a failed fetch
    /// leaves the session in `Error` at that page.
    pub async fn go_to_page(&self, page: u32) -> Result<PageView, PagerError> {
        if page == 0 {
            return Err(PagerError::InvalidPage);
        }
        if self.is_loading.swap(true, Ordering::SeqCst) {
            return Err(PagerError::Busy);
        }

        let generation = self.generation.load(Ordering::SeqCst);
        let params = {
            let mut state = self.state.lock().unwrap();
            let Some(params) = state.params.clone() else {
                self.is_loading.store(false, Ordering::SeqCst);
                return Err(PagerError::NoSearch);
            };
            state.current_page = page;
            state.status = PagerStatus::Loading;
            params
        };

        let cached = self.cache.lock().unwrap().take(page);
        let result = match cached {
            Some(result_page) => {
                tracing::debug!(page, "serving page from cache");
                Ok(result_page)
            }
            None => self.fetcher.fetch_page(&params, page, self.per_page).await,
        };

        // A new search may have reset the session while we were waiting;
        // its state must not be overwritten with this stale result.
        if self.generation.load(Ordering::SeqCst) != generation {
            self.is_loading.store(false, Ordering::SeqCst);
            return Err(PagerError::Superseded);
        }

        match result {
            Ok(result_page) => {
                let view = PageView {
                    page,
                    has_previous: page > 1,
                    has_next: result_page.is_full,
                    works: result_page.works,
                };
                self.state.lock().unwrap().status = PagerStatus::Idle;
                self.launch_prefetch(params, page, generation);
                self.is_loading.store(false, Ordering::SeqCst);
                Ok(view)
            }
            Err(err) => {
                tracing::warn!(page, error = %err, "page fetch failed");
                self.state.lock().unwrap().status = PagerStatus::Error;
                self.is_loading.store(false, Ordering::SeqCst);
                Err(PagerError::Fetch(err))
            }
        }
    }

    fn launch_prefetch(&self, params: SearchParams, from_page: u32, generation: u64) {
        if self.prefetcher.lookahead() == 0 {
            return;
        }
        let prefetcher = Arc::clone(&self.prefetcher);
        let handle = tokio::spawn(async move {
            prefetcher.run(params, from_page, generation).await;
        });
        *self.prefetch_task.lock().unwrap() = Some(handle);
    }

    /// Wait for the most recently launched prefetch run to finish.
    ///
    /// Prefetch is fire-and-forget in normal operation; this exists for
    /// graceful shutdown and deterministic tests.
    pub async fn settle_prefetch(&self) {
        let handle = self.prefetch_task.lock().unwrap().take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }

    /// Current page, 0 while no search has been submitted.
    pub fn current_page(&self) -> u32 {
        self.state.lock().unwrap().current_page
    }

    /// Current pager status.
    pub fn status(&self) -> PagerStatus {
        self.state.lock().unwrap().status
    }

    /// Whether a page request is in flight.
    pub fn is_loading(&self) -> bool {
        self.is_loading.load(Ordering::SeqCst)
    }

    /// Parameters of the current search session, if any.
    pub fn params(&self) -> Option<SearchParams> {
        self.state.lock().unwrap().params.clone()
    }

    /// Number of pages currently cached (prefetched and not yet consumed).
    pub fn cached_pages(&self) -> usize {
        self.cache.lock().unwrap().len()
    }

    /// The fetcher this pager resolves misses against.
    pub fn fetcher(&self) -> &Arc<dyn WorkFetcher> {
        &self.fetcher
    }
}
