//! # Research Hub
//!
//! A client library and CLI for the Research Network Hub backend:
//! paginated academic work search with a speculative-prefetch page
//! cache, topic field catalog, PCSAS program listings, author lookups
//! and university cross-search.
//!
//! ## Architecture
//!
//! - [`models`]: Core data structures (Work, SearchParams, ResultPage, ...)
//! - [`api`]: Backend HTTP client and the [`api::WorkFetcher`] seam
//! - [`pager`]: Pagination state machine, page cache and prefetcher
//! - [`ui`]: Terminal rendering (cards, tables, status lines)
//! - [`config`]: Configuration management

pub mod api;
pub mod config;
pub mod models;
pub mod pager;
pub mod ui;

// Re-export commonly used types
pub use api::{ApiClient, ApiError, WorkFetcher};
pub use models::{PageView, ResultPage, SearchParams, Work};
pub use pager::{Pager, PagerError, PagerOptions, PagerStatus};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
