//! Backend API access.
//!
//! This module defines the [`WorkFetcher`] trait — the seam between the
//! pagination machinery and the network — together with the concrete
//! [`ApiClient`] and the [`MockFetcher`] test double.

mod client;
pub mod mock;

pub use client::ApiClient;
pub use mock::MockFetcher;

use async_trait::async_trait;

use crate::models::{ResultPage, SearchParams};

/// Fetches one page of search results from the backend.
///
/// Pages are 1-based and `per_page` must be positive. An empty or short
/// page signals the end of the result set and is not an error.
#[async_trait]
pub trait WorkFetcher: Send + Sync + std::fmt::Debug {
    /// Fetch page `page` of results for `params`.
    async fn fetch_page(
        &self,
        params: &SearchParams,
        page: u32,
        per_page: usize,
    ) -> Result<ResultPage, ApiError>;
}

/// Errors from backend requests.
///
/// Any non-2xx response maps uniformly to [`ApiError::Status`]; no
/// structured error body is parsed. No retry is performed at this layer.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// Request never produced a response (DNS, connect, timeout, ...)
    #[error("network error: {0}")]
    Network(String),

    /// Backend answered with a non-success status
    #[error("backend returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body could not be decoded
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// Request could not be constructed
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}
