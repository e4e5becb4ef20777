//! Mock fetcher for testing the pagination machinery without a backend.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::api::{ApiError, WorkFetcher};
use crate::models::{ResultPage, SearchParams, Work};

/// A [`WorkFetcher`] returning scripted per-page responses.
///
/// Unscripted pages come back empty (end of results). Every fetch is
/// recorded so tests can assert exactly which pages hit the "network".
#[derive(Debug, Default)]
pub struct MockFetcher {
    pages: Mutex<HashMap<u32, Result<Vec<Work>, ApiError>>>,
    calls: Mutex<Vec<u32>>,
}

impl MockFetcher {
    /// Create an empty mock fetcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script `page` to return `count` stub works.
    pub fn page_with(&self, page: u32, count: usize) {
        let works = (0..count).map(|i| make_work(page, i)).collect();
        self.pages.lock().unwrap().insert(page, Ok(works));
    }

    /// Script `page` to fail with the given HTTP status.
    pub fn fail_page(&self, page: u32, status: u16) {
        self.pages.lock().unwrap().insert(
            page,
            Err(ApiError::Status {
                status,
                message: "scripted failure".to_string(),
            }),
        );
    }

    /// Pages fetched so far, in call order.
    pub fn calls(&self) -> Vec<u32> {
        self.calls.lock().unwrap().clone()
    }

    /// How many times `page` was fetched.
    pub fn call_count(&self, page: u32) -> usize {
        self.calls.lock().unwrap().iter().filter(|p| **p == page).count()
    }
}

#[async_trait]
impl WorkFetcher for MockFetcher {
    async fn fetch_page(
        &self,
        _params: &SearchParams,
        page: u32,
        per_page: usize,
    ) -> Result<ResultPage, ApiError> {
        self.calls.lock().unwrap().push(page);

        let works = match self.pages.lock().unwrap().get(&page) {
            Some(Ok(works)) => works.clone(),
            Some(Err(err)) => return Err(err.clone()),
            None => Vec::new(),
        };

        Ok(ResultPage::new(page, works, per_page))
    }
}

/// Build a stub work for tests.
pub fn make_work(page: u32, index: usize) -> Work {
    Work {
        id: Some(format!("https://openalex.org/W{}-{}", page, index)),
        title: Some(format!("Work {} on page {}", index, page)),
        ..Work::default()
    }
}
