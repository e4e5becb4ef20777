//! Result page types.

use serde::{Deserialize, Serialize};

use crate::models::Work;

/// One bounded slice of ordered search results, identified by a 1-based
/// page number.
///
/// `is_full` records whether the backend returned exactly the requested
/// page size; a short or empty page signals the end of the result set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultPage {
    /// 1-based page number this slice was fetched as
    pub page: u32,

    /// Works on this page, in backend order
    pub works: Vec<Work>,

    /// Whether the page holds exactly the requested page size
    pub is_full: bool,
}

impl ResultPage {
    /// Build a page from a fetched batch, deriving `is_full` from the
    /// requested page size.
    pub fn new(page: u32, works: Vec<Work>, per_page: usize) -> Self {
        let is_full = works.len() == per_page;
        Self {
            page,
            works,
            is_full,
        }
    }

    /// Whether the page holds no works at all.
    pub fn is_empty(&self) -> bool {
        self.works.is_empty()
    }
}

/// What the pager hands to the rendering layer after a successful page
/// change.
#[derive(Debug, Clone)]
pub struct PageView {
    /// The page that was just committed
    pub page: u32,

    /// Works to render
    pub works: Vec<Work>,

    /// Whether a previous page exists (`page > 1`)
    pub has_previous: bool,

    /// Whether a next page is likely (`is_full` on the fetched page)
    pub has_next: bool,
}
