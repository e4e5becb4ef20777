//! Search session parameters.

use serde::{Deserialize, Serialize};

/// Default starting year for searches.
pub const DEFAULT_FROM_YEAR: i32 = 1980;

/// Default country code for institution filtering.
pub const DEFAULT_COUNTRY_CODE: &str = "US";

/// Parameters for one search session.
///
/// A `SearchParams` value is immutable for the lifetime of a search
/// session: the pager replaces the whole value (and clears its page
/// cache) on every new search rather than mutating fields in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    /// Main search query string
    pub search_term: String,

    /// Only include works published after this year
    pub from_year: i32,

    /// Country code for institution filtering (e.g. "US")
    pub country_code: String,

    /// Topic field IDs to filter by (empty = all topics)
    pub topic_ids: Vec<String>,
}

impl SearchParams {
    /// Create search parameters with the default year and country filters.
    pub fn new(search_term: impl Into<String>) -> Self {
        Self {
            search_term: search_term.into(),
            from_year: DEFAULT_FROM_YEAR,
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
            topic_ids: Vec::new(),
        }
    }

    /// Set the starting year filter.
    pub fn from_year(mut self, year: i32) -> Self {
        self.from_year = year;
        self
    }

    /// Set the country code filter.
    pub fn country_code(mut self, code: impl Into<String>) -> Self {
        self.country_code = code.into();
        self
    }

    /// Add a single topic field ID.
    pub fn topic_id(mut self, id: impl Into<String>) -> Self {
        self.topic_ids.push(id.into());
        self
    }

    /// Replace the topic field IDs.
    pub fn topic_ids(mut self, ids: Vec<String>) -> Self {
        self.topic_ids = ids;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = SearchParams::new("psychology");
        assert_eq!(params.search_term, "psychology");
        assert_eq!(params.from_year, 1980);
        assert_eq!(params.country_code, "US");
        assert!(params.topic_ids.is_empty());
    }

    #[test]
    fn test_builder() {
        let params = SearchParams::new("neuroscience")
            .from_year(2000)
            .country_code("GB")
            .topic_id("28")
            .topic_id("32");
        assert_eq!(params.from_year, 2000);
        assert_eq!(params.country_code, "GB");
        assert_eq!(params.topic_ids, vec!["28", "32"]);
    }
}
