//! Backend payload models.
//!
//! `Work` mirrors the OpenAlex-shaped records returned by the backend.
//! The client treats the payload as opaque: unknown fields are carried in
//! a flattened `extra` map and handed back out unmodified. The accessor
//! methods only dedupe the fields the card renderer displays.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An academic work as returned by the backend search endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Work {
    /// OpenAlex work ID
    #[serde(default)]
    pub id: Option<String>,

    /// Work title
    #[serde(default)]
    pub title: Option<String>,

    /// Author/institution attributions
    #[serde(default)]
    pub authorships: Vec<Authorship>,

    /// Field-weighted citation impact
    #[serde(default)]
    pub fwci: Option<f64>,

    /// Publication date (ISO format, passed through as-is)
    #[serde(default)]
    pub publication_date: Option<String>,

    /// Everything else the backend sent, preserved untouched
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Work {
    /// Title for display, with a fallback for untitled records.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("No Title")
    }

    /// Author display names, deduplicated, in first-seen order.
    pub fn author_names(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for authorship in &self.authorships {
            if let Some(name) = authorship.author.display_name.as_deref() {
                if !name.is_empty() && !seen.contains(&name) {
                    seen.push(name);
                }
            }
        }
        seen
    }

    /// Institution display names across all authorships, deduplicated.
    pub fn affiliations(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for authorship in &self.authorships {
            for institution in &authorship.institutions {
                if let Some(name) = institution.display_name.as_deref() {
                    if !name.is_empty() && !seen.contains(&name) {
                        seen.push(name);
                    }
                }
            }
        }
        seen
    }
}

/// One author's attribution on a work.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Authorship {
    #[serde(default)]
    pub author: Author,

    #[serde(default)]
    pub institutions: Vec<Institution>,
}

/// Author identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub display_name: Option<String>,
}

/// An institution attached to an authorship or author profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Institution {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub display_name: Option<String>,
}

/// A PCSAS-accredited program.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    pub program_name: String,

    #[serde(default)]
    pub website: Option<String>,

    #[serde(default)]
    pub student_outcomes_link: Option<String>,
}

/// A university from the cross-search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct University {
    pub name: String,

    #[serde(default)]
    pub website: Option<String>,
}

/// Author profile details.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthorDetails {
    #[serde(default)]
    pub last_known_institutions: Vec<Institution>,

    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl AuthorDetails {
    /// Display name of the author's most recent institution, if known.
    pub fn current_institution(&self) -> Option<&str> {
        self.last_known_institutions
            .iter()
            .find_map(|i| i.display_name.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn work_from_json(json: serde_json::Value) -> Work {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_deserialize_openalex_shape() {
        let work = work_from_json(serde_json::json!({
            "id": "https://openalex.org/W1",
            "title": "A Study",
            "fwci": 1.5,
            "publication_date": "2001-06-01",
            "cited_by_count": 42,
            "authorships": [
                {
                    "author": {"id": "A1", "display_name": "Jane Roe"},
                    "institutions": [{"display_name": "State University"}]
                }
            ]
        }));

        assert_eq!(work.display_title(), "A Study");
        assert_eq!(work.fwci, Some(1.5));
        assert_eq!(work.author_names(), vec!["Jane Roe"]);
        assert_eq!(work.affiliations(), vec!["State University"]);
        // Unknown fields survive the round trip
        assert_eq!(work.extra["cited_by_count"], 42);
    }

    #[test]
    fn test_author_and_affiliation_dedup() {
        let work = work_from_json(serde_json::json!({
            "title": "Co-authored",
            "authorships": [
                {
                    "author": {"display_name": "Jane Roe"},
                    "institutions": [{"display_name": "State University"}]
                },
                {
                    "author": {"display_name": "Jane Roe"},
                    "institutions": [
                        {"display_name": "State University"},
                        {"display_name": ""}
                    ]
                },
                {
                    "author": {"display_name": "John Doe"},
                    "institutions": []
                }
            ]
        }));

        assert_eq!(work.author_names(), vec!["Jane Roe", "John Doe"]);
        assert_eq!(work.affiliations(), vec!["State University"]);
    }

    #[test]
    fn test_missing_fields_default() {
        let work = work_from_json(serde_json::json!({}));
        assert_eq!(work.display_title(), "No Title");
        assert!(work.author_names().is_empty());
        assert!(work.affiliations().is_empty());
    }
}
