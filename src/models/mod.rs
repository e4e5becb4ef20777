//! Core data models for search sessions and backend payloads.

mod page;
mod query;
mod work;

pub use page::{PageView, ResultPage};
pub use query::{SearchParams, DEFAULT_COUNTRY_CODE, DEFAULT_FROM_YEAR};
pub use work::{Author, AuthorDetails, Authorship, Institution, Program, University, Work};
