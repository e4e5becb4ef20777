//! HTTP client for the Research Network Hub backend.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;
use url::Url;

use crate::api::{ApiError, WorkFetcher};
use crate::models::{AuthorDetails, Program, ResultPage, SearchParams, University, Work};

/// Client for the backend REST API.
///
/// Issues plain GET requests; does not cache and does not retry. Paging
/// and caching live in [`crate::pager`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client for the given backend base URL.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    /// Create a client with an explicit request timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::InvalidRequest(format!("invalid base URL: {}", e)))?;

        let client = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// The backend base URL this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::InvalidRequest(format!("invalid endpoint {}: {}", path, e)))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        tracing::debug!(%url, "GET");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: format!("request to {} failed", url.path()),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Fetch the topic field catalog (`/api/v1/fields`).
    pub async fn fields(&self) -> Result<BTreeMap<String, String>, ApiError> {
        let url = self.endpoint("/api/v1/fields")?;
        let data: FieldsResponse = self.get_json(url).await?;
        Ok(data.fields)
    }

    /// Search academic works (`/api/v1/search`).
    pub async fn search(
        &self,
        params: &SearchParams,
        page: u32,
        per_page: usize,
    ) -> Result<Vec<Work>, ApiError> {
        let mut url = self.endpoint("/api/v1/search")?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("search_term", &params.search_term);
            query.append_pair("from_year", &params.from_year.to_string());
            query.append_pair("country_code", &params.country_code);
            for id in &params.topic_ids {
                query.append_pair("topic_ids", id);
            }
            query.append_pair("page", &page.to_string());
            query.append_pair("per_page", &per_page.to_string());
        }

        let data: WorksResponse = self.get_json(url).await?;
        Ok(data.works)
    }

    /// Fetch the PCSAS accredited program list (`/api/v1/pcsas`).
    pub async fn pcsas_programs(&self) -> Result<Vec<Program>, ApiError> {
        let url = self.endpoint("/api/v1/pcsas")?;
        let data: ProgramsResponse = self.get_json(url).await?;
        Ok(data.programs)
    }

    /// Fetch the works of one author (`/api/v1/author_works/{id}`).
    pub async fn author_works(&self, author_id: &str) -> Result<Vec<Work>, ApiError> {
        let path = format!("/api/v1/author_works/{}", urlencoding::encode(author_id));
        let data: WorksResponse = self.get_json(self.endpoint(&path)?).await?;
        Ok(data.works)
    }

    /// Fetch an author's profile details (`/api/v1/author_details/{id}`).
    pub async fn author_details(&self, author_id: &str) -> Result<AuthorDetails, ApiError> {
        let path = format!("/api/v1/author_details/{}", urlencoding::encode(author_id));
        let data: AuthorDetailsResponse = self.get_json(self.endpoint(&path)?).await?;
        Ok(data.author)
    }

    /// Cross-search the universities common to the top works for a term
    /// (`/api/v1/cross_search_universities`).
    pub async fn cross_search_universities(
        &self,
        search_term: &str,
        top_x_works: usize,
    ) -> Result<Vec<University>, ApiError> {
        let mut url = self.endpoint("/api/v1/cross_search_universities")?;
        url.query_pairs_mut()
            .append_pair("search_term", search_term)
            .append_pair("top_x_works", &top_x_works.to_string());

        let data: CrossSearchResponse = self.get_json(url).await?;
        Ok(data.common_universities)
    }
}

#[async_trait]
impl WorkFetcher for ApiClient {
    async fn fetch_page(
        &self,
        params: &SearchParams,
        page: u32,
        per_page: usize,
    ) -> Result<ResultPage, ApiError> {
        let works = self.search(params, page, per_page).await?;
        Ok(ResultPage::new(page, works, per_page))
    }
}

// ===== Response envelopes =====

#[derive(Debug, Deserialize)]
struct FieldsResponse {
    fields: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct WorksResponse {
    works: Vec<Work>,
}

#[derive(Debug, Deserialize)]
struct ProgramsResponse {
    programs: Vec<Program>,
}

#[derive(Debug, Deserialize)]
struct AuthorDetailsResponse {
    author: AuthorDetails,
}

#[derive(Debug, Deserialize)]
struct CrossSearchResponse {
    common_universities: Vec<University>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_base_url() {
        assert!(matches!(
            ApiClient::new("not a url"),
            Err(ApiError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_base_url_parsed() {
        let client = ApiClient::new("http://localhost:8000").unwrap();
        assert_eq!(client.base_url().scheme(), "http");
    }
}
