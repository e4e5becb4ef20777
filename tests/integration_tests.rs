//! Integration tests for the Research Hub client.
//!
//! These tests run the API client and the pager against a mockito HTTP
//! server standing in for the backend.

use mockito::Matcher;
use research_hub::api::{ApiClient, ApiError, WorkFetcher};
use research_hub::models::SearchParams;
use research_hub::pager::{Pager, PagerOptions};
use std::sync::Arc;

const PER_PAGE: usize = 25;

/// Build a `{"works": [...]}` body with `count` OpenAlex-shaped works.
fn works_body(page: u32, count: usize) -> String {
    let works: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            serde_json::json!({
                "id": format!("https://openalex.org/W{}{:03}", page, i),
                "title": format!("Work {} on page {}", i, page),
                "fwci": 1.0,
                "publication_date": "2010-01-01",
                "authorships": [{
                    "author": {"display_name": "Jane Roe"},
                    "institutions": [{"display_name": "State University"}]
                }]
            })
        })
        .collect();
    serde_json::json!({ "works": works }).to_string()
}

fn page_query(term: &str, page: u32) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("search_term".into(), term.into()),
        Matcher::UrlEncoded("from_year".into(), "1980".into()),
        Matcher::UrlEncoded("country_code".into(), "US".into()),
        Matcher::UrlEncoded("page".into(), page.to_string()),
        Matcher::UrlEncoded("per_page".into(), PER_PAGE.to_string()),
    ])
}

#[tokio::test]
async fn test_fields_endpoint() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1/fields")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"fields": {"32": "Psychology", "28": "Neuroscience"}}"#)
        .create_async()
        .await;

    let client = ApiClient::new(&server.url()).unwrap();
    let fields = client.fields().await.unwrap();

    assert_eq!(fields.len(), 2);
    assert_eq!(fields["32"], "Psychology");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_search_sends_all_parameters() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1/search")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("search_term".into(), "psychology".into()),
            Matcher::UrlEncoded("from_year".into(), "1990".into()),
            Matcher::UrlEncoded("country_code".into(), "GB".into()),
            // topic_ids is repeated once per ID
            Matcher::Regex("topic_ids=28".into()),
            Matcher::Regex("topic_ids=32".into()),
            Matcher::UrlEncoded("page".into(), "1".into()),
            Matcher::UrlEncoded("per_page".into(), "25".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(works_body(1, 2))
        .create_async()
        .await;

    let client = ApiClient::new(&server.url()).unwrap();
    let params = SearchParams::new("psychology")
        .from_year(1990)
        .country_code("GB")
        .topic_id("28")
        .topic_id("32");
    let works = client.search(&params, 1, PER_PAGE).await.unwrap();

    assert_eq!(works.len(), 2);
    assert_eq!(works[0].author_names(), vec!["Jane Roe"]);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_non_2xx_maps_to_status_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/v1/fields")
        .with_status(503)
        .with_body("upstream down")
        .create_async()
        .await;

    let client = ApiClient::new(&server.url()).unwrap();
    let err = client.fields().await.unwrap_err();

    assert!(matches!(err, ApiError::Status { status: 503, .. }));
}

#[tokio::test]
async fn test_malformed_body_maps_to_parse_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/v1/fields")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let client = ApiClient::new(&server.url()).unwrap();
    let err = client.fields().await.unwrap_err();

    assert!(matches!(err, ApiError::Parse(_)));
}

#[tokio::test]
async fn test_pcsas_programs_endpoint() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/v1/pcsas")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"programs": [{
                "program_name": "State University (Clinical Science)",
                "website": "https://example.edu",
                "student_outcomes_link": "https://example.edu/outcomes"
            }]}"#,
        )
        .create_async()
        .await;

    let client = ApiClient::new(&server.url()).unwrap();
    let programs = client.pcsas_programs().await.unwrap();

    assert_eq!(programs.len(), 1);
    assert_eq!(programs[0].program_name, "State University (Clinical Science)");
    assert_eq!(programs[0].website.as_deref(), Some("https://example.edu"));
}

#[tokio::test]
async fn test_author_endpoints() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/v1/author_details/A123")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"author": {"last_known_institutions": [{"display_name": "State University"}]}}"#,
        )
        .create_async()
        .await;
    server
        .mock("GET", "/api/v1/author_works/A123")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(works_body(1, 3))
        .create_async()
        .await;

    let client = ApiClient::new(&server.url()).unwrap();

    let details = client.author_details("A123").await.unwrap();
    assert_eq!(details.current_institution(), Some("State University"));

    let works = client.author_works("A123").await.unwrap();
    assert_eq!(works.len(), 3);
}

#[tokio::test]
async fn test_cross_search_endpoint() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1/cross_search_universities")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("search_term".into(), "psychology".into()),
            Matcher::UrlEncoded("top_x_works".into(), "10".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"common_universities": [
                {"name": "State University (Psych)", "website": "https://example.edu"},
                {"name": "Other University", "website": "https://other.edu"}
            ]}"#,
        )
        .create_async()
        .await;

    let client = ApiClient::new(&server.url()).unwrap();
    let universities = client.cross_search_universities("psychology", 10).await.unwrap();

    assert_eq!(universities.len(), 2);
    assert_eq!(universities[0].name, "State University (Psych)");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_page_derives_is_full() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/v1/search")
        .match_query(page_query("psychology", 1))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(works_body(1, 10))
        .create_async()
        .await;

    let client = ApiClient::new(&server.url()).unwrap();
    let page = client
        .fetch_page(&SearchParams::new("psychology"), 1, PER_PAGE)
        .await
        .unwrap();

    assert_eq!(page.page, 1);
    assert_eq!(page.works.len(), 10);
    assert!(!page.is_full);
}

/// End-to-end: a full first page enables next, prefetch fills page 2,
/// and navigating to page 2 is served from cache with exactly one
/// upstream hit for that page.
#[tokio::test]
async fn test_pager_serves_prefetched_page_without_refetch() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/v1/search")
        .match_query(page_query("psychology", 1))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(works_body(1, PER_PAGE))
        .create_async()
        .await;
    let page2 = server
        .mock("GET", "/api/v1/search")
        .match_query(page_query("psychology", 2))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(works_body(2, PER_PAGE))
        .expect(1)
        .create_async()
        .await;
    server
        .mock("GET", "/api/v1/search")
        .match_query(page_query("psychology", 3))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(works_body(3, 5))
        .create_async()
        .await;
    // Page 4 is empty: prefetch stops there
    server
        .mock("GET", "/api/v1/search")
        .match_query(page_query("psychology", 4))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"works": []}"#)
        .create_async()
        .await;

    let client = ApiClient::new(&server.url()).unwrap();
    let pager = Pager::new(
        Arc::new(client),
        PagerOptions {
            per_page: PER_PAGE,
            lookahead: 4,
            hard_limit: 400,
        },
    );

    let first = pager.new_search(SearchParams::new("psychology")).await.unwrap();
    assert_eq!(first.works.len(), PER_PAGE);
    assert!(first.has_next);
    assert!(!first.has_previous);

    pager.settle_prefetch().await;

    let second = pager.go_to_page(2).await.unwrap();
    assert_eq!(second.page, 2);
    assert!(second.has_previous);
    pager.settle_prefetch().await;

    // Page 2 was fetched exactly once, by the prefetcher
    page2.assert_async().await;
}
