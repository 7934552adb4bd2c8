//! Test utilities and helper functions for the recipe search test suite

use kodegen_tools_recipe_search::ClientConfig;
use mockito::{Matcher, Mock, ServerGuard};
use std::time::Duration;

pub const TEST_API_KEY: &str = "test-key";

/// Sets up a mock HTTP server standing in for the recipe API
#[allow(dead_code)]
pub async fn setup_mock_server() -> ServerGuard {
    mockito::Server::new_async().await
}

/// Client configuration pointed at `server` with a short debounce window
#[allow(dead_code)]
pub fn test_config(server: &ServerGuard) -> ClientConfig {
    ClientConfig::builder()
        .api_key(TEST_API_KEY)
        .api_base_url(server.url())
        .debounce(Duration::from_millis(20))
        .request_timeout_secs(Some(5))
        .build()
        .expect("test config must build")
}

/// Search response body for `(id, title)` matches
#[allow(dead_code)]
pub fn search_body(matches: &[(u64, &str)]) -> String {
    let results: Vec<_> = matches
        .iter()
        .map(|(id, title)| {
            serde_json::json!({
                "id": id,
                "title": title,
                "image": format!("https://img.example.com/{id}.jpg"),
                "imageType": "jpg",
            })
        })
        .collect();
    serde_json::json!({
        "results": results,
        "offset": 0,
        "number": matches.len(),
        "totalResults": matches.len(),
    })
    .to_string()
}

/// Detail response body with the given source URL
#[allow(dead_code)]
pub fn information_body(id: u64, source_url: &str) -> String {
    serde_json::json!({
        "id": id,
        "title": format!("Recipe {id}"),
        "readyInMinutes": 30,
        "sourceUrl": source_url,
    })
    .to_string()
}

/// Creates a search endpoint mock for `query`
#[allow(dead_code)]
pub async fn mock_search(server: &mut ServerGuard, query: &str, status: usize, body: &str) -> Mock {
    server
        .mock("GET", "/recipes/complexSearch")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("query".into(), query.into()),
            Matcher::UrlEncoded("number".into(), "5".into()),
            Matcher::UrlEncoded("apiKey".into(), TEST_API_KEY.into()),
        ]))
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

/// Creates a detail endpoint mock for recipe `id`
#[allow(dead_code)]
pub async fn mock_information(server: &mut ServerGuard, id: u64, status: usize, body: &str) -> Mock {
    server
        .mock("GET", format!("/recipes/{id}/information").as_str())
        .match_query(Matcher::UrlEncoded("apiKey".into(), TEST_API_KEY.into()))
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

/// Matches any detail request and expects exactly `hits` of them
#[allow(dead_code)]
pub async fn mock_any_information(server: &mut ServerGuard, hits: usize) -> Mock {
    server
        .mock("GET", Matcher::Regex(r"^/recipes/\d+/information".to_string()))
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("{}")
        .expect(hits)
        .create_async()
        .await
}
