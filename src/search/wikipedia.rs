//! Wikipedia Client
//!
//! Two endpoints are used:
//! - MediaWiki OpenSearch (`action=opensearch`) to turn a query into ranked titles and URLs
//! - REST page summary (`/page/summary/{title}`) to fetch the lead extract of each title
//!
//! Both calls share one `reqwest::Client` configured with the per-request timeout.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use tracing::debug;

use crate::config::RetrievalConfig;
use crate::search::provider::{EncyclopediaSource, SearchError, SearchHit};

/// Articles only (MediaWiki main namespace)
const MAIN_NAMESPACE: &str = "0";

pub struct WikipediaClient {
    client: Client,
    search_url: Url,
    summary_url: Url,
}

impl WikipediaClient {
    pub fn new(config: &RetrievalConfig) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(SearchError::ClientBuild)?;

        let search_url = parse_endpoint(&config.search_url)?;
        let summary_url = parse_endpoint(&config.summary_url)?;
        if summary_url.cannot_be_a_base() {
            return Err(SearchError::InvalidEndpoint {
                url: config.summary_url.clone(),
                reason: "summary endpoint must accept path segments".to_string(),
            });
        }

        Ok(Self {
            client,
            search_url,
            summary_url,
        })
    }

    /// Summary URL for `title`, with the title percent-encoded as a single path segment
    fn summary_endpoint(&self, title: &str) -> Url {
        let mut url = self.summary_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(title);
        }
        url
    }
}

#[async_trait]
impl EncyclopediaSource for WikipediaClient {
    async fn open_search(&self, query: &str, count: usize) -> Result<Vec<SearchHit>, SearchError> {
        let limit = count.to_string();
        let response = self
            .client
            .get(self.search_url.clone())
            .query(&[
                ("action", "opensearch"),
                ("search", query),
                ("limit", limit.as_str()),
                ("namespace", MAIN_NAMESPACE),
                ("format", "json"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status));
        }

        let body = response.bytes().await?;
        let hits = parse_open_search(&body)?;
        debug!(query = %query, hits = hits.len(), "OpenSearch response parsed");
        Ok(hits)
    }

    async fn summary(&self, title: &str) -> Result<String, SearchError> {
        let response = self.client.get(self.summary_endpoint(title)).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(SearchError::Status(status));
        }

        let body = response.bytes().await?;
        parse_summary(&body)
    }

    fn name(&self) -> &str {
        "wikipedia"
    }
}

fn parse_endpoint(raw: &str) -> Result<Url, SearchError> {
    Url::parse(raw).map_err(|e| SearchError::InvalidEndpoint {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}

/// OpenSearch answers `[query, [titles], [descriptions], [urls]]`.
///
/// Titles and URLs are paired by position; surplus entries on either side are dropped.
fn parse_open_search(body: &[u8]) -> Result<Vec<SearchHit>, SearchError> {
    let mut data: Vec<Value> =
        serde_json::from_slice(body).map_err(|e| SearchError::Parse(e.to_string()))?;

    if data.len() < 4 {
        return Err(SearchError::Parse(format!(
            "expected 4 OpenSearch elements, got {}",
            data.len()
        )));
    }

    let titles = string_array(data[1].take(), "titles")?;
    let urls = string_array(data[3].take(), "urls")?;

    Ok(titles
        .into_iter()
        .zip(urls)
        .map(|(title, url)| SearchHit { title, url })
        .collect())
}

fn string_array(value: Value, field: &str) -> Result<Vec<String>, SearchError> {
    serde_json::from_value(value)
        .map_err(|e| SearchError::Parse(format!("OpenSearch {field}: {e}")))
}

/// A summary without a textual `extract` is an empty summary, not an error.
fn parse_summary(body: &[u8]) -> Result<String, SearchError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| SearchError::Parse(e.to_string()))?;

    Ok(value
        .get("extract")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client_for(server: &mockito::ServerGuard) -> WikipediaClient {
        let config = RetrievalConfig::default()
            .with_search_url(format!("{}/w/api.php", server.url()))
            .with_summary_url(format!("{}/api/rest_v1/page/summary", server.url()));
        WikipediaClient::new(&config).unwrap()
    }

    #[test]
    fn test_parse_open_search() {
        let body = br#"["rust",["Rust","Rust Belt"],["",""],["https://en.wikipedia.org/wiki/Rust","https://en.wikipedia.org/wiki/Rust_Belt"]]"#;
        let hits = parse_open_search(body).unwrap();
        assert_eq!(
            hits,
            vec![
                SearchHit::new("Rust", "https://en.wikipedia.org/wiki/Rust"),
                SearchHit::new("Rust Belt", "https://en.wikipedia.org/wiki/Rust_Belt"),
            ]
        );
    }

    #[test]
    fn test_parse_open_search_pairs_to_shorter_array() {
        let body = br#"["q",["A","B","C"],[],["u1","u2"]]"#;
        let hits = parse_open_search(body).unwrap();
        assert_eq!(hits, vec![SearchHit::new("A", "u1"), SearchHit::new("B", "u2")]);
    }

    #[test]
    fn test_parse_open_search_rejects_bad_shapes() {
        assert!(parse_open_search(br#"["q",["A"]]"#).unwrap_err().is_parse());
        assert!(parse_open_search(br#"{"error":"nope"}"#).unwrap_err().is_parse());
        assert!(parse_open_search(br#"["q",[1,2],[],["u1","u2"]]"#).unwrap_err().is_parse());
        assert!(parse_open_search(b"<html>").unwrap_err().is_parse());
    }

    #[test]
    fn test_parse_summary() {
        assert_eq!(
            parse_summary(br#"{"title":"Rust","extract":"Rust is an iron oxide."}"#).unwrap(),
            "Rust is an iron oxide."
        );
        assert_eq!(parse_summary(br#"{"title":"Rust"}"#).unwrap(), "");
        assert_eq!(parse_summary(br#"{"extract":null}"#).unwrap(), "");
        assert!(parse_summary(b"not json").unwrap_err().is_parse());
    }

    #[test]
    fn test_summary_endpoint_encodes_title() {
        let client = WikipediaClient::new(&RetrievalConfig::default()).unwrap();
        assert_eq!(
            client.summary_endpoint("Rust (programming language)").as_str(),
            "https://en.wikipedia.org/api/rest_v1/page/summary/Rust%20(programming%20language)"
        );
        assert_eq!(
            client.summary_endpoint("AC/DC").as_str(),
            "https://en.wikipedia.org/api/rest_v1/page/summary/AC%2FDC"
        );
    }

    #[test]
    fn test_summary_endpoint_tolerates_trailing_slash() {
        let config = RetrievalConfig::default()
            .with_summary_url("https://en.wikipedia.org/api/rest_v1/page/summary/");
        let client = WikipediaClient::new(&config).unwrap();
        assert_eq!(
            client.summary_endpoint("Iron").as_str(),
            "https://en.wikipedia.org/api/rest_v1/page/summary/Iron"
        );
    }

    #[test]
    fn test_invalid_endpoints() {
        let config = RetrievalConfig::default().with_search_url("not a url");
        assert!(matches!(
            WikipediaClient::new(&config),
            Err(SearchError::InvalidEndpoint { .. })
        ));

        let config = RetrievalConfig::default().with_summary_url("mailto:someone@example.org");
        assert!(matches!(
            WikipediaClient::new(&config),
            Err(SearchError::InvalidEndpoint { .. })
        ));
    }

    #[tokio::test]
    async fn test_open_search_sends_expected_parameters() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/w/api.php")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("action".into(), "opensearch".into()),
                Matcher::UrlEncoded("search".into(), "iron oxide".into()),
                Matcher::UrlEncoded("limit".into(), "2".into()),
                Matcher::UrlEncoded("namespace".into(), "0".into()),
                Matcher::UrlEncoded("format".into(), "json".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"["iron oxide",["Iron oxide","Rust"],["",""],["u1","u2"]]"#)
            .expect(1)
            .create_async()
            .await;

        let client = client_for(&server);
        let hits = client.open_search("iron oxide", 2).await.unwrap();

        assert_eq!(hits, vec![SearchHit::new("Iron oxide", "u1"), SearchHit::new("Rust", "u2")]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_open_search_non_success_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/w/api.php")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let err = client_for(&server).open_search("iron", 3).await.unwrap_err();
        assert!(matches!(err, SearchError::Status(StatusCode::SERVICE_UNAVAILABLE)));
        assert!(err.is_network());
    }

    #[tokio::test]
    async fn test_summary_requires_200() {
        let mut server = mockito::Server::new_async().await;
        let _ok = server
            .mock("GET", "/api/rest_v1/page/summary/Iron")
            .with_status(200)
            .with_body(r#"{"extract":"Iron is a chemical element."}"#)
            .create_async()
            .await;
        let _no_content = server
            .mock("GET", "/api/rest_v1/page/summary/Steel")
            .with_status(204)
            .create_async()
            .await;

        let client = client_for(&server);
        assert_eq!(client.summary("Iron").await.unwrap(), "Iron is a chemical element.");
        assert!(matches!(
            client.summary("Steel").await,
            Err(SearchError::Status(StatusCode::NO_CONTENT))
        ));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let config = RetrievalConfig::default()
            .with_search_url("http://127.0.0.1:1/w/api.php")
            .with_timeout(std::time::Duration::from_secs(2));
        let client = WikipediaClient::new(&config).unwrap();

        let err = client.open_search("iron", 3).await.unwrap_err();
        assert!(matches!(err, SearchError::Network(_)));
    }
}
