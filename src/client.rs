use async_trait::async_trait;
use tracing::debug;

use crate::error::ResolveError;
use crate::types::{Product, ReleaseInfo};

pub const DEFAULT_API_BASE_URL: &str = "https://endoflife.date";

/// Looks up release and end-of-life dates for a single product.
#[async_trait]
pub trait ReleaseInfoResolver: Send + Sync {
    async fn fetch_release_info(&self, product: &Product) -> Result<ReleaseInfo, ResolveError>;
}

/// Resolver backed by the endoflife.date HTTP API (or anything serving the same paths).
pub struct EndOfLifeHttpClient {
    client: reqwest::Client,
    base_url: String,
}

impl EndOfLifeHttpClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_API_BASE_URL)
    }

    pub fn with_base_url<S: Into<String>>(base_url: S) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client<S: Into<String>>(client: reqwest::Client, base_url: S) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn release_url(&self, product: &Product) -> String {
        format!(
            "{}/api/{}/{}.json",
            self.base_url.trim_end_matches('/'),
            product.name,
            product.version
        )
    }
}

impl Default for EndOfLifeHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReleaseInfoResolver for EndOfLifeHttpClient {
    async fn fetch_release_info(&self, product: &Product) -> Result<ReleaseInfo, ResolveError> {
        let url = self.release_url(product);
        debug!("fetching release info from {}", url);

        let transport = |source| ResolveError::Transport {
            product: product.to_string(),
            source,
        };
        let res = self.client.get(&url).send().await.map_err(transport)?;
        // Status is not checked here; an error page simply fails to decode.
        let status = res.status();
        let body = res.bytes().await.map_err(transport)?;

        serde_json::from_slice(&body).map_err(|source| ResolveError::Decode {
            product: product.to_string(),
            status: status.as_u16(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_url() {
        let product = Product::new("nodejs", "18");

        let client = EndOfLifeHttpClient::new();
        assert_eq!(client.release_url(&product), "https://endoflife.date/api/nodejs/18.json");

        let client = EndOfLifeHttpClient::with_base_url("http://localhost:8080/");
        assert_eq!(client.release_url(&product), "http://localhost:8080/api/nodejs/18.json");
    }

    #[tokio::test]
    async fn test_fetch_release_info_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/mockProduct/0.0.1.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"cycle": "0.0.1", "releaseDate": "2023-05-23", "eol": "2026-04-01", "latest": "0.0.9"}"#)
            .create_async()
            .await;

        let client = EndOfLifeHttpClient::with_base_url(server.url());
        let info = client
            .fetch_release_info(&Product::new("mockProduct", "0.0.1"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(info, ReleaseInfo::new("2023-05-23", "2026-04-01"));
    }

    #[tokio::test]
    async fn test_fetch_release_info_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/unknown/1.json")
            .with_status(404)
            .with_body("<html>Not Found</html>")
            .create_async()
            .await;

        let client = EndOfLifeHttpClient::with_base_url(server.url());
        let err = client
            .fetch_release_info(&Product::new("unknown", "1"))
            .await
            .unwrap_err();

        match err {
            ResolveError::Decode { product, status, .. } => {
                assert_eq!(product, "unknown 1");
                assert_eq!(status, 404);
            }
            other => panic!("expected decode error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_release_info_missing_fields() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/python/2.7.json")
            .with_status(200)
            .with_body(r#"{"releaseDate": "2010-07-03"}"#)
            .create_async()
            .await;

        let client = EndOfLifeHttpClient::with_base_url(server.url());
        let result = client.fetch_release_info(&Product::new("python", "2.7")).await;

        assert!(matches!(result, Err(ResolveError::Decode { status: 200, .. })));
    }

    #[tokio::test]
    async fn test_fetch_release_info_connection_refused() {
        let client = EndOfLifeHttpClient::with_base_url("http://127.0.0.1:1");
        let result = client.fetch_release_info(&Product::new("nodejs", "18")).await;

        assert!(matches!(result, Err(ResolveError::Transport { .. })));
    }
}
