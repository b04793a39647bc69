//! Upstream news search API access.
//!
//! This module provides the interface for talking to a NewsAPI-compatible
//! search service. It exposes two read-only endpoints, both returning the
//! same `{status, totalResults, articles}` envelope.
//!
//! # Architecture
//!
//! The module uses a trait-based design so the resolver can be driven by
//! either the real HTTP client or an in-memory stand-in:
//! - [`NewsApi`]: Core trait defining one async GET against an endpoint
//! - [`HttpNewsApi`]: `reqwest`-backed implementation with a request timeout
//!
//! # Failure Model
//!
//! There are no retries at this layer. Transport errors, timeouts, non-2xx
//! statuses, `status: "error"` envelopes and undecodable bodies all surface
//! as a [`RetrievalError`] for the resolver to act on.

use reqwest::Client;
use serde::Deserialize;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};
use url::Url;

use crate::error::RetrievalError;
use crate::models::{null_as_default, Article};
use crate::utils::truncate_for_log;

/// Default upstream base URL.
pub const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// The two upstream search endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Curated top headlines for a country and category.
    TopHeadlines,
    /// Full-text search across all indexed sources.
    Everything,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::TopHeadlines => "top-headlines",
            Endpoint::Everything => "everything",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// One query-string parameter.
pub type QueryPair = (&'static str, String);

/// Response envelope shared by both endpoints.
///
/// Missing `articles`/`totalResults` default to empty/zero.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsApiResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub total_results: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub articles: Vec<Article>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Trait for one read-only request against the upstream search API.
///
/// Implementors perform exactly one request per call and never retry.
pub trait NewsApi {
    /// Send `params` to `endpoint` and decode the response envelope.
    ///
    /// # Errors
    ///
    /// Any transport, status or decoding failure.
    async fn fetch(
        &self,
        endpoint: Endpoint,
        params: &[QueryPair],
    ) -> Result<NewsApiResponse, RetrievalError>;
}

/// `reqwest`-backed [`NewsApi`].
#[derive(Clone)]
pub struct HttpNewsApi {
    client: Client,
    base_url: String,
}

impl fmt::Debug for HttpNewsApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpNewsApi")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl HttpNewsApi {
    /// Create a client against `base_url` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::InvalidUrl`] when `base_url` does not parse,
    /// or [`RetrievalError::Http`] if the underlying client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RetrievalError> {
        Url::parse(base_url)?;
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Full request URL for `endpoint` with `params` encoded as a query string.
    pub fn request_url(&self, endpoint: Endpoint, params: &[QueryPair]) -> Result<Url, RetrievalError> {
        let raw = format!("{}/{}", self.base_url, endpoint.path());
        let url = Url::parse_with_params(&raw, params.iter().map(|(k, v)| (*k, v.as_str())))?;
        Ok(url)
    }
}

impl NewsApi for HttpNewsApi {
    #[instrument(level = "info", skip_all, fields(%endpoint))]
    async fn fetch(
        &self,
        endpoint: Endpoint,
        params: &[QueryPair],
    ) -> Result<NewsApiResponse, RetrievalError> {
        let url = self.request_url(endpoint, params)?;
        let t0 = Instant::now();

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                RetrievalError::Timeout {
                    endpoint: endpoint.to_string(),
                }
            } else {
                RetrievalError::Http(e)
            }
        })?;

        let status = response.status();
        let body = response.text().await?;
        let dt = t0.elapsed();
        debug!(
            status = status.as_u16(),
            bytes = body.len(),
            elapsed_ms = dt.as_millis() as u64,
            "Upstream responded"
        );

        // Error envelopes carry a more useful message than the bare status.
        let decoded = serde_json::from_str::<NewsApiResponse>(&body);
        if let Ok(ref envelope) = decoded {
            if envelope.status.as_deref() == Some("error") {
                return Err(RetrievalError::Upstream {
                    code: envelope.code.clone().unwrap_or_else(|| "unknown".into()),
                    message: envelope.message.clone().unwrap_or_default(),
                });
            }
        }

        if !status.is_success() {
            warn!(
                status = status.as_u16(),
                body_preview = %truncate_for_log(&body, 300),
                "Upstream returned non-success status"
            );
            return Err(RetrievalError::Status {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
            });
        }

        decoded.map_err(|source| RetrievalError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_url_encodes_params() {
        let api = HttpNewsApi::new("https://newsapi.org/v2/", Duration::from_secs(1)).unwrap();
        let params: Vec<QueryPair> = vec![
            ("q", "\"data breach\" AND us".to_string()),
            ("pageSize", "20".to_string()),
        ];
        let url = api.request_url(Endpoint::Everything, &params).unwrap();
        assert_eq!(url.path(), "/v2/everything");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs[0], ("q".to_string(), "\"data breach\" AND us".to_string()));
        assert_eq!(pairs[1], ("pageSize".to_string(), "20".to_string()));
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let err = HttpNewsApi::new("not a url", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, RetrievalError::InvalidUrl(_)));
    }

    #[test]
    fn test_response_defaults_when_fields_missing() {
        let resp: NewsApiResponse = serde_json::from_str(r#"{"status":"ok"}"#).unwrap();
        assert!(resp.articles.is_empty());
        assert_eq!(resp.total_results, None);
    }

    #[test]
    fn test_response_keeps_valid_articles_beside_null_fields() {
        let body = r#"{
            "status": "ok",
            "totalResults": 2,
            "articles": [
                {"title": "Ransomware hits bank", "publishedAt": "2026-10-17T08:00:00Z"},
                {"title": null, "description": "malware", "publishedAt": null, "source": {"id": null, "name": null}}
            ]
        }"#;
        let resp: NewsApiResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.articles.len(), 2);
        assert_eq!(resp.articles[0].title, "Ransomware hits bank");
        assert!(resp.articles[1].title.is_empty());

        let resp: NewsApiResponse = serde_json::from_str(r#"{"status":"ok","articles":null}"#).unwrap();
        assert!(resp.articles.is_empty());
    }

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(Endpoint::TopHeadlines.path(), "top-headlines");
        assert_eq!(Endpoint::Everything.to_string(), "everything");
    }
}
