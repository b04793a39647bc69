//! Query resolution: live retrieval tiers with an offline last resort.
//!
//! [`Resolver::resolve`] turns a [`QueryParameters`] into a [`PageResult`]
//! and never fails. Live retrieval is attempted only when a usable credential
//! is configured; it walks an ordered list of [`Tier`]s, one request at a
//! time, and stops at the first tier that yields an acceptable page.
//!
//! # Tiers
//!
//! | Tier | Endpoint | Accepts when |
//! |------|----------|--------------|
//! | [`Tier::Headlines`] | `top-headlines`, category `technology` | at least one article survives the keyword post-filter |
//! | [`Tier::Everything`] | `everything`, sorted by `publishedAt` | the request succeeds |
//!
//! Any tier error (transport, timeout, HTTP status, decoding) is logged and
//! treated as "advance". When every tier is exhausted, or the credential gate
//! is closed, the page comes from [`generate_fallback`].

use std::time::Instant;
use tracing::{debug, info, instrument, warn};

use crate::api::{Endpoint, HttpNewsApi, DEFAULT_BASE_URL, NewsApi, NewsApiResponse, QueryPair};
use crate::config::{is_live_credential, Config};
use crate::error::RetrievalError;
use crate::fallback::generate_fallback;
use crate::filter::{retain_cybersecurity, retain_language, synthesized_query};
use crate::models::{PageResult, QueryParameters, ResultOrigin, PAGE_SIZE};

/// One live retrieval strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Top technology headlines for the country, re-filtered locally.
    Headlines,
    /// Full-text search; the query itself is trusted to be relevant.
    Everything,
}

impl Tier {
    /// Order in which tiers are attempted.
    pub const ORDER: [Tier; 2] = [Tier::Headlines, Tier::Everything];

    pub fn endpoint(self) -> Endpoint {
        match self {
            Tier::Headlines => Endpoint::TopHeadlines,
            Tier::Everything => Endpoint::Everything,
        }
    }

    /// Query parameters for this tier, excluding the credential.
    pub fn params(self, params: &QueryParameters) -> Vec<QueryPair> {
        let mut pairs: Vec<QueryPair> = Vec::with_capacity(10);
        match self {
            Tier::Headlines => {
                pairs.push(("country", params.country.code().to_string()));
                pairs.push(("category", "technology".to_string()));
                pairs.push(("pageSize", PAGE_SIZE.to_string()));
                pairs.push(("page", params.page().to_string()));
                pairs.push(("language", params.language.code().to_string()));
                if let Some(q) = params.user_query() {
                    pairs.push(("q", q.to_string()));
                }
            }
            Tier::Everything => {
                let q = params
                    .user_query()
                    .map(str::to_string)
                    .unwrap_or_else(|| synthesized_query(params.country));
                pairs.push(("q", q));
                pairs.push(("sortBy", "publishedAt".to_string()));
                pairs.push(("pageSize", PAGE_SIZE.to_string()));
                pairs.push(("page", params.page().to_string()));
                pairs.push(("language", params.language.code().to_string()));
            }
        }
        if let Some(sources) = params.sources_param() {
            pairs.push(("sources", sources));
        }
        if let Some(from) = params.date_range.from() {
            pairs.push(("from", from.to_string()));
        }
        if let Some(to) = params.date_range.to() {
            pairs.push(("to", to.to_string()));
        }
        pairs
    }

    /// Turn an upstream response into a page, or `None` to advance.
    pub fn accept(self, response: NewsApiResponse, params: &QueryParameters) -> Option<PageResult> {
        match self {
            Tier::Headlines => {
                let relevant = retain_cybersecurity(response.articles);
                if relevant.is_empty() {
                    return None;
                }
                let articles = retain_language(relevant, params.language);
                let total_results = response
                    .total_results
                    .filter(|t| *t > 0)
                    .unwrap_or(articles.len() as u32);
                Some(PageResult {
                    articles,
                    total_results,
                    current_page: params.page(),
                    origin: ResultOrigin::Headlines,
                })
            }
            Tier::Everything => Some(PageResult {
                articles: response.articles,
                total_results: response.total_results.unwrap_or(0),
                current_page: params.page(),
                origin: ResultOrigin::Everything,
            }),
        }
    }
}

/// Resolves filter state into a page of articles.
///
/// Holds no per-request state; one resolver can serve any number of
/// sequential or interleaved requests.
#[derive(Debug)]
pub struct Resolver<A> {
    api: A,
    credential: Option<String>,
}

impl Resolver<HttpNewsApi> {
    /// Build a resolver backed by the HTTP client described in `config`.
    ///
    /// Without a usable credential the network is never touched, so a broken
    /// base URL is ignored and the default endpoint is used instead.
    ///
    /// # Errors
    ///
    /// Returns an error if a credential is configured and the base URL is
    /// invalid, or if the client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, RetrievalError> {
        let api = match HttpNewsApi::new(&config.base_url, config.timeout()) {
            Ok(api) => api,
            Err(e) if !config.has_live_credential() => {
                warn!(error = %e, base_url = %config.base_url, "Ignoring invalid base URL in offline mode");
                HttpNewsApi::new(DEFAULT_BASE_URL, config.timeout())?
            }
            Err(e) => return Err(e),
        };
        Ok(Self::new(api, config.api_key.clone()))
    }
}

impl<A: NewsApi> Resolver<A> {
    pub fn new(api: A, credential: Option<String>) -> Self {
        Self { api, credential }
    }

    /// The credential if the gate is open.
    fn live_credential(&self) -> Option<&str> {
        self.credential.as_deref().filter(|key| is_live_credential(key))
    }

    pub fn is_live(&self) -> bool {
        self.live_credential().is_some()
    }

    /// Resolve `params` into a page. Always returns a valid result.
    #[instrument(
        level = "info",
        skip_all,
        fields(country = %params.country, language = %params.language, page = params.page())
    )]
    pub async fn resolve(&self, params: &QueryParameters) -> PageResult {
        let Some(api_key) = self.live_credential() else {
            info!("No valid API key configured; serving offline articles");
            return generate_fallback(params.country, params.language, params.page());
        };

        for tier in Tier::ORDER {
            let t0 = Instant::now();
            match self.attempt(tier, params, api_key).await {
                Ok(Some(result)) => {
                    info!(
                        ?tier,
                        articles = result.articles.len(),
                        total = result.total_results,
                        elapsed_ms = t0.elapsed().as_millis() as u64,
                        "Tier produced results"
                    );
                    return result;
                }
                Ok(None) => {
                    info!(?tier, "Tier returned no relevant articles; advancing");
                }
                Err(e) => {
                    warn!(?tier, error = %e, "Tier failed; advancing");
                }
            }
        }

        warn!("All live tiers exhausted; serving offline articles");
        generate_fallback(params.country, params.language, params.page())
    }

    async fn attempt(
        &self,
        tier: Tier,
        params: &QueryParameters,
        api_key: &str,
    ) -> Result<Option<PageResult>, RetrievalError> {
        let mut pairs = tier.params(params);
        debug!(?tier, params = ?pairs, "Requesting upstream");
        pairs.push(("apiKey", api_key.to_string()));

        let response = self.api.fetch(tier.endpoint(), &pairs).await?;
        Ok(tier.accept(response, params))
    }
}
