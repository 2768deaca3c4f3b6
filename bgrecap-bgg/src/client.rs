//! BoardGameGeek XML API2 client with connection pooling and rate limiting
//!
//! The BGG API throttles aggressively, so every request waits on a
//! client-side rate limiter before going out. There is deliberately no retry
//! logic: the upstream's rate-limit semantics are unknown and a single
//! failure aborts the whole computation.

use bgrecap_common::{GameId, RecapError, Result};
use governor::{DefaultDirectRateLimiter, Quota};
use reqwest::Client;
use std::{num::NonZeroU32, sync::Arc, time::Duration};
use tracing::{debug, instrument};
use url::Url;

use crate::feed::{DetailFeed, PlayFeed};
use crate::plays::{self, PlaysPage};
use crate::things::{self, GameDetail};

/// Default base URL of the BGG XML API2
pub const DEFAULT_BASE_URL: &str = "https://boardgamegeek.com/xmlapi2";

/// Configuration for the BGG API client
#[derive(Debug, Clone)]
pub struct BggConfig {
    /// Base URL of the XML API (e.g., "https://boardgamegeek.com/xmlapi2")
    pub base_url: String,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// Connection pool max idle connections per host (default: 10)
    pub max_idle_per_host: usize,
    /// Rate limit: requests per second (default: 2)
    pub rate_limit_per_sec: u32,
}

impl Default for BggConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            max_idle_per_host: 10,
            rate_limit_per_sec: 2,
        }
    }
}

impl BggConfig {
    /// Create a new configuration pointing at the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Set the connection pool size
    pub fn with_pool_size(mut self, max_idle_per_host: usize) -> Self {
        self.max_idle_per_host = max_idle_per_host;
        self
    }

    /// Set the rate limit
    pub fn with_rate_limit(mut self, rate_limit_per_sec: u32) -> Self {
        self.rate_limit_per_sec = rate_limit_per_sec;
        self
    }
}

/// BGG API client with connection pooling and rate limiting
#[derive(Debug, Clone)]
pub struct BggClient {
    client: Client,
    config: BggConfig,
    rate_limiter: Arc<DefaultDirectRateLimiter>,
}

impl BggClient {
    /// Create a new BGG client with the given configuration
    pub fn new(config: BggConfig) -> Result<Self> {
        Url::parse(&config.base_url)
            .map_err(|e| RecapError::config(format!("invalid base URL: {e}")))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(config.max_idle_per_host)
            .build()
            .map_err(|e| RecapError::network_with_source("failed to create HTTP client", e))?;

        let quota = Quota::per_second(
            NonZeroU32::new(config.rate_limit_per_sec)
                .ok_or_else(|| RecapError::config("rate limit must be greater than 0"))?,
        );
        let rate_limiter = Arc::new(DefaultDirectRateLimiter::direct(quota));

        Ok(Self {
            client,
            config,
            rate_limiter,
        })
    }

    /// Create a new client against the public BGG API with default settings
    pub fn with_defaults() -> Result<Self> {
        Self::new(BggConfig::default())
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.config.base_url.trim_end_matches('/'))
    }

    /// Issue a rate-limited GET and return the response body.
    ///
    /// Non-success statuses become `Upstream { status }`; a 200 body is
    /// returned as-is for the typed feed parsers to interpret.
    #[instrument(skip(self, params), fields(endpoint = %endpoint))]
    async fn get_text(&self, endpoint: &str, params: &[(&str, String)]) -> Result<String> {
        self.rate_limiter.until_ready().await;

        let url = self.endpoint_url(endpoint);
        debug!("requesting {}", url);

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(RecapError::from)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RecapError::upstream(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| RecapError::network_with_source("failed to read response body", e))
    }
}

impl PlayFeed for BggClient {
    /// Fetch one page of the plays feed for a username and year.
    ///
    /// The page parameter is only sent from page 2 onward; page 1 is the
    /// bare date-range query.
    async fn fetch_plays_page(&self, username: &str, year: i32, page: u32) -> Result<PlaysPage> {
        let mut params = vec![
            ("username", username.to_string()),
            ("mindate", format!("{year}-01-01")),
            ("maxdate", format!("{year}-12-31")),
        ];
        if page > 1 {
            params.push(("page", page.to_string()));
        }

        let body = self.get_text("plays", &params).await?;
        plays::parse_plays_page(&body)
    }
}

impl DetailFeed for BggClient {
    /// Fetch game details for a set of ids in one batched request.
    async fn fetch_game_details(&self, ids: &[GameId]) -> Result<Vec<GameDetail>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let joined = ids
            .iter()
            .map(GameId::as_str)
            .collect::<Vec<_>>()
            .join(",");
        let body = self.get_text("thing", &[("id", joined)]).await?;
        things::parse_game_details(&body)
    }
}
