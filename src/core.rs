use governor::{
    Quota, RateLimiter, clock::DefaultClock, middleware::NoOpMiddleware, state::InMemoryState,
    state::NotKeyed,
};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use std::num::NonZeroU32;
use std::sync::Arc;
#[cfg(feature = "index")]
use std::sync::Mutex;
use url::Url;

use super::config::{ClientConfig, SecUrls};
use super::error::{FilingError, Result};
#[cfg(feature = "index")]
use super::parsing::index::FilingRecord;

type Governor = RateLimiter<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>;

/// Cached result of the most recent quarterly index query.
///
/// Purely an optimization for interactive sessions that re-run the same
/// query; never correctness-relevant and safe to evict.
#[cfg(feature = "index")]
pub(crate) type IndexCache = Mutex<Option<(String, Vec<FilingRecord>)>>;

/// HTTP client for the SEC EDGAR system with built-in request pacing.
///
/// `EdgarClient` is the entry point for every operation in this crate:
/// quarterly index resolution, per-company filing lookup, document section
/// extraction, financial-fact extraction and summarization. All operations
/// are async and synchronous in spirit: one request at a time, a single
/// attempt per call, an explicit timeout, and a shared token-bucket limiter
/// that enforces the SEC's fair-access guideline (10 requests per second)
/// without sleeps scattered through the calling code.
///
/// A failed or timed-out request surfaces immediately as a
/// [`FilingError`]; there is no automatic retry.
///
/// # Examples
///
/// ```rust
/// # use filingkit::EdgarClient;
/// let client = EdgarClient::new("my_app/1.0 (me@example.com)")?;
/// # Ok::<(), filingkit::FilingError>(())
/// ```
#[derive(Debug, Clone)]
pub struct EdgarClient {
    /// HTTP client for making requests
    pub(crate) client: reqwest::Client,

    /// Token bucket rate limiter shared by all outbound calls
    pub(crate) rate_limiter: Arc<Governor>,

    /// Base URLs for the SEC services
    pub(crate) urls: SecUrls,

    #[cfg(feature = "summarize")]
    pub(crate) summarizer: Option<super::config::SummarizerConfig>,

    #[cfg(feature = "index")]
    pub(crate) index_cache: Arc<IndexCache>,
}

impl EdgarClient {
    /// Creates a client with defaults: 10 requests per second, a 30 second
    /// timeout, and the standard SEC.gov base URLs.
    ///
    /// # Arguments
    ///
    /// * `user_agent` - a descriptive identifier for your application in the
    ///   form `"AppName/Version (contact@email.com)"`. The SEC requires
    ///   valid contact information.
    pub fn new(user_agent: &str) -> Result<Self> {
        Self::with_config(ClientConfig::new(user_agent))
    }

    /// Creates a client from an explicit [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns `FilingError::Config` if the user agent is malformed, the
    /// rate limit is zero, or the HTTP client cannot be built.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| FilingError::Config(format!("Invalid user agent: {}", e)))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| FilingError::Config(format!("Failed to build HTTP client: {}", e)))?;

        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_second(
            NonZeroU32::new(config.rate_limit)
                .ok_or_else(|| FilingError::Config("Rate limit must be greater than zero".to_string()))?,
        )));

        Ok(EdgarClient {
            client,
            rate_limiter,
            urls: config.base_urls,
            #[cfg(feature = "summarize")]
            summarizer: config.summarizer,
            #[cfg(feature = "index")]
            index_cache: Arc::new(Mutex::new(None)),
        })
    }

    /// Validates that `raw` is a syntactically absolute http(s) URL.
    ///
    /// Every fetch goes through this check first; a malformed or relative
    /// URL is rejected before any network activity.
    pub(crate) fn ensure_absolute_url(raw: &str) -> Result<Url> {
        let parsed = Url::parse(raw).map_err(|e| FilingError::InvalidUrl {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FilingError::InvalidUrl {
                url: raw.to_string(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }
        if parsed.host_str().is_none() {
            return Err(FilingError::InvalidUrl {
                url: raw.to_string(),
                reason: "missing authority".to_string(),
            });
        }
        Ok(parsed)
    }

    /// Fetches text content from a URL. Single attempt, rate limited.
    ///
    /// # Errors
    ///
    /// * `FilingError::InvalidUrl` - the URL failed validation
    /// * `FilingError::NotFound` - the resource does not exist (HTTP 404)
    /// * `FilingError::Fetch` - network failure or timeout
    /// * `FilingError::UnexpectedStatus` - any other non-2xx status
    pub async fn get(&self, url: &str) -> Result<String> {
        let target = Self::ensure_absolute_url(url)?;
        self.rate_limiter.until_ready().await;

        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(target)
            .send()
            .await
            .map_err(FilingError::Fetch)?;

        match response.status() {
            reqwest::StatusCode::OK => response.text().await.map_err(FilingError::Fetch),
            reqwest::StatusCode::NOT_FOUND => Err(FilingError::NotFound(url.to_string())),
            status => Err(FilingError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            }),
        }
    }

    /// Fetches binary content from a URL. Single attempt, rate limited.
    ///
    /// Used for gzipped index files; error behavior matches [`get`].
    ///
    /// [`get`]: EdgarClient::get
    pub async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let target = Self::ensure_absolute_url(url)?;
        self.rate_limiter.until_ready().await;

        tracing::debug!("GET {} (bytes)", url);
        let response = self
            .client
            .get(target)
            .send()
            .await
            .map_err(FilingError::Fetch)?;

        match response.status() {
            reqwest::StatusCode::OK => response
                .bytes()
                .await
                .map(|b| b.to_vec())
                .map_err(FilingError::Fetch),
            reqwest::StatusCode::NOT_FOUND => Err(FilingError::NotFound(url.to_string())),
            status => Err(FilingError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            }),
        }
    }

    /// Posts a JSON body and returns the response text. Single attempt,
    /// rate limited, optional bearer authentication.
    #[cfg(feature = "summarize")]
    pub(crate) async fn post_json<B: serde::Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
        bearer: Option<&str>,
    ) -> Result<String> {
        let target = Self::ensure_absolute_url(url)?;
        self.rate_limiter.until_ready().await;

        tracing::debug!("POST {}", url);
        let mut request = self.client.post(target).json(body);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        let response = request.send().await.map_err(FilingError::Fetch)?;

        match response.status() {
            reqwest::StatusCode::OK => response.text().await.map_err(FilingError::Fetch),
            reqwest::StatusCode::NOT_FOUND => Err(FilingError::NotFound(url.to_string())),
            status => Err(FilingError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            }),
        }
    }

    /// Returns the base URL for EDGAR archives.
    pub fn archives_url(&self) -> &str {
        &self.urls.archives
    }

    /// Returns the base URL for the EDGAR data API.
    pub fn data_url(&self) -> &str {
        &self.urls.data
    }

    /// Returns the base www.sec.gov authority.
    pub fn www_url(&self) -> &str {
        &self.urls.www
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_absolute_http_urls() {
        assert!(EdgarClient::ensure_absolute_url("https://www.sec.gov/Archives/x.htm").is_ok());
        assert!(EdgarClient::ensure_absolute_url("http://example.com/a?b=c").is_ok());
    }

    #[test]
    fn rejects_relative_and_non_http_urls() {
        assert!(matches!(
            EdgarClient::ensure_absolute_url("edgar/data/320193/doc.htm"),
            Err(FilingError::InvalidUrl { .. })
        ));
        assert!(matches!(
            EdgarClient::ensure_absolute_url("ftp://ftp.sec.gov/edgar"),
            Err(FilingError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn zero_rate_limit_is_a_config_error() {
        let config = ClientConfig::new("test_agent example@example.com").with_rate_limit(0);
        assert!(matches!(
            EdgarClient::with_config(config),
            Err(FilingError::Config(_))
        ));
    }
}
