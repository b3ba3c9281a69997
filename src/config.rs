use std::time::Duration;

/// Configuration for the EDGAR client.
///
/// Everything the client needs is passed in here at construction time; no
/// setting is ever read from ambient or global state.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Contact-style user agent sent with every request
    /// (e.g. `"my_app/1.0 (me@example.com)"`). SEC.gov rejects anonymous
    /// clients, so this is operationally required.
    pub user_agent: String,
    /// Rate limit in requests per second, applied to all outbound calls.
    pub rate_limit: u32,
    /// Per-request timeout. A timed-out call fails like any other network
    /// error; there are no retries.
    pub timeout: Duration,
    /// Base URLs for the SEC services.
    pub base_urls: SecUrls,
    /// Optional summarization endpoint. When absent, summarization
    /// operations fail with a configuration error.
    #[cfg(feature = "summarize")]
    pub summarizer: Option<SummarizerConfig>,
}

/// Base URLs for the SEC services.
#[derive(Debug, Clone)]
pub struct SecUrls {
    /// Base URL for EDGAR archives (index files, filing documents).
    pub archives: String,
    /// Base URL for the EDGAR data API (company submissions).
    pub data: String,
    /// Authority that relative index paths are joined onto.
    pub www: String,
}

/// Connection details for the external summarization service.
///
/// The exchange is a single prompt-in/text-out request against an
/// OpenAI-compatible chat completions endpoint.
#[cfg(feature = "summarize")]
#[derive(Debug, Clone)]
pub struct SummarizerConfig {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: "filingkit/0.1.0".to_string(),
            rate_limit: 10,
            timeout: Duration::from_secs(30),
            base_urls: SecUrls::default(),
            #[cfg(feature = "summarize")]
            summarizer: None,
        }
    }
}

impl ClientConfig {
    /// Creates a config with a custom user agent and defaults for the rest.
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            ..Default::default()
        }
    }

    pub fn with_rate_limit(mut self, rate_limit: u32) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_base_urls(mut self, base_urls: SecUrls) -> Self {
        self.base_urls = base_urls;
        self
    }

    #[cfg(feature = "summarize")]
    pub fn with_summarizer(mut self, summarizer: SummarizerConfig) -> Self {
        self.summarizer = Some(summarizer);
        self
    }
}

impl Default for SecUrls {
    fn default() -> Self {
        Self {
            archives: "https://www.sec.gov/Archives/edgar".to_string(),
            data: "https://data.sec.gov".to_string(),
            www: "https://www.sec.gov".to_string(),
        }
    }
}
