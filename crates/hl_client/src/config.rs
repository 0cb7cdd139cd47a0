use std::fmt;
use std::time::Duration;
use hl_core::{Error, Result};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://newsapi.org";
pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Everything needed to talk to the news API. The key is injected from the
/// environment or the command line and never compiled in.
#[derive(Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: String,
    pub page_size: u32,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::Config("API key is required".to_string()));
        }
        if self.page_size == 0 {
            return Err(Error::Config("page size must be greater than zero".to_string()));
        }
        Url::parse(&self.base_url)
            .map_err(|e| Error::Config(format!("invalid base URL {:?}: {}", self.base_url, e)))?;
        Ok(())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("page_size", &self.page_size)
            .field("timeout", &self.timeout)
            .finish()
    }
}
