use std::fmt;
use async_trait::async_trait;
use hl_core::{decode::decode, Error, NewsFetcher, Response, Result};
use reqwest::Client;
use url::Url;
use crate::config::ClientConfig;
use crate::request::redacted;

const USER_AGENT: &str = concat!("hl/", env!("CARGO_PKG_VERSION"));

/// [`NewsFetcher`] backed by a shared reqwest client.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

impl fmt::Debug for HttpFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpFetcher")
            .field("client", &"<reqwest::Client>")
            .finish()
    }
}

#[async_trait]
impl NewsFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<Response> {
        tracing::debug!("GET {}", redacted(url));

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        // NewsAPI reports failures with a JSON body even on 4xx, so decode first
        // and only fall back to the HTTP status when the body is unreadable.
        match decode(&body) {
            Ok(decoded) => Ok(decoded),
            Err(e) if !status.is_success() => {
                tracing::warn!("Undecodable {} response: {}", status, e);
                Err(Error::Transport(format!("HTTP {}", status)))
            }
            Err(e) => Err(e),
        }
    }
}
