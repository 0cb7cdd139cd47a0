use async_trait::async_trait;
use url::Url;
use crate::types::Response;
use crate::Result;

/// Asynchronous access to the news API.
///
/// Implementations own transport concerns such as timeouts. Callers hand over
/// a fully built request URL and get back a decoded [`Response`].
#[async_trait]
pub trait NewsFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<Response>;
}

#[async_trait]
impl<T: NewsFetcher + ?Sized> NewsFetcher for std::sync::Arc<T> {
    async fn fetch(&self, url: &Url) -> Result<Response> {
        (**self).fetch(url).await
    }
}
