pub mod config;
pub mod http;
pub mod request;

pub use config::ClientConfig;
pub use http::HttpFetcher;
pub use request::everything_url;

pub mod prelude {
    pub use super::{everything_url, ClientConfig, HttpFetcher};
    pub use hl_core::{NewsFetcher, Response, Result, Error};
}
