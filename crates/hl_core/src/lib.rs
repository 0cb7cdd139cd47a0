pub mod decode;
pub mod error;
pub mod fetch;
pub mod mapper;
pub mod rows;
pub mod types;

pub use error::{Error, Result};
pub use fetch::NewsFetcher;
pub use rows::{DisplayRow, NewsRow, SearchFieldRow};
pub use types::{Article, ArticleSource, Response};

pub mod prelude {
    pub use super::{Article, DisplayRow, Error, NewsFetcher, NewsRow, Response, Result};
}
