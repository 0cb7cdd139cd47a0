use crate::rows::NewsRow;
use crate::types::{Article, Response};
use crate::{Error, Result};

/// Title NewsAPI puts on articles that were taken down after indexing.
pub const REMOVED_TITLE: &str = "[Removed]";

pub const UNKNOWN_AUTHOR: &str = "Unknown author";
pub const UNTITLED: &str = "Untitled";
pub const UNKNOWN_DATE: &str = "Unknown date";

/// Builds the news rows for a response, keeping the API's order.
///
/// A response that is not `ok` or has no article list yields
/// [`Error::MalformedResponse`]; callers treat that as an empty page.
pub fn map_response(response: &Response) -> Result<Vec<NewsRow>> {
    let articles = match (&response.articles, response.is_ok()) {
        (Some(articles), true) => articles,
        _ => return Err(malformed(response)),
    };

    tracing::debug!("Received {} articles", articles.len());

    let rows: Vec<NewsRow> = articles
        .iter()
        .filter(|article| article.title.as_deref() != Some(REMOVED_TITLE))
        .map(map_article)
        .collect();

    tracing::debug!("Built {} rows", rows.len());
    Ok(rows)
}

pub fn map_article(article: &Article) -> NewsRow {
    NewsRow {
        author: article.author.clone().unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
        title: article.title.clone().unwrap_or_else(|| UNTITLED.to_string()),
        published_at: article
            .published_at
            .as_deref()
            .map(normalize_published_at)
            .unwrap_or_else(|| UNKNOWN_DATE.to_string()),
        content: article.content.clone(),
        description: article.description.clone(),
        url: article.url.clone(),
        source: article.source.as_ref().and_then(|s| s.name.clone()),
    }
}

/// Turns an ISO-8601 stamp into something readable by swapping the date/time
/// separator and the zone marker for spaces. No timezone math happens here.
pub fn normalize_published_at(raw: &str) -> String {
    raw.replace('T', " ").replace('Z', " ")
}

fn malformed(response: &Response) -> Error {
    let detail = response
        .message
        .clone()
        .or_else(|| response.code.clone())
        .unwrap_or_else(|| match response.articles {
            None => format!("status {:?} without articles", response.status),
            Some(_) => format!("status {:?}", response.status),
        });
    Error::MalformedResponse(detail)
}
