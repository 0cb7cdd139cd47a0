use hl_core::{Error, Result};
use url::Url;

const EVERYTHING_PATH: [&str; 2] = ["v2", "everything"];
const API_KEY_PARAM: &str = "apiKey";

/// Builds `{base}/v2/everything?q=..&pageSize=..[&page=..]&apiKey=..`.
///
/// Page 0 is a fresh search and is sent without a `page` parameter.
pub fn everything_url(
    base_url: &str,
    api_key: &str,
    query: &str,
    page_size: u32,
    page: u32,
) -> Result<Url> {
    let mut url = Url::parse(base_url).map_err(|e| Error::InvalidUrl(format!("{}: {}", base_url, e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::InvalidUrl(format!("unsupported scheme {:?}", url.scheme())));
    }

    url.path_segments_mut()
        .map_err(|_| Error::InvalidUrl(format!("{} cannot be a base", base_url)))?
        .pop_if_empty()
        .extend(EVERYTHING_PATH);

    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("q", query);
        pairs.append_pair("pageSize", &page_size.to_string());
        if page > 0 {
            pairs.append_pair("page", &page.to_string());
        }
        pairs.append_pair(API_KEY_PARAM, api_key);
    }

    Ok(url)
}

/// Copy of `url` that is safe to log.
pub fn redacted(url: &Url) -> String {
    let mut clean = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            if k == API_KEY_PARAM {
                (k.into_owned(), "<redacted>".to_string())
            } else {
                (k.into_owned(), v.into_owned())
            }
        })
        .collect();
    clean.query_pairs_mut().clear().extend_pairs(pairs);
    clean.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(url: &Url, key: &str) -> Option<String> {
        url.query_pairs().find(|(k, _)| k == key).map(|(_, v)| v.into_owned())
    }

    #[test]
    fn test_first_page_has_no_page_param() {
        let url = everything_url("https://newsapi.org", "k", "rust", 20, 0).unwrap();
        assert_eq!(url.path(), "/v2/everything");
        assert_eq!(param(&url, "q").as_deref(), Some("rust"));
        assert_eq!(param(&url, "pageSize").as_deref(), Some("20"));
        assert_eq!(param(&url, "page"), None);
        assert_eq!(param(&url, "apiKey").as_deref(), Some("k"));
    }

    #[test]
    fn test_later_pages_carry_page_param() {
        let url = everything_url("https://newsapi.org/", "k", "rust", 20, 1).unwrap();
        assert_eq!(url.path(), "/v2/everything");
        assert_eq!(param(&url, "page").as_deref(), Some("1"));
    }

    #[test]
    fn test_query_is_encoded() {
        let url = everything_url("http://localhost:8080/proxy", "k", "climate & energy", 5, 0).unwrap();
        assert_eq!(url.path(), "/proxy/v2/everything");
        assert!(url.as_str().contains("q=climate+%26+energy"));
        assert_eq!(param(&url, "q").as_deref(), Some("climate & energy"));
    }

    #[test]
    fn test_malformed_base_is_invalid_url() {
        assert!(matches!(everything_url("not a url", "k", "q", 20, 0), Err(Error::InvalidUrl(_))));
        assert!(matches!(everything_url("mailto:someone@example.com", "k", "q", 20, 0), Err(Error::InvalidUrl(_))));
        assert!(matches!(everything_url("ftp://example.com", "k", "q", 20, 0), Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_redacted_hides_key() {
        let url = everything_url("https://newsapi.org", "secret", "rust", 20, 2).unwrap();
        let shown = redacted(&url);
        assert!(!shown.contains("secret"));
        assert!(shown.contains("q=rust"));
        assert!(shown.contains("page=2"));
    }
}
