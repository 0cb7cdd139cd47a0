use crate::types::Response;
use crate::Result;

/// Parses a NewsAPI payload. Unknown fields are ignored and every article
/// field may be missing; only `status` is required.
pub fn decode(payload: &[u8]) -> Result<Response> {
    let response: Response = serde_json::from_slice(payload)?;
    tracing::debug!(
        "Decoded response with status {:?} and {} articles",
        response.status,
        response.articles.as_ref().map_or(0, Vec::len)
    );
    Ok(response)
}
