//! Feature-lookup response types.

use bytes::Bytes;
use reqwest::StatusCode;

/// Response from one upstream feature lookup.
///
/// The body is kept as opaque bytes; the upstream's GeoJSON (or whatever
/// `INFO_FORMAT` it honored) is relayed to the map client untouched, so
/// nothing here parses it.
#[derive(Debug, Clone)]
pub struct FeatureInfoResponse {
    /// HTTP status code (always a success status; failures are errors).
    pub status: StatusCode,
    /// Content-Type header of the upstream response.
    pub content_type: Option<String>,
    /// Response body bytes.
    pub body: Bytes,
    /// Time taken to fetch in milliseconds.
    pub fetch_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_fields() {
        let response = FeatureInfoResponse {
            status: StatusCode::OK,
            content_type: Some("application/json".to_string()),
            body: Bytes::from_static(b"{\"features\":[]}"),
            fetch_ms: 42,
        };

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.content_type.as_deref(), Some("application/json"));
        assert_eq!(&response.body[..], b"{\"features\":[]}");
        assert_eq!(response.fetch_ms, 42);
    }

    #[test]
    fn test_body_clone_is_cheap_handle() {
        let body = Bytes::from(vec![1u8, 2, 3]);
        let response = FeatureInfoResponse {
            status: StatusCode::OK,
            content_type: None,
            body: body.clone(),
            fetch_ms: 0,
        };
        assert_eq!(response.body, body);
    }
}
