use reqwest::RequestBuilder;
use uuid::Uuid;

/// HTTP header name for request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Identifier attached to every outgoing backend call
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RequestId(pub Uuid);

impl RequestId {
    /// Creates a new random request ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the UUID as a string
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stamps a fresh request ID onto an outgoing request.
///
/// The returned ID should be recorded in the log lines for the call so client
/// and server logs can be joined.
pub fn with_request_id(builder: RequestBuilder) -> (RequestBuilder, RequestId) {
    let request_id = RequestId::new();
    (
        builder.header(REQUEST_ID_HEADER, request_id.as_str()),
        request_id,
    )
}

/// Helper function to create a tracing span for one backend call
pub fn make_span_with_request_id(method: &str, path: &str, request_id: &RequestId) -> tracing::Span {
    tracing::info_span!(
        "backend_request",
        method = %method,
        path = %path,
        request_id = %request_id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_is_attached() {
        let client = reqwest::Client::new();
        let (builder, request_id) = with_request_id(client.get("http://localhost/api/stats"));
        let request = builder.build().unwrap();

        let header = request.headers().get(REQUEST_ID_HEADER).unwrap();
        assert_eq!(header.to_str().unwrap(), request_id.as_str());
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(RequestId::new(), RequestId::new());
    }
}
