//! Upstream response relaying

use http::{HeaderMap, StatusCode};

/// A fully formed HTTP response computed by an upstream collaborator, ready
/// to be relayed to the client unchanged.
///
/// Headers live in an [`http::HeaderMap`], so multi-valued headers are
/// preserved and malformed header text is unrepresentable; relaying cannot
/// fail after construction.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
}

impl UpstreamResponse {
    /// Wraps an already-computed response.
    #[must_use]
    pub const fn new(status: StatusCode, headers: HeaderMap, body: String) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// The upstream status code.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// The upstream headers, multi-values included.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The raw textual body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }
}
