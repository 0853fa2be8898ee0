//! Error taxonomy for the request normalization layer

use http::StatusCode;
use thiserror::Error;

/// Low-level failures raised by the [`crate::handler`] helpers.
///
/// These are wrapped, not logged, where they occur; an error reaches the log
/// exactly once, if and when it is turned into a wire response.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// A query or path value was not valid percent-encoded UTF-8.
    #[error("value of {name:?} is not valid percent-encoded UTF-8")]
    Decoding {
        /// Name of the offending parameter.
        name: String,
    },

    /// The request body could not be read as UTF-8 text. Treated as a
    /// transport anomaly, not a client mistake.
    #[error("failed to read request body: {0}")]
    BodyRead(String),

    /// The JSON codec rejected the body. Carries the codec's own error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// The body was not a JSON object carrying a nested object under `key`.
    #[error("JSON body has no object field {key:?}")]
    MissingJsonObject {
        /// The field expected to hold a nested object.
        key: String,
    },
}

/// An expected, client-facing failure with an HTTP status and a
/// machine-readable error code.
///
/// This is the primary recoverable-error channel: anything a concrete
/// handler or a [`crate::directory::DirectoryProvider`] wants the client to
/// see travels as one of these and is rendered through
/// [`crate::handler::domain_error_response`].
#[derive(Debug, Clone, Error)]
#[error("{code}: {message}")]
pub struct DomainError {
    status: StatusCode,
    code: String,
    message: String,
}

impl DomainError {
    /// Creates an error with an explicit status.
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    /// 400 with a caller-chosen error code.
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, code, message)
    }

    /// 401 `M_UNAUTHORIZED`.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "M_UNAUTHORIZED", message)
    }

    /// 403 `M_FORBIDDEN`.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, "M_FORBIDDEN", message)
    }

    /// 404 `M_NOT_FOUND`.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "M_NOT_FOUND", message)
    }

    /// 500 `M_UNKNOWN`.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "M_UNKNOWN", message)
    }

    /// The HTTP status to respond with.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// The machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// The single sanctioned wrap from a low-level failure to a client-facing
/// one. Decode failures are the client's fault; body-read failures are not,
/// and surface as a generic 500 with no transport detail on the wire.
impl From<HandlerError> for DomainError {
    fn from(err: HandlerError) -> Self {
        match err {
            HandlerError::Decoding { name } => Self::bad_request(
                "M_INVALID_PARAM",
                format!("Malformed value for parameter '{name}'"),
            ),
            HandlerError::BodyRead(_) => Self::internal("Internal server error"),
            HandlerError::Json(err) => Self::bad_request("M_BAD_JSON", err.to_string()),
            HandlerError::MissingJsonObject { key } => {
                Self::bad_request("M_BAD_JSON", format!("Missing JSON object field '{key}'"))
            }
        }
    }
}
