//! Error types for the Ultrahuman client

use thiserror::Error;

/// Errors raised by the request layer and the response decoder.
///
/// Variants tied to an HTTP status render as `[<status>] <message>`; the
/// others render as the bare message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("[401] {0}")]
    Authentication(String),

    #[error("[400] {0}")]
    BadRequest(String),

    #[error("[404] {0}")]
    NotFound(String),

    #[error("[500] {0}")]
    InternalServer(String),

    #[error("[{status}] {message}")]
    Api { status: u16, message: String },

    #[error("{0}")]
    Transport(String),

    #[error("{0}")]
    Parse(String),

    #[error("{0}")]
    Parameter(String),

    #[error("{0}")]
    Configuration(String),
}

impl ApiError {
    /// Map a status code (HTTP or envelope-reported) to the matching kind.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 => ApiError::Authentication(message),
            400 => ApiError::BadRequest(message),
            404 => ApiError::NotFound(message),
            500 => ApiError::InternalServer(message),
            status => ApiError::Api { status, message },
        }
    }

    pub fn authentication() -> Self {
        ApiError::Authentication("Authentication failed. Please check your API key.".to_string())
    }

    /// Returned e.g. when the epoch range exceeds 7 days or a parameter is malformed.
    pub fn bad_request() -> Self {
        ApiError::BadRequest("Bad request. Please check your parameters.".to_string())
    }

    /// Returned when the user does not exist or has not granted data sharing.
    pub fn not_found() -> Self {
        ApiError::NotFound(
            "Resource not found. User may not exist or data sharing permission may be missing."
                .to_string(),
        )
    }

    pub fn internal_server() -> Self {
        ApiError::InternalServer(
            "Internal server error. Something went wrong on Ultrahuman's end.".to_string(),
        )
    }

    /// Status code carried by the error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Authentication(_) => Some(401),
            ApiError::BadRequest(_) => Some(400),
            ApiError::NotFound(_) => Some(404),
            ApiError::InternalServer(_) => Some(500),
            ApiError::Api { status, .. } => Some(*status),
            ApiError::Transport(_)
            | ApiError::Parse(_)
            | ApiError::Parameter(_)
            | ApiError::Configuration(_) => None,
        }
    }

    /// Human-readable message without the status prefix
    pub fn message(&self) -> &str {
        match self {
            ApiError::Authentication(message)
            | ApiError::BadRequest(message)
            | ApiError::NotFound(message)
            | ApiError::InternalServer(message)
            | ApiError::Api { message, .. }
            | ApiError::Transport(message)
            | ApiError::Parse(message)
            | ApiError::Parameter(message)
            | ApiError::Configuration(message) => message,
        }
    }
}
