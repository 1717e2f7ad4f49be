//! Students API error types.

use thiserror::Error;

use super::ValidationError;

/// Failure talking to the students service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum ApiError {
    #[error("network error: {message}")]
    Network { message: String },

    #[error("server responded with {status}: {message}")]
    Status { status: u16, message: String },

    #[error("failed to decode server response: {message}")]
    Decode { message: String },

    #[error("unexpected API error: {message}")]
    Unexpected { message: String },
}

impl ApiError {
    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates HTTP status error.
    #[must_use]
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Creates decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns whether the request never got a response.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}

/// Failure of a roster operation that may be rejected before sending.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum SyncError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let err = ApiError::status(500, "Internal Server Error");
        assert_eq!(
            err.to_string(),
            "server responded with 500: Internal Server Error"
        );
        assert!(!err.is_network_error());
    }

    #[test]
    fn test_network_error_classification() {
        assert!(ApiError::network("connection refused").is_network_error());
        assert!(!ApiError::decode("eof").is_network_error());
    }

    #[test]
    fn test_sync_error_is_transparent() {
        let err = SyncError::from(ApiError::unexpected("boom"));
        assert_eq!(err.to_string(), "unexpected API error: boom");
    }
}
