//! Error types and utilities for bgrecap

use thiserror::Error;

/// Result type alias for bgrecap operations
pub type Result<T> = std::result::Result<T, RecapError>;

/// Main error type for bgrecap operations
#[derive(Error, Debug)]
pub enum RecapError {
    /// Malformed input from the caller (missing username, out-of-range year)
    #[error("bad request: {message}")]
    BadRequest { message: String },

    /// Valid request with no data behind it (unknown user or zero plays)
    #[error("no plays found")]
    NotFound,

    /// The upstream feed answered with a non-success HTTP status
    #[error("upstream feed error: HTTP {status}")]
    Upstream { status: u16 },

    /// The upstream feed answered successfully but the payload did not match
    /// the expected schema
    #[error("feed decode error: {message}")]
    Decode {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Transport-level failures (connect, timeout, body read)
    #[error("network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Client configuration errors
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl RecapError {
    /// Create a new bad-request error
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest {
            message: msg.into(),
        }
    }

    /// Create a new upstream error from an HTTP status code
    pub fn upstream(status: u16) -> Self {
        Self::Upstream { status }
    }

    /// Create a new decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new decode error with source
    pub fn decode_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Decode {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new network error with source
    pub fn network_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Network {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}

/// Convert from reqwest::Error to RecapError
impl From<reqwest::Error> for RecapError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::network_with_source("request timeout", err)
        } else if err.is_connect() {
            Self::network_with_source("connection failed", err)
        } else if err.is_status() {
            let status = err.status().map(|s| s.as_u16()).unwrap_or(0);
            Self::Upstream { status }
        } else {
            Self::network_with_source("network request failed", err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_creation() {
        let bad_request = RecapError::bad_request("username is required");
        assert!(bad_request.to_string().contains("bad request"));
        assert!(bad_request.to_string().contains("username is required"));

        let upstream = RecapError::upstream(503);
        assert_eq!(upstream.to_string(), "upstream feed error: HTTP 503");

        let decode = RecapError::decode("unexpected element");
        assert!(decode.to_string().contains("feed decode error"));

        let config = RecapError::config("rate limit must be greater than 0");
        assert!(config.to_string().contains("configuration error"));
    }

    #[test]
    fn test_not_found_display() {
        assert_eq!(RecapError::NotFound.to_string(), "no plays found");
    }

    #[test]
    fn test_error_with_source() {
        let io_error = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "truncated");
        let wrapped = RecapError::decode_with_source("malformed plays feed response", io_error);

        assert!(wrapped.to_string().contains("malformed plays feed response"));
        assert!(wrapped.source().is_some());

        let network = RecapError::network("connection reset");
        assert!(network.source().is_none());
    }

    #[test]
    fn test_upstream_status_preserved() {
        match RecapError::upstream(500) {
            RecapError::Upstream { status } => assert_eq!(status, 500),
            other => panic!("expected Upstream, got {other:?}"),
        }
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_error() -> Result<()> {
            Err(RecapError::NotFound)
        }

        assert!(matches!(returns_error(), Err(RecapError::NotFound)));
    }
}
