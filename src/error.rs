//! Error types for the Polymarket credential client.

use thiserror::Error;

/// The main error type for all client and derivation operations.
#[derive(Error, Debug)]
pub enum PolymarketError {
    /// The signing key was malformed or rejected by the venue
    #[error("Authentication error: {0}")]
    Auth(String),

    /// The endpoint could not be reached
    #[error("Network error: {0}")]
    Network(String),

    /// Request timeout
    #[error("Request timed out")]
    Timeout,

    /// The venue answered with a non-success status
    #[error("Polymarket API error: {0}")]
    Api(ApiError),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// Invalid response from the API
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Writing the rendered credentials failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing required credentials
    #[error("Missing credentials: API key, secret and passphrase required for L2 endpoints")]
    MissingCredentials,
}

impl PolymarketError {
    /// Whether the failure happened at the transport level.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout)
    }

    /// Whether the venue rejected the caller's identity.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }
}

impl From<reqwest::Error> for PolymarketError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<reqwest_middleware::Error> for PolymarketError {
    fn from(err: reqwest_middleware::Error) -> Self {
        match err {
            reqwest_middleware::Error::Reqwest(inner) => inner.into(),
            reqwest_middleware::Error::Middleware(inner) => Self::Network(inner.to_string()),
        }
    }
}

/// An application-level error returned by the CLOB API.
///
/// The CLOB reports failures as a non-2xx status with a JSON body of the
/// form `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code of the response
    pub status: u16,
    /// Message from the `error` field, or the raw body when absent
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HTTP {}: {}", self.status, self.message)
    }
}

impl ApiError {
    /// Create a new API error from status and message.
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Build an API error from a raw response body.
    pub fn from_body(status: u16, body: &str) -> Self {
        #[derive(serde::Deserialize)]
        struct ErrorBody {
            error: String,
        }

        match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => Self::new(status, parsed.error),
            Err(_) if body.trim().is_empty() => Self::new(status, "empty response body"),
            Err(_) => Self::new(status, body.trim()),
        }
    }

    /// Check if the status code signals an authentication failure.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401 || self.status == 403
    }

    /// Check if this is a server-side failure.
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_from_json_body() {
        let error = ApiError::from_body(400, r#"{"error":"Could not create api key"}"#);
        assert_eq!(error.status, 400);
        assert_eq!(error.message, "Could not create api key");
        assert!(!error.is_unauthorized());
    }

    #[test]
    fn test_api_error_from_plain_body() {
        let error = ApiError::from_body(502, "  Bad Gateway\n");
        assert_eq!(error.message, "Bad Gateway");
        assert!(error.is_server_error());

        let empty = ApiError::from_body(500, "");
        assert_eq!(empty.message, "empty response body");
    }

    #[test]
    fn test_api_error_display() {
        let error = ApiError::new(401, "Unauthorized/Invalid api key");
        assert_eq!(error.to_string(), "HTTP 401: Unauthorized/Invalid api key");
        assert!(error.is_unauthorized());
    }

    #[test]
    fn test_error_classification() {
        assert!(PolymarketError::Timeout.is_network());
        assert!(PolymarketError::Network("refused".into()).is_network());
        assert!(PolymarketError::Auth("bad key".into()).is_auth());
        assert!(!PolymarketError::Api(ApiError::new(500, "x")).is_network());
    }
}
