//! Error types for the ARM client
//!
//! A closed set of variants mapped from HTTP status codes, with predicate
//! helpers so callers can branch without inspecting response bodies.

use thiserror::Error;

/// Errors returned by ARM API operations
#[derive(Error, Debug)]
pub enum ArmError {
    /// 401/403 - bearer token missing, expired, or lacking permissions
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    /// 404 - resource does not exist
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// 400 - malformed request or invalid parameter
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// 409 - resource already exists or is in a conflicting state
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// 429 - ARM throttling
    #[error("Rate limited: {message}")]
    RateLimited { message: String },

    /// 5xx - service-side failure
    #[error("Server error: {message}")]
    ServerError { message: String },

    /// Any other non-success status
    #[error("API error {code}: {message}")]
    ApiError { code: u16, message: String },

    /// Transport-level failure (DNS, TLS, connection reset)
    #[error("Connection error: {0}")]
    ConnectionError(#[from] reqwest::Error),

    /// Response body did not match the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Client construction failed (bad base URL, missing token)
    #[error("Client configuration error: {0}")]
    Configuration(String),
}

/// Result type alias for ARM operations
pub type Result<T> = std::result::Result<T, ArmError>;

impl ArmError {
    /// Build the appropriate variant from an HTTP status code and the
    /// error message extracted from the response body.
    pub(crate) fn from_status(code: u16, message: String) -> Self {
        match code {
            400 => ArmError::BadRequest { message },
            401 | 403 => ArmError::AuthenticationFailed { message },
            404 => ArmError::NotFound { message },
            409 => ArmError::Conflict { message },
            429 => ArmError::RateLimited { message },
            500..=599 => ArmError::ServerError { message },
            _ => ArmError::ApiError { code, message },
        }
    }

    /// Returns true if this is a "not found" error (404)
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, ArmError::NotFound { .. })
    }

    /// Returns true if this is an authentication/authorization error (401/403)
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ArmError::AuthenticationFailed { .. })
    }

    /// Returns true if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, ArmError::ServerError { .. })
    }

    /// Returns true if this is a throttling error (429)
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, ArmError::RateLimited { .. })
    }

    /// Returns true if this is a conflict error (409)
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, ArmError::Conflict { .. })
    }

    /// Returns true if a retry could plausibly succeed
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ArmError::RateLimited { .. }
                | ArmError::ServerError { .. }
                | ArmError::ConnectionError(_)
        )
    }
}
