//! Unified error handling for appsvcctl-core
//!
//! Wraps ARM client errors and adds the engine-level failure kinds. The
//! poller's timeout is deliberately a separate variant from a failed state
//! fetch so callers can tell "the resource never got there" apart from
//! "the API call itself broke".

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum CoreError {
    /// Error from the ARM API
    #[error("ARM API error: {0}")]
    Arm(#[from] azure_arm::ArmError),

    /// The polled resource never reached the target state in time
    #[error("Timeout waiting for web app \"{site}\" state \"{state}\"")]
    StateTimeout { site: String, state: String },

    /// Input validation failed before any API call was made
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Returns true if this is a "not found" error (404)
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            CoreError::Arm(e) => e.is_not_found(),
            _ => false,
        }
    }

    /// Returns true if this is an authentication/authorization error
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        match self {
            CoreError::Arm(e) => e.is_unauthorized(),
            _ => false,
        }
    }

    /// Returns true if this is the poller's deadline failure
    #[must_use]
    pub fn is_state_timeout(&self) -> bool {
        matches!(self, CoreError::StateTimeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use azure_arm::ArmError;

    #[test]
    fn arm_errors_delegate_predicates() {
        let err: CoreError = ArmError::NotFound {
            message: "gone".to_string(),
        }
        .into();
        assert!(err.is_not_found());
        assert!(!err.is_state_timeout());
    }

    #[test]
    fn state_timeout_names_site_and_state() {
        let err = CoreError::StateTimeout {
            site: "my-app".to_string(),
            state: "Running".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("my-app"));
        assert!(text.contains("Running"));
        assert!(err.is_state_timeout());
    }
}
