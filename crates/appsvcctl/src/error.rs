//! Error types for appsvcctl
//!
//! Defines structured error types using thiserror for better error handling
//! and user experience.

use colored::Colorize;
use thiserror::Error;

/// Main error type for the appsvcctl application
#[derive(Error, Debug)]
pub enum AppSvcCtlError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Profile '{name}' not found")]
    ProfileNotFound { name: String },

    #[error("Missing credentials for profile '{name}'")]
    MissingCredentials { name: String },

    #[error("No subscription configured. Set one on the profile or export AZURE_SUBSCRIPTION_ID.")]
    NoSubscription,

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("API error: {message}")]
    ApiError { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Connection error: {message}")]
    ConnectionError { message: String },

    #[error("Timeout: {message}")]
    Timeout { message: String },

    #[error("Output formatting error: {message}")]
    OutputError { message: String },

    /// The user backed out of an interactive prompt. Carries no message;
    /// main() exits 130 without printing anything.
    #[error("cancelled")]
    Cancelled,
}

/// Result type for appsvcctl operations
pub type Result<T> = std::result::Result<T, AppSvcCtlError>;

impl AppSvcCtlError {
    /// Get helpful suggestions for resolving this error
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            AppSvcCtlError::ProfileNotFound { name } => vec![
                "List available profiles: appsvcctl profile list".to_string(),
                format!("Create profile '{}': appsvcctl profile set {}", name, name),
            ],
            AppSvcCtlError::MissingCredentials { name } => vec![
                format!("Update profile credentials: appsvcctl profile set {}", name),
                "Verify AZURE_ACCESS_TOKEN is set when the profile references it".to_string(),
            ],
            AppSvcCtlError::NoSubscription => vec![
                "Set the subscription on the profile: appsvcctl profile set <name> --subscription-id <id>".to_string(),
                "List subscriptions your token can see: appsvcctl subscription list".to_string(),
            ],
            AppSvcCtlError::AuthenticationFailed { .. } => vec![
                "Refresh the token: az account get-access-token --query accessToken -o tsv".to_string(),
                "Check the profile: appsvcctl profile show <profile>".to_string(),
            ],
            AppSvcCtlError::ConnectionError { .. } => vec![
                "Check network connectivity".to_string(),
                "Verify the ARM endpoint is correct: appsvcctl profile show <profile>".to_string(),
            ],
            AppSvcCtlError::ApiError { message } if message.contains("404") => vec![
                "Verify the resource name is correct".to_string(),
                "List available resources to find the correct name".to_string(),
            ],
            _ => vec![],
        }
    }

    /// Render the error plus suggestions for stderr
    pub fn display_with_suggestions(&self) -> String {
        let mut out = format!("{}{} {}", "error".red().bold(), ":".bold(), self);
        for suggestion in self.suggestions() {
            out.push_str(&format!("\n  {}{} {}", "tip".yellow().bold(), ":".bold(), suggestion));
        }
        out
    }
}

impl From<azure_arm::ArmError> for AppSvcCtlError {
    fn from(err: azure_arm::ArmError) -> Self {
        match err {
            azure_arm::ArmError::AuthenticationFailed { message } => {
                AppSvcCtlError::AuthenticationFailed { message }
            }
            azure_arm::ArmError::ConnectionError(e) => AppSvcCtlError::ConnectionError {
                message: e.to_string(),
            },
            azure_arm::ArmError::Configuration(message) => {
                AppSvcCtlError::Configuration(message)
            }
            _ => AppSvcCtlError::ApiError {
                message: err.to_string(),
            },
        }
    }
}

impl From<appsvcctl_core::CoreError> for AppSvcCtlError {
    fn from(err: appsvcctl_core::CoreError) -> Self {
        match err {
            appsvcctl_core::CoreError::Arm(arm_err) => AppSvcCtlError::from(arm_err),
            appsvcctl_core::CoreError::StateTimeout { .. } => AppSvcCtlError::Timeout {
                message: err.to_string(),
            },
            appsvcctl_core::CoreError::Validation(msg) => {
                AppSvcCtlError::InvalidInput { message: msg }
            }
            appsvcctl_core::CoreError::Config(msg) => AppSvcCtlError::Configuration(msg),
        }
    }
}

impl From<appsvcctl_core::ConfigError> for AppSvcCtlError {
    fn from(err: appsvcctl_core::ConfigError) -> Self {
        match err {
            appsvcctl_core::ConfigError::ProfileNotFound { name } => {
                AppSvcCtlError::ProfileNotFound { name }
            }
            appsvcctl_core::ConfigError::NoProfiles { .. } => {
                AppSvcCtlError::Configuration(err.to_string())
            }
            _ => AppSvcCtlError::Configuration(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for AppSvcCtlError {
    fn from(err: serde_json::Error) -> Self {
        AppSvcCtlError::OutputError {
            message: format!("JSON error: {}", err),
        }
    }
}

impl From<std::io::Error> for AppSvcCtlError {
    fn from(err: std::io::Error) -> Self {
        AppSvcCtlError::OutputError {
            message: format!("IO error: {}", err),
        }
    }
}

impl From<anyhow::Error> for AppSvcCtlError {
    fn from(err: anyhow::Error) -> Self {
        AppSvcCtlError::Configuration(err.to_string())
    }
}

impl From<dialoguer::Error> for AppSvcCtlError {
    fn from(err: dialoguer::Error) -> Self {
        let dialoguer::Error::IO(io_err) = err;
        // Ctrl-C inside a prompt surfaces as an interrupted read
        if io_err.kind() == std::io::ErrorKind::Interrupted {
            AppSvcCtlError::Cancelled
        } else {
            AppSvcCtlError::from(io_err)
        }
    }
}
