//! Connection management for ARM clients

use crate::error::{AppSvcCtlError, Result as CliResult};
use anyhow::Context;
use appsvcctl_core::Config;
use azure_arm::ArmClient;
use tracing::{debug, info, trace};

/// User agent string for appsvcctl HTTP requests
const APPSVCCTL_USER_AGENT: &str = concat!("appsvcctl/", env!("CARGO_PKG_VERSION"));

/// Connection manager for creating authenticated clients
#[derive(Clone)]
pub struct ConnectionManager {
    pub config: Config,
    pub config_path: Option<std::path::PathBuf>,
}

impl ConnectionManager {
    /// Create a new connection manager with the given configuration
    pub fn new(config: Config) -> Self {
        Self {
            config,
            config_path: None,
        }
    }

    /// Create a new connection manager with a custom config path
    pub fn with_config_path(config: Config, config_path: Option<std::path::PathBuf>) -> Self {
        Self {
            config,
            config_path,
        }
    }

    /// Save a (possibly modified) configuration to the appropriate location
    pub fn save_config(&self, config: &Config) -> CliResult<()> {
        if let Some(ref path) = self.config_path {
            config
                .save_to_path(path)
                .context("Failed to save configuration")?;
        } else {
            config.save().context("Failed to save configuration")?;
        }
        Ok(())
    }

    /// Whether environment variables participate in credential resolution.
    ///
    /// When --config-file is explicitly specified, environment variables are
    /// ignored to provide true configuration isolation. This follows the
    /// principle of "explicit wins" (CLI args > env vars > defaults).
    fn use_env_vars(&self) -> bool {
        self.config_path.is_none()
    }

    /// Create an ARM client from profile credentials with environment
    /// variable override support (AZURE_ACCESS_TOKEN, AZURE_ARM_URL).
    pub fn create_arm_client(&self, profile_name: Option<&str>) -> CliResult<ArmClient> {
        debug!("Creating ARM client");
        trace!("Profile name: {:?}", profile_name);

        let use_env_vars = self.use_env_vars();
        if !use_env_vars {
            info!("--config-file specified explicitly, ignoring environment variables");
        }

        let env_token = if use_env_vars {
            std::env::var("AZURE_ACCESS_TOKEN").ok()
        } else {
            None
        };
        let env_url = if use_env_vars {
            std::env::var("AZURE_ARM_URL").ok()
        } else {
            None
        };

        if env_token.is_some() {
            debug!("Found AZURE_ACCESS_TOKEN environment variable");
        }
        if env_url.is_some() {
            debug!("Found AZURE_ARM_URL environment variable");
        }

        let (final_token, final_url) = if let Some(token) = env_token {
            // Environment variables provide complete credentials
            info!("Using ARM credentials from environment variables");
            let url = env_url.unwrap_or_else(|| azure_arm::DEFAULT_ARM_URL.to_string());
            (token, url)
        } else {
            let resolved_profile_name = self.config.resolve_profile(profile_name)?;
            info!("Using profile: {}", resolved_profile_name);

            let profile = self.config.get_profile(&resolved_profile_name)?;
            let token = profile.access_token.clone().ok_or_else(|| {
                AppSvcCtlError::MissingCredentials {
                    name: resolved_profile_name.clone(),
                }
            })?;
            // An unexpanded ${VAR} means the referenced env var was unset
            if token.starts_with("${") {
                return Err(AppSvcCtlError::MissingCredentials {
                    name: resolved_profile_name,
                });
            }

            let url = env_url.unwrap_or_else(|| profile.api_url.clone());
            (token, url)
        };

        info!("Connecting to ARM endpoint: {}", final_url);

        let client = ArmClient::builder()
            .base_url(&final_url)
            .bearer_token(&final_token)
            .user_agent(APPSVCCTL_USER_AGENT)
            .build()
            .map_err(AppSvcCtlError::from)?;

        debug!("ARM client created successfully");
        Ok(client)
    }

    /// Resolve the subscription id to operate on
    /// (AZURE_SUBSCRIPTION_ID override, then the profile's setting).
    pub fn resolve_subscription(&self, profile_name: Option<&str>) -> CliResult<String> {
        if self.use_env_vars()
            && let Ok(sub) = std::env::var("AZURE_SUBSCRIPTION_ID")
            && !sub.is_empty()
        {
            debug!("Using subscription from AZURE_SUBSCRIPTION_ID");
            return Ok(sub);
        }

        let resolved_profile_name = self.config.resolve_profile(profile_name)?;
        let profile = self.config.get_profile(&resolved_profile_name)?;
        profile
            .subscription_id
            .clone()
            .filter(|s| !s.is_empty() && !s.starts_with("${"))
            .ok_or(AppSvcCtlError::NoSubscription)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use appsvcctl_core::Profile;

    fn config_with_profile() -> Config {
        let mut config = Config::default();
        config.set_profile(
            "work".to_string(),
            Profile {
                subscription_id: Some("sub-1".to_string()),
                access_token: Some("profile-token".to_string()),
                api_url: azure_arm::DEFAULT_ARM_URL.to_string(),
            },
        );
        config
    }

    #[test]
    #[serial_test::serial]
    fn profile_credentials_build_a_client() {
        unsafe {
            std::env::remove_var("AZURE_ACCESS_TOKEN");
            std::env::remove_var("AZURE_ARM_URL");
        }
        let mgr = ConnectionManager::new(config_with_profile());
        let client = mgr.create_arm_client(Some("work")).unwrap();
        assert_eq!(client.base_url(), "https://management.azure.com/");
    }

    #[test]
    #[serial_test::serial]
    fn env_token_wins_over_profile() {
        unsafe {
            std::env::set_var("AZURE_ACCESS_TOKEN", "env-token");
            std::env::set_var("AZURE_ARM_URL", "https://management.usgovcloudapi.net");
        }
        let mgr = ConnectionManager::new(config_with_profile());
        let client = mgr.create_arm_client(None).unwrap();
        assert_eq!(client.base_url(), "https://management.usgovcloudapi.net/");
        unsafe {
            std::env::remove_var("AZURE_ACCESS_TOKEN");
            std::env::remove_var("AZURE_ARM_URL");
        }
    }

    #[test]
    #[serial_test::serial]
    fn explicit_config_path_ignores_env() {
        unsafe {
            std::env::set_var("AZURE_SUBSCRIPTION_ID", "env-sub");
        }
        let mgr = ConnectionManager::with_config_path(
            config_with_profile(),
            Some(std::path::PathBuf::from("/tmp/isolated.toml")),
        );
        assert_eq!(mgr.resolve_subscription(Some("work")).unwrap(), "sub-1");
        unsafe {
            std::env::remove_var("AZURE_SUBSCRIPTION_ID");
        }
    }

    #[test]
    #[serial_test::serial]
    fn unexpanded_token_is_missing_credentials() {
        unsafe {
            std::env::remove_var("AZURE_ACCESS_TOKEN");
        }
        let mut config = config_with_profile();
        config.profiles.get_mut("work").unwrap().access_token =
            Some("${AZURE_ACCESS_TOKEN}".to_string());
        let mgr = ConnectionManager::new(config);
        let err = mgr.create_arm_client(Some("work")).unwrap_err();
        assert!(matches!(err, AppSvcCtlError::MissingCredentials { .. }));
    }
}
