//! Configuration management for appsvcctl
//!
//! Handles configuration loading from files, environment variables, and
//! command-line arguments. Configuration is stored in TOML format with
//! support for multiple named profiles plus a `defaults` table of
//! remembered wizard answers.

#[cfg(target_os = "macos")]
use directories::BaseDirs;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::error::{ConfigError, Result};

/// Main configuration structure
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct Config {
    /// Profile used when none is specified on the command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_profile: Option<String>,
    /// Map of profile name -> profile configuration
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
    /// Answers the provisioning wizard remembers between runs
    /// (last resource group, last plan, last location)
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub defaults: HashMap<String, String>,
}

/// Individual profile configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Profile {
    /// Azure subscription this profile targets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_id: Option<String>,
    /// Bearer token for ARM requests. Usually "${AZURE_ACCESS_TOKEN}" so
    /// the expanded value never lands on disk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// ARM endpoint, overridable for sovereign clouds
    #[serde(default = "default_arm_url")]
    pub api_url: String,
}

impl Default for Profile {
    fn default() -> Self {
        Profile {
            subscription_id: None,
            access_token: None,
            api_url: default_arm_url(),
        }
    }
}

fn default_arm_url() -> String {
    azure_arm::DEFAULT_ARM_URL.to_string()
}

impl Config {
    /// Resolve the profile name to use for a command.
    ///
    /// Resolution order: explicit `--profile`, then the configured
    /// `default_profile`, then the only profile if exactly one exists.
    pub fn resolve_profile(&self, explicit_profile: Option<&str>) -> Result<String> {
        if let Some(profile_name) = explicit_profile {
            if !self.profiles.contains_key(profile_name) {
                return Err(ConfigError::ProfileNotFound {
                    name: profile_name.to_string(),
                });
            }
            return Ok(profile_name.to_string());
        }

        if let Some(ref default) = self.default_profile {
            return Ok(default.clone());
        }

        if self.profiles.len() == 1 {
            if let Some(name) = self.profiles.keys().next() {
                return Ok(name.clone());
            }
        }

        if self.profiles.is_empty() {
            Err(ConfigError::NoProfiles {
                suggestion: "Use 'appsvcctl profile set' to create a profile.".to_string(),
            })
        } else {
            let mut names: Vec<_> = self.profiles.keys().map(String::as_str).collect();
            names.sort();
            Err(ConfigError::NoProfiles {
                suggestion: format!(
                    "Multiple profiles exist ({}) and no default is set. \
                     Pass --profile or run 'appsvcctl profile default <name>'.",
                    names.join(", ")
                ),
            })
        }
    }

    /// Get a profile by name
    pub fn get_profile(&self, name: &str) -> Result<&Profile> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::ProfileNotFound {
                name: name.to_string(),
            })
    }

    /// Load configuration from the standard location
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| ConfigError::LoadError {
            path: config_path.display().to_string(),
            source: e,
        })?;

        // Expand environment variables in the config content
        let expanded_content = Self::expand_env_vars(&content);

        let config: Config = toml::from_str(&expanded_content)?;

        Ok(config)
    }

    /// Save configuration to the standard location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to_path(&config_path)
    }

    /// Save configuration to a specific path
    pub fn save_to_path(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::SaveError {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        let content = toml::to_string_pretty(self)?;

        fs::write(config_path, content).map_err(|e| ConfigError::SaveError {
            path: config_path.display().to_string(),
            source: e,
        })?;

        Ok(())
    }

    /// Set or update a profile
    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    /// Remove a profile by name
    pub fn remove_profile(&mut self, name: &str) -> Option<Profile> {
        if self.default_profile.as_deref() == Some(name) {
            self.default_profile = None;
        }
        self.profiles.remove(name)
    }

    /// List all profiles sorted by name
    pub fn list_profiles(&self) -> Vec<(&String, &Profile)> {
        let mut profiles: Vec<_> = self.profiles.iter().collect();
        profiles.sort_by_key(|(name, _)| *name);
        profiles
    }

    /// Store a remembered wizard answer
    pub fn remember(&mut self, key: &str, value: &str) {
        self.defaults.insert(key.to_string(), value.to_string());
    }

    /// Fetch a remembered wizard answer
    pub fn remembered(&self, key: &str) -> Option<&str> {
        self.defaults.get(key).map(String::as_str)
    }

    /// Get the path to the configuration file
    ///
    /// On macOS, this supports both the standard macOS path and Linux-style
    /// ~/.config path:
    /// 1. Check ~/.config/appsvcctl/config.toml (Linux-style, preferred for consistency)
    /// 2. Fall back to ~/Library/Application Support/com.appsvcctl.appsvcctl/config.toml
    ///
    /// On Linux: ~/.config/appsvcctl/config.toml
    /// On Windows: %APPDATA%\appsvcctl\appsvcctl\config.toml
    pub fn config_path() -> Result<PathBuf> {
        // On macOS, check for Linux-style path first for cross-platform consistency
        #[cfg(target_os = "macos")]
        {
            if let Some(base_dirs) = BaseDirs::new() {
                let home_dir = base_dirs.home_dir();
                let linux_style_path = home_dir
                    .join(".config")
                    .join("appsvcctl")
                    .join("config.toml");

                if linux_style_path.exists() {
                    return Ok(linux_style_path);
                }

                if linux_style_path
                    .parent()
                    .map(|p| p.exists())
                    .unwrap_or(false)
                {
                    return Ok(linux_style_path);
                }
            }
        }

        let proj_dirs =
            ProjectDirs::from("com", "appsvcctl", "appsvcctl").ok_or(ConfigError::ConfigDirError)?;

        Ok(proj_dirs.config_dir().join("config.toml"))
    }

    /// Expand environment variables in configuration content
    ///
    /// Supports ${VAR} and ${VAR:-default} syntax. Unset variables are left
    /// as-is so profiles that are not in use do not break loading.
    ///
    /// Example:
    /// ```toml
    /// access_token = "${AZURE_ACCESS_TOKEN}"
    /// api_url = "${AZURE_ARM_URL:-https://management.azure.com}"
    /// ```
    fn expand_env_vars(content: &str) -> String {
        let expanded =
            shellexpand::env_with_context_no_errors(content, |var| std::env::var(var).ok());
        expanded.to_string()
    }
}
