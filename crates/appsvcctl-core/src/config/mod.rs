//! Profile configuration and remembered wizard answers
//!
//! Configuration is stored as TOML with named profiles, each holding the
//! subscription and credentials for one Azure context. The same file also
//! carries the answers the provisioning wizard remembers between runs
//! (last resource group, last plan, and so on).
//!
//! # Features
//!
//! - Multiple named profiles for different subscriptions
//! - Environment variable expansion in config files
//! - Platform-specific config file locations
//! - A `defaults` table for remembered wizard answers

#![allow(clippy::module_inception)]

pub mod config;
pub mod error;

pub use config::{Config, Profile};
pub use error::{ConfigError, Result};
