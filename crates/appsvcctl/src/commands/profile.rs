//! Profile management commands

use serde_json::json;

use appsvcctl_core::{Config, Profile};

use crate::cli::{OutputFormat, ProfileCommands};
use crate::commands::render_format;
use crate::connection::ConnectionManager;
use crate::error::{AppSvcCtlError, Result};
use crate::output::print_output;

pub async fn handle_profile_command(
    cmd: &ProfileCommands,
    conn_mgr: &ConnectionManager,
    output: OutputFormat,
) -> Result<()> {
    match cmd {
        ProfileCommands::List => {
            let rows: Vec<_> = conn_mgr
                .config
                .list_profiles()
                .into_iter()
                .map(|(name, profile)| {
                    json!({
                        "name": name,
                        "subscription": profile.subscription_id,
                        "api_url": profile.api_url,
                        "default": conn_mgr.config.default_profile.as_deref() == Some(name),
                    })
                })
                .collect();
            print_output(rows, render_format(output))?;
        }

        ProfileCommands::Path => {
            let path = match &conn_mgr.config_path {
                Some(path) => path.clone(),
                None => Config::config_path()?,
            };
            println!("{}", path.display());
        }

        ProfileCommands::Show { name } => {
            let profile = conn_mgr.config.get_profile(name)?;
            print_output(
                json!({
                    "name": name,
                    "subscription": profile.subscription_id,
                    // token value never printed, only whether one is set
                    "access_token": profile.access_token.as_ref().map(|_| "configured"),
                    "api_url": profile.api_url,
                }),
                render_format(output),
            )?;
        }

        ProfileCommands::Set {
            name,
            subscription_id,
            access_token,
            api_url,
            default,
        } => {
            let mut config = conn_mgr.config.clone();
            let mut profile = config.profiles.get(name).cloned().unwrap_or_default();

            if let Some(sub) = subscription_id {
                profile.subscription_id = Some(sub.clone());
            }
            if let Some(token) = access_token {
                profile.access_token = Some(token.clone());
            }
            if let Some(url) = api_url {
                profile.api_url = url.clone();
            }

            config.set_profile(name.clone(), profile);
            if *default || config.profiles.len() == 1 {
                config.default_profile = Some(name.clone());
            }
            conn_mgr.save_config(&config)?;
            println!("Profile '{}' saved", name);
        }

        ProfileCommands::Remove { name } => {
            let mut config = conn_mgr.config.clone();
            if config.remove_profile(name).is_none() {
                return Err(AppSvcCtlError::ProfileNotFound { name: name.clone() });
            }
            conn_mgr.save_config(&config)?;
            println!("Profile '{}' removed", name);
        }

        ProfileCommands::Default { name } => {
            let mut config = conn_mgr.config.clone();
            config.get_profile(name)?;
            config.default_profile = Some(name.clone());
            conn_mgr.save_config(&config)?;
            println!("Default profile set to '{}'", name);
        }
    }
    Ok(())
}
