//! Resource group commands

use serde_json::json;
use tracing::{debug, info};

use appsvcctl_core::list_all;
use azure_arm::{ResourceGroup, ResourceGroupHandler};

use crate::cli::{GroupCommands, OutputFormat};
use crate::commands::render_format;
use crate::connection::ConnectionManager;
use crate::error::Result;
use crate::output::print_output;

pub async fn handle_group_command(
    cmd: &GroupCommands,
    conn_mgr: &ConnectionManager,
    profile: Option<&str>,
    output: OutputFormat,
) -> Result<()> {
    let client = conn_mgr.create_arm_client(profile)?;
    let subscription = conn_mgr.resolve_subscription(profile)?;
    let handler = ResourceGroupHandler::new(client);

    match cmd {
        GroupCommands::List => {
            debug!("Listing resource groups");
            let groups = list_all(handler.list(&subscription), |link| {
                handler.list_next(link)
            })
            .await?;

            let rows: Vec<_> = groups.iter().map(group_row).collect();
            print_output(rows, render_format(output))?;
        }
        GroupCommands::Create { name, location } => {
            info!(group = %name, location = %location, "Creating resource group");
            let group = handler.create(&subscription, name, location).await?;
            print_output(group_row(&group), render_format(output))?;
        }
    }
    Ok(())
}

fn group_row(group: &ResourceGroup) -> serde_json::Value {
    json!({
        "name": group.name,
        "location": group.location,
        "state": group
            .properties
            .as_ref()
            .and_then(|p| p.provisioning_state.as_deref()),
    })
}
