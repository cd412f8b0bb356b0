//! App Service plan commands

use serde_json::json;
use tracing::debug;

use appsvcctl_core::list_all;
use azure_arm::{PlanHandler, ServerFarm};

use crate::cli::{OutputFormat, PlanCommands};
use crate::commands::render_format;
use crate::connection::ConnectionManager;
use crate::error::Result;
use crate::output::print_output;

pub async fn handle_plan_command(
    cmd: &PlanCommands,
    conn_mgr: &ConnectionManager,
    profile: Option<&str>,
    output: OutputFormat,
) -> Result<()> {
    let client = conn_mgr.create_arm_client(profile)?;
    let subscription = conn_mgr.resolve_subscription(profile)?;
    let handler = PlanHandler::new(client);

    match cmd {
        PlanCommands::List => {
            debug!("Listing app service plans");
            let plans = list_all(handler.list(&subscription), |link| {
                handler.list_next(link)
            })
            .await?;

            let rows: Vec<_> = plans.iter().map(plan_row).collect();
            print_output(rows, render_format(output))?;
        }
        PlanCommands::Show { name, group } => {
            let plan = handler.get(&subscription, group, name).await?;
            print_output(plan_row(&plan), render_format(output))?;
        }
    }
    Ok(())
}

fn plan_row(plan: &ServerFarm) -> serde_json::Value {
    json!({
        "name": plan.name,
        "location": plan.location,
        "sku": plan.sku.as_ref().map(|s| s.name.as_str()),
        "os": if plan.is_linux() { "linux" } else { "windows" },
        "sites": plan
            .properties
            .as_ref()
            .and_then(|p| p.number_of_sites),
    })
}
