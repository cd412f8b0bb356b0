//! Subscription commands

use serde_json::json;
use tracing::debug;

use appsvcctl_core::list_all;
use azure_arm::SubscriptionHandler;

use crate::cli::{OutputFormat, SubscriptionCommands};
use crate::commands::render_format;
use crate::connection::ConnectionManager;
use crate::error::Result;
use crate::output::print_output;

pub async fn handle_subscription_command(
    cmd: &SubscriptionCommands,
    conn_mgr: &ConnectionManager,
    profile: Option<&str>,
    output: OutputFormat,
) -> Result<()> {
    match cmd {
        SubscriptionCommands::List => {
            let client = conn_mgr.create_arm_client(profile)?;
            let handler = SubscriptionHandler::new(client);

            debug!("Listing subscriptions");
            let subscriptions =
                list_all(handler.list(), |link| handler.list_next(link)).await?;

            let rows: Vec<_> = subscriptions
                .iter()
                .map(|s| {
                    json!({
                        "id": s.subscription_id,
                        "name": s.display_name,
                        "state": s.state,
                    })
                })
                .collect();
            print_output(rows, render_format(output))?;
            Ok(())
        }
    }
}
