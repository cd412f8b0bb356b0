//! Web app commands, including the interactive create wizard

use std::collections::HashMap;
use std::time::Duration;

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use indicatif::ProgressBar;
use serde_json::json;
use tracing::{debug, info, warn};

use appsvcctl_core::workflows::{
    GroupSelection, PlanSelection, WaitOptions, WebAppRequest, create_web_app_and_wait,
};
use appsvcctl_core::{
    ProgressCallback, ProgressEvent, Runtime, TelemetrySink, TracingSink, deploy, list_all,
    wait_for_site_state,
};
use azure_arm::{PlanHandler, ResourceGroupHandler, Site, WebAppHandler};

use crate::cli::{OutputFormat, WebappCommands};
use crate::commands::render_format;
use crate::connection::ConnectionManager;
use crate::error::{AppSvcCtlError, Result};
use crate::output::print_output;

const RUNTIMES: [Runtime; 4] = [
    Runtime::Node,
    Runtime::Php,
    Runtime::Dotnetcore,
    Runtime::Ruby,
];

pub async fn handle_webapp_command(
    cmd: &WebappCommands,
    conn_mgr: &ConnectionManager,
    profile: Option<&str>,
    output: OutputFormat,
) -> Result<()> {
    let client = conn_mgr.create_arm_client(profile)?;
    let subscription = conn_mgr.resolve_subscription(profile)?;
    let webapps = WebAppHandler::new(client.clone());

    match cmd {
        WebappCommands::List { group } => {
            debug!("Listing web apps");
            let sites = match group {
                Some(group) => {
                    list_all(webapps.list_by_group(&subscription, group), |link| {
                        webapps.list_next(link)
                    })
                    .await?
                }
                None => {
                    list_all(webapps.list(&subscription), |link| webapps.list_next(link))
                        .await?
                }
            };

            let rows: Vec<_> = sites.iter().map(site_row).collect();
            print_output(rows, render_format(output))?;
        }

        WebappCommands::Show { name, group } => {
            let site = fetch_site(&webapps, &subscription, group, name).await?;
            print_output(site_row(&site), render_format(output))?;
        }

        WebappCommands::Credentials { name, group } => {
            let site = fetch_site(&webapps, &subscription, group, name).await?;
            let creds = webapps.publishing_credentials(&subscription, &site).await?;
            let props = creds.properties.unwrap_or_default();
            print_output(
                json!({
                    "user": props.publishing_user_name,
                    "password": props.publishing_password,
                    "scm_uri": props.scm_uri,
                }),
                render_format(output),
            )?;
        }

        WebappCommands::WaitState {
            name,
            group,
            state,
            interval,
            timeout,
        } => {
            let site = fetch_site(&webapps, &subscription, group, name).await?;
            info!(site = %site.name, target = %state, "Waiting for state");
            wait_for_site_state(
                &webapps,
                &subscription,
                group,
                &site,
                state,
                Duration::from_secs(*interval),
                Duration::from_secs(*timeout),
            )
            .await?;
            println!("'{}' is {}", site.name, state);
        }

        WebappCommands::Create {
            name,
            location,
            resource_group,
            new_resource_group,
            plan,
            new_plan,
            sku,
            runtime,
            yes,
            deploy_marker,
            wait_interval,
            wait_timeout,
        } => {
            let args = CreateArgs {
                name: name.clone(),
                location: location.clone(),
                resource_group: resource_group.clone(),
                new_resource_group: new_resource_group.clone(),
                plan: plan.clone(),
                new_plan: new_plan.clone(),
                sku: sku.clone(),
                runtime: *runtime,
                yes: *yes,
                deploy_marker: deploy_marker.clone(),
                wait: WaitOptions {
                    interval: Duration::from_secs(*wait_interval),
                    timeout: Duration::from_secs(*wait_timeout),
                },
            };
            create_webapp(args, conn_mgr, &client, &subscription, output).await?;
        }
    }
    Ok(())
}

struct CreateArgs {
    name: Option<String>,
    location: Option<String>,
    resource_group: Option<String>,
    new_resource_group: Option<String>,
    plan: Option<String>,
    new_plan: Option<String>,
    sku: String,
    runtime: Option<Runtime>,
    yes: bool,
    deploy_marker: Option<std::path::PathBuf>,
    wait: WaitOptions,
}

async fn create_webapp(
    args: CreateArgs,
    conn_mgr: &ConnectionManager,
    client: &azure_arm::ArmClient,
    subscription: &str,
    output: OutputFormat,
) -> Result<()> {
    let theme = ColorfulTheme::default();
    let webapps = WebAppHandler::new(client.clone());

    let name = resolve_name(&args, &webapps, subscription, &theme).await?;
    let location = resolve_location(&args, conn_mgr, &theme)?;
    let group = resolve_group(&args, conn_mgr, client, subscription, &name, &theme).await?;
    let plan = resolve_plan(&args, client, subscription, &group, &name, &theme).await?;
    let runtime = resolve_runtime(&args, &theme)?;

    if !args.yes {
        let confirmed = Confirm::with_theme(&theme)
            .with_prompt(format!(
                "Create web app '{}' ({}) in '{}' on plan '{}'?",
                name,
                runtime,
                group.name(),
                plan.name()
            ))
            .default(true)
            .interact_opt()?;
        if confirmed != Some(true) {
            return Err(AppSvcCtlError::Cancelled);
        }
    }

    let request = WebAppRequest {
        name: name.clone(),
        location: location.clone(),
        group,
        plan,
        runtime,
    };

    let spinner = ProgressBar::new_spinner();
    spinner.enable_steady_tick(Duration::from_millis(120));
    let progress: ProgressCallback = {
        let spinner = spinner.clone();
        Box::new(move |event: ProgressEvent| {
            let message = match event {
                ProgressEvent::Started { name } => format!("Provisioning '{name}'..."),
                ProgressEvent::GroupReady { name } => format!("Resource group '{name}' ready"),
                ProgressEvent::PlanReady { name } => format!("App Service plan '{name}' ready"),
                ProgressEvent::SiteCreated { name } => format!("Created '{name}'"),
                ProgressEvent::WaitingForState { name, target } => {
                    format!("Waiting for '{name}' to reach '{target}'...")
                }
                ProgressEvent::Completed { name, .. } => format!("'{name}' is running"),
            };
            spinner.set_message(message);
        })
    };

    let result =
        create_web_app_and_wait(client, subscription, &request, args.wait, Some(progress)).await;
    spinner.finish_and_clear();
    let site = result?;

    let sink = TracingSink;
    let props = HashMap::from([
        ("runtime".to_string(), request.runtime.to_string()),
        (
            "newResourceGroup".to_string(),
            matches!(request.group, GroupSelection::New(_)).to_string(),
        ),
        (
            "newPlan".to_string(),
            matches!(request.plan, PlanSelection::New { .. }).to_string(),
        ),
    ]);
    sink.send("webapp.create", &props, &HashMap::new());

    remember_answers(conn_mgr, &location, &request);

    if let Some(ref dir) = args.deploy_marker {
        let path = deploy::write_deployment_marker(dir)?;
        info!(path = %path.display(), "Wrote deployment marker");
        if let Some(globs) = request.runtime.ignored_deploy_globs() {
            debug!(?globs, "Globs to exclude from deployment packages");
        }
    }

    match site.default_host_name() {
        Some(host) => println!("Created '{}': https://{}", site.name, host),
        None => println!("Created '{}'", site.name),
    }
    print_output(site_row(&site), render_format(output))?;
    Ok(())
}

async fn resolve_name(
    args: &CreateArgs,
    webapps: &WebAppHandler,
    subscription: &str,
    theme: &ColorfulTheme,
) -> Result<String> {
    if let Some(ref name) = args.name {
        let availability = webapps.check_name_availability(subscription, name).await?;
        if !availability.name_available {
            return Err(AppSvcCtlError::InvalidInput {
                message: availability
                    .message
                    .unwrap_or_else(|| format!("Web app name '{}' is not available", name)),
            });
        }
        return Ok(name.clone());
    }
    if args.yes {
        return Err(AppSvcCtlError::InvalidInput {
            message: "--name is required with --yes".to_string(),
        });
    }

    // Site names are global; keep prompting until an available one is given
    loop {
        let candidate: String = Input::with_theme(theme)
            .with_prompt("Web app name")
            .interact_text()?;
        let availability = webapps
            .check_name_availability(subscription, &candidate)
            .await?;
        if availability.name_available {
            return Ok(candidate);
        }
        eprintln!(
            "{}",
            availability
                .message
                .unwrap_or_else(|| format!("Web app name '{}' is not available", candidate))
        );
    }
}

fn resolve_location(
    args: &CreateArgs,
    conn_mgr: &ConnectionManager,
    theme: &ColorfulTheme,
) -> Result<String> {
    if let Some(ref location) = args.location {
        return Ok(location.clone());
    }
    if args.yes {
        return Err(AppSvcCtlError::InvalidInput {
            message: "--location is required with --yes".to_string(),
        });
    }

    let mut input = Input::with_theme(theme).with_prompt("Location");
    if let Some(last) = conn_mgr.config.remembered("webapp.lastLocation") {
        input = input.default(last.to_string());
    }
    Ok(input.interact_text()?)
}

async fn resolve_group(
    args: &CreateArgs,
    conn_mgr: &ConnectionManager,
    client: &azure_arm::ArmClient,
    subscription: &str,
    app_name: &str,
    theme: &ColorfulTheme,
) -> Result<GroupSelection> {
    if let Some(ref group) = args.resource_group {
        return Ok(GroupSelection::Existing(group.clone()));
    }
    if let Some(ref group) = args.new_resource_group {
        return Ok(GroupSelection::New(group.clone()));
    }
    if args.yes {
        return Err(AppSvcCtlError::InvalidInput {
            message: "--resource-group or --new-resource-group is required with --yes".to_string(),
        });
    }

    let handler = ResourceGroupHandler::new(client.clone());
    let groups = list_all(handler.list(subscription), |link| handler.list_next(link)).await?;

    let mut items = vec!["Create a new resource group".to_string()];
    items.extend(groups.iter().map(|g| g.name.clone()));

    let default_idx = conn_mgr
        .config
        .remembered("webapp.lastResourceGroup")
        .and_then(|last| items.iter().position(|i| i == last))
        .unwrap_or(0);

    let pick = Select::with_theme(theme)
        .with_prompt("Resource group")
        .items(&items)
        .default(default_idx)
        .interact_opt()?
        .ok_or(AppSvcCtlError::Cancelled)?;

    if pick == 0 {
        let name: String = Input::with_theme(theme)
            .with_prompt("New resource group name")
            .default(format!("{app_name}-rg"))
            .interact_text()?;
        Ok(GroupSelection::New(name))
    } else {
        Ok(GroupSelection::Existing(items[pick].clone()))
    }
}

async fn resolve_plan(
    args: &CreateArgs,
    client: &azure_arm::ArmClient,
    subscription: &str,
    group: &GroupSelection,
    app_name: &str,
    theme: &ColorfulTheme,
) -> Result<PlanSelection> {
    if let Some(ref plan) = args.plan {
        return Ok(PlanSelection::Existing(plan.clone()));
    }
    if let Some(ref plan) = args.new_plan {
        return Ok(PlanSelection::New {
            name: plan.clone(),
            sku: args.sku.clone(),
        });
    }
    if args.yes {
        return Err(AppSvcCtlError::InvalidInput {
            message: "--plan or --new-plan is required with --yes".to_string(),
        });
    }

    // A brand new group cannot have existing plans
    let existing = match group {
        GroupSelection::New(_) => Vec::new(),
        GroupSelection::Existing(group_name) => {
            let handler = PlanHandler::new(client.clone());
            let plans =
                list_all(handler.list(subscription), |link| handler.list_next(link)).await?;
            let marker = format!("/resourcegroups/{}/", group_name.to_lowercase());
            plans
                .into_iter()
                .filter(|p| {
                    p.id.as_deref()
                        .is_some_and(|id| id.to_lowercase().contains(&marker))
                })
                .collect()
        }
    };

    if existing.is_empty() {
        let name: String = Input::with_theme(theme)
            .with_prompt("New App Service plan name")
            .default(format!("{app_name}-plan"))
            .interact_text()?;
        return Ok(PlanSelection::New {
            name,
            sku: args.sku.clone(),
        });
    }

    let mut items = vec!["Create a new App Service plan".to_string()];
    items.extend(existing.iter().map(|p| p.name.clone()));

    let pick = Select::with_theme(theme)
        .with_prompt("App Service plan")
        .items(&items)
        .default(0)
        .interact_opt()?
        .ok_or(AppSvcCtlError::Cancelled)?;

    if pick == 0 {
        let name: String = Input::with_theme(theme)
            .with_prompt("New App Service plan name")
            .default(format!("{app_name}-plan"))
            .interact_text()?;
        Ok(PlanSelection::New {
            name,
            sku: args.sku.clone(),
        })
    } else {
        Ok(PlanSelection::Existing(items[pick].clone()))
    }
}

fn resolve_runtime(args: &CreateArgs, theme: &ColorfulTheme) -> Result<Runtime> {
    if let Some(runtime) = args.runtime {
        return Ok(runtime);
    }
    if args.yes {
        return Err(AppSvcCtlError::InvalidInput {
            message: "--runtime is required with --yes".to_string(),
        });
    }

    let items: Vec<String> = RUNTIMES.iter().map(Runtime::to_string).collect();
    let pick = Select::with_theme(theme)
        .with_prompt("Runtime stack")
        .items(&items)
        .default(0)
        .interact_opt()?
        .ok_or(AppSvcCtlError::Cancelled)?;
    Ok(RUNTIMES[pick])
}

/// Persist wizard answers as defaults for the next run. Failures are
/// logged but never abort a provisioning that already succeeded.
fn remember_answers(conn_mgr: &ConnectionManager, location: &str, request: &WebAppRequest) {
    let mut config = conn_mgr.config.clone();
    config.remember("webapp.lastLocation", location);
    config.remember("webapp.lastResourceGroup", request.group.name());
    config.remember("webapp.lastPlan", request.plan.name());
    if let Err(err) = conn_mgr.save_config(&config) {
        warn!("Could not save remembered answers: {}", err);
    }
}

async fn fetch_site(
    webapps: &WebAppHandler,
    subscription: &str,
    group: &str,
    name: &str,
) -> Result<Site> {
    let site = match name.rsplit_once('/') {
        Some((parent, slot)) => webapps.get_slot(subscription, group, parent, slot).await?,
        None => webapps.get(subscription, group, name).await?,
    };
    Ok(site)
}

fn site_row(site: &Site) -> serde_json::Value {
    json!({
        "name": site.name,
        "state": site.state(),
        "location": site.location,
        "group": site.resource_group(),
        "host": site.default_host_name(),
    })
}
