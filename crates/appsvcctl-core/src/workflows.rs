//! Multi-step provisioning operations
//!
//! A workflow strings several ARM calls into one operation with progress
//! reporting. [`create_web_app_and_wait`] is the provisioning path behind
//! `appsvcctl webapp create`: it makes sure the resource group and plan
//! exist, creates the site, then polls until the site reports `Running`.

use azure_arm::{ArmClient, PlanHandler, PlanSpec, ResourceGroupHandler, Site, SiteSpec, WebAppHandler};

use crate::deploy::Runtime;
use crate::error::{CoreError, Result};
use crate::poll::{self, DEFAULT_POLL_INTERVAL, DEFAULT_POLL_TIMEOUT};
use crate::progress::{ProgressCallback, ProgressEvent, emit};

/// The resource group to place the site in
#[derive(Debug, Clone)]
pub enum GroupSelection {
    /// Use a group that already exists
    Existing(String),
    /// Create a new group, in the same location as the site
    New(String),
}

impl GroupSelection {
    pub fn name(&self) -> &str {
        match self {
            GroupSelection::Existing(name) | GroupSelection::New(name) => name,
        }
    }
}

/// The App Service plan to host the site on
#[derive(Debug, Clone)]
pub enum PlanSelection {
    /// Use a plan that already exists in the chosen resource group
    Existing(String),
    /// Create a new Linux plan with the given SKU, e.g. "B1"
    New { name: String, sku: String },
}

impl PlanSelection {
    pub fn name(&self) -> &str {
        match self {
            PlanSelection::Existing(name) | PlanSelection::New { name, .. } => name,
        }
    }
}

/// Everything needed to provision one web app
#[derive(Debug, Clone)]
pub struct WebAppRequest {
    /// Globally unique site name (becomes `<name>.azurewebsites.net`)
    pub name: String,
    /// Azure location, e.g. "westeurope"
    pub location: String,
    pub group: GroupSelection,
    pub plan: PlanSelection,
    pub runtime: Runtime,
}

/// Polling parameters for the final wait
#[derive(Debug, Clone, Copy)]
pub struct WaitOptions {
    pub interval: std::time::Duration,
    pub timeout: std::time::Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        WaitOptions {
            interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_POLL_TIMEOUT,
        }
    }
}

/// Provision a web app and wait until it reports `Running`.
///
/// Steps, in order:
/// 1. Create the resource group if [`GroupSelection::New`] was chosen
///    (ARM PUT is idempotent, re-running is safe)
/// 2. Resolve the App Service plan, creating a Linux plan if
///    [`PlanSelection::New`] was chosen
/// 3. Create the site on that plan with the runtime's `linuxFxVersion`
/// 4. Poll the site state until it matches `Running`
/// 5. Re-fetch the site so the returned value carries the final state
///    and hostname
///
/// Any ARM error aborts the workflow at the step it occurred; nothing is
/// rolled back. Progress events fire after each completed step.
pub async fn create_web_app_and_wait(
    client: &ArmClient,
    subscription_id: &str,
    request: &WebAppRequest,
    wait: WaitOptions,
    on_progress: Option<ProgressCallback>,
) -> Result<Site> {
    let groups = ResourceGroupHandler::new(client.clone());
    let plans = PlanHandler::new(client.clone());
    let webapps = WebAppHandler::new(client.clone());

    emit(
        &on_progress,
        ProgressEvent::Started {
            name: request.name.clone(),
        },
    );

    let group_name = request.group.name().to_string();
    if let GroupSelection::New(ref name) = request.group {
        tracing::info!(group = %name, location = %request.location, "creating resource group");
        groups
            .create(subscription_id, name, &request.location)
            .await?;
    }
    emit(
        &on_progress,
        ProgressEvent::GroupReady {
            name: group_name.clone(),
        },
    );

    let plan = match request.plan {
        PlanSelection::Existing(ref name) => {
            plans.get(subscription_id, &group_name, name).await?
        }
        PlanSelection::New { ref name, ref sku } => {
            tracing::info!(plan = %name, sku = %sku, "creating app service plan");
            let spec = PlanSpec {
                location: request.location.clone(),
                sku: sku.clone(),
                linux: true,
            };
            plans.create(subscription_id, &group_name, name, &spec).await?
        }
    };
    let server_farm_id = plan.id.clone().ok_or_else(|| {
        CoreError::Validation(format!("plan \"{}\" has no ARM id", plan.name))
    })?;
    emit(
        &on_progress,
        ProgressEvent::PlanReady {
            name: plan.name.clone(),
        },
    );

    tracing::info!(site = %request.name, runtime = %request.runtime, "creating web app");
    let spec = SiteSpec {
        location: request.location.clone(),
        server_farm_id,
        linux_fx_version: Some(request.runtime.linux_fx_version().to_string()),
    };
    let site = webapps
        .create(subscription_id, &group_name, &request.name, &spec)
        .await?;
    emit(
        &on_progress,
        ProgressEvent::SiteCreated {
            name: site.name.clone(),
        },
    );

    emit(
        &on_progress,
        ProgressEvent::WaitingForState {
            name: site.name.clone(),
            target: "Running".to_string(),
        },
    );
    poll::wait_for_site_state(
        &webapps,
        subscription_id,
        &group_name,
        &site,
        "Running",
        wait.interval,
        wait.timeout,
    )
    .await?;

    let site = webapps
        .get(subscription_id, &group_name, site.base_name())
        .await?;
    emit(
        &on_progress,
        ProgressEvent::Completed {
            name: site.name.clone(),
            host: site.default_host_name().map(String::from),
        },
    );

    Ok(site)
}
