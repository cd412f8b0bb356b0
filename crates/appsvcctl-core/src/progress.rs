//! Progress events for long-running provisioning operations
//!
//! Workflows report progress through an injected callback so the CLI can
//! drive a spinner and tests can capture the sequence. No global output
//! channel exists anywhere in this workspace.

/// Progress events emitted while provisioning a web app
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Provisioning has started
    Started { name: String },
    /// The target resource group exists (found or just created)
    GroupReady { name: String },
    /// The App Service plan exists (found or just created)
    PlanReady { name: String },
    /// The site resource was created; it may still be starting up
    SiteCreated { name: String },
    /// Waiting for the site to report the target state
    WaitingForState { name: String, target: String },
    /// The site reached the target state
    Completed {
        name: String,
        host: Option<String>,
    },
}

/// Callback type for progress updates
///
/// The CLI uses this to update spinners; non-interactive callers pass
/// `None`.
pub type ProgressCallback = Box<dyn Fn(ProgressEvent) + Send + Sync>;

/// Helper to emit progress events
pub(crate) fn emit(callback: &Option<ProgressCallback>, event: ProgressEvent) {
    if let Some(cb) = callback {
        cb(event);
    }
}
