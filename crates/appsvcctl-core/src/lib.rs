//! # appsvcctl-core
//!
//! Engine layer shared by the `appsvcctl` CLI (and any future frontends).
//! The CLI stays a thin presentation shell; everything with a contract
//! lives here:
//!
//! - [`list`] — flattening of paginated ARM list responses
//! - [`poll`] — fixed-interval polling of a resource's observed state
//! - [`workflows`] — multi-step provisioning operations (create-and-wait)
//! - [`progress`] — progress events for long-running operations
//! - [`telemetry`] — fire-and-forget event sink abstraction
//! - [`deploy`] — deployment environment conventions (marker file, runtimes)
//! - [`config`] — profile configuration and remembered wizard answers

pub mod config;
pub mod deploy;
pub mod error;
pub mod list;
pub mod poll;
pub mod progress;
pub mod telemetry;
pub mod workflows;

pub use config::{Config, ConfigError, Profile};
pub use deploy::Runtime;
pub use error::{CoreError, Result};
pub use list::list_all;
pub use poll::{DEFAULT_POLL_INTERVAL, DEFAULT_POLL_TIMEOUT, wait_for_site_state, wait_for_state};
pub use progress::{ProgressCallback, ProgressEvent};
pub use telemetry::{NoopSink, TelemetrySink, TracingSink};
pub use workflows::{GroupSelection, PlanSelection, WaitOptions, WebAppRequest};
