//! # azure-arm
//!
//! Typed async client for the slice of the Azure Resource Manager REST API
//! that App Service provisioning needs: subscriptions, resource groups,
//! App Service plans ("serverfarms") and web apps (sites and their
//! deployment slots).
//!
//! The client is deliberately thin: one handler per resource type, each
//! wrapping a shared [`ArmClient`]. List operations return a single [`Page`]
//! with an optional `nextLink` continuation token; flattening pages into a
//! full collection is the caller's concern (see `appsvcctl-core`).
//!
//! ```rust,ignore
//! let client = ArmClient::builder()
//!     .bearer_token(token)
//!     .build()?;
//!
//! let webapps = WebAppHandler::new(client.clone());
//! let page = webapps.list("my-subscription-id").await?;
//! ```
//!
//! Authentication is a caller-supplied bearer token; acquiring one (device
//! code flow, managed identity, `az account get-access-token`, ...) is out
//! of scope for this crate.

pub mod client;
pub mod error;
pub mod plans;
pub mod resource_groups;
pub mod subscriptions;
pub mod types;
pub mod webapps;

pub use client::{ArmClient, ArmClientBuilder, DEFAULT_ARM_URL};
pub use error::{ArmError, Result};
pub use plans::{PlanHandler, PlanSpec, ServerFarm};
pub use resource_groups::{ResourceGroup, ResourceGroupHandler};
pub use subscriptions::{Subscription, SubscriptionHandler};
pub use types::Page;
pub use webapps::{NameAvailability, PublishingUser, Site, SiteSpec, WebAppHandler};
