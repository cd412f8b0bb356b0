//! Subscription listing

use serde::{Deserialize, Serialize};

use crate::client::ArmClient;
use crate::error::Result;
use crate::types::Page;

const API_VERSION: &str = "2022-12-01";

/// An Azure subscription
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    #[serde(default)]
    pub id: Option<String>,
    pub subscription_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub tenant_id: Option<String>,
}

/// Handler for subscription operations
pub struct SubscriptionHandler {
    client: ArmClient,
}

impl SubscriptionHandler {
    pub fn new(client: ArmClient) -> Self {
        Self { client }
    }

    /// First page of subscriptions visible to the caller
    pub async fn list(&self) -> Result<Page<Subscription>> {
        self.client
            .get(&format!("subscriptions?api-version={API_VERSION}"))
            .await
    }

    /// Fetch the page behind a continuation link
    pub async fn list_next(&self, next_link: String) -> Result<Page<Subscription>> {
        self.client.get_link(&next_link).await
    }
}
