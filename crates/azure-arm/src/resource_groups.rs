//! Resource group operations

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::client::ArmClient;
use crate::error::Result;
use crate::types::Page;

const API_VERSION: &str = "2022-09-01";

/// An Azure resource group
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceGroup {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub properties: Option<ResourceGroupProperties>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceGroupProperties {
    #[serde(default)]
    pub provisioning_state: Option<String>,
}

/// Handler for resource group operations
pub struct ResourceGroupHandler {
    client: ArmClient,
}

impl ResourceGroupHandler {
    pub fn new(client: ArmClient) -> Self {
        Self { client }
    }

    /// First page of resource groups in a subscription
    pub async fn list(&self, subscription_id: &str) -> Result<Page<ResourceGroup>> {
        self.client
            .get(&format!(
                "subscriptions/{subscription_id}/resourcegroups?api-version={API_VERSION}"
            ))
            .await
    }

    /// Fetch the page behind a continuation link
    pub async fn list_next(&self, next_link: String) -> Result<Page<ResourceGroup>> {
        self.client.get_link(&next_link).await
    }

    /// Get a single resource group
    pub async fn get(&self, subscription_id: &str, name: &str) -> Result<ResourceGroup> {
        self.client
            .get(&format!(
                "subscriptions/{subscription_id}/resourcegroups/{name}?api-version={API_VERSION}"
            ))
            .await
    }

    /// Create (or update) a resource group. ARM PUT is idempotent here.
    pub async fn create(
        &self,
        subscription_id: &str,
        name: &str,
        location: &str,
    ) -> Result<ResourceGroup> {
        self.client
            .put(
                &format!(
                    "subscriptions/{subscription_id}/resourcegroups/{name}?api-version={API_VERSION}"
                ),
                &json!({ "location": location }),
            )
            .await
    }
}
