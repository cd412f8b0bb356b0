//! App Service plan ("serverfarm") operations

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::client::ArmClient;
use crate::error::Result;
use crate::types::Page;

const API_VERSION: &str = "2023-12-01";

/// An App Service plan
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerFarm {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub sku: Option<SkuDescription>,
    #[serde(default)]
    pub properties: Option<ServerFarmProperties>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkuDescription {
    pub name: String,
    #[serde(default)]
    pub tier: Option<String>,
    #[serde(default)]
    pub capacity: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerFarmProperties {
    #[serde(default)]
    pub provisioning_state: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub reserved: Option<bool>,
    #[serde(default)]
    pub number_of_sites: Option<i32>,
}

impl ServerFarm {
    /// Linux plans are flagged `reserved` in ARM
    pub fn is_linux(&self) -> bool {
        self.properties
            .as_ref()
            .and_then(|p| p.reserved)
            .unwrap_or(false)
    }
}

/// Parameters for creating a plan
#[derive(Debug, Clone)]
pub struct PlanSpec {
    pub location: String,
    /// SKU name, e.g. "B1", "P1v3", "F1"
    pub sku: String,
    /// Create a Linux plan (`reserved: true` on the wire)
    pub linux: bool,
}

/// Handler for App Service plan operations
pub struct PlanHandler {
    client: ArmClient,
}

impl PlanHandler {
    pub fn new(client: ArmClient) -> Self {
        Self { client }
    }

    /// First page of plans in a subscription
    pub async fn list(&self, subscription_id: &str) -> Result<Page<ServerFarm>> {
        self.client
            .get(&format!(
                "subscriptions/{subscription_id}/providers/Microsoft.Web/serverfarms?api-version={API_VERSION}"
            ))
            .await
    }

    /// Fetch the page behind a continuation link
    pub async fn list_next(&self, next_link: String) -> Result<Page<ServerFarm>> {
        self.client.get_link(&next_link).await
    }

    /// Get a single plan
    pub async fn get(
        &self,
        subscription_id: &str,
        resource_group: &str,
        name: &str,
    ) -> Result<ServerFarm> {
        self.client
            .get(&format!(
                "subscriptions/{subscription_id}/resourceGroups/{resource_group}/providers/Microsoft.Web/serverfarms/{name}?api-version={API_VERSION}"
            ))
            .await
    }

    /// Create an App Service plan
    pub async fn create(
        &self,
        subscription_id: &str,
        resource_group: &str,
        name: &str,
        spec: &PlanSpec,
    ) -> Result<ServerFarm> {
        let body = json!({
            "location": spec.location,
            "sku": { "name": spec.sku },
            "properties": { "reserved": spec.linux },
        });
        self.client
            .put(
                &format!(
                    "subscriptions/{subscription_id}/resourceGroups/{resource_group}/providers/Microsoft.Web/serverfarms/{name}?api-version={API_VERSION}"
                ),
                &body,
            )
            .await
    }
}
