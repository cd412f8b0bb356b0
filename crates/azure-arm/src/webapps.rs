//! Web app (site) operations, including deployment slots
//!
//! A deployment slot is addressed by its parent site: ARM encodes the slot
//! as `parent/slot` in the site's `name` field and marks the resource type
//! as `Microsoft.Web/sites/slots`. [`Site::base_name`] and
//! [`Site::slot_name`] implement that convention.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::client::ArmClient;
use crate::error::Result;
use crate::types::Page;

const API_VERSION: &str = "2023-12-01";

/// A web app or deployment slot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    /// ARM resource type: `Microsoft.Web/sites` or `Microsoft.Web/sites/slots`
    #[serde(rename = "type", default)]
    pub site_type: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub properties: Option<SiteProperties>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteProperties {
    /// Observed runtime state, e.g. "Running" or "Stopped"
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub resource_group: Option<String>,
    #[serde(default)]
    pub server_farm_id: Option<String>,
    #[serde(default)]
    pub default_host_name: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

impl Site {
    /// True when this resource is a deployment slot of a parent site
    pub fn is_deployment_slot(&self) -> bool {
        self.site_type
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case("microsoft.web/sites/slots"))
    }

    /// The parent site name. Slot names arrive as `parent/slot`; the split
    /// is on the last separator.
    pub fn base_name(&self) -> &str {
        if self.is_deployment_slot() {
            match self.name.rfind('/') {
                Some(idx) => &self.name[..idx],
                None => &self.name,
            }
        } else {
            &self.name
        }
    }

    /// The slot name, if this site is a deployment slot
    pub fn slot_name(&self) -> Option<&str> {
        if self.is_deployment_slot() {
            self.name.rfind('/').map(|idx| &self.name[idx + 1..])
        } else {
            None
        }
    }

    /// Observed state, if the API returned one
    pub fn state(&self) -> Option<&str> {
        self.properties.as_ref()?.state.as_deref()
    }

    /// Resource group the site lives in
    pub fn resource_group(&self) -> Option<&str> {
        self.properties.as_ref()?.resource_group.as_deref()
    }

    /// Default hostname, e.g. `mysite.azurewebsites.net`
    pub fn default_host_name(&self) -> Option<&str> {
        self.properties.as_ref()?.default_host_name.as_deref()
    }
}

/// Parameters for creating a web app
#[derive(Debug, Clone)]
pub struct SiteSpec {
    pub location: String,
    /// Full ARM id of the App Service plan to host the site on
    pub server_farm_id: String,
    /// Runtime stack for Linux sites, e.g. "NODE|20-lts"
    pub linux_fx_version: Option<String>,
}

/// Result of a site name availability check
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameAvailability {
    pub name_available: bool,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Publishing (SCM) credentials for a site
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishingUser {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub properties: Option<PublishingUserProperties>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishingUserProperties {
    #[serde(default)]
    pub publishing_user_name: Option<String>,
    #[serde(default)]
    pub publishing_password: Option<String>,
    #[serde(default)]
    pub scm_uri: Option<String>,
}

/// Handler for web app operations
pub struct WebAppHandler {
    client: ArmClient,
}

impl WebAppHandler {
    pub fn new(client: ArmClient) -> Self {
        Self { client }
    }

    /// First page of web apps in a subscription
    pub async fn list(&self, subscription_id: &str) -> Result<Page<Site>> {
        self.client
            .get(&format!(
                "subscriptions/{subscription_id}/providers/Microsoft.Web/sites?api-version={API_VERSION}"
            ))
            .await
    }

    /// First page of web apps in a resource group
    pub async fn list_by_group(
        &self,
        subscription_id: &str,
        resource_group: &str,
    ) -> Result<Page<Site>> {
        self.client
            .get(&format!(
                "subscriptions/{subscription_id}/resourceGroups/{resource_group}/providers/Microsoft.Web/sites?api-version={API_VERSION}"
            ))
            .await
    }

    /// Fetch the page behind a continuation link
    pub async fn list_next(&self, next_link: String) -> Result<Page<Site>> {
        self.client.get_link(&next_link).await
    }

    /// Get a top-level site
    pub async fn get(
        &self,
        subscription_id: &str,
        resource_group: &str,
        name: &str,
    ) -> Result<Site> {
        self.client
            .get(&format!(
                "subscriptions/{subscription_id}/resourceGroups/{resource_group}/providers/Microsoft.Web/sites/{name}?api-version={API_VERSION}"
            ))
            .await
    }

    /// Get a deployment slot of a site
    pub async fn get_slot(
        &self,
        subscription_id: &str,
        resource_group: &str,
        name: &str,
        slot: &str,
    ) -> Result<Site> {
        self.client
            .get(&format!(
                "subscriptions/{subscription_id}/resourceGroups/{resource_group}/providers/Microsoft.Web/sites/{name}/slots/{slot}?api-version={API_VERSION}"
            ))
            .await
    }

    /// Create a web app
    pub async fn create(
        &self,
        subscription_id: &str,
        resource_group: &str,
        name: &str,
        spec: &SiteSpec,
    ) -> Result<Site> {
        let mut site_config = json!({});
        if let Some(ref fx) = spec.linux_fx_version {
            site_config = json!({ "linuxFxVersion": fx });
        }
        let body = json!({
            "location": spec.location,
            "properties": {
                "serverFarmId": spec.server_farm_id,
                "siteConfig": site_config,
            },
        });
        self.client
            .put(
                &format!(
                    "subscriptions/{subscription_id}/resourceGroups/{resource_group}/providers/Microsoft.Web/sites/{name}?api-version={API_VERSION}"
                ),
                &body,
            )
            .await
    }

    /// Check whether a site name is still available. Site names are global
    /// (they become `<name>.azurewebsites.net`).
    pub async fn check_name_availability(
        &self,
        subscription_id: &str,
        name: &str,
    ) -> Result<NameAvailability> {
        let body = json!({ "name": name, "type": "Microsoft.Web/sites" });
        self.client
            .post(
                &format!(
                    "subscriptions/{subscription_id}/providers/Microsoft.Web/checknameavailability?api-version={API_VERSION}"
                ),
                &body,
            )
            .await
    }

    /// Fetch publishing credentials, using the slot route when the site is
    /// a deployment slot.
    pub async fn publishing_credentials(
        &self,
        subscription_id: &str,
        site: &Site,
    ) -> Result<PublishingUser> {
        let resource_group = site.resource_group().ok_or_else(|| {
            crate::error::ArmError::InvalidResponse(
                "site has no resource group in its properties".to_string(),
            )
        })?;
        let name = site.base_name();

        let path = match site.slot_name() {
            Some(slot) => format!(
                "subscriptions/{subscription_id}/resourceGroups/{resource_group}/providers/Microsoft.Web/sites/{name}/slots/{slot}/config/publishingcredentials/list?api-version={API_VERSION}"
            ),
            None => format!(
                "subscriptions/{subscription_id}/resourceGroups/{resource_group}/providers/Microsoft.Web/sites/{name}/config/publishingcredentials/list?api-version={API_VERSION}"
            ),
        };
        self.client.post(&path, &json!({})).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(name: &str, site_type: &str) -> Site {
        Site {
            id: None,
            name: name.to_string(),
            site_type: Some(site_type.to_string()),
            location: None,
            kind: None,
            properties: None,
        }
    }

    #[test]
    fn slot_name_split_on_last_separator() {
        let slot = site("parentSite/slotA", "Microsoft.Web/sites/slots");
        assert!(slot.is_deployment_slot());
        assert_eq!(slot.base_name(), "parentSite");
        assert_eq!(slot.slot_name(), Some("slotA"));
    }

    #[test]
    fn top_level_site_has_no_slot() {
        let top = site("parentSite", "Microsoft.Web/sites");
        assert!(!top.is_deployment_slot());
        assert_eq!(top.base_name(), "parentSite");
        assert_eq!(top.slot_name(), None);
    }

    #[test]
    fn slot_detection_is_case_insensitive() {
        let slot = site("a/b", "microsoft.web/SITES/SLOTS");
        assert!(slot.is_deployment_slot());
    }

    #[test]
    fn site_deserializes_arm_shape() {
        let json = r#"{
            "id": "/subscriptions/s/resourceGroups/rg/providers/Microsoft.Web/sites/my-app",
            "name": "my-app",
            "type": "Microsoft.Web/sites",
            "location": "westeurope",
            "properties": {
                "state": "Running",
                "resourceGroup": "rg",
                "defaultHostName": "my-app.azurewebsites.net"
            }
        }"#;
        let site: Site = serde_json::from_str(json).unwrap();
        assert_eq!(site.state(), Some("Running"));
        assert_eq!(site.resource_group(), Some("rg"));
        assert_eq!(site.default_host_name(), Some("my-app.azurewebsites.net"));
    }
}
