//! Integration tests for the ARM client against a mock server

use azure_arm::{ArmClient, PlanHandler, PlanSpec, SiteSpec, SubscriptionHandler, WebAppHandler};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> ArmClient {
    ArmClient::builder()
        .base_url(server.uri())
        .bearer_token("test-token")
        .user_agent("azure-arm-tests")
        .build()
        .unwrap()
}

#[tokio::test]
async fn list_subscriptions_sends_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/subscriptions"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [
                { "subscriptionId": "sub-1", "displayName": "Primary" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let handler = SubscriptionHandler::new(client_for(&server).await);
    let page = handler.list().await.unwrap();
    assert_eq!(page.value.len(), 1);
    assert_eq!(page.value[0].subscription_id, "sub-1");
    assert!(page.next_link.is_none());
}

#[tokio::test]
async fn list_returns_continuation_link() {
    let server = MockServer::start().await;
    let next = format!("{}/subscriptions?page=2", server.uri());
    Mock::given(method("GET"))
        .and(path("/subscriptions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{ "subscriptionId": "sub-1" }],
            "nextLink": next,
        })))
        .mount(&server)
        .await;

    let handler = SubscriptionHandler::new(client_for(&server).await);
    let page = handler.list().await.unwrap();
    assert_eq!(page.next_link, Some(next.clone()));

    // The continuation link is fetched as-is
    let page2 = handler.list_next(next).await.unwrap();
    assert_eq!(page2.value[0].subscription_id, "sub-1");
}

#[tokio::test]
async fn get_site_maps_404_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": { "code": "ResourceNotFound", "message": "Site 'ghost' was not found." }
        })))
        .mount(&server)
        .await;

    let handler = WebAppHandler::new(client_for(&server).await);
    let err = handler.get("sub-1", "rg", "ghost").await.unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("Site 'ghost' was not found."));
}

#[tokio::test]
async fn expired_token_maps_to_authentication_failed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "code": "ExpiredAuthenticationToken", "message": "Token expired." }
        })))
        .mount(&server)
        .await;

    let handler = SubscriptionHandler::new(client_for(&server).await);
    let err = handler.list().await.unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn create_plan_puts_sku_and_reserved_flag() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(
            "/subscriptions/sub-1/resourceGroups/rg/providers/Microsoft.Web/serverfarms/plan-1",
        ))
        .and(query_param("api-version", "2023-12-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "plan-1",
            "location": "westeurope",
            "sku": { "name": "B1", "tier": "Basic" },
            "properties": { "provisioningState": "Succeeded", "reserved": true }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let handler = PlanHandler::new(client_for(&server).await);
    let plan = handler
        .create(
            "sub-1",
            "rg",
            "plan-1",
            &PlanSpec {
                location: "westeurope".to_string(),
                sku: "B1".to_string(),
                linux: true,
            },
        )
        .await
        .unwrap();
    assert!(plan.is_linux());
    assert_eq!(plan.sku.unwrap().name, "B1");
}

#[tokio::test]
async fn create_site_returns_site_state() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(
            "/subscriptions/sub-1/resourceGroups/rg/providers/Microsoft.Web/sites/my-app",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "my-app",
            "type": "Microsoft.Web/sites",
            "location": "westeurope",
            "properties": {
                "state": "Running",
                "resourceGroup": "rg",
                "defaultHostName": "my-app.azurewebsites.net"
            }
        })))
        .mount(&server)
        .await;

    let handler = WebAppHandler::new(client_for(&server).await);
    let site = handler
        .create(
            "sub-1",
            "rg",
            "my-app",
            &SiteSpec {
                location: "westeurope".to_string(),
                server_farm_id: "/subscriptions/sub-1/resourceGroups/rg/providers/Microsoft.Web/serverfarms/plan-1".to_string(),
                linux_fx_version: Some("NODE|20-lts".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(site.state(), Some("Running"));
    assert_eq!(site.default_host_name(), Some("my-app.azurewebsites.net"));
}

#[tokio::test]
async fn check_name_availability_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(
            "/subscriptions/sub-1/providers/Microsoft.Web/checknameavailability",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "nameAvailable": false,
            "reason": "AlreadyExists",
            "message": "Hostname 'taken' already exists."
        })))
        .mount(&server)
        .await;

    let handler = WebAppHandler::new(client_for(&server).await);
    let availability = handler
        .check_name_availability("sub-1", "taken")
        .await
        .unwrap();
    assert!(!availability.name_available);
    assert_eq!(availability.reason.as_deref(), Some("AlreadyExists"));
}

#[tokio::test]
async fn publishing_credentials_uses_slot_route_for_slots() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(
            "/subscriptions/sub-1/resourceGroups/rg/providers/Microsoft.Web/sites/parent/slots/staging/config/publishingcredentials/list",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "parent__staging",
            "properties": { "publishingUserName": "$parent__staging" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let slot: azure_arm::Site = serde_json::from_value(json!({
        "name": "parent/staging",
        "type": "Microsoft.Web/sites/slots",
        "properties": { "resourceGroup": "rg" }
    }))
    .unwrap();

    let handler = WebAppHandler::new(client_for(&server).await);
    let creds = handler.publishing_credentials("sub-1", &slot).await.unwrap();
    assert_eq!(
        creds
            .properties
            .unwrap()
            .publishing_user_name
            .as_deref(),
        Some("$parent__staging")
    );
}
