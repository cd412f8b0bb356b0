//! Shared HTTP client for ARM requests
//!
//! All resource handlers wrap a cheaply-clonable [`ArmClient`] which owns the
//! connection pool, the base URL and the bearer token.

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::error::{ArmError, Result};

/// Default ARM endpoint for public Azure
pub const DEFAULT_ARM_URL: &str = "https://management.azure.com";

/// Authenticated client for the Azure Resource Manager REST API
#[derive(Clone)]
pub struct ArmClient {
    http: reqwest::Client,
    base_url: Url,
    token: String,
}

impl std::fmt::Debug for ArmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Token intentionally omitted
        f.debug_struct("ArmClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl ArmClient {
    /// Start building a client
    pub fn builder() -> ArmClientBuilder {
        ArmClientBuilder::default()
    }

    /// The configured ARM endpoint
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// GET a path relative to the ARM endpoint and deserialize the response
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.join(path)?;
        self.execute(Method::GET, url, None).await
    }

    /// GET a continuation link as returned in a page's `nextLink`.
    ///
    /// ARM emits absolute links; relative ones are resolved against the
    /// configured endpoint.
    pub async fn get_link<T: DeserializeOwned>(&self, link: &str) -> Result<T> {
        let url = match Url::parse(link) {
            Ok(url) => url,
            Err(_) => self.join(link)?,
        };
        self.execute(Method::GET, url, None).await
    }

    /// PUT a JSON body to a path relative to the ARM endpoint
    pub async fn put<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.join(path)?;
        let body = serde_json::to_value(body)
            .map_err(|e| ArmError::InvalidResponse(format!("request serialization: {e}")))?;
        self.execute(Method::PUT, url, Some(body)).await
    }

    /// POST a JSON body to a path relative to the ARM endpoint
    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.join(path)?;
        let body = serde_json::to_value(body)
            .map_err(|e| ArmError::InvalidResponse(format!("request serialization: {e}")))?;
        self.execute(Method::POST, url, Some(body)).await
    }

    fn join(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ArmError::Configuration(format!("invalid request path '{path}': {e}")))
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<Value>,
    ) -> Result<T> {
        debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method, url)
            .bearer_auth(&self.token)
            .header("Accept", "application/json");
        if let Some(body) = body {
            trace!("request body: {}", body);
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            // 204 and empty bodies deserialize as null for Value targets;
            // typed targets on empty bodies are a caller bug.
            if status == StatusCode::NO_CONTENT {
                return serde_json::from_value(Value::Null)
                    .map_err(|e| ArmError::InvalidResponse(e.to_string()));
            }
            let text = response.text().await?;
            trace!("response body: {}", text);
            serde_json::from_str(&text).map_err(|e| ArmError::InvalidResponse(e.to_string()))
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(ArmError::from_status(
                status.as_u16(),
                extract_error_message(&text, status),
            ))
        }
    }
}

/// Pull the human-readable message out of an ARM error body.
///
/// ARM error responses look like `{"error": {"code": "...", "message": "..."}}`,
/// but some endpoints return `{"Code": ..., "Message": ...}` or plain text.
fn extract_error_message(body: &str, status: StatusCode) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        let message = value
            .get("error")
            .and_then(|e| e.get("message"))
            .or_else(|| value.get("message"))
            .or_else(|| value.get("Message"))
            .and_then(|m| m.as_str());
        if let Some(message) = message {
            return message.to_string();
        }
    }
    if body.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        body.trim().to_string()
    }
}

/// Builder for [`ArmClient`]
#[derive(Default)]
pub struct ArmClientBuilder {
    base_url: Option<String>,
    token: Option<String>,
    user_agent: Option<String>,
}

impl ArmClientBuilder {
    /// Override the ARM endpoint (sovereign clouds, mock servers)
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Bearer token used for every request (required)
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// User agent header value
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    pub fn build(self) -> Result<ArmClient> {
        let token = self
            .token
            .ok_or_else(|| ArmError::Configuration("bearer token is required".to_string()))?;

        let raw_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_ARM_URL.to_string());
        // A trailing slash matters for Url::join
        let normalized = if raw_url.ends_with('/') {
            raw_url
        } else {
            format!("{raw_url}/")
        };
        let base_url = Url::parse(&normalized)
            .map_err(|e| ArmError::Configuration(format!("invalid base URL: {e}")))?;

        let mut http = reqwest::Client::builder();
        if let Some(ua) = self.user_agent {
            http = http.user_agent(ua);
        }
        let http = http
            .build()
            .map_err(|e| ArmError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(ArmClient {
            http,
            base_url,
            token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_requires_token() {
        let err = ArmClient::builder().build().unwrap_err();
        assert!(matches!(err, ArmError::Configuration(_)));
    }

    #[test]
    fn builder_defaults_to_public_cloud() {
        let client = ArmClient::builder().bearer_token("t").build().unwrap();
        assert_eq!(client.base_url(), "https://management.azure.com/");
    }

    #[test]
    fn error_message_extraction() {
        let body = r#"{"error": {"code": "ResourceNotFound", "message": "Site 'x' not found"}}"#;
        assert_eq!(
            extract_error_message(body, StatusCode::NOT_FOUND),
            "Site 'x' not found"
        );

        let flat = r#"{"Code": "Conflict", "Message": "already exists"}"#;
        assert_eq!(
            extract_error_message(flat, StatusCode::CONFLICT),
            "already exists"
        );

        assert_eq!(
            extract_error_message("", StatusCode::NOT_FOUND),
            "Not Found"
        );
        assert_eq!(
            extract_error_message("plain text", StatusCode::BAD_GATEWAY),
            "plain text"
        );
    }
}
