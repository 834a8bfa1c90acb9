//! Delegated authorization.
//!
//! The bearer credential is never inspected locally. It is forwarded as-is to
//! the external authorization API, whose answer decides the outcome. Every
//! failure mode (missing header, non-200, unexpected body, transport fault)
//! produces `Denied`.

use async_trait::async_trait;
use axum::http::{header, HeaderMap};
use reqwest::{Client, StatusCode};
use std::time::Duration;

use crate::config::AuthorizationConfig;
use crate::observability::metrics;

/// Total time allowed for one authorization call.
pub const AUTHORIZATION_TIMEOUT: Duration = Duration::from_secs(10);

/// How long idle pooled connections to the authorization API are kept.
pub const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(30);

/// Result of an authorization check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationOutcome {
    Allowed,
    /// The reason is meant for operator logs only.
    Denied(String),
}

impl AuthorizationOutcome {
    pub fn denied(reason: impl Into<String>) -> Self {
        AuthorizationOutcome::Denied(reason.into())
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, AuthorizationOutcome::Allowed)
    }
}

/// Decides whether a request may reach the protected API.
#[async_trait]
pub trait Authorizer: Send + Sync {
    async fn authorize(&self, headers: &HeaderMap) -> AuthorizationOutcome;
}

/// Transport limits for the outbound authorization client.
#[derive(Debug, Clone, Copy)]
pub struct GatewayTimeouts {
    pub request: Duration,
    pub pool_idle: Duration,
}

impl Default for GatewayTimeouts {
    fn default() -> Self {
        Self {
            request: AUTHORIZATION_TIMEOUT,
            pool_idle: POOL_IDLE_TIMEOUT,
        }
    }
}

/// URL of the authorization query for the configured organization.
pub fn authorization_endpoint(config: &AuthorizationConfig) -> String {
    format!(
        "https://{}/api/msc/internal/authz/query/v1/{}/iglu/schemas/list",
        config.api_domain, config.organization_id
    )
}

/// Authorizer backed by the external authorization API.
///
/// Holds one pooled HTTP client shared by every request.
pub struct AuthorizationGateway {
    client: Client,
    endpoint: String,
}

impl AuthorizationGateway {
    /// Create a gateway for the given configuration with the fixed timeouts.
    pub fn new(config: &AuthorizationConfig) -> Result<Self, reqwest::Error> {
        Self::with_endpoint(authorization_endpoint(config), GatewayTimeouts::default())
    }

    /// Create a gateway querying an explicit endpoint.
    pub fn with_endpoint(endpoint: impl Into<String>, timeouts: GatewayTimeouts) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeouts.request)
            .connect_timeout(timeouts.request)
            .pool_idle_timeout(timeouts.pool_idle)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn query(&self, credential: &header::HeaderValue) -> AuthorizationOutcome {
        let response = match self
            .client
            .post(&self.endpoint)
            .header(header::AUTHORIZATION, credential.clone())
            .header(header::ACCEPT, "application/json")
            .json(&serde_json::json!({}))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return AuthorizationOutcome::denied(format!("authorization request failed: {e}")),
        };

        let status = response.status();
        if status != StatusCode::OK {
            return AuthorizationOutcome::denied(format!("authorization API returned status {}", status.as_u16()));
        }

        match response.text().await {
            Ok(body) if body.trim() == "true" => AuthorizationOutcome::Allowed,
            Ok(_) => AuthorizationOutcome::denied("authorization denied"),
            Err(e) => AuthorizationOutcome::denied(format!("authorization response unreadable: {e}")),
        }
    }
}

#[async_trait]
impl Authorizer for AuthorizationGateway {
    async fn authorize(&self, headers: &HeaderMap) -> AuthorizationOutcome {
        let outcome = match headers.get(header::AUTHORIZATION) {
            Some(credential) => self.query(credential).await,
            None => AuthorizationOutcome::denied("missing header"),
        };
        metrics::record_authorization(outcome.is_allowed());
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AuthorizationConfig {
        AuthorizationConfig {
            identity_domain: "id.example.com".into(),
            audience: "https://api.example.com".into(),
            client_id: "client".into(),
            api_domain: "console.example.com".into(),
            organization_id: "org-42".into(),
        }
    }

    #[test]
    fn test_endpoint_targets_organization() {
        assert_eq!(
            authorization_endpoint(&config()),
            "https://console.example.com/api/msc/internal/authz/query/v1/org-42/iglu/schemas/list"
        );
    }

    #[tokio::test]
    async fn test_missing_header_is_denied_without_network() {
        // Unroutable endpoint: any outbound call would fail differently.
        let gateway = AuthorizationGateway::with_endpoint("http://0.0.0.0:1/never", GatewayTimeouts::default()).unwrap();
        let outcome = gateway.authorize(&HeaderMap::new()).await;
        assert_eq!(outcome, AuthorizationOutcome::Denied("missing header".into()));
    }
}
