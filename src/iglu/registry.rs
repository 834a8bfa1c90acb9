//! HTTP schema resolver backed by Iglu registries.
//!
//! # Responsibilities
//! - Query registries in ascending priority order
//! - Return the first schema document served with 200
//! - Record why every other registry failed

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

use crate::config::RegistryConfig;
use crate::iglu::{LookupError, RepoLookup, ResolutionError, SchemaKey, SchemaResolver};

const REGISTRY_TIMEOUT: Duration = Duration::from_secs(10);

/// Resolver querying remote registries over HTTP.
pub struct RegistryResolver {
    client: Client,
    registries: Vec<RegistryConfig>,
}

impl RegistryResolver {
    pub fn new(mut registries: Vec<RegistryConfig>) -> Result<Self, reqwest::Error> {
        registries.sort_by_key(|r| r.priority);
        let client = Client::builder()
            .timeout(REGISTRY_TIMEOUT)
            .connect_timeout(REGISTRY_TIMEOUT)
            .build()?;
        Ok(Self { client, registries })
    }

    async fn lookup_in(&self, registry: &RegistryConfig, key: &SchemaKey) -> Result<Value, LookupError> {
        let url = format!("{}/schemas/{}", registry.uri.trim_end_matches('/'), key.path());
        let mut request = self.client.get(&url);
        if let Some(api_key) = &registry.api_key {
            request = request.header("apikey", api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| LookupError::RepoFailure(e.to_string()))?;

        match response.status() {
            StatusCode::OK => response
                .json::<Value>()
                .await
                .map_err(|e| LookupError::RepoFailure(format!("invalid schema document: {e}"))),
            StatusCode::NOT_FOUND => Err(LookupError::NotFound),
            status => Err(LookupError::RepoFailure(format!("unexpected status {status}"))),
        }
    }
}

#[async_trait]
impl SchemaResolver for RegistryResolver {
    async fn lookup_schema(&self, key: &SchemaKey) -> Result<Value, ResolutionError> {
        let mut lookup_history = Vec::with_capacity(self.registries.len());

        for registry in &self.registries {
            match self.lookup_in(registry, key).await {
                Ok(schema) => {
                    tracing::debug!(schema = %key, registry = %registry.name, "Schema resolved");
                    return Ok(schema);
                }
                Err(error) => {
                    if let LookupError::RepoFailure(message) = &error {
                        tracing::warn!(
                            schema = %key,
                            registry = %registry.name,
                            error = %message,
                            "Registry lookup failed"
                        );
                    }
                    lookup_history.push(RepoLookup {
                        repository: registry.name.clone(),
                        error,
                    });
                }
            }
        }

        Err(ResolutionError {
            schema_key: key.to_string(),
            lookup_history,
        })
    }
}
