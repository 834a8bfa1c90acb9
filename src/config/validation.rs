//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Require complete authorization settings when the table is present
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: InspectorConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

use crate::config::schema::InspectorConfig;

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address '{0}'")]
    BindAddress(String),

    #[error("invalid metrics address '{0}'")]
    MetricsAddress(String),

    #[error("authorization.{0} must not be empty")]
    EmptyAuthorizationField(&'static str),

    #[error("registry '{name}' has invalid uri '{uri}'")]
    RegistryUri { name: String, uri: String },

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,
}

/// Validate a parsed configuration.
pub fn validate_config(config: &InspectorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if let Some(auth) = &config.authorization {
        let fields = [
            ("identity_domain", &auth.identity_domain),
            ("audience", &auth.audience),
            ("client_id", &auth.client_id),
            ("api_domain", &auth.api_domain),
            ("organization_id", &auth.organization_id),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                errors.push(ValidationError::EmptyAuthorizationField(name));
            }
        }
    }

    for registry in &config.schemas.registries {
        if Url::parse(&registry.uri).is_err() {
            errors.push(ValidationError::RegistryUri {
                name: registry.name.clone(),
                uri: registry.uri.clone(),
            });
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{AuthorizationConfig, RegistryConfig};

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&InspectorConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = InspectorConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.timeouts.request_secs = 0;
        config.authorization = Some(AuthorizationConfig {
            identity_domain: "id.example.com".into(),
            audience: "".into(),
            client_id: "client".into(),
            api_domain: "api.example.com".into(),
            organization_id: " ".into(),
        });
        config.schemas.registries.push(RegistryConfig {
            name: "broken".into(),
            uri: "::".into(),
            api_key: None,
            priority: 0,
        });

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(errors.contains(&ValidationError::EmptyAuthorizationField("audience")));
        assert!(errors.contains(&ValidationError::EmptyAuthorizationField("organization_id")));
        assert!(errors.contains(&ValidationError::ZeroRequestTimeout));
    }
}
