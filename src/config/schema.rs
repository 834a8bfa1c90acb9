//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the inspector gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct InspectorConfig {
    /// Listener configuration (bind address, TLS).
    pub listener: ListenerConfig,

    /// Inspection service settings.
    pub service: ServiceConfig,

    /// External authorization settings. Absent means authorization is disabled.
    pub authorization: Option<AuthorizationConfig>,

    /// Schema registries used for `/iglu` lookups.
    pub schemas: SchemaConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:9090").
    pub bind_address: String,

    /// Optional TLS configuration.
    pub tls: Option<TlsConfig>,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:9090".to_string(),
            tls: None,
        }
    }
}

/// TLS configuration for the listener.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TlsConfig {
    /// Path to certificate file (PEM).
    pub cert_path: String,

    /// Path to private key file (PEM).
    pub key_path: String,
}

/// Inspection service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// When false every request under the service prefix is answered with 404.
    pub enabled: bool,

    /// Directory holding the operator UI bundle.
    pub ui_root: String,

    /// Maximum accepted request body size in bytes.
    pub max_body_size: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ui_root: "ui".to_string(),
            max_body_size: 1024 * 1024,
        }
    }
}

/// Static authorization settings, loaded once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AuthorizationConfig {
    /// Identity provider domain the UI logs in against.
    pub identity_domain: String,

    /// Token audience requested by the UI.
    pub audience: String,

    /// Public client identifier of the UI.
    pub client_id: String,

    /// Domain of the authorization API queried for every protected request.
    pub api_domain: String,

    /// Organization the caller must be authorized for.
    pub organization_id: String,
}

/// Schema registry settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SchemaConfig {
    /// Registries consulted in ascending priority order.
    pub registries: Vec<RegistryConfig>,
}

/// A single Iglu registry.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegistryConfig {
    /// Registry name used in lookup history.
    pub name: String,

    /// Base URI (e.g., "http://iglucentral.com").
    pub uri: String,

    /// Optional API key sent in the `apikey` header.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Lookup priority (lower = consulted first).
    #[serde(default)]
    pub priority: u32,
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9091".to_string(),
        }
    }
}
