//! Schema coordinates and the schema-resolution collaborator.
//!
//! # Design Decisions
//! - Versions are parsed strictly: three non-negative integers joined by `-`
//! - Resolution failures are structured values, serialized to clients as-is
//! - The resolver is a trait object so registries can be faked in tests

pub mod registry;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub use registry::RegistryResolver;

/// Only format served by the lookup endpoint.
pub const JSONSCHEMA_FORMAT: &str = "jsonschema";

/// `MODEL-REVISION-ADDITION` schema version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SchemaVer {
    pub model: u32,
    pub revision: u32,
    pub addition: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid schema version '{0}', expected MODEL-REVISION-ADDITION (e.g. 1-0-0)")]
pub struct SchemaVerError(pub String);

impl FromStr for SchemaVer {
    type Err = SchemaVerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SchemaVerError(s.to_string());
        let mut parts = s.split('-');
        let mut next = || -> Result<u32, SchemaVerError> {
            let part = parts.next().ok_or_else(invalid)?;
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            part.parse().map_err(|_| invalid())
        };
        let version = SchemaVer {
            model: next()?,
            revision: next()?,
            addition: next()?,
        };
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(version)
    }
}

impl fmt::Display for SchemaVer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.model, self.revision, self.addition)
    }
}

/// Vendor/name/format/version coordinate of a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaKey {
    pub vendor: String,
    pub name: String,
    pub format: String,
    pub version: SchemaVer,
}

impl SchemaKey {
    pub fn jsonschema(vendor: impl Into<String>, name: impl Into<String>, version: SchemaVer) -> Self {
        Self {
            vendor: vendor.into(),
            name: name.into(),
            format: JSONSCHEMA_FORMAT.to_string(),
            version,
        }
    }

    /// Path of the schema relative to a registry's `/schemas` root.
    pub fn path(&self) -> String {
        format!("{}/{}/{}/{}", self.vendor, self.name, self.format, self.version)
    }
}

impl fmt::Display for SchemaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "iglu:{}", self.path())
    }
}

/// Why a single registry could not serve a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "error", content = "message")]
pub enum LookupError {
    NotFound,
    RepoFailure(String),
}

/// One registry consulted during a lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoLookup {
    pub repository: String,
    #[serde(flatten)]
    pub error: LookupError,
}

/// Structured failure returned when no registry could resolve a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("schema {schema_key} could not be resolved")]
pub struct ResolutionError {
    pub schema_key: String,
    pub lookup_history: Vec<RepoLookup>,
}

/// Resolves schema documents by coordinate.
#[async_trait]
pub trait SchemaResolver: Send + Sync {
    async fn lookup_schema(&self, key: &SchemaKey) -> Result<Value, ResolutionError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_schema_ver() {
        let version: SchemaVer = "1-0-12".parse().unwrap();
        assert_eq!(version, SchemaVer { model: 1, revision: 0, addition: 12 });
        assert_eq!(version.to_string(), "1-0-12");
    }

    #[test]
    fn test_reject_malformed_versions() {
        for input in ["1-0-badversion", "1-0", "1-0-0-0", "", "1--0", "-1-0-0", "+1-0-0", "1.0.0"] {
            assert!(input.parse::<SchemaVer>().is_err(), "accepted {input:?}");
        }
    }

    #[test]
    fn test_schema_key_display() {
        let key = SchemaKey::jsonschema("com.acme", "click", "1-0-0".parse().unwrap());
        assert_eq!(key.to_string(), "iglu:com.acme/click/jsonschema/1-0-0");
    }

    #[test]
    fn test_resolution_error_serialization() {
        let err = ResolutionError {
            schema_key: "iglu:com.acme/click/jsonschema/1-0-0".into(),
            lookup_history: vec![
                RepoLookup { repository: "Iglu Central".into(), error: LookupError::NotFound },
                RepoLookup {
                    repository: "Private".into(),
                    error: LookupError::RepoFailure("connection refused".into()),
                },
            ],
        };
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(
            value,
            json!({
                "schemaKey": "iglu:com.acme/click/jsonschema/1-0-0",
                "lookupHistory": [
                    { "repository": "Iglu Central", "error": "NotFound" },
                    { "repository": "Private", "error": "RepoFailure", "message": "connection refused" }
                ]
            })
        );
    }
}
