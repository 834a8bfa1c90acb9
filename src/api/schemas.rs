//! Schema lookups under `/iglu`.

use axum::Json;
use serde_json::Value;

use crate::api::error::ApiError;
use crate::iglu::{SchemaKey, SchemaResolver, SchemaVer};

/// Resolve `{vendor}/{name}/jsonschema/{version}`.
///
/// A malformed version is rejected before the resolver is consulted.
pub async fn lookup_schema(
    resolver: &dyn SchemaResolver,
    vendor: &str,
    name: &str,
    version: &str,
) -> Result<Json<Value>, ApiError> {
    let version: SchemaVer = version.parse()?;
    let key = SchemaKey::jsonschema(vendor, name, version);
    let schema = resolver.lookup_schema(&key).await?;
    Ok(Json(schema))
}
