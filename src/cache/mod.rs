//! Validation cache collaborator.
//!
//! # Data Flow
//! ```text
//! enrichment pipeline (external)
//!     → add_good / add_incomplete / add_bad
//!     → ValidationCache (shared via Arc)
//!     → api handlers (summary, filters, reset)
//! ```
//!
//! # Design Decisions
//! - Handlers only see the `ValidationCache` trait; storage is swappable
//! - Calls are synchronous; implementations own their locking
//! - Filter documents are plain serde types decoded from request bodies

pub mod filters;
pub mod memory;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use filters::{FiltersBad, FiltersGood};
pub use memory::InMemoryValidationCache;

/// Error raised by a cache implementation.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache unavailable: {0}")]
    Unavailable(String),
}

/// Counts of everything the cache has seen since the last reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub total: usize,
    pub good: usize,
    pub bad: usize,
}

/// An event that passed validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoodEvent {
    /// Tracker payload the event was built from.
    pub raw_event: Value,
    /// Event type (e.g. "page_view", "unstruct").
    pub event_type: Option<String>,
    /// Schema URI of the self-describing event, if any.
    pub schema: Option<String>,
    /// Schema URIs of attached contexts.
    #[serde(default)]
    pub contexts: Vec<String>,
    /// Enriched event.
    pub event: Value,
}

/// An event that failed validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadEvent {
    /// Collector payload, when it could be decoded.
    pub collector_payload: Option<Value>,
    /// Tracker payload, when it could be decoded.
    pub raw_event: Option<Value>,
    /// Validation failures.
    #[serde(default)]
    pub errors: Vec<String>,
}

/// Entry returned by the `/events` listing.
#[derive(Debug, Clone, PartialEq)]
pub enum GoodOrIncomplete {
    Good(GoodEvent),
    /// Enriched event that failed validation but still carries its fields.
    Incomplete(Value),
}

impl GoodOrIncomplete {
    /// Enriched event as a JSON document.
    pub fn event_json(&self) -> &Value {
        match self {
            GoodOrIncomplete::Good(good) => &good.event,
            GoodOrIncomplete::Incomplete(event) => event,
        }
    }
}

/// Operations the inspection endpoints consume.
pub trait ValidationCache: Send + Sync {
    /// Good and incomplete events, newest first.
    fn get_good_and_incomplete(&self) -> Result<Vec<GoodOrIncomplete>, CacheError>;

    fn get_summary(&self) -> Result<ValidationSummary, CacheError>;

    /// Drop everything stored so far.
    fn reset(&self) -> Result<(), CacheError>;

    fn filter_good(&self, filters: &FiltersGood) -> Result<Vec<GoodEvent>, CacheError>;

    fn filter_bad(&self, filters: &FiltersBad) -> Result<Vec<BadEvent>, CacheError>;
}
