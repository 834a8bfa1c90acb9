//! Filter documents accepted by `POST /good` and `POST /bad`.

use serde::{Deserialize, Serialize};

use crate::cache::{BadEvent, GoodEvent};

/// Criteria for good events. Every present field must match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FiltersGood {
    pub event_type: Option<String>,
    pub schema: Option<String>,
    /// All listed context schemas must be attached to the event.
    pub contexts: Option<Vec<String>>,
    pub limit: Option<usize>,
}

impl FiltersGood {
    pub fn matches(&self, event: &GoodEvent) -> bool {
        let type_ok = match &self.event_type {
            Some(expected) => event.event_type.as_deref() == Some(expected.as_str()),
            None => true,
        };
        let schema_ok = match &self.schema {
            Some(expected) => event.schema.as_deref() == Some(expected.as_str()),
            None => true,
        };
        let contexts_ok = match &self.contexts {
            Some(expected) => expected.iter().all(|c| event.contexts.contains(c)),
            None => true,
        };
        type_ok && schema_ok && contexts_ok
    }
}

/// Criteria for bad events, matched against the tracker payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FiltersBad {
    /// Tracker vendor (e.g. "com.snowplowanalytics.snowplow").
    pub vendor: Option<String>,
    /// Tracker protocol version (e.g. "tp2").
    pub version: Option<String>,
    pub limit: Option<usize>,
}

impl FiltersBad {
    pub fn matches(&self, event: &BadEvent) -> bool {
        let field = |name: &str| {
            event
                .raw_event
                .as_ref()
                .and_then(|raw| raw.get(name))
                .and_then(|v| v.as_str())
        };
        let vendor_ok = match &self.vendor {
            Some(expected) => field("vendor") == Some(expected.as_str()),
            None => true,
        };
        let version_ok = match &self.version {
            Some(expected) => field("version") == Some(expected.as_str()),
            None => true,
        };
        vendor_ok && version_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn good(event_type: &str, contexts: &[&str]) -> GoodEvent {
        GoodEvent {
            raw_event: json!({}),
            event_type: Some(event_type.to_string()),
            schema: None,
            contexts: contexts.iter().map(|c| c.to_string()).collect(),
            event: json!({ "event": event_type }),
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(FiltersGood::default().matches(&good("page_view", &[])));
        assert!(FiltersBad::default().matches(&BadEvent {
            collector_payload: None,
            raw_event: None,
            errors: vec![],
        }));
    }

    #[test]
    fn test_good_filter_requires_all_contexts() {
        let filter = FiltersGood {
            contexts: Some(vec!["iglu:a".into(), "iglu:b".into()]),
            ..Default::default()
        };
        assert!(filter.matches(&good("page_view", &["iglu:a", "iglu:b", "iglu:c"])));
        assert!(!filter.matches(&good("page_view", &["iglu:a"])));
    }

    #[test]
    fn test_filter_body_decodes_partial_document() {
        let filter: FiltersGood = serde_json::from_str(r#"{"event_type":"unstruct","limit":2}"#).unwrap();
        assert_eq!(filter.event_type.as_deref(), Some("unstruct"));
        assert_eq!(filter.limit, Some(2));
        assert!(filter.schema.is_none());
    }

    #[test]
    fn test_bad_filter_reads_tracker_payload() {
        let event = BadEvent {
            collector_payload: None,
            raw_event: Some(json!({ "vendor": "com.acme", "version": "tp2" })),
            errors: vec!["boom".into()],
        };
        let hit = FiltersBad { vendor: Some("com.acme".into()), ..Default::default() };
        let miss = FiltersBad { version: Some("tp1".into()), ..Default::default() };
        assert!(hit.matches(&event));
        assert!(!miss.matches(&event));
    }
}
