//! API route table.
//!
//! # Design Decisions
//! - Matches `(verb, segments)` as a tagged pair, never chained string checks
//! - Unknown combinations resolve to an explicit `NotFound`
//! - Borrowed segments: classification never allocates

use axum::http::Method;

/// HTTP verbs the table distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verb {
    Get,
    Post,
    Other,
}

impl From<&Method> for Verb {
    fn from(method: &Method) -> Self {
        if method == Method::GET {
            Verb::Get
        } else if method == Method::POST {
            Verb::Post
        } else {
            Verb::Other
        }
    }
}

/// Protected API operation selected for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRoute<'a> {
    Events,
    Summary,
    Reset,
    Good,
    FilterGood,
    Bad,
    FilterBad,
    Schema {
        vendor: &'a str,
        name: &'a str,
        version: &'a str,
    },
    NotFound,
}

impl<'a> ApiRoute<'a> {
    /// Match a method and the path segments following the service prefix.
    pub fn classify(method: &Method, segments: &[&'a str]) -> Self {
        match (Verb::from(method), segments) {
            (Verb::Get, ["events"]) => ApiRoute::Events,
            (Verb::Get | Verb::Post, ["all"]) => ApiRoute::Summary,
            (Verb::Get | Verb::Post, ["reset"]) => ApiRoute::Reset,
            (Verb::Get, ["good"]) => ApiRoute::Good,
            (Verb::Post, ["good"]) => ApiRoute::FilterGood,
            (Verb::Get, ["bad"]) => ApiRoute::Bad,
            (Verb::Post, ["bad"]) => ApiRoute::FilterBad,
            (Verb::Get, ["iglu", vendor, name, "jsonschema", version]) => ApiRoute::Schema {
                vendor: *vendor,
                name: *name,
                version: *version,
            },
            _ => ApiRoute::NotFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_table() {
        let cases = [
            (Method::GET, vec!["events"], ApiRoute::Events),
            (Method::GET, vec!["all"], ApiRoute::Summary),
            (Method::POST, vec!["all"], ApiRoute::Summary),
            (Method::GET, vec!["reset"], ApiRoute::Reset),
            (Method::POST, vec!["reset"], ApiRoute::Reset),
            (Method::GET, vec!["good"], ApiRoute::Good),
            (Method::POST, vec!["good"], ApiRoute::FilterGood),
            (Method::GET, vec!["bad"], ApiRoute::Bad),
            (Method::POST, vec!["bad"], ApiRoute::FilterBad),
        ];
        for (method, segments, expected) in cases {
            assert_eq!(ApiRoute::classify(&method, &segments), expected, "{method} {segments:?}");
        }
    }

    #[test]
    fn test_schema_route() {
        let segments = ["iglu", "com.acme", "click", "jsonschema", "1-0-0"];
        assert_eq!(
            ApiRoute::classify(&Method::GET, &segments),
            ApiRoute::Schema { vendor: "com.acme", name: "click", version: "1-0-0" }
        );
        assert_eq!(ApiRoute::classify(&Method::POST, &segments), ApiRoute::NotFound);

        let other_format = ["iglu", "com.acme", "click", "avro", "1-0-0"];
        assert_eq!(ApiRoute::classify(&Method::GET, &other_format), ApiRoute::NotFound);
    }

    #[test]
    fn test_unmatched_combinations() {
        assert_eq!(ApiRoute::classify(&Method::POST, &["events"]), ApiRoute::NotFound);
        assert_eq!(ApiRoute::classify(&Method::DELETE, &["reset"]), ApiRoute::NotFound);
        assert_eq!(ApiRoute::classify(&Method::GET, &[]), ApiRoute::NotFound);
        assert_eq!(ApiRoute::classify(&Method::GET, &["good", ""]), ApiRoute::NotFound);
    }
}
