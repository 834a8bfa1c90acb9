//! Request scope classification.
//!
//! Decides, from the path alone, which of the service's route groups a request
//! belongs to. Evaluated before any authorization happens.

/// Path prefix reserved for the inspection service.
pub const SERVICE_PREFIX: &str = "/micro";

/// First segment of the operator UI routes.
pub const UI_SEGMENT: &str = "ui";

/// Segment of the auth-config disclosure route.
pub const AUTH_CONFIG_SEGMENT: &str = "auth-config";

/// Route group a request falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestScope<'a> {
    /// Not under the service prefix; handed to the co-hosted service untouched.
    Passthrough,
    /// Operator UI asset; `relative` is the path below the UI root.
    Ui { relative: &'a str },
    /// Public auth-config disclosure.
    AuthConfig,
    /// Everything else under the prefix. `rest` is the path after the prefix.
    Protected { rest: &'a str },
}

impl<'a> RequestScope<'a> {
    /// Classify a request path.
    ///
    /// Membership is a plain prefix test on the raw path, so `/microscope`
    /// is protected too.
    pub fn classify(path: &'a str) -> Self {
        let Some(rest) = path.strip_prefix(SERVICE_PREFIX) else {
            return RequestScope::Passthrough;
        };

        if let Some(below) = rest.strip_prefix('/') {
            let (first, tail) = match below.split_once('/') {
                Some((first, tail)) => (first, Some(tail)),
                None => (below, None),
            };
            if first == UI_SEGMENT {
                return RequestScope::Ui {
                    relative: tail.unwrap_or(""),
                };
            }
            if first == AUTH_CONFIG_SEGMENT && tail.is_none() {
                return RequestScope::AuthConfig;
            }
        }

        RequestScope::Protected { rest }
    }

    /// Whether authorization applies when it is configured.
    pub fn requires_authorization(&self) -> bool {
        matches!(self, RequestScope::Protected { .. })
    }

    /// Low-cardinality label for metrics.
    pub fn label(&self) -> &'static str {
        match self {
            RequestScope::Passthrough => "passthrough",
            RequestScope::Ui { .. } => "ui",
            RequestScope::AuthConfig => "auth_config",
            RequestScope::Protected { .. } => "api",
        }
    }
}

/// Segments of the remainder of a protected path, after the prefix.
///
/// `"/good"` → `["good"]`, `""` → `[]`. Empty segments are kept so that
/// trailing slashes do not match table entries.
pub fn segments(rest: &str) -> Vec<&str> {
    match rest.strip_prefix('/') {
        Some(below) => below.split('/').collect(),
        None if rest.is_empty() => Vec::new(),
        None => vec![rest],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outside_prefix_passes_through() {
        assert_eq!(RequestScope::classify("/com.snowplowanalytics.snowplow/tp2"), RequestScope::Passthrough);
        assert_eq!(RequestScope::classify("/i"), RequestScope::Passthrough);
        assert_eq!(RequestScope::classify("/"), RequestScope::Passthrough);
    }

    #[test]
    fn test_public_scopes() {
        assert_eq!(RequestScope::classify("/micro/ui"), RequestScope::Ui { relative: "" });
        assert_eq!(RequestScope::classify("/micro/ui/"), RequestScope::Ui { relative: "" });
        assert_eq!(
            RequestScope::classify("/micro/ui/js/app.js"),
            RequestScope::Ui { relative: "js/app.js" }
        );
        assert_eq!(RequestScope::classify("/micro/auth-config"), RequestScope::AuthConfig);
    }

    #[test]
    fn test_everything_else_under_prefix_is_protected() {
        let paths = [
            "/micro",
            "/micro/",
            "/micro/good",
            "/micro/unknown",
            "/micro/auth-config/x",
            "/microscope",
            "/micro/uix",
        ];
        for path in paths {
            let scope = RequestScope::classify(path);
            assert!(scope.requires_authorization(), "{path} should be protected");
        }
    }

    #[test]
    fn test_segments() {
        assert!(segments("").is_empty());
        assert_eq!(segments("/good"), vec!["good"]);
        assert_eq!(segments("/good/"), vec!["good", ""]);
        assert_eq!(
            segments("/iglu/com.acme/click/jsonschema/1-0-0"),
            vec!["iglu", "com.acme", "click", "jsonschema", "1-0-0"]
        );
        assert_eq!(segments("scope"), vec!["scope"]);
    }
}
