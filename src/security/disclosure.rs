//! Public projection of the authorization settings.

use serde::{Deserialize, Serialize};

use crate::config::AuthorizationConfig;

/// What the UI needs to start its own login flow. Contains no secrets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthConfigDisclosure {
    pub domain: String,
    pub audience: String,
    pub client_id: String,
    pub enabled: bool,
}

impl From<Option<&AuthorizationConfig>> for AuthConfigDisclosure {
    fn from(config: Option<&AuthorizationConfig>) -> Self {
        match config {
            Some(config) => Self {
                domain: config.identity_domain.clone(),
                audience: config.audience.clone(),
                client_id: config.client_id.clone(),
                enabled: true,
            },
            None => Self::default(),
        }
    }
}
