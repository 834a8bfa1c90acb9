//! Access Control Middleware.
//! Enforces delegated authorization on the protected API group.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::warn;

use crate::routing::scope::RequestScope;
use crate::security::authorization::{AuthorizationOutcome, Authorizer};

/// State required for access control.
#[derive(Clone)]
pub struct AccessControlState {
    /// `None` when authorization is disabled for this deployment.
    pub authorizer: Option<Arc<dyn Authorizer>>,
}

pub async fn access_control_middleware(
    State(state): State<AccessControlState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    // 1. Only the protected group is guarded; UI, auth-config and
    //    passthrough traffic go straight on.
    if !RequestScope::classify(req.uri().path()).requires_authorization() {
        return next.run(req).await;
    }

    // 2. Authorization disabled: allow all (passthrough mode).
    let Some(authorizer) = &state.authorizer else {
        return next.run(req).await;
    };

    // 3. Delegate the decision. The reason never leaves the logs.
    match authorizer.authorize(req.headers()).await {
        AuthorizationOutcome::Allowed => next.run(req).await,
        AuthorizationOutcome::Denied(reason) => {
            warn!(
                method = %req.method(),
                path = %req.uri().path(),
                reason = %reason,
                "Authorization denied"
            );
            (StatusCode::FORBIDDEN, "Forbidden").into_response()
        }
    }
}
