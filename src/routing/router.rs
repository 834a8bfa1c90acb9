//! Request router composition.
//!
//! # Responsibilities
//! - Run the access-control guard before any dispatch
//! - Dispatch by scope: passthrough, UI assets, auth-config, protected API
//! - Answer every service path with 404 when the service is disabled
//!
//! # Design Decisions
//! - Scope is decided from the path by `RequestScope`, not by route order
//! - The protected API table is matched by `ApiRoute`, one handler for all
//! - Body limit and timeout wrap service traffic only; passthrough requests
//!   reach the co-hosted service as received

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Json, Router,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower::ServiceExt;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer};

use crate::api::{handlers, ApiError};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::routing::classifier::ApiRoute;
use crate::routing::scope::{segments, RequestScope};
use crate::security::{access_control_middleware, AccessControlState, Authorizer};

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Composition root of the HTTP surface.
pub enum RequestRouter {
    Enabled {
        state: AppState,
        access: AccessControlState,
        request_timeout: Duration,
    },
    /// Service turned off: only passthrough traffic is served.
    Disabled { passthrough: Router },
}

impl RequestRouter {
    /// Serve the inspection API. `authorizer` is `None` when authorization is
    /// not configured.
    pub fn enabled(state: AppState, authorizer: Option<Arc<dyn Authorizer>>) -> Self {
        RequestRouter::Enabled {
            state,
            access: AccessControlState { authorizer },
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Bound the handling time of service requests, authorization included.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        if let RequestRouter::Enabled { request_timeout, .. } = &mut self {
            *request_timeout = timeout;
        }
        self
    }

    pub fn disabled(passthrough: Router) -> Self {
        RequestRouter::Disabled { passthrough }
    }

    #[allow(deprecated)]
    pub fn into_router(self) -> Router {
        match self {
            RequestRouter::Enabled {
                state,
                access,
                request_timeout,
            } => {
                let passthrough = state.passthrough.clone();
                let max_body_size = state.max_body_size;
                let service = Router::new()
                    .fallback(dispatch)
                    .with_state(state)
                    .layer(RequestBodyLimitLayer::new(max_body_size))
                    .layer(middleware::from_fn_with_state(access, access_control_middleware))
                    .layer(TimeoutLayer::new(request_timeout));

                Router::new()
                    .fallback(split)
                    .with_state(Targets { service, passthrough })
                    .layer(middleware::from_fn(track_requests))
            }
            RequestRouter::Disabled { passthrough } => Router::new()
                .fallback(dispatch_disabled)
                .with_state(passthrough)
                .layer(middleware::from_fn(track_requests)),
        }
    }
}

/// Service and passthrough routers behind the enabled surface.
#[derive(Clone)]
struct Targets {
    service: Router,
    passthrough: Router,
}

async fn split(State(targets): State<Targets>, req: Request<Body>) -> Response {
    let outside_service = RequestScope::classify(req.uri().path()) == RequestScope::Passthrough;
    if outside_service {
        forward(targets.passthrough, req).await
    } else {
        forward(targets.service, req).await
    }
}

async fn dispatch(State(state): State<AppState>, req: Request<Body>) -> Response {
    let path = req.uri().path().to_owned();

    match RequestScope::classify(&path) {
        // Split off before the service router.
        RequestScope::Passthrough => StatusCode::NOT_FOUND.into_response(),
        RequestScope::Ui { relative } => state.assets.serve(relative, req).await,
        RequestScope::AuthConfig => {
            if req.method() == Method::GET {
                Json(state.disclosure.clone()).into_response()
            } else {
                ApiError::PathNotFound.into_response()
            }
        }
        RequestScope::Protected { rest } => {
            let segments = segments(rest);
            let route = ApiRoute::classify(req.method(), &segments);
            tracing::debug!(path = %path, route = ?route, "Dispatching API request");
            handlers::handle(&state, route, req.into_body()).await
        }
    }
}

async fn dispatch_disabled(State(passthrough): State<Router>, req: Request<Body>) -> Response {
    let outside_service = RequestScope::classify(req.uri().path()) == RequestScope::Passthrough;
    if outside_service {
        forward(passthrough, req).await
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

/// Hand a request to the co-hosted service untouched.
async fn forward(passthrough: Router, req: Request<Body>) -> Response {
    match passthrough.oneshot(req).await {
        Ok(response) => response,
        Err(never) => match never {},
    }
}

async fn track_requests(req: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let scope = RequestScope::classify(req.uri().path()).label();

    let response = next.run(req).await;

    metrics::record_request(&method, response.status().as_u16(), scope, start);
    response
}
