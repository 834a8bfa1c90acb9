//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build collaborators (schema resolver, authorization gateway) from config
//! - Wire up middleware (tracing, request ID)
//! - Bind server to listener (plain or TLS)
//! - Drain in-flight requests on shutdown

use axum::{http::HeaderName, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::cache::ValidationCache;
use crate::config::{InspectorConfig, TlsConfig};
use crate::http::assets::UiAssets;
use crate::iglu::{RegistryResolver, SchemaResolver};
use crate::routing::RequestRouter;
use crate::security::{AuthConfigDisclosure, AuthorizationGateway, Authorizer};

/// Header carrying the request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// How long in-flight requests may drain after shutdown is triggered.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<dyn ValidationCache>,
    pub resolver: Arc<dyn SchemaResolver>,
    pub disclosure: AuthConfigDisclosure,
    pub assets: UiAssets,
    /// Co-hosted service receiving every request outside the service prefix.
    pub passthrough: Router,
    pub max_body_size: usize,
}

impl AppState {
    pub fn new(
        cache: Arc<dyn ValidationCache>,
        resolver: Arc<dyn SchemaResolver>,
        disclosure: AuthConfigDisclosure,
        assets: UiAssets,
    ) -> Self {
        Self {
            cache,
            resolver,
            disclosure,
            assets,
            passthrough: Router::new(),
            max_body_size: 1024 * 1024,
        }
    }

    pub fn with_passthrough(mut self, passthrough: Router) -> Self {
        self.passthrough = passthrough;
        self
    }
}

/// Errors raised while starting the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// HTTP server for the inspection service.
pub struct HttpServer {
    router: Router,
    config: InspectorConfig,
}

impl HttpServer {
    /// Create a server whose resolver and authorization gateway come from config.
    pub fn new(config: InspectorConfig, cache: Arc<dyn ValidationCache>) -> Result<Self, ServerError> {
        Self::with_passthrough(config, cache, Router::new())
    }

    /// Same as [`HttpServer::new`], forwarding requests outside the service
    /// prefix to `passthrough`.
    pub fn with_passthrough(
        config: InspectorConfig,
        cache: Arc<dyn ValidationCache>,
        passthrough: Router,
    ) -> Result<Self, ServerError> {
        let resolver: Arc<dyn SchemaResolver> =
            Arc::new(RegistryResolver::new(config.schemas.registries.clone())?);

        let authorizer: Option<Arc<dyn Authorizer>> = match &config.authorization {
            Some(auth) => {
                let gateway = AuthorizationGateway::new(auth)?;
                tracing::info!(endpoint = %gateway.endpoint(), "Authorization enabled");
                let gateway: Arc<dyn Authorizer> = Arc::new(gateway);
                Some(gateway)
            }
            None => {
                tracing::info!("Authorization disabled");
                None
            }
        };

        let request_router = if config.service.enabled {
            let mut state = AppState::new(
                cache,
                resolver,
                AuthConfigDisclosure::from(config.authorization.as_ref()),
                UiAssets::new(&config.service.ui_root),
            )
            .with_passthrough(passthrough);
            state.max_body_size = config.service.max_body_size;
            RequestRouter::enabled(state, authorizer)
                .with_request_timeout(Duration::from_secs(config.timeouts.request_secs))
        } else {
            tracing::info!("Inspection service disabled");
            RequestRouter::disabled(passthrough)
        };

        let router = Self::build_router(request_router);
        Ok(Self { router, config })
    }

    /// Build the Axum router with the outer middleware layers. Body limit and
    /// timeout live on the service router, see [`RequestRouter`].
    fn build_router(request_router: RequestRouter) -> Router {
        let request_id = HeaderName::from_static(X_REQUEST_ID);
        request_router
            .into_router()
            .layer(PropagateRequestIdLayer::new(request_id.clone()))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server draining");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Run the server over TLS on the given address.
    pub async fn run_tls(
        self,
        addr: SocketAddr,
        tls: &TlsConfig,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let rustls = axum_server::tls_rustls::RustlsConfig::from_pem_file(&tls.cert_path, &tls.key_path).await?;
        let handle = axum_server::Handle::new();

        let drain = handle.clone();
        tokio::spawn(async move {
            let _ = shutdown.recv().await;
            tracing::info!("HTTPS server draining");
            drain.graceful_shutdown(Some(DRAIN_TIMEOUT));
        });

        tracing::info!(address = %addr, "HTTPS server starting");
        axum_server::bind_rustls(addr, rustls)
            .handle(handle)
            .serve(self.router.into_make_service())
            .await?;

        tracing::info!("HTTPS server stopped");
        Ok(())
    }
}
