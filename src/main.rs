//! Inspector Gateway (v1)
//!
//! HTTP front of the event-inspection service, built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                          ┌──────────────────────────────────────────────────┐
//!                          │                INSPECTOR GATEWAY                 │
//!                          │                                                  │
//!   Client Request         │  ┌──────────┐   ┌──────────┐   ┌─────────────┐   │
//!   ───────────────────────┼─▶│  http    │──▶│ routing  │──▶│  security   │   │
//!                          │  │ server   │   │  scope   │   │ access ctl  │───┼──▶ Authorization
//!                          │  └──────────┘   └────┬─────┘   └──────┬──────┘   │    API
//!                          │                      │                │          │
//!                          │        passthrough ◀─┤                ▼          │
//!                          │        ui assets   ◀─┤         ┌─────────────┐   │
//!                          │        auth-config ◀─┘         │ classifier  │   │
//!                          │                                │  + api      │   │
//!                          │                                └──┬───────┬──┘   │
//!                          │                                   ▼       ▼      │
//!                          │                               cache     iglu ────┼──▶ Schema
//!                          │                                                  │    registries
//!                          └──────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

use inspector_gateway::cache::InMemoryValidationCache;
use inspector_gateway::config::{load_config, InspectorConfig};
use inspector_gateway::lifecycle::{signals, Shutdown};
use inspector_gateway::observability::{logging, metrics};
use inspector_gateway::HttpServer;

#[derive(Parser)]
#[command(name = "inspector-gateway")]
#[command(about = "Routing and authorization front of the event-inspection service", long_about = None)]
struct Args {
    /// Path to the TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => InspectorConfig::default(),
    };

    logging::init_logging(&config.observability);
    tracing::info!("inspector-gateway v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        service_enabled = config.service.enabled,
        authorization_enabled = config.authorization.is_some(),
        registries = config.schemas.registries.len(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let cache = Arc::new(InMemoryValidationCache::new());
    let tls = config.listener.tls.clone();
    let bind_address = config.listener.bind_address.clone();
    let server = HttpServer::new(config, cache)?;

    let shutdown = Arc::new(Shutdown::new());
    let server_shutdown = shutdown.subscribe();
    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        signals::shutdown_on_signal(&signal_shutdown).await;
    });

    match tls {
        Some(tls) => {
            let addr: SocketAddr = bind_address.parse()?;
            server.run_tls(addr, &tls, server_shutdown).await?;
        }
        None => {
            let listener = TcpListener::bind(&bind_address).await?;
            server.run(listener, server_shutdown).await?;
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
