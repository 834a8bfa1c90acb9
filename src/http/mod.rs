//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, request ID, limits, timeout, tracing)
//!     → routing (scope guard, authorization, route table)
//!     → api handlers / assets.rs / passthrough service
//!     → Send to client
//! ```

pub mod assets;
pub mod server;

pub use assets::UiAssets;
pub use server::{AppState, HttpServer, ServerError, X_REQUEST_ID};
