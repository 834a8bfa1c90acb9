//! Inspector Gateway Library
//!
//! Routing and authorization layer of the event-inspection service.

pub mod api;
pub mod cache;
pub mod config;
pub mod http;
pub mod iglu;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod security;

pub use config::InspectorConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
