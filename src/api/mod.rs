//! Protected inspection API.
//!
//! # Data Flow
//! ```text
//! ApiRoute (from routing::classifier)
//!     → handlers.rs (cache operations, filter bodies)
//!     → schemas.rs (version parsing, schema resolution)
//!     → error.rs (terminal responses for every failure)
//! ```

pub mod error;
pub mod handlers;
pub mod schemas;

pub use error::ApiError;
