//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path, headers)
//!     → scope.rs (passthrough | ui | auth-config | protected)
//!     → security::access_control (protected scope only)
//!     → classifier.rs (API route table)
//!     → router.rs (dispatch to handlers, assets, passthrough)
//! ```
//!
//! # Design Decisions
//! - Route table is fixed at compile time, matched without allocation
//! - Deterministic: same input always selects the same route
//! - Explicit NotFound rather than silent default

pub mod classifier;
pub mod router;
pub mod scope;

pub use classifier::ApiRoute;
pub use router::RequestRouter;
pub use scope::{RequestScope, SERVICE_PREFIX};
