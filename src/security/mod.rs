//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → access_control.rs (scope check, bypass for public/passthrough)
//!     → authorization.rs (delegate to external authorization API)
//!     → Pass to routing, or 403
//!
//! Public:
//!     disclosure.rs (non-secret projection of the authorization settings)
//! ```
//!
//! # Design Decisions
//! - Fail closed: every error or ambiguity while authorizing denies
//! - No trust in client input: credentials are forwarded, never interpreted
//! - Denial reasons are logged, never returned

pub mod access_control;
pub mod authorization;
pub mod disclosure;

pub use access_control::{access_control_middleware, AccessControlState};
pub use authorization::{AuthorizationGateway, AuthorizationOutcome, Authorizer, GatewayTimeouts};
pub use disclosure::AuthConfigDisclosure;
