//! # Medref Core
//!
//! Role-based access control for the referral desk.
//!
//! - [`roles`]: the closed set of organizational roles
//! - [`permissions`]: permission keys, the role/permission matrix and resolver
//! - [`routes`]: page route prefixes, path normalization and longest-match resolution
//! - [`policy`]: the validated [`AccessPolicy`] bundling all of the above
//! - [`guard`]: the page guard turning a session and a path into a decision
//! - [`controller`]: a reactive shell re-running the guard on every change
//! - [`errors`]: [`AppError`] for requests and [`ConfigurationError`] for startup
//!
//! # Example
//!
//! ```ignore
//! use medref_core::{AccessPolicy, GuardDecision, Role, Session};
//!
//! let policy = AccessPolicy::builtin()?;
//!
//! let decision = policy.evaluate(&Session::authenticated(Role::PhuStaff), "/admin/users");
//! assert_eq!(decision, GuardDecision::RedirectToLanding("/dashboard".into()));
//! ```

pub mod controller;
pub mod errors;
pub mod guard;
pub mod permissions;
pub mod policy;
pub mod roles;
pub mod routes;

// Re-export commonly used types at crate root
pub use controller::{GuardController, Navigator};
pub use errors::{AppError, ConfigurationError};
pub use guard::{GuardDecision, GuardState, Session};
pub use permissions::{PermissionKey, PermissionTable};
pub use policy::{AccessPolicy, AccessPolicyBuilder, LandingPages};
pub use roles::Role;
pub use routes::{RouteEntry, RoutePermissionMap, UnmappedRoutePolicy, normalize_path};
