//! # Medref CLI
//!
//! Inspection helpers behind the `medref-cli` binary. Each function renders a
//! plain-text report from an [`AccessPolicy`](medref_core::AccessPolicy) so
//! operators can check a deployment's configuration before starting the server.
//!
//! ## Usage
//!
//! ```ignore
//! use medref_cli::inspect;
//!
//! let policy = GuardConfig::from_env().build_policy()?;
//! println!("{}", inspect::routes_report(&policy));
//! ```

pub mod inspect;
