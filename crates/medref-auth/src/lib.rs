//! # Medref Auth
//!
//! Session tokens for the referral desk.
//!
//! - [`claims`]: JWT claims carrying the user's role
//! - [`jwt`]: token creation and verification
//! - [`session`]: turning an optional token into a guard [`Session`](medref_core::Session)
//!
//! # Example
//!
//! ```ignore
//! use medref_auth::{create_access_token, session_from_token};
//! use medref_config::JwtConfig;
//! use medref_core::Role;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(user_id, "desk@example.org", Role::HospitalDesk, None, &config)?;
//! let session = session_from_token(Some(&token), &config);
//! ```

pub mod claims;
pub mod jwt;
pub mod session;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
pub use session::session_from_token;
