//! # Medref Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`jwt`]: session token verification
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`guard`]: login entry point, landing pages and unmapped-route policy
//! - [`server`]: listener address and metrics switch
//!
//! # Example
//!
//! ```ignore
//! use medref_config::{GuardConfig, JwtConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let policy = GuardConfig::from_env().build_policy()?;
//! ```

pub mod cors;
pub mod guard;
pub mod jwt;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use guard::GuardConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;
