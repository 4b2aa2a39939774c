//! # Medref Access
//!
//! Access control for the hospital referral desk: who may open which page,
//! and where a user is sent when they may not.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/       # Session extractors and the page guard
//! ├── modules/          # Feature modules
//! │   ├── access/      # /api/access: profile, route checks, navigation
//! │   └── pages/       # Login entry point and guarded page fallback
//! ├── docs.rs           # OpenAPI document
//! ├── router.rs         # Main application router
//! └── state.rs          # Shared application state
//! ```
//!
//! The rules themselves live in `medref-core`; this crate only applies them
//! to HTTP requests.
//!
//! ## Roles
//!
//! | Role | Landing page |
//! |------|--------------|
//! | National user | `/analytics` |
//! | Everyone else | `/dashboard` |
//!
//! ## Quick Start
//!
//! ```bash
//! JWT_SECRET=your-secure-secret-key
//! UNMAPPED_ROUTE_POLICY=allow
//! cargo run --bin medref
//! cargo run --bin medref-cli -- issue-token --role HOSPITAL_DESK --email desk@example.org
//! ```
//!
//! Swagger UI is served at `http://localhost:3000/swagger-ui`.

pub mod docs;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;

// Re-export workspace crates for convenience
pub use medref_auth;
pub use medref_config;
pub use medref_core;
pub use medref_observability;
