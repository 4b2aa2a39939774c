//! Request extractors and the page guard.
//!
//! - [`auth`]: session token lookup and the [`AuthUser`](auth::AuthUser) /
//!   [`CurrentSession`](auth::CurrentSession) extractors
//! - [`guard`]: the middleware that redirects or admits page requests
//!
//! # Session Flow
//!
//! 1. Client sends `Authorization: Bearer <token>` or an `access_token` cookie
//! 2. API handlers use `AuthUser` and answer 401 without a valid token
//! 3. Page requests go through `route_guard`, where a bad token just means an
//!    anonymous session that is redirected to the login page

pub mod auth;
pub mod guard;
