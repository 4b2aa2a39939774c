use medref_core::{PermissionKey, Role};
use serde::Serialize;
use utoipa::ToSchema;

/// What an admitted page request may render. Inserted into the request
/// extensions by the page guard.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PageContext {
    pub path: String,
    pub role: Option<Role>,
    /// None for pages no route entry governs
    pub required_permission: Option<PermissionKey>,
}

/// Public description of the login entry point. The form itself is rendered
/// by the front end.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginPage {
    pub path: String,
    /// Header and cookie the session token is read from
    pub token_header: String,
    pub token_cookie: String,
}
