use medref_core::{GuardState, PermissionKey, Role};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// The caller's role and everything it grants.
#[derive(Debug, Serialize, ToSchema)]
pub struct AccessProfile {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
    pub role_label: String,
    pub facility_id: Option<Uuid>,
    pub permissions: Vec<PermissionKey>,
    pub landing_page: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RouteCheckParams {
    /// Path to check; query strings, fragments and trailing slashes are ignored
    pub path: String,
}

/// Guard outcome for one path and the caller's session.
#[derive(Debug, Serialize, ToSchema)]
pub struct RouteCheck {
    /// The normalized path that was evaluated
    pub path: String,
    /// None when no route entry governs the path
    pub required_permission: Option<PermissionKey>,
    pub allowed: bool,
    pub state: GuardState,
    pub redirect_to: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NavItem {
    pub label: String,
    pub path: String,
    pub permission: PermissionKey,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NavigationResponse {
    pub role: Role,
    pub items: Vec<NavItem>,
}
