use axum::{
    Json,
    extract::{Query, State},
};
use tracing::instrument;

use medref_core::AppError;
use medref_observability::track_access_check;

use crate::middleware::auth::{AuthUser, CurrentSession};
use crate::modules::access::model::{
    AccessProfile, NavigationResponse, RouteCheck, RouteCheckParams,
};
use crate::modules::access::service::AccessService;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/access/me",
    responses(
        (status = 200, description = "The caller's role, permissions and landing page", body = AccessProfile),
        (status = 401, description = "Missing, invalid or expired session token")
    ),
    tag = "Access",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(role = %auth_user.role()))]
pub async fn get_access_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<AccessProfile>, AppError> {
    let role = auth_user.role();

    Ok(Json(AccessProfile {
        user_id: auth_user.user_id()?,
        email: auth_user.email().to_string(),
        role,
        role_label: role.label().to_string(),
        facility_id: auth_user.facility_id(),
        permissions: state.policy.role_permissions(role).into_iter().collect(),
        landing_page: state.policy.landing_for(role).to_string(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/access/check",
    params(RouteCheckParams),
    responses(
        (status = 200, description = "Guard outcome for the path and the caller's session", body = RouteCheck),
        (status = 400, description = "Missing path parameter")
    ),
    tag = "Access",
    security((), ("bearer_auth" = []))
)]
#[instrument(skip(state, session))]
pub async fn check_route(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Query(params): Query<RouteCheckParams>,
) -> Json<RouteCheck> {
    let check = AccessService::check_route(&state.policy, &session, &params.path);
    track_access_check(check.allowed);
    Json(check)
}

#[utoipa::path(
    get,
    path = "/api/access/navigation",
    responses(
        (status = 200, description = "Sidebar entries the caller's role may open", body = NavigationResponse),
        (status = 401, description = "Missing, invalid or expired session token")
    ),
    tag = "Access",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(role = %auth_user.role()))]
pub async fn get_navigation(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Json<NavigationResponse> {
    let role = auth_user.role();
    Json(NavigationResponse {
        role,
        items: AccessService::navigation(&state.policy, role),
    })
}
