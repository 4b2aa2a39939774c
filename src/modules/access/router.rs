use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{check_route, get_access_profile, get_navigation};

pub fn init_access_router() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_access_profile))
        .route("/check", get(check_route))
        .route("/navigation", get(get_navigation))
}
