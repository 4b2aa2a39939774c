use axum::{Router, middleware, routing::get};

use crate::middleware::guard::route_guard;
use crate::state::AppState;

use super::controller::{login_page, render_page};

/// The login entry point, mounted outside the guard.
pub fn init_login_router(state: &AppState) -> Router<AppState> {
    Router::new().route(state.policy.login_path(), get(login_page))
}

/// Every other path is a guarded page.
pub fn init_pages_router(state: AppState) -> Router<AppState> {
    Router::new()
        .fallback(get(render_page))
        .layer(middleware::from_fn_with_state(state, route_guard))
}
