//! Page guard middleware.
//!
//! Every page request is evaluated against the access policy before it
//! reaches a handler. Redirects use `303 See Other` so the browser always
//! follows with a `GET`.

use axum::{
    Json,
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use serde_json::json;
use tracing::{debug, info};

use medref_auth::session_from_token;
use medref_core::{GuardDecision, GuardState, normalize_path};
use medref_observability::track_guard_decision;

use crate::middleware::auth::session_token;
use crate::modules::pages::model::PageContext;
use crate::state::AppState;

/// Seconds a client should wait before retrying while the session resolves.
const LOADING_RETRY_AFTER_SECS: &str = "1";

pub async fn route_guard(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let token = session_token(req.headers());
    let session = session_from_token(token.as_deref(), &state.jwt_config);
    let path = normalize_path(req.uri().path());

    let decision = state.policy.evaluate(&session, &path);
    track_guard_decision(decision.state(), session.role.map(|role| role.as_str()));

    match decision {
        GuardDecision::ShowLoading => {
            debug!(path = %path, "Session still resolving");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                [(header::RETRY_AFTER, LOADING_RETRY_AFTER_SECS)],
                Json(json!({ "state": GuardState::Loading })),
            )
                .into_response()
        }
        GuardDecision::RedirectToLogin(target) => {
            debug!(path = %path, redirect_to = %target, "No session, redirecting to login");
            Redirect::to(&target).into_response()
        }
        GuardDecision::RedirectToLanding(target) => {
            info!(
                path = %path,
                role = ?session.role,
                redirect_to = %target,
                "Page refused, redirecting to landing page"
            );
            Redirect::to(&target).into_response()
        }
        GuardDecision::Render => {
            req.extensions_mut().insert(PageContext {
                required_permission: state.policy.required_permission(&path),
                role: session.role,
                path,
            });
            next.run(req).await
        }
    }
}
