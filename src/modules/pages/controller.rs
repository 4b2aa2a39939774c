use axum::{Extension, Json, extract::State};
use tracing::instrument;

use crate::middleware::auth::SESSION_COOKIE;
use crate::modules::pages::model::{LoginPage, PageContext};
use crate::state::AppState;

/// Answers every guarded page. Only reached after the guard admitted the
/// request.
#[instrument(skip_all, fields(path = %page.path))]
pub async fn render_page(Extension(page): Extension<PageContext>) -> Json<PageContext> {
    Json(page)
}

#[utoipa::path(
    get,
    path = "/login",
    responses(
        (status = 200, description = "Login entry point descriptor", body = LoginPage)
    ),
    tag = "Pages"
)]
pub async fn login_page(State(state): State<AppState>) -> Json<LoginPage> {
    Json(LoginPage {
        path: state.policy.login_path().to_string(),
        token_header: "Authorization: Bearer <token>".to_string(),
        token_cookie: SESSION_COOKIE.to_string(),
    })
}
