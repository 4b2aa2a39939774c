use axum::body::Body;
use axum::http::{Request, Response, header};
use http_body_util::BodyExt;
use medref::router::init_router;
use medref::state::AppState;
use medref_config::{CorsConfig, JwtConfig};
use medref_core::{AccessPolicy, Role};
use tower::ServiceExt;
use uuid::Uuid;

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret-at-least-32-chars".to_string(),
        access_token_expiry: 3600,
    }
}

#[allow(dead_code)]
pub fn test_state(policy: AccessPolicy) -> AppState {
    AppState::new(
        test_jwt_config(),
        CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
        policy,
    )
}

pub fn setup_test_app() -> axum::Router {
    init_router(test_state(AccessPolicy::builtin().unwrap()))
}

pub fn token_for(role: Role) -> String {
    medref_auth::create_access_token(
        Uuid::new_v4(),
        &format!("{}@medref.test", role.as_str().to_lowercase()),
        role,
        None,
        &test_jwt_config(),
    )
    .unwrap()
}

#[allow(dead_code)]
pub enum Auth<'a> {
    None,
    Bearer(&'a str),
    Cookie(&'a str),
}

pub async fn get(app: axum::Router, uri: &str, auth: Auth<'_>) -> Response<Body> {
    let mut request = Request::builder().method("GET").uri(uri);
    request = match auth {
        Auth::None => request,
        Auth::Bearer(token) => request.header(header::AUTHORIZATION, format!("Bearer {}", token)),
        Auth::Cookie(token) => request.header(header::COOKIE, format!("access_token={}", token)),
    };
    app.oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[allow(dead_code)]
pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}
