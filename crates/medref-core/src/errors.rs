//! Error types for the referral desk.
//!
//! - [`AppError`]: request-time errors rendered as `{"error": "..."}` JSON
//! - [`ConfigurationError`]: fatal access-policy errors detected at startup

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error as ThisError;

use crate::permissions::PermissionKey;
use crate::roles::Role;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn internal_error(message: String) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, anyhow::anyhow!(message))
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn unauthorized(message: String) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, anyhow::anyhow!(message))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, error = %self.error, "Request failed");
        }

        let body = Json(json!({
            "error": self.error.to_string()
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

/// Access-policy misconfiguration. Raised while building an
/// [`AccessPolicy`](crate::policy::AccessPolicy); never at request time.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ConfigurationError {
    #[error("permission {0} has no entry in the permission table")]
    MissingPermission(PermissionKey),

    #[error("permission {0} is not granted to any role")]
    EmptyRoleSet(PermissionKey),

    #[error("route {path} requires permission {permission}, which is not in the permission table")]
    UnknownRoutePermission {
        path: String,
        permission: PermissionKey,
    },

    #[error("path {0:?} is not canonical (expected a normalized absolute path)")]
    InvalidPath(String),

    #[error("route {0} is registered more than once")]
    DuplicateRoute(String),

    #[error("login path {path} is governed by guarded route {route}")]
    GuardedLoginPath { path: String, route: String },

    #[error("login path {path} collides with reserved prefix {prefix}")]
    ReservedLoginPath { path: String, prefix: &'static str },

    #[error("landing page {path} is not accessible to role {role}")]
    UnreachableLanding { role: Role, path: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status() {
        let err = AppError::not_found(anyhow::anyhow!("nope"));
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.error.to_string(), "nope");
    }

    #[test]
    fn test_unauthorized_into_response() {
        let response = AppError::unauthorized("Missing session".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_from_anyhow_is_internal() {
        let err: AppError = anyhow::anyhow!("boom").into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_configuration_error_messages() {
        let err = ConfigurationError::EmptyRoleSet(PermissionKey::Triage);
        assert_eq!(err.to_string(), "permission TRIAGE is not granted to any role");

        let err = ConfigurationError::UnreachableLanding {
            role: Role::NationalUser,
            path: "/dashboard".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "landing page /dashboard is not accessible to role NATIONAL_USER"
        );

        let err = ConfigurationError::ReservedLoginPath {
            path: "/health".to_string(),
            prefix: "/health",
        };
        assert_eq!(
            err.to_string(),
            "login path /health collides with reserved prefix /health"
        );
    }
}
