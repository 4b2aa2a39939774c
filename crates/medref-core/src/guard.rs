//! Page guard decisions.
//!
//! The guard turns a [`Session`] and a requested path into a [`GuardDecision`].
//! It is level-triggered: callers re-run [`AccessPolicy::evaluate`] whenever
//! the path or the session changes, and nothing is remembered in between.
//! Missing authentication and missing permissions are ordinary outcomes that
//! carry a redirect target, never errors.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::policy::AccessPolicy;
use crate::roles::Role;

/// The current user's session as seen by the guard. Owned by the
/// authentication layer and passed in by value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Session {
    pub role: Option<Role>,
    pub is_loading: bool,
}

impl Session {
    /// Session state while the authentication layer is still resolving.
    pub fn loading() -> Self {
        Self {
            role: None,
            is_loading: true,
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(role: Role) -> Self {
        Self {
            role: Some(role),
            is_loading: false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.role.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GuardState {
    Loading,
    Unauthenticated,
    Unauthorized,
    Authorized,
}

impl GuardState {
    pub fn as_str(&self) -> &'static str {
        match self {
            GuardState::Loading => "LOADING",
            GuardState::Unauthenticated => "UNAUTHENTICATED",
            GuardState::Unauthorized => "UNAUTHORIZED",
            GuardState::Authorized => "AUTHORIZED",
        }
    }
}

impl fmt::Display for GuardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the page shell should do for the current path and session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Show a neutral loading indicator; do not navigate.
    ShowLoading,
    /// No session: navigate to the login entry point.
    RedirectToLogin(String),
    /// Authenticated but refused: navigate to the role's landing page.
    RedirectToLanding(String),
    /// Render the guarded content.
    Render,
}

impl GuardDecision {
    pub fn state(&self) -> GuardState {
        match self {
            GuardDecision::ShowLoading => GuardState::Loading,
            GuardDecision::RedirectToLogin(_) => GuardState::Unauthenticated,
            GuardDecision::RedirectToLanding(_) => GuardState::Unauthorized,
            GuardDecision::Render => GuardState::Authorized,
        }
    }

    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            GuardDecision::RedirectToLogin(target) | GuardDecision::RedirectToLanding(target) => {
                Some(target)
            }
            GuardDecision::ShowLoading | GuardDecision::Render => None,
        }
    }
}

impl AccessPolicy {
    /// Decides how to handle `path` for `session`.
    pub fn evaluate(&self, session: &Session, path: &str) -> GuardDecision {
        if session.is_loading {
            return GuardDecision::ShowLoading;
        }

        let Some(role) = session.role else {
            return GuardDecision::RedirectToLogin(self.login_path().to_string());
        };

        if !self.can_access_route(Some(role), path) {
            return GuardDecision::RedirectToLanding(self.landing_for(role).to_string());
        }

        GuardDecision::Render
    }
}
