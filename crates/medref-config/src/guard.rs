//! Page guard configuration.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `LOGIN_PATH` | `/login` | Where unauthenticated users are sent |
//! | `DEFAULT_LANDING_PATH` | `/dashboard` | Where refused users are sent |
//! | `ROLE_LANDING_PAGES` | `NATIONAL_USER:/analytics` | Per-role overrides, `ROLE:/path` separated by `,` |
//! | `UNMAPPED_ROUTE_POLICY` | `allow` | `allow` or `deny` for paths without a route entry |

use std::env;

use medref_core::policy::{DEFAULT_LANDING_PATH, DEFAULT_LOGIN_PATH, ROLE_LANDING_PAGES};
use medref_core::{AccessPolicy, ConfigurationError, LandingPages, Role, UnmappedRoutePolicy};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuardConfig {
    pub login_path: String,
    pub default_landing_path: String,
    pub role_landing_pages: Vec<(Role, String)>,
    pub unmapped_routes: UnmappedRoutePolicy,
}

impl GuardConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, falling back to defaults for
    /// missing or malformed values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let unmapped_routes = match lookup("UNMAPPED_ROUTE_POLICY") {
            Some(raw) => raw.parse().unwrap_or_else(|err| {
                tracing::warn!(%err, "Ignoring UNMAPPED_ROUTE_POLICY");
                defaults.unmapped_routes
            }),
            None => defaults.unmapped_routes,
        };

        Self {
            login_path: lookup("LOGIN_PATH").unwrap_or(defaults.login_path),
            default_landing_path: lookup("DEFAULT_LANDING_PATH")
                .unwrap_or(defaults.default_landing_path),
            role_landing_pages: lookup("ROLE_LANDING_PAGES")
                .map(|raw| parse_role_landing_pages(&raw))
                .unwrap_or(defaults.role_landing_pages),
            unmapped_routes,
        }
    }

    pub fn landing_pages(&self) -> LandingPages {
        self.role_landing_pages.iter().fold(
            LandingPages::new(self.default_landing_path.clone()),
            |pages, (role, path)| pages.with_role(*role, path.clone()),
        )
    }

    /// Builds the access policy from the built-in tables and this
    /// configuration. Fails on any inconsistency.
    pub fn build_policy(&self) -> Result<AccessPolicy, ConfigurationError> {
        AccessPolicy::builder()
            .login_path(self.login_path.clone())
            .landing(self.landing_pages())
            .unmapped_routes(self.unmapped_routes)
            .build()
    }
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            default_landing_path: DEFAULT_LANDING_PATH.to_string(),
            role_landing_pages: ROLE_LANDING_PAGES
                .iter()
                .map(|(role, path)| (*role, path.to_string()))
                .collect(),
            unmapped_routes: UnmappedRoutePolicy::default(),
        }
    }
}

/// Parses `ROLE:/path,ROLE:/path`. Malformed entries are skipped with a warning.
fn parse_role_landing_pages(raw: &str) -> Vec<(Role, String)> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| {
            let Some((role, path)) = entry.split_once(':') else {
                tracing::warn!(entry, "Ignoring ROLE_LANDING_PAGES entry without ':'");
                return None;
            };
            match role.parse::<Role>() {
                Ok(role) => Some((role, path.trim().to_string())),
                Err(err) => {
                    tracing::warn!(entry, %err, "Ignoring ROLE_LANDING_PAGES entry");
                    None
                }
            }
        })
        .collect()
}
