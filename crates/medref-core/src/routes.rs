//! Route-to-permission map and path resolution.
//!
//! A request path is normalized with [`normalize_path`] and resolved against
//! the registered route prefixes. An entry governs a path when it equals the
//! path or is a prefix of it followed by `/`, so `/referrals` governs
//! `/referrals/abc123` but not `/referrals-archive`. When several entries
//! govern a path the longest one wins.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::errors::ConfigurationError;
use crate::permissions::PermissionKey;

/// Built-in page routes and the permission each one requires.
pub const ROUTE_PERMISSIONS: &[(&str, PermissionKey)] = &[
    ("/dashboard", PermissionKey::Dashboard),
    ("/referrals", PermissionKey::ReferralsView),
    ("/referrals/new", PermissionKey::ReferralsCreate),
    ("/patients", PermissionKey::PatientsView),
    ("/patients/new", PermissionKey::PatientsCreate),
    ("/facilities", PermissionKey::FacilitiesView),
    ("/readiness", PermissionKey::ReadinessView),
    ("/readiness/update", PermissionKey::ReadinessUpdate),
    ("/counter-referrals", PermissionKey::CounterReferrals),
    ("/triage", PermissionKey::Triage),
    ("/call-centre", PermissionKey::CallCentre),
    ("/ambulances", PermissionKey::Ambulances),
    ("/analytics", PermissionKey::Analytics),
    ("/reports", PermissionKey::Reports),
    ("/admin", PermissionKey::AdminSettings),
    ("/admin/users", PermissionKey::AdminUsers),
    ("/admin/facilities", PermissionKey::AdminFacilities),
    ("/admin/settings", PermissionKey::AdminSettings),
    ("/profile", PermissionKey::Profile),
    ("/settings", PermissionKey::Settings),
];

/// What to do with a path no route entry governs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UnmappedRoutePolicy {
    /// Unmapped paths are open to everyone. A route that was never registered
    /// is therefore reachable without any permission.
    #[default]
    Allow,
    /// Unmapped paths are refused for every role.
    Deny,
}

impl fmt::Display for UnmappedRoutePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnmappedRoutePolicy::Allow => f.write_str("allow"),
            UnmappedRoutePolicy::Deny => f.write_str("deny"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown unmapped route policy: {0} (expected \"allow\" or \"deny\")")]
pub struct ParsePolicyError(pub String);

impl FromStr for UnmappedRoutePolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "allow" => Ok(UnmappedRoutePolicy::Allow),
            "deny" => Ok(UnmappedRoutePolicy::Deny),
            _ => Err(ParsePolicyError(s.to_string())),
        }
    }
}

/// Normalizes a request path for matching.
///
/// - anything from the first `?` or `#` is dropped
/// - repeated `/` collapse and `.` segments are removed
/// - `..` pops the previous segment and never climbs above the root
/// - the trailing `/` is removed, except for the root itself
///
/// Matching is case-sensitive and no percent-decoding is done.
pub fn normalize_path(raw: &str) -> String {
    let end = raw.find(['?', '#']).unwrap_or(raw.len());

    let mut segments: Vec<&str> = Vec::new();
    for segment in raw[..end].split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    if segments.is_empty() {
        return "/".to_string();
    }

    let mut normalized = String::with_capacity(end + 1);
    for segment in segments {
        normalized.push('/');
        normalized.push_str(segment);
    }
    normalized
}

/// Whether `path` is already in the form [`normalize_path`] produces.
pub fn is_canonical(path: &str) -> bool {
    path.starts_with('/') && normalize_path(path) == path
}

/// One registered route prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RouteEntry {
    pub path: String,
    pub permission: PermissionKey,
}

impl RouteEntry {
    /// Whether this entry governs the normalized `path`.
    pub fn governs(&self, path: &str) -> bool {
        match path.strip_prefix(self.path.as_str()) {
            Some("") => true,
            Some(rest) => rest.starts_with('/'),
            None => false,
        }
    }
}

/// Path prefixes and the permission each requires. Entries are kept longest
/// first so the first governing entry is the most specific one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePermissionMap {
    entries: Vec<RouteEntry>,
}

impl RoutePermissionMap {
    /// Builds the map, rejecting non-canonical and duplicate paths.
    pub fn from_entries(entries: &[(&str, PermissionKey)]) -> Result<Self, ConfigurationError> {
        let mut routes: Vec<RouteEntry> = Vec::with_capacity(entries.len());
        for (path, permission) in entries {
            if !is_canonical(path) {
                return Err(ConfigurationError::InvalidPath(path.to_string()));
            }
            if routes.iter().any(|entry| entry.path == *path) {
                return Err(ConfigurationError::DuplicateRoute(path.to_string()));
            }
            routes.push(RouteEntry {
                path: path.to_string(),
                permission: *permission,
            });
        }

        // Longest first; ties cannot govern the same path, order them by name
        // so listings are stable.
        routes.sort_by(|a, b| {
            b.path
                .len()
                .cmp(&a.path.len())
                .then_with(|| a.path.cmp(&b.path))
        });

        Ok(Self { entries: routes })
    }

    pub fn builtin() -> Result<Self, ConfigurationError> {
        Self::from_entries(ROUTE_PERMISSIONS)
    }

    /// The most specific entry governing an already normalized path.
    pub fn resolve(&self, path: &str) -> Option<&RouteEntry> {
        self.entries.iter().find(|entry| entry.governs(path))
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
