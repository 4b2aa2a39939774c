//! The validated access policy.
//!
//! [`AccessPolicy`] bundles the permission table, the route map, the landing
//! pages and the unmapped-route policy. It can only be obtained through
//! [`AccessPolicyBuilder::build`], which fails fast with a
//! [`ConfigurationError`] instead of letting a broken policy reach a request.
//!
//! # Example
//!
//! ```ignore
//! use medref_core::{AccessPolicy, Role};
//!
//! let policy = AccessPolicy::builder()
//!     .login_path("/login")
//!     .role_landing(Role::NationalUser, "/analytics")
//!     .build()?;
//!
//! assert!(policy.can_access_route(Some(Role::SystemAdmin), "/admin/settings"));
//! ```

use std::collections::{BTreeMap, BTreeSet};

use crate::errors::ConfigurationError;
use crate::permissions::{PermissionKey, PermissionTable};
use crate::roles::Role;
use crate::routes::{
    ROUTE_PERMISSIONS, RouteEntry, RoutePermissionMap, UnmappedRoutePolicy, is_canonical,
    normalize_path,
};

pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const DEFAULT_LANDING_PATH: &str = "/dashboard";

/// Prefixes the HTTP shell serves itself. The login page may not live under them.
pub const RESERVED_PATH_PREFIXES: &[&str] = &["/health", "/metrics", "/api", "/swagger-ui", "/api-docs"];

/// Built-in role-specific landing pages for roles confined to one destination.
pub const ROLE_LANDING_PAGES: &[(Role, &str)] = &[(Role::NationalUser, "/analytics")];

/// Where an authenticated user is sent when refused a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandingPages {
    default_path: String,
    by_role: BTreeMap<Role, String>,
}

impl LandingPages {
    pub fn new(default_path: impl Into<String>) -> Self {
        Self {
            default_path: default_path.into(),
            by_role: BTreeMap::new(),
        }
    }

    pub fn with_role(mut self, role: Role, path: impl Into<String>) -> Self {
        self.by_role.insert(role, path.into());
        self
    }

    pub fn builtin() -> Self {
        ROLE_LANDING_PAGES
            .iter()
            .fold(Self::new(DEFAULT_LANDING_PATH), |pages, (role, path)| {
                pages.with_role(*role, *path)
            })
    }

    pub fn default_path(&self) -> &str {
        &self.default_path
    }

    /// The role's own landing page, falling back to the default.
    pub fn for_role(&self, role: Role) -> &str {
        self.by_role
            .get(&role)
            .map(String::as_str)
            .unwrap_or(&self.default_path)
    }

    pub fn role_specific(&self) -> impl Iterator<Item = (Role, &str)> {
        self.by_role.iter().map(|(role, path)| (*role, path.as_str()))
    }
}

impl Default for LandingPages {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Immutable, validated authorization configuration. Share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    permissions: PermissionTable,
    routes: RoutePermissionMap,
    landing: LandingPages,
    login_path: String,
    unmapped: UnmappedRoutePolicy,
}

impl AccessPolicy {
    /// A builder preloaded with the built-in tables.
    pub fn builder() -> AccessPolicyBuilder {
        AccessPolicyBuilder::default()
    }

    /// The built-in policy.
    pub fn builtin() -> Result<Self, ConfigurationError> {
        Self::builder().build()
    }

    pub fn permissions(&self) -> &PermissionTable {
        &self.permissions
    }

    pub fn routes(&self) -> &RoutePermissionMap {
        &self.routes
    }

    pub fn landing(&self) -> &LandingPages {
        &self.landing
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn unmapped_policy(&self) -> UnmappedRoutePolicy {
        self.unmapped
    }

    pub fn has_permission(&self, role: Option<Role>, key: PermissionKey) -> bool {
        self.permissions.has_permission(role, key)
    }

    pub fn has_any_permission(&self, role: Option<Role>, keys: &[PermissionKey]) -> bool {
        self.permissions.has_any_permission(role, keys)
    }

    pub fn has_all_permissions(&self, role: Option<Role>, keys: &[PermissionKey]) -> bool {
        self.permissions.has_all_permissions(role, keys)
    }

    pub fn role_permissions(&self, role: Role) -> BTreeSet<PermissionKey> {
        self.permissions.role_permissions(role)
    }

    /// The route entry governing `path`, which is normalized first.
    pub fn resolve_route(&self, path: &str) -> Option<&RouteEntry> {
        self.routes.resolve(&normalize_path(path))
    }

    pub fn required_permission(&self, path: &str) -> Option<PermissionKey> {
        self.resolve_route(path).map(|entry| entry.permission)
    }

    /// Whether `role` may open `path`.
    ///
    /// Paths no entry governs follow the unmapped-route policy; with the
    /// default [`UnmappedRoutePolicy::Allow`] they are open even without a role.
    pub fn can_access_route(&self, role: Option<Role>, path: &str) -> bool {
        match self.required_permission(path) {
            Some(permission) => self.permissions.has_permission(role, permission),
            None => self.unmapped == UnmappedRoutePolicy::Allow,
        }
    }

    /// Landing page for an authenticated role refused a page.
    pub fn landing_for(&self, role: Role) -> &str {
        self.landing.for_role(role)
    }
}

/// Assembles an [`AccessPolicy`], starting from the built-in tables.
#[derive(Debug, Clone)]
pub struct AccessPolicyBuilder {
    permissions: PermissionTable,
    routes: Vec<(String, PermissionKey)>,
    landing: LandingPages,
    login_path: String,
    unmapped: UnmappedRoutePolicy,
}

impl Default for AccessPolicyBuilder {
    fn default() -> Self {
        Self {
            permissions: PermissionTable::builtin(),
            routes: ROUTE_PERMISSIONS
                .iter()
                .map(|(path, key)| (path.to_string(), *key))
                .collect(),
            landing: LandingPages::builtin(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            unmapped: UnmappedRoutePolicy::default(),
        }
    }
}

impl AccessPolicyBuilder {
    pub fn permissions(mut self, table: PermissionTable) -> Self {
        self.permissions = table;
        self
    }

    /// Replaces the route map.
    pub fn routes(mut self, routes: &[(&str, PermissionKey)]) -> Self {
        self.routes = routes
            .iter()
            .map(|(path, key)| (path.to_string(), *key))
            .collect();
        self
    }

    pub fn login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    pub fn default_landing(mut self, path: impl Into<String>) -> Self {
        self.landing.default_path = path.into();
        self
    }

    pub fn role_landing(mut self, role: Role, path: impl Into<String>) -> Self {
        self.landing.by_role.insert(role, path.into());
        self
    }

    pub fn landing(mut self, landing: LandingPages) -> Self {
        self.landing = landing;
        self
    }

    pub fn unmapped_routes(mut self, policy: UnmappedRoutePolicy) -> Self {
        self.unmapped = policy;
        self
    }

    /// Validates and freezes the policy.
    pub fn build(self) -> Result<AccessPolicy, ConfigurationError> {
        let route_refs: Vec<(&str, PermissionKey)> = self
            .routes
            .iter()
            .map(|(path, key)| (path.as_str(), *key))
            .collect();
        let routes = RoutePermissionMap::from_entries(&route_refs)?;

        for entry in routes.entries() {
            if !self.permissions.contains(entry.permission) {
                return Err(ConfigurationError::UnknownRoutePermission {
                    path: entry.path.clone(),
                    permission: entry.permission,
                });
            }
        }
        self.permissions.validate()?;

        if !is_canonical(&self.login_path) {
            return Err(ConfigurationError::InvalidPath(self.login_path));
        }
        // The login page is public, so no guarded route may govern it.
        if let Some(entry) = routes.resolve(&self.login_path) {
            return Err(ConfigurationError::GuardedLoginPath {
                path: self.login_path,
                route: entry.path.clone(),
            });
        }
        if let Some(prefix) = RESERVED_PATH_PREFIXES
            .iter()
            .find(|prefix| is_under(&self.login_path, prefix))
        {
            return Err(ConfigurationError::ReservedLoginPath {
                path: self.login_path,
                prefix: *prefix,
            });
        }
        if !is_canonical(self.landing.default_path()) {
            return Err(ConfigurationError::InvalidPath(
                self.landing.default_path().to_string(),
            ));
        }
        for (_, path) in self.landing.role_specific() {
            if !is_canonical(path) {
                return Err(ConfigurationError::InvalidPath(path.to_string()));
            }
        }

        let policy = AccessPolicy {
            permissions: self.permissions,
            routes,
            landing: self.landing,
            login_path: self.login_path,
            unmapped: self.unmapped,
        };

        // A role refused a page must be able to open the page it is sent to.
        for role in Role::ALL {
            let landing = policy.landing_for(role);
            if !policy.can_access_route(Some(role), landing) {
                return Err(ConfigurationError::UnreachableLanding {
                    role,
                    path: landing.to_string(),
                });
            }
        }

        tracing::debug!(
            routes = policy.routes.len(),
            unmapped = %policy.unmapped,
            login_path = %policy.login_path,
            "Access policy validated"
        );

        Ok(policy)
    }
}

fn is_under(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::PERMISSION_MATRIX;

    fn policy() -> AccessPolicy {
        AccessPolicy::builtin().unwrap()
    }

    #[test]
    fn test_builtin_policy_builds() {
        let policy = policy();
        assert_eq!(policy.login_path(), "/login");
        assert_eq!(policy.landing().default_path(), "/dashboard");
        assert_eq!(policy.landing_for(Role::NationalUser), "/analytics");
        assert_eq!(policy.landing_for(Role::PhuStaff), "/dashboard");
        assert_eq!(policy.unmapped_policy(), UnmappedRoutePolicy::Allow);
    }

    #[test]
    fn test_referral_detail_uses_referrals_permission() {
        let policy = policy();
        assert_eq!(
            policy.required_permission("/referrals/abc123"),
            Some(PermissionKey::ReferralsView)
        );
        assert!(policy.can_access_route(Some(Role::Specialist), "/referrals/abc123"));
        assert!(!policy.can_access_route(Some(Role::NationalUser), "/referrals/abc123"));
        assert!(!policy.can_access_route(Some(Role::AmbulanceDispatch), "/referrals/abc123"));
    }

    #[test]
    fn test_unmapped_path_is_allowed_for_every_role() {
        let policy = policy();
        assert!(policy.can_access_route(None, "/some/unmapped/path"));
        for role in Role::ALL {
            assert!(policy.can_access_route(Some(role), "/some/unmapped/path"));
        }
    }

    #[test]
    fn test_unmapped_path_denied_under_deny_policy() {
        let policy = AccessPolicy::builder()
            .unmapped_routes(UnmappedRoutePolicy::Deny)
            .build()
            .unwrap();
        for role in Role::ALL {
            assert!(!policy.can_access_route(Some(role), "/some/unmapped/path"));
        }
        assert!(policy.can_access_route(Some(Role::PhuStaff), "/dashboard"));
    }

    #[test]
    fn test_admin_facilities_beats_admin() {
        let policy = policy();
        assert_eq!(
            policy.required_permission("/admin/facilities/5"),
            Some(PermissionKey::AdminFacilities)
        );
        assert!(policy.can_access_route(Some(Role::Dhmt), "/admin/facilities/5"));
        assert!(!policy.can_access_route(Some(Role::Dhmt), "/admin"));
        assert!(!policy.can_access_route(Some(Role::Dhmt), "/admin/users"));
    }

    #[test]
    fn test_can_access_route_normalizes_input() {
        let policy = policy();
        assert!(!policy.can_access_route(Some(Role::PhuStaff), "//admin/users/"));
        assert!(!policy.can_access_route(Some(Role::PhuStaff), "/dashboard/../admin/users"));
        assert!(policy.can_access_route(Some(Role::PhuStaff), "/referrals/?page=2"));
    }

    #[test]
    fn test_can_access_route_matches_has_permission() {
        let policy = policy();
        for entry in policy.routes().entries() {
            for role in Role::ALL {
                assert_eq!(
                    policy.can_access_route(Some(role), &entry.path),
                    policy.has_permission(Some(role), entry.permission),
                    "{role} on {}",
                    entry.path
                );
            }
            assert!(!policy.can_access_route(None, &entry.path));
        }
    }

    fn table_without(key: PermissionKey) -> PermissionTable {
        let entries: Vec<(PermissionKey, &[Role])> = PERMISSION_MATRIX
            .iter()
            .copied()
            .filter(|(k, _)| *k != key)
            .collect();
        PermissionTable::from_entries(&entries)
    }

    #[test]
    fn test_build_rejects_route_permission_missing_from_table() {
        let result = AccessPolicy::builder()
            .permissions(table_without(PermissionKey::Triage))
            .build();
        assert_eq!(
            result.unwrap_err(),
            ConfigurationError::UnknownRoutePermission {
                path: "/triage".to_string(),
                permission: PermissionKey::Triage,
            }
        );
    }

    #[test]
    fn test_build_rejects_incomplete_table() {
        // Not referenced by any route, so only the table check catches it.
        let result = AccessPolicy::builder()
            .permissions(table_without(PermissionKey::ReferralsAcceptReject))
            .build();
        assert_eq!(
            result.unwrap_err(),
            ConfigurationError::MissingPermission(PermissionKey::ReferralsAcceptReject)
        );
    }

    #[test]
    fn test_build_rejects_empty_role_set() {
        let mut entries: Vec<(PermissionKey, &[Role])> = PERMISSION_MATRIX.to_vec();
        for entry in entries.iter_mut() {
            if entry.0 == PermissionKey::AdminUsers {
                entry.1 = &[];
            }
        }
        let result = AccessPolicy::builder()
            .permissions(PermissionTable::from_entries(&entries))
            .build();
        assert_eq!(
            result.unwrap_err(),
            ConfigurationError::EmptyRoleSet(PermissionKey::AdminUsers)
        );
    }

    #[test]
    fn test_build_rejects_duplicate_route() {
        let result = AccessPolicy::builder()
            .routes(&[
                ("/dashboard", PermissionKey::Dashboard),
                ("/analytics", PermissionKey::Analytics),
                ("/dashboard", PermissionKey::Profile),
            ])
            .build();
        assert_eq!(
            result.unwrap_err(),
            ConfigurationError::DuplicateRoute("/dashboard".to_string())
        );
    }

    #[test]
    fn test_build_rejects_non_canonical_login_path() {
        let result = AccessPolicy::builder().login_path("login/").build();
        assert_eq!(
            result.unwrap_err(),
            ConfigurationError::InvalidPath("login/".to_string())
        );
    }

    #[test]
    fn test_build_rejects_login_path_under_guarded_route() {
        let result = AccessPolicy::builder().login_path("/admin/users").build();
        assert_eq!(
            result.unwrap_err(),
            ConfigurationError::GuardedLoginPath {
                path: "/admin/users".to_string(),
                route: "/admin/users".to_string(),
            }
        );

        let result = AccessPolicy::builder().login_path("/referrals/login").build();
        assert_eq!(
            result.unwrap_err(),
            ConfigurationError::GuardedLoginPath {
                path: "/referrals/login".to_string(),
                route: "/referrals".to_string(),
            }
        );
    }

    #[test]
    fn test_build_rejects_reserved_login_path() {
        for (path, prefix) in [
            ("/health", "/health"),
            ("/metrics", "/metrics"),
            ("/api/login", "/api"),
            ("/swagger-ui", "/swagger-ui"),
            ("/api-docs/openapi.json", "/api-docs"),
        ] {
            let result = AccessPolicy::builder().login_path(path).build();
            assert_eq!(
                result.unwrap_err(),
                ConfigurationError::ReservedLoginPath {
                    path: path.to_string(),
                    prefix,
                }
            );
        }
    }

    #[test]
    fn test_build_accepts_public_login_path() {
        let policy = AccessPolicy::builder().login_path("/sign-in").build().unwrap();
        assert_eq!(policy.login_path(), "/sign-in");

        // Segment boundaries matter: neither of these sits under a reserved prefix.
        assert!(AccessPolicy::builder().login_path("/apilogin").build().is_ok());
        assert!(AccessPolicy::builder().login_path("/healthcheck-login").build().is_ok());
    }

    #[test]
    fn test_build_rejects_unreachable_landing() {
        let result = AccessPolicy::builder()
            .role_landing(Role::NationalUser, "/referrals")
            .build();
        assert_eq!(
            result.unwrap_err(),
            ConfigurationError::UnreachableLanding {
                role: Role::NationalUser,
                path: "/referrals".to_string(),
            }
        );
    }

    #[test]
    fn test_build_rejects_default_landing_without_role_override() {
        let result = AccessPolicy::builder()
            .landing(LandingPages::new("/dashboard"))
            .build();
        assert_eq!(
            result.unwrap_err(),
            ConfigurationError::UnreachableLanding {
                role: Role::NationalUser,
                path: "/dashboard".to_string(),
            }
        );
    }
}
