use medref_core::{AccessPolicy, PermissionKey, Role, Session, normalize_path};

use crate::modules::access::model::{NavItem, RouteCheck};

/// Sidebar entries in display order. Each is shown only to roles holding its
/// permission.
const NAV_ITEMS: &[(&str, &str, PermissionKey)] = &[
    ("Dashboard", "/dashboard", PermissionKey::Dashboard),
    ("Referrals", "/referrals", PermissionKey::ReferralsView),
    ("New referral", "/referrals/new", PermissionKey::ReferralsCreate),
    ("Patients", "/patients", PermissionKey::PatientsView),
    ("Facilities", "/facilities", PermissionKey::FacilitiesView),
    ("Bed readiness", "/readiness", PermissionKey::ReadinessView),
    ("Counter-referrals", "/counter-referrals", PermissionKey::CounterReferrals),
    ("Triage", "/triage", PermissionKey::Triage),
    ("Call centre", "/call-centre", PermissionKey::CallCentre),
    ("Ambulances", "/ambulances", PermissionKey::Ambulances),
    ("Analytics", "/analytics", PermissionKey::Analytics),
    ("Reports", "/reports", PermissionKey::Reports),
    ("Users", "/admin/users", PermissionKey::AdminUsers),
    ("Facility admin", "/admin/facilities", PermissionKey::AdminFacilities),
    ("System settings", "/admin/settings", PermissionKey::AdminSettings),
    ("Profile", "/profile", PermissionKey::Profile),
    ("Settings", "/settings", PermissionKey::Settings),
];

pub struct AccessService;

impl AccessService {
    pub fn check_route(policy: &AccessPolicy, session: &Session, raw_path: &str) -> RouteCheck {
        let path = normalize_path(raw_path);
        let decision = policy.evaluate(session, &path);

        RouteCheck {
            required_permission: policy.required_permission(&path),
            allowed: policy.can_access_route(session.role, &path),
            state: decision.state(),
            redirect_to: decision.redirect_target().map(str::to_string),
            path,
        }
    }

    pub fn navigation(policy: &AccessPolicy, role: Role) -> Vec<NavItem> {
        NAV_ITEMS
            .iter()
            .filter(|(_, _, permission)| policy.has_permission(Some(role), *permission))
            .map(|(label, path, permission)| NavItem {
                label: label.to_string(),
                path: path.to_string(),
                permission: *permission,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medref_core::GuardState;

    fn policy() -> AccessPolicy {
        AccessPolicy::builtin().unwrap()
    }

    #[test]
    fn test_nav_items_are_routable() {
        let policy = policy();
        for (_, path, permission) in NAV_ITEMS {
            assert_eq!(policy.required_permission(path), Some(*permission), "{path}");
        }
    }

    #[test]
    fn test_national_user_navigation() {
        let items = AccessService::navigation(&policy(), Role::NationalUser);
        let paths: Vec<&str> = items.iter().map(|item| item.path.as_str()).collect();
        assert_eq!(paths, vec!["/analytics", "/profile"]);
    }

    #[test]
    fn test_system_admin_sees_everything() {
        let items = AccessService::navigation(&policy(), Role::SystemAdmin);
        assert_eq!(items.len(), NAV_ITEMS.len());
    }

    #[test]
    fn test_check_route_normalizes() {
        let check = AccessService::check_route(
            &policy(),
            &Session::authenticated(Role::Dhmt),
            "/admin/facilities/5/?tab=beds",
        );
        assert_eq!(check.path, "/admin/facilities/5");
        assert_eq!(check.required_permission, Some(PermissionKey::AdminFacilities));
        assert!(check.allowed);
        assert_eq!(check.state, GuardState::Authorized);
        assert!(check.redirect_to.is_none());
    }

    #[test]
    fn test_check_unmapped_route_for_anonymous() {
        let check =
            AccessService::check_route(&policy(), &Session::anonymous(), "/some/unmapped/path");
        assert_eq!(check.required_permission, None);
        // The authorizer allows it; the guard still wants a session.
        assert!(check.allowed);
        assert_eq!(check.state, GuardState::Unauthenticated);
        assert_eq!(check.redirect_to.as_deref(), Some("/login"));
    }
}
