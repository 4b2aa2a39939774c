use medref_config::GuardConfig;
use medref_core::{AccessPolicy, PermissionKey, Role, Session, UnmappedRoutePolicy};
use serde::Serialize;

/// Summary printed by `medref-cli validate`.
pub fn validate_report(config: &GuardConfig, policy: &AccessPolicy) -> String {
    let mut lines = vec![
        format!("Login path:        {}", policy.login_path()),
        format!("Default landing:   {}", policy.landing().default_path()),
    ];
    lines.extend(
        policy
            .landing()
            .role_specific()
            .map(|(role, path)| format!("Landing for {:<20} {}", role.as_str(), path)),
    );
    lines.push(format!("Unmapped routes:   {}", config.unmapped_routes));
    lines.push(format!("Route entries:     {}", policy.routes().len()));
    lines.push(format!("Permission keys:   {}", PermissionKey::ALL.len()));
    lines.join("\n")
}

#[derive(Debug, Serialize)]
pub struct CheckResult {
    pub path: String,
    pub role: Option<Role>,
    pub required_permission: Option<PermissionKey>,
    pub allowed: bool,
    pub state: String,
    pub redirect_to: Option<String>,
}

/// Runs the guard for one role and path.
pub fn check(policy: &AccessPolicy, role: Option<Role>, path: &str, loading: bool) -> CheckResult {
    let session = Session {
        role,
        is_loading: loading,
    };
    let decision = policy.evaluate(&session, path);
    CheckResult {
        path: path.to_string(),
        role,
        required_permission: policy.required_permission(path),
        allowed: policy.can_access_route(role, path),
        state: decision.state().to_string(),
        redirect_to: decision.redirect_target().map(str::to_string),
    }
}

pub fn check_report(result: &CheckResult) -> String {
    let role = result.role.map(|r| r.as_str()).unwrap_or("(anonymous)");
    let required = result
        .required_permission
        .map(|p| p.as_str())
        .unwrap_or("(unmapped)");

    let decision = match &result.redirect_to {
        Some(target) => format!("{} -> {}", result.state, target),
        None => result.state.clone(),
    };
    [
        format!("Path:       {}", result.path),
        format!("Role:       {}", role),
        format!("Requires:   {}", required),
        format!("Decision:   {}", decision),
    ]
    .join("\n")
}

/// Permissions held by `role`, one per line.
pub fn permissions_report(policy: &AccessPolicy, role: Role) -> String {
    let held = policy.role_permissions(role);
    let mut lines = vec![format!(
        "{} ({}) holds {} permissions",
        role.label(),
        role,
        held.len()
    )];
    lines.extend(held.into_iter().map(|key| format!("  {}", key)));
    lines.join("\n")
}

/// Route table with the roles that may open each route, most specific first.
pub fn routes_report(policy: &AccessPolicy) -> String {
    let mut lines: Vec<String> = policy
        .routes()
        .entries()
        .iter()
        .map(|entry| {
            let roles: Vec<&str> = Role::ALL
                .iter()
                .filter(|role| policy.has_permission(Some(**role), entry.permission))
                .map(|role| role.as_str())
                .collect();
            format!(
                "{:<20} {:<24} {}",
                entry.path,
                entry.permission.as_str(),
                roles.join(", ")
            )
        })
        .collect();
    let unmapped = match policy.unmapped_policy() {
        UnmappedRoutePolicy::Allow => "allowed",
        UnmappedRoutePolicy::Deny => "denied",
    };
    lines.push(format!("Paths not listed above are {}", unmapped));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> AccessPolicy {
        AccessPolicy::builtin().unwrap()
    }

    #[test]
    fn test_check_refused_role() {
        let result = check(&policy(), Some(Role::PhuStaff), "/admin/users/", false);
        assert!(!result.allowed);
        assert_eq!(result.required_permission, Some(PermissionKey::AdminUsers));
        assert_eq!(result.state, "UNAUTHORIZED");
        assert_eq!(result.redirect_to.as_deref(), Some("/dashboard"));

        let report = check_report(&result);
        assert!(report.contains("ADMIN_USERS"));
        assert!(report.contains("UNAUTHORIZED -> /dashboard"));
    }

    #[test]
    fn test_check_anonymous_and_loading() {
        let result = check(&policy(), None, "/referrals", false);
        assert_eq!(result.redirect_to.as_deref(), Some("/login"));
        assert!(check_report(&result).contains("(anonymous)"));

        let result = check(&policy(), Some(Role::SystemAdmin), "/referrals", true);
        assert_eq!(result.state, "LOADING");
        assert!(result.redirect_to.is_none());
    }

    #[test]
    fn test_check_report_layout() {
        let result = check(&policy(), Some(Role::Specialist), "/triage", false);
        assert_eq!(
            check_report(&result),
            "Path:       /triage\n\
             Role:       SPECIALIST\n\
             Requires:   TRIAGE\n\
             Decision:   AUTHORIZED"
        );
    }

    #[test]
    fn test_permissions_report_lists_keys() {
        let report = permissions_report(&policy(), Role::NationalUser);
        assert!(report.starts_with("National user (NATIONAL_USER) holds 2 permissions"));
        assert!(report.contains("ANALYTICS"));
        assert!(report.contains("PROFILE"));
        assert!(!report.contains("DASHBOARD"));
    }

    #[test]
    fn test_routes_report_orders_specific_first() {
        let report = routes_report(&policy());
        let users = report.find("/admin/users").unwrap();
        let admin = report.find("/admin ").unwrap();
        assert!(users < admin);
        assert!(report.ends_with("Paths not listed above are allowed"));
    }

    #[test]
    fn test_validate_report() {
        let config = GuardConfig::default();
        let report = validate_report(&config, &config.build_policy().unwrap());
        assert!(report.contains("/analytics"));
        assert!(report.contains("Route entries:     20"));
        assert_eq!(report.lines().count(), 6);
        assert!(report.ends_with(&format!("Permission keys:   {}", PermissionKey::ALL.len())));
    }
}
