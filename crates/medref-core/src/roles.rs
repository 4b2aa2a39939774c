//! Organizational roles assigned by the authentication backend.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// A user's organizational function. Fixed for the lifetime of a session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Front-line staff at a peripheral health unit
    PhuStaff,
    /// Hospital referral desk
    HospitalDesk,
    ReferralCoordinator,
    Specialist,
    /// District health management team officer
    Dhmt,
    /// National-level user, restricted to analytics
    NationalUser,
    SystemAdmin,
    AmbulanceDispatch,
}

impl Role {
    pub const ALL: [Role; 8] = [
        Role::PhuStaff,
        Role::HospitalDesk,
        Role::ReferralCoordinator,
        Role::Specialist,
        Role::Dhmt,
        Role::NationalUser,
        Role::SystemAdmin,
        Role::AmbulanceDispatch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::PhuStaff => "PHU_STAFF",
            Role::HospitalDesk => "HOSPITAL_DESK",
            Role::ReferralCoordinator => "REFERRAL_COORDINATOR",
            Role::Specialist => "SPECIALIST",
            Role::Dhmt => "DHMT",
            Role::NationalUser => "NATIONAL_USER",
            Role::SystemAdmin => "SYSTEM_ADMIN",
            Role::AmbulanceDispatch => "AMBULANCE_DISPATCH",
        }
    }

    /// Human-readable label for menus and CLI output.
    pub fn label(&self) -> &'static str {
        match self {
            Role::PhuStaff => "PHU staff",
            Role::HospitalDesk => "Hospital desk",
            Role::ReferralCoordinator => "Referral coordinator",
            Role::Specialist => "Specialist",
            Role::Dhmt => "District health officer",
            Role::NationalUser => "National user",
            Role::SystemAdmin => "System administrator",
            Role::AmbulanceDispatch => "Ambulance dispatch",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);

impl FromStr for Role {
    type Err = ParseRoleError;

    /// Accepts the wire identifier in any case, with `-` or `_` separators.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_").to_ascii_uppercase();
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == wanted)
            .ok_or_else(|| ParseRoleError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_role() {
        assert_eq!("NATIONAL_USER".parse::<Role>(), Ok(Role::NationalUser));
        assert_eq!("system-admin".parse::<Role>(), Ok(Role::SystemAdmin));
        assert_eq!(" phu_staff ".parse::<Role>(), Ok(Role::PhuStaff));
        assert!("janitor".parse::<Role>().is_err());
    }

    #[test]
    fn test_display_matches_wire_format() {
        for role in Role::ALL {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{}\"", role));
        }
    }

    #[test]
    fn test_deserialize_role() {
        let role: Role = serde_json::from_str("\"AMBULANCE_DISPATCH\"").unwrap();
        assert_eq!(role, Role::AmbulanceDispatch);
        assert!(serde_json::from_str::<Role>("\"ambulance_dispatch\"").is_err());
    }
}
