//! Permission keys and the role/permission matrix.
//!
//! Every capability of the referral desk is named by a [`PermissionKey`]. The
//! [`PermissionTable`] maps each key to the roles allowed to use it. The
//! built-in table is business policy and is compiled in; it is validated once
//! when an [`AccessPolicy`](crate::policy::AccessPolicy) is built.
//!
//! # Example
//!
//! ```ignore
//! use medref_core::{PermissionKey, PermissionTable, Role};
//!
//! let table = PermissionTable::builtin();
//!
//! if table.has_permission(Some(Role::HospitalDesk), PermissionKey::ReadinessUpdate) {
//!     // Show the readiness form
//! }
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::errors::ConfigurationError;
use crate::roles::Role;

/// A capability gated by role.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PermissionKey {
    Dashboard,
    ReferralsView,
    ReferralsCreate,
    ReferralsAcceptReject,
    PatientsView,
    PatientsCreate,
    FacilitiesView,
    ReadinessView,
    ReadinessUpdate,
    CounterReferrals,
    Triage,
    CallCentre,
    Ambulances,
    Analytics,
    Reports,
    AdminUsers,
    AdminFacilities,
    AdminSettings,
    Profile,
    Settings,
}

impl PermissionKey {
    pub const ALL: [PermissionKey; 20] = [
        PermissionKey::Dashboard,
        PermissionKey::ReferralsView,
        PermissionKey::ReferralsCreate,
        PermissionKey::ReferralsAcceptReject,
        PermissionKey::PatientsView,
        PermissionKey::PatientsCreate,
        PermissionKey::FacilitiesView,
        PermissionKey::ReadinessView,
        PermissionKey::ReadinessUpdate,
        PermissionKey::CounterReferrals,
        PermissionKey::Triage,
        PermissionKey::CallCentre,
        PermissionKey::Ambulances,
        PermissionKey::Analytics,
        PermissionKey::Reports,
        PermissionKey::AdminUsers,
        PermissionKey::AdminFacilities,
        PermissionKey::AdminSettings,
        PermissionKey::Profile,
        PermissionKey::Settings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionKey::Dashboard => "DASHBOARD",
            PermissionKey::ReferralsView => "REFERRALS_VIEW",
            PermissionKey::ReferralsCreate => "REFERRALS_CREATE",
            PermissionKey::ReferralsAcceptReject => "REFERRALS_ACCEPT_REJECT",
            PermissionKey::PatientsView => "PATIENTS_VIEW",
            PermissionKey::PatientsCreate => "PATIENTS_CREATE",
            PermissionKey::FacilitiesView => "FACILITIES_VIEW",
            PermissionKey::ReadinessView => "READINESS_VIEW",
            PermissionKey::ReadinessUpdate => "READINESS_UPDATE",
            PermissionKey::CounterReferrals => "COUNTER_REFERRALS",
            PermissionKey::Triage => "TRIAGE",
            PermissionKey::CallCentre => "CALL_CENTRE",
            PermissionKey::Ambulances => "AMBULANCES",
            PermissionKey::Analytics => "ANALYTICS",
            PermissionKey::Reports => "REPORTS",
            PermissionKey::AdminUsers => "ADMIN_USERS",
            PermissionKey::AdminFacilities => "ADMIN_FACILITIES",
            PermissionKey::AdminSettings => "ADMIN_SETTINGS",
            PermissionKey::Profile => "PROFILE",
            PermissionKey::Settings => "SETTINGS",
        }
    }
}

impl fmt::Display for PermissionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown permission: {0}")]
pub struct ParsePermissionError(pub String);

impl FromStr for PermissionKey {
    type Err = ParsePermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_").to_ascii_uppercase();
        PermissionKey::ALL
            .into_iter()
            .find(|key| key.as_str() == wanted)
            .ok_or_else(|| ParsePermissionError(s.to_string()))
    }
}

// =============================================================================
// Built-in permission matrix
// =============================================================================

use PermissionKey as P;
use Role::{
    AmbulanceDispatch, Dhmt, HospitalDesk, NationalUser, PhuStaff, ReferralCoordinator,
    Specialist, SystemAdmin,
};

/// Role sets for every permission key. The order of roles is irrelevant.
pub const PERMISSION_MATRIX: &[(PermissionKey, &[Role])] = &[
    (
        P::Dashboard,
        &[
            PhuStaff,
            HospitalDesk,
            ReferralCoordinator,
            Specialist,
            Dhmt,
            SystemAdmin,
            AmbulanceDispatch,
        ],
    ),
    (
        P::ReferralsView,
        &[
            PhuStaff,
            HospitalDesk,
            ReferralCoordinator,
            Specialist,
            Dhmt,
            SystemAdmin,
        ],
    ),
    (
        P::ReferralsCreate,
        &[PhuStaff, HospitalDesk, ReferralCoordinator, SystemAdmin],
    ),
    (
        P::ReferralsAcceptReject,
        &[HospitalDesk, ReferralCoordinator, Specialist, SystemAdmin],
    ),
    (
        P::PatientsView,
        &[
            PhuStaff,
            HospitalDesk,
            ReferralCoordinator,
            Specialist,
            SystemAdmin,
        ],
    ),
    (P::PatientsCreate, &[PhuStaff, HospitalDesk, SystemAdmin]),
    (
        P::FacilitiesView,
        &[
            PhuStaff,
            HospitalDesk,
            ReferralCoordinator,
            Specialist,
            Dhmt,
            SystemAdmin,
            AmbulanceDispatch,
        ],
    ),
    (
        P::ReadinessView,
        &[
            HospitalDesk,
            ReferralCoordinator,
            Dhmt,
            SystemAdmin,
            AmbulanceDispatch,
        ],
    ),
    (P::ReadinessUpdate, &[HospitalDesk, SystemAdmin]),
    (
        P::CounterReferrals,
        &[HospitalDesk, ReferralCoordinator, Specialist, SystemAdmin],
    ),
    (P::Triage, &[HospitalDesk, Specialist, SystemAdmin]),
    (
        P::CallCentre,
        &[ReferralCoordinator, SystemAdmin, AmbulanceDispatch],
    ),
    (
        P::Ambulances,
        &[ReferralCoordinator, Dhmt, SystemAdmin, AmbulanceDispatch],
    ),
    (P::Analytics, &[Dhmt, NationalUser, SystemAdmin]),
    (P::Reports, &[ReferralCoordinator, Dhmt, SystemAdmin]),
    (P::AdminUsers, &[SystemAdmin]),
    (P::AdminFacilities, &[Dhmt, SystemAdmin]),
    (P::AdminSettings, &[SystemAdmin]),
    (
        P::Profile,
        &[
            PhuStaff,
            HospitalDesk,
            ReferralCoordinator,
            Specialist,
            Dhmt,
            NationalUser,
            SystemAdmin,
            AmbulanceDispatch,
        ],
    ),
    (
        P::Settings,
        &[
            PhuStaff,
            HospitalDesk,
            ReferralCoordinator,
            Specialist,
            Dhmt,
            SystemAdmin,
            AmbulanceDispatch,
        ],
    ),
];

// =============================================================================
// Permission table and resolver
// =============================================================================

/// Read-only mapping of permission keys to the roles granted them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionTable {
    entries: BTreeMap<PermissionKey, BTreeSet<Role>>,
}

impl PermissionTable {
    /// Builds a table from `(key, roles)` pairs. Repeated keys merge their role
    /// sets. Completeness is checked by [`PermissionTable::validate`].
    pub fn from_entries(entries: &[(PermissionKey, &[Role])]) -> Self {
        let mut map: BTreeMap<PermissionKey, BTreeSet<Role>> = BTreeMap::new();
        for (key, roles) in entries {
            map.entry(*key).or_default().extend(roles.iter().copied());
        }
        Self { entries: map }
    }

    pub fn builtin() -> Self {
        Self::from_entries(PERMISSION_MATRIX)
    }

    /// Roles granted `key`, if the table has an entry for it.
    pub fn roles_for(&self, key: PermissionKey) -> Option<&BTreeSet<Role>> {
        self.entries.get(&key)
    }

    pub fn contains(&self, key: PermissionKey) -> bool {
        self.entries.contains_key(&key)
    }

    /// Whether `role` holds `key`. An absent role holds nothing.
    ///
    /// Validated tables cover every key, so a missing entry only occurs with an
    /// unvalidated table and is answered with `false`.
    pub fn has_permission(&self, role: Option<Role>, key: PermissionKey) -> bool {
        let Some(role) = role else {
            return false;
        };
        self.entries
            .get(&key)
            .is_some_and(|roles| roles.contains(&role))
    }

    /// Whether `role` holds at least one of `keys`. False for an empty list.
    pub fn has_any_permission(&self, role: Option<Role>, keys: &[PermissionKey]) -> bool {
        role.is_some() && keys.iter().any(|key| self.has_permission(role, *key))
    }

    /// Whether `role` holds every one of `keys`. An absent role holds nothing,
    /// even for an empty list.
    pub fn has_all_permissions(&self, role: Option<Role>, keys: &[PermissionKey]) -> bool {
        role.is_some() && keys.iter().all(|key| self.has_permission(role, *key))
    }

    /// Every key granted to `role`.
    pub fn role_permissions(&self, role: Role) -> BTreeSet<PermissionKey> {
        self.entries
            .iter()
            .filter(|(_, roles)| roles.contains(&role))
            .map(|(key, _)| *key)
            .collect()
    }

    /// Checks that every permission key is present and granted to at least one
    /// role. Reports the first offending key in declaration order.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for key in PermissionKey::ALL {
            match self.entries.get(&key) {
                None => return Err(ConfigurationError::MissingPermission(key)),
                Some(roles) if roles.is_empty() => {
                    return Err(ConfigurationError::EmptyRoleSet(key));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

impl Default for PermissionTable {
    fn default() -> Self {
        Self::builtin()
    }
}
