//! JWT claims carried by session tokens.

use medref_core::{Role, Session};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// JWT claims for access tokens.
///
/// The role is the only input the page guard needs, so a valid token is
/// enough to build a [`Session`] without further lookups.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    pub email: String,
    /// The user's single organizational role
    pub role: Role,
    /// Facility the user works at (None for district and national users)
    pub facility_id: Option<Uuid>,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}

impl Claims {
    pub fn session(&self) -> Session {
        Session::authenticated(self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_serialize_role_in_wire_format() {
        let claims = Claims {
            sub: "user-id-123".to_string(),
            email: "desk@kenema.example".to_string(),
            role: Role::HospitalDesk,
            facility_id: None,
            exp: 1234567890,
            iat: 1234567800,
        };
        let serialized = serde_json::to_string(&claims).unwrap();
        assert!(serialized.contains(r#""role":"HOSPITAL_DESK""#));
        assert!(serialized.contains(r#""facility_id":null"#));
    }

    #[test]
    fn test_claims_deserialize() {
        let json = r#"{"sub":"user-id-456","email":"dhmt@bo.example","role":"DHMT","facility_id":null,"exp":9999999999,"iat":9999999900}"#;
        let claims: Claims = serde_json::from_str(json).unwrap();
        assert_eq!(claims.sub, "user-id-456");
        assert_eq!(claims.role, Role::Dhmt);
        assert_eq!(claims.session(), Session::authenticated(Role::Dhmt));
    }

    #[test]
    fn test_claims_reject_unknown_role() {
        let json = r#"{"sub":"x","email":"x@y","role":"JANITOR","facility_id":null,"exp":1,"iat":1}"#;
        assert!(serde_json::from_str::<Claims>(json).is_err());
    }
}
