//! Session resolution for the page guard.

use medref_config::JwtConfig;
use medref_core::Session;
use tracing::debug;

use crate::jwt::verify_token;

/// Resolves the guard session from an optional raw token.
///
/// A missing, malformed or expired token is not an error here: it simply
/// yields an anonymous session and the guard sends the user to log in.
pub fn session_from_token(token: Option<&str>, jwt_config: &JwtConfig) -> Session {
    let Some(token) = token.filter(|t| !t.is_empty()) else {
        return Session::anonymous();
    };

    match verify_token(token, jwt_config) {
        Ok(claims) => claims.session(),
        Err(err) => {
            debug!(error = %err.error, "Ignoring unusable session token");
            Session::anonymous()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::create_access_token;
    use medref_core::Role;
    use uuid::Uuid;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "session-test-secret-at-least-32-characters".to_string(),
            access_token_expiry: 600,
        }
    }

    #[test]
    fn test_missing_token_is_anonymous() {
        assert_eq!(session_from_token(None, &config()), Session::anonymous());
        assert_eq!(session_from_token(Some(""), &config()), Session::anonymous());
    }

    #[test]
    fn test_garbage_token_is_anonymous() {
        let session = session_from_token(Some("not.a.jwt"), &config());
        assert!(!session.is_authenticated());
        assert!(!session.is_loading);
    }

    #[test]
    fn test_valid_token_carries_role() {
        let config = config();
        let token =
            create_access_token(Uuid::new_v4(), "n@moh.example", Role::NationalUser, None, &config)
                .unwrap();
        assert_eq!(
            session_from_token(Some(&token), &config),
            Session::authenticated(Role::NationalUser)
        );
    }
}
