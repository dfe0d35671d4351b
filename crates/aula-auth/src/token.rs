//! JWT session-token issuing and validation.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Access-token lifetime in seconds (4 hours).
pub const ACCESS_TOKEN_EXP: u64 = 60 * 60 * 4;

/// JWT claims payload carried by every session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    /// User ID (UUID string).
    pub sub: String,
    /// User role as `u8` wire value.
    pub role: u8,
    /// Issued-at timestamp (seconds since UNIX epoch).
    pub iat: u64,
    /// Expiration timestamp (seconds since UNIX epoch).
    pub exp: u64,
}

/// User identity extracted from a validated session token.
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub user_id: Uuid,
    pub role: u8,
    pub exp: u64,
}

/// Errors returned by [`issue_token`] and [`validate_token`].
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("token signing failed: {0}")]
    Signing(String),
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

/// Sign a session token for a user. Expiration is fixed relative to issue
/// time ([`ACCESS_TOKEN_EXP`]).
pub fn issue_token(user_id: Uuid, role: u8, secret: &str) -> Result<String, TokenError> {
    let now = now_secs();
    let claims = TokenClaims {
        sub: user_id.to_string(),
        role,
        iat: now,
        exp: now + ACCESS_TOKEN_EXP,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| TokenError::Signing(e.to_string()))
}

/// Decode and validate a session token, returning parsed identity.
///
/// Validation: HS256 only, exp checked, required claims `exp` + `sub`.
/// Tokens signed with a different key or algorithm are rejected.
pub fn validate_token(token: &str, secret: &str) -> Result<TokenInfo, TokenError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        _ => TokenError::Malformed,
    })?;

    let user_id = data
        .claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| TokenError::Malformed)?;

    Ok(TokenInfo {
        user_id,
        role: data.claims.role,
        exp: data.claims.exp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};

    const TEST_SECRET: &str = "test-secret-key-for-unit-tests";

    fn make_token(sub: &str, role: u8, exp: u64) -> String {
        let claims = TokenClaims {
            sub: sub.to_string(),
            role,
            iat: 0,
            exp,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap()
    }

    fn future_exp() -> u64 {
        now_secs() + 3600
    }

    #[test]
    fn should_round_trip_issued_token() {
        let user_id = Uuid::new_v4();
        let token = issue_token(user_id, 1, TEST_SECRET).unwrap();

        let info = validate_token(&token, TEST_SECRET).unwrap();
        assert_eq!(info.user_id, user_id);
        assert_eq!(info.role, 1);
        assert!(info.exp > now_secs());
    }

    #[test]
    fn should_reject_expired_token() {
        let token = make_token(&Uuid::new_v4().to_string(), 0, 1_000_000);

        let err = validate_token(&token, TEST_SECRET).unwrap_err();
        assert!(matches!(err, TokenError::Expired));
    }

    #[test]
    fn should_reject_wrong_secret() {
        let token = make_token(&Uuid::new_v4().to_string(), 0, future_exp());

        let err = validate_token(&token, "wrong-secret").unwrap_err();
        assert!(matches!(err, TokenError::InvalidSignature));
    }

    #[test]
    fn should_reject_malformed_token() {
        let err = validate_token("not-a-jwt", TEST_SECRET).unwrap_err();
        assert!(matches!(err, TokenError::Malformed));
    }

    #[test]
    fn should_reject_non_uuid_subject() {
        let token = make_token("not-a-uuid", 0, future_exp());

        let err = validate_token(&token, TEST_SECRET).unwrap_err();
        assert!(matches!(err, TokenError::Malformed));
    }
}
