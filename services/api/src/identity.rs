//! Request identity extractors — the authentication/authorization chain.
//!
//! Two chains with deliberately different rejection codes: the general-user
//! chain answers 400 INVALID_TOKEN to a missing/malformed/invalid token, the
//! admin chain answers 401 UNAUTHORIZED (and 403 FORBIDDEN when the token is
//! fine but the role is not).

use axum::extract::FromRequestParts;
use http::HeaderMap;
use http::request::Parts;
use uuid::Uuid;

use aula_auth::token::validate_token;
use aula_domain::role::UserRole;

use crate::error::ApiError;
use crate::state::AppState;

/// Identity of the calling user, from a validated `Authorization: Bearer`
/// header. Any valid token passes; role enforcement is the admin chain's job.
#[derive(Debug, Clone)]
pub struct UserIdentity {
    pub user_id: Uuid,
    pub role: UserRole,
}

/// Identity of an admin caller. Valid token plus `UserRole::Admin` required.
#[derive(Debug, Clone)]
pub struct AdminIdentity {
    pub user_id: Uuid,
    pub role: UserRole,
}

/// Extract the token from `Authorization: Bearer <token>`.
///
/// The header value must be exactly two space-separated parts with the
/// `Bearer` scheme; extra spaces or a different scheme are malformed.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(http::header::AUTHORIZATION)?.to_str().ok()?;
    let mut split = value.split(' ');
    let scheme = split.next()?;
    let token = split.next()?;
    if split.next().is_some() || scheme != "Bearer" || token.is_empty() {
        return None;
    }
    Some(token.to_owned())
}

fn identity_from_headers(headers: &HeaderMap, secret: &str) -> Option<(Uuid, UserRole)> {
    let token = bearer_token(headers)?;
    let info = validate_token(&token, secret).ok()?;
    let role = UserRole::from_u8(info.role)?;
    Some((info.user_id, role))
}

impl FromRequestParts<AppState> for UserIdentity {
    type Rejection = ApiError;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // Extract values synchronously and return a 'static async move block so the
    // future does not capture the `Parts` borrow.
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let identity = identity_from_headers(&parts.headers, &state.jwt_secret);
        async move {
            let (user_id, role) = identity.ok_or(ApiError::InvalidToken)?;
            Ok(Self { user_id, role })
        }
    }
}

impl FromRequestParts<AppState> for AdminIdentity {
    type Rejection = ApiError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let identity = identity_from_headers(&parts.headers, &state.jwt_secret);
        async move {
            let (user_id, role) = identity.ok_or(ApiError::Unauthorized)?;
            if !role.is_admin() {
                return Err(ApiError::Forbidden);
            }
            Ok(Self { user_id, role })
        }
    }
}
