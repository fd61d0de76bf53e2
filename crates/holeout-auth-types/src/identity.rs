//! Gateway-injected identity headers extractor.

use axum::extract::FromRequestParts;
use http::StatusCode;
use http::request::Parts;
use uuid::Uuid;

use holeout_domain::id::UserId;
use holeout_domain::role::UserRole;

pub const USER_ID_HEADER: &str = "x-holeout-user-id";
pub const USER_ROLE_HEADER: &str = "x-holeout-user-role";
pub const USER_EMAIL_HEADER: &str = "x-holeout-user-email";
pub const EMAIL_VERIFIED_HEADER: &str = "x-holeout-email-verified";

/// Caller identity injected by the gateway.
///
/// `x-holeout-user-id` and `x-holeout-user-role` are required (401 otherwise).
/// Email and its verification flag are optional; a missing flag means unverified.
#[derive(Debug, Clone)]
pub struct IdentityHeaders {
    pub user_id: UserId,
    pub role: UserRole,
    pub email: Option<String>,
    pub email_verified: bool,
}

impl IdentityHeaders {
    fn from_parts(parts: &Parts) -> Result<Self, StatusCode> {
        let header = |name: &str| parts.headers.get(name).and_then(|v| v.to_str().ok());

        let user_id = header(USER_ID_HEADER)
            .and_then(|s| s.parse::<Uuid>().ok())
            .map(UserId)
            .ok_or(StatusCode::UNAUTHORIZED)?;
        let role = header(USER_ROLE_HEADER)
            .and_then(|s| s.parse::<u8>().ok())
            .and_then(UserRole::from_u8)
            .ok_or(StatusCode::UNAUTHORIZED)?;
        let email = header(USER_EMAIL_HEADER)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned);
        let email_verified = header(EMAIL_VERIFIED_HEADER)
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Self {
            user_id,
            role,
            email,
            email_verified,
        })
    }
}

impl<S> FromRequestParts<S> for IdentityHeaders
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // Header values are read synchronously so the returned future owns no borrow of `parts`.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let result = Self::from_parts(parts);
        async move { result }
    }
}

/// Identity of an administrator. Rejects non-admin callers with 403.
#[derive(Debug, Clone)]
pub struct AdminIdentity(pub IdentityHeaders);

impl<S> FromRequestParts<S> for AdminIdentity
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let result = IdentityHeaders::from_parts(parts).and_then(|identity| {
            if identity.role.is_admin() {
                Ok(AdminIdentity(identity))
            } else {
                Err(StatusCode::FORBIDDEN)
            }
        });
        async move { result }
    }
}
