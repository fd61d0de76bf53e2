//! Gateway identity headers for tests.
//!
//! Services read the caller from `x-holeout-*` headers injected by the gateway.
//! `MockAuth` builds the same headers so handler tests need no gateway.

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use uuid::Uuid;

use holeout_auth_types::identity::{
    EMAIL_VERIFIED_HEADER, USER_EMAIL_HEADER, USER_ID_HEADER, USER_ROLE_HEADER,
};
use holeout_domain::id::UserId;
use holeout_domain::role::UserRole;

/// Identity injected into test requests.
#[derive(Debug, Clone)]
pub struct MockAuth {
    pub user_id: UserId,
    pub role: UserRole,
    pub email: Option<String>,
    pub email_verified: bool,
}

impl MockAuth {
    pub fn player() -> Self {
        Self {
            user_id: UserId(Uuid::now_v7()),
            role: UserRole::Player,
            email: None,
            email_verified: false,
        }
    }

    pub fn admin() -> Self {
        Self {
            role: UserRole::Admin,
            ..Self::player()
        }
    }

    pub fn with_email(mut self, email: &str, verified: bool) -> Self {
        self.email = Some(email.to_owned());
        self.email_verified = verified;
        self
    }

    /// Headers as the gateway would inject them.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            HeaderName::from_static(USER_ID_HEADER),
            HeaderValue::from_str(&self.user_id.to_string()).unwrap(),
        );
        map.insert(
            HeaderName::from_static(USER_ROLE_HEADER),
            HeaderValue::from(u16::from(self.role.as_u8())),
        );
        if let Some(email) = &self.email {
            map.insert(
                HeaderName::from_static(USER_EMAIL_HEADER),
                HeaderValue::from_str(email).unwrap(),
            );
            map.insert(
                HeaderName::from_static(EMAIL_VERIFIED_HEADER),
                HeaderValue::from_static(if self.email_verified { "true" } else { "false" }),
            );
        }
        map
    }
}
