pub mod admin;
pub mod claim;
pub mod course;
pub mod credit;
pub mod event;
pub mod player;

use axum::{extract::State, http::StatusCode};
use serde::Deserialize;

use holeout_auth_types::identity::IdentityHeaders;
use holeout_core::health::readiness;
use holeout_domain::pagination::PageRequest;

use crate::domain::types::Player;
use crate::state::AppState;

impl From<IdentityHeaders> for Player {
    fn from(identity: IdentityHeaders) -> Self {
        Self {
            id: identity.user_id,
            email: identity.email,
            email_verified: identity.email_verified,
            role: identity.role,
        }
    }
}

/// `?per-page=&page=` on list endpoints.
#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct ListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

impl ListQuery {
    pub fn page_request(&self) -> PageRequest {
        let default = PageRequest::default();
        PageRequest {
            per_page: self.per_page.unwrap_or(default.per_page),
            page: self.page.unwrap_or(default.page),
        }
    }
}

// ── GET /readyz ──────────────────────────────────────────────────────────────

pub async fn readyz(State(state): State<AppState>) -> StatusCode {
    readiness(state.db.ping()).await
}
