use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use holeout_auth_types::identity::IdentityHeaders;
use holeout_domain::id::{ClaimId, CourseId, EventId, ShotId, UserId};

use crate::domain::types::{ClaimStatus, PrizeClaim};
use crate::error::LedgerError;
use crate::state::AppState;
use crate::usecase::claim::{SubmitClaimInput, SubmitClaimUseCase};

#[derive(Serialize)]
pub struct ClaimResponse {
    pub id: ClaimId,
    pub user_id: UserId,
    pub course_id: Option<CourseId>,
    pub event_id: Option<EventId>,
    pub shot_id: Option<ShotId>,
    pub claim_date: NaiveDate,
    pub tee_time: Option<String>,
    pub time_of_hole_in_one: Option<String>,
    pub notes: Option<String>,
    pub prize_amount: Option<i64>,
    pub status: ClaimStatus,
    #[serde(serialize_with = "holeout_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<PrizeClaim> for ClaimResponse {
    fn from(c: PrizeClaim) -> Self {
        Self {
            id: c.id,
            user_id: c.user_id,
            course_id: c.target.course_id(),
            event_id: c.target.event_id(),
            shot_id: c.shot_id,
            claim_date: c.claim_date,
            tee_time: c.tee_time,
            time_of_hole_in_one: c.time_of_hole_in_one,
            notes: c.notes,
            prize_amount: c.prize_amount.map(|p| p.0),
            status: c.status,
            created_at: c.created_at,
        }
    }
}

// ── POST /claims ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SubmitClaimRequest {
    pub course_id: Option<CourseId>,
    pub event_id: Option<EventId>,
    pub shot_id: Option<ShotId>,
    pub claim_date: Option<NaiveDate>,
    pub tee_time: Option<String>,
    pub time_of_hole_in_one: Option<String>,
    pub notes: Option<String>,
}

pub async fn submit_claim(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<SubmitClaimRequest>,
) -> Result<(StatusCode, Json<ClaimResponse>), LedgerError> {
    let usecase = SubmitClaimUseCase {
        shots: state.shot_repo(),
        courses: state.course_repo(),
        events: state.event_repo(),
        claims: state.claim_repo(),
        subscriptions: state.subscriptions(),
        notifier: state.notifier.clone(),
        clock: state.clock(),
        calendar: state.calendar,
    };
    let claim = usecase
        .execute(
            identity.into(),
            SubmitClaimInput {
                course_id: body.course_id,
                event_id: body.event_id,
                shot_id: body.shot_id,
                claim_date: body.claim_date,
                tee_time: body.tee_time,
                time_of_hole_in_one: body.time_of_hole_in_one,
                notes: body.notes,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(claim.into())))
}
