use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use holeout_auth_types::identity::AdminIdentity;
use holeout_domain::id::{ClaimId, CourseId, EventId, RegistrationId};
use holeout_domain::money::Pence;
use holeout_domain::pagination::PageRequest;

use crate::domain::types::ClaimStatus;
use crate::error::LedgerError;
use crate::handlers::claim::ClaimResponse;
use crate::handlers::course::CourseResponse;
use crate::handlers::event::{EventResponse, RegistrationResponse};
use crate::state::AppState;
use crate::usecase::claim::{ListClaimsUseCase, ReviewClaimInput, ReviewClaimUseCase};
use crate::usecase::course::UpdateCoursePrizeUseCase;
use crate::usecase::event::{
    ListEventRegistrationsUseCase, MarkAttendanceUseCase, UpdateEventEntryFeeUseCase,
};

// ── GET /admin/claims ────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct ClaimListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub status: Option<String>,
}

pub async fn list_claims(
    _admin: AdminIdentity,
    State(state): State<AppState>,
    Query(query): Query<ClaimListQuery>,
) -> Result<Json<Vec<ClaimResponse>>, LedgerError> {
    let status = query
        .status
        .as_deref()
        .map(str::parse::<ClaimStatus>)
        .transpose()
        .map_err(LedgerError::InvalidInput)?;
    let default = PageRequest::default();
    let page = PageRequest {
        per_page: query.per_page.unwrap_or(default.per_page),
        page: query.page.unwrap_or(default.page),
    };

    let usecase = ListClaimsUseCase {
        claims: state.claim_repo(),
    };
    let claims = usecase.execute(status, page).await?;
    Ok(Json(claims.into_iter().map(Into::into).collect()))
}

// ── PATCH /admin/claims/{claim_id} ───────────────────────────────────────────

#[derive(Deserialize)]
pub struct ReviewClaimRequest {
    pub status: Option<ClaimStatus>,
    pub notes: Option<String>,
}

pub async fn review_claim(
    AdminIdentity(admin): AdminIdentity,
    State(state): State<AppState>,
    Path(claim_id): Path<ClaimId>,
    Json(body): Json<ReviewClaimRequest>,
) -> Result<Json<ClaimResponse>, LedgerError> {
    let usecase = ReviewClaimUseCase {
        claims: state.claim_repo(),
    };
    let claim = usecase
        .execute(
            admin.user_id,
            ReviewClaimInput {
                claim_id,
                status: body.status,
                notes: body.notes,
            },
        )
        .await?;
    Ok(Json(claim.into()))
}

// ── PATCH /admin/courses/{course_id}/prize ───────────────────────────────────

#[derive(Deserialize)]
pub struct UpdatePrizeRequest {
    /// Pence; `null` clears the pot.
    pub prize_amount: Option<i64>,
}

pub async fn update_course_prize(
    _admin: AdminIdentity,
    State(state): State<AppState>,
    Path(course_id): Path<CourseId>,
    Json(body): Json<UpdatePrizeRequest>,
) -> Result<Json<CourseResponse>, LedgerError> {
    let usecase = UpdateCoursePrizeUseCase {
        courses: state.course_repo(),
    };
    let course = usecase
        .execute(course_id, body.prize_amount.map(Pence))
        .await?;
    Ok(Json(course.into()))
}

// ── PATCH /admin/events/{event_id}/entry-fee ─────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateEntryFeeRequest {
    pub entry_fee: i64,
}

pub async fn update_event_entry_fee(
    _admin: AdminIdentity,
    State(state): State<AppState>,
    Path(event_id): Path<EventId>,
    Json(body): Json<UpdateEntryFeeRequest>,
) -> Result<Json<EventResponse>, LedgerError> {
    let usecase = UpdateEventEntryFeeUseCase {
        events: state.event_repo(),
    };
    let event = usecase.execute(event_id, Pence(body.entry_fee)).await?;
    Ok(Json(event.into()))
}

// ── GET /admin/events/{event_id}/registrations ───────────────────────────────

pub async fn list_event_registrations(
    _admin: AdminIdentity,
    State(state): State<AppState>,
    Path(event_id): Path<EventId>,
) -> Result<Json<Vec<RegistrationResponse>>, LedgerError> {
    let usecase = ListEventRegistrationsUseCase {
        events: state.event_repo(),
        registrations: state.registration_repo(),
    };
    let registrations = usecase.execute(event_id).await?;
    Ok(Json(registrations.into_iter().map(Into::into).collect()))
}

// ── PATCH /admin/registrations/{registration_id}/attendance ──────────────────

#[derive(Deserialize)]
pub struct MarkAttendanceRequest {
    pub attended: bool,
}

pub async fn mark_attendance(
    _admin: AdminIdentity,
    State(state): State<AppState>,
    Path(registration_id): Path<RegistrationId>,
    Json(body): Json<MarkAttendanceRequest>,
) -> Result<StatusCode, LedgerError> {
    let usecase = MarkAttendanceUseCase {
        registrations: state.registration_repo(),
    };
    usecase.execute(registration_id, body.attended).await?;
    Ok(StatusCode::NO_CONTENT)
}
