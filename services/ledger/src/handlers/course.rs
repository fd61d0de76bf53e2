use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use holeout_auth_types::identity::IdentityHeaders;
use holeout_domain::id::{CourseId, CreditId, ShotId};

use crate::domain::types::{Course, Decision, EntitlementSource, Shot};
use crate::error::LedgerError;
use crate::state::AppState;
use crate::usecase::course::{GetCourseUseCase, ListCoursesUseCase};
use crate::usecase::credit::{RedeemCreditInput, RedeemCreditUseCase};
use crate::usecase::eligibility::{EvaluateEligibilityInput, EvaluateEligibilityUseCase};
use crate::usecase::shot::{LogShotInput, LogShotUseCase};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct CourseResponse {
    pub id: CourseId,
    pub name: String,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub par_3_count: Option<i32>,
    pub priority: Option<i32>,
    pub coming_soon: bool,
    /// Prize pot in pence.
    pub prize_amount: Option<i64>,
}

impl From<Course> for CourseResponse {
    fn from(c: Course) -> Self {
        Self {
            id: c.id,
            name: c.name,
            location: c.location,
            image_url: c.image_url,
            par_3_count: c.par_3_count,
            priority: c.priority,
            coming_soon: c.coming_soon,
            prize_amount: c.prize_amount.map(|p| p.0),
        }
    }
}

#[derive(Serialize)]
pub struct ShotResponse {
    pub id: ShotId,
    pub course_id: CourseId,
    pub play_day: NaiveDate,
    #[serde(serialize_with = "holeout_core::serde::opt_to_rfc3339_ms")]
    pub played_at: Option<DateTime<Utc>>,
    pub is_hole_in_one: bool,
    #[serde(serialize_with = "holeout_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<Shot> for ShotResponse {
    fn from(s: Shot) -> Self {
        Self {
            id: s.id,
            course_id: s.course_id,
            play_day: s.play_day,
            played_at: s.played_at,
            is_hole_in_one: s.is_hole_in_one,
            created_at: s.created_at,
        }
    }
}

// ── GET /courses ─────────────────────────────────────────────────────────────

pub async fn list_courses(
    State(state): State<AppState>,
) -> Result<Json<Vec<CourseResponse>>, LedgerError> {
    let usecase = ListCoursesUseCase {
        courses: state.course_repo(),
    };
    let courses = usecase.execute().await?;
    Ok(Json(courses.into_iter().map(Into::into).collect()))
}

// ── GET /courses/{course_id} ─────────────────────────────────────────────────

pub async fn get_course(
    State(state): State<AppState>,
    Path(course_id): Path<CourseId>,
) -> Result<Json<CourseResponse>, LedgerError> {
    let usecase = GetCourseUseCase {
        courses: state.course_repo(),
    };
    Ok(Json(usecase.execute(course_id).await?.into()))
}

// ── GET /courses/{course_id}/eligibility ─────────────────────────────────────

#[derive(Serialize)]
pub struct EligibilityResponse {
    pub course_id: CourseId,
    pub allowed: bool,
    /// `subscription` or `single_play_credit` when allowed.
    pub funded_by: Option<&'static str>,
    pub credit_id: Option<CreditId>,
    /// Machine-readable block reason when not allowed.
    pub reason: Option<&'static str>,
    pub message: Option<&'static str>,
    pub subscribed: bool,
    pub play_day: NaiveDate,
}

pub async fn get_eligibility(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(course_id): Path<CourseId>,
) -> Result<Json<EligibilityResponse>, LedgerError> {
    let usecase = EvaluateEligibilityUseCase {
        courses: state.course_repo(),
        shots: state.shot_repo(),
        credits: state.credit_repo(),
        subscriptions: state.subscriptions(),
        clock: state.clock(),
        calendar: state.calendar,
    };
    let report = usecase
        .execute(EvaluateEligibilityInput {
            player: identity.into(),
            course_id,
        })
        .await?;

    let (funded_by, credit_id, reason, message) = match report.decision {
        Decision::Allowed(EntitlementSource::Subscription) => {
            (Some("subscription"), None, None, None)
        }
        Decision::Allowed(EntitlementSource::SinglePlayCredit(id)) => {
            (Some("single_play_credit"), Some(id), None, None)
        }
        Decision::Blocked(r) => (None, None, Some(r.kind()), Some(r.message())),
    };
    Ok(Json(EligibilityResponse {
        course_id: report.course.id,
        allowed: matches!(report.decision, Decision::Allowed(_)),
        funded_by,
        credit_id,
        reason,
        message,
        subscribed: report.subscription.active,
        play_day: report.play_day,
    }))
}

// ── POST /courses/{course_id}/shots ──────────────────────────────────────────

#[derive(Deserialize)]
pub struct LogShotRequest {
    pub played_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_hole_in_one: bool,
}

pub async fn log_shot(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(course_id): Path<CourseId>,
    Json(body): Json<LogShotRequest>,
) -> Result<(StatusCode, Json<ShotResponse>), LedgerError> {
    let usecase = LogShotUseCase {
        eligibility: EvaluateEligibilityUseCase {
            courses: state.course_repo(),
            shots: state.shot_repo(),
            credits: state.credit_repo(),
            subscriptions: state.subscriptions(),
            clock: state.clock(),
            calendar: state.calendar,
        },
        shots: state.shot_repo(),
        observer: state.feed.clone(),
    };
    let shot = usecase
        .execute(LogShotInput {
            player: identity.into(),
            course_id,
            played_at: body.played_at,
            is_hole_in_one: body.is_hole_in_one,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(shot.into())))
}

// ── POST /courses/{course_id}/credit-redemptions ─────────────────────────────

#[derive(Serialize)]
pub struct RedeemCreditResponse {
    pub credit_id: CreditId,
    pub course_id: CourseId,
}

pub async fn redeem_credit(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(course_id): Path<CourseId>,
) -> Result<(StatusCode, Json<RedeemCreditResponse>), LedgerError> {
    let usecase = RedeemCreditUseCase {
        courses: state.course_repo(),
        credits: state.credit_repo(),
        clock: state.clock(),
        calendar: state.calendar,
    };
    let credit_id = usecase
        .execute(RedeemCreditInput {
            player: identity.into(),
            course_id,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(RedeemCreditResponse {
            credit_id,
            course_id,
        }),
    ))
}
