use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use holeout_auth_types::identity::IdentityHeaders;
use holeout_domain::id::{CourseId, CreditId};

use crate::domain::types::{CreditOutcome, SinglePlayCredit};
use crate::error::LedgerError;
use crate::state::AppState;
use crate::usecase::credit::{
    CreateSinglePlayCheckoutUseCase, RecordSinglePlayPaymentInput, RecordSinglePlayPaymentUseCase,
};

#[derive(Serialize)]
pub struct CreditResponse {
    pub id: CreditId,
    #[serde(serialize_with = "holeout_core::serde::to_rfc3339_ms")]
    pub purchased_at: DateTime<Utc>,
    #[serde(serialize_with = "holeout_core::serde::opt_to_rfc3339_ms")]
    pub used_at: Option<DateTime<Utc>>,
    pub redeemed_on: Option<NaiveDate>,
    pub course_id: Option<CourseId>,
}

impl From<SinglePlayCredit> for CreditResponse {
    fn from(c: SinglePlayCredit) -> Self {
        Self {
            id: c.id,
            purchased_at: c.purchased_at,
            used_at: c.used_at,
            redeemed_on: c.redeemed_on,
            course_id: c.course_id,
        }
    }
}

// ── POST /credits/checkout ───────────────────────────────────────────────────

#[derive(Serialize)]
pub struct CheckoutResponse {
    pub session_id: String,
    pub url: Option<String>,
}

pub async fn create_checkout(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<CheckoutResponse>), LedgerError> {
    let usecase = CreateSinglePlayCheckoutUseCase {
        payments: state.stripe.clone(),
        settings: state.checkout.clone(),
    };
    let session = usecase.execute(identity.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(CheckoutResponse {
            session_id: session.id,
            url: session.url,
        }),
    ))
}

// ── POST /credits/verify ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyPaymentRequest {
    pub session_id: String,
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VerifyPaymentResponse {
    Recorded { credit: CreditResponse },
    AlreadyRecorded,
}

pub async fn verify_payment(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<VerifyPaymentRequest>,
) -> Result<(StatusCode, Json<VerifyPaymentResponse>), LedgerError> {
    let usecase = RecordSinglePlayPaymentUseCase {
        credits: state.credit_repo(),
        payments: state.stripe.clone(),
        clock: state.clock(),
    };
    let outcome = usecase
        .execute(RecordSinglePlayPaymentInput {
            player: identity.into(),
            session_id: body.session_id,
        })
        .await?;
    Ok(match outcome {
        CreditOutcome::Recorded(credit) => (
            StatusCode::CREATED,
            Json(VerifyPaymentResponse::Recorded {
                credit: credit.into(),
            }),
        ),
        CreditOutcome::AlreadyRecorded => (StatusCode::OK, Json(VerifyPaymentResponse::AlreadyRecorded)),
    })
}
