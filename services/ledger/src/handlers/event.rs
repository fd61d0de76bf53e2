use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use holeout_auth_types::identity::IdentityHeaders;
use holeout_domain::id::{EventId, RegistrationId, UserId};

use crate::domain::types::{Event, EventRegistration, RegistrationOutcome};
use crate::error::LedgerError;
use crate::state::AppState;
use crate::usecase::event::{
    ListEventsUseCase, RegisterForEventUseCase, VerifyEventPaymentInput, VerifyEventPaymentUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct EventResponse {
    pub id: EventId,
    pub round: String,
    pub region: String,
    pub venue: String,
    pub date: NaiveDate,
    pub entry_fee: i64,
    pub nearest_pin_prize: Option<i64>,
    pub enabled: bool,
}

impl From<Event> for EventResponse {
    fn from(e: Event) -> Self {
        Self {
            id: e.id,
            round: e.round,
            region: e.region,
            venue: e.venue,
            date: e.date,
            entry_fee: e.entry_fee.0,
            nearest_pin_prize: e.nearest_pin_prize.map(|p| p.0),
            enabled: e.enabled,
        }
    }
}

#[derive(Serialize)]
pub struct RegistrationResponse {
    pub id: RegistrationId,
    pub user_id: UserId,
    pub event_id: EventId,
    pub payment_reference: Option<String>,
    pub attended: bool,
    #[serde(serialize_with = "holeout_core::serde::to_rfc3339_ms")]
    pub registered_at: DateTime<Utc>,
}

impl From<EventRegistration> for RegistrationResponse {
    fn from(r: EventRegistration) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            event_id: r.event_id,
            payment_reference: r.payment_reference,
            attended: r.attended,
            registered_at: r.registered_at,
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RegistrationOutcomeResponse {
    Registered { registration: RegistrationResponse },
    AlreadyRegistered,
    CheckoutRequired { session_id: String, url: String },
}

fn outcome_response(
    outcome: RegistrationOutcome,
) -> (StatusCode, Json<RegistrationOutcomeResponse>) {
    match outcome {
        RegistrationOutcome::Registered(registration) => (
            StatusCode::CREATED,
            Json(RegistrationOutcomeResponse::Registered {
                registration: registration.into(),
            }),
        ),
        RegistrationOutcome::AlreadyRegistered => (
            StatusCode::OK,
            Json(RegistrationOutcomeResponse::AlreadyRegistered),
        ),
        RegistrationOutcome::CheckoutRequired { session_id, url } => (
            StatusCode::OK,
            Json(RegistrationOutcomeResponse::CheckoutRequired { session_id, url }),
        ),
    }
}

// ── GET /events ──────────────────────────────────────────────────────────────

pub async fn list_events(
    State(state): State<AppState>,
) -> Result<Json<Vec<EventResponse>>, LedgerError> {
    let usecase = ListEventsUseCase {
        events: state.event_repo(),
    };
    let events = usecase.execute().await?;
    Ok(Json(events.into_iter().map(Into::into).collect()))
}

// ── POST /events/{event_id}/registration ─────────────────────────────────────

pub async fn register_for_event(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(event_id): Path<EventId>,
) -> Result<(StatusCode, Json<RegistrationOutcomeResponse>), LedgerError> {
    let usecase = RegisterForEventUseCase {
        events: state.event_repo(),
        registrations: state.registration_repo(),
        payments: state.stripe.clone(),
        clock: state.clock(),
        settings: state.checkout.clone(),
    };
    let outcome = usecase.execute(identity.into(), event_id).await?;
    Ok(outcome_response(outcome))
}

// ── POST /events/{event_id}/registration/verify ──────────────────────────────

#[derive(Deserialize, Default)]
pub struct VerifyEventPaymentRequest {
    pub session_id: Option<String>,
}

pub async fn verify_event_payment(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(event_id): Path<EventId>,
    body: Option<Json<VerifyEventPaymentRequest>>,
) -> Result<(StatusCode, Json<RegistrationOutcomeResponse>), LedgerError> {
    let Json(body) = body.unwrap_or_default();
    let usecase = VerifyEventPaymentUseCase {
        events: state.event_repo(),
        registrations: state.registration_repo(),
        payments: state.stripe.clone(),
        clock: state.clock(),
    };
    let outcome = usecase
        .execute(VerifyEventPaymentInput {
            player: identity.into(),
            event_id,
            session_id: body.session_id,
        })
        .await?;
    Ok(outcome_response(outcome))
}
