use axum::{
    Json,
    extract::{Query, State},
    response::sse::{Event, KeepAlive, Sse},
};
use chrono::{DateTime, Utc};
use futures::Stream;
use serde::Serialize;
use tokio_stream::StreamExt as _;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tracing::warn;

use holeout_auth_types::identity::IdentityHeaders;

use crate::error::LedgerError;
use crate::handlers::ListQuery;
use crate::handlers::claim::ClaimResponse;
use crate::handlers::course::ShotResponse;
use crate::handlers::credit::CreditResponse;
use crate::state::AppState;
use crate::usecase::claim::ListPlayerClaimsUseCase;
use crate::usecase::credit::ListPlayerCreditsUseCase;
use crate::usecase::eligibility::GetSubscriptionStatusUseCase;
use crate::usecase::shot::ListPlayerShotsUseCase;

// ── GET /players/@me/shots ───────────────────────────────────────────────────

pub async fn list_my_shots(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ShotResponse>>, LedgerError> {
    let usecase = ListPlayerShotsUseCase {
        shots: state.shot_repo(),
    };
    let shots = usecase
        .execute(identity.user_id, query.page_request())
        .await?;
    Ok(Json(shots.into_iter().map(Into::into).collect()))
}

// ── GET /players/@me/shots/stream ────────────────────────────────────────────

/// Server-sent `shot` events for every shot the caller records from now on.
pub async fn stream_my_shots(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let user_id = identity.user_id;
    let stream = BroadcastStream::new(state.feed.subscribe()).filter_map(move |item| match item {
        Ok(shot) if shot.user_id == user_id => Some(
            Event::default()
                .event("shot")
                .json_data(ShotResponse::from(shot)),
        ),
        Ok(_) => None,
        Err(BroadcastStreamRecvError::Lagged(skipped)) => {
            warn!(%user_id, skipped, "shot stream lagged");
            None
        }
    });
    Sse::new(stream).keep_alive(KeepAlive::default())
}

// ── GET /players/@me/credits ─────────────────────────────────────────────────

pub async fn list_my_credits(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<CreditResponse>>, LedgerError> {
    let usecase = ListPlayerCreditsUseCase {
        credits: state.credit_repo(),
    };
    let credits = usecase
        .execute(identity.user_id, query.page_request())
        .await?;
    Ok(Json(credits.into_iter().map(Into::into).collect()))
}

// ── GET /players/@me/claims ──────────────────────────────────────────────────

pub async fn list_my_claims(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ClaimResponse>>, LedgerError> {
    let usecase = ListPlayerClaimsUseCase {
        claims: state.claim_repo(),
    };
    let claims = usecase
        .execute(identity.user_id, query.page_request())
        .await?;
    Ok(Json(claims.into_iter().map(Into::into).collect()))
}

// ── GET /players/@me/subscription ────────────────────────────────────────────

#[derive(Serialize)]
pub struct SubscriptionResponse {
    pub subscribed: bool,
    #[serde(serialize_with = "holeout_core::serde::opt_to_rfc3339_ms")]
    pub renewal_date: Option<DateTime<Utc>>,
    pub cancelled: bool,
    #[serde(serialize_with = "holeout_core::serde::to_rfc3339_ms")]
    pub checked_at: DateTime<Utc>,
}

pub async fn get_my_subscription(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<SubscriptionResponse>, LedgerError> {
    let usecase = GetSubscriptionStatusUseCase {
        subscriptions: state.subscriptions(),
    };
    let snapshot = usecase.execute(&identity.into()).await?;
    Ok(Json(SubscriptionResponse {
        subscribed: snapshot.active,
        renewal_date: snapshot.renewal_date,
        cancelled: snapshot.cancelled,
        checked_at: snapshot.checked_at,
    }))
}
