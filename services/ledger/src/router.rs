use axum::{
    Router,
    routing::{get, patch, post},
};
use tower_http::trace::TraceLayer;

use holeout_core::health::healthz;
use holeout_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    admin::{
        list_claims, list_event_registrations, mark_attendance, review_claim,
        update_course_prize, update_event_entry_fee,
    },
    claim::submit_claim,
    course::{get_course, get_eligibility, list_courses, log_shot, redeem_credit},
    credit::{create_checkout, verify_payment},
    event::{list_events, register_for_event, verify_event_payment},
    player::{
        get_my_subscription, list_my_claims, list_my_credits, list_my_shots, stream_my_shots,
    },
    readyz,
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Courses & play
        .route("/courses", get(list_courses))
        .route("/courses/{course_id}", get(get_course))
        .route("/courses/{course_id}/eligibility", get(get_eligibility))
        .route("/courses/{course_id}/shots", post(log_shot))
        .route("/courses/{course_id}/credit-redemptions", post(redeem_credit))
        // Caller history
        .route("/players/@me/shots", get(list_my_shots))
        .route("/players/@me/shots/stream", get(stream_my_shots))
        .route("/players/@me/credits", get(list_my_credits))
        .route("/players/@me/claims", get(list_my_claims))
        .route("/players/@me/subscription", get(get_my_subscription))
        // Single-play credits
        .route("/credits/checkout", post(create_checkout))
        .route("/credits/verify", post(verify_payment))
        // Prize claims
        .route("/claims", post(submit_claim))
        // Events
        .route("/events", get(list_events))
        .route("/events/{event_id}/registration", post(register_for_event))
        .route(
            "/events/{event_id}/registration/verify",
            post(verify_event_payment),
        )
        // Admin
        .route("/admin/claims", get(list_claims))
        .route("/admin/claims/{claim_id}", patch(review_claim))
        .route("/admin/courses/{course_id}/prize", patch(update_course_prize))
        .route(
            "/admin/events/{event_id}/entry-fee",
            patch(update_event_entry_fee),
        )
        .route(
            "/admin/events/{event_id}/registrations",
            get(list_event_registrations),
        )
        .route(
            "/admin/registrations/{registration_id}/attendance",
            patch(mark_attendance),
        )
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
