use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::domain::types::BlockReason;

/// Coarse error taxonomy callers can branch on without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Validation,
    Conflict,
    NotFound,
    Blocked,
    PaymentRequired,
    Forbidden,
    ExternalService,
    Internal,
}

/// Ledger service error variants.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("course not found")]
    CourseNotFound,
    #[error("event not found")]
    EventNotFound,
    #[error("shot not found")]
    ShotNotFound,
    #[error("claim not found")]
    ClaimNotFound,
    #[error("registration not found")]
    RegistrationNotFound,
    #[error("{}", .0.message())]
    PlayBlocked(BlockReason),
    #[error("already played this course today")]
    AlreadyPlayedToday,
    #[error("single-play credit was already used")]
    CreditAlreadyUsed,
    #[error("a single-play credit was already used today")]
    CreditAlreadyUsedToday,
    #[error("a prize claim was already submitted today")]
    AlreadyClaimedToday,
    #[error("no single-play credit available")]
    NoCreditAvailable,
    #[error("payment not found")]
    PaymentNotFound,
    #[error("event registration is not open")]
    EventClosed,
    #[error("a verified email is required")]
    EmailRequired,
    #[error("external service unavailable")]
    ExternalService(#[source] anyhow::Error),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl LedgerError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::CourseNotFound => "COURSE_NOT_FOUND",
            Self::EventNotFound => "EVENT_NOT_FOUND",
            Self::ShotNotFound => "SHOT_NOT_FOUND",
            Self::ClaimNotFound => "CLAIM_NOT_FOUND",
            Self::RegistrationNotFound => "REGISTRATION_NOT_FOUND",
            Self::PlayBlocked(reason) => reason.kind(),
            Self::AlreadyPlayedToday => "ALREADY_PLAYED_TODAY",
            Self::CreditAlreadyUsed => "CREDIT_ALREADY_USED",
            Self::CreditAlreadyUsedToday => "CREDIT_ALREADY_USED_TODAY",
            Self::AlreadyClaimedToday => "ALREADY_CLAIMED_TODAY",
            Self::NoCreditAvailable => "NO_CREDIT_AVAILABLE",
            Self::PaymentNotFound => "PAYMENT_NOT_FOUND",
            Self::EventClosed => "EVENT_CLOSED",
            Self::EmailRequired => "EMAIL_REQUIRED",
            Self::ExternalService(_) => "EXTERNAL_SERVICE",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidInput(_) | Self::EventClosed => ErrorClass::Validation,
            Self::CourseNotFound
            | Self::EventNotFound
            | Self::ShotNotFound
            | Self::ClaimNotFound
            | Self::RegistrationNotFound => ErrorClass::NotFound,
            Self::PlayBlocked(_) => ErrorClass::Blocked,
            Self::AlreadyPlayedToday
            | Self::CreditAlreadyUsed
            | Self::CreditAlreadyUsedToday
            | Self::AlreadyClaimedToday => ErrorClass::Conflict,
            Self::NoCreditAvailable | Self::PaymentNotFound => ErrorClass::PaymentRequired,
            Self::EmailRequired => ErrorClass::Forbidden,
            Self::ExternalService(_) => ErrorClass::ExternalService,
            Self::Internal(_) => ErrorClass::Internal,
        }
    }

    /// Wrap a collaborator failure (payment processor, email, cache).
    pub fn external(err: impl Into<anyhow::Error>) -> Self {
        Self::ExternalService(err.into())
    }
}

impl IntoResponse for LedgerError {
    fn into_response(self) -> Response {
        let status = match self.class() {
            ErrorClass::Validation => StatusCode::BAD_REQUEST,
            ErrorClass::Blocked | ErrorClass::Forbidden => StatusCode::FORBIDDEN,
            ErrorClass::NotFound => StatusCode::NOT_FOUND,
            ErrorClass::Conflict => StatusCode::CONFLICT,
            ErrorClass::PaymentRequired => StatusCode::PAYMENT_REQUIRED,
            ErrorClass::ExternalService => StatusCode::BAD_GATEWAY,
            ErrorClass::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // 4xx outcomes are already visible through TraceLayer; only failures that
        // need the error chain get logged here.
        match &self {
            Self::Internal(e) => tracing::error!(error = ?e, kind = "INTERNAL", "internal error"),
            Self::ExternalService(e) => {
                tracing::error!(error = ?e, kind = "EXTERNAL_SERVICE", "external service error")
            }
            _ => {}
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
