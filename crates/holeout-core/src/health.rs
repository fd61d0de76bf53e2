use std::future::Future;

use axum::http::StatusCode;

/// Liveness probe for `GET /healthz`.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Readiness helper: 200 when `check` succeeds, 503 otherwise.
///
/// Services wrap this in their own `/readyz` handler with a dependency probe
/// (e.g. a database ping).
pub async fn readiness<F, E>(check: F) -> StatusCode
where
    F: Future<Output = Result<(), E>>,
    E: std::fmt::Display,
{
    match check.await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "readiness probe failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
