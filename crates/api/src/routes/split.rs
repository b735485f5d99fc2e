//! Bill split routes.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};
use billsplit_core::split::{SplitError, SplitRequest, SplitResponse};
use tracing::{error, info, warn};

use crate::AppState;
use crate::error::ApiError;

/// Creates the split routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/split", post(split_bill))
        .route("/split/", post(split_bill))
}

/// POST /split/
///
/// Splits a bill across its participants.
async fn split_bill(
    State(state): State<AppState>,
    payload: Result<Json<SplitRequest>, JsonRejection>,
) -> Result<Json<SplitResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "Rejected undecodable split request");
        ApiError::from(rejection)
    })?;

    match state.engine.compute(&request) {
        Ok(response) => {
            info!(
                currency = %response.currency,
                participants = response.participants.len(),
                items = request.items.len(),
                total = %response.total_after_tip,
                "Computed split"
            );
            Ok(Json(response))
        }
        Err(SplitError::Validation(e)) => {
            warn!(code = e.error_code(), field = e.field(), error = %e, "Rejected split request");
            Err(ApiError::validation(&e))
        }
        Err(e @ SplitError::InvariantViolation(_)) => {
            error!(error = %e, "Split result failed reconciliation");
            Err(e.into())
        }
    }
}
