//! Handlers for the approved catalog lookup.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use shelfshare_core::donation;

use crate::eligibility;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/catalog/barcode/{raw}
///
/// Run the eligibility gate for a raw barcode without donating anything.
/// Lets a client pre-fill the donation form with the canonical fields.
pub async fn check_barcode(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> AppResult<impl IntoResponse> {
    donation::validate_barcode(&raw)?;

    let (key, decision) =
        eligibility::check(&state.pool, &raw, state.config.store_retry_attempts).await?;

    Ok(Json(DataResponse {
        data: decision.into_view(key),
    }))
}
