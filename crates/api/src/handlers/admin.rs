//! Admin-only maintenance endpoints.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;

use crate::background::hold_expiry;
use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/admin/holds/sweep
///
/// Run one expiry pass immediately instead of waiting for the next tick.
pub async fn run_sweep(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let report =
        hold_expiry::sweep_once(&state.pool, Utc::now(), state.config.sweep.batch_size).await?;

    tracing::info!(
        user_id = admin.user_id,
        expired = report.expired,
        "Manual hold sweep completed"
    );

    Ok(Json(DataResponse { data: report }))
}
