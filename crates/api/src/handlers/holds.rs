//! Handlers for live holds: listing, pickup confirmation, cancellation and
//! the chat handoff.
//!
//! Every hold-scoped endpoint checks that the caller is a party to the hold
//! (or an admin) before acting.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use shelfshare_core::error::CoreError;
use shelfshare_core::types::DbId;
use shelfshare_db::models::hold::{Hold, HoldParticipants, HoldView};
use shelfshare_db::repositories::HoldRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::retry::with_store_retry;
use crate::state::AppState;

fn hold_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Hold", id })
}

async fn load_hold(state: &AppState, hold_id: DbId) -> AppResult<Hold> {
    with_store_retry(state.config.store_retry_attempts, || {
        HoldRepo::find_by_id(&state.pool, hold_id)
    })
    .await?
    .ok_or_else(|| hold_not_found(hold_id))
}

fn views(holds: Vec<Hold>) -> Vec<HoldView> {
    let now = Utc::now();
    holds.into_iter().map(|h| h.into_view(now)).collect()
}

/// GET /api/v1/holds/mine
///
/// Holds the caller has taken, soonest deadline first.
pub async fn my_holds(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let holds = with_store_retry(state.config.store_retry_attempts, || {
        HoldRepo::list_for_holder(&state.pool, auth.user_id)
    })
    .await?;

    Ok(Json(DataResponse { data: views(holds) }))
}

/// GET /api/v1/holds/outgoing
///
/// Holds other users have on the caller's donations.
pub async fn outgoing_holds(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let holds = with_store_retry(state.config.store_retry_attempts, || {
        HoldRepo::list_for_owner(&state.pool, auth.user_id)
    })
    .await?;

    Ok(Json(DataResponse { data: views(holds) }))
}

/// GET /api/v1/holds/{id}
pub async fn get_hold(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(hold_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let hold = load_hold(&state, hold_id).await?;
    hold.party().ensure_can_view(auth.user_id, &auth.role)?;

    Ok(Json(DataResponse {
        data: hold.into_view(Utc::now()),
    }))
}

/// POST /api/v1/holds/{id}/confirm
///
/// Record pickup. The hold and its item are gone for good afterwards.
pub async fn confirm(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(hold_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let hold = load_hold(&state, hold_id).await?;
    hold.party().ensure_can_confirm(auth.user_id, &auth.role)?;

    // The hold may have been cancelled or swept since it was loaded.
    let hold = HoldRepo::confirm(&state.pool, hold_id)
        .await?
        .ok_or_else(|| hold_not_found(hold_id))?;

    tracing::info!(hold_id, user_id = auth.user_id, "Pickup confirmed");

    Ok(Json(DataResponse { data: hold }))
}

/// POST /api/v1/holds/{id}/cancel
///
/// Drop the hold and put the item back in the inventory under its original
/// id and donor. Returns the restored item.
pub async fn cancel(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(hold_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let hold = load_hold(&state, hold_id).await?;
    hold.party().ensure_can_cancel(auth.user_id, &auth.role)?;

    let released = HoldRepo::cancel(&state.pool, hold_id)
        .await?
        .ok_or_else(|| hold_not_found(hold_id))?;

    tracing::info!(
        hold_id,
        item_id = released.item.id,
        user_id = auth.user_id,
        "Hold cancelled"
    );

    Ok(Json(DataResponse {
        data: released.item,
    }))
}

/// GET /api/v1/holds/{id}/participants
///
/// The donor and holder ids, for opening a conversation between them.
pub async fn participants(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(hold_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let hold = load_hold(&state, hold_id).await?;
    hold.party().ensure_can_view(auth.user_id, &auth.role)?;

    Ok(Json(DataResponse {
        data: HoldParticipants::from(&hold),
    }))
}
