//! Handlers for donation intake, the public inventory, and reserving items.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use shelfshare_core::donation;
use shelfshare_core::error::CoreError;
use shelfshare_core::reservation::HoldState;
use shelfshare_core::types::DbId;
use shelfshare_db::models::donated_item::{
    CreateDonatedItem, DonatedItem, DonatedItemFilter, SubmitDonation,
};
use shelfshare_db::models::hold::ReserveOutcome;
use shelfshare_db::repositories::{DonatedItemRepo, HoldRepo};

use crate::eligibility;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::retry::with_store_retry;
use crate::state::AppState;

/// Response body for an accepted donation.
#[derive(Debug, Serialize)]
pub struct DonationAccepted {
    pub approved: bool,
    pub item: DonatedItem,
}

/// Current lifecycle state of an item.
#[derive(Debug, Serialize)]
pub struct ItemStatus {
    pub item_id: DbId,
    pub state: HoldState,
}

fn item_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "DonatedItem",
        id,
    })
}

// ---------------------------------------------------------------------------
// Intake
// ---------------------------------------------------------------------------

/// POST /api/v1/donations
///
/// Gate the barcode against the approved catalog, then store the item with
/// the caller as owner. Catalog fields pre-fill the record; non-blank
/// `title`, `author` and `grade` in the body override them. A body that
/// does not deserialize is a 400 `VALIDATION_ERROR` like any other bad field.
pub async fn submit_donation(
    auth: AuthUser,
    State(state): State<AppState>,
    body: Result<Json<SubmitDonation>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = body.map_err(|rejection| CoreError::Validation(rejection.body_text()))?;
    let barcode_key = donation::validate_barcode(&input.barcode)?;
    donation::validate_condition(&input.condition)?;

    let (_, decision) =
        eligibility::check(&state.pool, &input.barcode, state.config.store_retry_attempts)
            .await?;
    let approved = decision.require_approved(&barcode_key).inspect_err(|_| {
        tracing::debug!(
            user_id = auth.user_id,
            barcode_key = %barcode_key,
            "Donation rejected: barcode not in approved catalog"
        );
    })?;

    let fields = donation::resolve_fields(
        approved,
        input.title.as_deref(),
        input.author.as_deref(),
        input.grade.as_deref(),
    )?;

    let item = DonatedItemRepo::insert(
        &state.pool,
        &CreateDonatedItem {
            owner_id: auth.user_id,
            title: fields.title,
            author: fields.author,
            grade: fields.grade,
            barcode_key,
            condition: input.condition,
            subject: fields.subject,
        },
    )
    .await?;

    tracing::info!(
        item_id = item.id,
        owner_id = item.owner_id,
        barcode_key = %item.barcode_key,
        "Donation accepted"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: DonationAccepted {
                approved: true,
                item,
            },
        }),
    ))
}

// ---------------------------------------------------------------------------
// Inventory
// ---------------------------------------------------------------------------

/// GET /api/v1/donations
///
/// List available items. See [`DonatedItemFilter`] for the query parameters.
pub async fn list_donations(
    State(state): State<AppState>,
    Query(filter): Query<DonatedItemFilter>,
) -> AppResult<impl IntoResponse> {
    let items = with_store_retry(state.config.store_retry_attempts, || {
        DonatedItemRepo::list(&state.pool, &filter)
    })
    .await?;

    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/donations/mine
///
/// The caller's own donations that are still available.
pub async fn my_donations(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let items = with_store_retry(state.config.store_retry_attempts, || {
        DonatedItemRepo::list_for_owner(&state.pool, auth.user_id)
    })
    .await?;

    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/donations/{id}
pub async fn get_donation(
    State(state): State<AppState>,
    Path(item_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let item = with_store_retry(state.config.store_retry_attempts, || {
        DonatedItemRepo::find_by_id(&state.pool, item_id)
    })
    .await?
    .ok_or_else(|| item_not_found(item_id))?;

    Ok(Json(DataResponse { data: item }))
}

/// GET /api/v1/donations/{id}/status
///
/// `available` or `held`. Completed and unknown items are indistinguishable
/// and both return 404.
pub async fn item_status(
    State(state): State<AppState>,
    Path(item_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let item_state = with_store_retry(state.config.store_retry_attempts, || {
        HoldRepo::item_state(&state.pool, item_id)
    })
    .await?
    .ok_or_else(|| item_not_found(item_id))?;

    Ok(Json(DataResponse {
        data: ItemStatus {
            item_id,
            state: item_state,
        },
    }))
}

// ---------------------------------------------------------------------------
// Reservation
// ---------------------------------------------------------------------------

/// POST /api/v1/donations/{id}/reserve
///
/// Take the item out of the inventory into a 3-day hold for the caller.
/// Exactly one of several concurrent callers wins; the rest get 404.
pub async fn reserve(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(item_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let now = Utc::now();
    match HoldRepo::reserve(&state.pool, item_id, auth.user_id, now).await? {
        ReserveOutcome::Held(hold) => Ok((
            StatusCode::CREATED,
            Json(DataResponse {
                data: hold.into_view(now),
            }),
        )),
        ReserveOutcome::NotFound => Err(item_not_found(item_id)),
        ReserveOutcome::SelfReservation => {
            Err(AppError::Core(CoreError::SelfReservationDenied { item_id }))
        }
    }
}
