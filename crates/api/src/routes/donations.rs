//! Route definitions for donations and the public inventory.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::donations;
use crate::state::AppState;

/// Donation routes mounted at `/donations`.
///
/// ```text
/// GET    /                  -> list_donations
/// POST   /                  -> submit_donation
/// GET    /mine              -> my_donations
/// GET    /{id}              -> get_donation
/// GET    /{id}/status       -> item_status
/// POST   /{id}/reserve      -> reserve
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(donations::list_donations).post(donations::submit_donation),
        )
        .route("/mine", get(donations::my_donations))
        .route("/{id}", get(donations::get_donation))
        .route("/{id}/status", get(donations::item_status))
        .route("/{id}/reserve", post(donations::reserve))
}
