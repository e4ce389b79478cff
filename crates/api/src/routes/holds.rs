//! Route definitions for holds.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::holds;
use crate::state::AppState;

/// Hold routes mounted at `/holds`.
///
/// ```text
/// GET    /mine                 -> my_holds
/// GET    /outgoing             -> outgoing_holds
/// GET    /{id}                 -> get_hold
/// POST   /{id}/confirm         -> confirm
/// POST   /{id}/cancel          -> cancel
/// GET    /{id}/participants    -> participants
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/mine", get(holds::my_holds))
        .route("/outgoing", get(holds::outgoing_holds))
        .route("/{id}", get(holds::get_hold))
        .route("/{id}/confirm", post(holds::confirm))
        .route("/{id}/cancel", post(holds::cancel))
        .route("/{id}/participants", get(holds::participants))
}
