//! Route definitions for admin maintenance.

use axum::routing::post;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Admin routes mounted at `/admin`.
///
/// ```text
/// POST   /holds/sweep       -> run_sweep
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/holds/sweep", post(admin::run_sweep))
}
