//! Route definitions for the approved catalog.

use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Catalog routes mounted at `/catalog`.
///
/// ```text
/// GET    /barcode/{raw}     -> check_barcode
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/barcode/{raw}", get(catalog::check_barcode))
}
