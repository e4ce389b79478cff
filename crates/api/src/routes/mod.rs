pub mod admin;
pub mod catalog;
pub mod donations;
pub mod health;
pub mod holds;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /catalog/barcode/{raw}                   eligibility check (public)
///
/// /donations                               list (public), submit (auth)
/// /donations/mine                          caller's available donations
/// /donations/{id}                          get (public)
/// /donations/{id}/status                   available / held (public)
/// /donations/{id}/reserve                  reserve (POST, auth)
///
/// /holds/mine                              holds taken by the caller
/// /holds/outgoing                          holds on the caller's donations
/// /holds/{id}                              get (holder, donor, admin)
/// /holds/{id}/confirm                      confirm pickup (POST, holder, admin)
/// /holds/{id}/cancel                       cancel (POST, holder, donor, admin)
/// /holds/{id}/participants                 chat handoff ids
///
/// /admin/holds/sweep                       run an expiry pass now (POST, admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/catalog", catalog::router())
        .nest("/donations", donations::router())
        .nest("/holds", holds::router())
        .nest("/admin", admin::router())
}
