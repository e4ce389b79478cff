//! Eligibility gate: normalized barcode against the approved catalog.

use shelfshare_core::barcode;
use shelfshare_core::eligibility::{ApprovedTitle, Eligibility};
use shelfshare_db::repositories::CatalogRepo;
use sqlx::PgPool;

use crate::retry::with_store_retry;

/// Normalize `raw` and look it up, numeric key first, then text key.
///
/// Returns the normalized key alongside the decision. The lookup is a
/// read, so transient store errors are retried up to `attempts` times.
pub async fn check(
    pool: &PgPool,
    raw: &str,
    attempts: u32,
) -> Result<(String, Eligibility), sqlx::Error> {
    let key = barcode::normalize(raw);
    let plan = barcode::lookup_keys(raw);

    let hit = with_store_retry(attempts, || CatalogRepo::find_first(pool, &plan)).await?;
    let decision = Eligibility::decide(hit.map(ApprovedTitle::from));

    tracing::debug!(
        barcode_key = %key,
        approved = decision.is_approved(),
        "Eligibility checked"
    );
    Ok((key, decision))
}
