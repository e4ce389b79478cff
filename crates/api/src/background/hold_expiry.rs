//! Periodic reclamation of expired holds.
//!
//! Every tick, holds whose deadline has passed are moved back into the
//! inventory under their original item id and donor. Runs on its own
//! `tokio::time::interval`, independent of request handling.

use std::time::Duration;

use chrono::Utc;
use shelfshare_core::sweep::{clamp_batch_size, SweepReport};
use shelfshare_core::types::Timestamp;
use shelfshare_db::repositories::HoldRepo;
use sqlx::PgPool;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::config::SweepConfig;

/// Run the hold expiry loop until `cancel` is triggered.
pub async fn run(pool: PgPool, config: SweepConfig, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = config.interval_secs,
        batch_size = config.batch_size,
        "Hold expiry sweeper started"
    );

    let mut interval = tokio::time::interval(Duration::from_secs(config.interval_secs));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Hold expiry sweeper stopping");
                break;
            }
            _ = interval.tick() => {
                match sweep_once(&pool, Utc::now(), config.batch_size).await {
                    Ok(report) if report.is_idle() => {
                        tracing::debug!("Hold expiry: nothing to reclaim");
                    }
                    Ok(report) => {
                        tracing::info!(
                            scanned = report.scanned,
                            expired = report.expired,
                            skipped = report.skipped,
                            failed = report.failed,
                            "Hold expiry: pass complete"
                        );
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Hold expiry: listing expired holds failed");
                    }
                }
            }
        }
    }
}

/// Run one sweep pass at `now` over every hold expired by then.
///
/// Expired holds are read in pages of `batch_size`, keyed on
/// `(expires_at, id)`, so each hold is attempted at most once per pass. A
/// failure to expire one hold is logged and counted; the pass continues
/// with the rest. A hold that is already gone (confirmed, cancelled, or
/// reclaimed by an overlapping pass) counts as skipped.
pub async fn sweep_once(
    pool: &PgPool,
    now: Timestamp,
    batch_size: i64,
) -> Result<SweepReport, sqlx::Error> {
    let batch_size = clamp_batch_size(batch_size);
    let mut report = SweepReport::default();
    let mut cursor = None;

    loop {
        let page = HoldRepo::list_expired(pool, now, cursor, batch_size).await?;
        report.scanned += page.len();

        for entry in &page {
            let hold_id = entry.id;
            match HoldRepo::expire(pool, hold_id, now).await {
                Ok(Some(released)) => {
                    report.expired += 1;
                    tracing::debug!(
                        hold_id,
                        item_id = released.item.id,
                        holder_id = released.hold.holder_id,
                        "Hold expired"
                    );
                }
                Ok(None) => report.skipped += 1,
                Err(e) => {
                    report.failed += 1;
                    tracing::error!(hold_id, error = %e, "Hold expiry: failed to expire hold");
                }
            }
        }

        // `batch_size` is clamped to a small positive range.
        if page.len() < batch_size as usize {
            return Ok(report);
        }
        cursor = page.last().copied();
    }
}
