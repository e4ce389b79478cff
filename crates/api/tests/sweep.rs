//! Integration tests for the hold expiry sweeper.

mod common;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{admin_token, body_json, build_test_app, post_auth, user_token, DONOR, REQUESTER};
use shelfshare_api::background::hold_expiry::sweep_once;
use shelfshare_core::reservation::HOLD_TTL_DAYS;
use shelfshare_core::sweep::SweepReport;
use shelfshare_db::models::donated_item::CreateDonatedItem;
use shelfshare_db::models::hold::{Hold, ReserveOutcome};
use shelfshare_db::repositories::{DonatedItemRepo, HoldRepo};
use sqlx::PgPool;

fn new_item(title: &str) -> CreateDonatedItem {
    CreateDonatedItem {
        owner_id: DONOR,
        title: title.to_string(),
        author: "Cohen".to_string(),
        grade: "10".to_string(),
        barcode_key: "12345678".to_string(),
        condition: "good".to_string(),
        subject: Some("physics".to_string()),
    }
}

/// Create a hold as if it had been reserved `days_ago` days in the past.
async fn hold_reserved_days_ago(pool: &PgPool, title: &str, days_ago: i64) -> Hold {
    let item = DonatedItemRepo::insert(pool, &new_item(title)).await.unwrap();
    let reserved_at = Utc::now() - Duration::days(days_ago);
    let ReserveOutcome::Held(hold) = HoldRepo::reserve(pool, item.id, REQUESTER, reserved_at)
        .await
        .unwrap()
    else {
        panic!("reserve should succeed");
    };
    hold
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn sweep_returns_expired_holds_to_inventory(pool: PgPool) {
    let expired = hold_reserved_days_ago(&pool, "Old Hold", HOLD_TTL_DAYS + 1).await;
    let live = hold_reserved_days_ago(&pool, "Fresh Hold", 1).await;

    let report = sweep_once(&pool, Utc::now(), 100).await.unwrap();
    assert_eq!(
        report,
        SweepReport {
            scanned: 1,
            expired: 1,
            skipped: 0,
            failed: 0
        }
    );

    let restored = DonatedItemRepo::find_by_id(&pool, expired.source_item_id)
        .await
        .unwrap()
        .expect("expired item should be back in the inventory");
    assert_eq!(restored.owner_id, DONOR);
    assert_eq!(restored.title, "Old Hold");
    assert_eq!(restored.created_at, expired.donated_at);

    assert!(HoldRepo::find_by_id(&pool, live.id).await.unwrap().is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn second_sweep_is_idle(pool: PgPool) {
    hold_reserved_days_ago(&pool, "Old Hold", HOLD_TTL_DAYS + 1).await;

    sweep_once(&pool, Utc::now(), 100).await.unwrap();
    let report = sweep_once(&pool, Utc::now(), 100).await.unwrap();
    assert!(report.is_idle());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn sweep_pages_through_every_expired_hold(pool: PgPool) {
    for i in 0..3 {
        hold_reserved_days_ago(&pool, &format!("Old Hold {i}"), HOLD_TTL_DAYS + 1).await;
    }

    let report = sweep_once(&pool, Utc::now(), 2).await.unwrap();
    assert_eq!(report.scanned, 3);
    assert_eq!(report.expired, 3);

    let report = sweep_once(&pool, Utc::now(), 2).await.unwrap();
    assert!(report.is_idle());
}

/// Put a live item in place under a hold's source item id, so returning the
/// hold to the inventory fails on the primary key.
async fn block_source_item(pool: &PgPool, hold: &Hold) {
    sqlx::query(
        "INSERT INTO donated_items (id, owner_id, title, author, grade, barcode_key, condition) \
         VALUES ($1, $2, 'Squatter', 'Nobody', '10', '12345678', 'good')",
    )
    .bind(hold.source_item_id)
    .bind(DONOR)
    .execute(pool)
    .await
    .unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn failing_hold_does_not_block_the_rest(pool: PgPool) {
    let stuck = hold_reserved_days_ago(&pool, "Stuck Hold", HOLD_TTL_DAYS + 2).await;
    block_source_item(&pool, &stuck).await;
    let normal = hold_reserved_days_ago(&pool, "Normal Hold", HOLD_TTL_DAYS + 1).await;

    let report = sweep_once(&pool, Utc::now(), 1).await.unwrap();
    assert_eq!(
        report,
        SweepReport {
            scanned: 2,
            expired: 1,
            skipped: 0,
            failed: 1
        }
    );

    assert!(HoldRepo::find_by_id(&pool, normal.id).await.unwrap().is_none());
    let restored = DonatedItemRepo::find_by_id(&pool, normal.source_item_id)
        .await
        .unwrap()
        .expect("normal hold should be back in the inventory");
    assert_eq!(restored.title, "Normal Hold");

    // The stuck hold is left in place and retried on later passes.
    assert!(HoldRepo::find_by_id(&pool, stuck.id).await.unwrap().is_some());
    let report = sweep_once(&pool, Utc::now(), 1).await.unwrap();
    assert_eq!(report.failed, 1);
    assert_eq!(report.expired, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn overlapping_sweeps_expire_each_hold_once(pool: PgPool) {
    for i in 0..20 {
        hold_reserved_days_ago(&pool, &format!("Old Hold {i}"), HOLD_TTL_DAYS + 1).await;
    }

    let now = Utc::now();
    let (a, b) = tokio::join!(sweep_once(&pool, now, 100), sweep_once(&pool, now, 100));
    let (a, b) = (a.unwrap(), b.unwrap());
    assert_eq!(a.expired + b.expired, 20);
    assert_eq!(a.failed + b.failed, 0);

    let items: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM donated_items")
        .fetch_one(&pool)
        .await
        .unwrap();
    let holds: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM holds")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(items, 20);
    assert_eq!(holds, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn expiry_after_cancel_is_a_no_op(pool: PgPool) {
    let hold = hold_reserved_days_ago(&pool, "Old Hold", HOLD_TTL_DAYS + 1).await;
    HoldRepo::cancel(&pool, hold.id).await.unwrap();

    assert_matches!(HoldRepo::expire(&pool, hold.id, Utc::now()).await, Ok(None));
    let report = sweep_once(&pool, Utc::now(), 100).await.unwrap();
    assert!(report.is_idle());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_can_trigger_sweep(pool: PgPool) {
    hold_reserved_days_ago(&pool, "Old Hold", HOLD_TTL_DAYS + 1).await;
    let app = build_test_app(pool);

    let response = post_auth(app.clone(), "/api/v1/admin/holds/sweep", &user_token(DONOR)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post_auth(app, "/api/v1/admin/holds/sweep", &admin_token()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["expired"], 1);
    assert_eq!(json["data"]["failed"], 0);
}
