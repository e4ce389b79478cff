//! Shared fixtures for repository integration tests.

#![allow(dead_code)]

use shelfshare_db::models::donated_item::{CreateDonatedItem, DonatedItem};
use shelfshare_db::repositories::DonatedItemRepo;
use sqlx::PgPool;

pub const DONOR: i64 = 100;
pub const REQUESTER: i64 = 200;
pub const OTHER_REQUESTER: i64 = 300;

/// Insert a catalog entry the way the external registry would.
pub async fn seed_catalog(
    pool: &PgPool,
    barcode_number: Option<i64>,
    barcode_text: Option<&str>,
    title: &str,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO approved_catalog (barcode_number, barcode_text, title, author, grade, subject) \
         VALUES ($1, $2, $3, 'Author', '7', 'math') RETURNING id",
    )
    .bind(barcode_number)
    .bind(barcode_text)
    .bind(title)
    .fetch_one(pool)
    .await
    .expect("catalog seed should succeed")
}

pub fn new_item(owner_id: i64, title: &str) -> CreateDonatedItem {
    CreateDonatedItem {
        owner_id,
        title: title.to_string(),
        author: "Levi".to_string(),
        grade: "7".to_string(),
        barcode_key: "12345678".to_string(),
        condition: "good".to_string(),
        subject: Some("math".to_string()),
    }
}

pub async fn donate(pool: &PgPool, owner_id: i64, title: &str) -> DonatedItem {
    DonatedItemRepo::insert(pool, &new_item(owner_id, title))
        .await
        .expect("insert should succeed")
}
