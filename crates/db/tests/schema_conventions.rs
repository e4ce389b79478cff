//! Schema checks the repositories and error mapping depend on.

use sqlx::PgPool;

/// All `id` columns must be bigint.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_pks_are_bigint(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, data_type
         FROM information_schema.columns
         WHERE column_name = 'id'
           AND table_schema = 'public'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert_eq!(rows.len(), 3, "expected approved_catalog, donated_items, holds");
    for (table, data_type) in &rows {
        assert_eq!(data_type, "bigint", "Table {table}.id should be bigint");
    }
}

/// Every table must have `created_at` as timestamptz.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_tables_have_created_at(pool: PgPool) {
    let rows: Vec<(String, Option<String>)> = sqlx::query_as(
        "SELECT t.table_name, c.data_type::TEXT
         FROM information_schema.tables t
         LEFT JOIN information_schema.columns c
           ON c.table_schema = t.table_schema
          AND c.table_name = t.table_name
          AND c.column_name = 'created_at'
         WHERE t.table_schema = 'public'
           AND t.table_type = 'BASE TABLE'
           AND t.table_name != '_sqlx_migrations'
         ORDER BY t.table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    for (table, data_type) in &rows {
        assert_eq!(
            data_type.as_deref(),
            Some("timestamp with time zone"),
            "Table {table} should have created_at TIMESTAMPTZ"
        );
    }
}

/// The one-hold-per-item backstop must keep the `uq_` prefix so a violation
/// maps to 409 rather than 500.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_hold_source_item_is_unique(pool: PgPool) {
    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS (
             SELECT 1 FROM information_schema.table_constraints
             WHERE table_name = 'holds'
               AND constraint_type = 'UNIQUE'
               AND constraint_name = 'uq_holds_source_item_id'
         )",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    assert!(exists);
}
