//! Read-only access to the `approved_catalog` table.

use shelfshare_core::barcode::CatalogKey;
use sqlx::PgPool;

use crate::models::catalog::CatalogEntry;

/// Column list for `approved_catalog` queries.
const COLUMNS: &str = "\
    id, barcode_number, barcode_text, title, author, grade, subject, \
    publisher, approval_number, created_at";

/// Lookups against the approved catalog. The catalog is never written here.
pub struct CatalogRepo;

impl CatalogRepo {
    /// Find the first entry matching `key` exactly.
    ///
    /// `Numeric` keys compare against `barcode_number`, `Text` keys against
    /// `barcode_text`. Ties resolve to the lowest id.
    pub async fn find_by_key(
        pool: &PgPool,
        key: &CatalogKey,
    ) -> Result<Option<CatalogEntry>, sqlx::Error> {
        match key {
            CatalogKey::Numeric(n) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM approved_catalog \
                     WHERE barcode_number = $1 ORDER BY id LIMIT 1"
                );
                sqlx::query_as::<_, CatalogEntry>(&query)
                    .bind(n)
                    .fetch_optional(pool)
                    .await
            }
            CatalogKey::Text(s) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM approved_catalog \
                     WHERE barcode_text = $1 ORDER BY id LIMIT 1"
                );
                sqlx::query_as::<_, CatalogEntry>(&query)
                    .bind(s)
                    .fetch_optional(pool)
                    .await
            }
        }
    }

    /// Try each key in order; the first hit wins.
    pub async fn find_first(
        pool: &PgPool,
        keys: &[CatalogKey],
    ) -> Result<Option<CatalogEntry>, sqlx::Error> {
        for key in keys {
            if let Some(entry) = Self::find_by_key(pool, key).await? {
                return Ok(Some(entry));
            }
        }
        Ok(None)
    }
}
