//! Idempotent schema creation.

use sqlx::SqlitePool;

use crate::error::{Error, Result};

/// Creates the indice tables and the keyword index if they are absent.
///
/// Safe to call on every process start. A DDL failure maps to
/// [`Error::Schema`] and aborts startup; there is no partial-schema
/// recovery.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<()> {
    // One row per logical indice, keywords excluded
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS indice (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            country TEXT NOT NULL,
            region TEXT NOT NULL,
            category TEXT NOT NULL,
            content TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(Error::Schema)?;

    // Globally deduplicated keyword texts (exact, case-sensitive)
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS keyword (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            keyword TEXT NOT NULL UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(Error::Schema)?;

    // Many-to-many join; cascades on deletion of either parent
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS indice_keyword (
            indice_id INTEGER NOT NULL REFERENCES indice(id) ON DELETE CASCADE,
            keyword_id INTEGER NOT NULL REFERENCES keyword(id) ON DELETE CASCADE,
            PRIMARY KEY (indice_id, keyword_id)
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(Error::Schema)?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_keyword_keyword ON keyword(keyword)")
        .execute(pool)
        .await
        .map_err(Error::Schema)?;

    Ok(())
}
