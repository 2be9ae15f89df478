//! Repository over the indice tables.
//!
//! All functions operate on a shared [`SqlitePool`]; atomicity and isolation
//! are the store's responsibility and nothing here adds locks or retries.
//! Reads are single-statement scans plus keyword resolution; [`add`] runs in
//! one transaction. Storage failures propagate unmodified.

use rand::Rng;
use sqlx::SqlitePool;

use crate::error::{Error, Result};
use crate::models::{GeoIndice, IndiceFilter};

type IndiceRow = (i64, String, String, String, String);

/// Total number of stored indices.
pub async fn count(pool: &SqlitePool) -> Result<i64> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM indice")
        .fetch_one(pool)
        .await?;
    Ok(total)
}

/// All indices in insertion order, each with its resolved keyword set.
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<GeoIndice>> {
    let rows: Vec<IndiceRow> =
        sqlx::query_as("SELECT id, country, region, category, content FROM indice ORDER BY id")
            .fetch_all(pool)
            .await?;

    resolve_keywords(pool, rows).await
}

/// The subset of [`get_all`] matching every supplied filter.
///
/// Field filters match case-insensitively as substrings of their column;
/// `query` matches against the content or any attached keyword. The scalar
/// scan is one dynamically composed SELECT; absent filters add no clause.
pub async fn get_filtered(pool: &SqlitePool, filter: &IndiceFilter) -> Result<Vec<GeoIndice>> {
    let mut sql = String::from("SELECT id, country, region, category, content FROM indice");
    let mut clauses: Vec<&str> = Vec::new();
    let mut binds: Vec<String> = Vec::new();

    if let Some(country) = &filter.country {
        clauses.push("instr(lower(country), ?) > 0");
        binds.push(country.to_lowercase());
    }
    if let Some(region) = &filter.region {
        clauses.push("instr(lower(region), ?) > 0");
        binds.push(region.to_lowercase());
    }
    if let Some(category) = &filter.category {
        clauses.push("instr(lower(category), ?) > 0");
        binds.push(category.to_lowercase());
    }
    if let Some(query) = &filter.query {
        clauses.push(
            "(instr(lower(content), ?) > 0 OR EXISTS (\
             SELECT 1 FROM indice_keyword ik \
             JOIN keyword k ON k.id = ik.keyword_id \
             WHERE ik.indice_id = indice.id AND instr(lower(k.keyword), ?) > 0))",
        );
        let needle = query.to_lowercase();
        binds.push(needle.clone());
        binds.push(needle);
    }

    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    sql.push_str(" ORDER BY id");

    let mut query = sqlx::query_as::<_, IndiceRow>(&sql);
    for bind in &binds {
        query = query.bind(bind);
    }
    let rows = query.fetch_all(pool).await?;

    resolve_keywords(pool, rows).await
}

/// One uniformly sampled indice, or `None` on an empty store.
///
/// Count-then-fetch at a random OFFSET. The two statements do not share a
/// transaction, so a concurrent write between them can bias or invalidate
/// the sample; `fetch_optional` absorbs a table that shrank in between.
pub async fn get_random(pool: &SqlitePool) -> Result<Option<GeoIndice>> {
    let total = count(pool).await?;
    if total == 0 {
        return Ok(None);
    }

    let offset = rand::thread_rng().gen_range(0..total);
    let row: Option<IndiceRow> = sqlx::query_as(
        "SELECT id, country, region, category, content FROM indice ORDER BY id LIMIT 1 OFFSET ?",
    )
    .bind(offset)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => Ok(resolve_keywords(pool, vec![row]).await?.pop()),
        None => Ok(None),
    }
}

/// Inserts an indice and its keyword associations in one transaction.
///
/// Each keyword string reuses the existing row on an exact, case-sensitive
/// match, otherwise inserts a new one, then links it. All steps commit or
/// none do. Returns the generated indice id.
pub async fn add(pool: &SqlitePool, indice: &GeoIndice) -> Result<i64> {
    validate(indice)?;

    let mut tx = pool.begin().await?;

    let indice_id =
        sqlx::query("INSERT INTO indice (country, region, category, content) VALUES (?, ?, ?, ?)")
            .bind(&indice.country)
            .bind(&indice.region)
            .bind(&indice.category)
            .bind(&indice.content)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

    for keyword in &indice.keywords {
        let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM keyword WHERE keyword = ?")
            .bind(keyword)
            .fetch_optional(&mut *tx)
            .await?;

        let keyword_id = match existing {
            Some(id) => id,
            None => sqlx::query("INSERT INTO keyword (keyword) VALUES (?)")
                .bind(keyword)
                .execute(&mut *tx)
                .await?
                .last_insert_rowid(),
        };

        // OR IGNORE collapses a keyword repeated within one payload
        sqlx::query("INSERT OR IGNORE INTO indice_keyword (indice_id, keyword_id) VALUES (?, ?)")
            .bind(indice_id)
            .bind(keyword_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(indice_id)
}

/// Rejects an indice with a missing scalar field before any write.
fn validate(indice: &GeoIndice) -> Result<()> {
    for (field, value) in [
        ("country", &indice.country),
        ("region", &indice.region),
        ("category", &indice.category),
        ("content", &indice.content),
    ] {
        if value.trim().is_empty() {
            return Err(Error::Validation(format!("{field} must not be empty")));
        }
    }
    Ok(())
}

async fn keywords_for(pool: &SqlitePool, indice_id: i64) -> Result<Vec<String>> {
    let keywords = sqlx::query_scalar(
        "SELECT k.keyword FROM keyword k \
         JOIN indice_keyword ik ON ik.keyword_id = k.id \
         WHERE ik.indice_id = ?",
    )
    .bind(indice_id)
    .fetch_all(pool)
    .await?;
    Ok(keywords)
}

async fn resolve_keywords(pool: &SqlitePool, rows: Vec<IndiceRow>) -> Result<Vec<GeoIndice>> {
    let mut out = Vec::with_capacity(rows.len());
    for (id, country, region, category, content) in rows {
        let keywords = keywords_for(pool, id).await?;
        out.push(GeoIndice {
            country,
            region,
            category,
            content,
            keywords,
        });
    }
    Ok(out)
}
