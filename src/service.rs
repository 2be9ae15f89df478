//! Thin orchestration façade between the boundary layers and the store.

use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::{GeoIndice, IndiceFilter};
use crate::store;

/// Pure delegation to the repository for the CLI and HTTP boundaries.
///
/// The only behavior added here is normalizing empty-string filter values to
/// absent; everything else passes straight through and no state is held
/// beyond the pool handle.
#[derive(Clone)]
pub struct QueryService {
    pool: SqlitePool,
}

impl QueryService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_all(&self) -> Result<Vec<GeoIndice>> {
        store::get_all(&self.pool).await
    }

    pub async fn list_filtered(&self, filter: IndiceFilter) -> Result<Vec<GeoIndice>> {
        store::get_filtered(&self.pool, &normalize(filter)).await
    }

    pub async fn get_random_one(&self) -> Result<Option<GeoIndice>> {
        store::get_random(&self.pool).await
    }

    pub async fn add_one(&self, indice: &GeoIndice) -> Result<i64> {
        store::add(&self.pool, indice).await
    }

    pub async fn count(&self) -> Result<i64> {
        store::count(&self.pool).await
    }
}

/// An empty or whitespace-only filter value imposes no constraint.
fn normalize(filter: IndiceFilter) -> IndiceFilter {
    fn supplied(value: Option<String>) -> Option<String> {
        value.filter(|v| !v.trim().is_empty())
    }

    IndiceFilter {
        country: supplied(filter.country),
        region: supplied(filter.region),
        category: supplied(filter.category),
        query: supplied(filter.query),
    }
}
