//! Core data types for the indice store.
//!
//! These types cross the CLI and HTTP boundaries; persistence splits a
//! [`GeoIndice`] across the `indice`, `keyword`, and `indice_keyword` tables
//! and the generated row ids never leave the store layer.

use serde::{Deserialize, Serialize};

/// One geography tip: the country it helps recognize, the region it belongs
/// to, a category ("Langue", "Conduite", ...), free-text content, and the
/// search keywords attached to it.
///
/// Keyword list order is not guaranteed to round-trip through the store:
/// retrieval follows the join, not insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoIndice {
    pub country: String,
    pub region: String,
    pub category: String,
    pub content: String,
    pub keywords: Vec<String>,
}

/// Optional predicates for [`crate::store::get_filtered`].
///
/// Supplied fields match case-insensitively as substrings of the
/// corresponding column; `query` matches against the content or any
/// keyword. All supplied filters combine with AND; an absent filter imposes
/// no constraint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IndiceFilter {
    pub country: Option<String>,
    pub region: Option<String>,
    pub category: Option<String>,
    pub query: Option<String>,
}

impl IndiceFilter {
    /// True when no predicate is supplied at all.
    pub fn is_empty(&self) -> bool {
        self.country.is_none()
            && self.region.is_none()
            && self.category.is_none()
            && self.query.is_none()
    }
}
