//! Seed-on-empty initialization.

use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::GeoIndice;
use crate::store;

/// Inserts the corpus one record at a time if the store holds no indices.
///
/// Records go through [`store::add`] sequentially with no cross-record
/// transaction, so a mid-sequence failure leaves a partially seeded store.
/// Returns the number of records inserted; zero when the store was already
/// populated.
///
/// Runs once per process start, after schema creation and before the
/// boundary accepts traffic.
pub async fn seed_if_empty(pool: &SqlitePool, corpus: &[GeoIndice]) -> Result<u64> {
    if store::count(pool).await? > 0 {
        return Ok(0);
    }

    let mut inserted = 0u64;
    for indice in corpus {
        store::add(pool, indice).await?;
        inserted += 1;
    }
    Ok(inserted)
}

/// The built-in sample corpus loaded into an empty store.
pub fn initial_corpus() -> Vec<GeoIndice> {
    fn indice(
        country: &str,
        region: &str,
        category: &str,
        content: &str,
        keywords: &[&str],
    ) -> GeoIndice {
        GeoIndice {
            country: country.to_string(),
            region: region.to_string(),
            category: category.to_string(),
            content: content.to_string(),
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
        }
    }

    vec![
        indice(
            "Bulgarie",
            "Europe",
            "Langue",
            "Le bulgare s'écrit en alphabet cyrillique.",
            &["cyrillique", "alphabet", "bulgare"],
        ),
        indice(
            "Brésil",
            "Amérique du Sud",
            "Langue",
            "Le portugais est la langue officielle du Brésil.",
            &["portugais"],
        ),
        indice(
            "Grèce",
            "Europe",
            "Langue",
            "Les panneaux grecs utilisent l'alphabet grec.",
            &["grec", "alphabet", "panneau"],
        ),
        indice(
            "Japon",
            "Asie",
            "Conduite",
            "Au Japon, on conduit à gauche.",
            &["conduite", "gauche", "volant"],
        ),
        indice(
            "Australie",
            "Océanie",
            "Conduite",
            "En Australie, la circulation se fait à gauche.",
            &["conduite", "gauche"],
        ),
        indice(
            "Kenya",
            "Afrique",
            "Plaque",
            "Les plaques d'immatriculation kenyanes commencent par la lettre K.",
            &["plaque", "immatriculation"],
        ),
        indice(
            "Norvège",
            "Europe",
            "Paysage",
            "Les fjords profonds bordés de montagnes sont typiques de la Norvège.",
            &["fjord", "montagne"],
        ),
    ]
}
