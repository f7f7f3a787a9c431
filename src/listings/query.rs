use tracing::debug;

use crate::listings::types::FilterSpec;
use crate::models::Property;

/// Order properties boosted-first, keeping input order inside each group
pub fn boosted_first(properties: &[Property]) -> Vec<&Property> {
    let mut ranked: Vec<&Property> = properties.iter().collect();
    // sort_by_key is stable; `false` sorts before `true`
    ranked.sort_by_key(|property| !property.is_boosted);
    ranked
}

/// Run a search over a fully materialized listing set.
///
/// Boosted listings come first, then every active constraint in `filter`
/// must hold. There is no pagination and no secondary ordering.
pub fn query(properties: &[Property], filter: &FilterSpec) -> Vec<Property> {
    let results: Vec<Property> = boosted_first(properties)
        .into_iter()
        .filter(|property| filter.matches(property))
        .cloned()
        .collect();

    debug!(
        "Listing query matched {} of {} properties",
        results.len(),
        properties.len()
    );

    results
}

/// The first `limit` listings in boosted-first order, unfiltered
pub fn featured(properties: &[Property], limit: usize) -> Vec<Property> {
    boosted_first(properties)
        .into_iter()
        .take(limit)
        .cloned()
        .collect()
}
