use serde::{Deserialize, Serialize};

use crate::models::{Property, PropertyType};

pub const DEFAULT_MIN_PRICE: f64 = 0.0;
pub const DEFAULT_MAX_PRICE: f64 = 10_000_000.0;

/// Search constraints applied to the listing collection.
///
/// Every `None` (and the default price bounds) means "match all" for that
/// dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    /// Exact listing type, `None` for all types
    pub property_type: Option<PropertyType>,
    /// Exact country, compared ignoring case
    pub country: Option<String>,
    /// Substring of the city, compared ignoring case
    pub city: Option<String>,
    /// Inclusive lower price bound
    pub min_price: f64,
    /// Inclusive upper price bound
    pub max_price: f64,
    /// Minimum number of bedrooms
    pub min_bedrooms: Option<u32>,
    /// Substring of the title or the location line
    pub search: Option<String>,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            property_type: None,
            country: None,
            city: None,
            min_price: DEFAULT_MIN_PRICE,
            max_price: DEFAULT_MAX_PRICE,
            min_bedrooms: None,
            search: None,
        }
    }
}

impl FilterSpec {
    /// Whether a single property satisfies every active constraint
    pub fn matches(&self, property: &Property) -> bool {
        let type_ok = self
            .property_type
            .map_or(true, |wanted| property.property_type() == wanted);

        let country_ok = active(&self.country)
            .map_or(true, |country| property.country.to_lowercase() == country.to_lowercase());

        let city_ok = active(&self.city).map_or(true, |city| contains_ignore_case(&property.city, city));

        let price_ok = property.price >= self.min_price && property.price <= self.max_price;

        let beds_ok = self
            .min_bedrooms
            .map_or(true, |beds| property.bedrooms >= beds);

        let search_ok = active(&self.search).map_or(true, |text| {
            contains_ignore_case(&property.title, text)
                || contains_ignore_case(&property.location, text)
        });

        type_ok && country_ok && city_ok && price_ok && beds_ok && search_ok
    }
}

/// Raw query-string form of a [`FilterSpec`], as sent by the listings page
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterQuery {
    #[serde(rename = "type")]
    pub property_type: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub beds: Option<String>,
    pub search: Option<String>,
}

impl From<FilterQuery> for FilterSpec {
    /// Malformed or placeholder values ("All", "", unknown types, bad
    /// numbers) drop the constraint instead of failing the request.
    fn from(query: FilterQuery) -> Self {
        Self {
            property_type: meaningful(query.property_type).and_then(|t| t.parse().ok()),
            country: meaningful(query.country),
            city: meaningful(query.city),
            min_price: parse_price(query.min_price).unwrap_or(DEFAULT_MIN_PRICE),
            max_price: parse_price(query.max_price).unwrap_or(DEFAULT_MAX_PRICE),
            min_bedrooms: meaningful(query.beds).and_then(|b| b.parse().ok()),
            search: meaningful(query.search),
        }
    }
}

fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn meaningful(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
}

// zero counts as "unset", matching how the listings page reads its URL
fn parse_price(value: Option<String>) -> Option<f64> {
    meaningful(value)
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|p| p.is_finite() && *p != 0.0)
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_become_match_all() {
        let spec = FilterSpec::from(FilterQuery {
            property_type: Some("All".to_string()),
            country: Some("".to_string()),
            city: Some("  ".to_string()),
            min_price: Some("cheap".to_string()),
            max_price: Some("0".to_string()),
            beds: Some("All".to_string()),
            search: None,
        });
        assert_eq!(spec, FilterSpec::default());
    }

    #[test]
    fn unknown_type_fails_open() {
        let spec = FilterSpec::from(FilterQuery {
            property_type: Some("Castle".to_string()),
            ..Default::default()
        });
        assert_eq!(spec.property_type, None);
    }

    #[test]
    fn parses_populated_query() {
        let spec = FilterSpec::from(FilterQuery {
            property_type: Some("Under Construction".to_string()),
            country: Some("United Arab Emirates".to_string()),
            city: Some("dub".to_string()),
            min_price: Some("250000".to_string()),
            max_price: Some("2000000".to_string()),
            beds: Some("3".to_string()),
            search: Some("marina".to_string()),
        });

        assert_eq!(spec.property_type, Some(PropertyType::UnderConstruction));
        assert_eq!(spec.country.as_deref(), Some("United Arab Emirates"));
        assert_eq!(spec.city.as_deref(), Some("dub"));
        assert_eq!(spec.min_price, 250_000.0);
        assert_eq!(spec.max_price, 2_000_000.0);
        assert_eq!(spec.min_bedrooms, Some(3));
        assert_eq!(spec.search.as_deref(), Some("marina"));
    }

    #[test]
    fn deserializes_from_query_string_keys() {
        let query: FilterQuery =
            serde_json::from_str(r#"{"type":"Villa","minPrice":"10","beds":"2"}"#).unwrap();
        let spec = FilterSpec::from(query);
        assert_eq!(spec.property_type, Some(PropertyType::Villa));
        assert_eq!(spec.min_price, 10.0);
        assert_eq!(spec.min_bedrooms, Some(2));
    }
}
