use serde::Serialize;
use thiserror::Error;

use crate::models::Property;
use crate::session::Session;

/// Flat fee charged for boosting one listing, in USD
pub const BOOST_FEE_USD: u32 = 49;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoostError {
    #[error("Property not found: {0}")]
    NotFound(String),

    #[error("Only an admin or the listing agent can change boost state")]
    Forbidden,

    #[error("Property {0} is already boosted")]
    AlreadyBoosted(String),
}

/// Return a copy of `properties` with the boost flag of `property_id` set
/// to `value`. Unknown ids leave the list unchanged.
pub fn set_boosted(properties: &[Property], property_id: &str, value: bool) -> Vec<Property> {
    properties
        .iter()
        .map(|property| {
            if property.id == property_id {
                Property {
                    is_boosted: value,
                    ..property.clone()
                }
            } else {
                property.clone()
            }
        })
        .collect()
}

/// Flip the boost flag of `property_id`. Unknown ids are a no-op.
pub fn toggle_boost(properties: &[Property], property_id: &str) -> Vec<Property> {
    match properties.iter().find(|p| p.id == property_id) {
        Some(property) => set_boosted(properties, property_id, !property.is_boosted),
        None => properties.to_vec(),
    }
}

/// Check that `session` may change the boost state of `property`
pub fn authorize(session: &Session, property: &Property) -> Result<(), BoostError> {
    if session.can_manage(property) {
        Ok(())
    } else {
        Err(BoostError::Forbidden)
    }
}

/// Boost figures for the admin dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoostStats {
    pub total_listings: usize,
    pub boosted_listings: usize,
    pub boost_fee: u32,
    pub boost_revenue: u64,
}

impl BoostStats {
    pub fn collect(properties: &[Property]) -> Self {
        let boosted_listings = properties.iter().filter(|p| p.is_boosted).count();
        Self {
            total_listings: properties.len(),
            boosted_listings,
            boost_fee: BOOST_FEE_USD,
            boost_revenue: boosted_listings as u64 * u64::from(BOOST_FEE_USD),
        }
    }
}
