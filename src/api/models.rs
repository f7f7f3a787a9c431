//! Request and response bodies for the marketplace API

use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::assistant::Recommendation;
use crate::finance::{self, LoanParams};
use crate::listings::FilterSpec;
use crate::models::{
    Agent, Coordinates, ListingStatus, Property, PropertyKind, SavedProperty, Socials, User,
};
use crate::payments::PaymentReceipt;

const PLACEHOLDER_IMAGE: &str =
    "https://images.unsplash.com/photo-1512917774080-9991f1c4c750?auto=format&fit=crop&w=1200";
const DEFAULT_FEATURE: &str = "Global Luxury Design";
const DEFAULT_AMENITY: &str = "Verified Asset";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// Listing as submitted from the agent dashboard.
///
/// Floor area may be given in square meters (`sqm`, converted) or square
/// feet (`sqft`). Fields that are omitted keep their previous value when
/// editing, or get listing defaults when creating.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDraft {
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub location: Option<String>,
    pub country: String,
    pub city: String,
    #[serde(flatten)]
    pub kind: PropertyKind,
    pub bedrooms: u32,
    pub bathrooms: u32,
    #[serde(default)]
    pub sqm: Option<f64>,
    #[serde(default)]
    pub sqft: Option<f64>,
    pub year_built: i32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub features: Option<Vec<String>>,
    #[serde(default)]
    pub amenities: Option<Vec<String>>,
    #[serde(default)]
    pub status: Option<ListingStatus>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub virtual_tour_url: Option<String>,
    /// Only honoured for admins creating on an agent's behalf
    #[serde(default)]
    pub agent_id: Option<String>,
}

impl PropertyDraft {
    /// Turn the draft into a stored listing. `existing` is the listing being
    /// edited, whose boost flag and unset fields carry over.
    pub fn into_property(
        self,
        id: String,
        agent_id: String,
        existing: Option<&Property>,
    ) -> Result<Property, ApiError> {
        if self.title.trim().is_empty() {
            return Err(ApiError::InvalidRequest("title is required".to_string()));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ApiError::InvalidRequest(
                "price must be a non-negative number".to_string(),
            ));
        }

        let sqft = match (self.sqm, self.sqft, existing) {
            (Some(sqm), _, _) => finance::sqm_to_sqft(sqm),
            (None, Some(sqft), _) => sqft,
            (None, None, Some(previous)) => previous.sqft,
            (None, None, None) => {
                return Err(ApiError::InvalidRequest(
                    "floor area (sqm or sqft) is required".to_string(),
                ))
            }
        };

        let location = self
            .location
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| format!("{}, {}", self.city, self.country));

        let images = if self.images.is_empty() {
            vec![PLACEHOLDER_IMAGE.to_string()]
        } else {
            self.images
        };

        let features = self
            .features
            .or_else(|| existing.map(|p| p.features.clone()))
            .unwrap_or_else(|| vec![DEFAULT_FEATURE.to_string()]);
        let amenities = self
            .amenities
            .or_else(|| existing.map(|p| p.amenities.clone()))
            .unwrap_or_else(|| vec![DEFAULT_AMENITY.to_string()]);

        Ok(Property {
            id,
            title: self.title,
            price: self.price,
            location,
            country: self.country,
            city: self.city,
            kind: self.kind,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            sqft,
            year_built: self.year_built,
            description: self.description,
            images,
            features,
            agent_id,
            status: self
                .status
                .or(existing.map(|p| p.status))
                .unwrap_or(ListingStatus::ForSale),
            coordinates: self
                .coordinates
                .or(existing.map(|p| p.coordinates))
                .unwrap_or_default(),
            amenities,
            virtual_tour_url: self
                .virtual_tour_url
                .or_else(|| existing.and_then(|p| p.virtual_tour_url.clone())),
            is_boosted: existing.map_or(false, |p| p.is_boosted),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub filters: FilterSpec,
    pub total: usize,
    pub properties: Vec<Property>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FeaturedQuery {
    pub limit: Option<usize>,
}

/// Optional calculator inputs; anything omitted uses listing defaults
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MortgageQuery {
    pub price: Option<f64>,
    pub down_payment: Option<f64>,
    pub rate: Option<f64>,
    pub years: Option<u32>,
}

impl MortgageQuery {
    pub fn params(&self, price: f64) -> Result<LoanParams, ApiError> {
        let defaults = LoanParams::for_price(price);
        let term_years = self.years.unwrap_or(defaults.term_years);
        if term_years > finance::MAX_TERM_YEARS {
            return Err(ApiError::InvalidRequest(format!(
                "years must be at most {}",
                finance::MAX_TERM_YEARS
            )));
        }

        Ok(LoanParams {
            price,
            down_payment: self.down_payment.unwrap_or(defaults.down_payment),
            annual_rate_percent: self.rate.unwrap_or(defaults.annual_rate_percent),
            term_years,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct BoostRequest {
    /// `None` (or an empty request body) flips the current state
    #[serde(default)]
    pub boosted: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct BoostPurchase {
    pub receipt: PaymentReceipt,
    pub property: Property,
}

#[derive(Debug, Serialize)]
pub struct AgentDetail {
    #[serde(flatten)]
    pub agent: Agent,
    pub properties: Vec<Property>,
}

/// Editable parts of an agent profile
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentProfileUpdate {
    pub name: Option<String>,
    pub role: Option<String>,
    pub bio: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub experience: Option<String>,
    pub specialties: Option<Vec<String>>,
    pub image: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub socials: Option<Socials>,
}

impl AgentProfileUpdate {
    pub fn apply(self, agent: &mut Agent) {
        if let Some(v) = self.name {
            agent.name = v;
        }
        if let Some(v) = self.role {
            agent.role = v;
        }
        if let Some(v) = self.bio {
            agent.bio = v;
        }
        if let Some(v) = self.company {
            agent.company = v;
        }
        if let Some(v) = self.location {
            agent.location = v;
        }
        if let Some(v) = self.website {
            agent.website = v;
        }
        if let Some(v) = self.experience {
            agent.experience = v;
        }
        if let Some(v) = self.specialties {
            agent.specialties = v;
        }
        if let Some(v) = self.image {
            agent.image = v;
        }
        if let Some(v) = self.phone {
            agent.phone = v;
        }
        if let Some(v) = self.email {
            agent.email = v;
        }
        if let Some(v) = self.socials {
            agent.socials = v;
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPropertyView {
    #[serde(flatten)]
    pub saved: SavedProperty,
    pub property: Property,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub user: User,
    pub saved_properties: Vec<SavedPropertyView>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequest {
    pub property_id: String,
}

#[derive(Debug, Serialize)]
pub struct StatusMessage {
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationQuery {
    pub user_id: Option<String>,
    pub receiver_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub receiver_id: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: Option<String>,
    pub context: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub preferences: String,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<Recommendation>,
}
