use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::finance;

/// Category of a listing, without any per-category payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    House,
    Condo,
    Apartment,
    Commercial,
    Land,
    Villa,
    #[serde(rename = "Under Construction")]
    UnderConstruction,
}

impl PropertyType {
    pub const ALL: [PropertyType; 7] = [
        PropertyType::House,
        PropertyType::Condo,
        PropertyType::Apartment,
        PropertyType::Commercial,
        PropertyType::Land,
        PropertyType::Villa,
        PropertyType::UnderConstruction,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::House => "House",
            PropertyType::Condo => "Condo",
            PropertyType::Apartment => "Apartment",
            PropertyType::Commercial => "Commercial",
            PropertyType::Land => "Land",
            PropertyType::Villa => "Villa",
            PropertyType::UnderConstruction => "Under Construction",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = String;

    /// Accepts the display name in any case, with or without the space in
    /// "Under Construction".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        PropertyType::ALL
            .into_iter()
            .find(|t| t.as_str().replace(' ', "").eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| format!("unknown property type: {}", s))
    }
}

/// Years over which an under-construction unit is paid off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PaymentDuration {
    ThreeYears,
    FourYears,
    FiveYears,
}

impl PaymentDuration {
    pub fn years(&self) -> u8 {
        match self {
            PaymentDuration::ThreeYears => 3,
            PaymentDuration::FourYears => 4,
            PaymentDuration::FiveYears => 5,
        }
    }
}

impl TryFrom<u8> for PaymentDuration {
    type Error = String;

    fn try_from(years: u8) -> Result<Self, Self::Error> {
        match years {
            3 => Ok(PaymentDuration::ThreeYears),
            4 => Ok(PaymentDuration::FourYears),
            5 => Ok(PaymentDuration::FiveYears),
            other => Err(format!("payment duration must be 3, 4 or 5 years, got {}", other)),
        }
    }
}

impl From<PaymentDuration> for u8 {
    fn from(duration: PaymentDuration) -> u8 {
        duration.years()
    }
}

/// Installment plan attached to under-construction listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructionPlan {
    /// Number of units in the development
    pub apartments: u32,
    pub down_payment: f64,
    pub monthly_installment: f64,
    pub payment_duration: PaymentDuration,
}

impl ConstructionPlan {
    /// Sum of all monthly installments over the plan's duration
    pub fn total_installments(&self) -> f64 {
        self.monthly_installment * f64::from(self.payment_duration.years()) * 12.0
    }
}

/// Listing category together with any category-specific data.
///
/// Serialized inline into [`Property`] under the `"type"` key, so only
/// under-construction listings can ever carry installment fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PropertyKind {
    House,
    Condo,
    Apartment,
    Commercial,
    Land,
    Villa,
    #[serde(rename = "Under Construction")]
    UnderConstruction(ConstructionPlan),
}

impl PropertyKind {
    pub fn property_type(&self) -> PropertyType {
        match self {
            PropertyKind::House => PropertyType::House,
            PropertyKind::Condo => PropertyType::Condo,
            PropertyKind::Apartment => PropertyType::Apartment,
            PropertyKind::Commercial => PropertyType::Commercial,
            PropertyKind::Land => PropertyType::Land,
            PropertyKind::Villa => PropertyType::Villa,
            PropertyKind::UnderConstruction(_) => PropertyType::UnderConstruction,
        }
    }
}

/// Market status of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListingStatus {
    #[serde(rename = "For Sale")]
    ForSale,
    #[serde(rename = "For Rent")]
    ForRent,
    Sold,
    Pending,
}

/// Geographic position of a property
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Core property data model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    pub title: String,
    pub price: f64,
    /// Human-readable location line, e.g. "Beverly Hills, Los Angeles, USA"
    pub location: String,
    pub country: String,
    pub city: String,
    #[serde(flatten)]
    pub kind: PropertyKind,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub sqft: f64,
    pub year_built: i32,
    pub description: String,
    pub images: Vec<String>,
    pub features: Vec<String>,
    pub agent_id: String,
    pub status: ListingStatus,
    pub coordinates: Coordinates,
    pub amenities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virtual_tour_url: Option<String>,
    #[serde(default)]
    pub is_boosted: bool,
}

impl Property {
    pub fn property_type(&self) -> PropertyType {
        self.kind.property_type()
    }

    pub fn construction_plan(&self) -> Option<&ConstructionPlan> {
        match &self.kind {
            PropertyKind::UnderConstruction(plan) => Some(plan),
            _ => None,
        }
    }

    /// Floor area in square meters, as shown on listing cards
    pub fn floor_area_sqm(&self) -> f64 {
        finance::sqft_to_sqm(self.sqft)
    }
}

/// A buyer's review of an agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub rating: u8,
    pub comment: String,
    /// Calendar date, YYYY-MM-DD
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Socials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

/// Agent profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub name: String,
    pub role: String,
    pub bio: String,
    pub company: String,
    pub location: String,
    pub website: String,
    pub experience: String,
    pub specialties: Vec<String>,
    pub image: String,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub socials: Socials,
    pub rating: f64,
    pub review_count: u32,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl Agent {
    /// Prepend a review and fold its rating into the running average,
    /// rounded to one decimal.
    pub fn add_review(&mut self, review: Review) {
        let count = f64::from(self.review_count);
        let average = (self.rating * count + f64::from(review.rating)) / (count + 1.0);
        self.rating = (average * 10.0).round() / 10.0;
        self.review_count += 1;
        self.reviews.insert(0, review);
    }
}

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Agent,
    Admin,
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Role::User),
            "agent" => Ok(Role::Agent),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// Marketplace account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Link between a user and a property they bookmarked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedProperty {
    pub id: String,
    pub user_id: String,
    pub property_id: String,
    pub created_at: DateTime<Utc>,
}

/// Direct message between two accounts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    pub sender_name: String,
    pub receiver_id: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn construction_json() -> serde_json::Value {
        json!({
            "id": "7",
            "title": "Marina Heights Tower",
            "price": 850000,
            "location": "Dubai Marina, Dubai, UAE",
            "country": "United Arab Emirates",
            "city": "Dubai",
            "type": "Under Construction",
            "bedrooms": 2,
            "bathrooms": 2,
            "sqft": 1400,
            "yearBuilt": 2027,
            "description": "Off-plan residences.",
            "images": [],
            "features": [],
            "agentId": "a1",
            "status": "For Sale",
            "coordinates": { "lat": 25.08, "lng": 55.14 },
            "amenities": [],
            "apartments": 120,
            "downPayment": 85000,
            "monthlyInstallment": 12750,
            "paymentDuration": 5
        })
    }

    #[test]
    fn construction_plan_is_read_from_flat_fields() {
        let property: Property = serde_json::from_value(construction_json()).unwrap();
        assert_eq!(property.property_type(), PropertyType::UnderConstruction);
        let plan = property.construction_plan().unwrap();
        assert_eq!(plan.apartments, 120);
        assert_eq!(plan.payment_duration, PaymentDuration::FiveYears);
        assert!(!property.is_boosted);
    }

    #[test]
    fn plain_listing_drops_installment_fields() {
        let mut value = construction_json();
        value["type"] = json!("Villa");
        let property: Property = serde_json::from_value(value).unwrap();
        assert_eq!(property.kind, PropertyKind::Villa);

        let out = serde_json::to_value(&property).unwrap();
        assert_eq!(out["type"], "Villa");
        assert!(out.get("downPayment").is_none());
        assert!(out.get("monthlyInstallment").is_none());
    }

    #[test]
    fn rejects_unsupported_payment_duration() {
        let mut value = construction_json();
        value["paymentDuration"] = json!(7);
        assert!(serde_json::from_value::<Property>(value).is_err());
    }

    #[test]
    fn total_installments_covers_whole_duration() {
        let plan = ConstructionPlan {
            apartments: 10,
            down_payment: 50_000.0,
            monthly_installment: 2_000.0,
            payment_duration: PaymentDuration::ThreeYears,
        };
        assert_eq!(plan.total_installments(), 72_000.0);
    }

    #[test]
    fn property_type_parses_loosely() {
        assert_eq!("villa".parse::<PropertyType>(), Ok(PropertyType::Villa));
        assert_eq!(
            "UnderConstruction".parse::<PropertyType>(),
            Ok(PropertyType::UnderConstruction)
        );
        assert_eq!(
            "Under Construction".parse::<PropertyType>(),
            Ok(PropertyType::UnderConstruction)
        );
        assert!("Castle".parse::<PropertyType>().is_err());
    }

    #[test]
    fn review_updates_running_rating() {
        let mut agent: Agent = serde_json::from_value(json!({
            "id": "a1",
            "name": "Sarah Jenkins",
            "role": "Principal Broker",
            "bio": "",
            "company": "Elite Global Realty",
            "location": "Beverly Hills, CA",
            "website": "",
            "experience": "15+ Years",
            "specialties": [],
            "image": "",
            "phone": "",
            "email": "sarah@eliterealty.com",
            "rating": 4.0,
            "reviewCount": 1
        }))
        .unwrap();

        agent.add_review(Review {
            id: "r2".to_string(),
            user_id: "user_123".to_string(),
            user_name: "User Test".to_string(),
            rating: 3,
            comment: "Slow to respond.".to_string(),
            date: "2024-01-02".to_string(),
        });

        assert_eq!(agent.review_count, 2);
        assert_eq!(agent.rating, 3.5);
        assert_eq!(agent.reviews[0].id, "r2");
    }
}
