//! Bundled demo catalog used when no snapshot or remote source is available.

use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use crate::models::{
    Agent, ConstructionPlan, Coordinates, ListingStatus, PaymentDuration, Property, PropertyKind,
    Review, Role, Socials, User,
};
use crate::sources::traits::PropertySource;

/// Serves the built-in demo listings
pub struct SeedSource;

#[async_trait]
impl PropertySource for SeedSource {
    async fn load(&self) -> Result<Vec<Property>> {
        let properties = properties();
        info!("📋 Loaded {} bundled demo listings", properties.len());
        Ok(properties)
    }

    fn source_name(&self) -> &'static str {
        "seed"
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Demo listings across a handful of markets
pub fn properties() -> Vec<Property> {
    vec![
        Property {
            id: "1".to_string(),
            title: "Modern Luxury Villa in Beverly Hills".to_string(),
            price: 4_500_000.0,
            location: "Beverly Hills, Los Angeles, USA".to_string(),
            country: "United States".to_string(),
            city: "Los Angeles".to_string(),
            kind: PropertyKind::Villa,
            bedrooms: 5,
            bathrooms: 6,
            sqft: 6500.0,
            year_built: 2022,
            description: "This stunning modern masterpiece offers breathtaking city views and the ultimate in luxury living.".to_string(),
            images: strings(&[
                "https://images.unsplash.com/photo-1613490493576-7fde63acd811?auto=format&fit=crop&w=1200",
                "https://images.unsplash.com/photo-1613977257363-707ba9348227?auto=format&fit=crop&w=1200",
            ]),
            features: strings(&["Ocean View", "Smart Home"]),
            agent_id: "a1".to_string(),
            status: ListingStatus::ForSale,
            coordinates: Coordinates { lat: 34.0736, lng: -118.4004 },
            amenities: strings(&["Pool", "Gym", "Home Theater"]),
            virtual_tour_url: None,
            is_boosted: true,
        },
        Property {
            id: "2".to_string(),
            title: "Skyline Penthouse Apartment".to_string(),
            price: 3_200_000.0,
            location: "Upper East Side, New York, USA".to_string(),
            country: "United States".to_string(),
            city: "New York".to_string(),
            kind: PropertyKind::Apartment,
            bedrooms: 3,
            bathrooms: 3,
            sqft: 2800.0,
            year_built: 2019,
            description: "Full-floor penthouse with wraparound terrace and park views.".to_string(),
            images: strings(&[
                "https://images.unsplash.com/photo-1545324418-cc1a3fa10c00?auto=format&fit=crop&w=1200",
            ]),
            features: strings(&["Terrace", "Doorman"]),
            agent_id: "a1".to_string(),
            status: ListingStatus::ForSale,
            coordinates: Coordinates { lat: 40.7736, lng: -73.9566 },
            amenities: strings(&["Concierge", "Gym"]),
            virtual_tour_url: Some("https://tours.example.com/skyline-penthouse".to_string()),
            is_boosted: false,
        },
        Property {
            id: "3".to_string(),
            title: "Marina Heights Residences".to_string(),
            price: 850_000.0,
            location: "Dubai Marina, Dubai, UAE".to_string(),
            country: "United Arab Emirates".to_string(),
            city: "Dubai".to_string(),
            kind: PropertyKind::UnderConstruction(ConstructionPlan {
                apartments: 120,
                down_payment: 85_000.0,
                monthly_installment: 12_750.0,
                payment_duration: PaymentDuration::FiveYears,
            }),
            bedrooms: 2,
            bathrooms: 2,
            sqft: 1400.0,
            year_built: 2027,
            description: "Off-plan waterfront residences with a five-year payment plan.".to_string(),
            images: strings(&[
                "https://images.unsplash.com/photo-1512453979798-5ea266f8880c?auto=format&fit=crop&w=1200",
            ]),
            features: strings(&["Sea View", "Payment Plan"]),
            agent_id: "a2".to_string(),
            status: ListingStatus::ForSale,
            coordinates: Coordinates { lat: 25.0805, lng: 55.1403 },
            amenities: strings(&["Infinity Pool", "Marina Access"]),
            virtual_tour_url: None,
            is_boosted: false,
        },
        Property {
            id: "4".to_string(),
            title: "Charming Kensington Townhouse".to_string(),
            price: 2_750_000.0,
            location: "Kensington, London, UK".to_string(),
            country: "United Kingdom".to_string(),
            city: "London".to_string(),
            kind: PropertyKind::House,
            bedrooms: 4,
            bathrooms: 3,
            sqft: 2400.0,
            year_built: 1890,
            description: "Victorian townhouse restored with a modern rear extension and private garden.".to_string(),
            images: strings(&[
                "https://images.unsplash.com/photo-1513584684374-8bab748fbf90?auto=format&fit=crop&w=1200",
            ]),
            features: strings(&["Garden", "Period Features"]),
            agent_id: "a2".to_string(),
            status: ListingStatus::ForSale,
            coordinates: Coordinates { lat: 51.4991, lng: -0.1938 },
            amenities: strings(&["Wine Cellar"]),
            virtual_tour_url: None,
            is_boosted: false,
        },
        Property {
            id: "5".to_string(),
            title: "Le Marais Loft Condo".to_string(),
            price: 1_180_000.0,
            location: "Le Marais, Paris, France".to_string(),
            country: "France".to_string(),
            city: "Paris".to_string(),
            kind: PropertyKind::Condo,
            bedrooms: 2,
            bathrooms: 1,
            sqft: 1100.0,
            year_built: 1925,
            description: "Exposed-beam loft steps from Place des Vosges.".to_string(),
            images: strings(&[
                "https://images.unsplash.com/photo-1502672260266-1c1ef2d93688?auto=format&fit=crop&w=1200",
            ]),
            features: strings(&["Exposed Beams"]),
            agent_id: "a3".to_string(),
            status: ListingStatus::ForSale,
            coordinates: Coordinates { lat: 48.8590, lng: 2.3620 },
            amenities: strings(&["Elevator"]),
            virtual_tour_url: None,
            is_boosted: false,
        },
        Property {
            id: "6".to_string(),
            title: "Shibuya Studio Apartment".to_string(),
            price: 4_200.0,
            location: "Shibuya, Tokyo, Japan".to_string(),
            country: "Japan".to_string(),
            city: "Tokyo".to_string(),
            kind: PropertyKind::Apartment,
            bedrooms: 1,
            bathrooms: 1,
            sqft: 450.0,
            year_built: 2015,
            description: "Compact furnished studio, monthly rent.".to_string(),
            images: strings(&[
                "https://images.unsplash.com/photo-1540959733332-eab4deabeeaf?auto=format&fit=crop&w=1200",
            ]),
            features: strings(&["Furnished"]),
            agent_id: "a3".to_string(),
            status: ListingStatus::ForRent,
            coordinates: Coordinates { lat: 35.6580, lng: 139.7016 },
            amenities: strings(&["Laundry"]),
            virtual_tour_url: None,
            is_boosted: true,
        },
        Property {
            id: "7".to_string(),
            title: "Miami Beach Retail Corner".to_string(),
            price: 6_900_000.0,
            location: "South Beach, Miami, USA".to_string(),
            country: "United States".to_string(),
            city: "Miami".to_string(),
            kind: PropertyKind::Commercial,
            bedrooms: 0,
            bathrooms: 2,
            sqft: 8000.0,
            year_built: 2008,
            description: "Corner retail unit with long-term anchor tenant.".to_string(),
            images: strings(&[]),
            features: strings(&["Corner Lot"]),
            agent_id: "a1".to_string(),
            status: ListingStatus::Pending,
            coordinates: Coordinates { lat: 25.7826, lng: -80.1341 },
            amenities: strings(&["Parking"]),
            virtual_tour_url: None,
            is_boosted: false,
        },
        Property {
            id: "8".to_string(),
            title: "Lakeside Development Parcel".to_string(),
            price: 1_250_000.0,
            location: "Lake Travis, Austin, USA".to_string(),
            country: "United States".to_string(),
            city: "Austin".to_string(),
            kind: PropertyKind::Land,
            bedrooms: 0,
            bathrooms: 0,
            sqft: 87_120.0,
            year_built: 0,
            description: "Two acres of lakefront land zoned for residential use.".to_string(),
            images: strings(&[]),
            features: strings(&["Lakefront"]),
            agent_id: "a1".to_string(),
            status: ListingStatus::ForSale,
            coordinates: Coordinates { lat: 30.4200, lng: -97.9000 },
            amenities: strings(&[]),
            virtual_tour_url: None,
            is_boosted: false,
        },
        Property {
            id: "9".to_string(),
            title: "Bondi Beachfront Estate".to_string(),
            price: 12_500_000.0,
            location: "Bondi, Sydney, Australia".to_string(),
            country: "Australia".to_string(),
            city: "Sydney".to_string(),
            kind: PropertyKind::Villa,
            bedrooms: 6,
            bathrooms: 7,
            sqft: 9200.0,
            year_built: 2020,
            description: "Direct beach access with panoramic ocean views.".to_string(),
            images: strings(&[]),
            features: strings(&["Beachfront"]),
            agent_id: "a3".to_string(),
            status: ListingStatus::ForSale,
            coordinates: Coordinates { lat: -33.8915, lng: 151.2767 },
            amenities: strings(&["Pool", "Cinema"]),
            virtual_tour_url: None,
            is_boosted: false,
        },
    ]
}

pub fn agents() -> Vec<Agent> {
    vec![
        Agent {
            id: "a1".to_string(),
            user_id: Some("u_agent_1".to_string()),
            name: "Sarah Jenkins".to_string(),
            role: "Principal Broker".to_string(),
            bio: "With over 15 years of experience in the luxury market, I specialize in connecting global investors with exclusive coastal properties.".to_string(),
            company: "Elite Global Realty".to_string(),
            location: "Beverly Hills, CA".to_string(),
            website: "https://sarahjenkins.realty".to_string(),
            experience: "15+ Years".to_string(),
            specialties: strings(&["Luxury Residential", "Waterfront"]),
            image: "https://images.unsplash.com/photo-1573496359142-b8d87734a5a2?auto=format&fit=crop&w=400".to_string(),
            phone: "(555) 123-4567".to_string(),
            email: "sarah@eliterealty.com".to_string(),
            socials: Socials {
                linkedin: Some("#".to_string()),
                ..Default::default()
            },
            rating: 4.9,
            review_count: 1,
            reviews: vec![Review {
                id: "r1".to_string(),
                user_id: "u1".to_string(),
                user_name: "John Doe".to_string(),
                rating: 5,
                comment: "Sarah was incredible! She found us the perfect home in less than a month.".to_string(),
                date: "2023-11-01".to_string(),
            }],
        },
        Agent {
            id: "a2".to_string(),
            user_id: Some("u_agent_2".to_string()),
            name: "Omar Haddad".to_string(),
            role: "Senior Advisor".to_string(),
            bio: "Off-plan and new-build specialist covering the Gulf and London.".to_string(),
            company: "Elite Global Realty".to_string(),
            location: "Dubai, UAE".to_string(),
            website: "https://omarhaddad.realty".to_string(),
            experience: "9 Years".to_string(),
            specialties: strings(&["Off-Plan", "Investment"]),
            image: "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?auto=format&fit=crop&w=400".to_string(),
            phone: "+971 4 555 0199".to_string(),
            email: "omar@eliterealty.com".to_string(),
            socials: Socials::default(),
            rating: 0.0,
            review_count: 0,
            reviews: Vec::new(),
        },
        Agent {
            id: "a3".to_string(),
            user_id: None,
            name: "Claire Dubois".to_string(),
            role: "Associate".to_string(),
            bio: "Helping international buyers find homes in Paris, Tokyo and Sydney.".to_string(),
            company: "Maison Partners".to_string(),
            location: "Paris, France".to_string(),
            website: "https://maisonpartners.example".to_string(),
            experience: "6 Years".to_string(),
            specialties: strings(&["Relocation", "Rentals"]),
            image: "https://images.unsplash.com/photo-1544005313-94ddf0286df2?auto=format&fit=crop&w=400".to_string(),
            phone: "+33 1 55 55 01 23".to_string(),
            email: "claire@maisonpartners.example".to_string(),
            socials: Socials::default(),
            rating: 0.0,
            review_count: 0,
            reviews: Vec::new(),
        },
    ]
}

/// One account per role, plus a second agent login
pub fn users() -> Vec<User> {
    vec![
        User {
            id: "admin_1".to_string(),
            name: "Admin Test".to_string(),
            email: "admin@test.com".to_string(),
            role: Role::Admin,
            agent_id: None,
            image: None,
        },
        User {
            id: "u_agent_1".to_string(),
            name: "Sarah Jenkins".to_string(),
            email: "sarah@eliterealty.com".to_string(),
            role: Role::Agent,
            agent_id: Some("a1".to_string()),
            image: Some("https://images.unsplash.com/photo-1573496359142-b8d87734a5a2?auto=format&fit=crop&w=400".to_string()),
        },
        User {
            id: "u_agent_2".to_string(),
            name: "Omar Haddad".to_string(),
            email: "omar@eliterealty.com".to_string(),
            role: Role::Agent,
            agent_id: Some("a2".to_string()),
            image: None,
        },
        User {
            id: "user_123".to_string(),
            name: "User Test".to_string(),
            email: "user@test.com".to_string(),
            role: Role::User,
            agent_id: None,
            image: Some("https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?auto=format&fit=crop&w=400".to_string()),
        },
    ]
}
