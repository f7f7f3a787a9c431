//! Property-based checks for the listing query engine and loan maths.

use proptest::prelude::*;

use realty_hub::finance::{monthly_payment, sqft_to_sqm, LoanParams};
use realty_hub::listings::{boost, featured, query, FilterSpec};
use realty_hub::models::{Coordinates, ListingStatus, Property, PropertyKind};

fn kind_strategy() -> impl Strategy<Value = PropertyKind> {
    prop_oneof![
        Just(PropertyKind::House),
        Just(PropertyKind::Condo),
        Just(PropertyKind::Apartment),
        Just(PropertyKind::Commercial),
        Just(PropertyKind::Land),
        Just(PropertyKind::Villa),
    ]
}

prop_compose! {
    fn listing(index: usize)(
        price in 0u32..12_000_000,
        bedrooms in 0u32..7,
        kind in kind_strategy(),
        boosted in any::<bool>(),
        city in prop::sample::select(vec!["Dubai", "Paris", "Austin", "Tokyo"]),
    ) -> Property {
        Property {
            id: index.to_string(),
            title: format!("Listing {} in {}", index, city),
            price: f64::from(price),
            location: format!("{}, Somewhere", city),
            country: "Testland".to_string(),
            city: city.to_string(),
            kind,
            bedrooms,
            bathrooms: 1,
            sqft: 1000.0,
            year_built: 2000,
            description: String::new(),
            images: Vec::new(),
            features: Vec::new(),
            agent_id: "a1".to_string(),
            status: ListingStatus::ForSale,
            coordinates: Coordinates::default(),
            amenities: Vec::new(),
            virtual_tour_url: None,
            is_boosted: boosted,
        }
    }
}

fn catalog() -> impl Strategy<Value = Vec<Property>> {
    (0usize..24).prop_flat_map(|len| (0..len).map(listing).collect::<Vec<_>>())
}

fn positions(properties: &[Property]) -> Vec<usize> {
    properties
        .iter()
        .map(|p| p.id.parse::<usize>().unwrap())
        .collect()
}

proptest! {
    #[test]
    fn boosted_come_first_and_order_is_stable(properties in catalog(), min_beds in 0u32..4) {
        let filter = FilterSpec {
            min_bedrooms: Some(min_beds),
            ..FilterSpec::default()
        };
        let results = query(&properties, &filter);

        let boosted_count = results.iter().filter(|p| p.is_boosted).count();
        prop_assert!(results[..boosted_count].iter().all(|p| p.is_boosted));
        prop_assert!(results[boosted_count..].iter().all(|p| !p.is_boosted));

        let boosted = positions(&results[..boosted_count]);
        let regular = positions(&results[boosted_count..]);
        prop_assert!(boosted.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(regular.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn results_are_exactly_the_matching_listings(properties in catalog(), min_price in 0u32..6_000_000) {
        let filter = FilterSpec {
            min_price: f64::from(min_price),
            ..FilterSpec::default()
        };
        let results = query(&properties, &filter);
        let expected = properties.iter().filter(|p| filter.matches(p)).count();

        prop_assert_eq!(results.len(), expected);
        prop_assert!(results.iter().all(|p| filter.matches(p)));
    }

    #[test]
    fn equal_price_bounds_select_that_price(properties in catalog(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!properties.is_empty());
        let price = properties[pick.index(properties.len())].price;
        let filter = FilterSpec {
            min_price: price,
            max_price: price,
            ..FilterSpec::default()
        };

        let results = query(&properties, &filter);
        prop_assert!(!results.is_empty());
        prop_assert!(results.iter().all(|p| p.price == price));
    }

    #[test]
    fn empty_search_matches_like_no_search(properties in catalog()) {
        let without = query(&properties, &FilterSpec::default());
        let with_empty = query(
            &properties,
            &FilterSpec {
                search: Some(String::new()),
                ..FilterSpec::default()
            },
        );
        prop_assert_eq!(without, with_empty);
    }

    #[test]
    fn featured_is_a_prefix_of_the_unfiltered_order(properties in catalog(), limit in 0usize..6) {
        let unbounded = FilterSpec {
            max_price: f64::MAX,
            ..FilterSpec::default()
        };
        let all = query(&properties, &unbounded);
        let top = featured(&properties, limit);
        prop_assert_eq!(&all[..top.len()], &top[..]);
    }

    #[test]
    fn toggling_twice_restores_the_catalog(properties in catalog(), target in 0usize..30) {
        let id = target.to_string();
        let once = boost::toggle_boost(&properties, &id);
        let twice = boost::toggle_boost(&once, &id);
        prop_assert_eq!(&twice, &properties);

        if target >= properties.len() {
            prop_assert_eq!(&once, &properties);
        }
    }

    #[test]
    fn payment_is_finite_and_non_negative(
        price in 0.0f64..20_000_000.0,
        down_share in 0.0f64..1.0,
        rate in 0.0f64..25.0,
        years in 0u32..40,
    ) {
        let payment = monthly_payment(price, price * down_share, rate, years);
        prop_assert!(payment.is_finite());
        prop_assert!(payment >= 0.0);
    }

    #[test]
    fn payments_cover_the_principal(price in 10_000.0f64..5_000_000.0, rate in 0.5f64..15.0) {
        let quote = LoanParams {
            price,
            down_payment: price * 0.2,
            annual_rate_percent: rate,
            term_years: 30,
        }
        .quote();
        prop_assert!(quote.total_paid >= quote.principal - 1e-6);
    }

    #[test]
    fn area_conversion_is_monotonic(a in 0u32..100_000, b in 0u32..100_000) {
        let (small, large) = (a.min(b), a.max(b));
        prop_assert!(sqft_to_sqm(f64::from(small)) <= sqft_to_sqm(f64::from(large)));
    }
}
