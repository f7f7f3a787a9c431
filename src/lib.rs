//! Realty Hub: listing search, boosts, financing maths and the REST API
//! behind the marketplace frontend.

pub mod api;
pub mod assistant;
pub mod config;
pub mod finance;
pub mod listings;
pub mod models;
pub mod payments;
pub mod session;
pub mod sources;
pub mod store;
