//! REST surface for the marketplace

pub mod error;
pub mod handlers;
pub mod models;
pub mod state;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use state::AppState;

/// Build the application router with tracing and CORS middleware
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(handlers::health))
        // Listings
        .route(
            "/api/properties",
            get(handlers::list_properties).post(handlers::create_property),
        )
        .route(
            "/api/properties/:id",
            get(handlers::get_property).put(handlers::update_property),
        )
        .route("/api/properties/:id/mortgage", get(handlers::property_mortgage))
        .route("/api/properties/:id/boost", post(handlers::purchase_boost))
        .route("/api/listings/search", get(handlers::search_listings))
        .route("/api/listings/featured", get(handlers::featured_listings))
        .route("/api/calculator/mortgage", get(handlers::mortgage_calculator))
        // Agents
        .route("/api/agents", get(handlers::list_agents))
        .route(
            "/api/agents/:id",
            get(handlers::get_agent).put(handlers::update_agent),
        )
        .route("/api/agents/:id/reviews", post(handlers::add_review))
        // Users
        .route("/api/profiles/:id", get(handlers::get_profile))
        .route(
            "/api/users/:user_id/saved-properties",
            get(handlers::list_saved).post(handlers::save_property),
        )
        .route(
            "/api/users/:user_id/saved-properties/:property_id",
            delete(handlers::unsave_property),
        )
        .route(
            "/api/messages",
            get(handlers::list_messages).post(handlers::send_message),
        )
        // Assistant
        .route("/api/chat", post(handlers::chat))
        .route("/api/recommendations", post(handlers::recommendations))
        // Admin
        .route("/api/admin/stats", get(handlers::admin_stats))
        .route("/api/admin/properties/:id/boost", put(handlers::admin_set_boost))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
