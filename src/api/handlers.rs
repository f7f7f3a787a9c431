//! HTTP handlers for the marketplace API

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::models::*;
use crate::api::state::AppState;
use crate::assistant::CHAT_FALLBACK;
use crate::finance::LoanQuote;
use crate::listings::{self, boost, BoostError, BoostStats, FilterQuery, FilterSpec, BOOST_FEE_USD};
use crate::models::{Agent, Message, Property, Review, Role};
use crate::session::Session;

const DEFAULT_FEATURED: usize = 3;

type AppResult<T> = Result<T, ApiError>;

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "API is running",
    })
}

async fn find_property(state: &AppState, id: &str) -> AppResult<Property> {
    state
        .store
        .property(id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Property {}", id)))
}

async fn find_agent(state: &AppState, id: &str) -> AppResult<Agent> {
    state
        .store
        .agent(id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Agent {}", id)))
}

// ---- properties ----

pub async fn list_properties(State(state): State<Arc<AppState>>) -> Json<Vec<Property>> {
    Json(state.store.properties().await)
}

pub async fn get_property(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Json<Property>> {
    Ok(Json(find_property(&state, &id).await?))
}

/// Create a listing. Agents list under their own profile; admins must name
/// the agent.
pub async fn create_property(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(draft): Json<PropertyDraft>,
) -> AppResult<(StatusCode, Json<Property>)> {
    let agent_id = match session.role {
        Role::Agent => session.agent_id.clone().ok_or(ApiError::Unauthorized)?,
        Role::Admin => draft
            .agent_id
            .clone()
            .ok_or_else(|| ApiError::InvalidRequest("agentId is required".to_string()))?,
        Role::User => {
            return Err(ApiError::Forbidden(
                "Only agents can create listings".to_string(),
            ))
        }
    };
    find_agent(&state, &agent_id).await?;

    let property = draft.into_property(Uuid::new_v4().to_string(), agent_id, None)?;
    let property = state.store.insert_property(property).await?;

    info!("Created listing {} for agent {}", property.id, property.agent_id);
    Ok((StatusCode::CREATED, Json(property)))
}

/// Replace a listing's details; boost state and ownership carry over
pub async fn update_property(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
    Json(draft): Json<PropertyDraft>,
) -> AppResult<Json<Property>> {
    let existing = find_property(&state, &id).await?;
    if !session.can_manage(&existing) {
        return Err(ApiError::Forbidden(
            "Only the listing agent or an admin can edit this listing".to_string(),
        ));
    }

    let updated = draft.into_property(existing.id.clone(), existing.agent_id.clone(), Some(&existing))?;
    let updated = state
        .store
        .replace_property(updated)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Property {}", id)))?;

    info!("Updated listing {}", updated.id);
    Ok(Json(updated))
}

pub async fn property_mortgage(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<MortgageQuery>,
) -> AppResult<Json<LoanQuote>> {
    let property = find_property(&state, &id).await?;
    Ok(Json(query.params(property.price)?.quote()))
}

/// Paid boost, bought by the listing's agent
pub async fn purchase_boost(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
) -> AppResult<Json<BoostPurchase>> {
    let property = state
        .store
        .property(&id)
        .await
        .ok_or_else(|| BoostError::NotFound(id.clone()))?;
    boost::authorize(&session, &property)?;

    // held until the flag is set, so concurrent purchases get a conflict
    let claim = state.store.claim_boost(&id).await?;
    let receipt = state
        .payments
        .charge(
            BOOST_FEE_USD,
            &format!("Listing boost: {}", claim.property().title),
        )
        .await?;

    let property = claim
        .complete()
        .await?
        .ok_or_else(|| BoostError::NotFound(id.clone()))?;

    info!("Listing {} boosted by {}", property.id, session.user_id);
    Ok(Json(BoostPurchase { receipt, property }))
}

// ---- search ----

pub async fn search_listings(
    State(state): State<Arc<AppState>>,
    Query(raw): Query<FilterQuery>,
) -> Json<SearchResponse> {
    let filters = FilterSpec::from(raw);
    let properties = listings::query(&state.store.properties().await, &filters);

    Json(SearchResponse {
        filters,
        total: properties.len(),
        properties,
    })
}

pub async fn featured_listings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FeaturedQuery>,
) -> Json<Vec<Property>> {
    let limit = query.limit.unwrap_or(DEFAULT_FEATURED);
    Json(listings::featured(&state.store.properties().await, limit))
}

pub async fn mortgage_calculator(Query(query): Query<MortgageQuery>) -> AppResult<Json<LoanQuote>> {
    let price = query.price.unwrap_or(0.0);
    Ok(Json(query.params(price)?.quote()))
}

// ---- agents ----

pub async fn list_agents(State(state): State<Arc<AppState>>) -> Json<Vec<Agent>> {
    Json(state.store.agents().await)
}

pub async fn get_agent(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Json<AgentDetail>> {
    let agent = find_agent(&state, &id).await?;
    let properties = state
        .store
        .properties()
        .await
        .into_iter()
        .filter(|p| p.agent_id == agent.id)
        .collect();

    Ok(Json(AgentDetail { agent, properties }))
}

pub async fn update_agent(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
    Json(update): Json<AgentProfileUpdate>,
) -> AppResult<Json<Agent>> {
    let mut agent = find_agent(&state, &id).await?;
    if !(session.is_admin() || session.acts_as_agent(&agent.id)) {
        return Err(ApiError::Forbidden(
            "Agents can only edit their own profile".to_string(),
        ));
    }

    update.apply(&mut agent);
    let agent = state
        .store
        .replace_agent(agent)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Agent {}", id)))?;
    Ok(Json(agent))
}

pub async fn add_review(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
    Json(req): Json<ReviewRequest>,
) -> AppResult<(StatusCode, Json<Agent>)> {
    if !(1..=5).contains(&req.rating) {
        return Err(ApiError::InvalidRequest(
            "rating must be between 1 and 5".to_string(),
        ));
    }

    let user_name = state
        .store
        .user(&session.user_id)
        .await
        .map(|u| u.name)
        .unwrap_or_else(|| session.user_id.clone());

    let review = Review {
        id: Uuid::new_v4().to_string(),
        user_id: session.user_id.clone(),
        user_name,
        rating: req.rating,
        comment: req.comment,
        date: Utc::now().format("%Y-%m-%d").to_string(),
    };

    let agent = state
        .store
        .add_review(&id, review)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Agent {}", id)))?;
    Ok((StatusCode::CREATED, Json(agent)))
}

// ---- profiles and saved properties ----

async fn saved_views(state: &AppState, user_id: &str) -> Vec<SavedPropertyView> {
    state
        .store
        .saved_properties(user_id)
        .await
        .into_iter()
        .map(|(saved, property)| SavedPropertyView { saved, property })
        .collect()
}

pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
) -> AppResult<Json<ProfileResponse>> {
    if !session.can_act_for(&id) {
        return Err(ApiError::Forbidden("Not your profile".to_string()));
    }

    let user = state
        .store
        .user(&id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Profile {}", id)))?;
    let saved_properties = saved_views(&state, &id).await;

    Ok(Json(ProfileResponse {
        user,
        saved_properties,
    }))
}

pub async fn list_saved(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<SavedPropertyView>>> {
    if !session.can_act_for(&user_id) {
        return Err(ApiError::Forbidden("Not your saved properties".to_string()));
    }
    Ok(Json(saved_views(&state, &user_id).await))
}

pub async fn save_property(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(user_id): Path<String>,
    Json(req): Json<SaveRequest>,
) -> AppResult<(StatusCode, Json<SavedPropertyView>)> {
    if !session.can_act_for(&user_id) {
        return Err(ApiError::Forbidden("Not your saved properties".to_string()));
    }

    let property = find_property(&state, &req.property_id).await?;
    let (saved, created) = state.store.save_property(&user_id, &property.id).await?;
    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(SavedPropertyView { saved, property })))
}

pub async fn unsave_property(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path((user_id, property_id)): Path<(String, String)>,
) -> AppResult<Json<StatusMessage>> {
    if !session.can_act_for(&user_id) {
        return Err(ApiError::Forbidden("Not your saved properties".to_string()));
    }

    state.store.unsave_property(&user_id, &property_id).await?;
    Ok(Json(StatusMessage {
        message: "Property unsaved successfully".to_string(),
    }))
}

// ---- messages ----

pub async fn list_messages(
    State(state): State<Arc<AppState>>,
    session: Session,
    Query(query): Query<ConversationQuery>,
) -> AppResult<Json<Vec<Message>>> {
    let user_id = query.user_id.unwrap_or_else(|| session.user_id.clone());
    if !session.can_act_for(&user_id) {
        return Err(ApiError::Forbidden("Not your conversation".to_string()));
    }

    Ok(Json(
        state.store.conversation(&user_id, &query.receiver_id).await,
    ))
}

pub async fn send_message(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(req): Json<SendMessageRequest>,
) -> AppResult<(StatusCode, Json<Message>)> {
    let content = req.content.trim();
    if content.is_empty() {
        return Err(ApiError::InvalidRequest("content is required".to_string()));
    }
    if req.receiver_id == session.user_id {
        return Err(ApiError::InvalidRequest(
            "cannot message yourself".to_string(),
        ));
    }

    let sender_name = state
        .store
        .user(&session.user_id)
        .await
        .map(|u| u.name)
        .unwrap_or_else(|| session.user_id.clone());

    let message = state
        .store
        .push_message(Message {
            id: Uuid::new_v4().to_string(),
            sender_id: session.user_id.clone(),
            sender_name,
            receiver_id: req.receiver_id,
            content: content.to_string(),
            timestamp: Utc::now(),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(message)))
}

// ---- assistant ----

pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    let message = req
        .message
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| ApiError::InvalidRequest("message is required".to_string()))?;

    let text = match state
        .assistant
        .chat(&message, req.context.as_deref())
        .await
    {
        Ok(text) => text,
        Err(e) => {
            warn!("Chat assistant failed: {:#}", e);
            CHAT_FALLBACK.to_string()
        }
    };

    Ok(Json(ChatResponse { text }))
}

pub async fn recommendations(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RecommendationRequest>,
) -> Json<RecommendationResponse> {
    let properties = state.store.properties().await;
    let recommendations = match state
        .assistant
        .recommend(&req.preferences, &properties)
        .await
    {
        Ok(picks) => picks,
        Err(e) => {
            warn!("Recommendation assistant failed: {:#}", e);
            Vec::new()
        }
    };

    Json(RecommendationResponse { recommendations })
}

// ---- admin ----

fn require_admin(session: &Session) -> AppResult<()> {
    if session.is_admin() {
        Ok(())
    } else {
        Err(ApiError::Forbidden("Admins only".to_string()))
    }
}

pub async fn admin_stats(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> AppResult<Json<BoostStats>> {
    require_admin(&session)?;
    Ok(Json(BoostStats::collect(&state.store.properties().await)))
}

/// Force a boost on or off; an empty body flips it
pub async fn admin_set_boost(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
    body: Bytes,
) -> AppResult<Json<Property>> {
    require_admin(&session)?;

    let req: BoostRequest = if body.iter().all(u8::is_ascii_whitespace) {
        BoostRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::InvalidRequest(format!("invalid boost body: {}", e)))?
    };

    let property = state
        .store
        .set_boosted(&id, req.boosted)
        .await?
        .ok_or_else(|| BoostError::NotFound(id.clone()))?;

    info!(
        "Admin {} set boost of {} to {}",
        session.user_id, property.id, property.is_boosted
    );
    Ok(Json(property))
}
