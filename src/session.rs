//! Request-scoped caller identity.
//!
//! Authentication itself lives in front of this service; whatever performs
//! it forwards the caller as `x-user-id`, `x-user-role` and (for agents)
//! `x-agent-id` headers.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::models::{Property, Role};

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";
pub const AGENT_ID_HEADER: &str = "x-agent-id";

/// The caller of a single request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: String,
    pub role: Role,
    pub agent_id: Option<String>,
}

impl Session {
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            role,
            agent_id: None,
        }
    }

    pub fn agent(user_id: impl Into<String>, agent_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            role: Role::Agent,
            agent_id: Some(agent_id.into()),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// True when the caller is the agent with the given id
    pub fn acts_as_agent(&self, agent_id: &str) -> bool {
        self.role == Role::Agent && self.agent_id.as_deref() == Some(agent_id)
    }

    /// Admins manage everything; agents manage their own listings
    pub fn can_manage(&self, property: &Property) -> bool {
        self.is_admin() || self.acts_as_agent(&property.agent_id)
    }

    /// Admins may act for any user; everyone else only for themselves
    pub fn can_act_for(&self, user_id: &str) -> bool {
        self.is_admin() || self.user_id == user_id
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        let user_id = header(USER_ID_HEADER).ok_or(ApiError::Unauthorized)?;
        let role = match header(USER_ROLE_HEADER) {
            Some(raw) => raw.parse::<Role>().map_err(ApiError::InvalidRequest)?,
            None => Role::User,
        };
        let agent_id = header(AGENT_ID_HEADER);

        if role == Role::Agent && agent_id.is_none() {
            return Err(ApiError::InvalidRequest(format!(
                "{} is required for agent sessions",
                AGENT_ID_HEADER
            )));
        }

        Ok(Session {
            user_id,
            role,
            agent_id,
        })
    }
}
