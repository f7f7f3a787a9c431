pub mod gemini;
pub mod prompts;

pub use gemini::GeminiAssistant;

use crate::models::Property;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Shown to the user whenever the assistant cannot be reached
pub const CHAT_FALLBACK: &str =
    "I'm sorry, I'm having trouble connecting right now. Please try again later.";

/// Shown when the model answers with nothing
pub const EMPTY_REPLY: &str = "I'm sorry, I couldn't process your request.";

/// A listing the assistant picked for a buyer, with its reasoning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub reason: String,
}

/// Generative-AI helper for buyers
#[async_trait]
pub trait Assistant: Send + Sync {
    /// Answer a free-form real-estate question
    async fn chat(&self, message: &str, context: Option<&str>) -> Result<String>;

    /// Pick the best matches for the stated preferences out of `properties`
    async fn recommend(
        &self,
        preferences: &str,
        properties: &[Property],
    ) -> Result<Vec<Recommendation>>;
}
