use crate::assistant::prompts;
use crate::assistant::{Assistant, Recommendation, EMPTY_REPLY};
use crate::models::Property;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const RECOMMENDATION_MODEL: &str = "gemini-2.5-flash";

/// Google Gemini over its public REST API
pub struct GeminiAssistant {
    client: Client,
    api_key: Option<String>,
    chat_model: String,
    base_url: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateResponse {
    fn text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

impl GeminiAssistant {
    /// Without an API key every call fails and callers fall back
    pub fn new(api_key: Option<String>, chat_model: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key,
            chat_model: chat_model.into(),
            base_url: API_BASE.to_string(),
        })
    }

    /// Point at a different API root, e.g. a local proxy
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn generate(&self, model: &str, body: Value) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .context("Missing GEMINI_API_KEY or API_KEY")?;

        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        debug!("Calling {}", url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .context("Failed to reach Gemini")?;

        if !response.status().is_success() {
            warn!("Gemini returned status: {}", response.status());
            anyhow::bail!("Gemini returned {}", response.status());
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .context("Failed to decode Gemini response")?;
        Ok(parsed.text())
    }
}

#[async_trait]
impl Assistant for GeminiAssistant {
    async fn chat(&self, message: &str, context: Option<&str>) -> Result<String> {
        let body = json!({
            "systemInstruction": {
                "parts": [{ "text": prompts::chat_system_instruction(context) }]
            },
            "contents": [{ "role": "user", "parts": [{ "text": message }] }]
        });

        let reply = self.generate(&self.chat_model, body).await?;
        if reply.trim().is_empty() {
            Ok(EMPTY_REPLY.to_string())
        } else {
            Ok(reply)
        }
    }

    async fn recommend(
        &self,
        preferences: &str,
        properties: &[Property],
    ) -> Result<Vec<Recommendation>> {
        let body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompts::recommendation_prompt(preferences, properties)? }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": prompts::recommendation_schema()
            }
        });

        let text = self.generate(RECOMMENDATION_MODEL, body).await?;
        prompts::parse_recommendations(&text, properties)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_key_fails_without_network() {
        let assistant = GeminiAssistant::new(None, "gemini-2.5-flash-lite").unwrap();
        let err = assistant.chat("Hi", None).await.unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn joins_text_parts_of_first_candidate() {
        let response: GenerateResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "Hello " }, { "text": "there" }] } },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        }))
        .unwrap();
        assert_eq!(response.text(), "Hello there");

        let empty: GenerateResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty.text(), "");
    }
}
