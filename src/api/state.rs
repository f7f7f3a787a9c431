//! Application state shared across handlers

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use crate::assistant::{Assistant, GeminiAssistant};
use crate::config::AppConfig;
use crate::payments::{PaymentProcessor, SimulatedCheckout};
use crate::sources;
use crate::store::{MarketData, MarketStore};

pub struct AppState {
    pub store: MarketStore,
    pub payments: Arc<dyn PaymentProcessor>,
    pub assistant: Arc<dyn Assistant>,
}

impl AppState {
    /// Restore the last snapshot, or seed a fresh marketplace from the
    /// configured property source
    pub async fn new(config: &AppConfig) -> Result<Self> {
        let restored = match &config.data_file {
            Some(path) => MarketStore::restore(path).await?,
            None => None,
        };

        let data = match restored {
            Some(data) => data,
            None => {
                let source = sources::from_location(config.property_source.as_deref())?;
                info!("No snapshot found, seeding from {} source", source.source_name());
                MarketData::with_properties(sources::load_or_seed(source.as_ref()).await)
            }
        };

        let mut gemini = GeminiAssistant::new(config.gemini_api_key.clone(), &config.gemini_model)?;
        if let Some(base_url) = &config.gemini_base_url {
            gemini = gemini.with_base_url(base_url);
        }
        if config.gemini_api_key.is_none() {
            info!("GEMINI_API_KEY not set, assistant replies will use the fallback text");
        }

        Ok(Self {
            store: MarketStore::new(data, config.data_file.clone()),
            payments: Arc::new(SimulatedCheckout::new(config.payment_delay)),
            assistant: Arc::new(gemini),
        })
    }

    pub fn with_parts(
        store: MarketStore,
        payments: Arc<dyn PaymentProcessor>,
        assistant: Arc<dyn Assistant>,
    ) -> Self {
        Self {
            store,
            payments,
            assistant,
        }
    }
}
