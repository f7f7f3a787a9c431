use crate::models::Property;
use crate::sources::traits::PropertySource;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Pulls the listing set from a JSON list endpoint (`GET /api/properties`
/// on another marketplace node, or any service returning the same shape)
pub struct RestPropertySource {
    client: Client,
    url: String,
}

impl RestPropertySource {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("realty-hub/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl PropertySource for RestPropertySource {
    async fn load(&self) -> Result<Vec<Property>> {
        info!("Fetching listings from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .context("Failed to reach property source")?;

        if !response.status().is_success() {
            warn!("Property source returned status: {}", response.status());
            anyhow::bail!("Property source returned {}", response.status());
        }

        let body = response
            .text()
            .await
            .context("Failed to read response body")?;
        debug!("Downloaded {} bytes of listings", body.len());

        let properties: Vec<Property> =
            serde_json::from_str(&body).context("Property source returned malformed listings")?;

        info!("✅ Fetched {} listings", properties.len());
        Ok(properties)
    }

    fn source_name(&self) -> &'static str {
        "rest"
    }
}
