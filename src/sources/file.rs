use crate::models::Property;
use crate::sources::traits::PropertySource;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::info;

/// Reads a JSON array of listings from disk, e.g. an export of
/// `GET /api/properties`
pub struct FilePropertySource {
    path: PathBuf,
}

impl FilePropertySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PropertySource for FilePropertySource {
    async fn load(&self) -> Result<Vec<Property>> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path.display()))?;

        let properties: Vec<Property> = serde_json::from_str(&raw)
            .with_context(|| format!("Malformed listings in {}", self.path.display()))?;

        info!(
            "💾 Loaded {} listings from {}",
            properties.len(),
            self.path.display()
        );
        Ok(properties)
    }

    fn source_name(&self) -> &'static str {
        "file"
    }
}
