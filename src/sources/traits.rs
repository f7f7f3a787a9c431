use crate::models::Property;
use anyhow::Result;
use async_trait::async_trait;

/// Common trait for everything that can supply the full listing set.
/// The marketplace store is seeded from exactly one source at startup.
#[async_trait]
pub trait PropertySource: Send + Sync {
    /// Load every property the source knows about
    async fn load(&self) -> Result<Vec<Property>>;

    /// Get the name of the source, for logs
    fn source_name(&self) -> &'static str;
}
