pub mod file;
pub mod remote;
pub mod seed;
pub mod traits;

pub use file::FilePropertySource;
pub use remote::RestPropertySource;
pub use seed::SeedSource;
pub use traits::PropertySource;

use crate::models::Property;
use anyhow::Result;
use tracing::{info, warn};

/// Pick a source for a configured location: http(s) URLs are fetched,
/// anything else is read as a file path, and no location means the
/// bundled catalog.
pub fn from_location(location: Option<&str>) -> Result<Box<dyn PropertySource>> {
    match location {
        Some(url) if url.starts_with("http://") || url.starts_with("https://") => {
            Ok(Box::new(RestPropertySource::new(url)?))
        }
        Some(path) => Ok(Box::new(FilePropertySource::new(path))),
        None => Ok(Box::new(SeedSource)),
    }
}

/// Load from `source`, falling back to the bundled catalog if it fails
pub async fn load_or_seed(source: &dyn PropertySource) -> Vec<Property> {
    match source.load().await {
        Ok(properties) => {
            info!(
                "Loaded {} listings from {} source",
                properties.len(),
                source.source_name()
            );
            properties
        }
        Err(e) => {
            warn!(
                "{} source unavailable ({:#}), using bundled listings",
                source.source_name(),
                e
            );
            seed::properties()
        }
    }
}
