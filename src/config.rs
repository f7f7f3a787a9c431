//! Runtime configuration read from the environment (and `.env`).

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_DATA_FILE: &str = "data/marketplace.json";
pub const DEFAULT_CHAT_MODEL: &str = "gemini-2.5-flash-lite";
pub const DEFAULT_PAYMENT_DELAY_MS: u64 = 2000;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub port: u16,
    /// Snapshot file; `None` keeps everything in memory
    pub data_file: Option<PathBuf>,
    /// URL or path of the initial listing set, used when no snapshot exists
    pub property_source: Option<String>,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: Option<String>,
    pub payment_delay: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_file: Some(PathBuf::from(DEFAULT_DATA_FILE)),
            property_source: None,
            gemini_api_key: None,
            gemini_model: DEFAULT_CHAT_MODEL.to_string(),
            gemini_base_url: None,
            payment_delay: Duration::from_millis(DEFAULT_PAYMENT_DELAY_MS),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    /// `DATA_FILE=none` disables snapshots.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let data_file = match get("DATA_FILE") {
            Some(v) if v.eq_ignore_ascii_case("none") => None,
            Some(v) => Some(PathBuf::from(v)),
            None => defaults.data_file,
        };

        Self {
            port: get("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            data_file,
            property_source: get("PROPERTY_SOURCE"),
            gemini_api_key: get("GEMINI_API_KEY").or_else(|| get("API_KEY")),
            gemini_model: get("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            gemini_base_url: get("GEMINI_BASE_URL"),
            payment_delay: get("PAYMENT_DELAY_MS")
                .and_then(|ms| ms.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.payment_delay),
        }
    }
}
