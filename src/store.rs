//! In-memory marketplace state with wholesale JSON snapshots.

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::listings::{boost, BoostError};
use crate::models::{Agent, Message, Property, Review, SavedProperty, User};
use crate::sources::seed;

/// Everything the marketplace persists
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketData {
    pub properties: Vec<Property>,
    pub agents: Vec<Agent>,
    pub users: Vec<User>,
    #[serde(default)]
    pub saved_properties: Vec<SavedProperty>,
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl MarketData {
    /// Given listings plus the bundled agents and accounts
    pub fn with_properties(properties: Vec<Property>) -> Self {
        Self {
            properties,
            agents: seed::agents(),
            users: seed::users(),
            saved_properties: Vec::new(),
            messages: Vec::new(),
        }
    }
}

/// Shared marketplace state. Every mutation rewrites the snapshot file, if
/// one is configured.
pub struct MarketStore {
    data: RwLock<MarketData>,
    snapshot_path: Option<PathBuf>,
    /// Listings with a paid boost in flight
    pending_boosts: Mutex<HashSet<String>>,
}

/// Exclusive right to boost one listing while its payment is taken.
/// Dropping the claim without completing it releases the listing.
pub struct BoostClaim<'a> {
    store: &'a MarketStore,
    property: Property,
}

impl BoostClaim<'_> {
    pub fn property(&self) -> &Property {
        &self.property
    }

    /// Mark the listing boosted
    pub async fn complete(self) -> Result<Option<Property>> {
        self.store.set_boosted(&self.property.id, Some(true)).await
    }
}

impl Drop for BoostClaim<'_> {
    fn drop(&mut self) {
        self.store
            .pending_boosts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(&self.property.id);
    }
}

impl MarketStore {
    pub fn new(data: MarketData, snapshot_path: Option<PathBuf>) -> Self {
        Self {
            data: RwLock::new(data),
            snapshot_path,
            pending_boosts: Mutex::new(HashSet::new()),
        }
    }

    /// Read a snapshot written by a previous run, if there is one
    pub async fn restore(path: &Path) -> Result<Option<MarketData>> {
        if !tokio::fs::try_exists(path)
            .await
            .with_context(|| format!("Failed to stat {}", path.display()))?
        {
            return Ok(None);
        }

        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let data: MarketData = serde_json::from_str(&raw)
            .with_context(|| format!("Corrupt snapshot {}", path.display()))?;

        info!(
            "💾 Restored {} listings, {} agents and {} messages from {}",
            data.properties.len(),
            data.agents.len(),
            data.messages.len(),
            path.display()
        );
        Ok(Some(data))
    }

    async fn persist(&self, data: &MarketData) -> Result<()> {
        let Some(path) = &self.snapshot_path else {
            return Ok(());
        };

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }

        // written beside the snapshot so the rename never crosses filesystems
        let staging = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(data).context("Failed to encode snapshot")?;
        tokio::fs::write(&staging, json)
            .await
            .with_context(|| format!("Failed to write {}", staging.display()))?;
        tokio::fs::rename(&staging, path)
            .await
            .with_context(|| format!("Failed to replace {}", path.display()))?;
        debug!("Saved snapshot to {}", path.display());
        Ok(())
    }

    /// Apply `change` to a copy under the write lock. The copy only replaces
    /// the live state once the snapshot is saved.
    async fn mutate<T>(&self, change: impl FnOnce(&mut MarketData) -> T) -> Result<T> {
        let mut data = self.data.write().await;
        let mut next = data.clone();
        let outcome = change(&mut next);
        self.persist(&next).await?;
        *data = next;
        Ok(outcome)
    }

    // ---- properties ----

    pub async fn properties(&self) -> Vec<Property> {
        self.data.read().await.properties.clone()
    }

    pub async fn property(&self, id: &str) -> Option<Property> {
        self.data
            .read()
            .await
            .properties
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    /// Newest listings go first
    pub async fn insert_property(&self, property: Property) -> Result<Property> {
        self.mutate(|data| {
            data.properties.insert(0, property.clone());
            property
        })
        .await
    }

    /// Replace an existing listing; `None` if the id is unknown
    pub async fn replace_property(&self, property: Property) -> Result<Option<Property>> {
        self.mutate(|data| {
            let slot = data.properties.iter_mut().find(|p| p.id == property.id)?;
            *slot = property.clone();
            Some(property)
        })
        .await
    }

    /// Set (or, with `None`, flip) the boost flag of one listing
    pub async fn set_boosted(&self, id: &str, value: Option<bool>) -> Result<Option<Property>> {
        self.mutate(|data| {
            data.properties = match value {
                Some(value) => boost::set_boosted(&data.properties, id, value),
                None => boost::toggle_boost(&data.properties, id),
            };
            data.properties.iter().find(|p| p.id == id).cloned()
        })
        .await
    }

    /// Reserve `id` for a paid boost. Fails if the listing is unknown,
    /// already boosted, or another purchase for it is in flight.
    pub async fn claim_boost(&self, id: &str) -> Result<BoostClaim<'_>, BoostError> {
        let data = self.data.read().await;
        let property = data
            .properties
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| BoostError::NotFound(id.to_string()))?;
        if property.is_boosted {
            return Err(BoostError::AlreadyBoosted(id.to_string()));
        }

        let fresh = self
            .pending_boosts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(id.to_string());
        if !fresh {
            return Err(BoostError::AlreadyBoosted(id.to_string()));
        }

        Ok(BoostClaim {
            store: self,
            property: property.clone(),
        })
    }

    // ---- agents and users ----

    pub async fn agents(&self) -> Vec<Agent> {
        self.data.read().await.agents.clone()
    }

    pub async fn agent(&self, id: &str) -> Option<Agent> {
        self.data
            .read()
            .await
            .agents
            .iter()
            .find(|a| a.id == id)
            .cloned()
    }

    pub async fn replace_agent(&self, agent: Agent) -> Result<Option<Agent>> {
        self.mutate(|data| {
            let slot = data.agents.iter_mut().find(|a| a.id == agent.id)?;
            *slot = agent.clone();
            Some(agent)
        })
        .await
    }

    pub async fn add_review(&self, agent_id: &str, review: Review) -> Result<Option<Agent>> {
        self.mutate(|data| {
            let agent = data.agents.iter_mut().find(|a| a.id == agent_id)?;
            agent.add_review(review);
            Some(agent.clone())
        })
        .await
    }

    pub async fn user(&self, id: &str) -> Option<User> {
        self.data
            .read()
            .await
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
    }

    // ---- saved properties ----

    /// A user's bookmarks joined with the listings they point at
    pub async fn saved_properties(&self, user_id: &str) -> Vec<(SavedProperty, Property)> {
        let data = self.data.read().await;
        data.saved_properties
            .iter()
            .filter(|s| s.user_id == user_id)
            .filter_map(|s| {
                data.properties
                    .iter()
                    .find(|p| p.id == s.property_id)
                    .map(|p| (s.clone(), p.clone()))
            })
            .collect()
    }

    /// Bookmark a listing. Saving twice returns the existing bookmark with
    /// `false`.
    pub async fn save_property(&self, user_id: &str, property_id: &str) -> Result<(SavedProperty, bool)> {
        self.mutate(|data| {
            if let Some(existing) = data
                .saved_properties
                .iter()
                .find(|s| s.user_id == user_id && s.property_id == property_id)
            {
                return (existing.clone(), false);
            }

            let saved = SavedProperty {
                id: Uuid::new_v4().to_string(),
                user_id: user_id.to_string(),
                property_id: property_id.to_string(),
                created_at: Utc::now(),
            };
            data.saved_properties.push(saved.clone());
            (saved, true)
        })
        .await
    }

    /// Remove a bookmark; returns how many were removed
    pub async fn unsave_property(&self, user_id: &str, property_id: &str) -> Result<usize> {
        self.mutate(|data| {
            let before = data.saved_properties.len();
            data.saved_properties
                .retain(|s| !(s.user_id == user_id && s.property_id == property_id));
            before - data.saved_properties.len()
        })
        .await
    }

    // ---- messages ----

    /// Both directions of a conversation, oldest first
    pub async fn conversation(&self, user_id: &str, other_id: &str) -> Vec<Message> {
        let data = self.data.read().await;
        let mut messages: Vec<Message> = data
            .messages
            .iter()
            .filter(|m| {
                (m.sender_id == user_id && m.receiver_id == other_id)
                    || (m.sender_id == other_id && m.receiver_id == user_id)
            })
            .cloned()
            .collect();
        messages.sort_by_key(|m| m.timestamp);
        messages
    }

    pub async fn push_message(&self, message: Message) -> Result<Message> {
        self.mutate(|data| {
            data.messages.push(message.clone());
            message
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn store() -> MarketStore {
        MarketStore::new(MarketData::with_properties(seed::properties()), None)
    }

    fn message(id: &str, from: &str, to: &str, minutes_ago: i64) -> Message {
        Message {
            id: id.to_string(),
            sender_id: from.to_string(),
            sender_name: from.to_string(),
            receiver_id: to.to_string(),
            content: format!("message {}", id),
            timestamp: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    #[tokio::test]
    async fn new_listings_are_prepended() {
        let store = store();
        let mut property = seed::properties().remove(1);
        property.id = "new".to_string();
        store.insert_property(property).await.unwrap();
        assert_eq!(store.properties().await[0].id, "new");
    }

    #[tokio::test]
    async fn replacing_unknown_listing_is_none() {
        let store = store();
        let mut property = seed::properties().remove(0);
        property.id = "ghost".to_string();
        assert!(store.replace_property(property).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn boost_set_and_toggle() {
        let store = store();
        let set = store.set_boosted("2", Some(true)).await.unwrap().unwrap();
        assert!(set.is_boosted);
        let toggled = store.set_boosted("2", None).await.unwrap().unwrap();
        assert!(!toggled.is_boosted);
        assert!(store.set_boosted("ghost", Some(true)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn boost_claim_is_exclusive_until_released() {
        let store = store();

        let claim = store.claim_boost("2").await.unwrap();
        assert_eq!(claim.property().id, "2");
        assert_eq!(
            store.claim_boost("2").await.err(),
            Some(BoostError::AlreadyBoosted("2".to_string()))
        );

        drop(claim);
        let claim = store.claim_boost("2").await.unwrap();
        assert!(claim.complete().await.unwrap().unwrap().is_boosted);
        assert_eq!(
            store.claim_boost("2").await.err(),
            Some(BoostError::AlreadyBoosted("2".to_string()))
        );

        assert_eq!(
            store.claim_boost("1").await.err(),
            Some(BoostError::AlreadyBoosted("1".to_string()))
        );
        assert_eq!(
            store.claim_boost("ghost").await.err(),
            Some(BoostError::NotFound("ghost".to_string()))
        );
    }

    #[tokio::test]
    async fn failed_snapshot_leaves_state_untouched() {
        let blocker = std::env::temp_dir().join(format!("realty-hub-blocker-{}", Uuid::new_v4()));
        tokio::fs::write(&blocker, b"not a directory").await.unwrap();

        // the parent "directory" is a regular file, so every write fails
        let store = MarketStore::new(
            MarketData::with_properties(seed::properties()),
            Some(blocker.join("sub").join("marketplace.json")),
        );

        assert!(store.save_property("user_123", "3").await.is_err());
        assert!(store.set_boosted("3", Some(true)).await.is_err());

        assert!(store.saved_properties("user_123").await.is_empty());
        assert!(!store.property("3").await.unwrap().is_boosted);

        tokio::fs::remove_file(&blocker).await.unwrap();
    }

    #[tokio::test]
    async fn saving_is_idempotent() {
        let store = store();
        let (first, created) = store.save_property("user_123", "1").await.unwrap();
        assert!(created);
        let (second, created_again) = store.save_property("user_123", "1").await.unwrap();
        assert!(!created_again);
        assert_eq!(first.id, second.id);

        let saved = store.saved_properties("user_123").await;
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].1.id, "1");

        assert_eq!(store.unsave_property("user_123", "1").await.unwrap(), 1);
        assert_eq!(store.unsave_property("user_123", "1").await.unwrap(), 0);
        assert!(store.saved_properties("user_123").await.is_empty());
    }

    #[tokio::test]
    async fn conversation_includes_both_directions_in_time_order() {
        let store = store();
        store.push_message(message("m2", "u_agent_1", "user_123", 5)).await.unwrap();
        store.push_message(message("m1", "user_123", "u_agent_1", 10)).await.unwrap();
        store.push_message(message("m3", "user_123", "u_agent_2", 1)).await.unwrap();

        let ids: Vec<_> = store
            .conversation("user_123", "u_agent_1")
            .await
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec!["m1", "m2"]);
    }

    #[tokio::test]
    async fn snapshot_survives_restart() {
        let path = std::env::temp_dir()
            .join(format!("realty-hub-store-{}", Uuid::new_v4()))
            .join("marketplace.json");

        assert!(MarketStore::restore(&path).await.unwrap().is_none());

        let store = MarketStore::new(
            MarketData::with_properties(seed::properties()),
            Some(path.clone()),
        );
        store.set_boosted("4", Some(true)).await.unwrap();
        store.save_property("user_123", "4").await.unwrap();

        let restored = MarketStore::restore(&path).await.unwrap().unwrap();
        assert!(restored.properties.iter().any(|p| p.id == "4" && p.is_boosted));
        assert_eq!(restored.saved_properties.len(), 1);
        assert!(!tokio::fs::try_exists(path.with_extension("json.tmp")).await.unwrap());

        if let Some(dir) = path.parent() {
            tokio::fs::remove_dir_all(dir).await.unwrap();
        }
    }
}
