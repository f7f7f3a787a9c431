//! Checkout collaborator for paid listing boosts.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

/// Proof that a charge went through
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    pub id: String,
    pub amount_usd: u32,
    pub description: String,
    pub paid_at: DateTime<Utc>,
}

#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Charge `amount_usd` for the given purchase description
    async fn charge(&self, amount_usd: u32, description: &str) -> Result<PaymentReceipt>;
}

/// Accepts every charge after a fixed processing delay
pub struct SimulatedCheckout {
    delay: Duration,
}

impl SimulatedCheckout {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl PaymentProcessor for SimulatedCheckout {
    async fn charge(&self, amount_usd: u32, description: &str) -> Result<PaymentReceipt> {
        tokio::time::sleep(self.delay).await;

        let receipt = PaymentReceipt {
            id: Uuid::new_v4().to_string(),
            amount_usd,
            description: description.to_string(),
            paid_at: Utc::now(),
        };
        info!("💳 Charged ${} for {} ({})", amount_usd, description, receipt.id);
        Ok(receipt)
    }
}
