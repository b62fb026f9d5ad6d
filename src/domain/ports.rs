use super::pricing::Totals;
use super::transaction::{PayerType, PaymentMethod, Transaction};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// What the gateway is asked to charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    pub totals: Totals,
    pub method: PaymentMethod,
    pub payer: PayerType,
}

/// Gateway acknowledgement of a completed charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReceipt {
    pub reference: String,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn charge(&self, request: PaymentRequest) -> Result<PaymentReceipt>;
}

#[async_trait]
pub trait TransactionHistory: Send + Sync {
    async fn record(&self, tx: Transaction) -> Result<()>;
    async fn all(&self) -> Result<Vec<Transaction>>;
}

/// Text-generation service behind the support assistant.
#[async_trait]
pub trait AssistantBackend: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

pub type PaymentGatewayRef = Arc<dyn PaymentGateway>;
pub type TransactionHistoryBox = Box<dyn TransactionHistory>;
pub type AssistantBackendBox = Box<dyn AssistantBackend>;
