use crate::domain::cart::{AccountIdentifier, CartEntry, CartEntryId};
use crate::domain::catalog::Catalog;
use crate::domain::money::Money;
use crate::domain::ports::TransactionHistory;
use crate::domain::transaction::{PayerType, Transaction, TransactionStatus};
use crate::error::{Result, StorefrontError};
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A thread-safe in-memory transaction history.
///
/// Uses `Arc<RwLock<Vec<Transaction>>>` so clones share the same records.
/// Nothing survives the process; every run starts from the seed data.
#[derive(Default, Clone)]
pub struct InMemoryTransactionHistory {
    transactions: Arc<RwLock<Vec<Transaction>>>,
}

impl InMemoryTransactionHistory {
    /// Creates a new, empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a history pre-populated with the demo transactions.
    pub fn seeded(catalog: &Catalog) -> Result<Self> {
        Ok(Self {
            transactions: Arc::new(RwLock::new(mock_transactions(catalog)?)),
        })
    }
}

#[async_trait]
impl TransactionHistory for InMemoryTransactionHistory {
    async fn record(&self, tx: Transaction) -> Result<()> {
        let mut transactions = self.transactions.write().await;
        transactions.push(tx);
        Ok(())
    }

    async fn all(&self) -> Result<Vec<Transaction>> {
        let transactions = self.transactions.read().await;
        Ok(transactions.clone())
    }
}

/// The two demo rows shown on a fresh dashboard.
pub fn mock_transactions(catalog: &Catalog) -> Result<Vec<Transaction>> {
    let entry = |n: u128, plan_id: &str, account: &str| -> Result<CartEntry> {
        let plan = catalog
            .plan(plan_id)
            .ok_or_else(|| StorefrontError::UnknownPlan(plan_id.to_string()))?;
        let provider = catalog
            .provider(&plan.provider_id)
            .ok_or_else(|| StorefrontError::UnknownProvider(plan.provider_id.clone()))?;
        let account = AccountIdentifier::new(account)
            .ok_or_else(|| StorefrontError::ValidationError("empty account".to_string()))?;
        Ok(CartEntry {
            id: CartEntryId(Uuid::from_u128(n)),
            plan: plan.clone(),
            provider: provider.clone(),
            account,
        })
    };
    let date = |y, m, d| {
        NaiveDate::from_ymd_opt(y, m, d)
            .ok_or_else(|| StorefrontError::ValidationError(format!("bad date {y}-{m}-{d}")))
    };

    Ok(vec![
        Transaction {
            id: "TXN-001".to_string(),
            date: date(2023, 10, 25)?,
            items: vec![entry(1, "m2", "0812345678")?],
            total: Money::new(Decimal::from(199)),
            status: TransactionStatus::Success,
            payer: PayerType::Consumer,
            method: None,
        },
        Transaction {
            id: "TXN-002".to_string(),
            date: date(2023, 10, 26)?,
            items: vec![
                entry(2, "m1", "0899999999")?,
                entry(3, "m1", "0877777777")?,
            ],
            total: Money::new(Decimal::from(1500)),
            status: TransactionStatus::Success,
            payer: PayerType::Business,
            method: None,
        },
    ])
}
