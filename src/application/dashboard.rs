use crate::domain::catalog::ServiceCategory;
use crate::domain::money::Money;
use crate::domain::ports::TransactionHistory;
use crate::domain::transaction::{Transaction, TransactionStatus};
use crate::error::Result;
use chrono::{Datelike, Weekday};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Read-only account overview built from the transaction history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardReport {
    /// Sum of successful transaction totals.
    pub total_spend: Money,
    pub transaction_count: usize,
    /// One point per ฿10 of successful spend.
    pub points_earned: u64,
    /// Successful spend per weekday, Monday first.
    pub spend_by_weekday: Vec<(Weekday, Money)>,
    /// Newest first.
    pub recent: Vec<Transaction>,
    /// Purchased entries per category; only filled for the admin view.
    pub category_distribution: Option<Vec<(ServiceCategory, usize)>>,
}

impl DashboardReport {
    pub fn build(transactions: &[Transaction], admin: bool) -> Self {
        let successful = || {
            transactions
                .iter()
                .filter(|t| t.status == TransactionStatus::Success)
        };

        let total_spend: Money = successful().map(|t| t.total).sum();
        let points_earned = (total_spend.value() / Decimal::TEN)
            .floor()
            .to_u64()
            .unwrap_or(0);

        let spend_by_weekday: Vec<(Weekday, Money)> = WEEK
            .iter()
            .map(|day| {
                let spend: Money = successful()
                    .filter(|t| t.date.weekday() == *day)
                    .map(|t| t.total)
                    .sum();
                (*day, spend)
            })
            .collect();

        let mut recent: Vec<Transaction> = transactions.iter().rev().cloned().collect();
        recent.sort_by(|a, b| b.date.cmp(&a.date));

        let category_distribution: Option<Vec<(ServiceCategory, usize)>> = admin.then(|| {
            ServiceCategory::ALL
                .iter()
                .map(|category| {
                    let count = successful()
                        .flat_map(|t| t.items.iter())
                        .filter(|e| e.provider.category == *category)
                        .count();
                    (*category, count)
                })
                .collect()
        });

        Self {
            total_spend,
            transaction_count: transactions.len(),
            points_earned,
            spend_by_weekday,
            recent,
            category_distribution,
        }
    }

    pub async fn load(history: &dyn TransactionHistory, admin: bool) -> Result<Self> {
        let transactions = history.all().await?;
        Ok(Self::build(&transactions, admin))
    }
}
