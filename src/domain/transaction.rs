use super::cart::CartEntry;
use super::money::Money;
use crate::error::StorefrontError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionStatus {
    Success,
    Pending,
    Failed,
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Success => "SUCCESS",
            Self::Pending => "PENDING",
            Self::Failed => "FAILED",
        })
    }
}

/// Who is paying. Business payers are offered a tax invoice after checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PayerType {
    #[default]
    Consumer,
    Business,
}

impl fmt::Display for PayerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Consumer => "CONSUMER",
            Self::Business => "BUSINESS",
        })
    }
}

impl FromStr for PayerType {
    type Err = StorefrontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "consumer" => Ok(Self::Consumer),
            "business" => Ok(Self::Business),
            other => Err(StorefrontError::ValidationError(format!(
                "unknown payer type '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    CreditCard,
    EWallet,
    BankTransfer,
    #[default]
    QrPay,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        Self::QrPay,
        Self::CreditCard,
        Self::EWallet,
        Self::BankTransfer,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::CreditCard => "Credit Card",
            Self::EWallet => "E-Wallet",
            Self::BankTransfer => "Bank Transfer",
            Self::QrPay => "QR PromptPay/QRIS",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentMethod {
    type Err = StorefrontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "credit-card" | "card" => Ok(Self::CreditCard),
            "e-wallet" | "ewallet" => Ok(Self::EWallet),
            "bank-transfer" => Ok(Self::BankTransfer),
            "qr-pay" | "qr" => Ok(Self::QrPay),
            other => Err(StorefrontError::ValidationError(format!(
                "unknown payment method '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    pub items: Vec<CartEntry>,
    pub total: Money,
    pub status: TransactionStatus,
    pub payer: PayerType,
    /// Absent on records that predate method tracking.
    pub method: Option<PaymentMethod>,
}

impl Transaction {
    /// A tax invoice is only offered to business payers.
    pub fn offers_tax_invoice(&self) -> bool {
        self.status == TransactionStatus::Success && self.payer == PayerType::Business
    }
}
