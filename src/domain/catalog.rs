use super::money::{Currency, Money};
use crate::error::StorefrontError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ServiceCategory {
    Mobile,
    Utility,
    Gaming,
}

impl ServiceCategory {
    pub const ALL: [ServiceCategory; 3] = [Self::Mobile, Self::Utility, Self::Gaming];
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Mobile => "MOBILE",
            Self::Utility => "UTILITY",
            Self::Gaming => "GAMING",
        };
        f.write_str(name)
    }
}

impl FromStr for ServiceCategory {
    type Err = StorefrontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mobile" => Ok(Self::Mobile),
            "utility" | "utilities" => Ok(Self::Utility),
            "gaming" => Ok(Self::Gaming),
            other => Err(StorefrontError::ValidationError(format!(
                "unknown service category '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub id: String,
    pub name: String,
    pub logo: String,
    pub category: ServiceCategory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub id: String,
    pub provider_id: String,
    pub name: String,
    /// Credit units delivered; zero for custom-amount plans.
    pub amount: u32,
    pub price: Money,
    pub currency: Currency,
    pub description: String,
}

/// Static reference data: every provider and plan the storefront sells.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    providers: Vec<Provider>,
    plans: Vec<Plan>,
}

/// Entry of the plan snapshot handed to the support assistant.
#[derive(Debug, Serialize)]
pub struct PlanSummary<'a> {
    pub name: &'a str,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub desc: &'a str,
}

impl Catalog {
    pub fn new(providers: Vec<Provider>, plans: Vec<Plan>) -> Self {
        Self { providers, plans }
    }

    /// The storefront's built-in catalog.
    pub fn seeded() -> Self {
        let providers = [
            ("ais", "AIS Mobile", ServiceCategory::Mobile),
            ("true", "TrueMove", ServiceCategory::Mobile),
            ("dtac", "DTAC", ServiceCategory::Mobile),
            ("mea", "Metro Electric", ServiceCategory::Utility),
            ("mwa", "Metro Water", ServiceCategory::Utility),
            ("rov", "Arena of Valor", ServiceCategory::Gaming),
            ("pubg", "PUBG Mobile", ServiceCategory::Gaming),
            ("genshin", "Genshin Impact", ServiceCategory::Gaming),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (id, name, category))| Provider {
            id: id.to_string(),
            name: name.to_string(),
            logo: format!("https://picsum.photos/id/{}/40/40", i + 1),
            category,
        })
        .collect();

        let plans = [
            ("m1", "ais", "Topup 100", 100, 100, "Standard airtime"),
            ("m2", "ais", "Unlimited 5G - 7 Days", 0, 199, "Max speed data 7 days"),
            ("m3", "true", "Topup 50", 50, 50, "Standard airtime"),
            ("u1", "mea", "Custom Amount", 0, 0, "Pay exact bill amount"),
            ("g1", "rov", "35 Coupons", 35, 35, "Instant delivery"),
            ("g2", "rov", "750 Coupons", 750, 700, "Bonus +50"),
            ("g3", "pubg", "60 UC", 60, 35, "Starter pack"),
        ]
        .into_iter()
        .map(|(id, provider_id, name, amount, price, description)| Plan {
            id: id.to_string(),
            provider_id: provider_id.to_string(),
            name: name.to_string(),
            amount,
            price: Money::new(Decimal::from(price)),
            currency: Currency::Thb,
            description: description.to_string(),
        })
        .collect();

        Self::new(providers, plans)
    }

    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    pub fn provider(&self, id: &str) -> Option<&Provider> {
        self.providers.iter().find(|p| p.id == id)
    }

    pub fn plan(&self, id: &str) -> Option<&Plan> {
        self.plans.iter().find(|p| p.id == id)
    }

    pub fn providers_in(&self, category: ServiceCategory) -> impl Iterator<Item = &Provider> {
        self.providers.iter().filter(move |p| p.category == category)
    }

    pub fn plans_for(&self, provider_id: &str) -> impl Iterator<Item = &Plan> {
        self.plans.iter().filter(move |p| p.provider_id == provider_id)
    }

    pub fn plan_summaries(&self) -> Vec<PlanSummary<'_>> {
        self.plans
            .iter()
            .map(|p| PlanSummary {
                name: &p.name,
                price: p.price.value(),
                desc: &p.description,
            })
            .collect()
    }
}
