//! The three-step recharge wizard: provider, then account identifier, then plan.
//!
//! Each step carries only the data it can have, so a chosen plan without a
//! provider is unrepresentable. Forward moves are gated on the current step's
//! input; moving back is always allowed except from the first step. Moving
//! back keeps what was entered: the identifier and the chosen plan are
//! restored when the user returns to their steps.

use super::cart::{AccountIdentifier, CartEntry};
use super::catalog::{Catalog, Plan, Provider, ServiceCategory};
use crate::error::{Result, StorefrontError};

/// Label and placeholder shown for the account identifier input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentifierHint {
    pub label: &'static str,
    pub placeholder: &'static str,
}

impl IdentifierHint {
    pub fn for_category(category: ServiceCategory) -> Self {
        match category {
            ServiceCategory::Mobile => Self {
                label: "Phone Number",
                placeholder: "08x-xxx-xxxx",
            },
            ServiceCategory::Utility => Self {
                label: "Meter / Customer ID",
                placeholder: "e.g. 123456789",
            },
            ServiceCategory::Gaming => Self {
                label: "User ID / Server ID",
                placeholder: "12345678 (1234)",
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionFlow {
    SelectProvider {
        category: ServiceCategory,
        input: String,
        plan: Option<Plan>,
    },
    EnterIdentifier {
        category: ServiceCategory,
        provider: Provider,
        input: String,
        plan: Option<Plan>,
    },
    SelectPlan {
        category: ServiceCategory,
        provider: Provider,
        account: AccountIdentifier,
        plan: Option<Plan>,
    },
}

impl SelectionFlow {
    pub fn start(category: ServiceCategory) -> Self {
        Self::SelectProvider {
            category,
            input: String::new(),
            plan: None,
        }
    }

    pub fn category(&self) -> ServiceCategory {
        match self {
            Self::SelectProvider { category, .. }
            | Self::EnterIdentifier { category, .. }
            | Self::SelectPlan { category, .. } => *category,
        }
    }

    /// 1-based step number, for progress display.
    pub fn step(&self) -> u8 {
        match self {
            Self::SelectProvider { .. } => 1,
            Self::EnterIdentifier { .. } => 2,
            Self::SelectPlan { .. } => 3,
        }
    }

    pub fn provider(&self) -> Option<&Provider> {
        match self {
            Self::SelectProvider { .. } => None,
            Self::EnterIdentifier { provider, .. } | Self::SelectPlan { provider, .. } => {
                Some(provider)
            }
        }
    }

    pub fn hint(&self) -> IdentifierHint {
        IdentifierHint::for_category(self.category())
    }

    /// Providers offered on step 1.
    pub fn provider_options<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Provider> {
        catalog.providers_in(self.category()).collect()
    }

    /// Plans offered on step 3. Empty until a provider has been chosen.
    pub fn plan_options<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Plan> {
        match self.provider() {
            Some(provider) => catalog.plans_for(&provider.id).collect(),
            None => Vec::new(),
        }
    }

    /// Picks a provider on step 1 and moves to step 2. A remembered plan
    /// survives only if it belongs to the new provider.
    pub fn choose_provider(&mut self, catalog: &Catalog, provider_id: &str) -> Result<()> {
        let step = self.step();
        let Self::SelectProvider {
            category,
            input,
            plan,
        } = self
        else {
            return Err(wrong_step(step, "choose a provider"));
        };
        let provider = catalog
            .providers_in(*category)
            .find(|p| p.id == provider_id)
            .ok_or_else(|| StorefrontError::UnknownProvider(provider_id.to_string()))?;

        *self = Self::EnterIdentifier {
            category: *category,
            provider: provider.clone(),
            input: std::mem::take(input),
            plan: plan.take().filter(|p| p.provider_id == provider.id),
        };
        Ok(())
    }

    /// Replaces the identifier text on step 2.
    pub fn enter_identifier(&mut self, text: impl Into<String>) -> Result<()> {
        let step = self.step();
        let Self::EnterIdentifier { input, .. } = self else {
            return Err(wrong_step(step, "enter an account identifier"));
        };
        *input = text.into();
        Ok(())
    }

    /// Whether the forward action of the current step is enabled.
    pub fn can_advance(&self) -> bool {
        match self {
            Self::SelectProvider { .. } => false,
            Self::EnterIdentifier { input, .. } => !input.is_empty(),
            Self::SelectPlan { plan, .. } => plan.is_some(),
        }
    }

    /// Moves from step 2 to step 3. Returns `false` and leaves the flow
    /// untouched when the identifier is empty or the flow is on another step.
    pub fn advance(&mut self) -> bool {
        let Self::EnterIdentifier {
            category,
            provider,
            input,
            plan,
        } = self
        else {
            return false;
        };
        let Some(account) = AccountIdentifier::new(input.clone()) else {
            return false;
        };

        *self = Self::SelectPlan {
            category: *category,
            provider: provider.clone(),
            account,
            plan: plan.take(),
        };
        true
    }

    /// Steps back one state. Returns `false` on step 1.
    pub fn back(&mut self) -> bool {
        match self {
            Self::SelectProvider { .. } => false,
            Self::EnterIdentifier {
                category,
                input,
                plan,
                ..
            } => {
                *self = Self::SelectProvider {
                    category: *category,
                    input: std::mem::take(input),
                    plan: plan.take(),
                };
                true
            }
            Self::SelectPlan {
                category,
                provider,
                account,
                plan,
            } => {
                *self = Self::EnterIdentifier {
                    category: *category,
                    provider: provider.clone(),
                    input: account.as_str().to_string(),
                    plan: plan.take(),
                };
                true
            }
        }
    }

    /// Selects (or re-selects) a plan on step 3.
    pub fn choose_plan(&mut self, catalog: &Catalog, plan_id: &str) -> Result<()> {
        let step = self.step();
        let Self::SelectPlan { provider, plan, .. } = self else {
            return Err(wrong_step(step, "choose a plan"));
        };
        let chosen = catalog
            .plans_for(&provider.id)
            .find(|p| p.id == plan_id)
            .ok_or_else(|| StorefrontError::UnknownPlan(plan_id.to_string()))?;

        *plan = Some(chosen.clone());
        Ok(())
    }

    /// Builds the cart entry once a plan is chosen. The flow is consumed on
    /// success; on failure it is handed back unchanged.
    pub fn finalize(self) -> std::result::Result<CartEntry, Self> {
        match self {
            Self::SelectPlan {
                provider,
                account,
                plan: Some(plan),
                ..
            } => Ok(CartEntry::new(plan, provider, account)),
            other => Err(other),
        }
    }
}

fn wrong_step(step: u8, action: &str) -> StorefrontError {
    StorefrontError::SelectionError(format!("cannot {action} on step {step}"))
}
