use super::catalog::{Plan, Provider};
use super::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartEntryId(pub Uuid);

impl CartEntryId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for CartEntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// The free-text target of a recharge: phone number, meter ID or game user ID.
///
/// Any non-empty string is accepted. No format or length checks are applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountIdentifier(String);

impl AccountIdentifier {
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.is_empty() { None } else { Some(Self(value)) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A provider + plan + identifier tuple awaiting payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    pub id: CartEntryId,
    pub plan: Plan,
    pub provider: Provider,
    pub account: AccountIdentifier,
}

impl CartEntry {
    pub fn new(plan: Plan, provider: Provider, account: AccountIdentifier) -> Self {
        Self {
            id: CartEntryId::generate(),
            plan,
            provider,
            account,
        }
    }

    pub fn price(&self) -> Money {
        self.plan.price
    }
}

/// Ordered collection of entries; insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: CartEntry) {
        self.entries.push(entry);
    }

    /// Removes the entry with the given id. Unknown ids are ignored.
    pub fn remove(&mut self, id: CartEntryId) -> Option<CartEntry> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(index))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &CartEntry> {
        self.entries.iter()
    }

    /// Entry at a 1-based display position.
    pub fn at_position(&self, position: usize) -> Option<&CartEntry> {
        position.checked_sub(1).and_then(|i| self.entries.get(i))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::Catalog;

    fn entry(catalog: &Catalog, plan_id: &str, account: &str) -> CartEntry {
        let plan = catalog.plan(plan_id).unwrap().clone();
        let provider = catalog.provider(&plan.provider_id).unwrap().clone();
        CartEntry::new(plan, provider, AccountIdentifier::new(account).unwrap())
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let catalog = Catalog::seeded();
        let mut cart = Cart::new();
        cart.add(entry(&catalog, "m1", "0812345678"));
        cart.add(entry(&catalog, "g3", "12345678 (1234)"));

        let plans: Vec<_> = cart.iter().map(|e| e.plan.id.as_str()).collect();
        assert_eq!(plans, vec!["m1", "g3"]);
        assert_eq!(cart.at_position(2).unwrap().plan.id, "g3");
        assert!(cart.at_position(0).is_none());
        assert!(cart.at_position(3).is_none());
    }

    #[test]
    fn test_add_then_remove_restores_cart() {
        let catalog = Catalog::seeded();
        let mut cart = Cart::new();
        cart.add(entry(&catalog, "m1", "0812345678"));
        let before = cart.clone();

        let added = entry(&catalog, "m3", "0899999999");
        let id = added.id;
        cart.add(added);
        assert_eq!(cart.len(), 2);

        assert!(cart.remove(id).is_some());
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let catalog = Catalog::seeded();
        let mut cart = Cart::new();
        cart.add(entry(&catalog, "m1", "0812345678"));
        let before = cart.clone();

        assert!(cart.remove(CartEntryId::generate()).is_none());
        assert_eq!(cart, before);
    }

    #[test]
    fn test_duplicates_allowed_and_clear_empties() {
        let catalog = Catalog::seeded();
        let mut cart = Cart::new();
        cart.add(entry(&catalog, "m1", "0812345678"));
        cart.add(entry(&catalog, "m1", "0812345678"));
        assert_eq!(cart.len(), 2);
        assert_ne!(cart.entries()[0].id, cart.entries()[1].id);

        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_account_identifier_accepts_any_non_empty_string() {
        assert!(AccountIdentifier::new("").is_none());
        assert!(AccountIdentifier::new(" ").is_some());
        assert!(AccountIdentifier::new("not-a-phone-number").is_some());
    }
}
