use super::cart::Cart;
use super::money::Money;
use rust_decimal::Decimal;
use serde::Serialize;

/// VAT applied to the subtotal at checkout (7%).
pub const TAX_RATE: Decimal = Decimal::from_parts(7, 0, 0, false, 2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Totals {
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

impl Totals {
    pub fn from_subtotal(subtotal: Money) -> Self {
        let tax = subtotal * TAX_RATE;
        Self {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }

    pub fn for_cart(cart: &Cart) -> Self {
        Self::from_subtotal(cart.iter().map(|e| e.price()).sum())
    }
}
