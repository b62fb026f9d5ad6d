//! Application layer orchestrating the storefront use cases.
//!
//! `Storefront` owns the shared collaborators (catalog, payment gateway,
//! transaction history, support assistant) and applies `SessionEvent`s to a
//! caller-owned `Session`. Checkout, the support assistant and the dashboard
//! live in their own modules so they can be driven directly as well.

pub mod checkout;
pub mod dashboard;
pub mod storefront;
pub mod support;
