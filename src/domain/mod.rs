//! Storefront domain: catalog data, the selection wizard, cart, pricing and
//! the ports the application layer talks to.

pub mod cart;
pub mod catalog;
pub mod money;
pub mod ports;
pub mod pricing;
pub mod selection;
pub mod transaction;
