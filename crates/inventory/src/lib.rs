//! Inventory domain module.
//!
//! This crate contains business rules for the grocery stock, implemented purely as
//! deterministic domain logic (no IO, no file formats).

pub mod item;
pub mod stock;

pub use item::GroceryRecord;
pub use stock::{Inventory, capitalize};
