//! Purchasing domain module (marketplace orders).
//!
//! This crate contains business rules for building orders against a marketplace
//! catalog, implemented purely as deterministic domain logic (no IO, no storage).

pub mod order;

pub use order::{ItemRequest, Order, OrderLineItem, build_order};
