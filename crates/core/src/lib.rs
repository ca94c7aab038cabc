//! `grocer-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no IO, no file formats).

pub mod entity;
pub mod error;
pub mod name;
pub mod price;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use name::ItemName;
pub use price::Price;
pub use value_object::ValueObject;
