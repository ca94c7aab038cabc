//! Value object trait: equality by value, not identity.
//!
//! Value objects are domain objects that have **no identity** - they are defined entirely
//! by their attribute values. Two value objects with the same values are considered equal.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. `Price` and
/// `ItemName` are value objects; a `GroceryRecord` is an entity keyed by its name.
///
/// ```ignore
/// let a: Price = "2.50".parse()?;
/// let b = Price::from_cents(250);
/// assert_eq!(a, b);
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
