//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Grocery data has no surrogate ids; records are identified by their name,
/// which is also the merge key used when orders are reconciled.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
