//! Grocery item names.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// Product name: trimmed and never empty.
///
/// Equality is exact (case-sensitive); use [`ItemName::matches`] for the
/// case-insensitive comparison that user-facing lookups perform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemName(String);

impl ItemName {
    pub fn new(raw: impl AsRef<str>) -> DomainResult<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DomainError::input_format("name cannot be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive match against free-form user input.
    pub fn matches(&self, query: &str) -> bool {
        self.0.to_lowercase() == query.trim().to_lowercase()
    }
}

impl ValueObject for ItemName {}

impl core::fmt::Display for ItemName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ItemName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ItemName> for String {
    fn from(value: ItemName) -> Self {
        value.0
    }
}

impl core::str::FromStr for ItemName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_surrounding_whitespace() {
        let name = ItemName::new("  Milk ").unwrap();
        assert_eq!(name.as_str(), "Milk");
    }

    #[test]
    fn blank_name_is_rejected() {
        assert!(matches!(
            ItemName::new("   "),
            Err(DomainError::InputFormat(_))
        ));
    }

    #[test]
    fn matches_ignores_case_but_equality_does_not() {
        let milk = ItemName::new("Milk").unwrap();
        assert!(milk.matches("mILK"));
        assert!(milk.matches(" milk "));
        assert_ne!(milk, ItemName::new("milk").unwrap());
    }
}
