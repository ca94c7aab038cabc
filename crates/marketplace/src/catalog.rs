use core::str::FromStr;

use serde::{Deserialize, Serialize};

use grocer_core::{DomainError, Entity, ItemName, Price};

/// Marketplace identifier (1..N).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarketplaceId(u32);

impl MarketplaceId {
    pub fn new(id: u32) -> Result<Self, DomainError> {
        if id == 0 {
            return Err(DomainError::validation("marketplace numbers start at 1"));
        }
        Ok(Self(id))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Ids `1..=count`.
    pub fn all(count: u32) -> impl Iterator<Item = MarketplaceId> {
        (1..=count).map(MarketplaceId)
    }
}

impl core::fmt::Display for MarketplaceId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for MarketplaceId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s
            .trim()
            .parse::<u32>()
            .map_err(|_| DomainError::input_format(format!("'{}' is not a marketplace number", s.trim())))?;
        Self::new(id)
    }
}

/// One product offered by a marketplace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketplaceRecord {
    pub name: ItemName,
    pub category: String,
    pub price: Price,
    /// Units the marketplace has available.
    pub quantity: u32,
}

impl Entity for MarketplaceRecord {
    type Id = ItemName;

    fn id(&self) -> &Self::Id {
        &self.name
    }
}

/// The listing of one marketplace, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketplaceCatalog {
    id: MarketplaceId,
    records: Vec<MarketplaceRecord>,
}

impl MarketplaceCatalog {
    pub fn new(id: MarketplaceId, records: Vec<MarketplaceRecord>) -> Self {
        Self { id, records }
    }

    pub fn id(&self) -> MarketplaceId {
        self.id
    }

    pub fn records(&self) -> &[MarketplaceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Case-insensitive lookup; the first listed entry wins.
    pub fn get(&self, query: &str) -> Option<&MarketplaceRecord> {
        self.records.iter().find(|r| r.name.matches(query))
    }

    /// Exact-name price lookup, used when comparing against stocked items.
    pub fn price_of(&self, name: &ItemName) -> Option<Price> {
        self.records
            .iter()
            .find(|r| r.id() == name)
            .map(|r| r.price)
    }
}
