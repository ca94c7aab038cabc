use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use grocer_core::{DomainError, DomainResult, Entity, ItemName, Price};

/// One stocked grocery product.
///
/// The name is the merge key; the quantity never goes negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroceryRecord {
    name: ItemName,
    category: String,
    quantity: u32,
    price: Price,
    expiration_date: Option<NaiveDate>,
}

impl GroceryRecord {
    pub fn new(name: ItemName, category: impl Into<String>, quantity: u32, price: Price) -> Self {
        Self {
            name,
            category: category.into(),
            quantity,
            price,
            expiration_date: None,
        }
    }

    pub fn with_expiration_date(mut self, date: Option<NaiveDate>) -> Self {
        self.expiration_date = date;
        self
    }

    pub fn name(&self) -> &ItemName {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn expiration_date(&self) -> Option<NaiveDate> {
        self.expiration_date
    }

    /// Add received units to the stock. Category and price are left alone.
    pub fn restock(&mut self, received: u32) -> DomainResult<u32> {
        self.quantity = self.quantity.checked_add(received).ok_or_else(|| {
            DomainError::invariant(format!("stock of '{}' would overflow", self.name))
        })?;
        Ok(self.quantity)
    }

    /// Apply a signed stock change (manual correction, consumption).
    pub fn adjust(&mut self, delta: i64) -> DomainResult<u32> {
        if delta == 0 {
            return Err(DomainError::validation("delta cannot be zero"));
        }

        let new_stock = i64::from(self.quantity).checked_add(delta).ok_or_else(|| {
            DomainError::invariant(format!("stock of '{}' would overflow", self.name))
        })?;
        if new_stock < 0 {
            return Err(DomainError::invariant("stock cannot go negative"));
        }
        self.quantity = u32::try_from(new_stock).map_err(|_| {
            DomainError::invariant(format!("stock of '{}' would overflow", self.name))
        })?;
        Ok(self.quantity)
    }

    /// True when the item expires on or after `today` and no later than `until`.
    pub fn expires_between(&self, today: NaiveDate, until: NaiveDate) -> bool {
        matches!(self.expiration_date, Some(d) if today <= d && d <= until)
    }
}

impl Entity for GroceryRecord {
    type Id = ItemName;

    fn id(&self) -> &Self::Id {
        &self.name
    }
}
