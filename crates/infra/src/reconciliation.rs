//! Order → Inventory reconciliation.
//!
//! Merges the line items of a placed order into the stock:
//! - a line whose name exactly matches an existing record restocks that record
//!   (first match wins; category and price stay as they are)
//! - any other line becomes a new record with the line's fields
//!
//! Pure: the caller decides when the merged stock is written.

use grocer_core::{DomainResult, ItemName};
use grocer_inventory::{GroceryRecord, Inventory};
use grocer_purchasing::Order;

/// What a merge did, line by line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub updated: Vec<ItemName>,
    pub inserted: Vec<ItemName>,
}

impl ReconcileReport {
    pub fn lines(&self) -> usize {
        self.updated.len() + self.inserted.len()
    }
}

/// Merged stock plus the report describing the merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    pub inventory: Inventory,
    pub report: ReconcileReport,
}

/// Fold `order` into `inventory`.
///
/// Fails without returning a partial stock if any restock would overflow.
pub fn merge_order(mut inventory: Inventory, order: &Order) -> DomainResult<Reconciled> {
    let mut report = ReconcileReport::default();

    for line in order.lines() {
        match inventory.find_exact_mut(line.name()) {
            Some(existing) => {
                let quantity = existing.restock(line.quantity())?;
                tracing::debug!(item = %line.name(), received = line.quantity(), quantity, "restocked");
                report.updated.push(line.name().clone());
            }
            None => {
                inventory.insert(GroceryRecord::new(
                    line.name().clone(),
                    line.category(),
                    line.quantity(),
                    line.price(),
                ));
                tracing::debug!(item = %line.name(), quantity = line.quantity(), "added to stock");
                report.inserted.push(line.name().clone());
            }
        }
    }

    Ok(Reconciled { inventory, report })
}
