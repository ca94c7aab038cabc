//! Order placement and reconciliation pipeline (application-level orchestration).
//!
//! ```text
//! place:      load catalog → build order (pure) → save pending order
//! reconcile:  load pending order → load inventory → merge (pure)
//!               → write inventory → clear pending order
//! ```
//!
//! Validation failures abort before anything is saved, so a rejected order
//! never replaces the previous pending one. The pending order is cleared only
//! after the inventory write succeeds; a failed write leaves it in place for a
//! retry.

use thiserror::Error;

use grocer_core::DomainError;
use grocer_marketplace::{MarketplaceCatalog, MarketplaceId};
use grocer_purchasing::{ItemRequest, Order, build_order};

use crate::config::Settings;
use crate::reconciliation::{Reconciled, merge_order};
use crate::store::{
    CatalogSource, CsvCatalogSource, CsvInventoryStore, CsvPendingOrderStore, InventoryStore,
    PendingOrderStore, StoreError,
};

#[derive(Debug, Error)]
pub enum OrderDeskError {
    /// Stock check, validation or invariant failure.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Reading or writing one of the files failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The entered marketplace number does not name any marketplace.
    #[error("marketplace {0} not found")]
    UnknownMarketplace(String),

    /// Reconciliation was requested with nothing to merge.
    #[error("no ordered items found")]
    NoPendingOrder,
}

impl OrderDeskError {
    /// Stable code for structured logs.
    pub fn code(&self) -> &'static str {
        match self {
            OrderDeskError::Domain(e) => e.code(),
            OrderDeskError::Store(e) => e.code(),
            OrderDeskError::UnknownMarketplace(_) => "not_found",
            OrderDeskError::NoPendingOrder => "no_pending_order",
        }
    }
}

/// Composes the inventory store, the marketplace catalogs and the pending
/// order slot.
#[derive(Debug)]
pub struct OrderDesk<I, C, P> {
    inventory: I,
    catalogs: C,
    pending: P,
}

/// The file-backed desk the application runs with.
pub type CsvOrderDesk = OrderDesk<CsvInventoryStore, CsvCatalogSource, CsvPendingOrderStore>;

impl CsvOrderDesk {
    pub fn from_settings(settings: &Settings) -> Self {
        OrderDesk::new(
            CsvInventoryStore::new(settings.inventory_path()),
            CsvCatalogSource::new(&settings.data_dir, &settings.marketplace_file_pattern),
            CsvPendingOrderStore::new(settings.order_path()),
        )
    }
}

impl<I, C, P> OrderDesk<I, C, P>
where
    I: InventoryStore,
    C: CatalogSource,
    P: PendingOrderStore,
{
    pub fn new(inventory: I, catalogs: C, pending: P) -> Self {
        Self {
            inventory,
            catalogs,
            pending,
        }
    }

    pub fn inventory_store(&self) -> &I {
        &self.inventory
    }

    pub fn catalogs(&self) -> &C {
        &self.catalogs
    }

    pub fn pending_orders(&self) -> &P {
        &self.pending
    }

    /// Resolve a marketplace before any items are requested from it.
    pub fn load_catalog(&self, id: MarketplaceId) -> Result<MarketplaceCatalog, OrderDeskError> {
        Ok(self.catalogs.load_catalog(id)?)
    }

    /// Resolve a marketplace from what the user typed. Input that is not a
    /// marketplace number (`0`, `-1`, `abc`) is reported like a missing one.
    pub fn find_catalog(&self, entered: &str) -> Result<MarketplaceCatalog, OrderDeskError> {
        let entered = entered.trim();
        let id: MarketplaceId = entered
            .parse()
            .map_err(|_| OrderDeskError::UnknownMarketplace(entered.to_string()))?;
        self.load_catalog(id)
    }

    /// Validate and price `requests` against `catalog`, then persist the order
    /// as the pending one (overwriting any unconsumed order).
    pub fn place_order(
        &self,
        catalog: &MarketplaceCatalog,
        requests: &[ItemRequest],
    ) -> Result<Order, OrderDeskError> {
        let order = build_order(catalog, requests).inspect_err(|e| {
            tracing::warn!(marketplace = %catalog.id(), error.code = e.code(), error = %e, "order rejected");
        })?;

        self.pending.save(&order)?;
        tracing::info!(
            marketplace = %catalog.id(),
            lines = order.lines().len(),
            total_cost = %order.total_cost(),
            "order placed"
        );
        Ok(order)
    }

    /// Merge the pending order into the inventory and consume it.
    pub fn reconcile_pending(&self) -> Result<Reconciled, OrderDeskError> {
        let order = self.pending.load()?.ok_or(OrderDeskError::NoPendingOrder)?;
        let inventory = self.inventory.load()?;

        let reconciled = merge_order(inventory, &order)?;
        self.inventory.write_all(&reconciled.inventory)?;

        if let Err(e) = self.pending.clear() {
            // Stock already includes this order.
            tracing::error!(error = %e, "inventory updated but pending order could not be cleared");
            return Err(e.into());
        }

        tracing::info!(
            updated = reconciled.report.updated.len(),
            inserted = reconciled.report.inserted.len(),
            "pending order reconciled"
        );
        Ok(reconciled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grocer_core::{ItemName, Price};
    use grocer_inventory::{GroceryRecord, Inventory};
    use grocer_marketplace::MarketplaceRecord;

    use crate::store::{InMemoryCatalogSource, InMemoryInventoryStore, InMemoryPendingOrderStore};

    fn name(s: &str) -> ItemName {
        ItemName::new(s).unwrap()
    }

    fn marketplace(id: u32) -> MarketplaceId {
        MarketplaceId::new(id).unwrap()
    }

    fn catalogs() -> InMemoryCatalogSource {
        let listed = |n: &str, cents: u64, quantity: u32| MarketplaceRecord {
            name: name(n),
            category: "Dairy".to_string(),
            price: Price::from_cents(cents),
            quantity,
        };
        InMemoryCatalogSource::new().with_catalog(MarketplaceCatalog::new(
            marketplace(2),
            vec![listed("Eggs", 300, 10), listed("Milk", 260, 20)],
        ))
    }

    fn desk() -> OrderDesk<InMemoryInventoryStore, InMemoryCatalogSource, InMemoryPendingOrderStore> {
        let stock = Inventory::from_records(vec![GroceryRecord::new(
            name("Milk"),
            "Dairy",
            5,
            Price::from_cents(250),
        )]);
        OrderDesk::new(
            InMemoryInventoryStore::new(stock),
            catalogs(),
            InMemoryPendingOrderStore::new(),
        )
    }

    /// Inventory store whose writes always fail.
    struct ReadOnlyInventory(Inventory);

    impl InventoryStore for ReadOnlyInventory {
        fn load(&self) -> Result<Inventory, StoreError> {
            Ok(self.0.clone())
        }

        fn write_all(&self, _inventory: &Inventory) -> Result<(), StoreError> {
            Err(StoreError::Io {
                path: "grocery_items.csv".into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            })
        }
    }

    #[test]
    fn unknown_marketplace_is_not_found() {
        let err = desk().load_catalog(marketplace(9)).unwrap_err();
        assert_eq!(err.code(), "not_found");
        assert_eq!(err.to_string(), "marketplace 9 not found");
    }

    #[test]
    fn entered_marketplace_that_is_not_a_number_is_not_found() {
        let desk = desk();
        for entered in ["0", "-1", "abc", " "] {
            let err = desk.find_catalog(entered).unwrap_err();
            assert_eq!(err.code(), "not_found");
            assert_eq!(err.to_string(), format!("marketplace {} not found", entered.trim()));
        }
        assert_eq!(desk.find_catalog(" 2 ").unwrap().id(), marketplace(2));
        assert_eq!(desk.find_catalog("9").unwrap_err().to_string(), "marketplace 9 not found");
    }

    #[test]
    fn place_then_reconcile_updates_stock_and_consumes_order() {
        let desk = desk();
        let catalog = desk.load_catalog(marketplace(2)).unwrap();
        let order = desk
            .place_order(&catalog, &[ItemRequest::new("milk", 3), ItemRequest::new("eggs", 4)])
            .unwrap();
        assert_eq!(order.total_cost(), Price::from_cents(3 * 260 + 4 * 300));
        assert_eq!(desk.pending_orders().load().unwrap(), Some(order));

        let reconciled = desk.reconcile_pending().unwrap();
        let stock = desk.inventory_store().load().unwrap();
        assert_eq!(stock, reconciled.inventory);

        let milk = stock.find_exact(&name("Milk")).unwrap();
        assert_eq!(milk.quantity(), 8);
        assert_eq!(milk.price(), Price::from_cents(250));
        assert_eq!(stock.find_exact(&name("Eggs")).unwrap().quantity(), 4);

        assert_eq!(desk.pending_orders().load().unwrap(), None);
    }

    #[test]
    fn second_reconcile_without_new_order_reports_no_pending_order() {
        let desk = desk();
        let catalog = desk.load_catalog(marketplace(2)).unwrap();
        desk.place_order(&catalog, &[ItemRequest::new("Eggs", 1)]).unwrap();
        desk.reconcile_pending().unwrap();

        let err = desk.reconcile_pending().unwrap_err();
        assert!(matches!(err, OrderDeskError::NoPendingOrder));
        assert_eq!(
            desk.inventory_store()
                .load()
                .unwrap()
                .find_exact(&name("Eggs"))
                .unwrap()
                .quantity(),
            1
        );
    }

    #[test]
    fn rejected_order_leaves_previous_pending_order_untouched() {
        let desk = desk();
        let catalog = desk.load_catalog(marketplace(2)).unwrap();
        let first = desk.place_order(&catalog, &[ItemRequest::new("Milk", 2)]).unwrap();

        let err = desk
            .place_order(&catalog, &[ItemRequest::new("Milk", 1), ItemRequest::new("Eggs", 12)])
            .unwrap_err();
        match err {
            OrderDeskError::Domain(DomainError::InsufficientStock {
                name,
                requested,
                available,
            }) => {
                assert_eq!((name.as_str(), requested, available), ("Eggs", 12, 10));
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }
        assert_eq!(desk.pending_orders().load().unwrap(), Some(first));
    }

    #[test]
    fn failed_inventory_write_keeps_order_pending() {
        let stock = Inventory::from_records(vec![GroceryRecord::new(
            name("Milk"),
            "Dairy",
            5,
            Price::from_cents(250),
        )]);
        let desk = OrderDesk::new(
            ReadOnlyInventory(stock),
            catalogs(),
            InMemoryPendingOrderStore::new(),
        );
        let catalog = desk.load_catalog(marketplace(2)).unwrap();
        desk.place_order(&catalog, &[ItemRequest::new("Milk", 3)]).unwrap();

        let err = desk.reconcile_pending().unwrap_err();
        assert_eq!(err.code(), "io_failure");
        assert!(desk.pending_orders().load().unwrap().is_some());
    }
}
