use std::collections::HashMap;
use std::sync::RwLock;

use grocer_inventory::Inventory;
use grocer_marketplace::{MarketplaceCatalog, MarketplaceId};
use grocer_purchasing::Order;

use super::r#trait::{CatalogSource, InventoryStore, PendingOrderStore, StoreError};

/// In-memory inventory store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryInventoryStore {
    inner: RwLock<Inventory>,
}

impl InMemoryInventoryStore {
    pub fn new(initial: Inventory) -> Self {
        Self {
            inner: RwLock::new(initial),
        }
    }
}

impl InventoryStore for InMemoryInventoryStore {
    fn load(&self) -> Result<Inventory, StoreError> {
        let guard = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(guard.clone())
    }

    fn write_all(&self, inventory: &Inventory) -> Result<(), StoreError> {
        let mut guard = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        *guard = inventory.clone();
        Ok(())
    }
}

/// In-memory catalogs keyed by marketplace id.
#[derive(Debug, Default)]
pub struct InMemoryCatalogSource {
    catalogs: HashMap<MarketplaceId, MarketplaceCatalog>,
}

impl InMemoryCatalogSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(mut self, catalog: MarketplaceCatalog) -> Self {
        self.catalogs.insert(catalog.id(), catalog);
        self
    }
}

impl CatalogSource for InMemoryCatalogSource {
    fn load_catalog(&self, id: MarketplaceId) -> Result<MarketplaceCatalog, StoreError> {
        self.catalogs
            .get(&id)
            .cloned()
            .ok_or(StoreError::MarketplaceNotFound(id))
    }
}

/// In-memory pending order slot.
#[derive(Debug, Default)]
pub struct InMemoryPendingOrderStore {
    slot: RwLock<Option<Order>>,
}

impl InMemoryPendingOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PendingOrderStore for InMemoryPendingOrderStore {
    fn save(&self, order: &Order) -> Result<(), StoreError> {
        let mut slot = self.slot.write().map_err(|_| StoreError::Poisoned)?;
        *slot = Some(order.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<Order>, StoreError> {
        let slot = self.slot.read().map_err(|_| StoreError::Poisoned)?;
        Ok(slot.clone())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut slot = self.slot.write().map_err(|_| StoreError::Poisoned)?;
        *slot = None;
        Ok(())
    }
}
