use std::path::PathBuf;

use thiserror::Error;

use grocer_core::DomainError;
use grocer_inventory::Inventory;
use grocer_marketplace::{MarketplaceCatalog, MarketplaceId};
use grocer_purchasing::Order;

/// Persistence error.
///
/// These are **infrastructure errors** (missing files, IO, malformed rows) as
/// opposed to domain errors (stock checks, invariants).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("marketplace {0} not found")]
    MarketplaceNotFound(MarketplaceId),

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read or write {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{} line {line}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        #[source]
        source: DomainError,
    },

    #[error("{}: {source}", path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: DomainError,
    },

    /// An in-memory store's lock was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    Poisoned,
}

impl StoreError {
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::MarketplaceNotFound(_) => "not_found",
            StoreError::Io { .. } | StoreError::Csv { .. } | StoreError::Poisoned => "io_failure",
            StoreError::Malformed { .. } | StoreError::Invalid { .. } => "input_format",
        }
    }
}

/// The canonical grocery stock.
pub trait InventoryStore {
    /// Load every record. A store that has never been written loads empty.
    fn load(&self) -> Result<Inventory, StoreError>;

    /// Replace the whole stock. Either the new content is fully in place
    /// afterwards or the previous content still is.
    fn write_all(&self, inventory: &Inventory) -> Result<(), StoreError>;
}

/// Read-only access to marketplace catalogs.
pub trait CatalogSource {
    fn load_catalog(&self, id: MarketplaceId) -> Result<MarketplaceCatalog, StoreError>;
}

/// The intermediate order set: at most one order awaiting reconciliation.
pub trait PendingOrderStore {
    /// Overwrite any previous pending order.
    fn save(&self, order: &Order) -> Result<(), StoreError>;

    /// `None` when nothing is pending.
    fn load(&self) -> Result<Option<Order>, StoreError>;

    /// Mark the pending order as consumed.
    fn clear(&self) -> Result<(), StoreError>;
}

impl<S: InventoryStore + ?Sized> InventoryStore for &S {
    fn load(&self) -> Result<Inventory, StoreError> {
        (**self).load()
    }

    fn write_all(&self, inventory: &Inventory) -> Result<(), StoreError> {
        (**self).write_all(inventory)
    }
}

impl<S: CatalogSource + ?Sized> CatalogSource for &S {
    fn load_catalog(&self, id: MarketplaceId) -> Result<MarketplaceCatalog, StoreError> {
        (**self).load_catalog(id)
    }
}

impl<S: PendingOrderStore + ?Sized> PendingOrderStore for &S {
    fn save(&self, order: &Order) -> Result<(), StoreError> {
        (**self).save(order)
    }

    fn load(&self) -> Result<Option<Order>, StoreError> {
        (**self).load()
    }

    fn clear(&self) -> Result<(), StoreError> {
        (**self).clear()
    }
}
