//! Flat-file persistence boundary.
//!
//! Three record sets live on disk: the inventory, one catalog per marketplace,
//! and the intermediate (pending) order. Every mutation rewrites a whole file.

pub mod csv_file;
pub mod in_memory;
mod rows;
pub mod r#trait;

pub use csv_file::{CsvCatalogSource, CsvInventoryStore, CsvPendingOrderStore};
pub use in_memory::{InMemoryCatalogSource, InMemoryInventoryStore, InMemoryPendingOrderStore};
pub use r#trait::{CatalogSource, InventoryStore, PendingOrderStore, StoreError};
