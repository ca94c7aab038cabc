//! Infrastructure layer: CSV files, configuration, and the order workflow
//! that ties the domain crates to them.

pub mod config;
pub mod order_desk;
pub mod pricing;
pub mod reconciliation;
pub mod store;

pub use config::{ConfigError, Settings};
pub use order_desk::{CsvOrderDesk, OrderDesk, OrderDeskError};
pub use pricing::{MarketplaceOffer, PriceComparison, compare_prices};
pub use reconciliation::{ReconcileReport, Reconciled, merge_order};
