//! Marketplace domain module.
//!
//! External price/quantity listings, read-only from this application's point
//! of view. Each listing is identified by a numeric marketplace id.

pub mod catalog;

pub use catalog::{MarketplaceCatalog, MarketplaceId, MarketplaceRecord};
