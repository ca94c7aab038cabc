//! Price comparison between our stock and every marketplace catalog.

use grocer_core::{ItemName, Price};
use grocer_inventory::Inventory;
use grocer_marketplace::MarketplaceId;

use crate::store::{CatalogSource, StoreError};

/// One marketplace's price for the compared item; `None` when unavailable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketplaceOffer {
    pub marketplace: MarketplaceId,
    pub price: Option<Price>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceComparison {
    pub name: ItemName,
    pub our_price: Price,
    pub offers: Vec<MarketplaceOffer>,
}

/// Compare the stocked item matching `query` against marketplaces `1..=marketplace_count`.
///
/// Returns `Ok(None)` when the item is not in stock. A marketplace whose file
/// is missing is reported as having no offer.
pub fn compare_prices<C: CatalogSource>(
    inventory: &Inventory,
    catalogs: &C,
    marketplace_count: u32,
    query: &str,
) -> Result<Option<PriceComparison>, StoreError> {
    let Some(item) = inventory.find(query) else {
        return Ok(None);
    };

    let mut offers = Vec::new();
    for marketplace in MarketplaceId::all(marketplace_count) {
        let price = match catalogs.load_catalog(marketplace) {
            Ok(catalog) => catalog.price_of(item.name()),
            Err(StoreError::MarketplaceNotFound(_)) => {
                tracing::warn!(%marketplace, "marketplace catalog missing during price comparison");
                None
            }
            Err(e) => return Err(e),
        };
        offers.push(MarketplaceOffer { marketplace, price });
    }

    Ok(Some(PriceComparison {
        name: item.name().clone(),
        our_price: item.price(),
        offers,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use grocer_inventory::GroceryRecord;
    use grocer_marketplace::{MarketplaceCatalog, MarketplaceRecord};

    use crate::store::InMemoryCatalogSource;

    fn name(s: &str) -> ItemName {
        ItemName::new(s).unwrap()
    }

    fn catalog(id: u32, items: &[(&str, u64)]) -> MarketplaceCatalog {
        MarketplaceCatalog::new(
            MarketplaceId::new(id).unwrap(),
            items
                .iter()
                .map(|(n, cents)| MarketplaceRecord {
                    name: name(n),
                    category: "Dairy".to_string(),
                    price: Price::from_cents(*cents),
                    quantity: 10,
                })
                .collect(),
        )
    }

    #[test]
    fn compares_across_marketplaces_and_marks_missing_offers() {
        let inventory = Inventory::from_records(vec![GroceryRecord::new(
            name("Milk"),
            "Dairy",
            5,
            Price::from_cents(250),
        )]);
        let catalogs = InMemoryCatalogSource::new()
            .with_catalog(catalog(1, &[("Milk", 240)]))
            .with_catalog(catalog(2, &[("Eggs", 300)]));

        let comparison = compare_prices(&inventory, &catalogs, 3, "milk")
            .unwrap()
            .unwrap();
        assert_eq!(comparison.name, name("Milk"));
        assert_eq!(comparison.our_price, Price::from_cents(250));

        let prices: Vec<Option<Price>> = comparison.offers.iter().map(|o| o.price).collect();
        assert_eq!(prices, vec![Some(Price::from_cents(240)), None, None]);
    }

    #[test]
    fn item_not_in_stock_yields_none() {
        let catalogs = InMemoryCatalogSource::new();
        assert_eq!(
            compare_prices(&Inventory::new(), &catalogs, 3, "Milk").unwrap(),
            None
        );
    }
}
