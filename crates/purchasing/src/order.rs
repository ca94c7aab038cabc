use serde::{Deserialize, Serialize};

use grocer_core::{DomainError, DomainResult, ItemName, Price, ValueObject};
use grocer_marketplace::MarketplaceCatalog;

/// What the user asked for: a product name as typed and a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRequest {
    pub name: String,
    pub quantity: u32,
}

impl ItemRequest {
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}

/// Order line item, priced at the time the order was built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineItem {
    name: ItemName,
    category: String,
    price: Price,
    quantity: u32,
}

impl OrderLineItem {
    pub fn new(name: ItemName, category: impl Into<String>, price: Price, quantity: u32) -> Self {
        Self {
            name,
            category: category.into(),
            price,
            quantity,
        }
    }

    pub fn name(&self) -> &ItemName {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Unit price.
    pub fn price(&self) -> Price {
        self.price
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn subtotal(&self) -> Option<Price> {
        self.price.times(self.quantity)
    }
}

impl ValueObject for OrderLineItem {}

/// A non-empty, validated order and its total cost.
///
/// Serialized as its list of lines; deserializing re-runs [`Order::from_lines`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<OrderLineItem>", into = "Vec<OrderLineItem>")]
pub struct Order {
    lines: Vec<OrderLineItem>,
    total_cost: Price,
}

impl Order {
    /// Assemble an order from already-priced lines (e.g. a persisted pending order).
    pub fn from_lines(lines: Vec<OrderLineItem>) -> DomainResult<Self> {
        if lines.is_empty() {
            return Err(DomainError::validation(
                "order must contain at least one item",
            ));
        }

        let mut total_cost = Price::ZERO;
        for line in &lines {
            total_cost = line
                .subtotal()
                .and_then(|subtotal| total_cost.checked_add(subtotal))
                .ok_or_else(|| DomainError::invariant("order total overflows"))?;
        }

        Ok(Self { lines, total_cost })
    }

    pub fn lines(&self) -> &[OrderLineItem] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<OrderLineItem> {
        self.lines
    }

    pub fn total_cost(&self) -> Price {
        self.total_cost
    }
}

impl TryFrom<Vec<OrderLineItem>> for Order {
    type Error = DomainError;

    fn try_from(lines: Vec<OrderLineItem>) -> Result<Self, Self::Error> {
        Order::from_lines(lines)
    }
}

impl From<Order> for Vec<OrderLineItem> {
    fn from(order: Order) -> Self {
        order.lines
    }
}

/// Validate every request against `catalog` and price the order.
///
/// All-or-nothing: the first unknown item or over-sized request aborts the
/// whole order and nothing is returned.
pub fn build_order(catalog: &MarketplaceCatalog, requests: &[ItemRequest]) -> DomainResult<Order> {
    if requests.is_empty() {
        return Err(DomainError::validation(
            "order must contain at least one item",
        ));
    }

    let mut lines = Vec::with_capacity(requests.len());
    for request in requests {
        if request.quantity == 0 {
            return Err(DomainError::validation(format!(
                "quantity of '{}' must be positive",
                request.name.trim()
            )));
        }

        let listed = catalog
            .get(&request.name)
            .ok_or_else(|| DomainError::unknown_item(request.name.trim()))?;

        if request.quantity > listed.quantity {
            return Err(DomainError::insufficient_stock(
                request.name.trim(),
                request.quantity,
                listed.quantity,
            ));
        }

        lines.push(OrderLineItem::new(
            listed.name.clone(),
            listed.category.clone(),
            listed.price,
            request.quantity,
        ));
    }

    Order::from_lines(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use grocer_marketplace::{MarketplaceId, MarketplaceRecord};

    fn listed(name: &str, category: &str, cents: u64, quantity: u32) -> MarketplaceRecord {
        MarketplaceRecord {
            name: ItemName::new(name).unwrap(),
            category: category.to_string(),
            price: Price::from_cents(cents),
            quantity,
        }
    }

    fn marketplace_two() -> MarketplaceCatalog {
        MarketplaceCatalog::new(
            MarketplaceId::new(2).unwrap(),
            vec![
                listed("Eggs", "Dairy", 300, 10),
                listed("Milk", "Dairy", 260, 20),
                listed("Bread", "Bakery", 199, 5),
            ],
        )
    }

    #[test]
    fn deserialized_order_is_validated_and_total_recomputed() {
        let order = build_order(&marketplace_two(), &[ItemRequest::new("Eggs", 2)]).unwrap();
        let json = serde_json::to_string(&order).unwrap();
        let back: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(back, order);
        assert_eq!(back.total_cost(), Price::from_cents(600));

        assert!(serde_json::from_str::<Order>("[]").is_err());
    }

    #[test]
    fn builds_order_with_catalog_prices_and_total() {
        let order = build_order(
            &marketplace_two(),
            &[ItemRequest::new("milk", 3), ItemRequest::new("Bread", 2)],
        )
        .unwrap();

        assert_eq!(order.lines().len(), 2);
        let milk = &order.lines()[0];
        assert_eq!(milk.name().as_str(), "Milk");
        assert_eq!(milk.category(), "Dairy");
        assert_eq!(milk.price(), Price::from_cents(260));
        assert_eq!(milk.quantity(), 3);
        assert_eq!(order.total_cost(), Price::from_cents(3 * 260 + 2 * 199));
    }

    #[test]
    fn insufficient_stock_aborts_with_requested_and_available() {
        let err = build_order(&marketplace_two(), &[ItemRequest::new("Eggs", 12)]).unwrap_err();
        assert_eq!(err, DomainError::insufficient_stock("Eggs", 12, 10));
    }

    #[test]
    fn unknown_item_aborts_whole_order() {
        let err = build_order(
            &marketplace_two(),
            &[ItemRequest::new("Milk", 1), ItemRequest::new("Caviar", 1)],
        )
        .unwrap_err();
        assert_eq!(err, DomainError::unknown_item("Caviar"));
    }

    #[test]
    fn first_invalid_line_is_reported() {
        let err = build_order(
            &marketplace_two(),
            &[ItemRequest::new("Eggs", 11), ItemRequest::new("Caviar", 1)],
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::InsufficientStock { .. }));
    }

    #[test]
    fn requesting_exactly_the_available_quantity_is_allowed() {
        let order = build_order(&marketplace_two(), &[ItemRequest::new("Bread", 5)]).unwrap();
        assert_eq!(order.total_cost(), Price::from_cents(995));
    }

    #[test]
    fn empty_order_and_zero_quantity_are_rejected() {
        assert!(matches!(
            build_order(&marketplace_two(), &[]),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            build_order(&marketplace_two(), &[ItemRequest::new("Milk", 0)]),
            Err(DomainError::Validation(_))
        ));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: valid requests yield one line each and total = Σ(price × qty).
            #[test]
            fn total_cost_is_sum_of_line_costs(
                listing in prop::collection::vec((1u64..10_000, 1u32..500), 1..12),
                picks in prop::collection::vec((any::<prop::sample::Index>(), any::<prop::sample::Index>()), 1..20),
            ) {
                let records: Vec<_> = listing
                    .iter()
                    .enumerate()
                    .map(|(i, (cents, qty))| listed(&format!("Item{i}"), "Pantry", *cents, *qty))
                    .collect();
                let catalog = MarketplaceCatalog::new(MarketplaceId::new(1).unwrap(), records.clone());

                let requests: Vec<_> = picks
                    .iter()
                    .map(|(item, qty)| {
                        let record = &records[item.index(records.len())];
                        let quantity = 1 + qty.index(record.quantity as usize) as u32;
                        ItemRequest::new(record.name.as_str(), quantity)
                    })
                    .collect();

                let order = build_order(&catalog, &requests).unwrap();
                prop_assert_eq!(order.lines().len(), requests.len());

                let expected: u64 = requests
                    .iter()
                    .map(|r| catalog.get(&r.name).unwrap().price.cents() * u64::from(r.quantity))
                    .sum();
                prop_assert_eq!(order.total_cost().cents(), expected);
            }

            /// Property: any request above the available stock fails with InsufficientStock.
            #[test]
            fn over_request_always_fails(available in 0u32..1_000, excess in 1u32..1_000) {
                let catalog = MarketplaceCatalog::new(
                    MarketplaceId::new(1).unwrap(),
                    vec![listed("Rice", "Grains", 150, available)],
                );
                let err = build_order(&catalog, &[ItemRequest::new("Rice", available + excess)]).unwrap_err();
                prop_assert_eq!(err, DomainError::insufficient_stock("Rice", available + excess, available));
            }
        }
    }
}
