//! On-disk row shapes. Fields stay textual here and are parsed into domain
//! types at the load boundary so a bad cell reports as `InputFormat`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use grocer_core::{DomainError, DomainResult, ItemName, Price};
use grocer_inventory::GroceryRecord;
use grocer_marketplace::MarketplaceRecord;
use grocer_purchasing::OrderLineItem;

pub(crate) const DATE_FORMAT: &str = "%d/%m/%Y";

pub(crate) const INVENTORY_HEADER: [&str; 5] =
    ["Name", "Category", "Quantity", "Price", "Expiration Date"];
pub(crate) const ORDER_HEADER: [&str; 4] = ["Name", "Category", "Price", "Quantity"];

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct InventoryRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Quantity")]
    quantity: String,
    #[serde(rename = "Price")]
    price: String,
    #[serde(rename = "Expiration Date", default)]
    expiration_date: Option<String>,
}

impl InventoryRow {
    pub(crate) fn from_record(record: &GroceryRecord) -> Self {
        Self {
            name: record.name().to_string(),
            category: record.category().to_string(),
            quantity: record.quantity().to_string(),
            price: record.price().to_string(),
            expiration_date: record
                .expiration_date()
                .map(|d| d.format(DATE_FORMAT).to_string()),
        }
    }

    pub(crate) fn into_record(self) -> DomainResult<GroceryRecord> {
        let expiration_date = match self.expiration_date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(parse_date(raw)?),
        };
        Ok(GroceryRecord::new(
            ItemName::new(&self.name)?,
            self.category.trim(),
            parse_quantity(&self.quantity)?,
            self.price.parse::<Price>()?,
        )
        .with_expiration_date(expiration_date))
    }
}

/// Marketplace rows share their column set with order rows.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CatalogRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Price")]
    price: String,
    #[serde(rename = "Quantity")]
    quantity: String,
}

impl CatalogRow {
    pub(crate) fn from_line(line: &OrderLineItem) -> Self {
        Self {
            name: line.name().to_string(),
            category: line.category().to_string(),
            price: line.price().to_string(),
            quantity: line.quantity().to_string(),
        }
    }

    pub(crate) fn into_listing(self) -> DomainResult<MarketplaceRecord> {
        Ok(MarketplaceRecord {
            name: ItemName::new(&self.name)?,
            category: self.category.trim().to_string(),
            price: self.price.parse()?,
            quantity: parse_quantity(&self.quantity)?,
        })
    }

    pub(crate) fn into_line(self) -> DomainResult<OrderLineItem> {
        Ok(OrderLineItem::new(
            ItemName::new(&self.name)?,
            self.category.trim(),
            self.price.parse()?,
            parse_quantity(&self.quantity)?,
        ))
    }
}

fn parse_quantity(raw: &str) -> DomainResult<u32> {
    raw.trim()
        .parse()
        .map_err(|_| DomainError::input_format(format!("invalid quantity '{}'", raw.trim())))
}

fn parse_date(raw: &str) -> DomainResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| {
        DomainError::input_format(format!("invalid expiration date '{raw}' (expected DD/MM/YYYY)"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(quantity: &str, price: &str, expiration_date: Option<&str>) -> InventoryRow {
        InventoryRow {
            name: "Milk".to_string(),
            category: "Dairy".to_string(),
            quantity: quantity.to_string(),
            price: price.to_string(),
            expiration_date: expiration_date.map(str::to_string),
        }
    }

    #[test]
    fn inventory_row_parses_optional_date() {
        let record = row("5", "2.50", Some("31/12/2026")).into_record().unwrap();
        assert_eq!(record.quantity(), 5);
        assert_eq!(record.expiration_date(), NaiveDate::from_ymd_opt(2026, 12, 31));

        let undated = row("5", "2.50", Some("  ")).into_record().unwrap();
        assert_eq!(undated.expiration_date(), None);
    }

    #[test]
    fn bad_cells_are_input_format_errors() {
        for bad in [
            row("-1", "2.50", None),
            row("five", "2.50", None),
            row("5", "cheap", None),
            row("5", "2.50", Some("2026-12-31")),
        ] {
            assert!(matches!(bad.into_record(), Err(DomainError::InputFormat(_))));
        }
    }

    #[test]
    fn record_renders_back_to_file_format() {
        let record = row("5", "2.5", Some("01/02/2027")).into_record().unwrap();
        let back = InventoryRow::from_record(&record);
        assert_eq!(back.price, "2.50");
        assert_eq!(back.expiration_date.as_deref(), Some("01/02/2027"));
    }
}
