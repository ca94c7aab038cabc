//! Plain-text tables for the terminal.

use std::io::{self, Write};

use chrono::NaiveDate;

use grocer_inventory::GroceryRecord;
use grocer_infra::PriceComparison;
use grocer_purchasing::Order;

const DATE_FORMAT: &str = "%d/%m/%Y";

/// A titled, left-aligned text table.
#[derive(Debug, Default)]
pub struct Table {
    title: Option<String>,
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&'static str]) -> Self {
        Self {
            title: None,
            headers: headers.to_vec(),
            rows: Vec::new(),
        }
    }

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        let widths: Vec<usize> = self
            .headers
            .iter()
            .enumerate()
            .map(|(i, h)| {
                self.rows
                    .iter()
                    .filter_map(|r| r.get(i))
                    .map(|c| c.chars().count())
                    .chain(std::iter::once(h.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        if let Some(title) = &self.title {
            writeln!(out, "{title}")?;
        }

        let header: Vec<String> = self.headers.iter().map(|h| h.to_string()).collect();
        write_row(out, &header, &widths)?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        write_row(out, &rule, &widths)?;
        for row in &self.rows {
            write_row(out, row, &widths)?;
        }
        Ok(())
    }
}

fn write_row(out: &mut impl Write, cells: &[String], widths: &[usize]) -> io::Result<()> {
    let line: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(i, &w)| format!("{:<w$}", cells.get(i).map(String::as_str).unwrap_or("")))
        .collect();
    writeln!(out, "| {} |", line.join(" | "))
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

pub fn stock_table<'a>(records: impl IntoIterator<Item = &'a GroceryRecord>) -> Table {
    let mut table = Table::new(&["Name", "Category", "Quantity", "Price", "Expiration Date"])
        .titled("Current Stock");
    for r in records {
        table.add_row(vec![
            r.name().to_string(),
            r.category().to_string(),
            r.quantity().to_string(),
            format!("${}", r.price()),
            format_date(r.expiration_date()),
        ]);
    }
    table
}

pub fn category_table(category: &str, records: &[&GroceryRecord]) -> Table {
    let mut table = Table::new(&["Name", "Quantity", "Price"])
        .titled(format!("Grocery Items in the Category '{category}'"));
    for r in records {
        table.add_row(vec![
            r.name().to_string(),
            r.quantity().to_string(),
            format!("${}", r.price()),
        ]);
    }
    table
}

pub fn order_table(order: &Order) -> Table {
    let mut table = Table::new(&["Name", "Category", "Price", "Quantity"]).titled("Ordered Items:");
    for line in order.lines() {
        table.add_row(vec![
            line.name().to_string(),
            line.category().to_string(),
            line.price().to_string(),
            line.quantity().to_string(),
        ]);
    }
    table
}

pub fn write_record(out: &mut impl Write, record: &GroceryRecord) -> io::Result<()> {
    write!(
        out,
        "{} ({}) - Quantity: {} - Price: ${}",
        record.name(),
        record.category(),
        record.quantity(),
        record.price()
    )?;
    match record.expiration_date() {
        Some(_) => writeln!(out, " - Expires on {}", format_date(record.expiration_date())),
        None => writeln!(out),
    }
}

pub fn write_expiring(out: &mut impl Write, records: &[&GroceryRecord], window_days: u64) -> io::Result<()> {
    if records.is_empty() {
        return writeln!(out, "No items are expiring in the next {window_days} days.");
    }
    writeln!(out, "\nItems Expiring in the Next {window_days} Days:")?;
    for r in records {
        writeln!(out, "{} - Expires on {}", r.name(), format_date(r.expiration_date()))?;
    }
    Ok(())
}

pub fn write_comparison(out: &mut impl Write, comparison: &PriceComparison) -> io::Result<()> {
    write!(out, "{}: Our Price - ${}", comparison.name, comparison.our_price)?;
    for offer in &comparison.offers {
        match offer.price {
            Some(price) => write!(out, " | Marketplace {} Price - ${price}", offer.marketplace)?,
            None => write!(out, " | Marketplace {} Price - Not Available", offer.marketplace)?,
        }
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use grocer_core::{ItemName, Price};

    fn render(table: &Table) -> String {
        let mut out = Vec::new();
        table.render(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn columns_pad_to_widest_cell() {
        let mut table = Table::new(&["Name", "Qty"]);
        table.add_row(vec!["Watermelon".to_string(), "1".to_string()]);
        assert_eq!(
            render(&table),
            "| Name       | Qty |\n\
             | ---------- | --- |\n\
             | Watermelon | 1   |\n"
        );
    }

    #[test]
    fn stock_table_formats_price_and_date() {
        let milk = GroceryRecord::new(ItemName::new("Milk").unwrap(), "Dairy", 5, Price::from_cents(250))
            .with_expiration_date(NaiveDate::from_ymd_opt(2026, 11, 30));
        let text = render(&stock_table([&milk]));
        assert!(text.starts_with("Current Stock\n"));
        assert!(text.contains("| Milk | Dairy    | 5        | $2.50 | 30/11/2026      |"));
    }
}
