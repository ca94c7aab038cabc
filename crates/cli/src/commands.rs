//! Menu commands.
//!
//! Each command prompts for what it needs, calls into the domain/infra crates
//! and prints the outcome. Failures are returned to the menu loop, which
//! reports them and carries on.

use std::io::{self, BufRead, Write};

use thiserror::Error;

use grocer_core::DomainError;
use grocer_infra::store::{CatalogSource, InventoryStore, PendingOrderStore, StoreError};
use grocer_infra::{OrderDeskError, compare_prices};
use grocer_inventory::capitalize;
use grocer_purchasing::ItemRequest;

use crate::app::App;
use crate::prompt::{Prompter, parse_number};
use crate::views;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Desk(#[from] OrderDeskError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Reading from or writing to the terminal failed.
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),

    #[error("input ended")]
    EndOfInput,
}

impl CommandError {
    pub fn code(&self) -> &'static str {
        match self {
            CommandError::Desk(e) => e.code(),
            CommandError::Store(e) => e.code(),
            CommandError::Domain(e) => e.code(),
            CommandError::Terminal(_) => "terminal",
            CommandError::EndOfInput => "end_of_input",
        }
    }

    /// Errors after which the menu cannot continue.
    pub fn ends_session(&self) -> bool {
        matches!(self, CommandError::Terminal(_) | CommandError::EndOfInput)
    }
}

fn ask<R: BufRead, W: Write>(io: &mut Prompter<R, W>, prompt: &str) -> Result<String, CommandError> {
    io.ask(prompt)?.ok_or(CommandError::EndOfInput)
}

impl<I, C, P> App<I, C, P>
where
    I: InventoryStore,
    C: CatalogSource,
    P: PendingOrderStore,
{
    pub(crate) fn display_current_stock<R: BufRead, W: Write>(
        &self,
        io: &mut Prompter<R, W>,
    ) -> Result<(), CommandError> {
        let inventory = self.desk.inventory_store().load()?;
        views::stock_table(inventory.iter()).render(io.out())?;
        Ok(())
    }

    pub(crate) fn search_product<R: BufRead, W: Write>(
        &self,
        io: &mut Prompter<R, W>,
    ) -> Result<(), CommandError> {
        let query = ask(io, "Enter the name of the product to search: ")?;
        let inventory = self.desk.inventory_store().load()?;
        match inventory.find(&query) {
            Some(record) => views::write_record(io.out(), record)?,
            None => writeln!(io.out(), "No product named '{}' found.", query.trim())?,
        }
        Ok(())
    }

    pub(crate) fn adjust_groceries<R: BufRead, W: Write>(
        &self,
        io: &mut Prompter<R, W>,
    ) -> Result<(), CommandError> {
        let query = ask(io, "Enter the name of the product to update: ")?;
        let delta: i64 = parse_number(
            &ask(io, "Enter the quantity change (e.g. 5 or -2): ")?,
            "quantity change",
        )?;

        let mut inventory = self.desk.inventory_store().load()?;
        let updated = inventory.adjust(&query, delta)?;
        let (name, quantity) = (updated.name().clone(), updated.quantity());
        self.desk.inventory_store().write_all(&inventory)?;

        tracing::info!(item = %name, delta, quantity, "stock adjusted");
        writeln!(io.out(), "Updated '{name}': quantity is now {quantity}.")?;
        Ok(())
    }

    pub(crate) fn track_expiring_soon<R: BufRead, W: Write>(
        &self,
        io: &mut Prompter<R, W>,
    ) -> Result<(), CommandError> {
        let window = self.settings.expiring_window_days;
        let inventory = self.desk.inventory_store().load()?;
        let expiring = inventory.expiring_within(self.today(), window);
        views::write_expiring(io.out(), &expiring, window)?;
        Ok(())
    }

    pub(crate) fn compare_prices<R: BufRead, W: Write>(
        &self,
        io: &mut Prompter<R, W>,
    ) -> Result<(), CommandError> {
        let query = ask(io, "Enter the name of the product to compare prices: ")?;
        let inventory = self.desk.inventory_store().load()?;
        let comparison = compare_prices(
            &inventory,
            self.desk.catalogs(),
            self.settings.marketplace_count,
            &query,
        )?;

        writeln!(
            io.out(),
            "\nPrice Comparison for '{}' with Marketplaces:",
            query.trim()
        )?;
        match comparison {
            Some(c) => views::write_comparison(io.out(), &c)?,
            None => writeln!(
                io.out(),
                "No product named '{}' found in the current stock.",
                query.trim()
            )?,
        }
        Ok(())
    }

    pub(crate) fn display_items_by_category<R: BufRead, W: Write>(
        &self,
        io: &mut Prompter<R, W>,
    ) -> Result<(), CommandError> {
        let category = capitalize(ask(io, "Enter the category to display items: ")?.trim());
        let inventory = self.desk.inventory_store().load()?;
        let items = inventory.by_category(&category);

        if items.is_empty() {
            writeln!(io.out(), "No items found in the specified category.")?;
        } else {
            views::category_table(&category, &items).render(io.out())?;
        }
        Ok(())
    }

    /// Build an order against one marketplace and save it as the pending order.
    pub(crate) fn place_order<R: BufRead, W: Write>(
        &self,
        io: &mut Prompter<R, W>,
    ) -> Result<(), CommandError> {
        writeln!(io.out(), "\nPlace an Order:")?;
        let catalog = self
            .desk
            .find_catalog(&ask(io, "Enter the marketplace number to order from: ")?)?;
        let marketplace = catalog.id();

        let count: usize = parse_number(&ask(io, "Enter the number of items: ")?, "number of items")?;
        let mut requests = Vec::new();
        for i in 1..=count {
            let name = ask(io, &format!("Enter the name of item {i}: "))?;
            let quantity: u32 = parse_number(
                &ask(io, &format!("Enter the quantity of {}: ", name.trim()))?,
                "quantity",
            )?;
            requests.push(ItemRequest::new(name, quantity));
        }

        let order = self.desk.place_order(&catalog, &requests)?;

        let out = io.out();
        writeln!(
            out,
            "\nTotal cost of the order from Marketplace {marketplace}: ${}",
            order.total_cost()
        )?;
        writeln!(out, "Order successfully placed.")?;
        writeln!(out, "Order details saved to {}.", self.settings.order_file)?;
        views::order_table(&order).render(out)?;
        Ok(())
    }

    /// Merge the pending order into the stock, then show the refreshed stock.
    pub(crate) fn copy_ordered_items_to_inventory<R: BufRead, W: Write>(
        &self,
        io: &mut Prompter<R, W>,
    ) -> Result<(), CommandError> {
        let reconciled = self.desk.reconcile_pending()?;
        writeln!(io.out(), "Ordered items copied to grocery inventory.")?;
        views::stock_table(reconciled.inventory.iter()).render(io.out())?;
        Ok(())
    }
}
