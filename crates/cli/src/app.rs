//! Application state and the numbered menu loop.

use std::io::{self, BufRead, Write};

use chrono::{Local, NaiveDate};

use grocer_infra::store::{CatalogSource, InventoryStore, PendingOrderStore};
use grocer_infra::{OrderDesk, Settings};

use crate::commands::CommandError;
use crate::prompt::Prompter;

/// Menu entries, numbered 1–8 on screen.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MenuChoice {
    DisplayStock,
    SearchProduct,
    UpdateGroceries,
    TrackExpiring,
    ComparePrices,
    ItemsByCategory,
    PlaceOrder,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 8] = [
        MenuChoice::DisplayStock,
        MenuChoice::SearchProduct,
        MenuChoice::UpdateGroceries,
        MenuChoice::TrackExpiring,
        MenuChoice::ComparePrices,
        MenuChoice::ItemsByCategory,
        MenuChoice::PlaceOrder,
        MenuChoice::Exit,
    ];

    pub fn from_number(n: u32) -> Option<Self> {
        let idx = usize::try_from(n).ok()?.checked_sub(1)?;
        Self::ALL.get(idx).copied()
    }

    pub fn number(self) -> u32 {
        Self::ALL.iter().position(|c| *c == self).map_or(0, |i| i as u32 + 1)
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::DisplayStock => "Display Current Stock",
            MenuChoice::SearchProduct => "Search for a Product",
            MenuChoice::UpdateGroceries => "Update Groceries",
            MenuChoice::TrackExpiring => "Track Expiring Perishable Food Items",
            MenuChoice::ComparePrices => "Price Comparison",
            MenuChoice::ItemsByCategory => "Display Items by Category",
            MenuChoice::PlaceOrder => "Place Order",
            MenuChoice::Exit => "Exit",
        }
    }
}

/// Everything a session needs: settings and the stores behind the order desk.
pub struct App<I, C, P> {
    pub(crate) settings: Settings,
    pub(crate) desk: OrderDesk<I, C, P>,
    today: Option<NaiveDate>,
}

impl<I, C, P> App<I, C, P>
where
    I: InventoryStore,
    C: CatalogSource,
    P: PendingOrderStore,
{
    pub fn new(settings: Settings, desk: OrderDesk<I, C, P>) -> Self {
        Self {
            settings,
            desk,
            today: None,
        }
    }

    /// Pin "today" for the expiration scan instead of reading the clock.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn desk(&self) -> &OrderDesk<I, C, P> {
        &self.desk
    }

    pub(crate) fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Run the menu until the user exits or input ends. Returns the writer.
    ///
    /// Command failures are reported and the menu is shown again; only a
    /// failing terminal ends the loop with an error.
    pub fn run<R: BufRead, W: Write>(&self, input: R, output: W) -> io::Result<W> {
        let mut io = Prompter::new(input, output);

        loop {
            write_menu(io.out())?;
            let Some(raw) = io.ask("Enter your choice: ")? else {
                break;
            };

            let Ok(number) = raw.trim().parse::<u32>() else {
                tracing::debug!(input = %raw, "non-numeric menu input");
                writeln!(io.out(), "Invalid input. Please enter a number.")?;
                continue;
            };

            let Some(choice) = MenuChoice::from_number(number) else {
                writeln!(io.out(), "Invalid choice. Please try again.")?;
                continue;
            };

            if choice == MenuChoice::Exit {
                writeln!(io.out(), "\nThank you for using the Grocery Tracker App. Goodbye!")?;
                break;
            }

            tracing::debug!(choice = choice.label(), "menu selection");
            match self.dispatch(choice, &mut io) {
                Ok(()) => {}
                Err(CommandError::EndOfInput) => break,
                Err(CommandError::Terminal(e)) => return Err(e),
                Err(e) => report(&mut io, &e)?,
            }
        }

        Ok(io.into_output())
    }

    fn dispatch<R: BufRead, W: Write>(
        &self,
        choice: MenuChoice,
        io: &mut Prompter<R, W>,
    ) -> Result<(), CommandError> {
        match choice {
            MenuChoice::DisplayStock => self.display_current_stock(io),
            MenuChoice::SearchProduct => self.search_product(io),
            MenuChoice::UpdateGroceries => self.adjust_groceries(io),
            MenuChoice::TrackExpiring => self.track_expiring_soon(io),
            MenuChoice::ComparePrices => self.compare_prices(io),
            MenuChoice::ItemsByCategory => self.display_items_by_category(io),
            MenuChoice::PlaceOrder => {
                match self.place_order(io) {
                    Ok(()) => {}
                    Err(e) if e.ends_session() => return Err(e),
                    Err(e) => report(io, &e)?,
                }
                self.copy_ordered_items_to_inventory(io)
            }
            MenuChoice::Exit => Ok(()),
        }
    }
}

fn write_menu(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\nWelcome to the Grocery Tracker App!")?;
    writeln!(out, "Menu Options:")?;
    for choice in MenuChoice::ALL {
        writeln!(out, "{}. {}", choice.number(), choice.label())?;
    }
    Ok(())
}

fn report<R: BufRead, W: Write>(io: &mut Prompter<R, W>, err: &CommandError) -> io::Result<()> {
    tracing::warn!(error.code = err.code(), error = %err, "command failed");
    writeln!(io.out(), "Error: {err}")
}
