//! The in-memory stock: an ordered collection of grocery records.
//!
//! Loaded whole from the inventory store, mutated, and handed back for a
//! full rewrite. Order of records is preserved; duplicates are tolerated and
//! lookups always resolve to the first match.

use chrono::{Days, NaiveDate};

use grocer_core::{DomainError, DomainResult, ItemName};

use crate::item::GroceryRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    records: Vec<GroceryRecord>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<GroceryRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[GroceryRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<GroceryRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GroceryRecord> {
        self.records.iter()
    }

    /// Exact (case-sensitive) lookup by name; first match wins.
    pub fn find_exact(&self, name: &ItemName) -> Option<&GroceryRecord> {
        self.records.iter().find(|r| r.name() == name)
    }

    pub fn find_exact_mut(&mut self, name: &ItemName) -> Option<&mut GroceryRecord> {
        self.records.iter_mut().find(|r| r.name() == name)
    }

    /// Case-insensitive lookup for user-typed names; first match wins.
    pub fn find(&self, query: &str) -> Option<&GroceryRecord> {
        self.records.iter().find(|r| r.name().matches(query))
    }

    /// Append a record. No deduplication is performed.
    pub fn insert(&mut self, record: GroceryRecord) {
        self.records.push(record);
    }

    /// Apply a signed stock change to the item matching `query`.
    pub fn adjust(&mut self, query: &str, delta: i64) -> DomainResult<&GroceryRecord> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.name().matches(query))
            .ok_or_else(|| DomainError::not_found(query.trim()))?;
        record.adjust(delta)?;
        Ok(record)
    }

    /// Items in `category`, compared after capitalization (`"dairy"` matches `"Dairy"`).
    pub fn by_category(&self, category: &str) -> Vec<&GroceryRecord> {
        let wanted = capitalize(category.trim());
        self.records
            .iter()
            .filter(|r| capitalize(r.category()) == wanted)
            .collect()
    }

    /// Items expiring between `today` and `today + window_days`, inclusive.
    pub fn expiring_within(&self, today: NaiveDate, window_days: u64) -> Vec<&GroceryRecord> {
        let until = today
            .checked_add_days(Days::new(window_days))
            .unwrap_or(NaiveDate::MAX);
        self.records
            .iter()
            .filter(|r| r.expires_between(today, until))
            .collect()
    }
}

impl IntoIterator for Inventory {
    type Item = GroceryRecord;
    type IntoIter = std::vec::IntoIter<GroceryRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

/// First character upper-cased, the rest lower-cased.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
