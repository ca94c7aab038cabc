//! CSV-backed stores.
//!
//! Files are read whole and rewritten whole. Writes go to a temporary file in
//! the target's directory which is then renamed over the target, so readers
//! only ever see the previous or the new complete content.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use grocer_core::DomainResult;
use grocer_inventory::Inventory;
use grocer_marketplace::{MarketplaceCatalog, MarketplaceId};
use grocer_purchasing::Order;

use super::rows::{CatalogRow, INVENTORY_HEADER, InventoryRow, ORDER_HEADER};
use super::r#trait::{CatalogSource, InventoryStore, PendingOrderStore, StoreError};

/// Inventory file (`Name,Category,Quantity,Price,Expiration Date`).
#[derive(Debug, Clone)]
pub struct CsvInventoryStore {
    path: PathBuf,
}

impl CsvInventoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl InventoryStore for CsvInventoryStore {
    fn load(&self) -> Result<Inventory, StoreError> {
        let Some(file) = open_if_exists(&self.path)? else {
            tracing::debug!(path = %self.path.display(), "inventory file missing; starting empty");
            return Ok(Inventory::new());
        };
        let records = read_rows(&self.path, file, InventoryRow::into_record)?;
        tracing::debug!(path = %self.path.display(), records = records.len(), "inventory loaded");
        Ok(Inventory::from_records(records))
    }

    fn write_all(&self, inventory: &Inventory) -> Result<(), StoreError> {
        write_atomically(
            &self.path,
            &INVENTORY_HEADER,
            inventory.iter().map(InventoryRow::from_record),
        )?;
        tracing::info!(path = %self.path.display(), records = inventory.len(), "inventory written");
        Ok(())
    }
}

/// One `Name,Category,Price,Quantity` file per marketplace, named from a
/// pattern containing `{id}` (e.g. `Marketplace-{id}.csv`).
#[derive(Debug, Clone)]
pub struct CsvCatalogSource {
    dir: PathBuf,
    file_pattern: String,
}

impl CsvCatalogSource {
    pub fn new(dir: impl Into<PathBuf>, file_pattern: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            file_pattern: file_pattern.into(),
        }
    }

    pub fn path_for(&self, id: MarketplaceId) -> PathBuf {
        self.dir
            .join(self.file_pattern.replace("{id}", &id.to_string()))
    }
}

impl CatalogSource for CsvCatalogSource {
    fn load_catalog(&self, id: MarketplaceId) -> Result<MarketplaceCatalog, StoreError> {
        let path = self.path_for(id);
        let Some(file) = open_if_exists(&path)? else {
            return Err(StoreError::MarketplaceNotFound(id));
        };
        let records = read_rows(&path, file, CatalogRow::into_listing)?;
        tracing::debug!(marketplace = %id, records = records.len(), "catalog loaded");
        Ok(MarketplaceCatalog::new(id, records))
    }
}

/// Intermediate order file (`Name,Category,Price,Quantity`).
///
/// A missing or header-only file means nothing is pending.
#[derive(Debug, Clone)]
pub struct CsvPendingOrderStore {
    path: PathBuf,
}

impl CsvPendingOrderStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PendingOrderStore for CsvPendingOrderStore {
    fn save(&self, order: &Order) -> Result<(), StoreError> {
        write_atomically(
            &self.path,
            &ORDER_HEADER,
            order.lines().iter().map(CatalogRow::from_line),
        )?;
        tracing::debug!(path = %self.path.display(), lines = order.lines().len(), "pending order saved");
        Ok(())
    }

    fn load(&self) -> Result<Option<Order>, StoreError> {
        let Some(file) = open_if_exists(&self.path)? else {
            return Ok(None);
        };
        let lines = read_rows(&self.path, file, CatalogRow::into_line)?;
        if lines.is_empty() {
            return Ok(None);
        }
        Order::from_lines(lines)
            .map(Some)
            .map_err(|source| StoreError::Invalid {
                path: self.path.clone(),
                source,
            })
    }

    fn clear(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

fn open_if_exists(path: &Path) -> Result<Option<File>, StoreError> {
    match File::open(path) {
        Ok(file) => Ok(Some(file)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn read_rows<T, R>(
    path: &Path,
    file: File,
    parse: impl Fn(T) -> DomainResult<R>,
) -> Result<Vec<R>, StoreError>
where
    T: DeserializeOwned,
{
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(file);

    let mut out = Vec::new();
    for (idx, row) in reader.deserialize::<T>().enumerate() {
        let row = row.map_err(|source| StoreError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        // +2: one for the header, one for 1-based numbering.
        let parsed = parse(row).map_err(|source| StoreError::Malformed {
            path: path.to_path_buf(),
            line: idx + 2,
            source,
        })?;
        out.push(parsed);
    }
    Ok(out)
}

fn write_atomically<T: Serialize>(
    path: &Path,
    header: &[&str],
    rows: impl IntoIterator<Item = T>,
) -> Result<(), StoreError> {
    let io_err = |source: io::Error| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };
    let csv_err = |source: csv::Error| StoreError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;

    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(tmp.as_file_mut());
        writer.write_record(header).map_err(csv_err)?;
        for row in rows {
            writer.serialize(row).map_err(csv_err)?;
        }
        writer.flush().map_err(io_err)?;
    }

    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;
    Ok(())
}
