use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;

use shopkeep_core::SupplierId;
use shopkeep_inventory::{Catalog, Item, Supplier};

use super::{CatalogStore, StoreError};

#[derive(Debug, Default, Serialize, Deserialize)]
struct ItemsFile {
    #[serde(default)]
    items: Vec<Item>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SuppliersFile {
    #[serde(default)]
    suppliers: Vec<Supplier>,
    #[serde(default)]
    prep_supplier_id: Option<SupplierId>,
}

/// Catalog store backed by two JSON documents (`items.json`, `suppliers.json`).
///
/// Each save writes a sibling temp file and renames it over the target, so a
/// crash mid-write leaves the previous document intact.
#[derive(Debug, Clone)]
pub struct JsonFileCatalogStore {
    items_path: PathBuf,
    suppliers_path: PathBuf,
}

impl JsonFileCatalogStore {
    pub fn new(items_path: impl Into<PathBuf>, suppliers_path: impl Into<PathBuf>) -> Self {
        Self {
            items_path: items_path.into(),
            suppliers_path: suppliers_path.into(),
        }
    }

    pub fn items_path(&self) -> &Path {
        &self.items_path
    }

    pub fn suppliers_path(&self) -> &Path {
        &self.suppliers_path
    }
}

impl CatalogStore for JsonFileCatalogStore {
    fn load(&self) -> Result<Catalog, StoreError> {
        let items: ItemsFile = read_document(&self.items_path)?;
        let suppliers: SuppliersFile = read_document(&self.suppliers_path)?;
        Ok(Catalog::restore(
            items.items,
            suppliers.suppliers,
            suppliers.prep_supplier_id,
        ))
    }

    fn save(&self, catalog: &Catalog) -> Result<(), StoreError> {
        let items = ItemsFile {
            items: catalog.items().to_vec(),
        };
        let suppliers = SuppliersFile {
            suppliers: catalog.suppliers().to_vec(),
            prep_supplier_id: catalog.configured_prep_supplier_id(),
        };
        write_document(&self.items_path, &items)?;
        write_document(&self.suppliers_path, &suppliers)?;
        Ok(())
    }
}

fn read_document<T>(path: &Path) -> Result<T, StoreError>
where
    T: DeserializeOwned + Default,
{
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(T::default()),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    if raw.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(&raw).map_err(|source| StoreError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

fn write_document<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
    }

    let body = serde_json::to_string_pretty(value)?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, body).map_err(io_err)?;
    fs::rename(&tmp, path).map_err(io_err)?;
    Ok(())
}
