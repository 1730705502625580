//! Product catalog storage for catalog-import
//!
//! The catalog is the destination collection a successful import is
//! committed into. It is kept as a JSON array of products on disk and loaded
//! fully into memory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::ImportResult;
use crate::product::ProductRecord;

/// A product list backed by a JSON file
#[derive(Debug, Clone)]
pub struct Catalog {
    /// File the catalog is loaded from and saved to
    path: PathBuf,

    /// Products in insertion order
    products: Vec<ProductRecord>,
}

impl Catalog {
    /// Load a catalog, treating a missing file as an empty catalog
    ///
    /// # Returns
    /// * `Ok(Catalog)` - the loaded (or empty) catalog
    /// * `Err` - if the file exists but cannot be read or is not a JSON
    ///   product array
    pub fn open(path: impl AsRef<Path>) -> ImportResult<Self> {
        let path = path.as_ref().to_path_buf();

        let products = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Catalog {} not found, starting empty", path.display());
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Catalog { path, products })
    }

    /// Write the catalog back to its file as pretty-printed JSON
    pub fn save(&self) -> ImportResult<()> {
        let mut json = serde_json::to_string_pretty(&self.products)?;
        json.push('\n');
        fs::write(&self.path, json)?;
        debug!(
            "Saved {} products to {}",
            self.products.len(),
            self.path.display()
        );
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn products(&self) -> &[ProductRecord] {
        &self.products
    }

    /// Mutable access for committing imports
    pub fn products_mut(&mut self) -> &mut Vec<ProductRecord> {
        &mut self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
