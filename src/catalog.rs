//! Catalog

use rustc_hash::FxHashSet;

use crate::{
    products::{CatalogEntry, ProductUuid},
    search::ProductFilter,
};

/// The shopper's view of every listed product, newest first.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from fetched entries.
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        let mut catalog = Self::new();

        catalog.replace(entries);

        catalog
    }

    /// Install a freshly fetched list, most recently created first.
    ///
    /// Entries created at the same instant keep their fetched order.
    pub fn replace(&mut self, mut entries: Vec<CatalogEntry>) {
        entries.sort_by(|a, b| b.product.created_at.cmp(&a.product.created_at));

        self.entries = entries;
    }

    /// Entries passing `filter`, in catalog order.
    pub fn search(&self, filter: &ProductFilter) -> Vec<&CatalogEntry> {
        filter.apply(&self.entries)
    }

    /// Look up a product by id.
    pub fn find(&self, product: ProductUuid) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.product.id == product)
    }

    /// Distinct categories, in catalog order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = FxHashSet::default();

        self.entries
            .iter()
            .map(|entry| entry.product.category.as_str())
            .filter(|category| !category.is_empty() && seen.insert(*category))
            .collect()
    }

    /// All entries, in catalog order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
