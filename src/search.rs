//! Product filter

use crate::{
    geo::{Coordinates, SearchRadius, within_radius},
    products::CatalogEntry,
};

/// Shopper-side filter over catalog entries.
///
/// Text predicates are trimmed and compared case-insensitively; an empty
/// predicate matches everything. All active predicates must match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    query: String,
    city: String,
    category: String,
    location: Option<Coordinates>,
    radius: SearchRadius,
}

impl ProductFilter {
    /// A filter that matches every entry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Match product name, category, store name or description.
    #[must_use]
    pub fn with_query(mut self, query: impl AsRef<str>) -> Self {
        self.query = normalise(query.as_ref());
        self
    }

    /// Match the store's address or city.
    #[must_use]
    pub fn with_city(mut self, city: impl AsRef<str>) -> Self {
        self.city = normalise(city.as_ref());
        self
    }

    /// Match the product category.
    #[must_use]
    pub fn with_category(mut self, category: impl AsRef<str>) -> Self {
        self.category = normalise(category.as_ref());
        self
    }

    /// Restrict to stores within `radius` of `location`.
    #[must_use]
    pub fn near(mut self, location: Coordinates, radius: SearchRadius) -> Self {
        self.location = Some(location);
        self.radius = radius;
        self
    }

    /// Whether an entry passes every active predicate.
    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        self.matches_query(entry)
            && self.matches_city(entry)
            && self.matches_category(entry)
            && within_radius(self.location, entry.store.coordinates(), self.radius)
    }

    /// Entries passing the filter, in their original order.
    pub fn apply<'a>(&self, entries: &'a [CatalogEntry]) -> Vec<&'a CatalogEntry> {
        entries.iter().filter(|entry| self.matches(entry)).collect()
    }

    /// Whether no predicate is active.
    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
            && self.city.is_empty()
            && self.category.is_empty()
            && self.location.is_none()
    }

    fn matches_query(&self, entry: &CatalogEntry) -> bool {
        if self.query.is_empty() {
            return true;
        }

        let product = &entry.product;

        contains(&product.name, &self.query)
            || contains(&product.category, &self.query)
            || contains(&entry.store.name, &self.query)
            || product
                .description
                .as_deref()
                .is_some_and(|description| contains(description, &self.query))
    }

    fn matches_city(&self, entry: &CatalogEntry) -> bool {
        if self.city.is_empty() {
            return true;
        }

        contains(&entry.store.address, &self.city)
            || entry
                .store
                .city
                .as_deref()
                .is_some_and(|city| contains(city, &self.city))
    }

    fn matches_category(&self, entry: &CatalogEntry) -> bool {
        self.category.is_empty() || contains(&entry.product.category, &self.category)
    }
}

fn normalise(text: &str) -> String {
    text.trim().to_lowercase()
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rust_decimal::Decimal;

    use crate::{
        products::{Product, ProductUuid, SizeKind},
        stores::{StoreProfile, StoreUuid},
    };

    use super::*;

    fn entry(name: &str, category: &str, store: &str, address: &str) -> CatalogEntry {
        CatalogEntry {
            product: Product {
                id: ProductUuid::new(),
                store_id: StoreUuid::new(),
                name: name.to_string(),
                price: Decimal::TEN,
                description: Some("Feito à mão".to_string()),
                category: category.to_string(),
                stock: None,
                image_url: None,
                colors: Vec::new(),
                sizes: Vec::new(),
                size_type: SizeKind::None,
                created_at: Timestamp::UNIX_EPOCH,
            },
            store: StoreProfile {
                name: store.to_string(),
                address: address.to_string(),
                ..StoreProfile::default()
            },
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        let entries = [
            entry("Camiseta", "Roupas", "Loja A", "Rua 1, São Paulo"),
            entry("Tênis", "Calçados", "Loja B", "Rua 2, Campinas"),
        ];

        assert!(ProductFilter::new().is_empty());
        assert_eq!(ProductFilter::new().apply(&entries).len(), 2);
    }

    #[test]
    fn query_is_trimmed_and_case_insensitive() {
        let entries = [
            entry("Camiseta", "Roupas", "Loja A", "Rua 1"),
            entry("Tênis", "Calçados", "Loja B", "Rua 2"),
        ];

        let found = ProductFilter::new().with_query("  CAMI ").apply(&entries);

        assert_eq!(found.len(), 1);
        assert_eq!(found.first().map(|e| e.product.name.as_str()), Some("Camiseta"));
    }

    #[test]
    fn query_searches_store_name_and_description() {
        let item = entry("Camiseta", "Roupas", "Boutique Lua", "Rua 1");

        assert!(ProductFilter::new().with_query("lua").matches(&item));
        assert!(ProductFilter::new().with_query("à mão").matches(&item));
        assert!(!ProductFilter::new().with_query("sapato").matches(&item));
    }

    #[test]
    fn city_matches_address_or_city_column() {
        let by_address = entry("Camiseta", "Roupas", "Loja A", "Av. Brasil, Campinas - SP");
        let mut by_city = entry("Bolsa", "Acessórios", "Loja B", "Av. Brasil, 100");
        by_city.store.city = Some("Campinas".to_string());

        let filter = ProductFilter::new().with_city("campinas");

        assert!(filter.matches(&by_address));
        assert!(filter.matches(&by_city));
    }

    #[test]
    fn category_matches_part_of_the_name() {
        let item = entry("Camiseta", "Roupas Masculinas", "Loja A", "Rua 1");

        assert!(ProductFilter::new().with_category("roupas").matches(&item));
        assert!(ProductFilter::new().with_category(" MASCULINAS ").matches(&item));
        assert!(!ProductFilter::new().with_category("calçados").matches(&item));
    }

    #[test]
    fn predicates_are_combined() {
        let item = entry("Camiseta", "Roupas", "Loja A", "Rua 1, Santos");

        assert!(!ProductFilter::new()
            .with_query("camiseta")
            .with_city("campinas")
            .matches(&item));
    }

    #[test]
    fn distance_excludes_far_stores_and_keeps_unlocated_ones() {
        let mut far = entry("Camiseta", "Roupas", "Loja Rio", "Rua 1");
        far.store.latitude = Some(-22.9068);
        far.store.longitude = Some(-43.1729);
        let unlocated = entry("Bolsa", "Acessórios", "Loja B", "Rua 2");

        let filter = ProductFilter::new()
            .near(Coordinates::new(-23.5505, -46.6333), SearchRadius::new(50));

        assert!(!filter.matches(&far));
        assert!(filter.matches(&unlocated));
    }

    #[test]
    fn apply_preserves_order() {
        let entries = [
            entry("Camiseta Azul", "Roupas", "Loja A", "Rua 1"),
            entry("Tênis", "Calçados", "Loja B", "Rua 2"),
            entry("Camiseta Preta", "Roupas", "Loja C", "Rua 3"),
        ];

        let names: Vec<_> = ProductFilter::new()
            .with_category("Roupas")
            .apply(&entries)
            .into_iter()
            .map(|e| e.product.name.as_str())
            .collect();

        assert_eq!(names, ["Camiseta Azul", "Camiseta Preta"]);
    }
}
