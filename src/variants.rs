//! Product variants
//!
//! [`VariantResolver`] answers the shopper-side questions (which colors and
//! sizes can still be picked, how much stock the current pick has), while
//! [`generate_variants`] and [`ensure_unique`] build the set a lojista saves.

use rustc_hash::FxHashSet;
use serde::Serialize;
use thiserror::Error;

use crate::products::ProductVariant;

/// A shopper's partial pick of color and size.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantSelection {
    /// Chosen color
    pub color: Option<String>,

    /// Chosen size
    pub size: Option<String>,
}

impl VariantSelection {
    /// Pick a color, keeping the size.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Pick a size, keeping the color.
    #[must_use]
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }
}

/// Answers availability questions over one product's variants.
#[derive(Debug, Clone, Copy)]
pub struct VariantResolver<'a> {
    variants: &'a [ProductVariant],
}

impl<'a> VariantResolver<'a> {
    /// Resolve over the given variants.
    pub fn new(variants: &'a [ProductVariant]) -> Self {
        Self { variants }
    }

    /// Distinct colors in first-seen order.
    pub fn colors(&self) -> Vec<&'a str> {
        distinct(self.variants.iter().filter_map(|v| v.color.as_deref()))
    }

    /// Distinct sizes in first-seen order.
    pub fn sizes(&self) -> Vec<&'a str> {
        distinct(self.variants.iter().filter_map(|v| v.size.as_deref()))
    }

    /// Colors with stock that fit the selected size (any size when none is selected).
    pub fn available_colors(&self, selection: &VariantSelection) -> Vec<&'a str> {
        distinct(
            self.variants
                .iter()
                .filter(|v| v.stock > 0 && compatible(v.size.as_deref(), selection.size.as_deref()))
                .filter_map(|v| v.color.as_deref()),
        )
    }

    /// Sizes with stock that fit the selected color (any color when none is selected).
    pub fn available_sizes(&self, selection: &VariantSelection) -> Vec<&'a str> {
        distinct(
            self.variants
                .iter()
                .filter(|v| {
                    v.stock > 0 && compatible(v.color.as_deref(), selection.color.as_deref())
                })
                .filter_map(|v| v.size.as_deref()),
        )
    }

    /// Whether every axis the product uses has been picked.
    pub fn is_complete(&self, selection: &VariantSelection) -> bool {
        (self.colors().is_empty() || selection.color.is_some())
            && (self.sizes().is_empty() || selection.size.is_some())
    }

    /// Variant exactly matching the selection; absent values only match absent values.
    pub fn selected_variant(&self, selection: &VariantSelection) -> Option<&'a ProductVariant> {
        if !self.is_complete(selection) {
            return None;
        }

        self.variants.iter().find(|v| {
            v.color.as_deref() == selection.color.as_deref()
                && v.size.as_deref() == selection.size.as_deref()
        })
    }

    /// Stock of the selected variant.
    ///
    /// `None` while the selection is incomplete or the product has no variants;
    /// `Some(0)` when the combination does not exist.
    pub fn stock_for(&self, selection: &VariantSelection) -> Option<u32> {
        if self.variants.is_empty() || !self.is_complete(selection) {
            return None;
        }

        Some(self.selected_variant(selection).map_or(0, |v| v.stock))
    }
}

fn compatible(value: Option<&str>, selected: Option<&str>) -> bool {
    selected.is_none_or(|selected| value == Some(selected))
}

fn distinct<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = FxHashSet::default();

    labels.filter(|label| seen.insert(*label)).collect()
}

/// Errors raised while building a variant set.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VariantError {
    /// Two variants share the same size and color.
    #[error("duplicate variant: color {color:?}, size {size:?}")]
    Duplicate {
        /// Repeated color
        color: Option<String>,

        /// Repeated size
        size: Option<String>,
    },
}

/// A variant about to be inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewVariant {
    /// Color label
    pub color: Option<String>,

    /// Size label
    pub size: Option<String>,

    /// Units in stock
    pub stock: u32,

    /// Stock keeping unit
    pub sku: Option<String>,
}

impl NewVariant {
    /// Create a variant with zero stock and a derived SKU.
    pub fn new(color: Option<String>, size: Option<String>) -> Self {
        let sku = match (&color, &size) {
            (Some(color), Some(size)) => Some(format!("{}-{size}", color.to_uppercase())),
            (Some(color), None) => Some(color.to_uppercase()),
            (None, Some(size)) => Some(size.clone()),
            (None, None) => None,
        };

        Self {
            color,
            size,
            stock: 0,
            sku,
        }
    }

    /// Set the stock.
    #[must_use]
    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = stock;
        self
    }
}

/// Every combination of the given colors and sizes.
///
/// With only one axis populated, one variant per label of that axis. Blank
/// labels are ignored and repeated labels collapse.
pub fn generate_variants<C, S>(colors: C, sizes: S) -> Vec<NewVariant>
where
    C: IntoIterator,
    C::Item: AsRef<str>,
    S: IntoIterator,
    S::Item: AsRef<str>,
{
    let colors = labels(colors);
    let sizes = labels(sizes);

    match (colors.is_empty(), sizes.is_empty()) {
        (true, true) => Vec::new(),
        (false, true) => colors
            .into_iter()
            .map(|color| NewVariant::new(Some(color), None))
            .collect(),
        (true, false) => sizes
            .into_iter()
            .map(|size| NewVariant::new(None, Some(size)))
            .collect(),
        (false, false) => colors
            .iter()
            .flat_map(|color| {
                sizes
                    .iter()
                    .map(|size| NewVariant::new(Some(color.clone()), Some(size.clone())))
            })
            .collect(),
    }
}

fn labels<I>(values: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();

    for value in values {
        let value = value.as_ref().trim();

        if !value.is_empty() && !out.iter().any(|existing| existing == value) {
            out.push(value.to_string());
        }
    }

    out
}

/// Reject a set containing two variants with the same size and color.
///
/// # Errors
///
/// Returns [`VariantError::Duplicate`] for the first repeated pair.
pub fn ensure_unique(variants: &[NewVariant]) -> Result<(), VariantError> {
    let mut seen = FxHashSet::default();

    for variant in variants {
        if !seen.insert((variant.color.as_deref(), variant.size.as_deref())) {
            return Err(VariantError::Duplicate {
                color: variant.color.clone(),
                size: variant.size.clone(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::products::{ProductUuid, VariantUuid};

    use super::*;

    fn variant(color: Option<&str>, size: Option<&str>, stock: u32) -> ProductVariant {
        ProductVariant {
            id: VariantUuid::new(),
            product_id: ProductUuid::new(),
            size: size.map(ToString::to_string),
            color: color.map(ToString::to_string),
            stock,
            sku: None,
        }
    }

    fn shirt() -> Vec<ProductVariant> {
        vec![
            variant(Some("Azul"), Some("P"), 3),
            variant(Some("Azul"), Some("M"), 0),
            variant(Some("Preto"), Some("M"), 2),
            variant(Some("Preto"), Some("G"), 0),
        ]
    }

    #[test]
    fn axes_are_listed_in_first_seen_order() {
        let variants = shirt();
        let resolver = VariantResolver::new(&variants);

        assert_eq!(resolver.colors(), ["Azul", "Preto"]);
        assert_eq!(resolver.sizes(), ["P", "M", "G"]);
    }

    #[test]
    fn availability_depends_on_the_other_axis() {
        let variants = shirt();
        let resolver = VariantResolver::new(&variants);

        let none = VariantSelection::default();
        let medium = VariantSelection::default().with_size("M");
        let black = VariantSelection::default().with_color("Preto");

        assert_eq!(resolver.available_colors(&none), ["Azul", "Preto"]);
        assert_eq!(resolver.available_colors(&medium), ["Preto"]);
        assert_eq!(resolver.available_sizes(&none), ["P", "M"]);
        assert_eq!(resolver.available_sizes(&black), ["M"]);
    }

    #[test]
    fn sold_out_color_offers_no_sizes() {
        let variants = vec![
            variant(Some("Vermelho"), Some("M"), 3),
            variant(Some("Vermelho"), Some("G"), 0),
            variant(Some("Azul"), Some("M"), 0),
            variant(Some("Azul"), Some("G"), 0),
        ];
        let resolver = VariantResolver::new(&variants);

        let red = VariantSelection::default().with_color("Vermelho");
        let blue = VariantSelection::default().with_color("Azul");

        assert_eq!(resolver.available_sizes(&red), ["M"]);
        assert!(resolver.available_sizes(&blue).is_empty());
        assert_eq!(resolver.stock_for(&red.with_size("G")), Some(0));
        assert_eq!(resolver.available_colors(&VariantSelection::default()), ["Vermelho"]);
    }

    #[test]
    fn stock_needs_a_complete_selection() {
        let variants = shirt();
        let resolver = VariantResolver::new(&variants);
        let color_only = VariantSelection::default().with_color("Azul");

        assert!(!resolver.is_complete(&color_only));
        assert_eq!(resolver.stock_for(&color_only), None);
        assert_eq!(resolver.stock_for(&color_only.clone().with_size("P")), Some(3));
    }

    #[test]
    fn missing_combination_has_zero_stock() {
        let variants = shirt();
        let resolver = VariantResolver::new(&variants);
        let selection = VariantSelection::default().with_color("Azul").with_size("G");

        assert_eq!(resolver.selected_variant(&selection), None);
        assert_eq!(resolver.stock_for(&selection), Some(0));
    }

    #[test]
    fn changing_one_axis_keeps_the_other() {
        let selection = VariantSelection::default()
            .with_color("Azul")
            .with_size("P")
            .with_color("Preto");

        assert_eq!(selection.size.as_deref(), Some("P"));
        assert_eq!(selection.color.as_deref(), Some("Preto"));
    }

    #[test]
    fn single_axis_products_match_absent_values() {
        let variants = vec![variant(None, Some("38"), 4), variant(None, Some("39"), 1)];
        let resolver = VariantResolver::new(&variants);
        let selection = VariantSelection::default().with_size("39");

        assert!(resolver.is_complete(&selection));
        assert_eq!(resolver.stock_for(&selection), Some(1));
    }

    #[test]
    fn products_without_variants_have_no_stock_answer() {
        let resolver = VariantResolver::new(&[]);

        assert!(resolver.is_complete(&VariantSelection::default()));
        assert_eq!(resolver.stock_for(&VariantSelection::default()), None);
    }

    #[test]
    fn generate_builds_the_cartesian_product() {
        let variants = generate_variants(["Azul", "Preto"], ["P", "M"]);

        let skus: Vec<_> = variants.iter().filter_map(|v| v.sku.as_deref()).collect();

        assert_eq!(skus, ["AZUL-P", "AZUL-M", "PRETO-P", "PRETO-M"]);
        assert!(variants.iter().all(|v| v.stock == 0));
    }

    #[test]
    fn generate_handles_a_single_axis() {
        let by_color = generate_variants(["Rosa", " ", "Rosa"], Vec::<String>::new());
        let by_size = generate_variants(Vec::<String>::new(), ["38", "39"]);

        assert_eq!(by_color, [NewVariant::new(Some("Rosa".to_string()), None)]);
        assert_eq!(by_color.first().and_then(|v| v.sku.as_deref()), Some("ROSA"));
        assert_eq!(
            by_size.iter().filter_map(|v| v.sku.as_deref()).collect::<Vec<_>>(),
            ["38", "39"]
        );
    }

    #[test]
    fn generate_with_no_axes_is_empty() {
        assert!(generate_variants(Vec::<String>::new(), Vec::<String>::new()).is_empty());
    }

    #[test]
    fn duplicates_are_rejected() -> TestResult {
        let unique = generate_variants(["Azul"], ["P", "M"]);

        ensure_unique(&unique)?;

        let mut repeated = unique;
        repeated.push(NewVariant::new(Some("Azul".to_string()), Some("M".to_string())));

        assert_eq!(
            ensure_unique(&repeated),
            Err(VariantError::Duplicate {
                color: Some("Azul".to_string()),
                size: Some("M".to_string()),
            })
        );

        Ok(())
    }
}
