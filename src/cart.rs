//! Cart

use std::fmt::{self, Display, Formatter};

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::{
    pricing::{TotalPriceError, line_subtotal, total_price},
    products::{CatalogEntry, ProductUuid, ProductVariant},
    stores::StoreProfile,
};

pub mod storage;

/// Errors related to cart mutation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// Quantities must be at least one.
    #[error("quantity must be at least 1")]
    ZeroQuantity,

    /// The product has color or size options but none was chosen.
    #[error("choose a variant of {0:?} before adding it to the cart")]
    VariantRequired(String),

    /// The chosen variant belongs to a different product.
    #[error("variant does not belong to product {0}")]
    VariantMismatch(ProductUuid),

    /// The chosen variant has no stock.
    #[error("{0:?} is out of stock")]
    OutOfStock(String),

    /// No line with this key.
    #[error("cart item {0} not found")]
    NotFound(CartKey),
}

/// Identifies a cart line: `{product}` or `{product}-{variant}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartKey(String);

impl CartKey {
    /// Key for a product, optionally narrowed to one of its variants.
    pub fn new(product: ProductUuid, variant: Option<&ProductVariant>) -> Self {
        match variant {
            Some(variant) => Self(format!("{product}-{}", variant.id)),
            None => Self(product.to_string()),
        }
    }

    /// The key as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CartKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CartKey {
    fn from(key: &str) -> Self {
        Self(key.trim().to_string())
    }
}

/// The size and color a cart line was added with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantDescriptor {
    /// Size label
    pub size: Option<String>,

    /// Color label
    pub color: Option<String>,
}

impl VariantDescriptor {
    /// `color / size`, skipping whichever is missing.
    pub fn label(&self) -> Option<String> {
        match (self.color.as_deref(), self.size.as_deref()) {
            (Some(color), Some(size)) => Some(format!("{color} / {size}")),
            (Some(label), None) | (None, Some(label)) => Some(label.to_string()),
            (None, None) => None,
        }
    }
}

impl From<&ProductVariant> for VariantDescriptor {
    fn from(variant: &ProductVariant) -> Self {
        Self {
            size: variant.size.clone(),
            color: variant.color.clone(),
        }
    }
}

/// A product (or variant) in the cart with a snapshot of its store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Line key
    pub id: CartKey,

    /// Product the line was added from
    #[serde(rename = "productId")]
    pub product_id: ProductUuid,

    /// Product name at the time it was added
    pub name: String,

    /// Unit price at the time it was added
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Product image
    #[serde(default)]
    pub image_url: Option<String>,

    /// Units, always at least one
    #[serde(deserialize_with = "positive_quantity")]
    pub quantity: u32,

    /// Chosen variant
    #[serde(default)]
    pub variant: Option<VariantDescriptor>,

    /// Store snapshot
    pub store: StoreProfile,
}

impl CartLineItem {
    /// Name with the variant appended, as `Name (color / size)`.
    pub fn display_name(&self) -> String {
        match self.variant.as_ref().and_then(VariantDescriptor::label) {
            Some(label) => format!("{} ({label})", self.name),
            None => self.name.clone(),
        }
    }

    /// Price times quantity.
    pub fn subtotal(&self) -> Decimal {
        line_subtotal(self.price, self.quantity)
    }
}

fn positive_quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(u32::deserialize(deserializer)?.max(1))
}

/// Cart lines sold by one store, in cart order.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreGroup<'a> {
    /// Store snapshot taken from the first line
    pub store: &'a StoreProfile,

    /// Lines sold by this store
    pub items: Vec<&'a CartLineItem>,
}

impl StoreGroup<'_> {
    /// Sum of the group's line subtotals.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalPriceError`] if an amount overflows.
    pub fn total(&self) -> Result<Money<'static, Currency>, TotalPriceError> {
        total_price(self.items.iter().map(|item| (item.price, item.quantity)))
    }
}

/// The shopper's cart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// An empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` units of a catalog entry, optionally as one of its variants.
    ///
    /// Adding a key already in the cart increases its quantity.
    ///
    /// # Errors
    ///
    /// - [`CartError::ZeroQuantity`]: `quantity` is zero.
    /// - [`CartError::VariantRequired`]: the product has variant options and none was given.
    /// - [`CartError::VariantMismatch`]: the variant belongs to another product.
    /// - [`CartError::OutOfStock`]: the variant has no stock.
    pub fn add_item(
        &mut self,
        entry: &CatalogEntry,
        variant: Option<&ProductVariant>,
        quantity: u32,
    ) -> Result<&CartLineItem, CartError> {
        let product = &entry.product;

        if quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }

        match variant {
            None if product.has_variant_axes() => {
                return Err(CartError::VariantRequired(product.name.clone()));
            }
            Some(variant) if variant.product_id != product.id => {
                return Err(CartError::VariantMismatch(product.id));
            }
            Some(variant) if variant.stock == 0 => {
                return Err(CartError::OutOfStock(product.name.clone()));
            }
            _ => {}
        }

        let key = CartKey::new(product.id, variant);

        let index = match self.position(&key) {
            Some(index) => {
                if let Some(item) = self.items.get_mut(index) {
                    item.quantity = item.quantity.saturating_add(quantity);
                }

                index
            }
            None => {
                self.items.push(CartLineItem {
                    id: key.clone(),
                    product_id: product.id,
                    name: product.name.clone(),
                    price: product.price,
                    image_url: product.image_url.clone(),
                    quantity,
                    variant: variant.map(VariantDescriptor::from),
                    store: entry.store.clone(),
                });

                self.items.len() - 1
            }
        };

        self.items.get(index).ok_or(CartError::NotFound(key))
    }

    /// Change a line's quantity by `delta`, never going below one.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotFound`] if no line has this key.
    pub fn update_quantity(&mut self, key: &CartKey, delta: i64) -> Result<u32, CartError> {
        let item = self
            .items
            .iter_mut()
            .find(|item| &item.id == key)
            .ok_or_else(|| CartError::NotFound(key.clone()))?;

        let updated = i64::from(item.quantity).saturating_add(delta).max(1);

        item.quantity = u32::try_from(updated).unwrap_or(u32::MAX);

        Ok(item.quantity)
    }

    /// Remove a line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotFound`] if no line has this key.
    pub fn remove_item(&mut self, key: &CartKey) -> Result<CartLineItem, CartError> {
        let index = self
            .position(key)
            .ok_or_else(|| CartError::NotFound(key.clone()))?;

        Ok(self.items.remove(index))
    }

    /// Lines grouped by store name, in order of each store's first line.
    pub fn group_by_store(&self) -> Vec<StoreGroup<'_>> {
        let mut groups: Vec<StoreGroup<'_>> = Vec::new();

        for item in &self.items {
            match groups
                .iter_mut()
                .find(|group| group.store.name == item.store.name)
            {
                Some(group) => group.items.push(item),
                None => groups.push(StoreGroup {
                    store: &item.store,
                    items: vec![item],
                }),
            }
        }

        groups
    }

    /// Sum of every line's subtotal.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalPriceError`] if an amount overflows.
    pub fn total(&self) -> Result<Money<'static, Currency>, TotalPriceError> {
        total_price(self.items.iter().map(|item| (item.price, item.quantity)))
    }

    /// Look up a line by key.
    pub fn get(&self, key: &CartKey) -> Option<&CartLineItem> {
        self.items.iter().find(|item| &item.id == key)
    }

    /// Lines in the order they were added.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Total number of units across all lines.
    pub fn unit_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, key: &CartKey) -> Option<usize> {
        self.items.iter().position(|item| &item.id == key)
    }
}
