//! Products

use std::fmt::{self, Display, Formatter};

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    normalize::{non_empty, optional_stock, stock, string_list},
    stores::{StoreProfile, StoreUuid},
    uuids::TypedUuid,
};

/// Product UUID
pub type ProductUuid = TypedUuid<Product>;

/// Product variant UUID
pub type VariantUuid = TypedUuid<ProductVariant>;

/// How a product's sizes are labelled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeKind {
    /// The product is not sized
    #[default]
    None,

    /// Letter sizes (`P`, `M`, `G`, ...)
    Letter,

    /// Numeric sizes (`38`, `39`, ...)
    Number,
}

impl SizeKind {
    /// Parse a storage token; anything unknown is [`SizeKind::None`].
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "letter" => Self::Letter,
            "number" => Self::Number,
            _ => Self::None,
        }
    }

    /// Storage token.
    pub fn token(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Letter => "letter",
            Self::Number => "number",
        }
    }
}

impl Display for SizeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl<'de> Deserialize<'de> for SizeKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = Option::<String>::deserialize(deserializer)?;

        Ok(token.as_deref().map_or(Self::None, Self::from_token))
    }
}

/// A product listed by a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier
    pub id: ProductUuid,

    /// Owning store
    pub store_id: StoreUuid,

    /// Display name
    pub name: String,

    /// Unit price in reais
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Free-text description
    #[serde(default, deserialize_with = "non_empty")]
    pub description: Option<String>,

    /// Category label
    #[serde(default)]
    pub category: String,

    /// Product-level stock, when tracked
    #[serde(default, deserialize_with = "optional_stock")]
    pub stock: Option<u32>,

    /// Public image URL
    #[serde(default, deserialize_with = "non_empty")]
    pub image_url: Option<String>,

    /// Declared color axis
    #[serde(default, deserialize_with = "string_list")]
    pub colors: Vec<String>,

    /// Declared size axis
    #[serde(default, deserialize_with = "string_list")]
    pub sizes: Vec<String>,

    /// Size labelling scheme
    #[serde(default)]
    pub size_type: SizeKind,

    /// When the product was created
    pub created_at: Timestamp,
}

impl Product {
    /// Whether the product declares a color or size axis.
    ///
    /// Such products can only be added to a cart through one of their variants.
    pub fn has_variant_axes(&self) -> bool {
        !self.colors.is_empty() || !self.sizes.is_empty()
    }
}

/// A stock-tracked (size, color) combination of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariant {
    /// Variant identifier
    pub id: VariantUuid,

    /// Parent product
    pub product_id: ProductUuid,

    /// Size label
    #[serde(default, deserialize_with = "non_empty")]
    pub size: Option<String>,

    /// Color label
    #[serde(default, deserialize_with = "non_empty")]
    pub color: Option<String>,

    /// Units in stock
    #[serde(default, deserialize_with = "stock")]
    pub stock: u32,

    /// Stock keeping unit
    #[serde(default, deserialize_with = "non_empty")]
    pub sku: Option<String>,
}

/// A product joined with the public profile of its store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// The product
    #[serde(flatten)]
    pub product: Product,

    /// The store that sells it
    #[serde(rename = "stores")]
    pub store: StoreProfile,
}

/// Product fields sent when inserting a product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProduct {
    /// Owning store
    pub store_id: StoreUuid,

    /// Display name
    pub name: String,

    /// Unit price in reais
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Free-text description
    pub description: Option<String>,

    /// Category label
    pub category: String,

    /// Product-level stock
    pub stock: u32,

    /// Public image URL
    pub image_url: Option<String>,

    /// Declared color axis
    pub colors: Vec<String>,

    /// Declared size axis
    pub sizes: Vec<String>,

    /// Size labelling scheme
    pub size_type: SizeKind,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    const ROW: &str = r#"{
        "id": "0194c1a2-7e3b-7c11-9a55-0f1e2d3c4b5a",
        "store_id": "0194c1a2-7e3b-7c11-9a55-0f1e2d3c4b5b",
        "name": "Camiseta",
        "price": 39.9,
        "description": "",
        "category": "Roupas",
        "stock": -2,
        "image_url": null,
        "colors": null,
        "sizes": "P,M",
        "size_type": "LETTER",
        "created_at": "2025-01-01T12:00:00Z",
        "stores": {"name": "Loja Centro", "whatsapp": "11987654321", "address": "Rua A"}
    }"#;

    #[test]
    fn catalog_rows_decode_with_embedded_store() -> TestResult {
        let entry: CatalogEntry = serde_json::from_str(ROW)?;

        assert_eq!(entry.product.price, Decimal::new(399, 1));
        assert_eq!(entry.product.description, None);
        assert_eq!(entry.product.stock, Some(0));
        assert!(entry.product.colors.is_empty());
        assert!(entry.product.sizes.is_empty());
        assert_eq!(entry.product.size_type, SizeKind::Letter);
        assert_eq!(entry.store.name, "Loja Centro");

        Ok(())
    }

    #[test]
    fn variant_axes_come_from_colors_or_sizes() -> TestResult {
        let mut entry: CatalogEntry = serde_json::from_str(ROW)?;

        assert!(!entry.product.has_variant_axes());

        entry.product.sizes = vec!["P".to_string()];

        assert!(entry.product.has_variant_axes());

        Ok(())
    }

    #[test]
    fn unknown_size_kinds_fall_back_to_none() {
        assert_eq!(SizeKind::from_token("shoe"), SizeKind::None);
        assert_eq!(SizeKind::from_token(" number "), SizeKind::Number);
    }

    #[test]
    fn variants_default_missing_stock_to_zero() -> TestResult {
        let variant: ProductVariant = serde_json::from_str(
            r#"{
                "id": "0194c1a2-7e3b-7c11-9a55-0f1e2d3c4b5c",
                "product_id": "0194c1a2-7e3b-7c11-9a55-0f1e2d3c4b5a",
                "size": "M",
                "color": ""
            }"#,
        )?;

        assert_eq!(variant.stock, 0);
        assert_eq!(variant.color, None);
        assert_eq!(variant.size.as_deref(), Some("M"));

        Ok(())
    }
}
