//! Products Data

use rust_decimal::Decimal;
use serde::Serialize;

use achei::{
    products::{ProductUuid, SizeKind},
    variants::NewVariant,
};

/// Product Update Data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductUpdate {
    pub name: String,

    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    pub description: Option<String>,
    pub category: String,
    pub stock: u32,
    pub image_url: Option<String>,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    pub size_type: SizeKind,
}

/// A variant row as inserted, tied to its product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantRow {
    pub product_id: ProductUuid,

    #[serde(flatten)]
    pub variant: NewVariant,
}
