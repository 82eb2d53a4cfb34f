//! Admin forms and their validation.

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use url::Url;

use achei::{
    advertisements::{DEFAULT_CTA, DEFAULT_GRADIENT, NewAdvertisement},
    hours::{OperatingDays, TimeOfDay},
    products::{NewProduct, SizeKind},
    stores::{AccountUuid, StoreUuid},
    variants::{self, NewVariant},
};

use crate::{
    admin::errors::DraftError,
    domain::{
        products::data::ProductUpdate,
        stores::data::{NewStore, StoreFields},
    },
};

const WHATSAPP_LENGTH: std::ops::RangeInclusive<usize> = 10..=20;

/// Store profile as typed by a lojista.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreDraft {
    pub name: String,
    pub whatsapp: String,
    pub address: String,
    pub city: String,
    pub state: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub opening_time: Option<String>,
    pub closing_time: Option<String>,

    /// Mon–Fri when left empty.
    pub operating_days: Option<OperatingDays>,
}

impl StoreDraft {
    /// Validate into the columns written to the backend.
    ///
    /// # Errors
    ///
    /// Returns the first field that fails validation.
    pub fn validate(self) -> Result<StoreFields, DraftError> {
        let whatsapp = self.whatsapp.trim();

        if !WHATSAPP_LENGTH.contains(&whatsapp.chars().count()) {
            return Err(DraftError::WhatsappLength);
        }

        Ok(StoreFields {
            name: bounded("name", &self.name, 100)?,
            whatsapp: whatsapp.to_string(),
            address: bounded("address", &self.address, 255)?,
            city: bounded("city", &self.city, 100)?,
            state: optional(self.state),
            latitude: self.latitude,
            longitude: self.longitude,
            opening_time: time(self.opening_time)?,
            closing_time: time(self.closing_time)?,
            operating_days: self
                .operating_days
                .filter(|days| !days.is_empty())
                .unwrap_or_else(OperatingDays::weekdays),
        })
    }

    /// Validate as a new store owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns the first field that fails validation.
    pub fn into_new_store(self, owner: AccountUuid) -> Result<NewStore, DraftError> {
        Ok(NewStore {
            user_id: owner,
            fields: self.validate()?,
        })
    }
}

/// Product form as typed by a lojista.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub price: Decimal,
    pub description: Option<String>,
    pub category: String,
    pub stock: u32,
    pub image_url: Option<String>,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    pub size_type: SizeKind,
}

impl ProductDraft {
    /// Validate into the columns written to the backend.
    ///
    /// # Errors
    ///
    /// Returns the first field that fails validation.
    pub fn validate(self) -> Result<ProductUpdate, DraftError> {
        let name = bounded("name", &self.name, 100)?;

        if self.price <= Decimal::ZERO {
            return Err(DraftError::NonPositivePrice);
        }

        let description = optional(self.description);

        if description
            .as_ref()
            .is_some_and(|text| text.chars().count() > 500)
        {
            return Err(DraftError::TooLong {
                field: "description",
                max: 500,
            });
        }

        let category = self.category.trim();

        if category.is_empty() {
            return Err(DraftError::Required { field: "category" });
        }

        let image_url = image_url(self.image_url)?;

        Ok(ProductUpdate {
            name,
            price: self.price,
            description,
            category: category.to_string(),
            stock: self.stock,
            image_url,
            colors: labels(self.colors),
            sizes: labels(self.sizes),
            size_type: self.size_type,
        })
    }

    /// Validate as a new product of `store`.
    ///
    /// # Errors
    ///
    /// Returns the first field that fails validation.
    pub fn into_new_product(self, store: StoreUuid) -> Result<NewProduct, DraftError> {
        let fields = self.validate()?;

        Ok(NewProduct {
            store_id: store,
            name: fields.name,
            price: fields.price,
            description: fields.description,
            category: fields.category,
            stock: fields.stock,
            image_url: fields.image_url,
            colors: fields.colors,
            sizes: fields.sizes,
            size_type: fields.size_type,
        })
    }
}

/// Carousel banner as typed by an administrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvertisementDraft {
    pub title: String,
    pub subtitle: String,

    /// `Explorar` when blank.
    pub cta_text: Option<String>,

    /// The primary gradient when blank.
    pub gradient: Option<String>,

    pub image_url: Option<String>,
    pub is_active: bool,
    pub display_order: i32,
    pub store_id: Option<StoreUuid>,
}

impl Default for AdvertisementDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            subtitle: String::new(),
            cta_text: None,
            gradient: None,
            image_url: None,
            is_active: true,
            display_order: 0,
            store_id: None,
        }
    }
}

impl AdvertisementDraft {
    /// Validate into the row written to the backend.
    ///
    /// # Errors
    ///
    /// Returns the first field that fails validation.
    pub fn validate(self) -> Result<NewAdvertisement, DraftError> {
        Ok(NewAdvertisement {
            title: bounded("title", &self.title, 100)?,
            subtitle: bounded("subtitle", &self.subtitle, 200)?,
            cta_text: optional(self.cta_text).unwrap_or_else(|| DEFAULT_CTA.to_string()),
            gradient: optional(self.gradient).unwrap_or_else(|| DEFAULT_GRADIENT.to_string()),
            image_url: image_url(self.image_url)?,
            is_active: self.is_active,
            display_order: self.display_order,
            store_id: self.store_id,
        })
    }
}

/// Variant grid of a product: its axes and the stock typed per SKU.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantDraft {
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    pub stock: FxHashMap<String, u32>,
}

impl VariantDraft {
    /// Expand the axes into variants and apply the typed stock.
    ///
    /// SKUs without a typed stock start at zero.
    ///
    /// # Errors
    ///
    /// Returns an error if two variants share a size and color.
    pub fn into_variants(self) -> Result<Vec<NewVariant>, DraftError> {
        let generated = variants::generate_variants(&self.colors, &self.sizes)
            .into_iter()
            .map(|variant| {
                let stock = variant
                    .sku
                    .as_ref()
                    .and_then(|sku| self.stock.get(sku))
                    .copied()
                    .unwrap_or_default();

                variant.with_stock(stock)
            })
            .collect::<Vec<_>>();

        variants::ensure_unique(&generated)?;

        Ok(generated)
    }
}

fn bounded(field: &'static str, value: &str, max: usize) -> Result<String, DraftError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(DraftError::Required { field });
    }

    if value.chars().count() > max {
        return Err(DraftError::TooLong { field, max });
    }

    Ok(value.to_string())
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

fn image_url(value: Option<String>) -> Result<Option<String>, DraftError> {
    let value = optional(value);

    if let Some(url) = &value {
        Url::parse(url).map_err(|_err| DraftError::InvalidImageUrl(url.clone()))?;
    }

    Ok(value)
}

fn time(value: Option<String>) -> Result<Option<TimeOfDay>, DraftError> {
    optional(value)
        .map(|text| TimeOfDay::parse(&text))
        .transpose()
        .map_err(DraftError::from)
}

fn labels(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());

    for value in values {
        let value = value.trim();

        if !value.is_empty() && !out.iter().any(|existing| existing == value) {
            out.push(value.to_string());
        }
    }

    out
}
