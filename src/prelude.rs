//! Achei prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    advertisements::{Advertisement, AdvertisementUuid, NewAdvertisement, carousel},
    cart::{
        Cart, CartError, CartKey, CartLineItem, StoreGroup, VariantDescriptor,
        storage::{CartStorage, CartStorageError, FileCartStorage, MemoryCartStorage},
    },
    catalog::Catalog,
    geo::{Coordinates, SearchRadius, haversine_km, within_radius},
    hours::{
        HoursError, OpenStatus, OperatingDay, OperatingDays, StoreHours, TimeOfDay,
        format_operating_days,
    },
    import::{BULK_IMPORT_TEMPLATE, ImportError, parse_bulk_import},
    notifications::{
        NotificationInbox, NotificationKind, NotificationUuid, StoreNotification,
        format_relative,
    },
    order::{OrderError, StoreOrder, compose_message, compose_orders, whatsapp_link},
    pricing::{TotalPriceError, format_money, format_price, total_price},
    products::{CatalogEntry, NewProduct, Product, ProductUuid, ProductVariant, SizeKind, VariantUuid},
    search::ProductFilter,
    stores::{AccountUuid, Store, StoreProfile, StoreUuid},
    variants::{
        NewVariant, VariantError, VariantResolver, VariantSelection, ensure_unique,
        generate_variants,
    },
};
