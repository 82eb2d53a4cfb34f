//! Catalog service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, info};

use achei::{
    catalog::Catalog,
    products::{CatalogEntry, ProductUuid, ProductVariant},
};

use crate::{
    backend::{BackendClient, Query},
    domain::catalog::errors::CatalogServiceError,
};

/// Products joined with the public columns of their store.
pub const CATALOG_SELECT: &str = "*,stores(name,whatsapp,address,city,latitude,longitude,opening_time,closing_time,operating_days)";

#[derive(Debug, Clone)]
pub struct HttpCatalogService {
    backend: BackendClient,
}

impl HttpCatalogService {
    #[must_use]
    pub fn new(backend: BackendClient) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl CatalogService for HttpCatalogService {
    async fn list_entries(&self) -> Result<Vec<CatalogEntry>, CatalogServiceError> {
        let query = Query::new()
            .select(CATALOG_SELECT)
            .order_desc("created_at");

        let entries: Vec<CatalogEntry> = self.backend.select("products", &query).await?;

        debug!(count = entries.len(), "fetched catalog");

        Ok(entries)
    }

    async fn list_variants(
        &self,
        product: ProductUuid,
    ) -> Result<Vec<ProductVariant>, CatalogServiceError> {
        let query = Query::new().select("*").eq("product_id", product);

        Ok(self.backend.select("product_variants", &query).await?)
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Every product with its store profile.
    async fn list_entries(&self) -> Result<Vec<CatalogEntry>, CatalogServiceError>;

    /// Variants of one product.
    async fn list_variants(
        &self,
        product: ProductUuid,
    ) -> Result<Vec<ProductVariant>, CatalogServiceError>;
}

/// Refetch the catalog and install it.
///
/// On failure the catalog keeps its previous contents.
///
/// # Errors
///
/// Returns the service error if the fetch fails.
pub async fn refresh_catalog(
    service: &dyn CatalogService,
    catalog: &mut Catalog,
) -> Result<usize, CatalogServiceError> {
    let entries = service.list_entries().await?;

    catalog.replace(entries);

    info!(products = catalog.len(), "catalog refreshed");

    Ok(catalog.len())
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use achei::{
        products::{Product, SizeKind},
        stores::{StoreProfile, StoreUuid},
    };

    use crate::backend::BackendError;

    use super::*;

    fn entry(name: &str, created_at: Timestamp) -> CatalogEntry {
        CatalogEntry {
            product: Product {
                id: ProductUuid::new(),
                store_id: StoreUuid::new(),
                name: name.to_string(),
                price: Decimal::new(1000, 2),
                description: None,
                category: "Casa".to_string(),
                stock: Some(1),
                image_url: None,
                colors: Vec::new(),
                sizes: Vec::new(),
                size_type: SizeKind::None,
                created_at,
            },
            store: StoreProfile {
                name: "Loja".to_string(),
                ..StoreProfile::default()
            },
        }
    }

    #[tokio::test]
    async fn refresh_installs_entries_newest_first() -> TestResult {
        let older = entry("Caneca", Timestamp::from_second(10)?);
        let newer = entry("Prato", Timestamp::from_second(20)?);

        let mut service = MockCatalogService::new();

        service
            .expect_list_entries()
            .once()
            .return_once(move || Ok(vec![older, newer]));

        let mut catalog = Catalog::new();
        let count = refresh_catalog(&service, &mut catalog).await?;

        assert_eq!(count, 2);
        assert_eq!(
            catalog.entries().first().map(|e| e.product.name.as_str()),
            Some("Prato")
        );

        Ok(())
    }

    #[tokio::test]
    async fn failed_refresh_keeps_the_old_catalog() -> TestResult {
        let mut catalog = Catalog::from_entries(vec![entry("Caneca", Timestamp::from_second(10)?)]);

        let mut service = MockCatalogService::new();

        service.expect_list_entries().once().return_once(|| {
            Err(CatalogServiceError::Backend(BackendError::Api {
                status: 503,
                code: None,
                message: "unavailable".to_string(),
            }))
        });

        let result = refresh_catalog(&service, &mut catalog).await;

        assert!(matches!(result, Err(CatalogServiceError::Backend(_))));
        assert_eq!(catalog.len(), 1);

        Ok(())
    }
}
