//! Stores service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use achei::stores::{AccountUuid, Store, StoreUuid};

use crate::{
    backend::{BackendClient, Query},
    domain::stores::{
        data::{NewStore, StoreUpdate},
        errors::StoresServiceError,
    },
};

const TABLE: &str = "stores";

#[derive(Debug, Clone)]
pub struct HttpStoresService {
    backend: BackendClient,
}

impl HttpStoresService {
    #[must_use]
    pub fn new(backend: BackendClient) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl StoresService for HttpStoresService {
    async fn get_store(&self, store: StoreUuid) -> Result<Store, StoresServiceError> {
        let query = Query::new().select("*").eq("id", store);

        Ok(self.backend.select_one(TABLE, &query).await?)
    }

    async fn store_for_owner(&self, owner: AccountUuid) -> Result<Store, StoresServiceError> {
        let query = Query::new().select("*").eq("user_id", owner);

        Ok(self.backend.select_one(TABLE, &query).await?)
    }

    async fn create_store(&self, store: NewStore) -> Result<Store, StoresServiceError> {
        let created: Vec<Store> = self.backend.insert(TABLE, &store).await?;

        let created = created
            .into_iter()
            .next()
            .ok_or(StoresServiceError::NotFound)?;

        info!(store_id = %created.id, "created store");

        Ok(created)
    }

    async fn update_store(
        &self,
        store: StoreUuid,
        update: StoreUpdate,
    ) -> Result<Store, StoresServiceError> {
        let query = Query::new().eq("id", store);

        let updated: Vec<Store> = self.backend.update(TABLE, &query, &update).await?;

        let updated = updated
            .into_iter()
            .next()
            .ok_or(StoresServiceError::NotFound)?;

        info!(store_id = %updated.id, "updated store");

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait StoresService: Send + Sync {
    /// Retrieve a single store.
    async fn get_store(&self, store: StoreUuid) -> Result<Store, StoresServiceError>;

    /// Retrieve the store owned by an account.
    async fn store_for_owner(&self, owner: AccountUuid) -> Result<Store, StoresServiceError>;

    /// Creates a new store.
    async fn create_store(&self, store: NewStore) -> Result<Store, StoresServiceError>;

    /// Updates a store's profile.
    async fn update_store(
        &self,
        store: StoreUuid,
        update: StoreUpdate,
    ) -> Result<Store, StoresServiceError>;
}
