//! Advertisements service.

use async_trait::async_trait;
use mockall::automock;
use serde::Serialize;
use tracing::{debug, info};

use achei::{
    advertisements::{Advertisement, AdvertisementUuid, NewAdvertisement},
    stores::AccountUuid,
};

use crate::{
    backend::{BackendClient, Query},
    domain::advertisements::errors::AdvertisementsServiceError,
};

const TABLE: &str = "advertisements";
const ROLES_TABLE: &str = "user_roles";
const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Serialize)]
struct ActiveChange {
    is_active: bool,
}

#[derive(Debug, Clone)]
pub struct HttpAdvertisementsService {
    backend: BackendClient,
}

impl HttpAdvertisementsService {
    #[must_use]
    pub fn new(backend: BackendClient) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl AdvertisementsService for HttpAdvertisementsService {
    async fn list_advertisements(&self) -> Result<Vec<Advertisement>, AdvertisementsServiceError> {
        let query = Query::new().select("*").order_asc("display_order");

        Ok(self.backend.select(TABLE, &query).await?)
    }

    async fn list_active(&self) -> Result<Vec<Advertisement>, AdvertisementsServiceError> {
        let query = Query::new()
            .select("*")
            .eq("is_active", true)
            .order_asc("display_order");

        Ok(self.backend.select(TABLE, &query).await?)
    }

    async fn get_advertisement(
        &self,
        advertisement: AdvertisementUuid,
    ) -> Result<Advertisement, AdvertisementsServiceError> {
        let query = Query::new().select("*").eq("id", advertisement);

        Ok(self.backend.select_one(TABLE, &query).await?)
    }

    async fn create_advertisement(
        &self,
        advertisement: NewAdvertisement,
    ) -> Result<Advertisement, AdvertisementsServiceError> {
        let created: Vec<Advertisement> = self.backend.insert(TABLE, &advertisement).await?;

        let created = created
            .into_iter()
            .next()
            .ok_or(AdvertisementsServiceError::NotFound)?;

        info!(advertisement_id = %created.id, "created advertisement");

        Ok(created)
    }

    async fn set_active(
        &self,
        advertisement: AdvertisementUuid,
        is_active: bool,
    ) -> Result<Advertisement, AdvertisementsServiceError> {
        let query = Query::new().eq("id", advertisement);

        let updated: Vec<Advertisement> = self
            .backend
            .update(TABLE, &query, &ActiveChange { is_active })
            .await?;

        let updated = updated
            .into_iter()
            .next()
            .ok_or(AdvertisementsServiceError::NotFound)?;

        info!(advertisement_id = %updated.id, is_active, "changed advertisement visibility");

        Ok(updated)
    }

    async fn delete_advertisement(
        &self,
        advertisement: AdvertisementUuid,
    ) -> Result<(), AdvertisementsServiceError> {
        let query = Query::new().eq("id", advertisement);

        if self.backend.delete(TABLE, &query).await? == 0 {
            return Err(AdvertisementsServiceError::NotFound);
        }

        info!(advertisement_id = %advertisement, "deleted advertisement");

        Ok(())
    }

    async fn is_admin(&self, account: AccountUuid) -> Result<bool, AdvertisementsServiceError> {
        let query = Query::new()
            .select("role")
            .eq("user_id", account)
            .eq("role", ADMIN_ROLE)
            .limit(1);

        let roles: Vec<serde_json::Value> = self.backend.select(ROLES_TABLE, &query).await?;

        debug!(account_id = %account, admin = !roles.is_empty(), "checked admin role");

        Ok(!roles.is_empty())
    }
}

#[automock]
#[async_trait]
pub trait AdvertisementsService: Send + Sync {
    /// Every advertisement, in display order.
    async fn list_advertisements(&self) -> Result<Vec<Advertisement>, AdvertisementsServiceError>;

    /// Advertisements currently shown, in display order.
    async fn list_active(&self) -> Result<Vec<Advertisement>, AdvertisementsServiceError>;

    /// Retrieve a single advertisement.
    async fn get_advertisement(
        &self,
        advertisement: AdvertisementUuid,
    ) -> Result<Advertisement, AdvertisementsServiceError>;

    /// Creates a new advertisement.
    async fn create_advertisement(
        &self,
        advertisement: NewAdvertisement,
    ) -> Result<Advertisement, AdvertisementsServiceError>;

    /// Show or hide an advertisement.
    async fn set_active(
        &self,
        advertisement: AdvertisementUuid,
        is_active: bool,
    ) -> Result<Advertisement, AdvertisementsServiceError>;

    /// Deletes an advertisement.
    async fn delete_advertisement(
        &self,
        advertisement: AdvertisementUuid,
    ) -> Result<(), AdvertisementsServiceError>;

    /// Whether `account` holds the admin role.
    async fn is_admin(&self, account: AccountUuid) -> Result<bool, AdvertisementsServiceError>;
}
