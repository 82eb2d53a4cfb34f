//! Notifications service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use serde::Serialize;
use tracing::debug;

use achei::{
    notifications::{NotificationUuid, StoreNotification},
    stores::StoreUuid,
};

use crate::{
    backend::{BackendClient, Query},
    domain::notifications::errors::NotificationsServiceError,
};

const TABLE: &str = "store_notifications";

#[derive(Debug, Serialize)]
struct ReadFlag {
    is_read: bool,
}

#[derive(Debug, Clone)]
pub struct HttpNotificationsService {
    backend: BackendClient,
}

impl HttpNotificationsService {
    #[must_use]
    pub fn new(backend: BackendClient) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl NotificationsService for HttpNotificationsService {
    async fn list_recent(
        &self,
        store: StoreUuid,
        limit: usize,
    ) -> Result<Vec<StoreNotification>, NotificationsServiceError> {
        let query = Query::new()
            .select("*")
            .eq("store_id", store)
            .order_desc("created_at")
            .limit(limit);

        Ok(self.backend.select(TABLE, &query).await?)
    }

    async fn list_since(
        &self,
        store: StoreUuid,
        since: Timestamp,
    ) -> Result<Vec<StoreNotification>, NotificationsServiceError> {
        let query = Query::new()
            .select("*")
            .eq("store_id", store)
            .gte("created_at", since)
            .order_asc("created_at");

        let notifications: Vec<StoreNotification> = self.backend.select(TABLE, &query).await?;

        debug!(store_id = %store, count = notifications.len(), "polled notifications");

        Ok(notifications)
    }

    async fn mark_read(
        &self,
        notifications: Vec<NotificationUuid>,
    ) -> Result<usize, NotificationsServiceError> {
        if notifications.is_empty() {
            return Ok(0);
        }

        let query = Query::new().in_list("id", notifications);

        let updated: Vec<StoreNotification> = self
            .backend
            .update(TABLE, &query, &ReadFlag { is_read: true })
            .await?;

        Ok(updated.len())
    }
}

#[automock]
#[async_trait]
pub trait NotificationsService: Send + Sync {
    /// The newest `limit` notifications of a store.
    async fn list_recent(
        &self,
        store: StoreUuid,
        limit: usize,
    ) -> Result<Vec<StoreNotification>, NotificationsServiceError>;

    /// Notifications created at or after `since`, oldest first.
    async fn list_since(
        &self,
        store: StoreUuid,
        since: Timestamp,
    ) -> Result<Vec<StoreNotification>, NotificationsServiceError>;

    /// Flag notifications as read, returning how many rows changed.
    async fn mark_read(
        &self,
        notifications: Vec<NotificationUuid>,
    ) -> Result<usize, NotificationsServiceError>;
}
