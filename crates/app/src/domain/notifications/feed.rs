//! Live notification delivery.
//!
//! A subscription polls the backend on a fixed period and forwards every
//! notification it has not delivered before. The poll cursor is the newest
//! `created_at` seen so far; rows sharing that timestamp are told apart by id.

use std::{fmt, sync::Arc, time::Duration};

use jiff::Timestamp;
use rustc_hash::FxHashSet;
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use achei::{
    notifications::{NotificationUuid, StoreNotification},
    stores::StoreUuid,
};

use crate::domain::notifications::NotificationsService;

const CHANNEL_CAPACITY: usize = 32;

/// Starts polling subscriptions against a notifications service.
#[derive(Clone)]
pub struct NotificationFeed {
    service: Arc<dyn NotificationsService>,
    interval: Duration,
}

impl fmt::Debug for NotificationFeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationFeed")
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}

impl NotificationFeed {
    #[must_use]
    pub fn new(service: Arc<dyn NotificationsService>, interval: Duration) -> Self {
        Self { service, interval }
    }

    /// Deliver notifications for `store` created at or after `since`.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn subscribe(&self, store: StoreUuid, since: Timestamp) -> Subscription {
        let (sender, receiver) = mpsc::channel(CHANNEL_CAPACITY);

        let task = tokio::spawn(poll(
            Arc::clone(&self.service),
            store,
            Cursor::new(since),
            self.interval,
            sender,
        ));

        info!(store_id = %store, interval = ?self.interval, "subscribed to notifications");

        Subscription {
            store,
            receiver,
            task,
        }
    }
}

/// A live stream of one store's notifications.
///
/// Polling stops when the subscription is dropped.
#[derive(Debug)]
pub struct Subscription {
    store: StoreUuid,
    receiver: mpsc::Receiver<StoreNotification>,
    task: JoinHandle<()>,
}

impl Subscription {
    /// Wait for the next notification.
    pub async fn recv(&mut self) -> Option<StoreNotification> {
        self.receiver.recv().await
    }

    /// Stop polling.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.task.abort();

        info!(store_id = %self.store, "unsubscribed from notifications");
    }
}

async fn poll(
    service: Arc<dyn NotificationsService>,
    store: StoreUuid,
    mut cursor: Cursor,
    period: Duration,
    sender: mpsc::Sender<StoreNotification>,
) {
    let mut ticker = time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let batch = match service.list_since(store, cursor.since).await {
            Ok(batch) => batch,
            Err(error) => {
                warn!(store_id = %store, %error, "notification poll failed");
                continue;
            }
        };

        for notification in cursor.advance(batch) {
            debug!(notification_id = %notification.id, "delivering notification");

            if sender.send(notification).await.is_err() {
                return;
            }
        }
    }
}

#[derive(Debug)]
struct Cursor {
    since: Timestamp,
    seen: FxHashSet<NotificationUuid>,
}

impl Cursor {
    fn new(since: Timestamp) -> Self {
        Self {
            since,
            seen: FxHashSet::default(),
        }
    }

    /// Keep the unseen part of a batch and move the cursor past it.
    fn advance(&mut self, mut batch: Vec<StoreNotification>) -> Vec<StoreNotification> {
        batch.sort_by_key(|notification| notification.created_at);

        batch.retain(|notification| {
            if notification.created_at < self.since {
                return false;
            }

            if notification.created_at > self.since {
                self.since = notification.created_at;
                self.seen.clear();
            }

            self.seen.insert(notification.id)
        });

        batch
    }
}
