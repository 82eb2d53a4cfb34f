//! Store notifications

use std::fmt::{self, Display, Formatter};

use jiff::{Timestamp, tz::TimeZone};
use serde::{Deserialize, Serialize};

use crate::{products::ProductUuid, stores::StoreUuid, uuids::TypedUuid};

/// Notification UUID
pub type NotificationUuid = TypedUuid<StoreNotification>;

/// Most notifications an inbox keeps.
pub const INBOX_LIMIT: usize = 20;

/// What a notification is about.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NotificationKind {
    /// A shopper added one of the store's products to their cart
    CartAdd,

    /// Any other tag
    Other(String),
}

impl From<String> for NotificationKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "cart_add" => Self::CartAdd,
            _ => Self::Other(tag),
        }
    }
}

impl From<NotificationKind> for String {
    fn from(kind: NotificationKind) -> Self {
        match kind {
            NotificationKind::CartAdd => "cart_add".to_string(),
            NotificationKind::Other(tag) => tag,
        }
    }
}

impl Display for NotificationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::CartAdd => f.write_str("cart_add"),
            Self::Other(tag) => f.write_str(tag),
        }
    }
}

/// An event shown to a lojista.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreNotification {
    /// Notification identifier
    pub id: NotificationUuid,

    /// Store the notification is for
    pub store_id: StoreUuid,

    /// Product involved, if any
    #[serde(default)]
    pub product_id: Option<ProductUuid>,

    /// Event tag
    pub notification_type: NotificationKind,

    /// Human-readable text
    pub message: String,

    /// Whether the lojista has seen it
    #[serde(default)]
    pub is_read: bool,

    /// When it was raised
    pub created_at: Timestamp,
}

/// The most recent notifications of one store, newest first.
#[derive(Debug, Clone, Default)]
pub struct NotificationInbox {
    notifications: Vec<StoreNotification>,
}

impl NotificationInbox {
    /// An empty inbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a fetched list, keeping the newest [`INBOX_LIMIT`].
    pub fn replace(&mut self, mut notifications: Vec<StoreNotification>) {
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        notifications.truncate(INBOX_LIMIT);

        self.notifications = notifications;
    }

    /// Add a newly delivered notification at the top.
    ///
    /// Returns `false` if a notification with the same id is already present.
    pub fn receive(&mut self, notification: StoreNotification) -> bool {
        if self.contains(notification.id) {
            return false;
        }

        self.notifications.insert(0, notification);
        self.notifications.truncate(INBOX_LIMIT);

        true
    }

    /// Mark one notification as read.
    ///
    /// Returns `false` if it is not in the inbox or was already read.
    pub fn mark_read(&mut self, id: NotificationUuid) -> bool {
        match self.notifications.iter_mut().find(|n| n.id == id) {
            Some(notification) if !notification.is_read => {
                notification.is_read = true;
                true
            }
            _ => false,
        }
    }

    /// Ids of unread notifications, newest first.
    pub fn unread_ids(&self) -> Vec<NotificationUuid> {
        self.notifications
            .iter()
            .filter(|n| !n.is_read)
            .map(|n| n.id)
            .collect()
    }

    /// Mark everything read, returning the ids that changed.
    pub fn mark_all_read(&mut self) -> Vec<NotificationUuid> {
        let ids = self.unread_ids();

        for notification in &mut self.notifications {
            notification.is_read = true;
        }

        ids
    }

    /// Number of unread notifications.
    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.is_read).count()
    }

    /// Badge text for the unread count; `None` when everything is read.
    pub fn unread_badge(&self) -> Option<String> {
        match self.unread_count() {
            0 => None,
            count @ 1..=9 => Some(count.to_string()),
            _ => Some("9+".to_string()),
        }
    }

    /// Whether a notification with this id is present.
    pub fn contains(&self, id: NotificationUuid) -> bool {
        self.notifications.iter().any(|n| n.id == id)
    }

    /// Notifications, newest first.
    pub fn notifications(&self) -> &[StoreNotification] {
        &self.notifications
    }

    /// Number of notifications held.
    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    /// Whether the inbox is empty.
    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }
}

/// Age of a notification as shown in the inbox, dates in the system time zone.
pub fn format_relative(created: Timestamp, now: Timestamp) -> String {
    format_relative_in(created, now, &TimeZone::system())
}

/// Age of a notification: `Agora`, `5m atrás`, `3h atrás`, `2d atrás`, or
/// `dd/mm/yyyy` from a week on.
pub fn format_relative_in(created: Timestamp, now: Timestamp, tz: &TimeZone) -> String {
    let elapsed_ms = now.as_millisecond().saturating_sub(created.as_millisecond());

    let minutes = elapsed_ms.div_euclid(60_000);
    let hours = minutes.div_euclid(60);
    let days = hours.div_euclid(24);

    if minutes < 1 {
        "Agora".to_string()
    } else if minutes < 60 {
        format!("{minutes}m atrás")
    } else if hours < 24 {
        format!("{hours}h atrás")
    } else if days < 7 {
        format!("{days}d atrás")
    } else {
        created.to_zoned(tz.clone()).strftime("%d/%m/%Y").to_string()
    }
}
