//! Notifications

pub mod errors;
mod feed;
mod service;

pub use errors::NotificationsServiceError;
pub use feed::{NotificationFeed, Subscription};
pub use service::*;
