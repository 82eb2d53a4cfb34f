//! Domain services backed by the hosted backend.

pub mod advertisements;
pub mod catalog;
pub mod images;
pub mod notifications;
pub mod products;
pub mod stores;
