//! Advertisements

pub mod errors;
mod service;

pub use errors::AdvertisementsServiceError;
pub use service::*;
