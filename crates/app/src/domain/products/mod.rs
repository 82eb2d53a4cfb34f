//! Products

pub mod data;
pub mod errors;
mod service;

pub use errors::ProductsServiceError;
pub use service::*;
