//! Stores

pub mod data;
pub mod errors;
mod service;

pub use errors::StoresServiceError;
pub use service::*;
