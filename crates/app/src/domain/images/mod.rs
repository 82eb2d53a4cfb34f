//! Images

pub mod errors;
mod service;

pub use errors::ImagesServiceError;
pub use service::*;
