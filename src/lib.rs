//! Achei
//!
//! Achei is the domain core of a local-commerce marketplace: store hours, distance
//! filtering, product search, shopper carts and the per-store order messages sent
//! at checkout.

pub mod advertisements;
pub mod cart;
pub mod catalog;
pub mod geo;
pub mod hours;
pub mod import;
pub mod notifications;
pub mod order;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod search;
pub mod stores;
pub mod uuids;
pub mod variants;

mod normalize;
