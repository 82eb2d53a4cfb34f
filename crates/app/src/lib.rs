//! Backend services and store administration for Achei.

pub mod admin;
pub mod backend;
pub mod context;
pub mod domain;
