//! `shopfront-core`: storefront domain building blocks.
//!
//! This crate contains **pure domain** primitives shared by the catalog, orders
//! and storefront crates (no IO, no async, no HTTP).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{CategoryId, OrderId, ProductId};
pub use value_object::ValueObject;
