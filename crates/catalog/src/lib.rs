//! Catalog domain: entities, command objects, input formatters, and the
//! validation schemas that turn raw commands into normalized ones.
//!
//! Everything in this crate is deterministic and IO-free (no HTTP, no storage).

pub mod command;
pub mod entity;
pub mod format;
pub mod schema;

pub use command::{CreateCategory, CreateProduct, UpdateCategory, UpdateProduct};
pub use entity::{Product, ProductCategory, ProductStatus};
