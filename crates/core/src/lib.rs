//! `stocklist-core` — foundation building blocks for the inventory client.
//!
//! This crate contains **pure** primitives (no IO, no HTTP): typed identifiers
//! and the field-level validation error model shared by the higher layers.

pub mod error;
pub mod id;

pub use error::{FieldErrors, ValidationResult};
pub use id::{CategoryId, ProductId};
