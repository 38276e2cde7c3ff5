//! Typed client facade for the inventory REST API.
//!
//! [`CatalogApi`] is the seam: a trait covering the eleven REST operations.
//! [`HttpCatalog`] speaks JSON over HTTP to a real backend; [`InMemoryCatalog`]
//! is a faithful fake for tests and local development. [`operation`] holds the
//! operation descriptors the cache layer keys on.

pub mod api;
pub mod error;
pub mod http;
pub mod in_memory;
pub mod operation;

pub use api::CatalogApi;
pub use error::{ApiError, BackendValidationError, LocSegment, ValidationIssue};
pub use http::HttpCatalog;
pub use in_memory::InMemoryCatalog;
pub use operation::{Mutation, Query};
