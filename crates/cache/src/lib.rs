//! Tag-driven cache invalidation over the catalog client.
//!
//! Reads *provide* tags, writes *invalidate* tags, and any cached read whose
//! provided tags are hit by a write goes stale and is refetched. The cache is
//! an explicit, constructible [`CacheContext`] (no ambient globals);
//! [`CachedCatalog`] composes it with any [`stocklist_client::CatalogApi`]
//! implementation. Plain reads are one-shot; lasting interest in a key is a
//! [`Subscription`] guard from [`CachedCatalog::watch`].

pub mod cached;
pub mod policy;
pub mod store;
pub mod tag;

pub use cached::{CachedCatalog, ClientError, Subscription};
pub use store::{CacheContext, QueryData, QueryStatus, RequestId};
pub use tag::{Tag, TagType};
