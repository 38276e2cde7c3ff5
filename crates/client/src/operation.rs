//! Operation descriptors.
//!
//! Every REST operation is identified by a [`Query`] or [`Mutation`] value
//! carrying its arguments. Queries double as cache keys; the cache layer maps
//! both kinds onto tags without knowing anything about HTTP.

use stocklist_core::{CategoryId, ProductId};

/// A read operation. `Eq + Hash` so it can key a cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Query {
    ListProducts,
    GetProduct(ProductId),
    ProductsByCategory(CategoryId),
    ListCategories,
    GetCategory(CategoryId),
}

/// A write operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mutation {
    CreateProduct,
    UpdateProduct(ProductId),
    DeleteProduct(ProductId),
    CreateCategory,
    UpdateCategory(CategoryId),
    DeleteCategory(CategoryId),
}

impl Query {
    /// REST path for this read, relative to the API base URL.
    pub fn path(&self) -> String {
        match self {
            Query::ListProducts => "/api/products".to_string(),
            Query::GetProduct(id) => format!("/api/products/{id}"),
            Query::ProductsByCategory(id) => format!("/api/categories/{id}/products"),
            Query::ListCategories => "/api/categories".to_string(),
            Query::GetCategory(id) => format!("/api/categories/{id}"),
        }
    }
}

impl Mutation {
    /// REST path for this write, relative to the API base URL.
    pub fn path(&self) -> String {
        match self {
            Mutation::CreateProduct => "/api/products".to_string(),
            Mutation::UpdateProduct(id) | Mutation::DeleteProduct(id) => {
                format!("/api/products/{id}")
            }
            Mutation::CreateCategory => "/api/categories".to_string(),
            Mutation::UpdateCategory(id) | Mutation::DeleteCategory(id) => {
                format!("/api/categories/{id}")
            }
        }
    }
}
