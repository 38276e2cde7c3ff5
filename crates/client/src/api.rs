//! The client-facing seam over the backend contract.

use stocklist_catalog::{
    CreateCategory, CreateProduct, Product, ProductCategory, UpdateCategory, UpdateProduct,
};
use stocklist_core::{CategoryId, ProductId};

use crate::error::ApiError;

/// Typed facade over the eleven inventory REST operations.
///
/// Implementations are transport-specific ([`crate::HttpCatalog`] over HTTP,
/// [`crate::InMemoryCatalog`] for tests/dev); callers depend only on this
/// trait. Commands are assumed to be schema-validated before they get here.
#[allow(async_fn_in_trait)]
pub trait CatalogApi {
    async fn list_products(&self) -> Result<Vec<Product>, ApiError>;

    async fn get_product(&self, id: ProductId) -> Result<Product, ApiError>;

    async fn create_product(&self, cmd: &CreateProduct) -> Result<Product, ApiError>;

    async fn update_product(&self, id: ProductId, cmd: &UpdateProduct) -> Result<Product, ApiError>;

    async fn delete_product(&self, id: ProductId) -> Result<(), ApiError>;

    async fn products_by_category(&self, id: CategoryId) -> Result<Vec<Product>, ApiError>;

    async fn list_categories(&self) -> Result<Vec<ProductCategory>, ApiError>;

    async fn get_category(&self, id: CategoryId) -> Result<ProductCategory, ApiError>;

    async fn create_category(&self, cmd: &CreateCategory) -> Result<ProductCategory, ApiError>;

    async fn update_category(
        &self,
        id: CategoryId,
        cmd: &UpdateCategory,
    ) -> Result<ProductCategory, ApiError>;

    async fn delete_category(&self, id: CategoryId) -> Result<(), ApiError>;
}
