//! HTTP implementation of [`CatalogApi`] (JSON over REST).

use serde::de::DeserializeOwned;

use stocklist_catalog::{
    CreateCategory, CreateProduct, Product, ProductCategory, UpdateCategory, UpdateProduct,
};
use stocklist_core::{CategoryId, ProductId};

use crate::api::CatalogApi;
use crate::error::{ApiError, BackendValidationError};
use crate::operation::{Mutation, Query};

/// Catalog client over a real backend.
///
/// Thin by design: timeouts and retries belong to the transport (configure the
/// [`reqwest::Client`] you pass in); caching belongs to the layer above.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    base_url: String,
    http: reqwest::Client,
}

impl HttpCatalog {
    /// Build a client against `base_url` (e.g. `http://localhost:8000`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Build a client with a preconfigured [`reqwest::Client`].
    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url, http }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read_json<T: DeserializeOwned>(res: reqwest::Response) -> Result<T, ApiError> {
        if !res.status().is_success() {
            return Err(Self::failure(res).await);
        }
        res.json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn read_empty(res: reqwest::Response) -> Result<(), ApiError> {
        if !res.status().is_success() {
            return Err(Self::failure(res).await);
        }
        // The backend answers deletes with a small message object; nothing in
        // it is useful to the caller.
        Ok(())
    }

    async fn failure(res: reqwest::Response) -> ApiError {
        let status = res.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return ApiError::NotFound;
        }

        let body = match res.text().await {
            Ok(body) => body,
            Err(e) => return ApiError::Transport(e.to_string()),
        };

        // Structured validation payloads (`detail` as an issue list) pass
        // through unmodified.
        if let Ok(validation) = serde_json::from_str::<BackendValidationError>(&body) {
            return ApiError::BackendValidation(validation);
        }

        // Plain-string `detail` bodies (business errors) become the message.
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string))
            .unwrap_or(body);

        ApiError::Status {
            status: status.as_u16(),
            message,
        }
    }
}

impl CatalogApi for HttpCatalog {
    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let path = Query::ListProducts.path();
        tracing::debug!(%path, "GET");
        let res = self.http.get(self.url(&path)).send().await?;
        Self::read_json(res).await
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, ApiError> {
        let path = Query::GetProduct(id).path();
        tracing::debug!(%path, "GET");
        let res = self.http.get(self.url(&path)).send().await?;
        Self::read_json(res).await
    }

    async fn create_product(&self, cmd: &CreateProduct) -> Result<Product, ApiError> {
        let path = Mutation::CreateProduct.path();
        tracing::debug!(%path, sku = %cmd.sku, "POST");
        let res = self.http.post(self.url(&path)).json(cmd).send().await?;
        Self::read_json(res).await
    }

    async fn update_product(&self, id: ProductId, cmd: &UpdateProduct) -> Result<Product, ApiError> {
        let path = Mutation::UpdateProduct(id).path();
        tracing::debug!(%path, "PUT");
        let res = self.http.put(self.url(&path)).json(cmd).send().await?;
        Self::read_json(res).await
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), ApiError> {
        let path = Mutation::DeleteProduct(id).path();
        tracing::debug!(%path, "DELETE");
        let res = self.http.delete(self.url(&path)).send().await?;
        Self::read_empty(res).await
    }

    async fn products_by_category(&self, id: CategoryId) -> Result<Vec<Product>, ApiError> {
        let path = Query::ProductsByCategory(id).path();
        tracing::debug!(%path, "GET");
        let res = self.http.get(self.url(&path)).send().await?;
        Self::read_json(res).await
    }

    async fn list_categories(&self) -> Result<Vec<ProductCategory>, ApiError> {
        let path = Query::ListCategories.path();
        tracing::debug!(%path, "GET");
        let res = self.http.get(self.url(&path)).send().await?;
        Self::read_json(res).await
    }

    async fn get_category(&self, id: CategoryId) -> Result<ProductCategory, ApiError> {
        let path = Query::GetCategory(id).path();
        tracing::debug!(%path, "GET");
        let res = self.http.get(self.url(&path)).send().await?;
        Self::read_json(res).await
    }

    async fn create_category(&self, cmd: &CreateCategory) -> Result<ProductCategory, ApiError> {
        let path = Mutation::CreateCategory.path();
        tracing::debug!(%path, name = %cmd.name, "POST");
        let res = self.http.post(self.url(&path)).json(cmd).send().await?;
        Self::read_json(res).await
    }

    async fn update_category(
        &self,
        id: CategoryId,
        cmd: &UpdateCategory,
    ) -> Result<ProductCategory, ApiError> {
        let path = Mutation::UpdateCategory(id).path();
        tracing::debug!(%path, "PUT");
        let res = self.http.put(self.url(&path)).json(cmd).send().await?;
        Self::read_json(res).await
    }

    async fn delete_category(&self, id: CategoryId) -> Result<(), ApiError> {
        let path = Mutation::DeleteCategory(id).path();
        tracing::debug!(%path, "DELETE");
        let res = self.http.delete(self.url(&path)).send().await?;
        Self::read_empty(res).await
    }
}
