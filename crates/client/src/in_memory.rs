//! In-memory backend for tests/dev.
//!
//! Mirrors the real backend's observable behavior: sequential ids starting at
//! 1, category existence checked on product create/update, deletes that orphan
//! rather than cascade, partial updates that touch only the fields present.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use stocklist_catalog::{
    CreateCategory, CreateProduct, Product, ProductCategory, ProductStatus, UpdateCategory,
    UpdateProduct,
};
use stocklist_core::{CategoryId, ProductId};

use crate::api::CatalogApi;
use crate::error::ApiError;

#[derive(Debug, Default)]
struct State {
    products: BTreeMap<ProductId, Product>,
    categories: BTreeMap<CategoryId, ProductCategory>,
    next_product_id: i64,
    next_category_id: i64,
}

/// In-memory [`CatalogApi`] implementation.
///
/// - No IO / no network
/// - Same status semantics as the real backend (404 for missing targets,
///   400 for a create against an unknown category)
#[derive(Debug)]
pub struct InMemoryCatalog {
    state: Mutex<State>,
}

impl InMemoryCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                next_product_id: 1,
                next_category_id: 1,
                ..State::default()
            }),
        }
    }

    /// A catalog pre-seeded with a small demo inventory, one category and
    /// product per corner of the status space.
    pub fn with_sample_data() -> Self {
        let catalog = Self::new();
        {
            let mut state = catalog.lock();
            for (name, description) in [
                ("Electronics", "Electronic devices and accessories"),
                ("Clothing", "Apparel and fashion items"),
                ("Books", "Books and educational materials"),
            ] {
                state.insert_category(name, Some(description));
            }
            for (name, sku, stock, price, category, status) in [
                ("Smartphone", "ELEC-001", 50, 699.99, 1, ProductStatus::Active),
                ("Smart Watch", "ELEC-004", 0, 299.99, 1, ProductStatus::OutOfStock),
                ("Winter Jacket", "CLOTH-004", 15, 149.99, 2, ProductStatus::Inactive),
                ("History Book", "BOOK-004", 20, 39.99, 3, ProductStatus::Discontinued),
            ] {
                state.insert_product(name, sku, stock, price, CategoryId::new(category), status);
            }
        }
        catalog
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // Single consumer per test; a poisoned lock only means a test panicked
        // mid-call, so recovering the guard is fine.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl State {
    fn insert_category(&mut self, name: &str, description: Option<&str>) -> ProductCategory {
        let id = CategoryId::new(self.next_category_id);
        self.next_category_id += 1;
        let category = ProductCategory {
            id,
            name: name.to_string(),
            description: description.map(str::to_string),
        };
        self.categories.insert(id, category.clone());
        category
    }

    fn insert_product(
        &mut self,
        name: &str,
        sku: &str,
        stock: i64,
        price: f64,
        category_id: CategoryId,
        status: ProductStatus,
    ) -> Product {
        let id = ProductId::new(self.next_product_id);
        self.next_product_id += 1;
        let product = Product {
            id,
            name: name.to_string(),
            sku: sku.to_string(),
            stock,
            price,
            category_id,
            status,
            description: None,
        };
        self.products.insert(id, product.clone());
        product
    }
}

impl CatalogApi for InMemoryCatalog {
    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        Ok(self.lock().products.values().cloned().collect())
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, ApiError> {
        self.lock().products.get(&id).cloned().ok_or(ApiError::NotFound)
    }

    async fn create_product(&self, cmd: &CreateProduct) -> Result<Product, ApiError> {
        let mut state = self.lock();
        if !state.categories.contains_key(&cmd.category_id) {
            return Err(ApiError::Status {
                status: 400,
                message: "Invalid category ID".to_string(),
            });
        }

        let id = ProductId::new(state.next_product_id);
        state.next_product_id += 1;
        let product = Product {
            id,
            name: cmd.name.clone(),
            sku: cmd.sku.clone(),
            stock: cmd.stock,
            price: cmd.price,
            category_id: cmd.category_id,
            status: cmd.status,
            description: cmd.description.clone(),
        };
        state.products.insert(id, product.clone());
        Ok(product)
    }

    async fn update_product(&self, id: ProductId, cmd: &UpdateProduct) -> Result<Product, ApiError> {
        let mut state = self.lock();
        if !state.products.contains_key(&id) {
            return Err(ApiError::NotFound);
        }
        if let Some(category_id) = cmd.category_id
            && !state.categories.contains_key(&category_id)
        {
            return Err(ApiError::NotFound);
        }

        let product = state
            .products
            .get_mut(&id)
            .ok_or(ApiError::NotFound)?;
        if let Some(name) = &cmd.name {
            product.name = name.clone();
        }
        if let Some(sku) = &cmd.sku {
            product.sku = sku.clone();
        }
        if let Some(stock) = cmd.stock {
            product.stock = stock;
        }
        if let Some(price) = cmd.price {
            product.price = price;
        }
        if let Some(category_id) = cmd.category_id {
            product.category_id = category_id;
        }
        if let Some(status) = cmd.status {
            product.status = status;
        }
        if let Some(description) = &cmd.description {
            product.description = Some(description.clone());
        }
        Ok(product.clone())
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), ApiError> {
        match self.lock().products.remove(&id) {
            Some(_) => Ok(()),
            None => Err(ApiError::NotFound),
        }
    }

    async fn products_by_category(&self, id: CategoryId) -> Result<Vec<Product>, ApiError> {
        let state = self.lock();
        if !state.categories.contains_key(&id) {
            return Err(ApiError::NotFound);
        }
        Ok(state
            .products
            .values()
            .filter(|p| p.category_id == id)
            .cloned()
            .collect())
    }

    async fn list_categories(&self) -> Result<Vec<ProductCategory>, ApiError> {
        Ok(self.lock().categories.values().cloned().collect())
    }

    async fn get_category(&self, id: CategoryId) -> Result<ProductCategory, ApiError> {
        self.lock().categories.get(&id).cloned().ok_or(ApiError::NotFound)
    }

    async fn create_category(&self, cmd: &CreateCategory) -> Result<ProductCategory, ApiError> {
        let mut state = self.lock();
        Ok(state.insert_category(&cmd.name, cmd.description.as_deref()))
    }

    async fn update_category(
        &self,
        id: CategoryId,
        cmd: &UpdateCategory,
    ) -> Result<ProductCategory, ApiError> {
        let mut state = self.lock();
        let category = state.categories.get_mut(&id).ok_or(ApiError::NotFound)?;
        if let Some(name) = &cmd.name {
            category.name = name.clone();
        }
        if let Some(description) = &cmd.description {
            category.description = Some(description.clone());
        }
        Ok(category.clone())
    }

    async fn delete_category(&self, id: CategoryId) -> Result<(), ApiError> {
        // Products referencing the category are orphaned, not cascaded; the
        // backend behaves the same way.
        match self.lock().categories.remove(&id) {
            Some(_) => Ok(()),
            None => Err(ApiError::NotFound),
        }
    }
}
