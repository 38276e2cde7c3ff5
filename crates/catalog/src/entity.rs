//! Catalog entities as served by the backend.
//!
//! The backend is the single source of truth: entities are created and
//! destroyed exclusively server-side, and the client only ever holds derived,
//! cached copies of them.

use serde::{Deserialize, Serialize};

use stocklist_core::{CategoryId, ProductId};

/// Product lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    Active,
    Inactive,
    Discontinued,
    OutOfStock,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Active => "active",
            ProductStatus::Inactive => "inactive",
            ProductStatus::Discontinued => "discontinued",
            ProductStatus::OutOfStock => "out_of_stock",
        }
    }
}

/// A product row.
///
/// Invariant (enforced at input-validation time, not by the backend): a
/// product with `status == OutOfStock` carries `stock == 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub sku: String,
    pub stock: i64,
    pub price: f64,
    pub category_id: CategoryId,
    pub status: ProductStatus,
    pub description: Option<String>,
}

/// A product category. One category has many products via
/// `Product::category_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCategory {
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
}
