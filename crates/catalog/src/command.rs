//! Command objects sent to the backend.
//!
//! Create commands are full, client-validated projections of an entity; update
//! commands are partial — every field is optional, and an absent field means
//! "do not change". Absent fields are omitted from the wire payload entirely.

use serde::{Deserialize, Serialize};

use stocklist_core::CategoryId;

use crate::entity::ProductStatus;

/// Command: create a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateProduct {
    pub name: String,
    pub sku: String,
    pub stock: i64,
    pub price: f64,
    pub category_id: CategoryId,
    pub status: ProductStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Command: partially update a product.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UpdateProduct {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProductStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl UpdateProduct {
    /// True when no field is set (a valid no-op update).
    pub fn is_noop(&self) -> bool {
        self.name.is_none()
            && self.sku.is_none()
            && self.stock.is_none()
            && self.price.is_none()
            && self.category_id.is_none()
            && self.status.is_none()
            && self.description.is_none()
    }
}

/// Command: create a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCategory {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Command: partially update a category.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UpdateCategory {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl UpdateCategory {
    pub fn is_noop(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}
