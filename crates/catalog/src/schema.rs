//! Command validation schemas.
//!
//! Each command validates into a normalized copy of itself (strings trimmed,
//! SKU uppercased) or a [`FieldErrors`] map. Rules run top-to-bottom and
//! short-circuit per field; cross-field rules run last. Validation never
//! touches the network — a command that fails here is never sent.

use stocklist_core::{CategoryId, FieldErrors, ValidationResult};

use crate::command::{CreateCategory, CreateProduct, UpdateCategory, UpdateProduct};
use crate::entity::ProductStatus;

pub const NAME_MAX_LEN: usize = 100;
pub const SKU_MAX_LEN: usize = 50;
pub const DESCRIPTION_MAX_LEN: usize = 500;
pub const STOCK_MAX: i64 = 999_999;
pub const PRICE_MIN: f64 = 0.01;
pub const PRICE_MAX: f64 = 999_999.99;

/// Characters allowed in product/category names.
fn name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c.is_whitespace() || matches!(c, '-' | '_' | '&' | '(' | ')' | '.' | ',')
}

/// Characters allowed in a (already uppercased) SKU.
fn sku_char(c: char) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit() || matches!(c, '-' | '_')
}

fn check_name(errors: &mut FieldErrors, field: &str, label: &str, raw: &str) -> String {
    let name = raw.trim().to_string();
    if name.is_empty() {
        errors.push(field, format!("{label} name is required"));
    } else if name.chars().count() > NAME_MAX_LEN {
        errors.push(field, format!("{label} name must be less than {NAME_MAX_LEN} characters"));
    } else if !name.chars().all(name_char) {
        errors.push(field, format!("{label} name contains invalid characters"));
    }
    name
}

fn check_sku(errors: &mut FieldErrors, raw: &str) -> String {
    let sku = raw.trim().to_uppercase();
    if sku.is_empty() {
        errors.push("sku", "SKU is required");
    } else if sku.chars().count() > SKU_MAX_LEN {
        errors.push("sku", format!("SKU must be less than {SKU_MAX_LEN} characters"));
    } else if !sku.chars().all(sku_char) {
        errors.push(
            "sku",
            "SKU must contain only uppercase letters, numbers, hyphens, and underscores",
        );
    }
    sku
}

fn check_stock(errors: &mut FieldErrors, stock: i64) {
    if stock < 0 {
        errors.push("stock", "Stock cannot be negative");
    } else if stock > STOCK_MAX {
        errors.push("stock", "Stock value is too high");
    }
}

fn check_price(errors: &mut FieldErrors, price: f64) {
    if !price.is_finite() || price < PRICE_MIN {
        errors.push("price", "Price must be at least $0.01");
    } else if price > PRICE_MAX {
        errors.push("price", "Price cannot exceed $999,999.99");
    } else {
        // Multiple-of-0.01 check with tolerance for binary float noise
        // (19.999 fails, 19.99 passes).
        let cents = price * 100.0;
        if (cents - cents.round()).abs() > 1e-6 {
            errors.push("price", "Price must be rounded to the nearest cent");
        }
    }
}

fn check_category_id(errors: &mut FieldErrors, category_id: CategoryId) {
    if category_id.get() < 1 {
        errors.push("category_id", "Please select a category");
    }
}

fn check_description(errors: &mut FieldErrors, raw: &str) -> String {
    let description = raw.trim().to_string();
    if description.chars().count() > DESCRIPTION_MAX_LEN {
        errors.push(
            "description",
            format!("Description must be less than {DESCRIPTION_MAX_LEN} characters"),
        );
    }
    description
}

/// Out-of-stock products must carry zero stock. The error attaches to the
/// `stock` field (unless an earlier stock rule already claimed it).
fn check_stock_matches_status(errors: &mut FieldErrors, status: ProductStatus, stock: i64) {
    if status == ProductStatus::OutOfStock && stock > 0 {
        errors.push(
            "stock",
            "Products marked as out of stock should have 0 stock quantity.",
        );
    }
}

impl CreateProduct {
    /// Validate and normalize the command.
    pub fn validate(self) -> ValidationResult<CreateProduct> {
        let mut errors = FieldErrors::new();

        let name = check_name(&mut errors, "name", "Product", &self.name);
        let sku = check_sku(&mut errors, &self.sku);
        check_stock(&mut errors, self.stock);
        check_price(&mut errors, self.price);
        check_category_id(&mut errors, self.category_id);
        let description = self.description.map(|d| check_description(&mut errors, &d));
        check_stock_matches_status(&mut errors, self.status, self.stock);

        errors.into_result(CreateProduct {
            name,
            sku,
            stock: self.stock,
            price: self.price,
            category_id: self.category_id,
            status: self.status,
            description,
        })
    }
}

impl UpdateProduct {
    /// Validate and normalize the partial command. Absent fields are skipped;
    /// a command with zero fields set is a valid no-op. The cross-field stock
    /// rule only applies when both sides are present — with one side absent it
    /// is undecidable client-side and left to the backend.
    pub fn validate(self) -> ValidationResult<UpdateProduct> {
        let mut errors = FieldErrors::new();

        let name = self.name.map(|n| check_name(&mut errors, "name", "Product", &n));
        let sku = self.sku.map(|s| check_sku(&mut errors, &s));
        if let Some(stock) = self.stock {
            check_stock(&mut errors, stock);
        }
        if let Some(price) = self.price {
            check_price(&mut errors, price);
        }
        if let Some(category_id) = self.category_id {
            check_category_id(&mut errors, category_id);
        }
        let description = self.description.map(|d| check_description(&mut errors, &d));
        if let (Some(status), Some(stock)) = (self.status, self.stock) {
            check_stock_matches_status(&mut errors, status, stock);
        }

        errors.into_result(UpdateProduct {
            name,
            sku,
            stock: self.stock,
            price: self.price,
            category_id: self.category_id,
            status: self.status,
            description,
        })
    }
}

impl CreateCategory {
    pub fn validate(self) -> ValidationResult<CreateCategory> {
        let mut errors = FieldErrors::new();

        let name = check_name(&mut errors, "name", "Category", &self.name);
        let description = self.description.map(|d| check_description(&mut errors, &d));

        errors.into_result(CreateCategory { name, description })
    }
}

impl UpdateCategory {
    pub fn validate(self) -> ValidationResult<UpdateCategory> {
        let mut errors = FieldErrors::new();

        let name = self.name.map(|n| check_name(&mut errors, "name", "Category", &n));
        let description = self.description.map(|d| check_description(&mut errors, &d));

        errors.into_result(UpdateCategory { name, description })
    }
}
