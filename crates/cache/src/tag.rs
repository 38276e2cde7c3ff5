//! Cache tags.
//!
//! A tag labels a class of cached data (`{PRODUCT}`) or a specific instance
//! (`{PRODUCT, id}`). Reads attach tags to their cached results; writes name
//! the tags they invalidate.

use stocklist_core::{CategoryId, ProductId};

/// The entity class a tag refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagType {
    Product,
    Category,
}

/// A cache tag: an entity class, optionally narrowed to one instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag {
    ty: TagType,
    id: Option<i64>,
}

impl Tag {
    /// The type-wide product tag `{PRODUCT}`.
    pub const fn products() -> Self {
        Self {
            ty: TagType::Product,
            id: None,
        }
    }

    /// The type-wide category tag `{CATEGORY}`.
    pub const fn categories() -> Self {
        Self {
            ty: TagType::Category,
            id: None,
        }
    }

    /// The instance tag `{PRODUCT, id}`.
    pub const fn product(id: ProductId) -> Self {
        Self {
            ty: TagType::Product,
            id: Some(id.get()),
        }
    }

    /// The instance tag `{CATEGORY, id}`.
    pub const fn category(id: CategoryId) -> Self {
        Self {
            ty: TagType::Category,
            id: Some(id.get()),
        }
    }

    pub fn ty(&self) -> TagType {
        self.ty
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    /// True iff invalidating `self` hits a result that provided `provided`.
    ///
    /// Types must match; then a type-wide side on either end matches
    /// everything of that type, and two instance tags match on equal ids.
    /// Type-wide invalidation sweeping every instance is what lets
    /// delete-category conservatively flush all product views, and instance
    /// invalidation hitting type-wide providers keeps list views honest.
    pub fn covers(&self, provided: &Tag) -> bool {
        self.ty == provided.ty
            && match (self.id, provided.id) {
                (None, _) | (_, None) => true,
                (Some(a), Some(b)) => a == b,
            }
    }
}
