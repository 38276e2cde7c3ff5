//! The operation→tag mapping.
//!
//! | operation                     | provides                              | invalidates                          |
//! |-------------------------------|---------------------------------------|--------------------------------------|
//! | list products                 | {PRODUCT}                             | —                                    |
//! | get product(id)               | {PRODUCT,id}                          | —                                    |
//! | create product                | —                                     | {PRODUCT}                            |
//! | update product(id)            | —                                     | {PRODUCT,id}, {PRODUCT}              |
//! | delete product(id)            | —                                     | {PRODUCT,id}, {PRODUCT}              |
//! | products by category(cid)     | {PRODUCT,p.id} per p, {CATEGORY,cid}  | —                                    |
//! | list categories               | {CATEGORY}                            | —                                    |
//! | get category(id)              | {CATEGORY,id}                         | —                                    |
//! | create category               | —                                     | {CATEGORY}                           |
//! | update category(id)           | —                                     | {CATEGORY,id}, {CATEGORY}            |
//! | delete category(id)           | —                                     | {CATEGORY,id}, {CATEGORY}, {PRODUCT} |
//!
//! Deleting a category may orphan products referencing it, so it flushes the
//! whole PRODUCT tag set instead of attempting precise dependency tracking.

use stocklist_client::{Mutation, Query};

use crate::store::QueryData;
use crate::tag::Tag;

/// Tags a successful read associates with its cached result.
///
/// Only ever called with a *successful* result: a get-by-id that found nothing
/// resolves to an error state instead and provides no tags, so a negative
/// lookup is never cached as a live entity binding.
pub fn provided_tags(query: &Query, data: &QueryData) -> Vec<Tag> {
    match (query, data) {
        (Query::ListProducts, _) => vec![Tag::products()],
        (Query::GetProduct(id), _) => vec![Tag::product(*id)],
        (Query::ProductsByCategory(cid), QueryData::Products(products)) => {
            let mut tags: Vec<Tag> = products.iter().map(|p| Tag::product(p.id)).collect();
            tags.push(Tag::category(*cid));
            tags
        }
        // An empty or mismatched payload still binds the category itself.
        (Query::ProductsByCategory(cid), _) => vec![Tag::category(*cid)],
        (Query::ListCategories, _) => vec![Tag::categories()],
        (Query::GetCategory(id), _) => vec![Tag::category(*id)],
    }
}

/// Tags a completed write invalidates.
pub fn invalidated_tags(mutation: &Mutation) -> Vec<Tag> {
    match mutation {
        Mutation::CreateProduct => vec![Tag::products()],
        Mutation::UpdateProduct(id) | Mutation::DeleteProduct(id) => {
            vec![Tag::product(*id), Tag::products()]
        }
        Mutation::CreateCategory => vec![Tag::categories()],
        Mutation::UpdateCategory(id) => vec![Tag::category(*id), Tag::categories()],
        Mutation::DeleteCategory(id) => {
            vec![Tag::category(*id), Tag::categories(), Tag::products()]
        }
    }
}
