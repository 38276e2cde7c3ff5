//! Read-after-write consistency through the cached client, end to end against
//! the in-memory backend.

use stocklist_cache::{CachedCatalog, ClientError, QueryStatus};
use stocklist_catalog::{
    CreateCategory, CreateProduct, ProductStatus, UpdateCategory, UpdateProduct,
};
use stocklist_client::{ApiError, InMemoryCatalog, Query};
use stocklist_core::{CategoryId, ProductId};

fn cached() -> CachedCatalog<InMemoryCatalog> {
    stocklist_observability::init();
    CachedCatalog::new(InMemoryCatalog::new())
}

fn product_cmd(name: &str, category_id: CategoryId) -> CreateProduct {
    CreateProduct {
        name: name.to_string(),
        sku: "TOOL-001".to_string(),
        stock: 5,
        price: 19.99,
        category_id,
        status: ProductStatus::Active,
        description: None,
    }
}

#[tokio::test]
async fn created_category_shows_up_in_subsequent_list() {
    let client = cached();

    let before = client.list_categories().await.unwrap();
    assert!(before.is_empty());

    let tools = client
        .create_category(CreateCategory {
            name: "Tools".to_string(),
            description: None,
        })
        .await
        .unwrap();

    let after = client.list_categories().await.unwrap();
    assert!(after.iter().any(|c| c.id == tools.id && c.name == "Tools"));
}

#[tokio::test]
async fn created_product_shows_up_in_its_category_view() {
    let client = cached();

    let tools = client
        .create_category(CreateCategory {
            name: "Tools".to_string(),
            description: None,
        })
        .await
        .unwrap();

    let created = client.create_product(product_cmd("Tool Set", tools.id)).await.unwrap();

    let view = client.products_by_category(tools.id).await.unwrap();
    assert!(view.iter().any(|p| p.id == created.id && p.name == "Tool Set"));
}

#[tokio::test]
async fn product_writes_refresh_populated_category_views() {
    let client = cached();

    let tools = client
        .create_category(CreateCategory {
            name: "Tools".to_string(),
            description: None,
        })
        .await
        .unwrap();
    let first = client.create_product(product_cmd("Tool Set", tools.id)).await.unwrap();

    // Watch the view; it provides one instance tag per product, so any
    // type-wide product invalidation covers it and refetches it on the spot.
    let _view = client.watch(Query::ProductsByCategory(tools.id)).await.unwrap();

    let second = client.create_product(product_cmd("Hammer", tools.id)).await.unwrap();
    assert_eq!(
        client.cache().status(Query::ProductsByCategory(tools.id)),
        QueryStatus::Fresh
    );
    let view = client.products_by_category(tools.id).await.unwrap();
    assert_eq!(view.len(), 2);
    assert!(view.iter().any(|p| p.id == first.id));
    assert!(view.iter().any(|p| p.id == second.id));
}

#[tokio::test]
async fn create_product_refetches_watched_list_immediately() {
    let client = cached();

    let tools = client
        .create_category(CreateCategory {
            name: "Tools".to_string(),
            description: None,
        })
        .await
        .unwrap();

    let _list = client.watch(Query::ListProducts).await.unwrap();
    assert_eq!(client.cache().status(Query::ListProducts), QueryStatus::Fresh);

    // The watcher keeps the list subscribed, so the invalidation refetches it
    // immediately and it comes back fresh with the new item.
    let created = client.create_product(product_cmd("Hammer", tools.id)).await.unwrap();
    assert_eq!(client.cache().status(Query::ListProducts), QueryStatus::Fresh);

    let list = client.list_products().await.unwrap();
    assert!(list.iter().any(|p| p.id == created.id));
}

#[tokio::test]
async fn create_product_leaves_unwatched_list_stale() {
    let client = cached();

    let tools = client
        .create_category(CreateCategory {
            name: "Tools".to_string(),
            description: None,
        })
        .await
        .unwrap();

    // One-shot read: nothing keeps the list subscribed afterwards.
    client.list_products().await.unwrap();

    client.create_product(product_cmd("Hammer", tools.id)).await.unwrap();

    // No subscriber, no immediate refetch: stale until the next access.
    assert_eq!(client.cache().status(Query::ListProducts), QueryStatus::Stale);
    assert_eq!(client.list_products().await.unwrap().len(), 1);
    assert_eq!(client.cache().status(Query::ListProducts), QueryStatus::Fresh);
}

#[tokio::test]
async fn repeated_reads_do_not_accumulate_subscribers() {
    let client = cached();

    for _ in 0..5 {
        client.list_products().await.unwrap();
    }
    assert_eq!(client.cache().subscribers(Query::ListProducts), 0);
}

#[tokio::test]
async fn dropping_the_watch_guard_releases_the_subscription() {
    let client = cached();

    let tools = client
        .create_category(CreateCategory {
            name: "Tools".to_string(),
            description: None,
        })
        .await
        .unwrap();

    let list = client.watch(Query::ListProducts).await.unwrap();
    assert_eq!(list.query(), Query::ListProducts);
    assert_eq!(client.cache().subscribers(Query::ListProducts), 1);

    drop(list);
    assert_eq!(client.cache().subscribers(Query::ListProducts), 0);

    // With no watcher left, a write leaves the view stale instead of
    // refetching on behalf of nobody.
    client.create_product(product_cmd("Hammer", tools.id)).await.unwrap();
    assert_eq!(client.cache().status(Query::ListProducts), QueryStatus::Stale);
}

#[tokio::test]
async fn deleting_a_category_invalidates_category_and_product_views() {
    let client = cached();

    let tools = client
        .create_category(CreateCategory {
            name: "Tools".to_string(),
            description: None,
        })
        .await
        .unwrap();
    client.create_product(product_cmd("Wrench", tools.id)).await.unwrap();

    // Prime both views with one-shot reads so staleness is observable.
    client.products_by_category(tools.id).await.unwrap();
    client.list_products().await.unwrap();

    client.delete_category(tools.id).await.unwrap();

    assert_eq!(
        client.cache().status(Query::ProductsByCategory(tools.id)),
        QueryStatus::Stale
    );
    assert_eq!(client.cache().status(Query::ListProducts), QueryStatus::Stale);
}

#[tokio::test]
async fn update_refreshes_the_entity_view() {
    let client = cached();

    let tools = client
        .create_category(CreateCategory {
            name: "Tools".to_string(),
            description: None,
        })
        .await
        .unwrap();
    let created = client.create_product(product_cmd("Drill", tools.id)).await.unwrap();

    assert_eq!(client.get_product(created.id).await.unwrap().stock, 5);

    client
        .update_product(
            created.id,
            UpdateProduct {
                stock: Some(0),
                status: Some(ProductStatus::OutOfStock),
                ..UpdateProduct::default()
            },
        )
        .await
        .unwrap();

    let fetched = client.get_product(created.id).await.unwrap();
    assert_eq!(fetched.stock, 0);
    assert_eq!(fetched.status, ProductStatus::OutOfStock);
}

#[tokio::test]
async fn local_validation_failure_never_reaches_the_backend() {
    let client = cached();

    let err = client
        .create_product(CreateProduct {
            name: "Drill".to_string(),
            sku: "TOOL-002".to_string(),
            stock: 5,
            price: 19.99,
            category_id: CategoryId::new(1),
            status: ProductStatus::OutOfStock,
            description: None,
        })
        .await
        .unwrap_err();

    let fields = err.field_errors().expect("expected local validation failure");
    assert_eq!(
        fields.get("stock"),
        Some("Products marked as out of stock should have 0 stock quantity.")
    );

    // Nothing was created backend-side.
    assert!(client.list_products().await.unwrap().is_empty());
}

#[tokio::test]
async fn backend_rejection_surfaces_and_leaves_error_state_on_reads() {
    let client = cached();

    // Valid command, but the category does not exist backend-side.
    let err = client
        .create_product(product_cmd("Orphan", CategoryId::new(42)))
        .await
        .unwrap_err();
    match err {
        ClientError::Api(ApiError::Status { status, .. }) => assert_eq!(status, 400),
        other => panic!("expected backend rejection, got {other:?}"),
    }

    // A failing read lands the key in error state, never fresh.
    let err = client.get_category(CategoryId::new(42)).await.unwrap_err();
    match err {
        ClientError::Api(ApiError::NotFound) => {}
        other => panic!("expected not-found, got {other:?}"),
    }
    assert_eq!(
        client.cache().status(Query::GetCategory(CategoryId::new(42))),
        QueryStatus::Error
    );
}

#[tokio::test]
async fn noop_update_hits_the_backend_without_invalidating() {
    let client = cached();

    let tools = client
        .create_category(CreateCategory {
            name: "Tools".to_string(),
            description: None,
        })
        .await
        .unwrap();
    client.list_categories().await.unwrap();
    assert_eq!(client.cache().status(Query::ListCategories), QueryStatus::Fresh);

    let unchanged = client
        .update_category(tools.id, UpdateCategory::default())
        .await
        .unwrap();
    assert_eq!(unchanged.name, "Tools");

    // An empty update cannot change server state, so cached views keep their
    // freshness (a real update would have left this stale or refetched).
    assert_eq!(client.cache().status(Query::ListCategories), QueryStatus::Fresh);

    // It still goes out, so a missing target surfaces as the backend's 404.
    let missing = client
        .update_product(ProductId::new(99), UpdateProduct::default())
        .await
        .unwrap_err();
    match missing {
        ClientError::Api(ApiError::NotFound) => {}
        other => panic!("expected not-found, got {other:?}"),
    }
}
