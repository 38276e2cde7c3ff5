//! Composition of the API facade with the cache: validate, dispatch,
//! invalidate, refetch.

use thiserror::Error;

use stocklist_catalog::{
    CreateCategory, CreateProduct, Product, ProductCategory, UpdateCategory, UpdateProduct,
};
use stocklist_client::{ApiError, CatalogApi, Mutation, Query};
use stocklist_core::{CategoryId, FieldErrors, ProductId};

use crate::policy;
use crate::store::{CacheContext, QueryData, SubscribeOutcome};

/// Everything that can go wrong at the composed surface.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Local schema validation failed. The request never left the process.
    #[error("validation failed: {0}")]
    Validation(#[from] FieldErrors),

    /// The request went out and failed (transport, backend, or decode).
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ClientError {
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ClientError::Validation(errors) => Some(errors),
            ClientError::Api(_) => None,
        }
    }
}

/// A [`CatalogApi`] wrapped in tag-driven caching.
///
/// Reads go through the cache: a fresh entry answers without touching the
/// network, anything else fetches and resolves. Plain reads are one-shot and
/// leave no subscription behind; a consumer that wants its view refetched on
/// invalidation holds a [`Subscription`] from [`CachedCatalog::watch`].
/// Writes validate locally first (a [`FieldErrors`] failure never reaches the
/// network), then dispatch, then invalidate the tags the mutation names,
/// refetching watched dependents immediately.
#[derive(Debug)]
pub struct CachedCatalog<A: CatalogApi> {
    api: A,
    cache: CacheContext,
}

/// A live interest in one query, handed out by [`CachedCatalog::watch`].
/// While any subscription for a key is alive, invalidation refetches that key
/// immediately instead of leaving it stale. Dropping the guard releases the
/// subscription.
#[derive(Debug)]
pub struct Subscription<'a> {
    cache: &'a CacheContext,
    query: Query,
}

impl Subscription<'_> {
    pub fn query(&self) -> Query {
        self.query
    }
}

impl Drop for Subscription<'_> {
    fn drop(&mut self) {
        self.cache.unsubscribe(self.query);
    }
}

impl<A: CatalogApi> CachedCatalog<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            cache: CacheContext::new(),
        }
    }

    /// The cache bookkeeping, for inspection.
    pub fn cache(&self) -> &CacheContext {
        &self.cache
    }

    async fn fetch(&self, query: Query) -> Result<QueryData, ApiError> {
        match query {
            Query::ListProducts => self.api.list_products().await.map(QueryData::Products),
            Query::GetProduct(id) => self.api.get_product(id).await.map(QueryData::Product),
            Query::ProductsByCategory(id) => {
                self.api.products_by_category(id).await.map(QueryData::Products)
            }
            Query::ListCategories => self.api.list_categories().await.map(QueryData::Categories),
            Query::GetCategory(id) => self.api.get_category(id).await.map(QueryData::Category),
        }
    }

    /// Read `query` once: answer from a fresh entry or fetch and resolve.
    ///
    /// One-shot — the subscriber registered for the duration of the read is
    /// released before returning, so repeated reads never inflate the
    /// subscriber count. Use [`CachedCatalog::watch`] for lasting interest.
    pub async fn query(&self, query: Query) -> Result<QueryData, ClientError> {
        let result = match self.cache.subscribe(query) {
            SubscribeOutcome::Cached(data) => Ok(data),
            SubscribeOutcome::Fetch(request) => match self.fetch(query).await {
                Ok(data) => {
                    self.cache.resolve_ok(query, request, data.clone());
                    Ok(data)
                }
                Err(err) => {
                    self.cache.resolve_err(query, request);
                    Err(err.into())
                }
            },
        };
        self.cache.unsubscribe(query);
        result
    }

    /// Hold a lasting interest in `query`, priming it if needed.
    ///
    /// While the returned [`Subscription`] is alive, any invalidation that
    /// covers the key refetches it immediately. A failed priming fetch records
    /// the error state, releases the registration, and propagates the error.
    pub async fn watch(&self, query: Query) -> Result<Subscription<'_>, ClientError> {
        if let SubscribeOutcome::Fetch(request) = self.cache.subscribe(query) {
            match self.fetch(query).await {
                Ok(data) => {
                    self.cache.resolve_ok(query, request, data);
                }
                Err(err) => {
                    self.cache.resolve_err(query, request);
                    self.cache.unsubscribe(query);
                    return Err(err.into());
                }
            }
        }
        Ok(Subscription {
            cache: &self.cache,
            query,
        })
    }

    /// Invalidate after a successful mutation and immediately refetch every
    /// still-subscribed dependent.
    async fn refresh_after(&self, mutation: Mutation) {
        let tags = policy::invalidated_tags(&mutation);
        let refetch = self.cache.invalidate(&tags);
        for (query, request) in refetch {
            match self.fetch(query).await {
                Ok(data) => {
                    self.cache.resolve_ok(query, request, data);
                }
                Err(err) => {
                    tracing::warn!(?query, %err, "refetch after invalidation failed");
                    self.cache.resolve_err(query, request);
                }
            }
        }
    }

    // ------------- reads -------------

    pub async fn list_products(&self) -> Result<Vec<Product>, ClientError> {
        match self.query(Query::ListProducts).await? {
            QueryData::Products(products) => Ok(products),
            other => Err(variant_mismatch(Query::ListProducts, &other)),
        }
    }

    pub async fn get_product(&self, id: ProductId) -> Result<Product, ClientError> {
        match self.query(Query::GetProduct(id)).await? {
            QueryData::Product(product) => Ok(product),
            other => Err(variant_mismatch(Query::GetProduct(id), &other)),
        }
    }

    pub async fn products_by_category(&self, id: CategoryId) -> Result<Vec<Product>, ClientError> {
        match self.query(Query::ProductsByCategory(id)).await? {
            QueryData::Products(products) => Ok(products),
            other => Err(variant_mismatch(Query::ProductsByCategory(id), &other)),
        }
    }

    pub async fn list_categories(&self) -> Result<Vec<ProductCategory>, ClientError> {
        match self.query(Query::ListCategories).await? {
            QueryData::Categories(categories) => Ok(categories),
            other => Err(variant_mismatch(Query::ListCategories, &other)),
        }
    }

    pub async fn get_category(&self, id: CategoryId) -> Result<ProductCategory, ClientError> {
        match self.query(Query::GetCategory(id)).await? {
            QueryData::Category(category) => Ok(category),
            other => Err(variant_mismatch(Query::GetCategory(id), &other)),
        }
    }

    // ------------- writes -------------

    pub async fn create_product(&self, cmd: CreateProduct) -> Result<Product, ClientError> {
        let cmd = cmd.validate()?;
        let product = self.api.create_product(&cmd).await?;
        self.refresh_after(Mutation::CreateProduct).await;
        Ok(product)
    }

    pub async fn update_product(
        &self,
        id: ProductId,
        cmd: UpdateProduct,
    ) -> Result<Product, ClientError> {
        let cmd = cmd.validate()?;
        let product = self.api.update_product(id, &cmd).await?;
        // An empty update still goes out (the backend may 404) but cannot
        // change server state, so cached views keep their bindings.
        if !cmd.is_noop() {
            self.refresh_after(Mutation::UpdateProduct(id)).await;
        }
        Ok(product)
    }

    pub async fn delete_product(&self, id: ProductId) -> Result<(), ClientError> {
        self.api.delete_product(id).await?;
        self.refresh_after(Mutation::DeleteProduct(id)).await;
        Ok(())
    }

    pub async fn create_category(&self, cmd: CreateCategory) -> Result<ProductCategory, ClientError> {
        let cmd = cmd.validate()?;
        let category = self.api.create_category(&cmd).await?;
        self.refresh_after(Mutation::CreateCategory).await;
        Ok(category)
    }

    pub async fn update_category(
        &self,
        id: CategoryId,
        cmd: UpdateCategory,
    ) -> Result<ProductCategory, ClientError> {
        let cmd = cmd.validate()?;
        let category = self.api.update_category(id, &cmd).await?;
        if !cmd.is_noop() {
            self.refresh_after(Mutation::UpdateCategory(id)).await;
        }
        Ok(category)
    }

    pub async fn delete_category(&self, id: CategoryId) -> Result<(), ClientError> {
        self.api.delete_category(id).await?;
        self.refresh_after(Mutation::DeleteCategory(id)).await;
        Ok(())
    }
}

/// A cache entry held data of a different shape than its key implies. Cannot
/// happen through this module's own fetch path; surfaced as a decode error
/// rather than a panic.
fn variant_mismatch(query: Query, data: &QueryData) -> ClientError {
    ClientError::Api(ApiError::Decode(format!(
        "cached data for {query:?} has unexpected shape {data:?}"
    )))
}
