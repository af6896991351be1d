//! Storage contract consumed by the catalog service.
//!
//! Stores hold no business rules: they do not filter by availability unless
//! asked to, and they never check that a product is visible before writing.
//! Each operation is atomic on its own row; nothing spans several products.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::product::{CreateProduct, Product, ProductId, ProductPatch};

/// Persistence failure.
///
/// These are infrastructure errors (connectivity, constraints) as opposed to
/// domain errors (validation, visibility).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("constraint violation: {0}")]
    Constraint(String),

    /// The row disappeared between the service's existence check and the write.
    #[error("product #{0} is missing from the store")]
    Missing(ProductId),

    #[error("store backend failure: {0}")]
    Backend(String),
}

/// Product persistence abstraction.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Acquire backing resources. Called once by the process owner at startup.
    async fn connect(&self) -> Result<(), StoreError> {
        Ok(())
    }

    /// Release backing resources. Called once by the process owner at shutdown.
    async fn disconnect(&self) -> Result<(), StoreError> {
        Ok(())
    }

    /// Insert a new product; the store assigns the id and sets `available = true`.
    async fn insert(&self, product: CreateProduct) -> Result<Product, StoreError>;

    async fn count_available(&self) -> Result<u64, StoreError>;

    async fn count_all(&self) -> Result<u64, StoreError>;

    /// Products in id order, skipping `offset` and returning at most `limit`.
    async fn scan(
        &self,
        offset: u64,
        limit: u64,
        available_only: bool,
    ) -> Result<Vec<Product>, StoreError>;

    /// Point lookup regardless of availability.
    async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    /// Multi-row lookup regardless of availability. Unknown ids are skipped.
    async fn get_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, StoreError>;

    async fn apply_update(&self, id: ProductId, patch: ProductPatch) -> Result<Product, StoreError>;

    async fn mark_unavailable(&self, id: ProductId) -> Result<Product, StoreError>;
}

#[async_trait]
impl<S> ProductStore for Arc<S>
where
    S: ProductStore + ?Sized,
{
    async fn connect(&self) -> Result<(), StoreError> {
        (**self).connect().await
    }

    async fn disconnect(&self) -> Result<(), StoreError> {
        (**self).disconnect().await
    }

    async fn insert(&self, product: CreateProduct) -> Result<Product, StoreError> {
        (**self).insert(product).await
    }

    async fn count_available(&self) -> Result<u64, StoreError> {
        (**self).count_available().await
    }

    async fn count_all(&self) -> Result<u64, StoreError> {
        (**self).count_all().await
    }

    async fn scan(
        &self,
        offset: u64,
        limit: u64,
        available_only: bool,
    ) -> Result<Vec<Product>, StoreError> {
        (**self).scan(offset, limit, available_only).await
    }

    async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        (**self).get_by_id(id).await
    }

    async fn get_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, StoreError> {
        (**self).get_by_ids(ids).await
    }

    async fn apply_update(&self, id: ProductId, patch: ProductPatch) -> Result<Product, StoreError> {
        (**self).apply_update(id, patch).await
    }

    async fn mark_unavailable(&self, id: ProductId) -> Result<Product, StoreError> {
        (**self).mark_unavailable(id).await
    }
}
