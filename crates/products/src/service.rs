//! Catalog service: owns every catalog invariant.
//!
//! The service is stateless between calls; all state lives in the store, so a
//! single instance is shared behind an `Arc` by concurrent callers.
//!
//! ## Check-then-act window
//!
//! `update` and `soft_delete` first look the product up through
//! [`CatalogService::get_by_id`] and then write in a second store call. A soft
//! delete that lands between the two is not detected: the write goes through
//! (or the store reports [`StoreError::Missing`] if the row is gone). Closing the
//! window needs a conditional write in the store, which the contract does not
//! require.
//!
//! [`StoreError::Missing`]: crate::store::StoreError::Missing

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use catalog_core::{Page, PageRequest, PaginationCalculator};
use catalog_observability::Logger;

use crate::error::{CatalogError, CatalogResult};
use crate::policy::BulkValidationPolicy;
use crate::product::{CreateProduct, Product, ProductId, UpdateProduct};
use crate::store::ProductStore;

pub const INVALID_PRODUCTS_MESSAGE: &str = "some products are not valid";

pub struct CatalogService<S> {
    store: S,
    logger: Arc<dyn Logger>,
    bulk_policy: BulkValidationPolicy,
}

impl<S> CatalogService<S>
where
    S: ProductStore,
{
    pub fn new(store: S, logger: Arc<dyn Logger>) -> Self {
        Self {
            store,
            logger,
            bulk_policy: BulkValidationPolicy::default(),
        }
    }

    pub fn with_bulk_policy(mut self, policy: BulkValidationPolicy) -> Self {
        self.bulk_policy = policy;
        self
    }

    pub fn bulk_policy(&self) -> BulkValidationPolicy {
        self.bulk_policy
    }

    pub(crate) fn logger(&self) -> &dyn Logger {
        self.logger.as_ref()
    }

    /// Open the store. Called by the process owner before serving requests.
    pub async fn connect(&self) -> CatalogResult<()> {
        self.store.connect().await?;
        let total = self.store.count_all().await?;
        let available = self.store.count_available().await?;
        self.logger.log(&format!(
            "Database connected ({available} of {total} products available)"
        ));
        Ok(())
    }

    /// Close the store. Called by the process owner on shutdown.
    pub async fn disconnect(&self) -> CatalogResult<()> {
        self.store.disconnect().await?;
        self.logger.log("Database disconnected");
        Ok(())
    }

    pub async fn create(&self, input: CreateProduct) -> CatalogResult<Product> {
        input.validate()?;
        let product = self.store.insert(input).await?;
        self.logger.log(&format!("Product #{} created", product.id));
        Ok(product)
    }

    /// One page of available products. `total` and `last_page` ignore
    /// soft-deleted rows.
    pub async fn list(&self, request: PageRequest) -> CatalogResult<Page<Product>> {
        let total = self.store.count_available().await?;
        let window = PaginationCalculator::window(request, total);
        let data = self
            .store
            .scan(window.offset, u64::from(request.limit()), true)
            .await?;

        Ok(Page {
            data,
            meta: PaginationCalculator::meta(request, total),
        })
    }

    /// Lookup that treats soft-deleted products as absent.
    pub async fn get_by_id(&self, id: ProductId) -> CatalogResult<Product> {
        match self.store.get_by_id(id).await? {
            Some(product) if product.available => Ok(product),
            _ => Err(not_found(id)),
        }
    }

    /// Apply `changes` to an available product.
    ///
    /// Any `id` in `changes` is discarded; the returned record carries the
    /// requested `id`. A patch with no fields returns the current record
    /// without writing.
    pub async fn update(&self, id: ProductId, changes: UpdateProduct) -> CatalogResult<Product> {
        if let Some(sent) = changes.id.filter(|sent| *sent != id) {
            self.logger
                .warn(&format!("Ignoring id {sent} in update payload for product #{id}"));
        }
        let patch = changes.into_patch()?;

        let current = self.get_by_id(id).await?;
        if patch.is_empty() {
            return Ok(current);
        }

        let mut updated = self.store.apply_update(id, patch).await?;
        updated.id = id;
        Ok(updated)
    }

    /// Flip `available` to false. Deleting an already deleted product is
    /// `NotFound`, not a no-op.
    pub async fn soft_delete(&self, id: ProductId) -> CatalogResult<Product> {
        self.get_by_id(id).await?;

        let product = self.store.mark_unavailable(id).await?;
        self.logger.log(&format!("Product #{id} marked unavailable"));
        Ok(product)
    }

    /// Confirm every id names a valid product under the configured policy.
    ///
    /// Duplicates are collapsed first. One invalid id rejects the whole
    /// request. On success the matched products are returned in id order.
    pub async fn validate_bulk(&self, ids: &[ProductId]) -> CatalogResult<Vec<Product>> {
        let requested: BTreeSet<ProductId> = ids.iter().copied().collect();
        if requested.is_empty() {
            return Ok(Vec::new());
        }

        let lookup: Vec<ProductId> = requested.iter().copied().collect();
        let found = self.store.get_by_ids(&lookup).await?;

        let valid: BTreeMap<ProductId, Product> = found
            .into_iter()
            .filter(|p| requested.contains(&p.id) && self.bulk_policy.admits(p))
            .map(|p| (p.id, p))
            .collect();

        if valid.len() < requested.len() {
            let rejected: Vec<String> = requested
                .iter()
                .filter(|id| !valid.contains_key(id))
                .map(ToString::to_string)
                .collect();
            self.logger.warn(&format!(
                "Bulk validation rejected ids [{}] (policy {})",
                rejected.join(", "),
                self.bulk_policy
            ));
            return Err(CatalogError::validation(INVALID_PRODUCTS_MESSAGE));
        }

        Ok(valid.into_values().collect())
    }
}

fn not_found(id: ProductId) -> CatalogError {
    CatalogError::not_found(format!("Product #{id} not found"))
}
