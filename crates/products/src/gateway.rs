//! Bulk validation entry point for other services.
//!
//! Downstream services (orders, invoicing) call this before committing
//! anything that references product ids. The answer holds at call time only:
//! a product deleted after the call returns is the caller's problem.

use std::sync::Arc;

use crate::error::CatalogResult;
use crate::product::{Product, ProductId};
use crate::service::CatalogService;
use crate::store::ProductStore;

pub struct ValidationGateway<S> {
    service: Arc<CatalogService<S>>,
}

impl<S> Clone for ValidationGateway<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

impl<S> ValidationGateway<S>
where
    S: ProductStore,
{
    pub fn new(service: Arc<CatalogService<S>>) -> Self {
        Self { service }
    }

    pub async fn validate_products(&self, ids: &[ProductId]) -> CatalogResult<Vec<Product>> {
        let result = self.service.validate_bulk(ids).await;
        if let Ok(products) = &result {
            self.service.logger().log(&format!(
                "Validated {} product ids ({} distinct)",
                ids.len(),
                products.len()
            ));
        }
        result
    }
}
