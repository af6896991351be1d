use std::sync::Arc;

use catalog_infra::{CatalogConfig, InMemoryProductStore, PostgresProductStore};
use catalog_observability::TracingLogger;
use catalog_products::{
    BulkValidationPolicy, CatalogResult, CatalogService, ProductStore, StoreError,
    ValidationGateway,
};

/// Store handle shared by the service and the gateway.
pub type DynProductStore = Arc<dyn ProductStore>;

pub type Catalog = CatalogService<DynProductStore>;

/// Everything the handlers need, built once at startup.
pub struct AppServices {
    pub catalog: Arc<Catalog>,
    pub gateway: ValidationGateway<DynProductStore>,
}

impl AppServices {
    pub fn new(store: DynProductStore, policy: BulkValidationPolicy) -> Self {
        let catalog = Arc::new(
            CatalogService::new(store, Arc::new(TracingLogger::new("CatalogService")))
                .with_bulk_policy(policy),
        );
        let gateway = ValidationGateway::new(catalog.clone());
        Self { catalog, gateway }
    }

    /// In-memory wiring (dev/test).
    pub fn in_memory(policy: BulkValidationPolicy) -> Self {
        Self::new(InMemoryProductStore::arc(), policy)
    }

    /// Postgres when `DATABASE_URL` is configured, in-memory otherwise.
    pub fn from_config(config: &CatalogConfig) -> Result<Self, StoreError> {
        match &config.database {
            Some(db) => {
                let store = PostgresProductStore::from_config(db)?;
                Ok(Self::new(Arc::new(store), config.bulk_policy))
            }
            None => {
                tracing::warn!("DATABASE_URL not set; using in-memory product store");
                Ok(Self::in_memory(config.bulk_policy))
            }
        }
    }

    pub async fn connect(&self) -> CatalogResult<()> {
        self.catalog.connect().await
    }

    pub async fn disconnect(&self) -> CatalogResult<()> {
        self.catalog.disconnect().await
    }
}
