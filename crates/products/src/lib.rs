//! Products catalog module.
//!
//! Business rules for the product catalog: the product model, the storage
//! contract the rules run against, the catalog service that owns the
//! invariants, and the bulk validation gateway used by other services.

pub mod error;
pub mod gateway;
pub mod policy;
pub mod product;
pub mod service;
pub mod store;

pub use error::{CatalogError, CatalogResult};
pub use gateway::ValidationGateway;
pub use policy::BulkValidationPolicy;
pub use product::{CreateProduct, Product, ProductId, ProductPatch, ProductState, UpdateProduct};
pub use service::CatalogService;
pub use store::{ProductStore, StoreError};

#[cfg(test)]
mod testing;
