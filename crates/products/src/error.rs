//! Service-level error taxonomy.

use thiserror::Error;

use catalog_core::DomainError;

use crate::store::StoreError;

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Failures surfaced by [`crate::CatalogService`].
///
/// Transport independent: adapters translate these into their own payloads.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Malformed input, or a bulk request naming an invalid product.
    #[error("{0}")]
    Validation(String),

    /// The product does not exist or has been soft-deleted.
    #[error("{0}")]
    NotFound(String),

    /// The store failed. Not retried at this layer.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CatalogError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Whether the caller caused the failure (as opposed to the store).
    pub fn is_client_fault(&self) -> bool {
        !matches!(self, Self::Store(_))
    }
}

impl From<DomainError> for CatalogError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::Validation(msg) => Self::Validation(msg),
            DomainError::NotFound(msg) => Self::NotFound(msg),
        }
    }
}
