//! `catalog-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod pagination;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use pagination::{Page, PageMeta, PageRequest, PaginationCalculator, PageWindow};
