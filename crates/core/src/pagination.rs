//! Offset pagination arithmetic.
//!
//! Pages are 1-based. The calculator never clamps: a page past the end yields
//! an offset beyond the data set and `next_page` is still `page + 1`, leaving
//! end-of-data handling to the caller (an empty `data` sequence, or
//! `page >= last_page`).

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

/// Validated `(page, limit)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    pub fn new(page: u32, limit: u32) -> DomainResult<Self> {
        if page == 0 {
            return Err(DomainError::validation("page must be a positive number"));
        }
        if limit == 0 {
            return Err(DomainError::validation("limit must be a positive number"));
        }
        Ok(Self { page, limit })
    }

    /// Build from optional transport parameters, falling back to the defaults.
    pub fn from_parts(page: Option<u32>, limit: Option<u32>) -> DomainResult<Self> {
        Self::new(page.unwrap_or(DEFAULT_PAGE), limit.unwrap_or(DEFAULT_LIMIT))
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Derived positions for one page of a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: u64,
    pub last_page: u64,
    pub next_page: u64,
}

/// Pure arithmetic turning `(page, limit, total)` into page positions.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaginationCalculator;

impl PaginationCalculator {
    pub fn window(request: PageRequest, total: u64) -> PageWindow {
        let page = u64::from(request.page);
        let limit = u64::from(request.limit);
        PageWindow {
            offset: (page - 1) * limit,
            last_page: total.div_ceil(limit),
            next_page: page + 1,
        }
    }

    pub fn meta(request: PageRequest, total: u64) -> PageMeta {
        let window = Self::window(request, total);
        PageMeta {
            page: request.page,
            next_page: window.next_page,
            limit: request.limit,
            total,
            last_page: window.last_page,
        }
    }
}

/// Pagination metadata returned alongside a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: u32,
    pub next_page: u64,
    pub limit: u32,
    pub total: u64,
    pub last_page: u64,
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}
