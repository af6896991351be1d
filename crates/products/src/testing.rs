//! Test doubles shared by the unit tests in this crate.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use catalog_observability::Logger;

use crate::product::{CreateProduct, Product, ProductId, ProductPatch};
use crate::store::{ProductStore, StoreError};

/// Pending failure: `None` matches whichever call comes next.
type ScriptedFailure = (Option<&'static str>, StoreError);

/// Vec-backed store that records every call and can fail a scripted one.
#[derive(Debug, Default)]
pub(crate) struct FakeStore {
    rows: Mutex<Vec<Product>>,
    calls: Mutex<Vec<&'static str>>,
    failure: Mutex<Option<ScriptedFailure>>,
}

impl FakeStore {
    pub(crate) fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub(crate) fn fail_next(&self, err: StoreError) {
        *self.failure.lock().unwrap() = Some((None, err));
    }

    /// Fail the next call to `op`; calls to other operations pass through.
    pub(crate) fn fail_on(&self, op: &'static str, err: StoreError) {
        *self.failure.lock().unwrap() = Some((Some(op), err));
    }

    /// Current row state, read without recording a call.
    pub(crate) fn row(&self, id: ProductId) -> Option<Product> {
        self.rows.lock().unwrap().iter().find(|p| p.id == id).cloned()
    }

    fn record(&self, op: &'static str) -> Result<(), StoreError> {
        self.calls.lock().unwrap().push(op);
        let mut failure = self.failure.lock().unwrap();
        match failure.take() {
            Some((target, err)) if target.is_none_or(|t| t == op) => Err(err),
            pending => {
                *failure = pending;
                Ok(())
            }
        }
    }
}

#[async_trait]
impl ProductStore for FakeStore {
    async fn insert(&self, product: CreateProduct) -> Result<Product, StoreError> {
        self.record("insert")?;
        let mut rows = self.rows.lock().unwrap();
        let now = Utc::now();
        let created = Product {
            id: ProductId::new(rows.len() as i64 + 1),
            name: product.name,
            price: product.price,
            available: true,
            created_at: now,
            updated_at: now,
        };
        rows.push(created.clone());
        Ok(created)
    }

    async fn count_available(&self) -> Result<u64, StoreError> {
        self.record("count_available")?;
        Ok(self.rows.lock().unwrap().iter().filter(|p| p.available).count() as u64)
    }

    async fn count_all(&self) -> Result<u64, StoreError> {
        self.record("count_all")?;
        Ok(self.rows.lock().unwrap().len() as u64)
    }

    async fn scan(
        &self,
        offset: u64,
        limit: u64,
        available_only: bool,
    ) -> Result<Vec<Product>, StoreError> {
        self.record("scan")?;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|p| !available_only || p.available)
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        self.record("get_by_id")?;
        Ok(self.rows.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn get_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, StoreError> {
        self.record("get_by_ids")?;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn apply_update(&self, id: ProductId, patch: ProductPatch) -> Result<Product, StoreError> {
        self.record("apply_update")?;
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::Missing(id))?;
        patch.apply_to(row);
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn mark_unavailable(&self, id: ProductId) -> Result<Product, StoreError> {
        self.record("mark_unavailable")?;
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::Missing(id))?;
        row.available = false;
        row.updated_at = Utc::now();
        Ok(row.clone())
    }
}

/// Logger that keeps every message for assertions.
#[derive(Debug, Default)]
pub(crate) struct RecordingLogger {
    lines: Mutex<Vec<String>>,
}

impl RecordingLogger {
    pub(crate) fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl Logger for RecordingLogger {
    fn log(&self, message: &str) {
        self.lines.lock().unwrap().push(message.to_string());
    }
}
