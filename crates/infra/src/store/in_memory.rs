use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;

use catalog_products::{CreateProduct, Product, ProductId, ProductPatch, ProductStore, StoreError};

#[derive(Debug, Default)]
struct Rows {
    last_id: i64,
    products: BTreeMap<ProductId, Product>,
}

/// In-memory product store.
///
/// Intended for tests/dev. Ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    rows: RwLock<Rows>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Rows>, StoreError> {
        self.rows
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Rows>, StoreError> {
        self.rows
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))
    }

    fn modify(
        &self,
        id: ProductId,
        f: impl FnOnce(&mut Product),
    ) -> Result<Product, StoreError> {
        let mut rows = self.write()?;
        let product = rows.products.get_mut(&id).ok_or(StoreError::Missing(id))?;
        f(product);
        product.updated_at = Utc::now();
        Ok(product.clone())
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn insert(&self, product: CreateProduct) -> Result<Product, StoreError> {
        let mut rows = self.write()?;
        rows.last_id += 1;
        let now = Utc::now();
        let created = Product {
            id: ProductId::new(rows.last_id),
            name: product.name,
            price: product.price,
            available: true,
            created_at: now,
            updated_at: now,
        };
        rows.products.insert(created.id, created.clone());
        Ok(created)
    }

    async fn count_available(&self) -> Result<u64, StoreError> {
        let rows = self.read()?;
        Ok(rows.products.values().filter(|p| p.available).count() as u64)
    }

    async fn count_all(&self) -> Result<u64, StoreError> {
        Ok(self.read()?.products.len() as u64)
    }

    async fn scan(
        &self,
        offset: u64,
        limit: u64,
        available_only: bool,
    ) -> Result<Vec<Product>, StoreError> {
        let rows = self.read()?;
        let skip = usize::try_from(offset).unwrap_or(usize::MAX);
        let take = usize::try_from(limit).unwrap_or(usize::MAX);

        Ok(rows
            .products
            .values()
            .filter(|p| !available_only || p.available)
            .skip(skip)
            .take(take)
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        Ok(self.read()?.products.get(&id).cloned())
    }

    async fn get_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, StoreError> {
        let rows = self.read()?;
        let mut found: Vec<Product> = ids
            .iter()
            .filter_map(|id| rows.products.get(id).cloned())
            .collect();
        found.sort_by_key(|p| p.id);
        found.dedup_by_key(|p| p.id);
        Ok(found)
    }

    async fn apply_update(&self, id: ProductId, patch: ProductPatch) -> Result<Product, StoreError> {
        self.modify(id, |product| patch.apply_to(product))
    }

    async fn mark_unavailable(&self, id: ProductId) -> Result<Product, StoreError> {
        self.modify(id, |product| product.available = false)
    }
}
