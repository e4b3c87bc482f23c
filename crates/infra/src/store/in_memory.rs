use std::collections::BTreeMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;

use stockroom_core::{PageRequest, ProductId};
use stockroom_products::{Product, ProductFields};

use super::{ProductFilter, ProductStore, StoreError};

/// In-memory product store for tests/dev.
///
/// Ids come from a monotonically increasing counter and are never reused.
#[derive(Debug)]
pub struct InMemoryProductStore {
    inner: RwLock<BTreeMap<ProductId, Product>>,
    next_id: AtomicI64,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryProductStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Unavailable("in-memory store lock poisoned".to_string())
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn insert(&self, fields: ProductFields) -> Result<Product, StoreError> {
        let mut map = self.inner.write().map_err(poisoned)?;
        let id = ProductId::from_i64(self.next_id.fetch_add(1, Ordering::SeqCst));
        let now = Utc::now();
        let product = Product::new(id, fields, now, now);
        map.insert(id, product.clone());
        Ok(product)
    }

    async fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let map = self.inner.read().map_err(poisoned)?;
        Ok(map.get(&id).cloned())
    }

    async fn update(&self, id: ProductId, fields: ProductFields) -> Result<Option<Product>, StoreError> {
        let mut map = self.inner.write().map_err(poisoned)?;
        Ok(map.get_mut(&id).map(|product| {
            product.replace(fields, Utc::now());
            product.clone()
        }))
    }

    async fn delete(&self, id: ProductId) -> Result<bool, StoreError> {
        let mut map = self.inner.write().map_err(poisoned)?;
        Ok(map.remove(&id).is_some())
    }

    async fn search(&self, filter: &ProductFilter, page: PageRequest) -> Result<(Vec<Product>, u64), StoreError> {
        let map = self.inner.read().map_err(poisoned)?;
        let matching: Vec<&Product> = map.values().filter(|p| filter.matches(p)).collect();
        let total = matching.len() as u64;
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let items = matching
            .into_iter()
            .skip(offset)
            .take(page.limit() as usize)
            .cloned()
            .collect();
        Ok((items, total))
    }
}
