//! Product persistence boundary.
//!
//! The store is the single source of truth for product records. It assigns
//! ids and timestamps; everything above it works with validated
//! [`ProductFields`] and returns whole [`Product`]s.

mod in_memory;
mod postgres;

pub use in_memory::InMemoryProductStore;
pub use postgres::PostgresProductStore;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use stockroom_core::{PageRequest, ProductId};
use stockroom_products::{Product, ProductFields};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backend could not be reached or refused the operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A stored record could not be mapped back to a product.
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

/// Listing filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    search: Option<String>,
}

impl ProductFilter {
    pub fn all() -> Self {
        Self::default()
    }

    /// Case-insensitive name substring filter. A blank term matches everything.
    pub fn search(term: Option<&str>) -> Self {
        let search = term.map(str::trim).filter(|t| !t.is_empty()).map(str::to_string);
        Self { search }
    }

    pub fn term(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn matches(&self, product: &Product) -> bool {
        match &self.search {
            None => true,
            Some(term) => product.name().to_lowercase().contains(&term.to_lowercase()),
        }
    }
}

/// Async product repository. Results are ordered by id ascending.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Persist a new product; the store assigns the id and both timestamps.
    async fn insert(&self, fields: ProductFields) -> Result<Product, StoreError>;

    async fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    /// Full replace of the mutable attributes. `None` when `id` does not resolve.
    async fn update(&self, id: ProductId, fields: ProductFields) -> Result<Option<Product>, StoreError>;

    /// `false` when nothing was removed.
    async fn delete(&self, id: ProductId) -> Result<bool, StoreError>;

    /// One page of matching products plus the total match count.
    async fn search(&self, filter: &ProductFilter, page: PageRequest) -> Result<(Vec<Product>, u64), StoreError>;
}

#[async_trait]
impl<S> ProductStore for Arc<S>
where
    S: ProductStore + ?Sized,
{
    async fn insert(&self, fields: ProductFields) -> Result<Product, StoreError> {
        (**self).insert(fields).await
    }

    async fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        (**self).get(id).await
    }

    async fn update(&self, id: ProductId, fields: ProductFields) -> Result<Option<Product>, StoreError> {
        (**self).update(id, fields).await
    }

    async fn delete(&self, id: ProductId) -> Result<bool, StoreError> {
        (**self).delete(id).await
    }

    async fn search(&self, filter: &ProductFilter, page: PageRequest) -> Result<(Vec<Product>, u64), StoreError> {
        (**self).search(filter, page).await
    }
}
