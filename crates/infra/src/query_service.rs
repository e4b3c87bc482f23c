//! Read side: filtered, paginated product listings.

use stockroom_core::{DomainError, Page, PageRequest, ProductId, DEFAULT_PER_PAGE};
use stockroom_products::Product;

use crate::error::ServiceError;
use crate::store::{ProductFilter, ProductStore};

/// Side-effect free product queries.
#[derive(Debug, Clone)]
pub struct ProductQueryService<S> {
    store: S,
    default_per_page: u32,
}

impl<S: ProductStore> ProductQueryService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            default_per_page: DEFAULT_PER_PAGE,
        }
    }

    /// Page size used when a request does not name one.
    pub fn with_default_per_page(mut self, per_page: u32) -> Self {
        self.default_per_page = per_page;
        self
    }

    pub fn page_request(&self, page: Option<u32>, per_page: Option<u32>) -> PageRequest {
        PageRequest::with_default_size(page, per_page, self.default_per_page)
    }

    /// Products whose name contains `search` (case-insensitive), ordered by id.
    ///
    /// A page past the end is empty but keeps the requested page number.
    pub async fn list(&self, search: Option<&str>, request: PageRequest) -> Result<Page<Product>, ServiceError> {
        let filter = ProductFilter::search(search);
        let (items, total) = self.store.search(&filter, request).await?;
        tracing::debug!(
            search = ?filter.term(),
            page = request.page(),
            per_page = request.per_page(),
            total,
            "listed products"
        );
        Ok(Page::new(items, request, total))
    }

    pub async fn get(&self, id: ProductId) -> Result<Product, ServiceError> {
        self.store
            .get(id)
            .await?
            .ok_or(ServiceError::Domain(DomainError::NotFound))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::store::InMemoryProductStore;
    use stockroom_products::ProductFields;

    async fn store_with(names: &[&str]) -> Arc<InMemoryProductStore> {
        let store = Arc::new(InMemoryProductStore::new());
        for name in names {
            store.insert(ProductFields::new(*name, 5, "Blue").unwrap()).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn search_is_case_insensitive_substring() {
        let store = store_with(&["Laptop Pro", "Gaming LAPTOP", "Mouse"]).await;
        let service = ProductQueryService::new(store);

        let page = service.list(Some("laptop"), PageRequest::default()).await.unwrap();
        let names: Vec<_> = page.items.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["Laptop Pro", "Gaming LAPTOP"]);
        assert_eq!(page.total, 2);
    }

    #[tokio::test]
    async fn no_match_is_an_empty_single_page() {
        let service = ProductQueryService::new(store_with(&["Mouse"]).await);
        let page = service.list(Some("xyz"), PageRequest::default()).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
        assert_eq!(page.last_page(), 1);
        assert_eq!(page.from(), None);
    }

    #[tokio::test]
    async fn fifteen_products_default_page_size() {
        let names: Vec<String> = (1..=15).map(|i| format!("Item {i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let service = ProductQueryService::new(store_with(&refs).await);

        let first = service.list(None, service.page_request(None, None)).await.unwrap();
        assert_eq!(first.items.len(), 10);
        assert_eq!(first.last_page(), 2);

        let second = service.list(None, service.page_request(Some(2), None)).await.unwrap();
        assert_eq!(second.items.len(), 5);
        assert_eq!(second.from(), Some(11));
        assert_eq!(second.to(), Some(15));

        let past = service.list(None, service.page_request(Some(3), None)).await.unwrap();
        assert!(past.items.is_empty());
        assert_eq!(past.current_page, 3);
    }

    #[tokio::test]
    async fn configured_default_page_size() {
        let names: Vec<String> = (1..=7).map(|i| format!("Item {i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let service = ProductQueryService::new(store_with(&refs).await).with_default_per_page(3);

        let page = service.list(None, service.page_request(None, None)).await.unwrap();
        assert_eq!(page.per_page, 3);
        assert_eq!(page.last_page(), 3);
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let service = ProductQueryService::new(store_with(&[]).await);
        let err = service.get(ProductId::from_i64(9)).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
