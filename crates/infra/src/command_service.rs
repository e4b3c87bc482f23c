//! Write side: validated create / update / delete.
//!
//! Every command validates the whole input before touching the store, so a
//! rejected command never leaves a partial write behind.

use stockroom_core::{DomainError, ProductId, ValidationErrors};
use stockroom_products::{Product, ProductInput};

use crate::error::ServiceError;
use crate::store::ProductStore;

#[derive(Debug, Clone)]
pub struct ProductCommandService<S> {
    store: S,
}

impl<S: ProductStore> ProductCommandService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn create(&self, input: ProductInput) -> Result<Product, ServiceError> {
        self.create_with(input, ValidationErrors::new()).await
    }

    /// Create, also reporting errors the caller found while decoding `input`.
    pub async fn create_with(&self, input: ProductInput, decode_errors: ValidationErrors) -> Result<Product, ServiceError> {
        let fields = input.validate_with(decode_errors)?;
        let product = self.store.insert(fields).await?;
        tracing::info!(product_id = %product.id_typed(), operation = "create", "product created");
        Ok(product)
    }

    pub async fn update(&self, id: ProductId, input: ProductInput) -> Result<Product, ServiceError> {
        self.update_with(id, input, ValidationErrors::new()).await
    }

    /// Full replace. An unknown id is reported before any validation failure.
    pub async fn update_with(
        &self,
        id: ProductId,
        input: ProductInput,
        decode_errors: ValidationErrors,
    ) -> Result<Product, ServiceError> {
        if self.store.get(id).await?.is_none() {
            return Err(DomainError::NotFound.into());
        }

        let fields = input.validate_with(decode_errors)?;
        let product = self
            .store
            .update(id, fields)
            .await?
            .ok_or(ServiceError::Domain(DomainError::NotFound))?;

        tracing::info!(product_id = %id, operation = "update", "product updated");
        Ok(product)
    }

    pub async fn delete(&self, id: ProductId) -> Result<(), ServiceError> {
        if !self.store.delete(id).await? {
            return Err(DomainError::NotFound.into());
        }
        tracing::info!(product_id = %id, operation = "delete", "product deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::store::InMemoryProductStore;
    use stockroom_core::Timestamped;

    fn service() -> (ProductCommandService<Arc<InMemoryProductStore>>, Arc<InMemoryProductStore>) {
        let store = Arc::new(InMemoryProductStore::new());
        (ProductCommandService::new(store.clone()), store)
    }

    fn validation(err: ServiceError) -> ValidationErrors {
        match err {
            ServiceError::Domain(DomainError::Validation(errors)) => errors,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_assigns_id_and_timestamps() {
        let (service, _) = service();
        let product = service.create(ProductInput::new("Laptop Pro", 15, "Silver")).await.unwrap();
        assert!(product.id_typed().as_i64() > 0);
        assert_eq!(product.name(), "Laptop Pro");
        assert_eq!(product.quantity(), 15);
        assert_eq!(product.created_at(), product.updated_at());
    }

    #[tokio::test]
    async fn identical_input_creates_distinct_records() {
        let (service, store) = service();
        let a = service.create(ProductInput::new("Cable", 1, "Black")).await.unwrap();
        let b = service.create(ProductInput::new("Cable", 1, "Black")).await.unwrap();
        assert_ne!(a.id_typed(), b.id_typed());
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn invalid_create_writes_nothing() {
        let (service, store) = service();
        let input = ProductInput {
            name: None,
            quantity: Some(-1),
            color: Some("Red".into()),
        };
        let errors = validation(service.create(input).await.unwrap_err());
        assert!(errors.has("name"));
        assert!(errors.has("quantity"));
        assert!(!errors.has("color"));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn decode_errors_are_reported_with_validation() {
        let (service, _) = service();
        let mut decode = ValidationErrors::new();
        decode.add("name", "The name field must be a string.");
        let input = ProductInput {
            name: None,
            quantity: Some(3),
            color: None,
        };
        let errors = validation(service.create_with(input, decode).await.unwrap_err());
        assert_eq!(errors.field("name"), ["The name field must be a string."]);
        assert_eq!(errors.field("color"), ["The color field is required."]);
    }

    #[tokio::test]
    async fn update_replaces_all_fields() {
        let (service, _) = service();
        let created = service.create(ProductInput::new("Mouse", 5, "Red")).await.unwrap();
        let updated = service
            .update(created.id_typed(), ProductInput::new("Mouse Pro", 0, "Navy"))
            .await
            .unwrap();
        assert_eq!(updated.id_typed(), created.id_typed());
        assert_eq!(updated.name(), "Mouse Pro");
        assert_eq!(updated.quantity(), 0);
        assert_eq!(updated.color(), "Navy");
        assert_eq!(updated.created_at(), created.created_at());
    }

    #[tokio::test]
    async fn invalid_update_leaves_record_untouched() {
        let (service, store) = service();
        let created = service.create(ProductInput::new("Mouse", 5, "Red")).await.unwrap();
        let err = service
            .update(created.id_typed(), ProductInput::new("", 5, "Red"))
            .await
            .unwrap_err();
        assert!(validation(err).has("name"));
        assert_eq!(store.get(created.id_typed()).await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn negative_quantity_update_is_rejected() {
        let (service, store) = service();
        let created = service.create(ProductInput::new("Mouse", 5, "Red")).await.unwrap();
        let err = service
            .update(created.id_typed(), ProductInput::new("Mouse", -1, "Red"))
            .await
            .unwrap_err();
        let errors = validation(err);
        assert_eq!(errors.field("quantity"), ["The quantity field must be at least 0."]);
        assert_eq!(store.get(created.id_typed()).await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found_even_when_invalid() {
        let (service, _) = service();
        let err = service
            .update(ProductId::from_i64(77), ProductInput::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn delete_then_delete_again() {
        let (service, store) = service();
        let created = service.create(ProductInput::new("Stand", 2, "Gray")).await.unwrap();
        service.delete(created.id_typed()).await.unwrap();
        assert_eq!(store.get(created.id_typed()).await.unwrap(), None);
        assert!(service.delete(created.id_typed()).await.unwrap_err().is_not_found());
    }
}
