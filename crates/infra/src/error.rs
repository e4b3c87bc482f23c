use thiserror::Error;

use stockroom_core::DomainError;

use crate::store::StoreError;

/// Failure of a query or command.
///
/// Domain failures are deterministic (bad input, unknown id); store failures
/// are infrastructure problems passed through unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::Domain(DomainError::NotFound))
    }
}

impl From<stockroom_core::ValidationErrors> for ServiceError {
    fn from(errors: stockroom_core::ValidationErrors) -> Self {
        ServiceError::Domain(DomainError::Validation(errors))
    }
}
