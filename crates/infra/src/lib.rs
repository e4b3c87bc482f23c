//! Infrastructure layer: product storage and the application services on top.

pub mod command_service;
pub mod error;
pub mod fixtures;
pub mod query_service;
pub mod store;

pub use command_service::ProductCommandService;
pub use error::ServiceError;
pub use query_service::ProductQueryService;
pub use store::{InMemoryProductStore, PostgresProductStore, ProductFilter, ProductStore, StoreError};
