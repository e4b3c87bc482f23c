//! `stockroom-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod pagination;

pub use entity::{Entity, Timestamped};
pub use error::{DomainError, DomainResult, ValidationErrors};
pub use id::ProductId;
pub use pagination::{LinkLabel, Page, PageLink, PageRequest, DEFAULT_PER_PAGE, MAX_PER_PAGE};
