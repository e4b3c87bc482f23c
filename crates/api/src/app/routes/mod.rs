use axum::{routing::get, Router};

pub mod common;
pub mod products;
pub mod system;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .route("/colors", get(system::colors))
        .nest("/products", products::router())
}
