//! Application service wiring: one store shared by the query and command
//! services, plus the report renderer.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use stockroom_infra::fixtures::seed_demo_catalog;
use stockroom_infra::{
    InMemoryProductStore, PostgresProductStore, ProductCommandService, ProductQueryService, ProductStore,
    ServiceError, StoreError,
};
use stockroom_products::{ReportError, ReportRenderer};

use crate::config::AppConfig;

pub type SharedStore = Arc<dyn ProductStore>;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("store setup failed: {0}")]
    Store(#[from] StoreError),

    #[error("report template failed to compile: {0}")]
    Report(#[from] ReportError),

    #[error("demo data seeding failed: {0}")]
    Seed(#[from] ServiceError),
}

pub struct AppServices {
    pub queries: ProductQueryService<SharedStore>,
    pub commands: ProductCommandService<SharedStore>,
    pub reports: ReportRenderer,
}

impl AppServices {
    pub fn new(store: SharedStore, products_per_page: u32) -> Result<Self, StartupError> {
        Ok(Self {
            queries: ProductQueryService::new(store.clone()).with_default_per_page(products_per_page),
            commands: ProductCommandService::new(store),
            reports: ReportRenderer::new()?,
        })
    }
}

/// Open the configured store (Postgres when `DATABASE_URL` is set).
pub async fn open_store(config: &AppConfig) -> Result<SharedStore, StartupError> {
    match &config.database_url {
        Some(url) => {
            let store = PostgresProductStore::connect(url, config.database_max_connections).await?;
            store.migrate().await?;
            tracing::info!("using postgres product store");
            Ok(Arc::new(store))
        }
        None => {
            tracing::info!("DATABASE_URL not set; using in-memory product store");
            Ok(Arc::new(InMemoryProductStore::new()))
        }
    }
}

pub async fn build_services(config: &AppConfig) -> Result<AppServices, StartupError> {
    let store = open_store(config).await?;

    if config.seed_demo_data {
        seed_demo_catalog(&*store, &mut StdRng::from_entropy()).await?;
    }

    AppServices::new(store, config.products_per_page)
}
