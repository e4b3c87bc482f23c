//! Load the demo catalog into the configured database.

use anyhow::{bail, Context};
use rand::rngs::StdRng;
use rand::SeedableRng;

use stockroom_api::app::services::open_store;
use stockroom_api::config::AppConfig;
use stockroom_infra::fixtures::seed_demo_catalog;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;
    stockroom_observability::init(config.log_format);

    if config.database_url.is_none() {
        bail!("DATABASE_URL must be set; seeding the in-memory store has no lasting effect");
    }

    let store = open_store(&config).await.context("failed to open product store")?;
    let inserted = seed_demo_catalog(&*store, &mut StdRng::from_entropy())
        .await
        .context("failed to seed demo catalog")?;

    for product in &inserted {
        tracing::info!(product_id = %product.id_typed(), name = product.name(), "seeded");
    }
    println!("seeded {} products", inserted.len());
    Ok(())
}
