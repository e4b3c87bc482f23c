//! Demo data loading (never part of request handling).

use rand::Rng;

use stockroom_products::{demo_catalog, Product, ProductFields};

use crate::error::ServiceError;
use crate::store::ProductStore;

/// Insert pre-built product fields in order.
pub async fn seed_products<S>(store: &S, batch: Vec<ProductFields>) -> Result<Vec<Product>, ServiceError>
where
    S: ProductStore + ?Sized,
{
    let mut out = Vec::with_capacity(batch.len());
    for fields in batch {
        out.push(store.insert(fields).await?);
    }
    Ok(out)
}

/// Insert the 18-product demo catalog.
pub async fn seed_demo_catalog<S, R>(store: &S, rng: &mut R) -> Result<Vec<Product>, ServiceError>
where
    S: ProductStore + ?Sized,
    R: Rng + ?Sized,
{
    let catalog = demo_catalog(rng)?;
    let inserted = seed_products(store, catalog).await?;
    tracing::info!(count = inserted.len(), "seeded demo catalog");
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{InMemoryProductStore, ProductFilter};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use stockroom_core::PageRequest;

    #[tokio::test]
    async fn demo_catalog_lands_in_store() {
        let store = InMemoryProductStore::new();
        let inserted = seed_demo_catalog(&store, &mut StdRng::seed_from_u64(5)).await.unwrap();
        assert_eq!(inserted.len(), 18);
        assert_eq!(store.len(), 18);

        let (hits, total) = store
            .search(&ProductFilter::search(Some("airpods")), PageRequest::default())
            .await
            .unwrap();
        assert_eq!(total, 1);
        assert_eq!(hits[0].quantity(), 0);
        assert_eq!(hits[0].color(), "White");
    }
}
