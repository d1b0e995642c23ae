use std::sync::Arc;

use anyhow::Context;

use catalog_infra::{InMemoryProductDetailRepository, PostgresProductDetailRepository, StoreConfig};
use catalog_products::{ProductDetailRepository, ProductDetailService};

/// Build the service over the repository selected by `store`.
pub async fn build_service(store: &StoreConfig) -> anyhow::Result<ProductDetailService> {
    let repository: Arc<dyn ProductDetailRepository> = match store {
        StoreConfig::InMemory => {
            tracing::info!("using in-memory product detail store");
            Arc::new(InMemoryProductDetailRepository::new())
        }
        StoreConfig::Postgres {
            database_url,
            max_connections,
        } => {
            tracing::info!(max_connections, "using postgres product detail store");
            let repo = PostgresProductDetailRepository::connect(database_url, *max_connections)
                .await
                .context("failed to connect to Postgres")?;
            repo.ensure_schema()
                .await
                .context("failed to prepare product_details schema")?;
            Arc::new(repo)
        }
    };

    Ok(ProductDetailService::new(repository))
}

/// In-memory wiring for dev/tests.
pub fn in_memory_service() -> ProductDetailService {
    ProductDetailService::new(Arc::new(InMemoryProductDetailRepository::new()))
}
