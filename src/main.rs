//! restaurant-server: the back-office HTTP service

use anyhow::Result;
use restaurant::config::{AppConfig, StoreBackend};
use restaurant::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,restaurant=debug")),
        )
        .init();

    let mut config = AppConfig::load()?;
    if config.auth.secret.is_empty() {
        tracing::warn!("SECRET_KEY is not set; using a random key, tokens will not survive a restart");
        config.auth.secret = uuid::Uuid::new_v4().simple().to_string();
    }

    let store = open_store(&config).await?;
    let repository = Repository::new(store, config.timeouts.to_store_timeouts());

    let module = RestaurantModule;
    tracing::info!(
        module = module.name(),
        version = module.version(),
        backend = ?config.store.backend,
        "starting"
    );

    ServerBuilder::new()
        .with_repository(repository)
        .with_auth_provider(JwtAuthProvider::new(config.auth.jwt_settings()))
        .with_default_page_size(config.pagination.default_page_size)
        .register_module(module)?
        .serve(&config.server.address())
        .await
}

async fn open_store(config: &AppConfig) -> Result<Arc<dyn DocumentStore>> {
    match config.store.backend {
        StoreBackend::InMemory => Ok(Arc::new(InMemoryStore::new())),
        #[cfg(feature = "mongodb_backend")]
        StoreBackend::Mongodb => {
            let store = MongoStore::connect(&config.store.uri, &config.store.database).await?;
            tracing::info!(database = %config.store.database, "connected to MongoDB");
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "mongodb_backend"))]
        StoreBackend::Mongodb => {
            anyhow::bail!("store backend 'mongodb' requires the `mongodb_backend` feature")
        }
    }
}
