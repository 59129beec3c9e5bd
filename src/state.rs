use std::sync::Arc;

use crate::clients::{HttpProviderGateway, ProviderGateway};
use crate::config::Config;
use crate::db::Store;
use crate::services::{QueryResolver, SeaOrmResolver};

/// Long-lived pieces shared by the HTTP server and the one-shot CLI commands.
pub struct SharedState {
    pub config: Config,

    pub store: Store,

    pub resolver: Arc<dyn QueryResolver>,
}

impl SharedState {
    /// Opens the store, builds the HTTP provider gateway and wires the resolver.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let missing = config.missing_credentials();
        if !missing.is_empty() {
            tracing::warn!(
                "Provider credentials not configured: {}. Cache misses for those providers will fail",
                missing.join(", ")
            );
        }

        let gateway = Arc::new(HttpProviderGateway::from_config(&config.providers)?);

        Ok(Self::with_gateway(config, store, gateway))
    }

    /// Wires the resolver over an already-open store and any gateway.
    #[must_use]
    pub fn with_gateway(config: Config, store: Store, gateway: Arc<dyn ProviderGateway>) -> Self {
        let resolver = Arc::new(SeaOrmResolver::new(
            store.clone(),
            gateway,
            config.resolver.clone(),
        )) as Arc<dyn QueryResolver>;

        Self {
            config,
            store,
            resolver,
        }
    }
}
