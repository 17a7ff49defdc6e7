use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AnalyticsService, AuthService, CatalogService, DramaService, EngagementService,
    SeaOrmAnalyticsService, SeaOrmAuthService, SeaOrmCatalogService, SeaOrmDramaService,
    SeaOrmEngagementService,
};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub auth_service: Arc<dyn AuthService>,

    pub drama_service: Arc<dyn DramaService>,

    pub catalog_service: Arc<dyn CatalogService>,

    pub engagement_service: Arc<dyn EngagementService>,

    pub analytics_service: Arc<dyn AnalyticsService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Ok(Self::with_store(config, store))
    }

    /// Wires every service around an already-migrated store.
    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        let auth_service = Arc::new(SeaOrmAuthService::new(
            store.clone(),
            config.security.clone(),
        )) as Arc<dyn AuthService>;
        let drama_service = Arc::new(SeaOrmDramaService::new(store.clone())) as Arc<dyn DramaService>;
        let catalog_service =
            Arc::new(SeaOrmCatalogService::new(store.clone())) as Arc<dyn CatalogService>;
        let engagement_service =
            Arc::new(SeaOrmEngagementService::new(store.clone())) as Arc<dyn EngagementService>;
        let analytics_service =
            Arc::new(SeaOrmAnalyticsService::new(store.clone())) as Arc<dyn AnalyticsService>;

        Self {
            config: Arc::new(RwLock::new(config)),
            store,
            auth_service,
            drama_service,
            catalog_service,
            engagement_service,
            analytics_service,
        }
    }
}
