use std::sync::Arc;

use provider::{DiningApiClient, MenuProvider};
use sqlx::SqlitePool;

use crate::{
    auth::{DbUserResolver, UserResolver},
    config::Config,
    database::init_db,
};

pub struct AppState {
    pub config: Config,
    pub pool: SqlitePool,
    pub provider: Arc<dyn MenuProvider>,
    pub user_resolver: Arc<dyn UserResolver>,
}

impl AppState {
    pub async fn new() -> Arc<Self> {
        let config = Config::load();

        let pool = init_db(&config.database_url).await;
        let provider = Arc::new(DiningApiClient::new(
            &config.menu_api_url,
            &config.menu_api_key,
        ));
        let user_resolver = Arc::new(DbUserResolver::new(pool.clone()));

        Arc::new(Self {
            config,
            pool,
            provider,
            user_resolver,
        })
    }
}
