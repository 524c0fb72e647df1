use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;
use crate::database::models::{Article, Product};
use crate::database::Repository;
use crate::query::StoreAdapter;

/// Shared handles passed to every handler through axum `State`
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub pool: PgPool,
    pub article_list: Arc<dyn StoreAdapter<Article>>,
    pub product_list: Arc<dyn StoreAdapter<Product>>,
}

impl AppState {
    /// Production wiring: list endpoints read through Postgres
    pub fn new(config: AppConfig, pool: PgPool) -> Self {
        Self {
            config: Arc::new(config),
            article_list: Arc::new(Repository::<Article>::new(pool.clone())),
            product_list: Arc::new(Repository::<Product>::new(pool.clone())),
            pool,
        }
    }

    pub fn with_article_list(mut self, store: Arc<dyn StoreAdapter<Article>>) -> Self {
        self.article_list = store;
        self
    }

    pub fn with_product_list(mut self, store: Arc<dyn StoreAdapter<Product>>) -> Self {
        self.product_list = store;
        self
    }
}
