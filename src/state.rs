use std::sync::Arc;

use sqlx::SqlitePool;

use crate::client::{CourseApi, CourseHttpClient};
use crate::config::ClientConfig;
use crate::db;
use crate::error::AppError;

/// What every page needs: the backend and the client-local store.
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn CourseApi>,
    pub db: SqlitePool,
}

impl AppState {
    pub fn new(api: Arc<dyn CourseApi>, db: SqlitePool) -> Self {
        Self { api, db }
    }

    pub async fn from_config(config: &ClientConfig) -> Result<Self, AppError> {
        let api = Arc::new(CourseHttpClient::new(config)?);
        let db = db::connect(&config.storage_url).await?;
        Ok(Self { api, db })
    }
}
