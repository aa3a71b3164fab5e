use std::sync::Arc;

use common::config::Settings;
use common::db::repositories::JobRepository;
use common::db::DbClient;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn DbClient>,
    pub config: Arc<Settings>,
}

impl AppState {
    /// Create a new AppState instance
    pub fn new(db: Arc<dyn DbClient>, config: Settings) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Job repository backed by the shared client
    pub fn jobs(&self) -> JobRepository {
        JobRepository::new(self.db.clone())
    }
}
