use std::sync::Arc;

use crate::config::AppConfig;
use crate::storage::{MemStorage, Storage};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub storage: Arc<dyn Storage>,
}

impl AppState {
    pub fn init(config: AppConfig) -> anyhow::Result<Self> {
        let storage = if config.seed_demo_data {
            MemStorage::seeded()?
        } else {
            MemStorage::new()
        };
        Ok(Self::from_parts(Arc::new(config), Arc::new(storage)))
    }

    pub fn from_parts(config: Arc<AppConfig>, storage: Arc<dyn Storage>) -> Self {
        Self { config, storage }
    }

    /// Seeded state with default config, for tests.
    #[cfg(test)]
    pub fn fake() -> Self {
        Self::init(AppConfig::default()).expect("seed demo data")
    }
}
