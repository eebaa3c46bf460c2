use std::sync::Arc;

use chrono::{DateTime, Utc};
use shopsight_core::{Catalog, Config, QueryEngine, SanitizedConfig};

/// Everything the handlers need, shared behind one `Arc`.
pub struct AppState {
    config: Config,
    catalog: Arc<Catalog>,
    engine: QueryEngine,
    started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: Config, catalog: Arc<Catalog>) -> Self {
        let engine = QueryEngine::new(Arc::clone(&catalog), config.engine.clone());
        Self {
            config,
            catalog,
            engine,
            started_at: Utc::now(),
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn engine(&self) -> &QueryEngine {
        &self.engine
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}
