use std::sync::Arc;

use crate::config;
use crate::db::AssessmentStore;
use crate::quiz::Catalog;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<config::Config>,
    pub catalog: Arc<Catalog>,
    pub store: Arc<dyn AssessmentStore>,
}

impl AppState {
    pub fn new(config: config::Config, catalog: Catalog, store: Arc<dyn AssessmentStore>) -> Self {
        Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
            store,
        }
    }
}
