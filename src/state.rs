use std::sync::Arc;

use crate::config::Config;
use crate::notion::NotionClient;
use axum::extract::FromRef;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<NotionClient>,
    pub config: Config,
}

impl AppState {
    /// Builds the process-wide store client from `config`.
    pub fn new(config: Config) -> Result<Self, crate::notion::StoreError> {
        let store = Arc::new(NotionClient::new(&config)?);
        Ok(Self { store, config })
    }
}

impl FromRef<AppState> for Arc<NotionClient> {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
