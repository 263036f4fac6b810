use std::sync::Arc;

use saferoute_core::{Error, RouteScorer};

use crate::config::ServerConfig;

/// Shared application state for the HTTP server
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    scorer: RouteScorer,
}

impl AppState {
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the scoring configuration is invalid.
    pub fn new(config: ServerConfig) -> Result<Self, Error> {
        let mut scorer = RouteScorer::new(config.scoring.clone())?;
        if config.cache.enabled {
            scorer = scorer.with_cache(config.cache.capacity);
        }

        Ok(Self {
            inner: Arc::new(AppStateInner { config, scorer }),
        })
    }

    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    pub fn scorer(&self) -> &RouteScorer {
        &self.inner.scorer
    }
}
