// src/state.rs
use std::sync::Arc;

use crate::config::Config;
use crate::services::openrouter::OpenRouterClient;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub upstream: OpenRouterClient,
}

impl AppState {
    pub fn new(config: Config) -> reqwest::Result<Self> {
        let upstream = OpenRouterClient::new(&config)?;
        Ok(Self { config, upstream })
    }
}
