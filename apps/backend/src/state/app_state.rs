use std::sync::Arc;

use crate::config::server::{ServerConfig, SessionSettings};
use crate::ws::registry::RoomRegistry;

/// Shared, cheaply clonable handles used by every worker.
#[derive(Debug, Clone)]
pub struct AppState {
    /// All live rooms.
    pub registry: Arc<RoomRegistry>,
    /// Websocket session behaviour.
    pub settings: SessionSettings,
}

impl AppState {
    pub fn new(registry: Arc<RoomRegistry>, settings: SessionSettings) -> Self {
        Self { registry, settings }
    }

    /// Registry seeded from `YACHT_DICE_SEED` when set.
    pub fn from_config(config: &ServerConfig) -> Self {
        let registry = match config.dice_seed {
            Some(seed) => RoomRegistry::seeded(seed),
            None => RoomRegistry::new(),
        };
        Self::new(Arc::new(registry), config.session.clone())
    }

    pub fn registry(&self) -> Arc<RoomRegistry> {
        Arc::clone(&self.registry)
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }
}
