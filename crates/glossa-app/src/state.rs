use std::sync::Arc;

use glossa_config::Config;
use tokio::sync::RwLock;

use crate::session::SessionProvider;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub session: Arc<dyn SessionProvider>,
}

impl AppState {
    pub fn new(config: Config, session: Arc<dyn SessionProvider>) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            session,
        }
    }
}
