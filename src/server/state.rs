//! Server state and configuration.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::customizer::Customizer;
use crate::order::{HttpOrderGateway, OrderGateway};

/// Sessions idle longer than this are expired by the cleanup task.
pub const SESSION_EXPIRATION_SECS: u64 = 1800;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
    /// Order collaborator endpoint. `None` disables submission.
    pub orders_url: Option<String>,
}

/// One customization session with its inactivity clock.
pub struct CustomizerSession {
    pub customizer: Customizer,
    pub last_accessed: Instant,
}

impl CustomizerSession {
    pub fn new(customizer: Customizer) -> Self {
        Self {
            customizer,
            last_accessed: Instant::now(),
        }
    }

    /// Keep the session alive.
    pub fn touch(&mut self) {
        self.last_accessed = Instant::now();
    }
}

/// Application state shared across handlers.
pub struct AppState {
    pub config: ServerConfig,
    pub sessions: RwLock<HashMap<Uuid, CustomizerSession>>,
    pub gateway: Option<Arc<dyn OrderGateway>>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let gateway = config
            .orders_url
            .as_ref()
            .map(|url| Arc::new(HttpOrderGateway::new(url)) as Arc<dyn OrderGateway>);
        Self {
            config,
            sessions: RwLock::new(HashMap::new()),
            gateway,
        }
    }
}
