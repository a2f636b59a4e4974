//! Shared state consulted by the middleware list

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// State shared between the middlewares of one service
#[derive(Debug)]
pub struct MiddlewareState {
    /// Maintenance flag checked by the maintenance gate
    pub maintenance: RwLock<bool>,
    /// Key required on admin paths when set
    pub admin_api_key: Option<String>,
}

impl MiddlewareState {
    pub fn new(admin_api_key: Option<String>) -> Arc<Self> {
        Arc::new(Self {
            maintenance: RwLock::new(false),
            admin_api_key,
        })
    }

    /// Check whether maintenance mode is active
    pub async fn in_maintenance(&self) -> bool {
        *self.maintenance.read().await
    }

    /// Enter maintenance mode; new requests are rejected
    pub async fn enter_maintenance(&self) {
        let mut flag = self.maintenance.write().await;
        *flag = true;
        warn!("Maintenance mode activated - requests will be rejected");
    }

    /// Leave maintenance mode
    pub async fn leave_maintenance(&self) {
        let mut flag = self.maintenance.write().await;
        *flag = false;
        info!("Maintenance mode deactivated");
    }
}
