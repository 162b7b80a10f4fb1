use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;

use crate::features::sessions::services::SessionService;

/// Delay between sweeps of expired sessions
const SWEEP_INTERVAL_SECS: u64 = 15 * 60;

/// Background worker deleting expired session rows
pub struct SessionSweeper {
    session_service: Arc<SessionService>,
}

impl SessionSweeper {
    pub fn new(session_service: Arc<SessionService>) -> Self {
        Self { session_service }
    }

    /// Run the sweeper in a background loop
    pub async fn run(&self) {
        tracing::info!("Starting session sweeper worker");

        let mut interval = interval(Duration::from_secs(SWEEP_INTERVAL_SECS));

        loop {
            interval.tick().await;

            match self.session_service.purge_expired().await {
                Ok(0) => {}
                Ok(removed) => tracing::info!("Removed {} expired sessions", removed),
                Err(e) => tracing::error!("Error sweeping expired sessions: {:?}", e),
            }
        }
    }
}
