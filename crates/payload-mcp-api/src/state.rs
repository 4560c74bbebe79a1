//! Application state for the API server

use std::sync::Arc;
use std::time::Instant;

use payload_mcp_generation::GenerationManager;

/// Application state shared across all API handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Generation facade
    pub generation: Arc<GenerationManager>,
    /// Server start time for uptime calculation
    pub start_time: Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(generation: GenerationManager) -> Self {
        Self {
            generation: Arc::new(generation),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
