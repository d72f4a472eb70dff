//! Shared application state for the nail diagnosis server.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Mutex;

use naildx::{Classifier, UploadStore};

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Path the classifier artifact was loaded from
    pub model_path: PathBuf,
}

/// Shared application state
pub struct AppState {
    /// Server configuration
    pub config: ServerConfig,
    /// Loaded classifier; read-only after startup
    pub classifier: Arc<dyn Classifier>,
    /// Single-slot upload store. The mutex is held for the whole diagnose
    /// call so concurrent requests cannot clear each other's file mid-read.
    pub uploads: Mutex<UploadStore>,
    /// Server start time
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: ServerConfig, classifier: Arc<dyn Classifier>, store: UploadStore) -> Self {
        Self {
            config,
            classifier,
            uploads: Mutex::new(store),
            started_at: Instant::now(),
        }
    }

    /// Get uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

pub type SharedState = Arc<AppState>;
