use std::sync::Arc;

use tokio::sync::RwLock;
use yaku_config::Settings;
use yaku_core::types::AggregatedResult;
use yaku_translator::SharedSettings;

pub struct AppState {
    pub settings: SharedSettings,
    /// Newest raw query; the debounced handler reads it at fire time.
    pub latest_query: RwLock<String>,
    /// Last rendered result, kept for the accept flow.
    pub last_result: RwLock<Option<AggregatedResult>>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Arc::new(RwLock::new(settings)),
            latest_query: RwLock::new(String::new()),
            last_result: RwLock::new(None),
        }
    }
}
