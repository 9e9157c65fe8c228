use std::sync::Arc;
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use yaku_core::types::AppEvent;
use yaku_engine::aggregate::TranslationEngine;
use yaku_engine::debounce::Debouncer;
use yaku_io::history::HistoryStore;

use crate::events::{event_loop, query_handler};
use crate::input::stdin_watcher;
use crate::render::render_loop;
use crate::state::AppState;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            app_to_ui: kanal::bounded_async(64),
            ui_to_app: kanal::bounded_async(64),
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn spawn_tasks(
        &self,
        engine: Arc<TranslationEngine>,
        history: Arc<HistoryStore>,
        quiet: Duration,
    ) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        let debouncer = Arc::new(Debouncer::spawn(
            quiet,
            query_handler(
                self.state.clone(),
                engine.clone(),
                self.channels.app_to_ui.0.clone(),
            ),
        ));

        // Event loop
        tasks.spawn(event_loop(
            self.state.clone(),
            debouncer,
            history,
            self.channels.ui_to_app.1.clone(),
            self.channels.app_to_ui.0.clone(),
        ));

        // Renderer
        tasks.spawn(render_loop(
            self.state.clone(),
            engine,
            self.channels.app_to_ui.1.clone(),
        ));

        // Input watcher
        tasks.spawn(stdin_watcher(
            self.channels.ui_to_app.0.clone(),
            self.cancel_token.child_token(),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
