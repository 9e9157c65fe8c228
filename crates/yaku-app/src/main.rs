use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use yaku_config::Settings;
use yaku_config::history::HistoryLimit;
use yaku_engine::aggregate::TranslationEngine;
use yaku_io::history::HistoryStore;

pub mod controller;
pub mod events;
pub mod input;
pub mod render;
pub mod state;

use self::controller::AppController;
use self::state::AppState;

#[derive(Parser)]
#[command(name = "yaku", about = "Interactive multi-provider translation front-end")]
struct Args {
    /// Default target language code (or settings ordinal)
    #[arg(long)]
    target_lang: Option<String>,

    /// Per-provider call timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Quiet period for input debouncing in milliseconds
    #[arg(long)]
    debounce_ms: Option<u64>,

    /// Maximum history entries; "none" disables history
    #[arg(long)]
    history: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut settings = Settings::from_env();
    if let Some(lang) = args.target_lang {
        settings.default_target_lang = lang;
    }
    if let Some(ms) = args.timeout_ms {
        settings.translation_timeout_ms = ms;
    }
    if let Some(ms) = args.debounce_ms {
        settings.debounce_ms = ms;
    }
    if let Some(limit) = args.history {
        settings.history = HistoryLimit::parse(&limit);
    }

    let quiet = settings.debounce_period();
    let history = Arc::new(HistoryStore::new(settings.history_path.clone()));
    let state = Arc::new(AppState::new(settings));

    let providers = yaku_translator::all_providers(&state.settings);
    let engine = Arc::new(TranslationEngine::new(providers, state.settings.clone()));

    let controller = AppController::new(state.clone());
    let mut tasks = controller.spawn_tasks(engine, history, quiet);

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
            controller.shutdown();
        }
        result = tasks.join_next() => match result {
            Some(Ok(Ok(()))) => tracing::warn!("task exited"),
            Some(Ok(Err(e))) => tracing::error!("task failed: {e}"),
            Some(Err(e)) => tracing::error!("task panicked: {e}"),
            None => {}
        }
    }

    Ok(())
}
