use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio_util::sync::CancellationToken;
use yaku_core::query;
use yaku_core::types::{AppEvent, TranslationRecord};
use yaku_engine::aggregate::{EngineError, TranslationEngine};
use yaku_engine::debounce::Debouncer;
use yaku_io::history::HistoryStore;

use crate::state::AppState;

/// App's main loop: routes input events into the debounced translation
/// path, the history view, and the accept flow.
pub async fn event_loop(
    state: Arc<AppState>,
    debouncer: Arc<Debouncer>,
    history: Arc<HistoryStore>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    loop {
        let event = ui_to_app_rx.recv().await?;
        match event {
            AppEvent::QueryChanged(text) => {
                if text.trim().is_empty() {
                    // Empty query renders the stored history instead.
                    debouncer.cancel().await;
                    let records = history.load().await;
                    app_to_ui_tx.send(AppEvent::ShowHistory(records)).await?;
                    continue;
                }
                *state.latest_query.write().await = text;
                debouncer.notify_update().await;
            }
            AppEvent::Accept(index) => {
                if let Err(e) = handle_accept(&state, &history, index).await {
                    tracing::error!("failed to accept result {index}: {e}");
                }
            }
            AppEvent::ShowResults(_) | AppEvent::ShowHistory(_) => {
                // Renderer-bound events, nothing to do here.
            }
        }
    }
}

/// The debounced query handler: interprets the newest query and hands it to
/// the aggregation engine under the invocation's cancellation scope.
pub fn query_handler(
    state: Arc<AppState>,
    engine: Arc<TranslationEngine>,
    app_to_ui_tx: AsyncSender<AppEvent>,
) -> impl Fn(CancellationToken) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync + 'static
{
    move |scope| {
        let state = state.clone();
        let engine = engine.clone();
        let tx = app_to_ui_tx.clone();
        Box::pin(async move {
            let raw = state.latest_query.read().await.clone();
            let default_target = { state.settings.read().await.default_target() };
            let parsed = query::interpret(&raw, default_target);

            tracing::debug!(
                provider = ?parsed.provider,
                target = %parsed.target,
                "dispatching query"
            );

            match engine
                .aggregate(&parsed.text, parsed.target, parsed.provider.as_deref(), &scope)
                .await
            {
                Ok(result) => {
                    if let Err(e) = tx.send(AppEvent::ShowResults(result)).await {
                        tracing::error!("failed to send results: {e}");
                    }
                }
                Err(EngineError::Cancelled) => {
                    tracing::debug!("superseded query abandoned");
                }
            }
        })
    }
}

/// Copies the chosen unit to the clipboard and appends it to the history
/// (when history is enabled). `index` is the 1-based rendered row number.
async fn handle_accept(
    state: &AppState,
    history: &HistoryStore,
    index: usize,
) -> anyhow::Result<()> {
    let accepted = {
        let last = state.last_result.read().await;
        last.as_ref().and_then(|result| {
            let unit = result.translations.get(index.checked_sub(1)?)?;
            Some((unit.clone(), result.target_lang.clone()))
        })
    };

    let Some((unit, target_lang)) = accepted else {
        tracing::warn!("no result row {index} to accept");
        return Ok(());
    };

    if let Err(e) = yaku_io::clipboard::copy_text(unit.translated_text.trim_start()) {
        tracing::error!("clipboard copy failed: {e}");
    }

    let limit = { state.settings.read().await.history };
    if !limit.is_disabled() {
        history
            .save(TranslationRecord::from_unit(&unit, &target_lang), limit)
            .await?;
    }

    Ok(())
}
