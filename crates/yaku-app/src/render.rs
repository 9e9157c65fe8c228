use std::sync::Arc;

use kanal::AsyncReceiver;
use yaku_core::types::AppEvent;
use yaku_engine::aggregate::TranslationEngine;

use crate::state::AppState;

/// Prints settled results and history views. Results are dropped when a
/// newer query has already superseded their generation.
pub async fn render_loop(
    state: Arc<AppState>,
    engine: Arc<TranslationEngine>,
    app_to_ui_rx: AsyncReceiver<AppEvent>,
) -> anyhow::Result<()> {
    loop {
        match app_to_ui_rx.recv().await? {
            AppEvent::ShowResults(result) => {
                if !engine.is_current(result.generation) {
                    tracing::debug!(generation = result.generation, "stale result discarded");
                    continue;
                }

                for (i, unit) in result.translations.iter().enumerate() {
                    println!("{:>2}. {}", i + 1, unit.translated_text.trim_start());
                    println!(
                        "    ({}): {} -> {}",
                        unit.provider, unit.detected_source_lang, result.target_lang
                    );
                }

                *state.last_result.write().await = Some(result);
            }
            AppEvent::ShowHistory(records) => {
                if records.is_empty() {
                    println!("(history is empty)");
                    continue;
                }
                for record in &records {
                    println!("    {}", record.translated_text);
                    println!(
                        "    {} -> {}  ({})",
                        record.source_lang, record.target_lang, record.original_text
                    );
                }
            }
            AppEvent::QueryChanged(_) | AppEvent::Accept(_) => {
                // App-bound events, nothing to render.
            }
        }
    }
}
