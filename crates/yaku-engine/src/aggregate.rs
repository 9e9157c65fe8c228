use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use yaku_core::lang::LangCode;
use yaku_core::types::{AggregatedResult, TranslationRequest, TranslationUnit};
use yaku_translator::retry::{TranslationOutcome, translate_with_retry};
use yaku_translator::{SharedSettings, TranslationProvider};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The aggregation scope was cancelled; collected units are discarded
    /// with the call, never rendered partially.
    #[error("aggregation cancelled")]
    Cancelled,
}

/// Fans one translation request out to the available providers and merges
/// their settled outcomes into a single result.
pub struct TranslationEngine {
    providers: Vec<Arc<dyn TranslationProvider>>,
    settings: SharedSettings,
    generation: AtomicU64,
}

impl TranslationEngine {
    pub fn new(providers: Vec<Arc<dyn TranslationProvider>>, settings: SharedSettings) -> Self {
        Self {
            providers,
            settings,
            generation: AtomicU64::new(0),
        }
    }

    /// Whether a result's generation still matches the newest issued one.
    /// Renderers re-check this before applying a settled result.
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Translates `text` via the named provider, or via every available
    /// provider when no name is given.
    ///
    /// Every dispatched provider contributes exactly one unit: failures and
    /// timeouts become error units without disturbing sibling calls. Unit
    /// order is completion order and is not stable across runs.
    pub async fn aggregate(
        &self,
        text: &str,
        target: LangCode,
        provider_name: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<AggregatedResult, EngineError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let target_lang = target.as_str().to_string();

        let selected = match provider_name {
            Some(name) => match self.find_available(name).await {
                Some(provider) => vec![provider],
                None => {
                    return Ok(error_result(
                        generation,
                        target_lang,
                        TranslationUnit::error(
                            name,
                            "",
                            format!("Provider '{name}' is not available"),
                        ),
                    ));
                }
            },
            None => {
                let available = self.available_providers().await;
                if available.is_empty() {
                    return Ok(error_result(
                        generation,
                        target_lang,
                        TranslationUnit::error(
                            "no providers",
                            text,
                            "No translation providers available",
                        ),
                    ));
                }
                available
            }
        };

        let timeout = { self.settings.read().await.translation_timeout() };

        let mut calls = JoinSet::new();
        for provider in selected {
            let request = TranslationRequest {
                text: text.to_string(),
                target,
            };
            let scope = cancel.child_token();
            calls.spawn(async move {
                let name = provider.name();
                match tokio::time::timeout(
                    timeout,
                    translate_with_retry(provider.as_ref(), &request, &scope),
                )
                .await
                {
                    Ok(TranslationOutcome::Done(unit)) => Some(unit),
                    Ok(TranslationOutcome::Cancelled) => None,
                    Err(_) => Some(TranslationUnit::error(
                        name,
                        &request.text,
                        format!("Translation timeout ({name})"),
                    )),
                }
            });
        }

        let mut translations = Vec::new();
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    calls.abort_all();
                    return Err(EngineError::Cancelled);
                }
                settled = calls.join_next() => match settled {
                    None => break,
                    Some(Ok(Some(unit))) => translations.push(unit),
                    Some(Ok(None)) => {}
                    Some(Err(join_err)) => {
                        tracing::error!("provider task failed: {join_err}");
                        translations.push(TranslationUnit::error(
                            "",
                            text,
                            format!("Error: {join_err}"),
                        ));
                    }
                },
            }
        }

        Ok(AggregatedResult {
            generation,
            target_lang,
            translations,
        })
    }

    async fn find_available(&self, name: &str) -> Option<Arc<dyn TranslationProvider>> {
        let provider = self
            .providers
            .iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))?;
        if provider.is_available().await {
            Some(provider.clone())
        } else {
            None
        }
    }

    async fn available_providers(&self) -> Vec<Arc<dyn TranslationProvider>> {
        let mut available = Vec::new();
        for provider in &self.providers {
            if provider.is_available().await {
                available.push(provider.clone());
            }
        }
        available
    }
}

fn error_result(generation: u64, target_lang: String, unit: TranslationUnit) -> AggregatedResult {
    AggregatedResult {
        generation,
        target_lang,
        translations: vec![unit],
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::sync::RwLock;
    use tokio::time::Instant;
    use yaku_config::Settings;
    use yaku_translator::ProviderError;

    use super::*;

    struct StubProvider {
        name: &'static str,
        delay: Duration,
        available: bool,
    }

    impl StubProvider {
        fn new(name: &'static str, delay: Duration) -> Arc<dyn TranslationProvider> {
            Arc::new(Self {
                name,
                delay,
                available: true,
            })
        }

        fn unavailable(name: &'static str) -> Arc<dyn TranslationProvider> {
            Arc::new(Self {
                name,
                delay: Duration::ZERO,
                available: false,
            })
        }
    }

    #[async_trait::async_trait]
    impl TranslationProvider for StubProvider {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn is_available(&self) -> bool {
            self.available
        }

        async fn translate(
            &self,
            request: &TranslationRequest,
            _cancel: &CancellationToken,
        ) -> Result<TranslationUnit, ProviderError> {
            tokio::time::sleep(self.delay).await;
            Ok(TranslationUnit {
                provider: self.name.to_string(),
                original_text: request.text.clone(),
                detected_source_lang: "EN".to_string(),
                translated_text: format!("{} says hi", self.name),
            })
        }
    }

    fn shared_settings() -> SharedSettings {
        Arc::new(RwLock::new(Settings::default()))
    }

    fn engine(providers: Vec<Arc<dyn TranslationProvider>>) -> TranslationEngine {
        TranslationEngine::new(providers, shared_settings())
    }

    #[tokio::test(start_paused = true)]
    async fn one_unit_per_dispatched_provider() {
        let engine = engine(vec![
            StubProvider::new("fast", Duration::from_millis(10)),
            StubProvider::new("slow", Duration::from_millis(200)),
        ]);
        let cancel = CancellationToken::new();

        let result = engine
            .aggregate("hello", LangCode::Ko, None, &cancel)
            .await
            .unwrap();

        assert_eq!(result.target_lang, "KO");
        assert_eq!(result.translations.len(), 2);
        for name in ["fast", "slow"] {
            assert_eq!(
                result
                    .translations
                    .iter()
                    .filter(|u| u.provider == name)
                    .count(),
                1
            );
        }
    }

    #[tokio::test(start_paused = true)]
    async fn timed_out_provider_becomes_error_unit() {
        let engine = engine(vec![
            StubProvider::new("fast", Duration::from_millis(10)),
            StubProvider::new("steady", Duration::from_millis(50)),
            StubProvider::new("hung", Duration::from_secs(600)),
        ]);
        let cancel = CancellationToken::new();

        let start = Instant::now();
        let result = engine
            .aggregate("hello", LangCode::Ja, None, &cancel)
            .await
            .unwrap();

        // Bounded by the 2000ms default timeout, not the hung provider.
        assert_eq!(start.elapsed(), Duration::from_millis(2000));
        assert_eq!(result.translations.len(), 3);

        let hung = result
            .translations
            .iter()
            .find(|u| u.provider == "hung")
            .unwrap();
        assert_eq!(hung.translated_text, "Translation timeout (hung)");
        assert_eq!(hung.detected_source_lang, "Unknown");
        assert!(
            result
                .translations
                .iter()
                .filter(|u| u.provider != "hung")
                .all(|u| u.translated_text.ends_with("says hi"))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn named_unavailable_provider_is_not_silently_replaced() {
        let engine = engine(vec![
            StubProvider::new("fast", Duration::from_millis(10)),
            StubProvider::unavailable("deepl"),
        ]);
        let cancel = CancellationToken::new();

        let result = engine
            .aggregate("hello", LangCode::Ko, Some("deepl"), &cancel)
            .await
            .unwrap();

        assert_eq!(result.translations.len(), 1);
        assert_eq!(
            result.translations[0].translated_text,
            "Provider 'deepl' is not available"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn no_available_providers_yields_error_result() {
        let engine = engine(vec![
            StubProvider::unavailable("fast"),
            StubProvider::unavailable("slow"),
        ]);
        let cancel = CancellationToken::new();

        let result = engine
            .aggregate("hello", LangCode::Ko, None, &cancel)
            .await
            .unwrap();

        assert_eq!(result.translations.len(), 1);
        assert_eq!(
            result.translations[0].translated_text,
            "No translation providers available"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_unwinds_without_partial_results() {
        let engine = Arc::new(engine(vec![
            StubProvider::new("fast", Duration::from_millis(10)),
            StubProvider::new("slow", Duration::from_millis(500)),
        ]));
        let cancel = CancellationToken::new();

        let handle = {
            let engine = engine.clone();
            let cancel = cancel.clone();
            tokio::spawn(
                async move { engine.aggregate("hello", LangCode::Ko, None, &cancel).await },
            )
        };

        // Fast settles, slow is still in flight.
        tokio::time::sleep(Duration::from_millis(100)).await;
        cancel.cancel();

        match handle.await.unwrap() {
            Err(EngineError::Cancelled) => {}
            Ok(result) => panic!("expected unwind, got {result:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn generations_increase_and_supersede() {
        let engine = engine(vec![StubProvider::new("fast", Duration::from_millis(1))]);
        let cancel = CancellationToken::new();

        let first = engine
            .aggregate("one", LangCode::Ko, None, &cancel)
            .await
            .unwrap();
        assert!(engine.is_current(first.generation));

        let second = engine
            .aggregate("two", LangCode::Ko, None, &cancel)
            .await
            .unwrap();
        assert!(second.generation > first.generation);
        assert!(!engine.is_current(first.generation));
        assert!(engine.is_current(second.generation));
    }
}
