use std::sync::Arc;

use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use yaku_config::Settings;
use yaku_core::lang::LangCode;
use yaku_core::types::{TranslationRequest, TranslationUnit};

pub mod azure;
pub mod bing;
pub mod deepl;
pub mod google;
pub mod retry;
pub mod yandex;

/// Live settings shared across the provider set. Availability reads go
/// through this on every call rather than a startup snapshot.
pub type SharedSettings = Arc<RwLock<Settings>>;

/// Uniform capability over one translation backend.
#[async_trait::async_trait]
pub trait TranslationProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Re-evaluated on every call; reflects current configuration.
    async fn is_available(&self) -> bool;

    /// One translate call. Multi-step adapters check `cancel` between
    /// requests; single-shot adapters are cancelled by future drop.
    async fn translate(
        &self,
        request: &TranslationRequest,
        cancel: &CancellationToken,
    ) -> Result<TranslationUnit, ProviderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Permanent credential rejection; never retried.
    #[error("invalid API key")]
    InvalidApiKey,

    #[error("too many requests")]
    RateLimited,

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    InvalidResponse(String),

    #[error("translation cancelled")]
    Cancelled,
}

/// The full backend set, in registry order. The set is closed; adding a
/// backend is a code change here and in the query interpreter.
pub fn all_providers(settings: &SharedSettings) -> Vec<Arc<dyn TranslationProvider>> {
    vec![
        Arc::new(google::GoogleProvider::new(settings.clone())),
        Arc::new(bing::BingProvider::new(settings.clone())),
        Arc::new(azure::AzureProvider::new(settings.clone())),
        Arc::new(yandex::YandexProvider::new(settings.clone())),
        Arc::new(deepl::DeepLProvider::new(settings.clone())),
    ]
}

/// Detected source language, or the `Unknown` marker when the backend
/// response carried none.
pub(crate) fn source_lang_or_unknown(code: Option<&str>) -> String {
    match code {
        Some(code) if !code.is_empty() => code.to_string(),
        _ => LangCode::Unknown.as_str().to_string(),
    }
}
