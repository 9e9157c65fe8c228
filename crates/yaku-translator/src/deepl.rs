use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use yaku_core::types::{TranslationRequest, TranslationUnit};

use crate::{ProviderError, SharedSettings, TranslationProvider, source_lang_or_unknown};

const DEEPL_ENDPOINT: &str = "https://api-free.deepl.com/v2/translate";

#[derive(Serialize)]
struct DeeplRequest<'a> {
    text: [&'a str; 1],
    target_lang: &'a str,
}

#[derive(Deserialize)]
struct DeeplResponse {
    translations: Vec<DeeplTranslation>,
}

#[derive(Deserialize)]
struct DeeplTranslation {
    #[serde(default)]
    detected_source_language: String,
    text: String,
}

/// DeepL REST backend. The configured key is sent verbatim as the
/// `Authorization` header value (`DeepL-Auth-Key {key}`).
pub struct DeepLProvider {
    client: reqwest::Client,
    settings: SharedSettings,
}

impl DeepLProvider {
    pub fn new(settings: SharedSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            settings,
        }
    }
}

#[async_trait::async_trait]
impl TranslationProvider for DeepLProvider {
    fn name(&self) -> &'static str {
        "deepl"
    }

    async fn is_available(&self) -> bool {
        let settings = self.settings.read().await;
        settings.providers.deepl_enabled && !settings.providers.deepl_api_key.trim().is_empty()
    }

    async fn translate(
        &self,
        request: &TranslationRequest,
        _cancel: &CancellationToken,
    ) -> Result<TranslationUnit, ProviderError> {
        let api_key = { self.settings.read().await.providers.deepl_api_key.clone() };
        if api_key.trim().is_empty() {
            return Err(ProviderError::InvalidApiKey);
        }

        let body = DeeplRequest {
            text: [request.text.as_str()],
            target_lang: request.target.as_str(),
        };

        let response = self
            .client
            .post(DEEPL_ENDPOINT)
            .header("Authorization", &api_key)
            .json(&body)
            .send()
            .await?;

        match response.status() {
            StatusCode::FORBIDDEN => Err(ProviderError::InvalidApiKey),
            StatusCode::TOO_MANY_REQUESTS => Err(ProviderError::RateLimited),
            status if !status.is_success() => {
                Err(ProviderError::InvalidResponse(format!("HTTP {status}")))
            }
            _ => {
                let parsed: DeeplResponse = response
                    .json()
                    .await
                    .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;
                let first = parsed.translations.into_iter().next().ok_or_else(|| {
                    ProviderError::InvalidResponse("no translation in response".to_string())
                })?;

                Ok(TranslationUnit {
                    provider: self.name().to_string(),
                    original_text: request.text.clone(),
                    detected_source_lang: source_lang_or_unknown(Some(
                        first.detected_source_language.as_str(),
                    )),
                    translated_text: first.text,
                })
            }
        }
    }
}
