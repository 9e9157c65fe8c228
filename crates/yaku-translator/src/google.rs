use reqwest::StatusCode;
use tokio_util::sync::CancellationToken;
use yaku_core::types::{TranslationRequest, TranslationUnit};

use crate::{ProviderError, SharedSettings, TranslationProvider, source_lang_or_unknown};

const GOOGLE_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Keyless Google web endpoint. The response is a nested array: index 0
/// holds the translated chunks, index 2 the detected source language.
pub struct GoogleProvider {
    client: reqwest::Client,
    settings: SharedSettings,
}

impl GoogleProvider {
    pub fn new(settings: SharedSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            settings,
        }
    }
}

#[async_trait::async_trait]
impl TranslationProvider for GoogleProvider {
    fn name(&self) -> &'static str {
        "google"
    }

    async fn is_available(&self) -> bool {
        self.settings.read().await.providers.google_enabled
    }

    async fn translate(
        &self,
        request: &TranslationRequest,
        _cancel: &CancellationToken,
    ) -> Result<TranslationUnit, ProviderError> {
        let response = self
            .client
            .get(GOOGLE_ENDPOINT)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", request.target.as_str()),
                ("dt", "t"),
                ("q", request.text.as_str()),
            ])
            .header("User-Agent", "Mozilla/5.0")
            .send()
            .await?;

        match response.status() {
            StatusCode::TOO_MANY_REQUESTS => return Err(ProviderError::RateLimited),
            status if !status.is_success() => {
                return Err(ProviderError::InvalidResponse(format!("HTTP {status}")));
            }
            _ => {}
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        let mut translated = String::new();
        if let Some(chunks) = json.get(0).and_then(|v| v.as_array()) {
            for chunk in chunks {
                if let Some(text) = chunk.get(0).and_then(|v| v.as_str()) {
                    translated.push_str(text);
                }
            }
        }
        if translated.is_empty() {
            return Err(ProviderError::InvalidResponse(
                "no translation in response".to_string(),
            ));
        }

        Ok(TranslationUnit {
            provider: self.name().to_string(),
            original_text: request.text.clone(),
            detected_source_lang: source_lang_or_unknown(json.get(2).and_then(|v| v.as_str())),
            translated_text: translated,
        })
    }
}
