use reqwest::StatusCode;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;
use yaku_core::types::{TranslationRequest, TranslationUnit};

use crate::{ProviderError, SharedSettings, TranslationProvider, source_lang_or_unknown};

const YANDEX_ENDPOINT: &str = "https://translate.yandex.net/api/v1/tr.json/translate";

#[derive(Deserialize)]
struct YandexResponse {
    #[serde(default)]
    lang: Option<String>,
    #[serde(default)]
    text: Vec<String>,
}

/// Yandex web endpoint. Requires a per-session client id (`ucid`); the
/// response `lang` field is a `source-target` pair.
pub struct YandexProvider {
    client: reqwest::Client,
    settings: SharedSettings,
    ucid: String,
}

impl YandexProvider {
    pub fn new(settings: SharedSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            settings,
            ucid: Uuid::new_v4().simple().to_string(),
        }
    }
}

#[async_trait::async_trait]
impl TranslationProvider for YandexProvider {
    fn name(&self) -> &'static str {
        "yandex"
    }

    async fn is_available(&self) -> bool {
        self.settings.read().await.providers.yandex_enabled
    }

    async fn translate(
        &self,
        request: &TranslationRequest,
        _cancel: &CancellationToken,
    ) -> Result<TranslationUnit, ProviderError> {
        let response = self
            .client
            .post(YANDEX_ENDPOINT)
            .query(&[
                ("ucid", self.ucid.as_str()),
                ("srv", "android"),
                ("format", "text"),
            ])
            .form(&[
                ("text", request.text.as_str()),
                ("lang", request.target.as_str()),
            ])
            .send()
            .await?;

        match response.status() {
            StatusCode::TOO_MANY_REQUESTS => return Err(ProviderError::RateLimited),
            status if !status.is_success() => {
                return Err(ProviderError::InvalidResponse(format!("HTTP {status}")));
            }
            _ => {}
        }

        let parsed: YandexResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;
        if parsed.text.is_empty() {
            return Err(ProviderError::InvalidResponse(
                "no translation in response".to_string(),
            ));
        }

        let source = parsed
            .lang
            .as_deref()
            .and_then(|pair| pair.split('-').next());

        Ok(TranslationUnit {
            provider: self.name().to_string(),
            original_text: request.text.clone(),
            detected_source_lang: source_lang_or_unknown(source),
            translated_text: parsed.text.concat(),
        })
    }
}
