use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use yaku_core::types::{TranslationRequest, TranslationUnit};

use crate::{ProviderError, SharedSettings, TranslationProvider, source_lang_or_unknown};

const AZURE_AUTH_ENDPOINT: &str = "https://edge.microsoft.com/translate/auth";
const AZURE_TRANSLATE_ENDPOINT: &str =
    "https://api-edge.cognitive.microsofttranslator.com/translate";

#[derive(Serialize)]
struct AzureRequest<'a> {
    #[serde(rename = "Text")]
    text: &'a str,
}

#[derive(Deserialize)]
struct AzureResponse {
    #[serde(rename = "detectedLanguage", default)]
    detected_language: Option<AzureDetectedLanguage>,
    translations: Vec<AzureTranslation>,
}

#[derive(Deserialize)]
struct AzureDetectedLanguage {
    language: String,
}

#[derive(Deserialize)]
struct AzureTranslation {
    text: String,
}

/// Microsoft translator v3 backend behind the keyless Edge auth endpoint.
/// Two-step: fetch a short-lived bearer token, then translate.
pub struct AzureProvider {
    client: reqwest::Client,
    settings: SharedSettings,
}

impl AzureProvider {
    pub fn new(settings: SharedSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            settings,
        }
    }

    async fn fetch_token(&self) -> Result<String, ProviderError> {
        let response = self.client.get(AZURE_AUTH_ENDPOINT).send().await?;
        if !response.status().is_success() {
            return Err(ProviderError::InvalidResponse(format!(
                "auth HTTP {}",
                response.status()
            )));
        }
        let token = response
            .text()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;
        Ok(token.trim().to_string())
    }
}

#[async_trait::async_trait]
impl TranslationProvider for AzureProvider {
    fn name(&self) -> &'static str {
        "azure"
    }

    async fn is_available(&self) -> bool {
        self.settings.read().await.providers.azure_enabled
    }

    async fn translate(
        &self,
        request: &TranslationRequest,
        cancel: &CancellationToken,
    ) -> Result<TranslationUnit, ProviderError> {
        let token = self.fetch_token().await?;
        if cancel.is_cancelled() {
            return Err(ProviderError::Cancelled);
        }

        let body = [AzureRequest {
            text: &request.text,
        }];
        let response = self
            .client
            .post(AZURE_TRANSLATE_ENDPOINT)
            .query(&[("api-version", "3.0"), ("to", request.target.as_str())])
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await?;

        match response.status() {
            StatusCode::FORBIDDEN => return Err(ProviderError::InvalidApiKey),
            StatusCode::TOO_MANY_REQUESTS => return Err(ProviderError::RateLimited),
            status if !status.is_success() => {
                return Err(ProviderError::InvalidResponse(format!("HTTP {status}")));
            }
            _ => {}
        }

        let mut parsed: Vec<AzureResponse> = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;
        let first = match parsed.pop() {
            Some(first) if !first.translations.is_empty() => first,
            _ => {
                return Err(ProviderError::InvalidResponse(
                    "no translation in response".to_string(),
                ));
            }
        };

        Ok(TranslationUnit {
            provider: self.name().to_string(),
            original_text: request.text.clone(),
            detected_source_lang: source_lang_or_unknown(
                first.detected_language.as_ref().map(|d| d.language.as_str()),
            ),
            translated_text: first.translations[0].text.clone(),
        })
    }
}
