use regex::Regex;
use reqwest::StatusCode;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use yaku_core::types::{TranslationRequest, TranslationUnit};

use crate::{ProviderError, SharedSettings, TranslationProvider, source_lang_or_unknown};

const BING_PAGE: &str = "https://www.bing.com/translator";
const BING_ENDPOINT: &str = "https://www.bing.com/ttranslatev3";

#[derive(Deserialize)]
struct BingResponse {
    #[serde(rename = "detectedLanguage", default)]
    detected_language: Option<BingDetectedLanguage>,
    #[serde(default)]
    translations: Vec<BingTranslation>,
}

#[derive(Deserialize)]
struct BingDetectedLanguage {
    language: String,
}

#[derive(Deserialize)]
struct BingTranslation {
    text: String,
}

/// Bing web backend. Two-step: scrape the `IG`/`IID` ids and the
/// abuse-prevention key/token out of the translator page, then POST the
/// actual translate call with them.
pub struct BingProvider {
    client: reqwest::Client,
    settings: SharedSettings,
    ig_re: Regex,
    iid_re: Regex,
    params_re: Regex,
}

impl BingProvider {
    pub fn new(settings: SharedSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            settings,
            ig_re: Regex::new(r#"IG:"([^"]+)""#).expect("static pattern"),
            iid_re: Regex::new(r#"data-iid="([^"]+)""#).expect("static pattern"),
            params_re: Regex::new(r#"params_AbusePreventionHelper\s*=\s*\[(\d+),"([^"]+)""#)
                .expect("static pattern"),
        }
    }

    async fn fetch_page_tokens(&self) -> Result<(String, String, String, String), ProviderError> {
        let response = self
            .client
            .get(BING_PAGE)
            .header("User-Agent", "Mozilla/5.0")
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ProviderError::InvalidResponse(format!(
                "page HTTP {}",
                response.status()
            )));
        }
        let page = response
            .text()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        let ig = capture(&self.ig_re, &page, 1);
        let iid = capture(&self.iid_re, &page, 1);
        let key = capture(&self.params_re, &page, 1);
        let token = capture(&self.params_re, &page, 2);
        match (ig, iid, key, token) {
            (Some(ig), Some(iid), Some(key), Some(token)) => Ok((ig, iid, key, token)),
            _ => Err(ProviderError::InvalidResponse(
                "translator page markup changed".to_string(),
            )),
        }
    }
}

fn capture(re: &Regex, haystack: &str, group: usize) -> Option<String> {
    re.captures(haystack)
        .and_then(|c| c.get(group))
        .map(|m| m.as_str().to_string())
}

#[async_trait::async_trait]
impl TranslationProvider for BingProvider {
    fn name(&self) -> &'static str {
        "bing"
    }

    async fn is_available(&self) -> bool {
        self.settings.read().await.providers.bing_enabled
    }

    async fn translate(
        &self,
        request: &TranslationRequest,
        cancel: &CancellationToken,
    ) -> Result<TranslationUnit, ProviderError> {
        let (ig, iid, key, token) = self.fetch_page_tokens().await?;
        if cancel.is_cancelled() {
            return Err(ProviderError::Cancelled);
        }

        let response = self
            .client
            .post(BING_ENDPOINT)
            .query(&[("isVertical", "1"), ("IG", ig.as_str()), ("IID", iid.as_str())])
            .form(&[
                ("fromLang", "auto-detect"),
                ("to", request.target.as_str()),
                ("text", request.text.as_str()),
                ("key", key.as_str()),
                ("token", token.as_str()),
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

        let parsed: Vec<BingResponse> = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;
        let first = match parsed.into_iter().next() {
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
