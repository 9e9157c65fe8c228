use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::lang::LangCode;

/// Input to a single provider call.
#[derive(Debug, Clone)]
pub struct TranslationRequest {
    pub text: String,
    pub target: LangCode,
}

/// One backend's answer, or an error placeholder standing in for one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationUnit {
    pub provider: String,
    pub original_text: String,
    pub detected_source_lang: String,
    pub translated_text: String,
}

impl TranslationUnit {
    /// Error placeholder: the message is rendered in place of a
    /// translation, tagged with the failing provider.
    pub fn error(provider: &str, original_text: &str, message: impl Into<String>) -> Self {
        Self {
            provider: provider.to_string(),
            original_text: original_text.to_string(),
            detected_source_lang: LangCode::Unknown.as_str().to_string(),
            translated_text: message.into(),
        }
    }
}

/// Merged response of one aggregation call.
///
/// `translations` is in completion order of the concurrent provider calls,
/// which is not stable across runs. `generation` tags the call so the
/// renderer can discard results superseded by newer input.
#[derive(Debug, Clone)]
pub struct AggregatedResult {
    pub generation: u64,
    pub target_lang: String,
    pub translations: Vec<TranslationUnit>,
}

/// Persisted history entry for an accepted translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRecord {
    pub provider: String,
    pub original_text: String,
    pub translated_text: String,
    pub source_lang: String,
    pub target_lang: String,
    pub saved_at: u64,
}

impl TranslationRecord {
    pub fn from_unit(unit: &TranslationUnit, target_lang: &str) -> Self {
        Self {
            provider: unit.provider.clone(),
            original_text: unit.original_text.clone(),
            translated_text: unit.translated_text.trim_start().to_string(),
            source_lang: unit.detected_source_lang.clone(),
            target_lang: target_lang.to_string(),
            saved_at: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    QueryChanged(String),
    ShowResults(AggregatedResult),
    ShowHistory(Vec<TranslationRecord>),
    Accept(usize),
}
