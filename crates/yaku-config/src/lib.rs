use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use yaku_core::lang::LangCode;

use self::history::HistoryLimit;
use self::providers::ProviderSettings;

pub mod history;
pub mod providers;

#[derive(Serialize, Deserialize, Clone)]
pub struct Settings {
    pub providers: ProviderSettings,
    /// Maximum stored history entries; `None` disables history.
    pub history: HistoryLimit,
    /// History file location.
    pub history_path: String,
    /// Default target language, as a code string or a settings ordinal.
    pub default_target_lang: String,
    /// Per-provider call timeout in milliseconds.
    pub translation_timeout_ms: u64,
    /// Quiet period for coalescing input changes.
    pub debounce_ms: u64,
}

impl Settings {
    pub fn from_env() -> Self {
        let translation_timeout_ms = env::var("YAKU_TRANSLATION_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(2000);

        let debounce_ms = env::var("YAKU_DEBOUNCE_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(50);

        let default_target_lang =
            env::var("YAKU_DEFAULT_TARGET_LANG").unwrap_or_else(|_| "EN-US".to_string());

        let history_path =
            env::var("YAKU_HISTORY_PATH").unwrap_or_else(|_| ".yaku/history.json".to_string());

        Settings {
            providers: ProviderSettings::from_env(),
            history: HistoryLimit::from_env(),
            history_path,
            default_target_lang,
            translation_timeout_ms,
            debounce_ms,
        }
    }

    pub fn default_target(&self) -> LangCode {
        LangCode::parse(&self.default_target_lang)
    }

    pub fn translation_timeout(&self) -> Duration {
        Duration::from_millis(self.translation_timeout_ms)
    }

    pub fn debounce_period(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            providers: ProviderSettings::default(),
            history: HistoryLimit::default(),
            history_path: ".yaku/history.json".to_string(),
            default_target_lang: "EN-US".to_string(),
            translation_timeout_ms: 2000,
            debounce_ms: 50,
        }
    }
}
