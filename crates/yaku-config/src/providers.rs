use std::env;

use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    false
}

fn env_flag(name: &str) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or_else(default_enabled)
}

/// Per-backend availability toggles and credentials. Backends default to
/// disabled; only DeepL needs a key on top of its toggle.
#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ProviderSettings {
    #[serde(default = "default_enabled")]
    pub google_enabled: bool,
    #[serde(default = "default_enabled")]
    pub bing_enabled: bool,
    #[serde(default = "default_enabled")]
    pub azure_enabled: bool,
    #[serde(default = "default_enabled")]
    pub yandex_enabled: bool,
    #[serde(default = "default_enabled")]
    pub deepl_enabled: bool,
    #[serde(default)]
    pub deepl_api_key: String,
}

impl ProviderSettings {
    pub fn from_env() -> Self {
        Self {
            google_enabled: env_flag("YAKU_GOOGLE_ENABLED"),
            bing_enabled: env_flag("YAKU_BING_ENABLED"),
            azure_enabled: env_flag("YAKU_AZURE_ENABLED"),
            yandex_enabled: env_flag("YAKU_YANDEX_ENABLED"),
            deepl_enabled: env_flag("YAKU_DEEPL_ENABLED"),
            deepl_api_key: env::var("YAKU_DEEPL_API_KEY").unwrap_or_default(),
        }
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            google_enabled: default_enabled(),
            bing_enabled: default_enabled(),
            azure_enabled: default_enabled(),
            yandex_enabled: default_enabled(),
            deepl_enabled: default_enabled(),
            deepl_api_key: String::new(),
        }
    }
}
