use crate::lang::LangCode;

/// Backends addressable by name in a query. Closed set; adding a backend is
/// a code change.
pub const KNOWN_PROVIDERS: [&str; 5] = ["google", "bing", "azure", "yandex", "deepl"];

/// Outcome of interpreting one raw query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    pub provider: Option<String>,
    pub target: LangCode,
    pub text: String,
}

/// Splits a raw query into `[provider] [language] text`.
///
/// Examples: `"deepl ko hello world"`, `"ko hello world"`, `"hello world"`.
/// When the candidate language token fails to parse, the interpretation is
/// discarded: the target falls back to `default` and the entire original
/// query becomes the text.
pub fn interpret(query: &str, default: LangCode) -> ParsedQuery {
    let parts: Vec<&str> = query.split_whitespace().collect();
    if parts.is_empty() {
        return ParsedQuery {
            provider: None,
            target: default,
            text: String::new(),
        };
    }

    let mut provider = None;
    let mut lang_token = None;
    let mut text = parts[1..].join(" ");

    if KNOWN_PROVIDERS
        .iter()
        .any(|p| p.eq_ignore_ascii_case(parts[0]))
    {
        provider = Some(parts[0].to_lowercase());
        if parts.len() > 1 {
            lang_token = Some(parts[1]);
            text = parts[2..].join(" ");
        }
    } else {
        lang_token = Some(parts[0]);
    }

    let target = match lang_token {
        Some(token) => {
            let parsed = LangCode::parse(token);
            if parsed == LangCode::Unknown {
                // Not a language after all; the whole query is the text.
                text = query.to_string();
                default
            } else {
                parsed
            }
        }
        None => default,
    };

    ParsedQuery {
        provider,
        target,
        text: text.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT: LangCode = LangCode::EnUs;

    #[test]
    fn empty_query_yields_defaults() {
        let parsed = interpret("   ", DEFAULT);
        assert_eq!(parsed.provider, None);
        assert_eq!(parsed.target, DEFAULT);
        assert_eq!(parsed.text, "");
    }

    #[test]
    fn provider_language_and_text() {
        let parsed = interpret("deepl ko hello world", DEFAULT);
        assert_eq!(parsed.provider.as_deref(), Some("deepl"));
        assert_eq!(parsed.target, LangCode::Ko);
        assert_eq!(parsed.text, "hello world");
    }

    #[test]
    fn provider_name_is_case_insensitive() {
        let parsed = interpret("DeepL ja konnichiwa", DEFAULT);
        assert_eq!(parsed.provider.as_deref(), Some("deepl"));
        assert_eq!(parsed.target, LangCode::Ja);
        assert_eq!(parsed.text, "konnichiwa");
    }

    #[test]
    fn language_without_provider() {
        let parsed = interpret("ko hello world", DEFAULT);
        assert_eq!(parsed.provider, None);
        assert_eq!(parsed.target, LangCode::Ko);
        assert_eq!(parsed.text, "hello world");
    }

    #[test]
    fn plain_text_falls_back_to_default() {
        let parsed = interpret("hello world", DEFAULT);
        assert_eq!(parsed.provider, None);
        assert_eq!(parsed.target, DEFAULT);
        assert_eq!(parsed.text, "hello world");
    }

    #[test]
    fn invalid_language_token_keeps_whole_query() {
        let parsed = interpret("xx hello", DEFAULT);
        assert_eq!(parsed.provider, None);
        assert_eq!(parsed.target, DEFAULT);
        assert_eq!(parsed.text, "xx hello");
    }

    #[test]
    fn provider_with_invalid_language_keeps_whole_query() {
        let parsed = interpret("deepl xx hello", DEFAULT);
        // The provider token stays consumed; only the language
        // interpretation is discarded.
        assert_eq!(parsed.provider.as_deref(), Some("deepl"));
        assert_eq!(parsed.target, DEFAULT);
        assert_eq!(parsed.text, "deepl xx hello");
    }

    #[test]
    fn lone_provider_token() {
        let parsed = interpret("deepl", DEFAULT);
        assert_eq!(parsed.provider.as_deref(), Some("deepl"));
        assert_eq!(parsed.target, DEFAULT);
        assert_eq!(parsed.text, "");
    }

    #[test]
    fn round_trips_serialized_triples() {
        for (provider, lang, text) in [
            ("google", LangCode::Fr, "bonne nuit"),
            ("yandex", LangCode::Ru, "good evening friend"),
            ("azure", LangCode::Ja, "one"),
        ] {
            let query = format!("{provider} {} {text}", lang.as_str().to_lowercase());
            let parsed = interpret(&query, DEFAULT);
            assert_eq!(parsed.provider.as_deref(), Some(provider));
            assert_eq!(parsed.target, lang);
            assert_eq!(parsed.text, text);
        }
    }
}
