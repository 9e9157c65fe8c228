/// Target languages supported by the translation backends.
///
/// `EN` and `PT` are kept as unspecified variants for backward
/// compatibility; `parse` resolves the bare codes to the regional forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LangCode {
    Ar,
    Bg,
    Cs,
    Da,
    De,
    El,
    En,
    EnGb,
    EnUs,
    Es,
    Et,
    Fi,
    Fr,
    Hu,
    Id,
    It,
    Ja,
    Ko,
    Lt,
    Lv,
    Nb,
    Nl,
    Pl,
    Pt,
    PtBr,
    PtPt,
    Ro,
    Ru,
    Sk,
    Sl,
    Sv,
    Tr,
    Uk,
    Zh,
    #[default]
    Unknown,
}

impl LangCode {
    /// Every real code, in ordinal order. `Unknown` is deliberately absent.
    pub const ALL: [LangCode; 34] = [
        LangCode::Ar,
        LangCode::Bg,
        LangCode::Cs,
        LangCode::Da,
        LangCode::De,
        LangCode::El,
        LangCode::En,
        LangCode::EnGb,
        LangCode::EnUs,
        LangCode::Es,
        LangCode::Et,
        LangCode::Fi,
        LangCode::Fr,
        LangCode::Hu,
        LangCode::Id,
        LangCode::It,
        LangCode::Ja,
        LangCode::Ko,
        LangCode::Lt,
        LangCode::Lv,
        LangCode::Nb,
        LangCode::Nl,
        LangCode::Pl,
        LangCode::Pt,
        LangCode::PtBr,
        LangCode::PtPt,
        LangCode::Ro,
        LangCode::Ru,
        LangCode::Sk,
        LangCode::Sl,
        LangCode::Sv,
        LangCode::Tr,
        LangCode::Uk,
        LangCode::Zh,
    ];

    /// Code at ordinal `n`, or `Unknown` when out of range. Never fails.
    pub fn from_index(n: i64) -> Self {
        if n >= 0 {
            Self::ALL
                .get(n as usize)
                .copied()
                .unwrap_or(LangCode::Unknown)
        } else {
            LangCode::Unknown
        }
    }

    /// Parses a user-supplied code string.
    ///
    /// Regional aliases are matched exactly first (`gb`, `EN_GB`, ...),
    /// then the name table case-insensitively, then a numeric ordinal as
    /// stored by the settings layer. Anything else is `Unknown` — parse
    /// failures are normal results, not errors.
    pub fn parse(s: &str) -> Self {
        match s {
            "gb" | "GB" | "EN-GB" | "EN_GB" => LangCode::EnGb,
            "us" | "US" | "EN-US" | "EN_US" => LangCode::EnUs,
            "br" | "BR" | "PT-BR" | "PT_BR" => LangCode::PtBr,
            "pt" | "PT" | "PT-PT" | "PT_PT" => LangCode::PtPt,
            _ => {
                if let Ok(n) = s.parse::<i64>() {
                    return Self::from_index(n);
                }
                Self::from_name(&s.to_uppercase())
            }
        }
    }

    fn from_name(name: &str) -> Self {
        match name {
            "AR" => LangCode::Ar,
            "BG" => LangCode::Bg,
            "CS" => LangCode::Cs,
            "DA" => LangCode::Da,
            "DE" => LangCode::De,
            "EL" => LangCode::El,
            "EN" => LangCode::En,
            "EN_GB" => LangCode::EnGb,
            "EN_US" => LangCode::EnUs,
            "ES" => LangCode::Es,
            "ET" => LangCode::Et,
            "FI" => LangCode::Fi,
            "FR" => LangCode::Fr,
            "HU" => LangCode::Hu,
            "ID" => LangCode::Id,
            "IT" => LangCode::It,
            "JA" => LangCode::Ja,
            "KO" => LangCode::Ko,
            "LT" => LangCode::Lt,
            "LV" => LangCode::Lv,
            "NB" => LangCode::Nb,
            "NL" => LangCode::Nl,
            "PL" => LangCode::Pl,
            "PT" => LangCode::Pt,
            "PT_BR" => LangCode::PtBr,
            "PT_PT" => LangCode::PtPt,
            "RO" => LangCode::Ro,
            "RU" => LangCode::Ru,
            "SK" => LangCode::Sk,
            "SL" => LangCode::Sl,
            "SV" => LangCode::Sv,
            "TR" => LangCode::Tr,
            "UK" => LangCode::Uk,
            "ZH" => LangCode::Zh,
            _ => LangCode::Unknown,
        }
    }

    /// Canonical hyphenated form (`EN-GB`), as sent to the backends.
    pub fn as_str(&self) -> &'static str {
        match self {
            LangCode::Ar => "AR",
            LangCode::Bg => "BG",
            LangCode::Cs => "CS",
            LangCode::Da => "DA",
            LangCode::De => "DE",
            LangCode::El => "EL",
            LangCode::En => "EN",
            LangCode::EnGb => "EN-GB",
            LangCode::EnUs => "EN-US",
            LangCode::Es => "ES",
            LangCode::Et => "ET",
            LangCode::Fi => "FI",
            LangCode::Fr => "FR",
            LangCode::Hu => "HU",
            LangCode::Id => "ID",
            LangCode::It => "IT",
            LangCode::Ja => "JA",
            LangCode::Ko => "KO",
            LangCode::Lt => "LT",
            LangCode::Lv => "LV",
            LangCode::Nb => "NB",
            LangCode::Nl => "NL",
            LangCode::Pl => "PL",
            LangCode::Pt => "PT",
            LangCode::PtBr => "PT-BR",
            LangCode::PtPt => "PT-PT",
            LangCode::Ro => "RO",
            LangCode::Ru => "RU",
            LangCode::Sk => "SK",
            LangCode::Sl => "SL",
            LangCode::Sv => "SV",
            LangCode::Tr => "TR",
            LangCode::Uk => "UK",
            LangCode::Zh => "ZH",
            LangCode::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for LangCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_regional_aliases() {
        assert_eq!(LangCode::parse("gb"), LangCode::EnGb);
        assert_eq!(LangCode::parse("GB"), LangCode::EnGb);
        assert_eq!(LangCode::parse("us"), LangCode::EnUs);
        assert_eq!(LangCode::parse("br"), LangCode::PtBr);
        assert_eq!(LangCode::parse("pt"), LangCode::PtPt);
        assert_eq!(LangCode::parse("PT-PT"), LangCode::PtPt);
    }

    #[test]
    fn parses_plain_codes_case_insensitively() {
        assert_eq!(LangCode::parse("ko"), LangCode::Ko);
        assert_eq!(LangCode::parse("KO"), LangCode::Ko);
        assert_eq!(LangCode::parse("ja"), LangCode::Ja);
        assert_eq!(LangCode::parse("en_gb"), LangCode::EnGb);
    }

    #[test]
    fn hyphenated_lowercase_regional_forms_are_not_aliases() {
        // Only the exact alias spellings resolve; "en-gb" uppercases to
        // "EN-GB" which is not an enum name.
        assert_eq!(LangCode::parse("en-gb"), LangCode::Unknown);
    }

    #[test]
    fn unrecognized_input_is_unknown_never_an_error() {
        for s in ["", "xx", "engb", "english", "ko hello", "??"] {
            assert_eq!(LangCode::parse(s), LangCode::Unknown, "input {s:?}");
        }
    }

    #[test]
    fn parses_settings_ordinals() {
        assert_eq!(LangCode::parse("0"), LangCode::Ar);
        assert_eq!(LangCode::parse("8"), LangCode::EnUs);
        assert_eq!(LangCode::parse("99"), LangCode::Unknown);
    }

    #[test]
    fn from_index_clamps_to_unknown() {
        assert_eq!(LangCode::from_index(0), LangCode::Ar);
        assert_eq!(LangCode::from_index(33), LangCode::Zh);
        assert_eq!(LangCode::from_index(34), LangCode::Unknown);
        assert_eq!(LangCode::from_index(-1), LangCode::Unknown);
    }

    #[test]
    fn canonical_form_is_hyphenated() {
        assert_eq!(LangCode::EnGb.as_str(), "EN-GB");
        assert_eq!(LangCode::PtBr.as_str(), "PT-BR");
        assert_eq!(LangCode::Ko.as_str(), "KO");
        assert_eq!(LangCode::Unknown.as_str(), "Unknown");
    }
}
