//! Locale payloads
//!
//! Every translatable column keeps a legacy single-language value and a
//! sibling `_locales` JSON blob keyed by language code. Reads resolve
//! through `locale value -> base field -> ""`.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter};
use ts_rs::TS;

use crate::api::services::admin::TS_EXPORT_PATH;

/// Supported content languages
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    TS,
    EnumIter,
    AsRefStr,
)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    It,
}

impl Locale {
    /// Parse a language code, falling back to English for anything unknown.
    pub fn from_code(code: &str) -> Self {
        code.parse().unwrap_or_default()
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl std::str::FromStr for Locale {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(Self::En),
            "it" => Ok(Self::It),
            _ => Err(format!("Unsupported locale: '{}'. Valid: en, it", s)),
        }
    }
}

/// `{en, it}` payload for a scalar text field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct LocalizedText {
    #[serde(default)]
    pub en: String,
    #[serde(default)]
    pub it: String,
}

impl LocalizedText {
    pub fn new(en: impl Into<String>, it: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            it: it.into(),
        }
    }

    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.en,
            Locale::It => &self.it,
        }
    }

    pub fn get_mut(&mut self, locale: Locale) -> &mut String {
        match locale {
            Locale::En => &mut self.en,
            Locale::It => &mut self.it,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.en.trim().is_empty() && self.it.trim().is_empty()
    }

    /// Both languages blank means "no payload", never an empty object.
    pub fn into_payload(self) -> Option<Self> {
        if self.is_blank() { None } else { Some(self) }
    }

    /// Case-insensitive substring match against either language.
    pub fn contains_ignore_case(&self, needle_lower: &str) -> bool {
        self.en.to_lowercase().contains(needle_lower)
            || self.it.to_lowercase().contains(needle_lower)
    }
}

/// `{en, it}` payload for a string-array field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct LocalizedList {
    #[serde(default)]
    pub en: Vec<String>,
    #[serde(default)]
    pub it: Vec<String>,
}

impl LocalizedList {
    pub fn get(&self, locale: Locale) -> &[String] {
        match locale {
            Locale::En => &self.en,
            Locale::It => &self.it,
        }
    }

    pub fn get_mut(&mut self, locale: Locale) -> &mut Vec<String> {
        match locale {
            Locale::En => &mut self.en,
            Locale::It => &mut self.it,
        }
    }

    /// Drop blank items from both languages.
    pub fn compact(mut self) -> Self {
        self.en.retain(|s| !s.trim().is_empty());
        self.it.retain(|s| !s.trim().is_empty());
        self
    }

    pub fn is_blank(&self) -> bool {
        self.en.iter().all(|s| s.trim().is_empty()) && self.it.iter().all(|s| s.trim().is_empty())
    }

    pub fn into_payload(self) -> Option<Self> {
        let compacted = self.compact();
        if compacted.is_blank() {
            None
        } else {
            Some(compacted)
        }
    }
}

/// Resolve a translatable field: locale value, then the legacy base column,
/// then the empty string.
pub fn localized(locales: Option<&LocalizedText>, locale: Locale, base: &str) -> String {
    if let Some(value) = locales.map(|l| l.get(locale)).filter(|v| !v.trim().is_empty()) {
        return value.to_string();
    }
    base.to_string()
}

/// List counterpart of [`localized`]: locale list, then the English list,
/// then empty. Lists have no legacy flat column, so the English list stands
/// in for the `base` step.
pub fn localized_list(locales: Option<&LocalizedList>, locale: Locale) -> Vec<String> {
    let Some(locales) = locales else {
        return Vec::new();
    };
    let values = locales.get(locale);
    if !values.is_empty() {
        return values.to_vec();
    }
    locales.en.clone()
}

/// Parse a stored `_locales` JSON column. Malformed JSON is treated as absent.
pub fn parse_locales<T: serde::de::DeserializeOwned>(raw: Option<&str>) -> Option<T> {
    let raw = raw?.trim();
    if raw.is_empty() || raw == "null" {
        return None;
    }
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Ignoring malformed locale payload: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_parse_and_fallback() {
        assert_eq!(Locale::from_code("it"), Locale::It);
        assert_eq!(Locale::from_code(" IT "), Locale::It);
        assert_eq!(Locale::from_code("de"), Locale::En);
        assert_eq!(Locale::It.to_string(), "it");
    }

    #[test]
    fn test_blank_payload_is_omitted() {
        assert_eq!(LocalizedText::new("", "").into_payload(), None);
        assert_eq!(LocalizedText::new("  ", "\n").into_payload(), None);
        let payload = LocalizedText::new("Glove", "").into_payload();
        assert_eq!(payload, Some(LocalizedText::new("Glove", "")));
    }

    #[test]
    fn test_blank_list_payload_is_omitted() {
        let list = LocalizedList {
            en: vec!["".into(), "  ".into()],
            it: vec![],
        };
        assert_eq!(list.into_payload(), None);

        let list = LocalizedList {
            en: vec!["Cut resistant".into(), "".into()],
            it: vec![],
        };
        assert_eq!(
            list.into_payload().map(|l| l.en),
            Some(vec!["Cut resistant".to_string()])
        );
    }

    #[test]
    fn test_localized_fallback_chain() {
        let locales = LocalizedText::new("Glove", "Guanto");
        assert_eq!(localized(Some(&locales), Locale::It, "Legacy"), "Guanto");

        let only_en = LocalizedText::new("Glove", "");
        assert_eq!(localized(Some(&only_en), Locale::It, "Legacy"), "Legacy");

        assert_eq!(localized(None, Locale::En, "Legacy"), "Legacy");
        assert_eq!(localized(None, Locale::It, ""), "");
    }

    #[test]
    fn test_localized_list_falls_back_to_english() {
        let list = LocalizedList {
            en: vec!["a".into()],
            it: vec![],
        };
        assert_eq!(localized_list(Some(&list), Locale::It), vec!["a"]);
        assert!(localized_list(None, Locale::It).is_empty());
    }

    #[test]
    fn test_parse_locales_tolerates_garbage() {
        let parsed: Option<LocalizedText> = parse_locales(Some(r#"{"en":"A","it":"B"}"#));
        assert_eq!(parsed, Some(LocalizedText::new("A", "B")));

        let missing_it: Option<LocalizedText> = parse_locales(Some(r#"{"en":"A"}"#));
        assert_eq!(missing_it, Some(LocalizedText::new("A", "")));

        let broken: Option<LocalizedText> = parse_locales(Some("{not json"));
        assert!(broken.is_none());
        let null: Option<LocalizedText> = parse_locales(Some("null"));
        assert!(null.is_none());
        let none: Option<LocalizedText> = parse_locales(None);
        assert!(none.is_none());
    }
}
