//! Display strings for the two supported languages.
//!
//! Locale documents are flat or nested JSON objects. Lookups try the active
//! language first and the English document second; callers that render
//! text never see a lookup failure.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::data::{CardType, Metadata};
use crate::error::{DataError, TextError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    Ja,
    En,
}

impl Lang {
    /// Parse a `?lang=` value; anything other than `en` selects Japanese.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        if code.trim().eq_ignore_ascii_case("en") {
            Self::En
        } else {
            Self::Ja
        }
    }

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Ja => "ja",
            Self::En => "en",
        }
    }
}

fn get_nested_value<'a>(obj: &'a Value, key: &str) -> Option<&'a Value> {
    if let Some(flat) = obj.get(key) {
        return Some(flat);
    }
    let mut current = obj;
    for k in key.split('.') {
        current = current.get(k)?;
    }
    Some(current)
}

fn render_value(value: &Value, args: &[(&str, &str)]) -> Option<String> {
    let mut text = match value {
        Value::String(s) => s.clone(),
        Value::Object(map) => map.get("_").and_then(Value::as_str)?.to_string(),
        _ => return None,
    };
    for (k, v) in args {
        let ph1 = format!("{{{{{k}}}}}");
        let ph2 = format!("{{{k}}}");
        text = text.replace(&ph1, v);
        text = text.replace(&ph2, v);
    }
    Some(text)
}

/// Active locale document plus the English fallback.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UiText {
    lang: Lang,
    translations: Value,
    fallback: Value,
}

impl UiText {
    #[must_use]
    pub const fn new(lang: Lang, translations: Value, fallback: Value) -> Self {
        Self {
            lang,
            translations,
            fallback,
        }
    }

    /// Build from raw JSON documents.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Json`] when either document is not valid JSON.
    pub fn from_json(lang: Lang, translations: &str, fallback: &str) -> Result<Self, DataError> {
        Ok(Self::new(
            lang,
            serde_json::from_str(translations)?,
            serde_json::from_str(fallback)?,
        ))
    }

    #[must_use]
    pub const fn lang(&self) -> Lang {
        self.lang
    }

    fn resolve(&self, key: &str, args: &[(&str, &str)]) -> Option<String> {
        get_nested_value(&self.translations, key)
            .and_then(|v| render_value(v, args))
            .or_else(|| get_nested_value(&self.fallback, key).and_then(|v| render_value(v, args)))
    }

    /// # Errors
    ///
    /// Returns [`TextError::MissingKey`] when neither document has the key.
    pub fn get(&self, key: &str) -> Result<String, TextError> {
        self.resolve(key, &[])
            .ok_or_else(|| TextError::MissingKey(key.to_string()))
    }

    #[must_use]
    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|_| default.to_string())
    }

    /// Translate a key, falling back to the key itself.
    #[must_use]
    pub fn t(&self, key: &str) -> String {
        self.get_or(key, key)
    }

    /// Translate with `{name}` / `{{name}}` substitution.
    #[must_use]
    pub fn tr(&self, key: &str, args: &[(&str, &str)]) -> String {
        self.resolve(key, args).unwrap_or_else(|| key.to_string())
    }

    /// Render a title template with `{character}` and `{version}` filled in.
    #[must_use]
    pub fn title(&self, key: &str, metadata: &Metadata) -> String {
        self.tr(
            key,
            &[
                ("character", metadata.character.as_str()),
                ("version", metadata.version.as_str()),
            ],
        )
    }
}

impl CardType {
    #[must_use]
    pub const fn label(self, lang: Lang) -> &'static str {
        match lang {
            Lang::En => self.name(),
            Lang::Ja => match self {
                Self::Attack => "攻撃",
                Self::Defense => "防御",
                Self::Skill => "スキル",
                Self::Ability => "能力",
                Self::Friend => "友人",
                Self::Tool => "道具",
                Self::Unknown => "不明",
                Self::Misfortune => "厄災",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text(lang: Lang) -> UiText {
        UiText::new(
            lang,
            json!({
                "agg_title": "{character} の総合 (v{version})",
                "nested": { "label": "入れ子" },
                "only_ja": "日本語のみ"
            }),
            json!({
                "agg_title": "{character} overall (v{{version}})",
                "only_en": "English only",
                "nested": { "label": "Nested", "plural": { "_": "{count} items" } }
            }),
        )
    }

    #[test]
    fn lookups_fall_back_to_english_then_default() {
        let ui = text(Lang::Ja);
        assert_eq!(ui.get("only_ja").unwrap(), "日本語のみ");
        assert_eq!(ui.get("only_en").unwrap(), "English only");
        assert_eq!(
            ui.get("missing"),
            Err(TextError::MissingKey("missing".to_string()))
        );
        assert_eq!(ui.get_or("missing", "既定"), "既定");
        assert_eq!(ui.t("missing.key"), "missing.key");
        assert_eq!(ui.t("nested.label"), "入れ子");
    }

    #[test]
    fn substitution_handles_single_and_double_braces() {
        let metadata = Metadata {
            character: "CirnoA".to_string(),
            version: "1.7.0".to_string(),
            ordered_situations: Vec::new(),
        };
        assert_eq!(text(Lang::Ja).title("agg_title", &metadata), "CirnoA の総合 (v1.7.0)");
        let en = UiText::new(Lang::En, json!({}), text(Lang::En).fallback);
        assert_eq!(en.title("agg_title", &metadata), "CirnoA overall (v1.7.0)");
        assert_eq!(en.tr("nested.plural", &[("count", "3")]), "3 items");
    }

    #[test]
    fn lang_codes_round_trip() {
        assert_eq!(Lang::from_code("en"), Lang::En);
        assert_eq!(Lang::from_code("EN"), Lang::En);
        assert_eq!(Lang::from_code("ja"), Lang::Ja);
        assert_eq!(Lang::from_code("fr"), Lang::Ja);
        assert_eq!(Lang::En.code(), "en");
        assert_eq!(CardType::Attack.label(Lang::Ja), "攻撃");
        assert_eq!(CardType::Tool.label(Lang::En), "Tool");
    }
}
