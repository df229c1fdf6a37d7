use lbol_stats::{Lang, UiText};
use once_cell::sync::Lazy;
use serde_json::Value;

static EN: Lazy<Value> = Lazy::new(|| parse(Lang::En, include_str!("../../static/locales/en.json")));
static JA: Lazy<Value> = Lazy::new(|| parse(Lang::Ja, include_str!("../../static/locales/ja.json")));

fn parse(lang: Lang, doc: &str) -> Value {
    serde_json::from_str(doc).unwrap_or_else(|err| {
        log::warn!("embedded {} locale is invalid: {err}", lang.code());
        Value::Object(serde_json::Map::new())
    })
}

fn translations(lang: Lang) -> &'static Value {
    match lang {
        Lang::En => &EN,
        Lang::Ja => &JA,
    }
}

/// Locale text compiled into the bundle; shown until the fetched documents
/// arrive and used when they cannot be fetched.
#[must_use]
pub fn embedded(lang: Lang) -> UiText {
    UiText::new(lang, translations(lang).clone(), EN.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_text_covers_both_languages() {
        assert_eq!(embedded(Lang::En).t("tabs.enemies"), "Enemies");
        assert_eq!(embedded(Lang::Ja).t("tabs.enemies"), "敵");
    }
}
