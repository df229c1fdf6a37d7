use crate::i18n::bundle::current;
use lbol_stats::data::Metadata;

/// Translate a key to the current language
///
/// Falls back to English, then to the key itself.
#[must_use]
pub fn t(key: &str) -> String {
    current().t(key)
}

/// Translate a key with `{name}` / `{{name}}` substitution.
#[must_use]
pub fn tr(key: &str, args: &[(&str, &str)]) -> String {
    current().tr(key, args)
}

/// Title template with the dataset's character and version filled in.
#[must_use]
pub fn title(key: &str, metadata: &Metadata) -> String {
    current().title(key, metadata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::set_lang;
    use lbol_stats::Lang;

    #[test]
    fn japanese_falls_back_to_english_keys() {
        set_lang(Lang::Ja);
        assert_eq!(t("tabs.enemies"), "敵");
        assert_eq!(t("wiki"), "wiki");
        assert_eq!(t("not.a.key"), "not.a.key");
    }

    #[test]
    fn titles_substitute_metadata() {
        set_lang(Lang::En);
        let metadata = Metadata {
            character: "ReimuA".into(),
            version: "1.7.2".into(),
            ordered_situations: Vec::new(),
        };
        assert_eq!(
            title("agg_title", &metadata),
            "ReimuA: Overall Card Performance (v1.7.2)"
        );
        assert_eq!(
            tr("load_error", &[("error", "boom")]),
            "Failed to load data: boom"
        );
    }
}
