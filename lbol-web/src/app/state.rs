use lbol_stats::constants::{DEFAULT_CHARACTER, DEFAULT_LANG};
use lbol_stats::{AppContext, Lang};

/// Page parameters from `?char=` and `?lang=`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageParams {
    pub character: String,
    pub lang: Lang,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            character: DEFAULT_CHARACTER.to_string(),
            lang: Lang::from_code(DEFAULT_LANG),
        }
    }
}

impl PageParams {
    /// Build from raw query values; blank or missing values use the defaults.
    #[must_use]
    pub fn from_query(character: Option<String>, lang: Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            character: character
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty() && c.chars().all(|ch| ch.is_ascii_alphanumeric()))
                .unwrap_or(defaults.character),
            lang: lang.map_or(defaults.lang, |code| Lang::from_code(&code)),
        }
    }

    /// Read the parameters of the current page.
    #[must_use]
    pub fn current() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            Self::from_query(
                crate::dom::query_param("char"),
                crate::dom::query_param("lang"),
            )
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            Self::default()
        }
    }

    /// Query string selecting `character` and `lang`.
    #[must_use]
    pub fn query(character: &str, lang: Lang) -> String {
        format!("?char={character}&lang={}", lang.code())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Failed(String),
    Ready(AppContext),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_values_fall_back_to_defaults() {
        let params = PageParams::from_query(None, None);
        assert_eq!(params.character, "CirnoA");
        assert_eq!(params.lang, Lang::Ja);

        let params = PageParams::from_query(Some(" ReimuA ".into()), Some("en".into()));
        assert_eq!(params.character, "ReimuA");
        assert_eq!(params.lang, Lang::En);

        let params = PageParams::from_query(Some("../etc".into()), Some("fr".into()));
        assert_eq!(params.character, "CirnoA");
        assert_eq!(params.lang, Lang::Ja);
    }

    #[test]
    fn query_string_round_trips_selection() {
        assert_eq!(PageParams::query("MarisaB", Lang::En), "?char=MarisaB&lang=en");
    }
}
