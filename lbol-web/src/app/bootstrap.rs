use crate::app::state::PageParams;
use lbol_stats::{CharacterDataset, Dashboard, DataError, DataLoader, Lang, ReportEngine};
use serde_json::Value;

/// Documents fetched before the dashboard is built.
///
/// The engine is synchronous, so the browser fetches everything first and
/// hands the raw text over through this loader.
#[derive(Debug, Clone, Default)]
pub struct PrefetchedDocs {
    character: String,
    dataset: String,
    locales: Vec<(Lang, String)>,
}

impl PrefetchedDocs {
    #[must_use]
    pub fn new(character: &str, dataset: String) -> Self {
        Self {
            character: character.to_string(),
            dataset,
            locales: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_locale(mut self, lang: Lang, doc: String) -> Self {
        self.locales.push((lang, doc));
        self
    }

    /// Languages whose documents the engine asks for when showing `lang`.
    #[must_use]
    pub fn languages_for(lang: Lang) -> Vec<Lang> {
        match lang {
            Lang::En => vec![Lang::En],
            Lang::Ja => vec![Lang::Ja, Lang::En],
        }
    }
}

impl DataLoader for PrefetchedDocs {
    type Error = DataError;

    fn load_dataset(&self, character: &str) -> Result<CharacterDataset, Self::Error> {
        if character != self.character {
            return Err(DataError::MissingData("character dataset"));
        }
        CharacterDataset::from_json(&self.dataset)
    }

    fn load_locale(&self, lang: Lang) -> Result<Value, Self::Error> {
        let (_, doc) = self
            .locales
            .iter()
            .find(|(l, _)| *l == lang)
            .ok_or(DataError::MissingData("locale document"))?;
        Ok(serde_json::from_str(doc)?)
    }
}

/// Build the dashboard of `params` from prefetched documents.
///
/// # Errors
/// Returns an error when a document is missing or malformed.
pub fn build_dashboard(params: &PageParams, docs: PrefetchedDocs) -> Result<Dashboard, DataError> {
    ReportEngine::new(docs).load_dashboard(&params.character, params.lang)
}

/// Fetch the dataset and locale documents of `params`.
///
/// # Errors
/// Returns the first failed request.
#[cfg(target_arch = "wasm32")]
#[allow(clippy::future_not_send)]
pub async fn fetch_documents(params: &PageParams) -> Result<PrefetchedDocs, DataError> {
    use crate::{dom, paths};

    let dataset = dom::fetch_text(&paths::dataset_path(&params.character)).await?;
    let mut docs = PrefetchedDocs::new(&params.character, dataset);
    for lang in PrefetchedDocs::languages_for(params.lang) {
        let doc = dom::fetch_text(&paths::locale_path(lang.code())).await?;
        docs = docs.with_locale(lang, doc);
    }
    Ok(docs)
}

/// Fetch and build the dashboard for the current page.
///
/// # Errors
/// Returns fetch or decode failures.
#[cfg(target_arch = "wasm32")]
#[allow(clippy::future_not_send)]
pub async fn load_board(params: &PageParams) -> Result<Dashboard, DataError> {
    let docs = fetch_documents(params).await?;
    let board = build_dashboard(params, docs)?;
    crate::i18n::install(std::rc::Rc::clone(&board.context().text));
    crate::dom::set_title(&board.context().title("page_title"));
    log::info!(
        "loaded {} ({} cards)",
        params.character,
        board.reports().rankable_count
    );
    Ok(board)
}

/// Load the dashboard once on mount and publish it through `handle`.
#[cfg(target_arch = "wasm32")]
#[yew::hook]
pub fn use_bootstrap(
    handle: &crate::app::board::BoardHandle,
    load: &yew::UseStateHandle<crate::app::state::LoadState>,
) {
    use crate::app::state::LoadState;

    let handle = handle.clone();
    let load = load.clone();
    yew::use_effect_with((), move |()| {
        wasm_bindgen_futures::spawn_local(async move {
            let params = PageParams::current();
            match load_board(&params).await {
                Ok(board) => {
                    let ctx = board.context().clone();
                    handle.install(board);
                    load.set(LoadState::Ready(ctx));
                }
                Err(err) => {
                    log::error!("start-up failed: {err}");
                    crate::dom::console_error(&err.to_string());
                    load.set(LoadState::Failed(err.to_string()));
                }
            }
        });
        || {}
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = include_str!("../../static/data/CirnoA_data.json");
    const LOCALE_JA: &str = include_str!("../../static/locales/ja.json");
    const LOCALE_EN: &str = include_str!("../../static/locales/en.json");

    fn docs() -> PrefetchedDocs {
        PrefetchedDocs::new("CirnoA", FIXTURE.to_string())
            .with_locale(Lang::Ja, LOCALE_JA.to_string())
            .with_locale(Lang::En, LOCALE_EN.to_string())
    }

    #[test]
    fn prefetched_documents_build_a_dashboard() {
        let params = PageParams::default();
        let board = build_dashboard(&params, docs()).unwrap();
        assert_eq!(board.context().lang, Lang::Ja);
        assert_eq!(board.context().dataset.metadata.character, "CirnoA");
        assert_eq!(board.context().text.t("tabs.enemies"), "敵");
        assert_eq!(board.context().text.t("wiki"), "wiki");
    }

    #[test]
    fn missing_documents_surface_as_errors() {
        let params = PageParams::from_query(Some("ReimuA".into()), None);
        let err = build_dashboard(&params, docs()).unwrap_err();
        assert!(matches!(err, DataError::MissingData(_)));

        let english_only = PrefetchedDocs::new("CirnoA", FIXTURE.to_string());
        let err = build_dashboard(&PageParams::default(), english_only).unwrap_err();
        assert!(matches!(err, DataError::MissingData("locale document")));

        let broken = PrefetchedDocs::new("CirnoA", "{".into())
            .with_locale(Lang::En, LOCALE_EN.to_string());
        let params = PageParams::from_query(None, Some("en".into()));
        assert!(matches!(
            build_dashboard(&params, broken),
            Err(DataError::Json(_))
        ));
    }

    #[test]
    fn japanese_pages_also_fetch_english() {
        assert_eq!(PrefetchedDocs::languages_for(Lang::Ja), vec![Lang::Ja, Lang::En]);
        assert_eq!(PrefetchedDocs::languages_for(Lang::En), vec![Lang::En]);
    }
}
