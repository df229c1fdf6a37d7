use crate::app::state::PageParams;
use crate::components::select_value;
use crate::i18n::t;
use lbol_stats::Lang;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub title: AttrValue,
    pub characters: Vec<String>,
    pub character: AttrValue,
    pub lang: Lang,
}

fn go_to(character: &str, lang: Lang) {
    let search = PageParams::query(character, lang);
    #[cfg(target_arch = "wasm32")]
    if let Err(err) = crate::dom::navigate(&search) {
        log::error!("navigation failed: {}", crate::dom::js_error_message(&err));
    }
    #[cfg(not(target_arch = "wasm32"))]
    log::debug!("navigate to {search}");
}

/// Page title with the character and language selectors.
///
/// Both selectors reload the page with the new query string.
#[function_component(Header)]
pub fn header(p: &Props) -> Html {
    let on_character = {
        let lang = p.lang;
        Callback::from(move |e: Event| {
            if let Some(character) = select_value(&e) {
                go_to(&character, lang);
            }
        })
    };
    let on_lang = {
        let character = p.character.clone();
        Callback::from(move |e: Event| {
            if let Some(code) = select_value(&e) {
                go_to(&character, Lang::from_code(&code));
            }
        })
    };
    html! {
        <header role="banner" class="page-header">
            <h1 id="main-title">{ p.title.clone() }</h1>
            <div class="header-controls">
                <label for="char-select">{ t("char_select_label") }</label>
                <select id="char-select" onchange={on_character}>
                    { for p.characters.iter().map(|c| html! {
                        <option value={c.clone()} selected={c.as_str() == p.character.as_str()}>{ c.clone() }</option>
                    }) }
                </select>
                <label for="lang-select">{ t("language_label") }</label>
                <select id="lang-select" onchange={on_lang}>
                    <option value="ja" selected={p.lang == Lang::Ja}>{ t("japanese_label") }</option>
                    <option value="en" selected={p.lang == Lang::En}>{ t("english_label") }</option>
                </select>
            </div>
        </header>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::set_lang;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn header_lists_characters_and_languages() {
        set_lang(Lang::Ja);
        let props = Props {
            title: "CirnoA: カード総合性能 (v1.7.2)".into(),
            characters: vec!["CirnoA".into(), "ReimuA".into()],
            character: "ReimuA".into(),
            lang: Lang::Ja,
        };
        let html = block_on(LocalServerRenderer::<Header>::with_props(props).render());
        assert!(html.contains("カード総合性能"));
        assert!(html.contains("value=\"CirnoA\""));
        assert!(html.contains("日本語"));
        assert!(html.contains("English"));
    }
}
