use futures::executor::block_on;
use lbol_stats::Lang;
use lbol_web::app::PageParams;
use lbol_web::app::bootstrap::{PrefetchedDocs, build_dashboard};
use lbol_web::components::{ErrorOverlay, ExhibitTableView, Tab, TabBar};
use std::rc::Rc;
use yew::{Callback, LocalServerRenderer};

fn context(lang: Lang) -> lbol_stats::AppContext {
    let docs = PrefetchedDocs::new(
        "CirnoA",
        include_str!("../static/data/CirnoA_data.json").to_string(),
    )
    .with_locale(Lang::Ja, include_str!("../static/locales/ja.json").to_string())
    .with_locale(Lang::En, include_str!("../static/locales/en.json").to_string());
    let params = PageParams::from_query(None, Some(lang.code().to_string()));
    let board = build_dashboard(&params, docs).expect("fixture builds");
    lbol_web::i18n::install(Rc::clone(&board.context().text));
    board.context().clone()
}

#[test]
fn tab_bar_renders_japanese_labels() {
    context(Lang::Ja);
    let props = lbol_web::components::tabs::Props {
        active: Tab::Enemies,
        on_select: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<TabBar>::with_props(props).render());
    assert!(html.contains("tab-enemies"));
    assert!(html.contains("敵"));
}

#[test]
fn error_overlay_renders_message() {
    lbol_web::i18n::set_lang(Lang::En);
    let props = lbol_web::components::error_overlay::Props {
        message: "dataset is missing character dataset".into(),
    };
    let html = block_on(LocalServerRenderer::<ErrorOverlay>::with_props(props).render());
    assert!(html.contains("dataset is missing character dataset"));
}

#[test]
fn exhibit_table_renders_from_fetched_documents() {
    let ctx = context(Lang::En);
    let props = lbol_web::components::exhibit_table::Props { ctx };
    let html = block_on(LocalServerRenderer::<ExhibitTableView>::with_props(props).render());
    assert!(html.contains("exhibit-table"));
    assert!(html.contains("filter-button active"));
}
