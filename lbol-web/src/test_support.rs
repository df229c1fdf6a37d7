use crate::app::bootstrap::{PrefetchedDocs, build_dashboard};
use crate::app::state::PageParams;
use lbol_stats::{AppContext, Dashboard, Lang};
use std::rc::Rc;

pub const FIXTURE: &str = include_str!("../static/data/CirnoA_data.json");

pub fn dashboard(lang: Lang) -> Dashboard {
    let docs = PrefetchedDocs::new("CirnoA", FIXTURE.to_string())
        .with_locale(Lang::Ja, include_str!("../static/locales/ja.json").to_string())
        .with_locale(Lang::En, include_str!("../static/locales/en.json").to_string());
    let params = PageParams::from_query(None, Some(lang.code().to_string()));
    let board = build_dashboard(&params, docs).expect("fixture builds");
    crate::i18n::install(Rc::clone(&board.context().text));
    board
}

pub fn context(lang: Lang) -> AppContext {
    dashboard(lang).context().clone()
}
