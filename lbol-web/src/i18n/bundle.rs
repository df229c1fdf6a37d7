use crate::i18n::locales::embedded;
use lbol_stats::constants::DEFAULT_LANG;
use lbol_stats::{Lang, UiText};
use std::cell::RefCell;
use std::rc::Rc;

thread_local! {
    static CURRENT: RefCell<Rc<UiText>> =
        RefCell::new(Rc::new(embedded(Lang::from_code(DEFAULT_LANG))));
}

/// Make `text` the active locale, e.g. after the start-up fetch.
pub fn install(text: Rc<UiText>) {
    #[cfg(target_arch = "wasm32")]
    crate::dom::set_html_lang(text.lang().code());
    CURRENT.with(|cell| cell.replace(text));
}

/// Switch to the embedded documents of `lang`.
pub fn set_lang(lang: Lang) {
    install(Rc::new(embedded(lang)));
}

#[must_use]
pub fn current() -> Rc<UiText> {
    CURRENT.with(|cell| Rc::clone(&cell.borrow()))
}

#[must_use]
pub fn current_lang() -> Lang {
    CURRENT.with(|cell| cell.borrow().lang())
}
