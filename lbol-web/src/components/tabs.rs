use crate::i18n::t;
use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Cards,
    CardList,
    Enemies,
    Exhibits,
    Route,
}

impl Tab {
    pub const ALL: [Self; 5] = [
        Self::Cards,
        Self::CardList,
        Self::Enemies,
        Self::Exhibits,
        Self::Route,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Cards => "cards",
            Self::CardList => "card_list",
            Self::Enemies => "enemies",
            Self::Exhibits => "exhibits",
            Self::Route => "route",
        }
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub active: Tab,
    pub on_select: Callback<Tab>,
}

#[function_component(TabBar)]
pub fn tab_bar(p: &Props) -> Html {
    html! {
        <nav class="tab-bar" role="tablist">
            { for Tab::ALL.into_iter().map(|tab| {
                let selected = tab == p.active;
                let onclick = p.on_select.reform(move |_: MouseEvent| tab);
                html! {
                    <button
                        role="tab"
                        id={format!("tab-{}", tab.key())}
                        class={classes!("tab-button", selected.then_some("active"))}
                        aria-selected={selected.to_string()}
                        {onclick}
                    >
                        { t(&format!("tabs.{}", tab.key())) }
                    </button>
                }
            }) }
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::set_lang;
    use futures::executor::block_on;
    use lbol_stats::Lang;
    use yew::LocalServerRenderer;

    #[test]
    fn every_tab_has_a_translated_button() {
        set_lang(Lang::En);
        let props = Props {
            active: Tab::Enemies,
            on_select: Callback::noop(),
        };
        let html = block_on(LocalServerRenderer::<TabBar>::with_props(props).render());
        for tab in Tab::ALL {
            assert!(html.contains(&format!("tab-{}", tab.key())));
        }
        assert!(html.contains("Card List"));
        assert!(html.contains("class=\"tab-button active\""));
    }
}
