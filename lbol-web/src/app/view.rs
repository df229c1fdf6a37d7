use crate::app::board::BoardHandle;
use crate::app::state::LoadState;
use crate::components::{
    CardListView, CardsView, EnemyTableView, ErrorOverlay, ExhibitTableView, Header, RouteChart,
    Tab, TabBar,
};
use crate::i18n::t;
use lbol_stats::{AppContext, GraphEvent};
use yew::prelude::*;

fn tab_content(tab: Tab, ctx: &AppContext, handle: &BoardHandle, tabs: &UseStateHandle<Tab>) -> Html {
    match tab {
        Tab::Cards => handle
            .with(|board| {
                let state = board.state();
                html! {
                    <CardsView
                        handle={handle.clone()}
                        ctx={ctx.clone()}
                        filter={state.filter().clone()}
                        mode={state.mode()}
                        situations={board.graph().situations.clone()}
                        detail={state.detail().cloned()}
                        pinned={state.pinned().is_some()}
                    />
                }
            })
            .unwrap_or_default(),
        Tab::CardList => {
            let on_select = {
                let handle = handle.clone();
                let tabs = tabs.clone();
                Callback::from(move |name: String| {
                    handle.dispatch_offscreen(GraphEvent::SelectCard(name));
                    tabs.set(Tab::Cards);
                })
            };
            let reports = handle.with(|board| board.reports().clone()).unwrap_or_default();
            html! { <CardListView ctx={ctx.clone()} {reports} {on_select} /> }
        }
        Tab::Enemies => html! { <EnemyTableView ctx={ctx.clone()} /> },
        Tab::Exhibits => html! { <ExhibitTableView ctx={ctx.clone()} /> },
        Tab::Route => html! { <RouteChart ctx={ctx.clone()} /> },
    }
}

/// Characters offered by the selector; the loaded one is always listed.
fn header_characters(ctx: &AppContext) -> Vec<String> {
    let mut characters = ctx.dataset.all_available_characters.clone();
    let own = &ctx.dataset.metadata.character;
    if !characters.contains(own) {
        characters.insert(0, own.clone());
    }
    characters
}

/// Render the page for the current load state.
pub fn render_app(load: &LoadState, handle: &BoardHandle, tabs: &UseStateHandle<Tab>) -> Html {
    match load {
        LoadState::Loading => html! {
            <div class="loading-overlay" aria-busy="true">{ t("loading") }</div>
        },
        LoadState::Failed(message) => html! { <ErrorOverlay message={message.clone()} /> },
        LoadState::Ready(ctx) => {
            let on_tab = {
                let tabs = tabs.clone();
                Callback::from(move |tab: Tab| tabs.set(tab))
            };
            html! {
                <>
                    <Header
                        title={ctx.title("page_title")}
                        characters={header_characters(ctx)}
                        character={ctx.dataset.metadata.character.clone()}
                        lang={ctx.lang}
                    />
                    <TabBar active={**tabs} on_select={on_tab} />
                    <main id="main" role="tabpanel">
                        { tab_content(**tabs, ctx, handle, tabs) }
                    </main>
                </>
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::dashboard;
    use futures::executor::block_on;
    use lbol_stats::Lang;
    use std::cell::RefCell;
    use std::rc::Rc;
    use yew::LocalServerRenderer;

    #[derive(Properties, PartialEq)]
    struct HarnessProps {
        load: LoadState,
        handle: BoardHandle,
        tab: Tab,
    }

    #[function_component(Harness)]
    fn harness(p: &HarnessProps) -> Html {
        let initial = p.tab;
        let tabs = use_state(move || initial);
        render_app(&p.load, &p.handle, &tabs)
    }

    fn render(tab: Tab, lang: Lang) -> String {
        let board = dashboard(lang);
        let ctx = board.context().clone();
        let props = HarnessProps {
            load: LoadState::Ready(ctx),
            handle: BoardHandle::new(Rc::new(RefCell::new(Some(board))), Callback::noop()),
            tab,
        };
        block_on(LocalServerRenderer::<Harness>::with_props(props).render())
    }

    #[test]
    fn ready_page_shows_header_tabs_and_active_view() {
        let html = render(Tab::Cards, Lang::En);
        assert!(html.contains("LBoL Card Report: CirnoA (v1.7.2)"));
        assert!(html.contains("tab-route"));
        assert!(html.contains("id=\"card-graph\""));

        let html = render(Tab::Enemies, Lang::Ja);
        assert!(html.contains("enemy-table"));
        let html = render(Tab::Route, Lang::En);
        assert!(html.contains("route-flow"));
        let html = render(Tab::Exhibits, Lang::En);
        assert!(html.contains("exhibit-table"));
        let html = render(Tab::CardList, Lang::En);
        assert!(html.contains("spotlight-report"));
    }

    #[test]
    fn failed_load_shows_only_the_overlay() {
        crate::i18n::set_lang(Lang::En);
        let props = HarnessProps {
            load: LoadState::Failed("HTTP 500".into()),
            handle: BoardHandle::new(Rc::new(RefCell::new(None)), Callback::noop()),
            tab: Tab::Cards,
        };
        let html = block_on(LocalServerRenderer::<Harness>::with_props(props).render());
        assert!(html.contains("Failed to load data: HTTP 500"));
        assert!(!html.contains("tab-bar"));
    }
}
