mod detail_panel;
mod distribution;
mod filter_bar;
mod mode_switch;

pub use detail_panel::DetailPanel;
pub use distribution::DistributionStrip;
pub use filter_bar::FilterBar;
pub use mode_switch::ModeSwitch;

use crate::app::board::{BoardHandle, GRAPH_ELEMENT_ID};
use lbol_stats::data::Situation;
use lbol_stats::{AppContext, DetailView, FilterState, GraphEvent, ViewMode};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub handle: BoardHandle,
    pub ctx: AppContext,
    pub filter: FilterState,
    pub mode: ViewMode,
    pub situations: Vec<Situation>,
    #[prop_or_default]
    pub detail: Option<DetailView>,
    #[prop_or_default]
    pub pinned: bool,
}

/// Graph heading for the current view mode.
#[must_use]
pub fn graph_title(ctx: &AppContext, situations: &[Situation], mode: ViewMode) -> String {
    match mode {
        ViewMode::Aggregate => ctx.title("agg_title"),
        ViewMode::Situational(idx) => match situations.get(idx) {
            Some(situation) => format!("{} [{}]", ctx.title("sit_title"), situation.label()),
            None => ctx.title("sit_title"),
        },
    }
}

#[cfg(target_arch = "wasm32")]
fn wire_plot_events(handle: &BoardHandle) {
    use crate::plotly::on_plot_event;
    use lbol_stats::PointRef;

    let bind = |event: &str, to_event: fn(Option<PointRef>) -> Option<GraphEvent>| {
        let handle = handle.clone();
        let attached = on_plot_event(GRAPH_ELEMENT_ID, event, move |point| {
            if let Some(graph_event) = to_event(point) {
                handle.dispatch(graph_event);
            }
        });
        if let Err(err) = attached {
            log::warn!("{event}: {}", crate::dom::js_error_message(&err));
        }
    };
    bind("plotly_hover", |point| point.map(GraphEvent::Hover));
    bind("plotly_unhover", |_| Some(GraphEvent::Unhover));
    bind("plotly_click", |point| point.map(GraphEvent::Click));
    bind("plotly_relayout", |_| Some(GraphEvent::Relayout));
}

/// Card scatter plot with its controls and detail panel.
#[function_component(CardsView)]
pub fn cards_view(p: &Props) -> Html {
    #[cfg(target_arch = "wasm32")]
    {
        let handle = p.handle.clone();
        use_effect_with((), move |()| {
            handle.draw();
            wire_plot_events(&handle);
            || {}
        });
    }

    let dispatch = {
        let handle = p.handle.clone();
        Callback::from(move |event: GraphEvent| handle.dispatch(event))
    };

    html! {
        <section class="cards-view">
            <h2 id="graph-title">{ graph_title(&p.ctx, &p.situations, p.mode) }</h2>
            <div class="graph-controls">
                <ModeSwitch
                    situations={p.situations.clone()}
                    mode={p.mode}
                    on_change={dispatch.reform(GraphEvent::SwitchMode)}
                />
                <FilterBar
                    filter={p.filter.clone()}
                    on_change={dispatch.reform(GraphEvent::SetFilter)}
                />
            </div>
            <div class="graph-area">
                <div id={GRAPH_ELEMENT_ID} class="card-graph" />
                if let Some(detail) = p.detail.clone() {
                    <DetailPanel {detail} pinned={p.pinned} lang={p.ctx.lang} on_event={dispatch.clone()} />
                }
            </div>
        </section>
    }
}
