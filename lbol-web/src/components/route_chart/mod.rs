mod node_detail;

pub use node_detail::NodeDetailPanel;

use crate::i18n::{fmt_pct, t};
use gloo_timers::callback::Timeout;
use lbol_stats::route::{LevelRow, Segment, gradient_css};
use lbol_stats::{AppContext, RouteFlow, RouteHover};
use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub ctx: AppContext,
    /// Node shown before any hover.
    #[prop_or_default]
    pub initial_node: Option<String>,
}

fn segment_style(segment: &Segment) -> String {
    let mut style = format!(
        "width: {:.2}%; background-color: {};",
        segment.share * 100.0,
        segment.color
    );
    if !segment.choice_bar.is_empty() {
        style.push_str(&format!(" --choice-bar: {};", gradient_css(&segment.choice_bar)));
    }
    style
}

/// Start the hover delay for `node_id`; the node is shown once it elapses
/// without another enter or a leave. The live timer sits in `pending`, so a
/// new enter clears the previous one.
fn hover_node(
    hover: &Rc<RefCell<RouteHover>>,
    pending: &Rc<RefCell<Option<Timeout>>>,
    shown: &UseStateHandle<Option<String>>,
    node_id: &str,
) {
    let ticket = hover.borrow_mut().enter(node_id);
    #[cfg(target_arch = "wasm32")]
    {
        let hover = Rc::clone(hover);
        let shown = shown.clone();
        let timer = Timeout::new(lbol_stats::constants::ROUTE_NODE_HOVER_DELAY_MS, move || {
            let node = hover.borrow_mut().elapsed(ticket).map(str::to_string);
            if node.is_some() {
                shown.set(node);
            }
        });
        drop(pending.replace(Some(timer)));
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = (ticket, pending, shown);
}

/// Node-type share per act and level, with a hover-delayed node panel.
#[function_component(RouteChart)]
pub fn route_chart(p: &Props) -> Html {
    let hover = use_mut_ref(RouteHover::default);
    let pending = use_mut_ref(|| None::<Timeout>);
    let shown = {
        let initial = p.initial_node.clone();
        use_state(move || initial)
    };
    let flow = RouteFlow::build(&p.ctx.dataset, p.ctx.lang);

    let on_leave = {
        let hover = hover.clone();
        let pending = pending.clone();
        let shown = shown.clone();
        Callback::from(move |_: MouseEvent| {
            hover.borrow_mut().leave();
            drop(pending.borrow_mut().take());
            shown.set(None);
        })
    };

    let segment_view = |segment: &Segment| {
        let onmouseenter = {
            let hover = hover.clone();
            let pending = pending.clone();
            let shown = shown.clone();
            let node_id = segment.node_id.clone();
            Callback::from(move |_: MouseEvent| hover_node(&hover, &pending, &shown, &node_id))
        };
        let active = shown.as_deref() == Some(segment.node_id.as_str());
        html! {
            <div
                class={classes!("route-segment", (!segment.choice_bar.is_empty()).then_some("with-choices"), active.then_some("active"))}
                style={segment_style(segment)}
                title={format!("{} {}", segment.label, fmt_pct(Some(segment.share), 1))}
                data-node={segment.node_id.clone()}
                {onmouseenter}
            >
                <span class="segment-label">{ segment.label.clone() }</span>
            </div>
        }
    };
    let level_view = |row: &LevelRow| {
        html! {
            <div class="route-level">
                <span class="level-label">{ row.level }</span>
                <div class="level-bar" style={format!("width: {:.2}%;", row.reach_rate * 100.0)}>
                    { for row.segments.iter().map(|s| segment_view(s)) }
                </div>
            </div>
        }
    };

    let detail = shown
        .as_deref()
        .and_then(|id| flow.detail(&p.ctx.dataset, id, p.ctx.lang));

    html! {
        <section class="route-analysis" onmouseleave={on_leave}>
            <h2>{ t("node_selection_title") }</h2>
            <p class="report-desc">{ t("node_selection_desc") }</p>
            if flow.is_empty() {
                <p class="no-data">{ t("no_data") }</p>
            } else {
                <div class="route-flow">
                    { for flow.acts.iter().map(|column| html! {
                        <div class="route-act">
                            <h3>{ format!("Act {}", column.act) }</h3>
                            { for column.levels.iter().map(|row| level_view(row)) }
                        </div>
                    }) }
                </div>
            }
            if let Some(detail) = detail {
                <NodeDetailPanel {detail} />
            } else {
                <p class="route-placeholder">{ t("route_placeholder") }</p>
            }
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::context;
    use futures::executor::block_on;
    use lbol_stats::Lang;
    use yew::LocalServerRenderer;

    fn render(initial_node: Option<&str>, lang: Lang) -> String {
        let props = Props {
            ctx: context(lang),
            initial_node: initial_node.map(str::to_string),
        };
        block_on(LocalServerRenderer::<RouteChart>::with_props(props).render())
    }

    #[test]
    fn flow_lists_acts_levels_and_segments() {
        let html = render(None, Lang::En);
        assert!(html.contains("Act 1"));
        assert!(html.contains("Act 2"));
        assert!(html.contains("data-node=\"1-2-Enemy\""));
        assert!(html.contains("width: 60.00%;"));
        assert!(html.contains("--choice-bar: linear-gradient(to right,"));
        assert!(html.contains("Hover a node to see its details."));
    }

    #[test]
    fn combat_node_detail_lists_encounters_and_samples() {
        let html = render(Some("1-2-Enemy"), Lang::Ja);
        assert!(html.contains("route-node-detail"));
        assert!(html.contains("妖精トリオ"));
        assert!(html.contains("https://lbol-logs.github.io/1.7.2/20240502-route/?a=1"));
    }

    #[test]
    fn event_node_detail_lists_actions() {
        let html = render(Some("1-2-Adventure"), Lang::Ja);
        assert!(html.contains("氷符"));
        assert!(html.contains("八咫鏡"));
    }

    #[test]
    fn empty_node_says_no_data() {
        let html = render(Some("2-1-Entry"), Lang::En);
        assert!(html.contains("No data"));
    }
}
