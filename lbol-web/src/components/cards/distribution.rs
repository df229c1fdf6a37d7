use crate::i18n::t;
use lbol_stats::detail::DistributionPlot;
use lbol_stats::scale::to_percent;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub plot: DistributionPlot,
}

/// Per-situation values as dots on a deviation axis, with the card's own
/// score marked.
#[function_component(DistributionStrip)]
pub fn distribution_strip(p: &Props) -> Html {
    let plot = &p.plot;
    if plot.is_empty() {
        return html! { <div class="distribution-strip empty">{ t("no_data") }</div> };
    }
    let (lo, hi) = plot.axis.range;
    let at = |v: f64| format!("left: {:.2}%;", to_percent(v, lo, hi));
    html! {
        <div class="distribution-strip">
            <div class="distribution-track">
                { for plot.values.iter().map(|v| html! {
                    <span
                        class="distribution-dot"
                        style={format!("{} background-color: {};", at(*v), plot.color)}
                    />
                }) }
                if let Some(score) = plot.highlight {
                    <span class="distribution-highlight" style={at(plot.axis.position_of(score))} />
                }
            </div>
            <div class="distribution-ticks">
                { for plot.axis.tick_values.iter().zip(&plot.axis.tick_labels).map(|(v, label)| html! {
                    <span class="distribution-tick" style={at(*v)}>{ label.clone() }</span>
                }) }
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use lbol_stats::scale::DistributionAxis;
    use yew::LocalServerRenderer;

    #[test]
    fn dots_and_highlight_land_on_the_axis() {
        let plot = DistributionPlot {
            values: vec![50.0, 75.0],
            color: "#E57373",
            highlight: Some(30.0),
            axis: DistributionAxis::deviation(),
        };
        let html = block_on(LocalServerRenderer::<DistributionStrip>::with_props(Props { plot }).render());
        assert!(html.contains("left: 50.00%; background-color: #E57373;"));
        assert!(html.contains("left: 100.00%;"));
        assert!(html.contains("distribution-highlight"));
        assert!(html.contains("left: 10.00%;"));
        assert!(html.contains(">70<"));
    }
}
