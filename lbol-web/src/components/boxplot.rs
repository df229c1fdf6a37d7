use crate::i18n::{fmt_fixed, t};
use lbol_stats::scale::{BoxplotTrack, TrackSpan};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub track: BoxplotTrack,
    #[prop_or(1)]
    pub digits: usize,
}

fn span_style(span: TrackSpan) -> String {
    format!("left: {:.2}%; width: {:.2}%;", span.left, span.width.max(0.0))
}

fn tooltip(track: &BoxplotTrack, digits: usize) -> String {
    let s = track.shown;
    [
        ("boxplot_min", s.min),
        ("boxplot_q1", s.q1),
        ("boxplot_median", s.median),
        ("boxplot_q3", s.q3),
        ("boxplot_max", s.max),
        ("boxplot_mean", s.mean),
    ]
    .into_iter()
    .map(|(key, v)| format!("{}: {}", t(key), fmt_fixed(Some(v), digits)))
    .collect::<Vec<_>>()
    .join("\n")
}

/// Small horizontal boxplot drawn with positioned divs.
#[function_component(InlineBoxplot)]
pub fn inline_boxplot(p: &Props) -> Html {
    let track = &p.track;
    html! {
        <div class="inline-boxplot" title={tooltip(track, p.digits)}>
            <div class="boxplot-track">
                <div class="boxplot-whisker" style={span_style(track.lower_whisker)} />
                <div class="boxplot-body" style={span_style(track.body)} />
                <div class="boxplot-whisker" style={span_style(track.upper_whisker)} />
                <div class="boxplot-median" style={format!("left: {:.2}%;", track.median)} />
                <div class="boxplot-mean" style={format!("left: {:.2}%;", track.mean)} />
            </div>
            <div class="boxplot-scale">
                <span>{ fmt_fixed(Some(track.label_start), 0) }</span>
                <span>{ fmt_fixed(Some(track.label_end), 0) }</span>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::set_lang;
    use futures::executor::block_on;
    use lbol_stats::Lang;
    use lbol_stats::data::BoxplotSummary;
    use yew::LocalServerRenderer;

    #[test]
    fn boxplot_positions_parts_on_the_track() {
        set_lang(Lang::En);
        let summary = BoxplotSummary {
            min: 0.0,
            q1: 2.0,
            median: 5.0,
            q3: 6.0,
            max: 10.0,
            mean: 4.0,
        };
        let track = BoxplotTrack::project(&summary, 0.0, 10.0, false).unwrap();
        let html = block_on(
            LocalServerRenderer::<InlineBoxplot>::with_props(Props { track, digits: 1 }).render(),
        );
        assert!(html.contains("left: 20.00%; width: 40.00%;"));
        assert!(html.contains("left: 50.00%;"));
        assert!(html.contains("Median: 5.0"));
    }
}
