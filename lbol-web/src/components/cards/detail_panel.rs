use super::distribution::DistributionStrip;
use crate::i18n::{fmt_fixed, fmt_pct, t};
use lbol_stats::detail::{AggregateDetail, OverallStats, SituationalDetail, TendencyCell};
use lbol_stats::{DetailBody, DetailView, GraphEvent, Lang};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub detail: DetailView,
    pub pinned: bool,
    pub lang: Lang,
    pub on_event: Callback<GraphEvent>,
}

fn stat_row(key: &str, value: String) -> Html {
    html! {
        <tr>
            <th>{ t(key) }</th>
            <td>{ value }</td>
        </tr>
    }
}

fn tendency_row(key: &str, cell: TendencyCell) -> Html {
    html! {
        <tr>
            <th>{ t(key) }</th>
            <td style={format!("color: {};", cell.tone.css())}>
                { fmt_fixed(cell.value, 2) }{ cell.mark }
            </td>
        </tr>
    }
}

fn overall_rows(stats: OverallStats) -> Html {
    html! {
        <>
            { stat_row("adoption_rate", fmt_pct(Some(stats.adoption_rate), 1)) }
            { stat_row("attention_score_label", fmt_fixed(stats.attention, 1)) }
            { stat_row("stability", fmt_fixed(stats.stability, 1)) }
        </>
    }
}

fn aggregate_body(body: &AggregateDetail) -> Html {
    html! {
        <>
            <table class="detail-stats">
                { stat_row("attack_perf", fmt_fixed(body.turn_deviation, 1)) }
                { stat_row("defense_perf", fmt_fixed(body.hp_deviation, 1)) }
            </table>
            <DistributionStrip plot={body.turn_plot.clone()} />
            <DistributionStrip plot={body.hp_plot.clone()} />
            <table class="detail-stats">
                { tendency_row("atk_tendency", body.attack_tendency) }
                { tendency_row("def_tendency", body.defense_tendency) }
                { overall_rows(body.overall) }
                { stat_row("avg_copies_when_adopted", fmt_fixed(body.avg_copies, 2)) }
                { stat_row("avg_upgrade_rate", fmt_pct(body.avg_upgrade_rate, 1)) }
            </table>
        </>
    }
}

fn situational_body(body: &SituationalDetail) -> Html {
    html! {
        <>
            <p class="detail-situation">{ body.situation.label() }</p>
            <table class="detail-stats">
                { stat_row("sit_attack_perf", fmt_fixed(body.turn_deviation, 1)) }
                { stat_row("sit_defense_perf", fmt_fixed(body.hp_deviation, 1)) }
                { stat_row("sit_adoption_rate", fmt_pct(body.adoption_rate, 1)) }
                { stat_row("adoption_count_label", fmt_fixed(Some(body.fights_with), 0)) }
            </table>
            if let Some(reference) = body.reference {
                <h4>{ t("for_reference") }</h4>
                <table class="detail-stats reference">{ overall_rows(reference) }</table>
            }
        </>
    }
}

/// Card detail shown beside the graph on hover, click and report selection.
#[function_component(DetailPanel)]
pub fn detail_panel(p: &Props) -> Html {
    let detail = &p.detail;
    let on_enter = p.on_event.reform(|_: MouseEvent| GraphEvent::PanelEnter);
    let on_leave = p.on_event.reform(|_: MouseEvent| GraphEvent::PanelLeave);
    let on_close = p.on_event.reform(|_: MouseEvent| GraphEvent::Dismiss);
    let situational = matches!(detail.body, DetailBody::Situational(_));
    let rarity = detail.rarity.map_or("", |r| r.name());
    html! {
        <aside
            id="card-detail"
            class={classes!("detail-panel", p.pinned.then_some("pinned"))}
            onmouseenter={on_enter}
            onmouseleave={on_leave}
        >
            <header class="detail-header">
                <h3>
                    { detail.medal.glyph() }
                    { detail.label.clone() }
                    if p.lang == Lang::En && detail.label != detail.name {
                        <small class="detail-alt-name">{ format!(" ({})", detail.name) }</small>
                    }
                </h3>
                if let Some(url) = detail.wiki_url.clone() {
                    <a href={url} target="_blank" rel="noopener noreferrer">{ t("wiki") }</a>
                }
                if p.pinned {
                    <button class="detail-close" onclick={on_close}>{ "×" }</button>
                }
            </header>
            <p class="detail-meta">
                { format!("{}: {} / {}: {}", t("type"), detail.card_type.name(), t("rarity"), rarity) }
            </p>
            if !detail.highlights.is_empty() {
                <div class="detail-highlights">
                    <h4>{ t("highlights") }</h4>
                    <ul>{ for detail.highlights.iter().map(|h| html! { <li>{ h.clone() }</li> }) }</ul>
                </div>
            }
            { match &detail.body {
                DetailBody::Aggregate(body) => aggregate_body(body),
                DetailBody::Situational(body) => situational_body(body),
            } }
            <div class="detail-co-occurrence">
                <h4>{ t(if situational { "sit_top_20" } else { "top_20" }) }</h4>
                if detail.co_occurrence.is_empty() {
                    <p class="no-data">{ t("no_data") }</p>
                } else {
                    <ol>{ for detail.co_occurrence.iter().map(|line| html! { <li>{ line.clone() }</li> }) }</ol>
                }
            </div>
        </aside>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::dashboard;
    use futures::executor::block_on;
    use lbol_stats::ViewMode;
    use yew::LocalServerRenderer;

    fn render(event: &[GraphEvent], lang: Lang) -> String {
        let mut board = dashboard(lang);
        for e in event {
            board.handle(e.clone());
        }
        let props = Props {
            detail: board.state().detail().cloned().unwrap(),
            pinned: board.state().pinned().is_some(),
            lang,
            on_event: Callback::noop(),
        };
        block_on(LocalServerRenderer::<DetailPanel>::with_props(props).render())
    }

    #[test]
    fn aggregate_detail_lists_stats_and_plots() {
        let html = render(&[GraphEvent::SelectCard("アイシクルフォール".into())], Lang::En);
        assert!(html.contains("Icicle Fall"));
        assert!(html.contains("Attack performance"));
        assert!(html.contains("distribution-strip"));
        assert!(html.contains("Top 20 co-occurrence"));
        assert!(!html.contains("detail-close"));
    }

    #[test]
    fn situational_detail_shows_reference_block() {
        let html = render(
            &[
                GraphEvent::SwitchMode(ViewMode::Situational(0)),
                GraphEvent::SelectCard("冷気の盾".into()),
            ],
            Lang::Ja,
        );
        assert!(html.contains("冷気の盾"));
        assert!(html.contains("detail-situation"));
        assert!(!html.contains("distribution-strip"));
    }
}
