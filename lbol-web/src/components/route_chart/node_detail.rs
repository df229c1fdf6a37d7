use crate::components::InlineBoxplot;
use crate::i18n::{fmt_fixed, fmt_pct, t};
use lbol_stats::route::{ActionList, EncounterColumn, NodeDetail, SampleLink, ShopChoice};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub detail: NodeDetail,
}

fn sample_links(samples: &[SampleLink]) -> Html {
    html! {
        <span class="sample-links">
            { for samples.iter().map(|s| html! {
                <a href={s.url.clone()} title={s.deck.clone()} target="_blank" rel="noopener noreferrer">
                    { format!("[{}]", s.index) }
                </a>
            }) }
        </span>
    }
}

fn encounter_column(column: &EncounterColumn) -> Html {
    html! {
        <div class="encounter-column">
            <h5>{ format!("{} ({})", column.name, fmt_pct(Some(column.rate), 1)) }</h5>
            <div class="encounter-metric">
                <span>{ format!("{}: {}", t("enemy_table_avg_t"), fmt_fixed(Some(column.avg_turns), 1)) }</span>
                { for column.turns_track.clone().map(|track| html! { <InlineBoxplot {track} /> }) }
            </div>
            <div class="encounter-metric" style={format!("background-color: {};", column.hp_color)}>
                <span>{ format!("{}: {}", t("enemy_table_hp"), fmt_fixed(Some(column.hp_change), 1)) }</span>
                { for column.hp_track.clone().map(|track| html! { <InlineBoxplot {track} /> }) }
            </div>
            <div class="encounter-metric" style={format!("background-color: {};", column.p_color)}>
                <span>{ format!("{}: {}", t("enemy_table_p"), fmt_fixed(Some(column.avg_p_change), 1)) }</span>
                { for column.p_track.clone().map(|track| html! { <InlineBoxplot {track} /> }) }
            </div>
            if !column.samples.is_empty() {
                { sample_links(&column.samples) }
            }
        </div>
    }
}

fn action_list(list: &ActionList) -> Html {
    html! {
        <div class="action-list">
            <h5>{ t(&list.title_key()) }</h5>
            <ul>
                { for list.entries.iter().map(|entry| html! {
                    <li>
                        if let Some(url) = entry.wiki_url.clone() {
                            <a href={url} target="_blank" rel="noopener noreferrer">{ entry.name.clone() }</a>
                        } else {
                            { entry.name.clone() }
                        }
                        { format!(" ({})", fmt_fixed(Some(entry.count), 0)) }
                    </li>
                }) }
            </ul>
        </div>
    }
}

fn rate_row(key: &str, color: &str, rate: Option<f64>) -> Html {
    html! {
        <li>
            <span class="choice-swatch" style={format!("background-color: {color};")} />
            { format!("{}: {}", t(key), fmt_pct(rate, 1)) }
        </li>
    }
}

/// Everything known about one route node.
#[function_component(NodeDetailPanel)]
pub fn node_detail_panel(p: &Props) -> Html {
    let d = &p.detail;
    html! {
        <aside class="node-detail" id="route-node-detail">
            <h3>{ format!("Act {} / Level {}: {}", d.act, d.level, d.raw_type) }</h3>
            <p class="traversal">
                { format!(
                    "{}: {} / {} ({})",
                    t("traversal_count"),
                    fmt_fixed(Some(d.visits), 0),
                    fmt_fixed(Some(d.total_runs), 0),
                    fmt_pct(Some(d.traversal_rate()), 1),
                ) }
            </p>
            if !d.has_content() {
                <p class="no-data">{ t("no_data") }</p>
            }
            if !d.encounters.is_empty() {
                <h4>{ t("encounter_title") }</h4>
                <div class="encounter-columns">{ for d.encounters.iter().map(encounter_column) }</div>
            }
            if !d.gap_choices.is_empty() {
                <h4>{ t("choice_rates_title") }</h4>
                <ul class="choice-rates">
                    { for d.gap_choices.iter().map(|(choice, rate)| rate_row(choice.text_key(), choice.color(), Some(*rate))) }
                </ul>
            }
            if let Some(shop) = d.shop {
                <h4>{ t("choice_rates_title") }</h4>
                <ul class="choice-rates">
                    { rate_row("shop_remove_card", ShopChoice::Remove.color(), shop.remove) }
                    { rate_row("shop_upgrade_card", ShopChoice::Upgrade.color(), shop.upgrade) }
                </ul>
            }
            { for d.card_actions.iter().chain(&d.exhibit_actions).map(action_list) }
            if !d.samples.is_empty() {
                <h4>{ t("sample_decks_title") }</h4>
                { sample_links(&d.samples) }
            }
        </aside>
    }
}
