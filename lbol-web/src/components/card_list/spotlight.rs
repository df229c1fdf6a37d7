use crate::i18n::t;
use lbol_stats::{AppContext, SpotlightCategory, SpotlightReport};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub ctx: AppContext,
    pub report: SpotlightReport,
    pub on_select: Callback<String>,
}

#[function_component(SpotlightPanel)]
pub fn spotlight_panel(p: &Props) -> Html {
    let group = |category: SpotlightCategory| {
        let entries = p.report.entries(category);
        if entries.is_empty() {
            return Html::default();
        }
        let key = category.text_key();
        html! {
            <div class="spotlight-group">
                <h3>{ t(&format!("{key}_title")) }</h3>
                <p class="report-desc">{ t(&format!("{key}_desc")) }</p>
                <ul>
                    { for entries.iter().map(|entry| {
                        let name = entry.name.clone();
                        let onclick = p.on_select.reform(move |_: MouseEvent| name.clone());
                        let label = p.ctx.dataset.card_display_name(&entry.name, p.ctx.lang).to_string();
                        html! {
                            <li class="report-entry" {onclick}>
                                { label }
                                if entry.top_adopted {
                                    <span class="top-adopted">{ "★" }</span>
                                }
                            </li>
                        }
                    }) }
                </ul>
            </div>
        }
    };
    html! {
        <section id="spotlight-report" class="report-section">
            <h2>{ t("spotlight_title") }</h2>
            <p class="report-note">{ t("spotlight_note") }</p>
            if p.report.is_empty() {
                <p class="no-data">{ t("no_data") }</p>
            } else {
                { for SpotlightCategory::DISPLAY_ORDER.into_iter().map(group) }
            }
        </section>
    }
}
