use crate::i18n::{fmt_fixed, fmt_pct, t};
use lbol_stats::ranking::RankedEntry;
use lbol_stats::{Lang, RankedReport};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub report: RankedReport,
    pub lang: Lang,
    pub on_select: Callback<String>,
}

fn entry_view(
    rank: usize,
    entry: &RankedEntry,
    report: &RankedReport,
    lang: Lang,
    on_select: &Callback<String>,
) -> Html {
    let name = entry.name.clone();
    let onclick = on_select.reform(move |_: MouseEvent| name.clone());
    let medal = entry.medal.glyph();
    html! {
        <li class="report-entry" {onclick}>
            <span class="rank">{ format!("{rank}.") }</span>
            <span class="card-name">{ medal }{ entry.label(lang).to_string() }</span>
            <span class="report-value">
                { format!("{}: {}", t(report.id.value_key()), report.id.format().render(entry.value)) }
            </span>
            if let Some(stats) = entry.attention {
                <span class="attention-stats">
                    { format!(
                        "{} {} / {} {}",
                        t("adoption_rate"),
                        fmt_pct(Some(stats.adoption_rate), 1),
                        t("performance_header"),
                        fmt_fixed(stats.performance, 1),
                    ) }
                </span>
            }
        </li>
    }
}

/// One ranking, split into two columns.
#[function_component(ReportList)]
pub fn report_list(p: &Props) -> Html {
    let (left, right) = p.report.columns();
    let column = |entries: &[RankedEntry], offset: usize| {
        html! {
            <ol class="report-column" start={(offset + 1).to_string()}>
                { for entries.iter().enumerate().map(|(i, entry)| {
                    entry_view(offset + i + 1, entry, &p.report, p.lang, &p.on_select)
                }) }
            </ol>
        }
    };
    let key = p.report.id.text_key();
    html! {
        <section id={p.report.id.element_id()} class="report-section">
            <h2>{ t(&format!("{key}_title")) }</h2>
            <p class="report-desc">{ t(&format!("{key}_desc")) }</p>
            if p.report.is_empty() {
                <p class="no-data">{ t("no_data") }</p>
            } else {
                <div class="report-columns">
                    { column(left, 0) }
                    { column(right, left.len()) }
                </div>
            }
        </section>
    }
}
