mod report_list;
mod spotlight;

pub use report_list::ReportList;
pub use spotlight::SpotlightPanel;

use lbol_stats::{AppContext, ReportSet};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub ctx: AppContext,
    pub reports: ReportSet,
    /// Canonical name of an activated card.
    pub on_select: Callback<String>,
}

/// Spotlight groups followed by every ranking report.
#[function_component(CardListView)]
pub fn card_list_view(p: &Props) -> Html {
    html! {
        <div class="card-list">
            <SpotlightPanel
                ctx={p.ctx.clone()}
                report={p.reports.spotlight.clone()}
                on_select={p.on_select.clone()}
            />
            { for p.reports.reports.iter().map(|report| html! {
                <ReportList
                    report={report.clone()}
                    lang={p.ctx.lang}
                    on_select={p.on_select.clone()}
                />
            }) }
        </div>
    }
}
