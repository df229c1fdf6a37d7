use crate::components::select_value;
use crate::i18n::t;
use lbol_stats::data::Situation;
use lbol_stats::ViewMode;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub situations: Vec<Situation>,
    pub mode: ViewMode,
    pub on_change: Callback<ViewMode>,
}

const AGGREGATE_VALUE: &str = "agg";

fn mode_value(mode: ViewMode) -> String {
    match mode {
        ViewMode::Aggregate => AGGREGATE_VALUE.to_string(),
        ViewMode::Situational(idx) => idx.to_string(),
    }
}

fn parse_mode(value: &str) -> ViewMode {
    value
        .parse()
        .map_or(ViewMode::Aggregate, ViewMode::Situational)
}

/// Switch between the overall graph and one (act, combat type) situation.
#[function_component(ModeSwitch)]
pub fn mode_switch(p: &Props) -> Html {
    let onchange = p.on_change.reform(|e: Event| {
        select_value(&e).map_or(ViewMode::Aggregate, |v| parse_mode(&v))
    });
    let current = mode_value(p.mode);
    html! {
        <div class="mode-switch">
            <select id="view-mode" {onchange}>
                <option value={AGGREGATE_VALUE} selected={current == AGGREGATE_VALUE}>{ t("agg_view") }</option>
                if !p.situations.is_empty() {
                    <optgroup label={t("sit_view")}>
                        { for p.situations.iter().enumerate().map(|(idx, situation)| {
                            let value = idx.to_string();
                            let selected = current == value;
                            html! {
                                <option {selected} {value}>{ situation.label() }</option>
                            }
                        }) }
                    </optgroup>
                }
            </select>
        </div>
    }
}
