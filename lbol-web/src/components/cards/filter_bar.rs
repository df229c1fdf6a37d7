use crate::components::{input_checked, input_number, select_value};
use crate::i18n::{fmt_fixed, t};
use lbol_stats::constants::{
    ATTENTION_SLIDER_MAX, ATTENTION_SLIDER_MIN, TENDENCY_SLIDER_MAX, TENDENCY_SLIDER_MIN,
    TENDENCY_SLIDER_STEP,
};
use lbol_stats::data::Rarity;
use lbol_stats::filter::{CombineMode, MedalFloor, RarityFilter, TendencyRange};
use lbol_stats::FilterState;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub filter: FilterState,
    pub on_change: Callback<FilterState>,
    #[prop_or_default]
    pub initially_open: bool,
}

const fn medal_key(floor: MedalFloor) -> &'static str {
    match floor {
        MedalFloor::All => "medal_filter_all",
        MedalFloor::Gold => "medal_filter_gold",
        MedalFloor::SilverOrBetter => "medal_filter_silver",
        MedalFloor::BronzeOrBetter => "medal_filter_bronze",
        MedalFloor::NoMedal => "medal_filter_none",
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Axis {
    Attack,
    Defense,
}

impl Axis {
    const fn id(self) -> &'static str {
        match self {
            Self::Attack => "atk",
            Self::Defense => "def",
        }
    }

    const fn label_key(self) -> &'static str {
        match self {
            Self::Attack => "atk_tendency_filter_label",
            Self::Defense => "def_tendency_filter_label",
        }
    }

    fn range(self, filter: &FilterState) -> TendencyRange {
        match self {
            Self::Attack => filter.attack_range,
            Self::Defense => filter.defense_range,
        }
    }

    fn with_range(self, filter: &FilterState, range: TendencyRange) -> FilterState {
        let mut next = filter.clone();
        match self {
            Self::Attack => next.attack_range = range,
            Self::Defense => next.defense_range = range,
        }
        next
    }
}

/// Keep `min <= max` after one end of a range moved.
fn adjust_range(range: TendencyRange, value: f64, is_min: bool) -> TendencyRange {
    let value = value.clamp(TENDENCY_SLIDER_MIN, TENDENCY_SLIDER_MAX);
    let (min, max) = if is_min {
        (value, range.max.max(value))
    } else {
        (range.min.min(value), value)
    };
    TendencyRange {
        min,
        max,
        all: range.all,
    }
}

fn tendency_control(axis: Axis, p: &Props) -> Html {
    let range = axis.range(&p.filter);
    let slider = |is_min: bool| {
        let filter = p.filter.clone();
        let on_change = p.on_change.clone();
        let oninput = Callback::from(move |e: InputEvent| {
            if let Some(v) = input_number(&e) {
                let next = adjust_range(axis.range(&filter), v, is_min);
                on_change.emit(axis.with_range(&filter, next));
            }
        });
        html! {
            <input
                type="range"
                id={format!("{}-{}", axis.id(), if is_min { "min" } else { "max" })}
                min={TENDENCY_SLIDER_MIN.to_string()}
                max={TENDENCY_SLIDER_MAX.to_string()}
                step={TENDENCY_SLIDER_STEP.to_string()}
                value={(if is_min { range.min } else { range.max }).to_string()}
                disabled={range.all}
                {oninput}
            />
        }
    };
    let on_all = {
        let filter = p.filter.clone();
        let on_change = p.on_change.clone();
        Callback::from(move |e: Event| {
            if let Some(all) = input_checked(&e) {
                let range = TendencyRange {
                    all,
                    ..axis.range(&filter)
                };
                on_change.emit(axis.with_range(&filter, range));
            }
        })
    };
    html! {
        <div class="filter-group tendency-filter">
            <span class="filter-label">{ t(axis.label_key()) }</span>
            <label>
                <input type="checkbox" checked={range.all} onchange={on_all} />
                { t("tendency_all") }
            </label>
            { slider(true) }
            { slider(false) }
            <span class="range-value">
                { format!("{} ~ {}", fmt_fixed(Some(range.min), 2), fmt_fixed(Some(range.max), 2)) }
            </span>
        </div>
    }
}

/// Collapsible filter controls for the card graph.
#[function_component(FilterBar)]
pub fn filter_bar(p: &Props) -> Html {
    let open = {
        let initially_open = p.initially_open;
        use_state(move || initially_open)
    };
    let toggle = {
        let open = open.clone();
        Callback::from(move |_: MouseEvent| open.set(!*open))
    };
    let update = |apply: fn(&mut FilterState, &str)| {
        let filter = p.filter.clone();
        let on_change = p.on_change.clone();
        Callback::from(move |e: Event| {
            if let Some(value) = select_value(&e) {
                let mut next = filter.clone();
                apply(&mut next, &value);
                on_change.emit(next);
            }
        })
    };
    let on_rarity = update(|f, v| f.rarity = RarityFilter::from_value(v));
    let on_medal = update(|f, v| f.medal_floor = MedalFloor::from_value(v));
    let on_combine = update(|f, v| {
        f.combine = if v == "or" {
            CombineMode::Or
        } else {
            CombineMode::And
        };
    });
    let on_attention = {
        let filter = p.filter.clone();
        let on_change = p.on_change.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(v) = input_number(&e) {
                on_change.emit(FilterState {
                    attention_threshold: v.clamp(ATTENTION_SLIDER_MIN, ATTENTION_SLIDER_MAX),
                    ..filter.clone()
                });
            }
        })
    };
    let filter = &p.filter;

    html! {
        <div class={classes!("filter-bar", open.then_some("open"))}>
            <button class="filter-toggle" onclick={toggle}>
                { t(if *open { "close_filters" } else { "open_filters" }) }
            </button>
            if *open {
                <div class="filter-controls">
                    <div class="filter-group">
                        <label for="rarity-filter">{ t("rarity") }</label>
                        <select id="rarity-filter" onchange={on_rarity}>
                            <option value="All" selected={filter.rarity == RarityFilter::All}>{ t("filter_all") }</option>
                            { for Rarity::FILTERABLE.into_iter().map(|r| html! {
                                <option value={r.name()} selected={filter.rarity == RarityFilter::Exact(r)}>{ r.name() }</option>
                            }) }
                        </select>
                    </div>
                    <div class="filter-group">
                        <label for="medal-filter">{ t("medal_filter_label") }</label>
                        <select id="medal-filter" onchange={on_medal}>
                            { for MedalFloor::ALL.into_iter().map(|m| html! {
                                <option value={m.value()} selected={filter.medal_floor == m}>{ t(medal_key(m)) }</option>
                            }) }
                        </select>
                    </div>
                    <div class="filter-group">
                        <label for="attention-filter">
                            { format!("{} ≥ {}", t("attention_score_label"), fmt_fixed(Some(filter.attention_threshold), 0)) }
                        </label>
                        <input
                            type="range"
                            id="attention-filter"
                            min={ATTENTION_SLIDER_MIN.to_string()}
                            max={ATTENTION_SLIDER_MAX.to_string()}
                            step="1"
                            value={filter.attention_threshold.to_string()}
                            oninput={on_attention}
                        />
                    </div>
                    { tendency_control(Axis::Attack, p) }
                    { tendency_control(Axis::Defense, p) }
                    <div class="filter-group">
                        <select id="tendency-combine" onchange={on_combine}>
                            <option value="and" selected={filter.combine == CombineMode::And}>{ t("tendency_condition_and") }</option>
                            <option value="or" selected={filter.combine == CombineMode::Or}>{ t("tendency_condition_or") }</option>
                        </select>
                    </div>
                </div>
            }
        </div>
    }
}
