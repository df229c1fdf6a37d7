pub mod boxplot;
pub mod card_list;
pub mod cards;
pub mod enemy_table;
pub mod error_overlay;
pub mod exhibit_table;
pub mod header;
pub mod route_chart;
pub mod tabs;

pub use boxplot::InlineBoxplot;
pub use card_list::CardListView;
pub use cards::CardsView;
pub use enemy_table::EnemyTableView;
pub use error_overlay::ErrorOverlay;
pub use exhibit_table::ExhibitTableView;
pub use header::Header;
pub use route_chart::RouteChart;
pub use tabs::{Tab, TabBar};

use web_sys::{Event, HtmlInputElement, HtmlSelectElement};
use yew::html::TargetCast;

/// Current value of the `<select>` that fired `e`.
pub(crate) fn select_value(e: &Event) -> Option<String> {
    e.target_dyn_into::<HtmlSelectElement>().map(|el| el.value())
}

/// Current numeric value of the `<input>` that fired `e`.
pub(crate) fn input_number(e: &Event) -> Option<f64> {
    e.target_dyn_into::<HtmlInputElement>()
        .map(|el| el.value_as_number())
        .filter(|v| v.is_finite())
}

/// Checked state of the checkbox that fired `e`.
pub(crate) fn input_checked(e: &Event) -> Option<bool> {
    e.target_dyn_into::<HtmlInputElement>().map(|el| el.checked())
}
