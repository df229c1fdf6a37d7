use crate::components::{InlineBoxplot, select_value};
use crate::i18n::{fmt_fixed, t};
use lbol_stats::enemy::EnemyRow;
use lbol_stats::scale::BoxplotTrack;
use lbol_stats::{AppContext, EnemyTable, SortColumn, SortDirection, SortState};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub ctx: AppContext,
}

const fn sort_mark(direction: Option<SortDirection>) -> &'static str {
    match direction {
        Some(SortDirection::Ascending) => " ▲",
        Some(SortDirection::Descending) => " ▼",
        None => "",
    }
}

fn initial_character(ctx: &AppContext) -> String {
    let characters = EnemyTable::characters(&ctx.dataset);
    let own = &ctx.dataset.metadata.character;
    if characters.iter().any(|c| c == own) {
        own.clone()
    } else {
        characters.into_iter().next().unwrap_or_default()
    }
}

fn metric_cell(value: String, track: Option<&BoxplotTrack>, background: Option<String>) -> Html {
    html! {
        <td class="metric-cell" style={background.map(|c| format!("background-color: {c};"))}>
            <span class="metric-value">{ value }</span>
            { for track.map(|track| html! { <InlineBoxplot track={track.clone()} /> }) }
        </td>
    }
}

fn row_view(row: &EnemyRow) -> Html {
    html! {
        <tr class={classes!(row.row_class())}>
            <td>{ row.act }</td>
            <td>{ row.name.clone() }</td>
            <td>{ row.encounters }</td>
            { metric_cell(fmt_fixed(Some(row.avg_turns), 1), row.turns_track.as_ref(), None) }
            { metric_cell(
                fmt_fixed(Some(row.hp_change), 1),
                row.hp_track.as_ref(),
                Some(row.hp_color.to_string()),
            ) }
            { metric_cell(
                fmt_fixed(Some(row.avg_p_change), 1),
                row.p_track.as_ref(),
                Some(row.p_color.to_string()),
            ) }
        </tr>
    }
}

/// Enemy encounter table with a character selector and sortable headers.
#[function_component(EnemyTableView)]
pub fn enemy_table_view(p: &Props) -> Html {
    let character = {
        let ctx = p.ctx.clone();
        use_state(move || initial_character(&ctx))
    };
    let sort = use_state(SortState::default);

    let mut table = EnemyTable::build(&p.ctx.dataset, &character, p.ctx.lang);
    if let Some((column, direction)) = sort.active {
        table.sort(column, direction);
    }

    let on_character = {
        let character = character.clone();
        let sort = sort.clone();
        Callback::from(move |e: Event| {
            if let Some(value) = select_value(&e) {
                character.set(value);
                sort.set(SortState::default());
            }
        })
    };

    let header = |column: SortColumn| {
        let onclick = {
            let sort = sort.clone();
            Callback::from(move |_: MouseEvent| {
                let mut next = *sort;
                next.activate(column);
                sort.set(next);
            })
        };
        html! {
            <th class="sortable" {onclick}>
                { t(column.header_key()) }{ sort_mark(sort.direction_of(column)) }
            </th>
        }
    };

    html! {
        <section class="enemy-analysis">
            <h2>{ t("enemy_analysis_title") }</h2>
            <select id="enemy-char-select" onchange={on_character}>
                { for EnemyTable::characters(&p.ctx.dataset).into_iter().map(|c| {
                    let selected = c == *character;
                    html! { <option value={c.clone()} {selected}>{ c }</option> }
                }) }
            </select>
            if table.is_empty() {
                <p class="no-data">{ t("no_data") }</p>
            } else {
                <table class="enemy-table">
                    <thead>
                        <tr>{ for SortColumn::ALL.into_iter().map(header) }</tr>
                    </thead>
                    <tbody>{ for table.rows.iter().map(row_view) }</tbody>
                </table>
            }
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::context;
    use futures::executor::block_on;
    use lbol_stats::Lang;
    use yew::LocalServerRenderer;

    #[test]
    fn table_renders_rows_in_act_type_level_order() {
        let ctx = context(Lang::Ja);
        assert_eq!(initial_character(&ctx), "CirnoA");
        let html = block_on(LocalServerRenderer::<EnemyTableView>::with_props(Props { ctx }).render());
        let fairy = html.find("妖精トリオ").unwrap();
        let rumia = html.find("ルーミア").unwrap();
        let sakuya = html.find("十六夜咲夜").unwrap();
        assert!(fairy < rumia && rumia < sakuya);
        assert!(html.contains("boss-enemy"));
        assert!(html.contains("-20.5"));
        assert!(html.contains("background-color: rgba("));
    }

    #[test]
    fn sort_marks_follow_direction() {
        assert_eq!(sort_mark(Some(SortDirection::Ascending)), " ▲");
        assert_eq!(sort_mark(None), "");
    }
}
