use crate::i18n::{fmt_pct, t};
use lbol_stats::exhibit::ExhibitRow;
use lbol_stats::{AppContext, ExhibitCategory, ExhibitFilter, ExhibitTable, Lang};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub ctx: AppContext,
}

fn filter_label(filter: ExhibitFilter, lang: Lang) -> String {
    match filter {
        ExhibitFilter::All => t("filter_all"),
        ExhibitFilter::GeneralGroup => ExhibitCategory::General.label(lang).to_string(),
        ExhibitFilter::Category(category) => category.label(lang).to_string(),
    }
}

fn row_view(row: &ExhibitRow) -> Html {
    let name = html! {
        <span class={classes!("exhibit-name", row.category.name_class())}>
            { row.icon.clone().unwrap_or_default() }{ row.name.clone() }{ row.category.suffix() }
        </span>
    };
    html! {
        <tr>
            <td>
                if let Some(url) = row.wiki_url.clone() {
                    <a href={url} target="_blank" rel="noopener noreferrer">{ name }</a>
                } else {
                    { name }
                }
            </td>
            <td class="adoption-cell">
                <div class="adoption-bar" style={format!("width: {:.1}%;", row.bar_width())} />
                <span>{ fmt_pct(Some(row.adoption_rate), 1) }</span>
            </td>
        </tr>
    }
}

/// Exhibit adoption rates with category filter buttons.
#[function_component(ExhibitTableView)]
pub fn exhibit_table_view(p: &Props) -> Html {
    let filter = use_state(ExhibitFilter::default);
    let table = ExhibitTable::build(&p.ctx.dataset, p.ctx.lang);
    let lang = p.ctx.lang;

    let buttons = std::iter::once(ExhibitFilter::All)
        .chain(table.filters.iter().copied())
        .map(|option| {
            let onclick = {
                let filter = filter.clone();
                Callback::from(move |_: MouseEvent| filter.set(option))
            };
            html! {
                <button class={classes!("filter-button", (option == *filter).then_some("active"))} {onclick}>
                    { filter_label(option, lang) }
                </button>
            }
        });

    html! {
        <section class="exhibit-analysis">
            <h2>{ t("exhibit_section_title") }</h2>
            if table.is_empty() {
                <p class="no-data">{ t("no_data") }</p>
            } else {
                <div class="exhibit-filters">{ for buttons }</div>
                <table class="exhibit-table">
                    <thead>
                        <tr>
                            <th>{ t("exhibit_name") }</th>
                            <th>{ t("adoption_rate") }</th>
                        </tr>
                    </thead>
                    <tbody>{ for table.visible_rows(*filter).map(row_view) }</tbody>
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
    use yew::LocalServerRenderer;

    #[test]
    fn table_lists_exhibits_with_filters() {
        let ctx = context(Lang::En);
        let html = block_on(LocalServerRenderer::<ExhibitTableView>::with_props(Props { ctx }).render());
        assert!(html.contains("Exhibit Adoption"));
        assert!(html.contains("Shining"));
        assert!(html.contains("General"));
        assert!(html.contains("🔵"));
        assert!(html.contains("filter-button active"));
    }

    #[test]
    fn filter_labels_use_category_names() {
        assert_eq!(filter_label(ExhibitFilter::GeneralGroup, Lang::Ja), "一般");
        assert_eq!(
            filter_label(ExhibitFilter::Category(ExhibitCategory::Shop), Lang::En),
            "Shop"
        );
    }
}
