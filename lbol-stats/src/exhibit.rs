//! Exhibit adoption table with category filtering.

use serde::Serialize;

use crate::data::{CharacterDataset, ExhibitRecord};
use crate::detail::wiki_url;
use crate::text::Lang;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ExhibitCategory {
    Shining,
    General,
    StdRare,
    StdUncommon,
    StdCommon,
    Shop,
    Event,
    Other,
}

impl ExhibitCategory {
    /// Categories in display order; `General` stands for the whole
    /// standard-rarity group.
    pub const DISPLAY_ORDER: [Self; 7] = [
        Self::Shining,
        Self::General,
        Self::StdRare,
        Self::StdUncommon,
        Self::StdCommon,
        Self::Shop,
        Self::Event,
    ];

    /// Parse the upstream Japanese category label.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "光耀" => Self::Shining,
            "一般" => Self::General,
            "一般レア" => Self::StdRare,
            "一般アンコモン" => Self::StdUncommon,
            "一般コモン" => Self::StdCommon,
            "ショップ" => Self::Shop,
            "イベント" => Self::Event,
            other if other.starts_with("一般") => Self::General,
            _ => Self::Other,
        }
    }

    #[must_use]
    pub const fn is_general(self) -> bool {
        matches!(
            self,
            Self::General | Self::StdRare | Self::StdUncommon | Self::StdCommon
        )
    }

    #[must_use]
    pub const fn label(self, lang: Lang) -> &'static str {
        match (self, lang) {
            (Self::Shining, Lang::Ja) => "光耀",
            (Self::Shining, Lang::En) => "Shining",
            (Self::General, Lang::Ja) => "一般",
            (Self::General, Lang::En) => "General",
            (Self::StdRare, Lang::Ja) => "一般レア",
            (Self::StdRare, Lang::En) => "Std. Rare",
            (Self::StdUncommon, Lang::Ja) => "一般アンコモン",
            (Self::StdUncommon, Lang::En) => "Std. Uncommon",
            (Self::StdCommon, Lang::Ja) => "一般コモン",
            (Self::StdCommon, Lang::En) => "Std. Common",
            (Self::Shop, Lang::Ja) => "ショップ",
            (Self::Shop, Lang::En) => "Shop",
            (Self::Event, Lang::Ja) => "イベント",
            (Self::Event, Lang::En) => "Event",
            (Self::Other, Lang::Ja) => "その他",
            (Self::Other, Lang::En) => "Other",
        }
    }

    /// CSS class applied to the exhibit name.
    #[must_use]
    pub const fn name_class(self) -> Option<&'static str> {
        match self {
            Self::Shining => Some("exhibit-name-shining"),
            Self::StdRare => Some("exhibit-name-rare"),
            Self::StdUncommon => Some("exhibit-name-uncommon"),
            _ => None,
        }
    }

    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Shop => " 🛒",
            Self::Event => " ✨",
            _ => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ExhibitFilter {
    #[default]
    All,
    GeneralGroup,
    Category(ExhibitCategory),
}

impl ExhibitFilter {
    #[must_use]
    pub fn admits(self, category: ExhibitCategory) -> bool {
        match self {
            Self::All => true,
            Self::GeneralGroup => category.is_general(),
            Self::Category(wanted) => wanted == category,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExhibitRow {
    pub id: String,
    pub name: String,
    pub wiki_url: Option<String>,
    pub category: ExhibitCategory,
    pub adoption_rate: f64,
    /// Mana icon shown before Shining exhibits.
    pub icon: Option<String>,
}

impl ExhibitRow {
    /// Bar width as a 0–100 percentage.
    #[must_use]
    pub fn bar_width(&self) -> f64 {
        (self.adoption_rate * 100.0).clamp(0.0, 100.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExhibitTable {
    pub rows: Vec<ExhibitRow>,
    /// Filter buttons after `All`, in display order.
    pub filters: Vec<ExhibitFilter>,
}

impl ExhibitTable {
    #[must_use]
    pub fn build(dataset: &CharacterDataset, lang: Lang) -> Self {
        let mut records: Vec<&ExhibitRecord> = dataset.exhibit_data.iter().collect();
        records.sort_by(|a, b| b.adoption_rate.total_cmp(&a.adoption_rate));
        let lookups = &dataset.lookup_tables;
        let rows: Vec<ExhibitRow> = records
            .into_iter()
            .map(|record| {
                let category = ExhibitCategory::from_label(&record.display_category);
                let name = match lang {
                    Lang::Ja => record.name_ja.clone(),
                    Lang::En => record.name_en.clone(),
                };
                let icon = (category == ExhibitCategory::Shining)
                    .then(|| lookups.exhibit_mana_map.get(&record.exhibit_id))
                    .flatten()
                    .and_then(|mana| lookups.mana_icon_map.get(mana))
                    .cloned();
                ExhibitRow {
                    id: record.exhibit_id.clone(),
                    wiki_url: wiki_url(&name, lang),
                    name,
                    category,
                    adoption_rate: record.adoption_rate,
                    icon,
                }
            })
            .collect();

        let filters = ExhibitCategory::DISPLAY_ORDER
            .into_iter()
            .filter_map(|category| match category {
                ExhibitCategory::General => rows
                    .iter()
                    .any(|r| r.category.is_general())
                    .then_some(ExhibitFilter::GeneralGroup),
                _ => rows
                    .iter()
                    .any(|r| r.category == category)
                    .then_some(ExhibitFilter::Category(category)),
            })
            .collect();
        Self { rows, filters }
    }

    pub fn visible_rows(&self, filter: ExhibitFilter) -> impl Iterator<Item = &ExhibitRow> {
        self.rows.iter().filter(move |r| filter.admits(r.category))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
