//! Content of the card detail panel shown on hover, click and report
//! activation.

use serde::Serialize;
use url::Url;

use crate::constants::{
    ATTACK_TENDENCY_BAD, ATTACK_TENDENCY_GOOD, DEFENSE_TENDENCY_BAD, DEFENSE_TENDENCY_GOOD,
    TENDENCY_STAR_STRONG, TENDENCY_STAR_WEAK, WIKI_BASE_EN, WIKI_BASE_JA,
};
use crate::data::{CardAggregateRecord, CardType, Medal, Rarity, Situation, SituationalRecord};
use crate::filter::PointRecord;
use crate::scale::DistributionAxis;
use crate::text::Lang;

const TURN_PLOT_COLOR: &str = "#E57373";
const HP_PLOT_COLOR: &str = "#64B5F6";

/// Wiki page for a card or exhibit name.
///
/// English pages use underscores for spaces.
#[must_use]
pub fn wiki_url(name: &str, lang: Lang) -> Option<String> {
    if name.trim().is_empty() {
        return None;
    }
    let (base, page) = match lang {
        Lang::Ja => (WIKI_BASE_JA, name.to_string()),
        Lang::En => (WIKI_BASE_EN, name.replace(' ', "_")),
    };
    let mut url = Url::parse(base).ok()?;
    url.path_segments_mut().ok()?.pop_if_empty().push(&page);
    Some(url.into())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tone {
    Good,
    Bad,
    Neutral,
}

impl Tone {
    #[must_use]
    pub const fn css(self) -> &'static str {
        match self {
            Self::Good => "#2ca02c",
            Self::Bad => "#d62728",
            Self::Neutral => "#333",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TendencyCell {
    pub value: Option<f64>,
    pub tone: Tone,
    pub mark: &'static str,
}

impl TendencyCell {
    fn new(value: Option<f64>, good: f64, bad: f64) -> Self {
        let v = value.unwrap_or(0.0);
        let tone = if v > good {
            Tone::Good
        } else if v < bad {
            Tone::Bad
        } else {
            Tone::Neutral
        };
        let mark = if v > TENDENCY_STAR_STRONG {
            "⭐"
        } else if v > TENDENCY_STAR_WEAK {
            "☆"
        } else {
            ""
        };
        Self { value, tone, mark }
    }

    #[must_use]
    pub fn attack(value: Option<f64>) -> Self {
        Self::new(value, ATTACK_TENDENCY_GOOD, ATTACK_TENDENCY_BAD)
    }

    #[must_use]
    pub fn defense(value: Option<f64>) -> Self {
        Self::new(value, DEFENSE_TENDENCY_GOOD, DEFENSE_TENDENCY_BAD)
    }
}

/// Horizontal box plot of per-situation deviation values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionPlot {
    pub values: Vec<f64>,
    pub color: &'static str,
    pub highlight: Option<f64>,
    pub axis: DistributionAxis,
}

impl DistributionPlot {
    fn deviation(values: &[f64], color: &'static str, highlight: Option<f64>) -> Self {
        Self {
            values: values.to_vec(),
            color,
            highlight,
            axis: DistributionAxis::deviation(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Aggregate figures shared by both views.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverallStats {
    pub adoption_rate: f64,
    pub attention: Option<f64>,
    pub stability: Option<f64>,
}

impl OverallStats {
    fn of(record: &CardAggregateRecord) -> Self {
        Self {
            adoption_rate: record.adoption_rate,
            attention: record.attention_score,
            stability: record.stability_score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateDetail {
    pub turn_deviation: Option<f64>,
    pub hp_deviation: Option<f64>,
    pub turn_plot: DistributionPlot,
    pub hp_plot: DistributionPlot,
    pub attack_tendency: TendencyCell,
    pub defense_tendency: TendencyCell,
    pub overall: OverallStats,
    pub avg_copies: Option<f64>,
    pub avg_upgrade_rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SituationalDetail {
    pub situation: Situation,
    pub turn_deviation: Option<f64>,
    pub hp_deviation: Option<f64>,
    /// `None` when the situation has no recorded fights.
    pub adoption_rate: Option<f64>,
    pub fights_with: f64,
    /// Aggregate figures, shown as secondary reference.
    pub reference: Option<OverallStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DetailBody {
    Aggregate(AggregateDetail),
    Situational(SituationalDetail),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    /// Canonical card name.
    pub name: String,
    pub label: String,
    pub wiki_url: Option<String>,
    pub card_type: CardType,
    pub rarity: Option<Rarity>,
    pub medal: Medal,
    pub highlights: Vec<String>,
    pub body: DetailBody,
    /// Co-occurrence lines; empty means "no data".
    pub co_occurrence: Vec<String>,
}

fn split_lines(text: Option<&str>) -> Vec<String> {
    text.map(|t| {
        t.split("<br>")
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

impl DetailView {
    #[must_use]
    pub fn build(point: &PointRecord<'_>, lang: Lang) -> Self {
        match point {
            PointRecord::Aggregate(record) => Self::aggregate(record, lang),
            PointRecord::Situational { record, aggregate } => {
                Self::situational(record, *aggregate, lang)
            }
        }
    }

    fn aggregate(record: &CardAggregateRecord, lang: Lang) -> Self {
        let label = record.display_name(lang).to_string();
        Self {
            name: record.name.clone(),
            wiki_url: wiki_url(&label, lang),
            label,
            card_type: record.card_type,
            rarity: Some(record.rarity),
            medal: record.medal,
            highlights: highlight_lines(record, lang),
            body: DetailBody::Aggregate(AggregateDetail {
                turn_deviation: record.turn_deviation,
                hp_deviation: record.hp_deviation,
                turn_plot: DistributionPlot::deviation(
                    &record.turn_situational_values,
                    TURN_PLOT_COLOR,
                    record.turn_deviation,
                ),
                hp_plot: DistributionPlot::deviation(
                    &record.hp_situational_values,
                    HP_PLOT_COLOR,
                    record.hp_deviation,
                ),
                attack_tendency: TendencyCell::attack(record.turn_tendency),
                defense_tendency: TendencyCell::defense(record.hp_tendency),
                overall: OverallStats::of(record),
                avg_copies: record.avg_copies,
                avg_upgrade_rate: record.avg_upgrade_rate,
            }),
            co_occurrence: split_lines(record.co_occurrence(lang)),
        }
    }

    fn situational(
        record: &SituationalRecord,
        aggregate: Option<&CardAggregateRecord>,
        lang: Lang,
    ) -> Self {
        let label = record.display_name(lang).to_string();
        Self {
            name: record.name.clone(),
            wiki_url: wiki_url(&label, lang),
            label,
            card_type: record.card_type,
            rarity: aggregate.map(|a| a.rarity),
            medal: aggregate.map_or(Medal::None, |a| a.medal),
            highlights: aggregate.map(|a| highlight_lines(a, lang)).unwrap_or_default(),
            body: DetailBody::Situational(SituationalDetail {
                situation: record.situation(),
                turn_deviation: record.turn_deviation,
                hp_deviation: record.hp_deviation,
                adoption_rate: record.adoption_rate(),
                fights_with: record.fights_with,
                reference: aggregate.map(OverallStats::of),
            }),
            co_occurrence: split_lines(record.co_occurrence(lang)),
        }
    }
}

fn highlight_lines(record: &CardAggregateRecord, lang: Lang) -> Vec<String> {
    record
        .highlights
        .iter()
        .map(|h| h.text(lang))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
