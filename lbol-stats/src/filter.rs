//! Filter predicate and visual-state evaluation for scatter plot points.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::constants::{
    ATTENTION_SLIDER_MIN, LABEL_BASELINE_CSS, LABEL_DARK_CSS, LABEL_FADED_CSS, LABEL_HIDDEN_CSS,
    OPACITY_BASELINE, OPACITY_FADED, OPACITY_FILTERED_OUT, OPACITY_FOCUSED, OPACITY_SYNERGY,
    OUTLINE_FOCUSED, OUTLINE_NONE, OUTLINE_SYNERGY, TENDENCY_SLIDER_MAX, TENDENCY_SLIDER_MIN,
};
use crate::data::{CardAggregateRecord, Medal, Rarity, SituationalRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RarityFilter {
    #[default]
    All,
    Exact(Rarity),
}

impl RarityFilter {
    #[must_use]
    pub fn admits(self, rarity: Rarity) -> bool {
        match self {
            Self::All => true,
            Self::Exact(wanted) => wanted == rarity,
        }
    }

    /// Parse a `<select>` value: `All` or a rarity name.
    #[must_use]
    pub fn from_value(value: &str) -> Self {
        Rarity::FILTERABLE
            .into_iter()
            .find(|r| r.name() == value)
            .map_or(Self::All, Self::Exact)
    }

    #[must_use]
    pub const fn value(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Exact(rarity) => rarity.name(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MedalFloor {
    #[default]
    All,
    Gold,
    SilverOrBetter,
    BronzeOrBetter,
    NoMedal,
}

impl MedalFloor {
    pub const ALL: [Self; 5] = [
        Self::All,
        Self::Gold,
        Self::SilverOrBetter,
        Self::BronzeOrBetter,
        Self::NoMedal,
    ];

    #[must_use]
    pub fn admits(self, medal: Medal) -> bool {
        match self {
            Self::All => true,
            Self::Gold => medal == Medal::Gold,
            Self::SilverOrBetter => medal >= Medal::Silver,
            Self::BronzeOrBetter => medal >= Medal::Bronze,
            Self::NoMedal => medal == Medal::None,
        }
    }

    /// Parse a `<select>` value; unknown values select `All`.
    #[must_use]
    pub fn from_value(value: &str) -> Self {
        match value {
            "Gold" => Self::Gold,
            "Silver" => Self::SilverOrBetter,
            "Bronze" => Self::BronzeOrBetter,
            "None" => Self::NoMedal,
            _ => Self::All,
        }
    }

    #[must_use]
    pub const fn value(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Gold => "Gold",
            Self::SilverOrBetter => "Silver",
            Self::BronzeOrBetter => "Bronze",
            Self::NoMedal => "None",
        }
    }
}

/// Inclusive tendency range; `all` makes it match everything, nulls included.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TendencyRange {
    pub min: f64,
    pub max: f64,
    pub all: bool,
}

impl Default for TendencyRange {
    fn default() -> Self {
        Self {
            min: TENDENCY_SLIDER_MIN,
            max: TENDENCY_SLIDER_MAX,
            all: true,
        }
    }
}

impl TendencyRange {
    #[must_use]
    pub const fn bounded(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            all: false,
        }
    }

    #[must_use]
    pub fn admits(&self, value: Option<f64>) -> bool {
        if self.all {
            return true;
        }
        value.is_some_and(|v| v >= self.min && v <= self.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CombineMode {
    #[default]
    And,
    Or,
}

/// State of every filter control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub rarity: RarityFilter,
    pub medal_floor: MedalFloor,
    pub attention_threshold: f64,
    pub attack_range: TendencyRange,
    pub defense_range: TendencyRange,
    pub combine: CombineMode,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            rarity: RarityFilter::All,
            medal_floor: MedalFloor::All,
            attention_threshold: ATTENTION_SLIDER_MIN,
            attack_range: TendencyRange::default(),
            defense_range: TendencyRange::default(),
            combine: CombineMode::And,
        }
    }
}

impl FilterState {
    /// Whether an aggregate record satisfies every active control.
    #[must_use]
    pub fn matches(&self, record: &CardAggregateRecord) -> bool {
        let attention_ok = record
            .attention_score
            .is_none_or(|score| score >= self.attention_threshold);
        let attack_ok = self.attack_range.admits(record.turn_tendency);
        let defense_ok = self.defense_range.admits(record.hp_tendency);
        let tendency_ok = match self.combine {
            CombineMode::And => attack_ok && defense_ok,
            CombineMode::Or => attack_ok || defense_ok,
        };
        self.rarity.admits(record.rarity)
            && self.medal_floor.admits(record.medal)
            && attention_ok
            && tendency_ok
    }
}

/// A point of the scatter plot together with the data the filter needs.
#[derive(Debug, Clone, Copy)]
pub enum PointRecord<'a> {
    Aggregate(&'a CardAggregateRecord),
    Situational {
        record: &'a SituationalRecord,
        aggregate: Option<&'a CardAggregateRecord>,
    },
}

impl PointRecord<'_> {
    /// Canonical card name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Aggregate(record) => &record.name,
            Self::Situational { record, .. } => &record.name,
        }
    }

    #[must_use]
    pub const fn aggregate(&self) -> Option<&CardAggregateRecord> {
        match self {
            Self::Aggregate(record) => Some(record),
            Self::Situational { aggregate, .. } => *aggregate,
        }
    }
}

/// Situational points are judged through their joined aggregate record; a
/// point without one always passes.
#[must_use]
pub fn filters_match(point: &PointRecord<'_>, filter: &FilterState) -> bool {
    point.aggregate().is_none_or(|record| filter.matches(record))
}

/// Hovered or pinned card plus its co-occurrence partners.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightState {
    pub hovered: Option<String>,
    pub synergy_partners: BTreeSet<String>,
}

impl HighlightState {
    #[must_use]
    pub fn focus(name: &str, partners: &[String]) -> Self {
        Self {
            hovered: Some(name.to_string()),
            synergy_partners: partners.iter().cloned().collect(),
        }
    }

    pub fn clear(&mut self) {
        self.hovered = None;
        self.synergy_partners.clear();
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.hovered.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LabelColor {
    Hidden,
    Dark,
    Faded,
    Baseline,
}

impl LabelColor {
    #[must_use]
    pub const fn css(self) -> &'static str {
        match self {
            Self::Hidden => LABEL_HIDDEN_CSS,
            Self::Dark => LABEL_DARK_CSS,
            Self::Faded => LABEL_FADED_CSS,
            Self::Baseline => LABEL_BASELINE_CSS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VisualState {
    pub opacity: f64,
    pub outline_width: u8,
    pub label_color: LabelColor,
}

impl VisualState {
    pub const FILTERED_OUT: Self = Self {
        opacity: OPACITY_FILTERED_OUT,
        outline_width: OUTLINE_NONE,
        label_color: LabelColor::Hidden,
    };
    pub const FOCUSED: Self = Self {
        opacity: OPACITY_FOCUSED,
        outline_width: OUTLINE_FOCUSED,
        label_color: LabelColor::Dark,
    };
    pub const SYNERGY: Self = Self {
        opacity: OPACITY_SYNERGY,
        outline_width: OUTLINE_SYNERGY,
        label_color: LabelColor::Dark,
    };
    pub const FADED: Self = Self {
        opacity: OPACITY_FADED,
        outline_width: OUTLINE_NONE,
        label_color: LabelColor::Faded,
    };
    pub const BASELINE: Self = Self {
        opacity: OPACITY_BASELINE,
        outline_width: OUTLINE_NONE,
        label_color: LabelColor::Baseline,
    };
}

/// Visual tier of one point. Filtering takes precedence over highlighting.
#[must_use]
pub fn evaluate(
    point: &PointRecord<'_>,
    filter: &FilterState,
    highlight: &HighlightState,
) -> VisualState {
    if !filters_match(point, filter) {
        return VisualState::FILTERED_OUT;
    }
    let Some(hovered) = highlight.hovered.as_deref() else {
        return VisualState::BASELINE;
    };
    let name = point.name();
    if name == hovered {
        VisualState::FOCUSED
    } else if highlight.synergy_partners.contains(name) {
        VisualState::SYNERGY
    } else {
        VisualState::FADED
    }
}
