use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};

use crate::error::DataError;
use crate::text::Lang;

/// Card type as reported by the upstream aggregation.
///
/// Declaration order is the series order used by the scatter plot.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(from = "Option<String>")]
pub enum CardType {
    Attack,
    Defense,
    Skill,
    Ability,
    Friend,
    Tool,
    #[default]
    Unknown,
    Misfortune,
}

impl CardType {
    pub const ALL: [Self; 8] = [
        Self::Attack,
        Self::Defense,
        Self::Skill,
        Self::Ability,
        Self::Friend,
        Self::Tool,
        Self::Unknown,
        Self::Misfortune,
    ];

    /// Marker color for the series of this type.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Attack => "#E57373",
            Self::Defense => "#FFD54F",
            Self::Skill => "#64B5F6",
            Self::Ability => "#81C784",
            Self::Friend => "#BA68C8",
            Self::Tool => "#FFB0CA",
            Self::Unknown => "#BDBDBD",
            Self::Misfortune => "#757575",
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Attack => "Attack",
            Self::Defense => "Defense",
            Self::Skill => "Skill",
            Self::Ability => "Ability",
            Self::Friend => "Friend",
            Self::Tool => "Tool",
            Self::Unknown => "Unknown",
            Self::Misfortune => "Misfortune",
        }
    }
}

impl From<String> for CardType {
    fn from(value: String) -> Self {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == value)
            .unwrap_or(Self::Unknown)
    }
}

impl From<Option<String>> for CardType {
    fn from(value: Option<String>) -> Self {
        value.map(Self::from).unwrap_or_default()
    }
}

/// Card rarity; anything outside the three filterable tiers is `Other`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(from = "Option<String>")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    #[default]
    Other,
}

impl Rarity {
    pub const FILTERABLE: [Self; 3] = [Self::Common, Self::Uncommon, Self::Rare];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Common => "Common",
            Self::Uncommon => "Uncommon",
            Self::Rare => "Rare",
            Self::Other => "Other",
        }
    }
}

impl From<String> for Rarity {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Common" => Self::Common,
            "Uncommon" => Self::Uncommon,
            "Rare" => Self::Rare,
            _ => Self::Other,
        }
    }
}

impl From<Option<String>> for Rarity {
    fn from(value: Option<String>) -> Self {
        value.map(Self::from).unwrap_or_default()
    }
}

/// Highlight medal, ordered `None < Bronze < Silver < Gold`.
///
/// Upstream encodes medals as emoji glyphs, with an empty string or null
/// for cards without one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Medal {
    #[default]
    None,
    Bronze,
    Silver,
    Gold,
}

impl Medal {
    #[must_use]
    pub fn from_glyph(glyph: &str) -> Self {
        match glyph.trim() {
            "🥇" | "Gold" => Self::Gold,
            "🥈" | "Silver" => Self::Silver,
            "🥉" | "Bronze" => Self::Bronze,
            _ => Self::None,
        }
    }

    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Bronze => "🥉",
            Self::Silver => "🥈",
            Self::Gold => "🥇",
        }
    }

    #[must_use]
    pub const fn is_awarded(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl Serialize for Medal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.glyph())
    }
}

impl<'de> Deserialize<'de> for Medal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let glyph = Option::<String>::deserialize(deserializer)?;
        Ok(glyph.as_deref().map_or(Self::None, Self::from_glyph))
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum CombatType {
    #[default]
    Enemy,
    EliteEnemy,
    Boss,
}

impl CombatType {
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Enemy" => Some(Self::Enemy),
            "EliteEnemy" => Some(Self::EliteEnemy),
            "Boss" => Some(Self::Boss),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Enemy => "Enemy",
            Self::EliteEnemy => "EliteEnemy",
            Self::Boss => "Boss",
        }
    }
}

/// One (act, combat type) pair of the situational breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "SituationRepr", into = "(u8, CombatType)")]
pub struct Situation {
    pub act: u8,
    pub combat_type: CombatType,
}

impl Situation {
    #[must_use]
    pub const fn new(act: u8, combat_type: CombatType) -> Self {
        Self { act, combat_type }
    }

    /// Parse labels of the form `Act 3 - Boss` (the space after `Act` is optional).
    #[must_use]
    pub fn parse_label(label: &str) -> Option<Self> {
        let rest = label.trim().strip_prefix("Act")?.trim_start();
        let (act, combat) = rest.split_once('-')?;
        let act = act.trim().parse().ok()?;
        let combat_type = CombatType::from_name(combat.trim())?;
        Some(Self::new(act, combat_type))
    }

    #[must_use]
    pub fn label(&self) -> String {
        format!("Act{} - {}", self.act, self.combat_type.name())
    }
}

impl From<Situation> for (u8, CombatType) {
    fn from(situation: Situation) -> Self {
        (situation.act, situation.combat_type)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SituationRepr {
    Pair(u8, CombatType),
    Label(String),
}

impl TryFrom<SituationRepr> for Situation {
    type Error = String;

    fn try_from(repr: SituationRepr) -> Result<Self, Self::Error> {
        match repr {
            SituationRepr::Pair(act, combat_type) => Ok(Self::new(act, combat_type)),
            SituationRepr::Label(label) => {
                Self::parse_label(&label).ok_or_else(|| format!("invalid situation `{label}`"))
            }
        }
    }
}

/// A situation where a card performed notably well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    pub act: u8,
    pub combat_type: CombatType,
    #[serde(default)]
    pub ja: String,
    #[serde(default)]
    pub en: String,
}

impl Highlight {
    #[must_use]
    pub const fn situation(&self) -> Situation {
        Situation::new(self.act, self.combat_type)
    }

    #[must_use]
    pub fn text(&self, lang: Lang) -> &str {
        match lang {
            Lang::Ja => &self.ja,
            Lang::En => &self.en,
        }
    }
}

/// Rebuild structured highlights from the `<br>`-joined hover strings.
///
/// Lines that do not start with a situation label are skipped.
#[must_use]
pub fn highlights_from_hover(ja: &str, en: &str) -> Vec<Highlight> {
    let en_lines: Vec<&str> = split_hover(en).collect();
    split_hover(ja)
        .enumerate()
        .filter_map(|(idx, line)| {
            let label = line.split(" (").next().unwrap_or(line);
            let situation = Situation::parse_label(label)?;
            Some(Highlight {
                act: situation.act,
                combat_type: situation.combat_type,
                ja: line.to_string(),
                en: en_lines.get(idx).map_or_else(|| line.to_string(), |s| (*s).to_string()),
            })
        })
        .collect()
}

fn split_hover(text: &str) -> impl Iterator<Item = &str> {
    text.split("<br>").map(str::trim).filter(|line| !line.is_empty())
}

/// Distribution summary rendered as a boxplot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxplotSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub mean: f64,
}

impl BoxplotSummary {
    #[must_use]
    pub const fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Mirror the summary around zero (quartiles swap sides).
    #[must_use]
    pub fn negated(&self) -> Self {
        Self {
            min: -self.max,
            q1: -self.q3,
            median: -self.median,
            q3: -self.q1,
            max: -self.min,
            mean: -self.mean,
        }
    }
}

/// Flattened per-axis spread columns of the aggregate record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviationSpread {
    #[serde(rename = "Turn_Min", default)]
    pub turn_min: Option<f64>,
    #[serde(rename = "Turn_Q1", default)]
    pub turn_q1: Option<f64>,
    #[serde(rename = "Turn_Median", default)]
    pub turn_median: Option<f64>,
    #[serde(rename = "Turn_Q3", default)]
    pub turn_q3: Option<f64>,
    #[serde(rename = "Turn_Max", default)]
    pub turn_max: Option<f64>,
    #[serde(rename = "HP_Min", default)]
    pub hp_min: Option<f64>,
    #[serde(rename = "HP_Q1", default)]
    pub hp_q1: Option<f64>,
    #[serde(rename = "HP_Median", default)]
    pub hp_median: Option<f64>,
    #[serde(rename = "HP_Q3", default)]
    pub hp_q3: Option<f64>,
    #[serde(rename = "HP_Max", default)]
    pub hp_max: Option<f64>,
}

/// Per-act deviation means.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActPerformance {
    #[serde(rename = "Turn_Act_1", default)]
    pub turn_act_1: Option<f64>,
    #[serde(rename = "Turn_Act_2", default)]
    pub turn_act_2: Option<f64>,
    #[serde(rename = "Turn_Act_3", default)]
    pub turn_act_3: Option<f64>,
    #[serde(rename = "Turn_Act_4", default)]
    pub turn_act_4: Option<f64>,
    #[serde(rename = "HP_Act_1", default)]
    pub hp_act_1: Option<f64>,
    #[serde(rename = "HP_Act_2", default)]
    pub hp_act_2: Option<f64>,
    #[serde(rename = "HP_Act_3", default)]
    pub hp_act_3: Option<f64>,
    #[serde(rename = "HP_Act_4", default)]
    pub hp_act_4: Option<f64>,
}

impl ActPerformance {
    /// `(turn, hp)` means for an act in `1..=4`.
    #[must_use]
    pub const fn for_act(&self, act: u8) -> (Option<f64>, Option<f64>) {
        match act {
            1 => (self.turn_act_1, self.hp_act_1),
            2 => (self.turn_act_2, self.hp_act_2),
            3 => (self.turn_act_3, self.hp_act_3),
            4 => (self.turn_act_4, self.hp_act_4),
            _ => (None, None),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Aggregate statistics for one card of one character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardAggregateRecord {
    #[serde(rename = "Card_Name")]
    pub name: String,
    #[serde(rename = "Card_Name_EN", default, deserialize_with = "null_as_default")]
    pub name_en: String,
    #[serde(rename = "Card_ID", default)]
    pub card_id: Option<String>,
    #[serde(rename = "Type", default)]
    pub card_type: CardType,
    #[serde(rename = "Rarity", default)]
    pub rarity: Rarity,
    #[serde(rename = "Medal", default)]
    pub medal: Medal,
    #[serde(rename = "Adoption_Rate", default, deserialize_with = "null_as_default")]
    pub adoption_rate: f64,
    #[serde(rename = "Attention_Score", default)]
    pub attention_score: Option<f64>,
    #[serde(rename = "Stability_Score", default)]
    pub stability_score: Option<f64>,
    #[serde(rename = "Weighted_Avg_Turn_Deviation", default)]
    pub turn_deviation: Option<f64>,
    #[serde(rename = "Weighted_Avg_HP_Deviation", default)]
    pub hp_deviation: Option<f64>,
    #[serde(rename = "Turn_Tendency", default)]
    pub turn_tendency: Option<f64>,
    #[serde(rename = "HP_Tendency", default)]
    pub hp_tendency: Option<f64>,
    #[serde(flatten)]
    pub spread: DeviationSpread,
    #[serde(flatten)]
    pub acts: ActPerformance,
    #[serde(
        rename = "Turn_Deviation_Situational_Values",
        default,
        deserialize_with = "null_as_default"
    )]
    pub turn_situational_values: Vec<f64>,
    #[serde(
        rename = "HP_Deviation_Situational_Values",
        default,
        deserialize_with = "null_as_default"
    )]
    pub hp_situational_values: Vec<f64>,
    #[serde(rename = "Total_Fights_With", default, deserialize_with = "null_as_default")]
    pub total_fights_with: f64,
    #[serde(rename = "Avg_Copies", default)]
    pub avg_copies: Option<f64>,
    #[serde(rename = "Avg_Upgrade_Rate", default)]
    pub avg_upgrade_rate: Option<f64>,
    #[serde(rename = "Co_occurrence_Partners", default, deserialize_with = "null_as_default")]
    pub partners: Vec<String>,
    #[serde(
        rename = "Co_occurrence_Partners_EN",
        default,
        deserialize_with = "null_as_default"
    )]
    pub partners_en: Vec<String>,
    #[serde(rename = "Top_20_Co_occurrence", default)]
    pub co_occurrence_ja: Option<String>,
    #[serde(rename = "Top_20_Co_occurrence_EN", default)]
    pub co_occurrence_en: Option<String>,
    #[serde(rename = "Highlights", default, deserialize_with = "null_as_default")]
    pub highlights: Vec<Highlight>,
    #[serde(rename = "Highlights_JA_Hover", default, deserialize_with = "null_as_default")]
    pub highlights_ja_hover: String,
    #[serde(rename = "Highlights_EN_Hover", default, deserialize_with = "null_as_default")]
    pub highlights_en_hover: String,
}

impl CardAggregateRecord {
    #[must_use]
    pub fn display_name(&self, lang: Lang) -> &str {
        match lang {
            Lang::En if !self.name_en.is_empty() => &self.name_en,
            _ => &self.name,
        }
    }

    /// Deviation scores are only comparable when both tendencies exist.
    #[must_use]
    pub const fn is_rankable(&self) -> bool {
        self.turn_tendency.is_some() && self.hp_tendency.is_some()
    }

    #[must_use]
    pub fn deviation_sum(&self) -> Option<f64> {
        Some(self.turn_deviation? + self.hp_deviation?)
    }

    #[must_use]
    pub fn turn_summary(&self) -> Option<BoxplotSummary> {
        let s = &self.spread;
        Some(BoxplotSummary {
            min: s.turn_min?,
            q1: s.turn_q1?,
            median: s.turn_median?,
            q3: s.turn_q3?,
            max: s.turn_max?,
            mean: self.turn_deviation?,
        })
    }

    #[must_use]
    pub fn hp_summary(&self) -> Option<BoxplotSummary> {
        let s = &self.spread;
        Some(BoxplotSummary {
            min: s.hp_min?,
            q1: s.hp_q1?,
            median: s.hp_median?,
            q3: s.hp_q3?,
            max: s.hp_max?,
            mean: self.hp_deviation?,
        })
    }

    #[must_use]
    pub fn co_occurrence(&self, lang: Lang) -> Option<&str> {
        let text = match lang {
            Lang::Ja => self.co_occurrence_ja.as_deref(),
            Lang::En => self.co_occurrence_en.as_deref(),
        };
        text.filter(|t| !t.trim().is_empty())
    }
}

/// Statistics for one card in one (act, combat type) situation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SituationalRecord {
    #[serde(rename = "Card_Name")]
    pub name: String,
    #[serde(rename = "Card_Name_EN", default, deserialize_with = "null_as_default")]
    pub name_en: String,
    #[serde(rename = "Type", default)]
    pub card_type: CardType,
    #[serde(rename = "Act")]
    pub act: u8,
    #[serde(rename = "Combat_Type")]
    pub combat_type: CombatType,
    #[serde(rename = "IsStarter", default, deserialize_with = "null_as_default")]
    pub is_starter: bool,
    #[serde(rename = "Turn_Deviation", default)]
    pub turn_deviation: Option<f64>,
    #[serde(rename = "HP_Deviation", default)]
    pub hp_deviation: Option<f64>,
    #[serde(rename = "Fights_With", default, deserialize_with = "null_as_default")]
    pub fights_with: f64,
    #[serde(
        rename = "Total_Fights_In_Situation",
        default,
        deserialize_with = "null_as_default"
    )]
    pub total_fights_in_situation: f64,
    #[serde(rename = "Situational_Co_occurrence_JA", default)]
    pub co_occurrence_ja: Option<String>,
    #[serde(rename = "Situational_Co_occurrence_EN", default)]
    pub co_occurrence_en: Option<String>,
}

impl SituationalRecord {
    #[must_use]
    pub const fn situation(&self) -> Situation {
        Situation::new(self.act, self.combat_type)
    }

    #[must_use]
    pub fn display_name(&self, lang: Lang) -> &str {
        match lang {
            Lang::En if !self.name_en.is_empty() => &self.name_en,
            _ => &self.name,
        }
    }

    /// Share of fights in this situation that included the card.
    #[must_use]
    pub fn adoption_rate(&self) -> Option<f64> {
        (self.total_fights_in_situation > 0.0)
            .then(|| self.fights_with / self.total_fights_in_situation)
    }

    #[must_use]
    pub fn co_occurrence(&self, lang: Lang) -> Option<&str> {
        let text = match lang {
            Lang::Ja => self.co_occurrence_ja.as_deref(),
            Lang::En => self.co_occurrence_en.as_deref(),
        };
        text.filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub character: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ordered_situations: Vec<Situation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedName {
    #[serde(rename = "JA", default, deserialize_with = "null_as_default")]
    pub ja: String,
    #[serde(rename = "EN", default, deserialize_with = "null_as_default")]
    pub en: String,
}

impl LocalizedName {
    #[must_use]
    pub fn get(&self, lang: Lang) -> &str {
        match lang {
            Lang::Ja => &self.ja,
            Lang::En => &self.en,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupTables {
    #[serde(default)]
    pub cards: BTreeMap<String, LocalizedName>,
    #[serde(default)]
    pub exhibits: BTreeMap<String, LocalizedName>,
    #[serde(default)]
    pub exhibit_mana_map: BTreeMap<String, String>,
    #[serde(default)]
    pub mana_icon_map: BTreeMap<String, String>,
}

/// Encounter summary for one enemy group of one character and act.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyRecord {
    #[serde(rename = "Character")]
    pub character: String,
    #[serde(rename = "Act")]
    pub act: u8,
    #[serde(rename = "EnemyId", default)]
    pub enemy_id: String,
    #[serde(rename = "Type", default)]
    pub enemy_type: CombatType,
    #[serde(rename = "MinLevel", default = "default_min_level")]
    pub min_level: u32,
    #[serde(rename = "EnemyName_JA", default, deserialize_with = "null_as_default")]
    pub name_ja: String,
    #[serde(rename = "EnemyName_EN", default, deserialize_with = "null_as_default")]
    pub name_en: String,
    #[serde(rename = "Encounters", default, deserialize_with = "null_as_default")]
    pub encounters: u64,
    #[serde(rename = "Avg_Turns", default, deserialize_with = "null_as_default")]
    pub avg_turns: f64,
    #[serde(rename = "Avg_HP_Loss", default, deserialize_with = "null_as_default")]
    pub avg_hp_loss: f64,
    #[serde(rename = "Avg_P_Change", default, deserialize_with = "null_as_default")]
    pub avg_p_change: f64,
    #[serde(rename = "TurnsBoxplot", default)]
    pub turns_boxplot: Option<BoxplotSummary>,
    #[serde(rename = "HpLossBoxplot", default)]
    pub hp_loss_boxplot: Option<BoxplotSummary>,
    #[serde(rename = "PChangeBoxplot", default)]
    pub p_change_boxplot: Option<BoxplotSummary>,
}

const fn default_min_level() -> u32 {
    99
}

impl EnemyRecord {
    #[must_use]
    pub fn display_name(&self, lang: Lang) -> &str {
        match lang {
            Lang::En if !self.name_en.is_empty() => &self.name_en,
            _ => &self.name_ja,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExhibitRecord {
    #[serde(rename = "Exhibit_ID", default)]
    pub exhibit_id: String,
    #[serde(rename = "JA", default, deserialize_with = "null_as_default")]
    pub name_ja: String,
    #[serde(rename = "EN", default, deserialize_with = "null_as_default")]
    pub name_en: String,
    #[serde(rename = "Adoption_Rate", default, deserialize_with = "null_as_default")]
    pub adoption_rate: f64,
    #[serde(rename = "Display_Category", default, deserialize_with = "null_as_default")]
    pub display_category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRun {
    pub run_id: String,
    #[serde(default)]
    pub version: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub deck: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterStats {
    #[serde(default)]
    pub ja: String,
    #[serde(default)]
    pub en: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rate: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub avg_turns: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub avg_hp_loss: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub avg_p_change: f64,
    #[serde(default)]
    pub turns_boxplot: Option<BoxplotSummary>,
    #[serde(default)]
    pub hp_loss_boxplot: Option<BoxplotSummary>,
    #[serde(default)]
    pub p_change_boxplot: Option<BoxplotSummary>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sample_runs: Vec<SampleRun>,
}

/// Boxplot scale bounds shared by every encounter of an act.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActScales {
    #[serde(default)]
    pub turns_min: Option<f64>,
    #[serde(default)]
    pub turns_max: Option<f64>,
    #[serde(default)]
    pub hp_loss_min: Option<f64>,
    #[serde(default)]
    pub hp_loss_max: Option<f64>,
    #[serde(default)]
    pub p_change_min: Option<f64>,
    #[serde(default)]
    pub p_change_max: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChoiceRate {
    pub rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoneyStats {
    pub mean: f64,
    pub q1: f64,
    pub q2: f64,
    pub q3: f64,
}

/// Per-node detail payload keyed by `act-level-NodeType`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeDetails {
    #[serde(default, deserialize_with = "null_as_default")]
    pub enemies: BTreeMap<String, EncounterStats>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub scales: ActScales,
    #[serde(default, deserialize_with = "null_as_default")]
    pub choices: BTreeMap<String, ChoiceRate>,
    #[serde(default)]
    pub remove_card_rate: Option<f64>,
    #[serde(default)]
    pub upgrade_card_rate: Option<f64>,
    #[serde(default)]
    pub money_stats: Option<MoneyStats>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sample_runs: Vec<SampleRun>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteData {
    #[serde(default)]
    pub node_selection: BTreeMap<String, BTreeMap<String, f64>>,
    #[serde(default)]
    pub event_actions: BTreeMap<String, BTreeMap<String, Vec<(String, f64)>>>,
    #[serde(default)]
    pub node_details: BTreeMap<String, NodeDetails>,
    #[serde(default = "default_total_runs")]
    pub total_runs: f64,
}

const fn default_total_runs() -> f64 {
    1.0
}

impl Default for RouteData {
    fn default() -> Self {
        Self {
            node_selection: BTreeMap::new(),
            event_actions: BTreeMap::new(),
            node_details: BTreeMap::new(),
            total_runs: default_total_runs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeRankingEntry {
    #[serde(rename = "Card_Name")]
    pub name: String,
    #[serde(rename = "Card_Name_EN", default, deserialize_with = "null_as_default")]
    pub name_en: String,
    #[serde(rename = "Upgrade_Count", default, deserialize_with = "null_as_default")]
    pub count: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoveRankingEntry {
    #[serde(rename = "Card_Name")]
    pub name: String,
    #[serde(rename = "Card_Name_EN", default, deserialize_with = "null_as_default")]
    pub name_en: String,
    #[serde(rename = "Remove_Count", default, deserialize_with = "null_as_default")]
    pub count: f64,
}

/// The per-character JSON document. Every collection defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterDataset {
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default, deserialize_with = "null_as_default")]
    pub all_available_characters: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub agg_data_full: Vec<CardAggregateRecord>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub agg_data_for_graph: Vec<CardAggregateRecord>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sit_data: Vec<SituationalRecord>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub exhibit_data: Vec<ExhibitRecord>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub route_data: RouteData,
    #[serde(default, deserialize_with = "null_as_default")]
    pub enemy_data: Vec<EnemyRecord>,
    #[serde(default)]
    pub lookup_tables: LookupTables,
    #[serde(default, deserialize_with = "null_as_default")]
    pub upgrade_ranking_data: Vec<UpgradeRankingEntry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub remove_ranking_data: Vec<RemoveRankingEntry>,
    #[serde(skip)]
    pub(crate) name_index: HashMap<String, usize>,
}

impl CharacterDataset {
    /// Parse a character dataset from JSON and index it by canonical name.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Json`] when the document does not match the schema.
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        let mut dataset: Self = serde_json::from_str(json)?;
        dataset.finish_load();
        log::debug!(
            "loaded dataset for {}: {} aggregate, {} situational, {} enemy rows",
            dataset.metadata.character,
            dataset.agg_data_full.len(),
            dataset.sit_data.len(),
            dataset.enemy_data.len()
        );
        Ok(dataset)
    }

    /// Parse from an already decoded JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Json`] when the value does not match the schema.
    pub fn from_value(value: serde_json::Value) -> Result<Self, DataError> {
        let mut dataset: Self = serde_json::from_value(value)?;
        dataset.finish_load();
        Ok(dataset)
    }

    /// Rebuild derived state: structured highlights, the name index and
    /// the situation order. Called by the constructors; call again after
    /// mutating the record collections directly.
    pub fn finish_load(&mut self) {
        for record in self
            .agg_data_full
            .iter_mut()
            .chain(self.agg_data_for_graph.iter_mut())
        {
            if record.highlights.is_empty() && !record.highlights_ja_hover.is_empty() {
                record.highlights =
                    highlights_from_hover(&record.highlights_ja_hover, &record.highlights_en_hover);
            }
        }
        self.name_index = self
            .agg_data_full
            .iter()
            .enumerate()
            .map(|(idx, record)| (record.name.clone(), idx))
            .collect();
        if self.metadata.ordered_situations.is_empty() && !self.sit_data.is_empty() {
            let mut situations: Vec<Situation> =
                self.sit_data.iter().map(SituationalRecord::situation).collect();
            situations.sort();
            situations.dedup();
            log::warn!("dataset has no ordered_situations; derived {}", situations.len());
            self.metadata.ordered_situations = situations;
        }
    }

    /// Look up the aggregate record by canonical (Japanese) name.
    #[must_use]
    pub fn aggregate(&self, name: &str) -> Option<&CardAggregateRecord> {
        match self.name_index.get(name) {
            Some(&idx) => self.agg_data_full.get(idx),
            None => self.agg_data_full.iter().find(|r| r.name == name),
        }
    }

    /// Records plotted in aggregate view: the graph subset when provided.
    #[must_use]
    pub fn graph_records(&self) -> &[CardAggregateRecord] {
        if self.agg_data_for_graph.is_empty() {
            &self.agg_data_full
        } else {
            &self.agg_data_for_graph
        }
    }

    /// Records with both tendencies present.
    pub fn rankable(&self) -> impl Iterator<Item = &CardAggregateRecord> {
        self.agg_data_full.iter().filter(|r| r.is_rankable())
    }

    /// Localized card name by canonical name, falling back to the input.
    #[must_use]
    pub fn card_display_name<'a>(&'a self, name: &'a str, lang: Lang) -> &'a str {
        self.aggregate(name).map_or(name, |r| r.display_name(lang))
    }

    /// Title-ready version string.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.metadata.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn card(name: &str) -> serde_json::Value {
        json!({
            "Card_Name": name,
            "Card_Name_EN": format!("{name} EN"),
            "Type": "Attack",
            "Rarity": "Rare",
            "Medal": "🥈",
            "Adoption_Rate": 0.4,
            "Attention_Score": null,
            "Weighted_Avg_Turn_Deviation": 55.0,
            "Weighted_Avg_HP_Deviation": 48.0,
            "Turn_Tendency": 0.3,
            "HP_Tendency": null,
            "Turn_Min": 40.0, "Turn_Q1": 45.0, "Turn_Median": 50.0, "Turn_Q3": 56.0, "Turn_Max": 60.0,
            "Turn_Act_4": 57.5,
            "Total_Fights_With": 120,
            "Highlights_JA_Hover": "Act 4 - Boss (攻:61.0,防:55.0)<br>Act 2 - Enemy (攻:60.5,防:40.0)",
            "Highlights_EN_Hover": "Act 4 - Boss (Atk:61.0,Def:55.0)<br>Act 2 - Enemy (Atk:60.5,Def:40.0)"
        })
    }

    #[test]
    fn medal_reads_emoji_and_blank_glyphs() {
        let medals: Vec<Medal> = serde_json::from_value(json!(["🥇", "🥈", "🥉", "", null])).unwrap();
        assert_eq!(
            medals,
            vec![Medal::Gold, Medal::Silver, Medal::Bronze, Medal::None, Medal::None]
        );
        assert!(Medal::Gold > Medal::Silver && Medal::Bronze > Medal::None);
        assert_eq!(serde_json::to_value(Medal::Bronze).unwrap(), json!("🥉"));
    }

    #[test]
    fn unknown_card_type_and_rarity_fall_back() {
        let kind: CardType = serde_json::from_value(json!("Mystery")).unwrap();
        assert_eq!(kind, CardType::Unknown);
        let rarity: Rarity = serde_json::from_value(json!("Special")).unwrap();
        assert_eq!(rarity, Rarity::Other);
    }

    #[test]
    fn situations_parse_from_pairs_and_labels() {
        let situations: Vec<Situation> =
            serde_json::from_value(json!([[1, "Enemy"], "Act 3 - Boss", "Act2 - EliteEnemy"]))
                .unwrap();
        assert_eq!(
            situations,
            vec![
                Situation::new(1, CombatType::Enemy),
                Situation::new(3, CombatType::Boss),
                Situation::new(2, CombatType::EliteEnemy),
            ]
        );
        assert!(serde_json::from_value::<Situation>(json!("Act X - Boss")).is_err());
        assert_eq!(Situation::new(4, CombatType::Boss).label(), "Act4 - Boss");
    }

    #[test]
    fn dataset_defaults_missing_collections_and_indexes_names() {
        let doc = json!({
            "metadata": { "character": "CirnoA", "version": "1.7.0", "ordered_situations": [] },
            "agg_data_full": [card("アイシクルフォール")],
            "sit_data": [{
                "Card_Name": "アイシクルフォール", "Type": "Attack", "Act": 2,
                "Combat_Type": "Enemy", "IsStarter": false, "Fights_With": 5,
                "Total_Fights_In_Situation": 0
            }]
        });
        let dataset = CharacterDataset::from_json(&doc.to_string()).unwrap();
        assert!(dataset.enemy_data.is_empty());
        assert!(dataset.exhibit_data.is_empty());
        assert!((dataset.route_data.total_runs - 1.0).abs() < f64::EPSILON);
        assert_eq!(
            dataset.metadata.ordered_situations,
            vec![Situation::new(2, CombatType::Enemy)]
        );

        let record = dataset.aggregate("アイシクルフォール").unwrap();
        assert_eq!(record.medal, Medal::Silver);
        assert!(!record.is_rankable());
        assert_eq!(record.display_name(Lang::En), "アイシクルフォール EN");
        assert_eq!(record.acts.for_act(4), (Some(57.5), None));
        assert_eq!(record.turn_summary().map(|s| s.median), Some(50.0));
        assert!(record.hp_summary().is_none());
        assert_eq!(record.highlights.len(), 2);
        assert_eq!(record.highlights[0].situation(), Situation::new(4, CombatType::Boss));
        assert!(record.highlights[0].en.starts_with("Act 4 - Boss (Atk"));
        assert_eq!(dataset.sit_data[0].adoption_rate(), None);
    }

    #[test]
    fn malformed_documents_surface_json_errors() {
        let err = CharacterDataset::from_json("{\"agg_data_full\": 3}").unwrap_err();
        assert!(matches!(err, DataError::Json(_)));
    }

    #[test]
    fn boxplot_negation_swaps_quartiles() {
        let summary = BoxplotSummary {
            min: 1.0,
            q1: 2.0,
            median: 3.0,
            q3: 5.0,
            max: 8.0,
            mean: 4.0,
        };
        let negated = summary.negated();
        assert_eq!(negated.min, -8.0);
        assert_eq!(negated.q1, -5.0);
        assert_eq!(negated.q3, -2.0);
        assert_eq!(negated.max, -1.0);
        assert!((summary.iqr() - 3.0).abs() < f64::EPSILON);
    }
}
