//! Route flowchart: per-act level rows of node-type shares and the detail
//! panel of each node.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use url::Url;

use crate::constants::{ROUTE_ACTS, RUN_LOG_BASE, SHOP_OTHER_EPSILON};
use crate::data::{
    ActScales, BoxplotSummary, CharacterDataset, ChoiceRate, LocalizedName, NodeDetails,
    SampleRun,
};
use crate::detail::wiki_url;
use crate::scale::{BoxplotTrack, Rgba, color_for_value};
use crate::text::Lang;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeType {
    Enemy,
    EliteEnemy,
    Boss,
    Shop,
    Gap,
    Adventure,
    Trade,
    Supply,
    Others,
    Entry,
    Unrecognized,
}

impl NodeType {
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "Enemy" => Self::Enemy,
            "EliteEnemy" => Self::EliteEnemy,
            "Boss" => Self::Boss,
            "Shop" => Self::Shop,
            "Gap" => Self::Gap,
            "Adventure" => Self::Adventure,
            "Trade" => Self::Trade,
            "Supply" => Self::Supply,
            "Others" => Self::Others,
            "Entry" => Self::Entry,
            _ => Self::Unrecognized,
        }
    }

    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Enemy => "#E57373",
            Self::EliteEnemy => "#C62828",
            Self::Boss => "#B71C1C",
            Self::Shop => "#64B5F6",
            Self::Gap => "#81C784",
            Self::Adventure => "#FFD54F",
            Self::Trade => "#BA68C8",
            Self::Supply => "#FFB0CA",
            Self::Others | Self::Unrecognized => "#BDBDBD",
            Self::Entry => "#4DD0E1",
        }
    }

    /// Short segment label; `None` for unrecognized node types.
    #[must_use]
    pub const fn label(self, lang: Lang) -> Option<&'static str> {
        let label = match (self, lang) {
            (Self::Enemy, Lang::Ja) => "戦",
            (Self::Enemy, Lang::En) => "Enemy",
            (Self::EliteEnemy, Lang::Ja) => "強",
            (Self::EliteEnemy, Lang::En) => "Elite",
            (Self::Boss, Lang::Ja) => "ボ",
            (Self::Boss, Lang::En) => "Boss",
            (Self::Shop, Lang::Ja) => "店",
            (Self::Shop, Lang::En) => "Shop",
            (Self::Gap, Lang::Ja) => "休",
            (Self::Gap, Lang::En) => "Gap",
            (Self::Adventure, Lang::Ja) => "？",
            (Self::Adventure, Lang::En) => "?",
            (Self::Trade, Lang::Ja) => "交",
            (Self::Trade, Lang::En) => "Trade",
            (Self::Supply, Lang::Ja) => "補",
            (Self::Supply, Lang::En) => "Supply",
            (Self::Others, Lang::Ja) => "他",
            (Self::Others, Lang::En) => "Others",
            (Self::Entry, Lang::Ja) => "入",
            (Self::Entry, Lang::En) => "Entry",
            (Self::Unrecognized, _) => return None,
        };
        Some(label)
    }

    #[must_use]
    pub const fn is_combat(self) -> bool {
        matches!(self, Self::Enemy | Self::EliteEnemy | Self::Boss)
    }
}

fn segment_label(node_type: NodeType, raw: &str, lang: Lang) -> String {
    node_type.label(lang).map_or_else(
        || raw.chars().next().map(String::from).unwrap_or_default(),
        str::to_string,
    )
}

/// One colored stop range of a choice bar, in 0–1 units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BarStop {
    pub color: &'static str,
    pub start: f64,
    pub end: f64,
}

/// Render stops as a CSS horizontal gradient.
#[must_use]
pub fn gradient_css(stops: &[BarStop]) -> String {
    let mut parts = String::new();
    for (idx, stop) in stops.iter().enumerate() {
        if idx > 0 {
            parts.push_str(", ");
        }
        let _ = write!(
            parts,
            "{c} {s}%, {c} {e}%",
            c = stop.color,
            s = stop.start * 100.0,
            e = stop.end * 100.0
        );
    }
    format!("linear-gradient(to right, {parts})")
}

fn stack(shares: impl Iterator<Item = (&'static str, f64)>) -> Vec<BarStop> {
    let mut pos = 0.0;
    shares
        .map(|(color, rate)| {
            let start = pos;
            pos += rate;
            BarStop {
                color,
                start,
                end: pos,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GapChoice {
    Rest,
    Upgrade,
    Other,
}

impl GapChoice {
    const ORDER: [Self; 3] = [Self::Rest, Self::Upgrade, Self::Other];

    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "UpgradeCard" => Self::Upgrade,
            "DrinkTea" | "Rest" => Self::Rest,
            _ => Self::Other,
        }
    }

    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Rest => "#81C784",
            Self::Upgrade => "#FFB74D",
            Self::Other => "#BDBDBD",
        }
    }

    #[must_use]
    pub const fn text_key(self) -> &'static str {
        match self {
            Self::Rest => "gap_rest",
            Self::Upgrade => "gap_upgrade",
            Self::Other => "gap_other",
        }
    }
}

/// Gap choice rates folded into rest/upgrade/other, in that order; absent
/// groups are omitted.
#[must_use]
pub fn gap_choices(choices: &BTreeMap<String, ChoiceRate>) -> Vec<(GapChoice, f64)> {
    let mut totals = [0.0; 3];
    let mut seen = [false; 3];
    for (name, stats) in choices {
        let idx = match GapChoice::from_name(name) {
            GapChoice::Rest => 0,
            GapChoice::Upgrade => 1,
            GapChoice::Other => 2,
        };
        totals[idx] += stats.rate;
        seen[idx] = true;
    }
    GapChoice::ORDER
        .into_iter()
        .zip(totals)
        .zip(seen)
        .filter(|((choice, rate), seen)| *seen && (*choice != GapChoice::Other || *rate > 0.0))
        .map(|((choice, rate), _)| (choice, rate))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShopChoice {
    Remove,
    Upgrade,
    Other,
}

impl ShopChoice {
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Remove => "#42A5F5",
            Self::Upgrade => "#FFB74D",
            Self::Other => "#90CAF9",
        }
    }
}

/// Shop bar split: removal, upgrade, then the remainder when noticeable.
#[must_use]
pub fn shop_choices(details: &NodeDetails) -> Vec<(ShopChoice, f64)> {
    let remove = details.remove_card_rate.unwrap_or(0.0);
    let upgrade = details.upgrade_card_rate.unwrap_or(0.0);
    let other = (1.0 - remove - upgrade).max(0.0);
    let mut shares = vec![(ShopChoice::Remove, remove), (ShopChoice::Upgrade, upgrade)];
    if other > SHOP_OTHER_EPSILON {
        shares.push((ShopChoice::Other, other));
    }
    shares
}

/// Act-wide HP loss and P change bounds for the encounter heat colors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActStats {
    pub hp_min: f64,
    pub hp_max: f64,
    pub p_min: f64,
    pub p_max: f64,
}

impl Default for ActStats {
    fn default() -> Self {
        Self {
            hp_min: 0.0,
            hp_max: 1.0,
            p_min: 0.0,
            p_max: 1.0,
        }
    }
}

fn parse_act(key: &str) -> Option<u8> {
    key.split('-').next()?.parse().ok()
}

fn act_stats(node_details: &BTreeMap<String, NodeDetails>, act: u8) -> ActStats {
    let encounters: Vec<_> = node_details
        .iter()
        .filter(|(key, _)| parse_act(key) == Some(act))
        .flat_map(|(_, details)| details.enemies.values())
        .collect();
    if encounters.is_empty() {
        return ActStats::default();
    }
    let fold = |pick: fn(&crate::data::EncounterStats) -> f64| {
        encounters.iter().map(|e| pick(e)).fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(lo, hi), v| (lo.min(v), hi.max(v)),
        )
    };
    let (hp_min, hp_max) = fold(|e| e.avg_hp_loss);
    let (p_min, p_max) = fold(|e| e.avg_p_change);
    ActStats {
        hp_min,
        hp_max,
        p_min,
        p_max,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    /// `act-level-NodeType`, the key into node details and event actions.
    pub node_id: String,
    pub node_type: NodeType,
    pub raw_type: String,
    pub label: String,
    pub count: f64,
    /// Share of the level's visits, 0–1.
    pub share: f64,
    pub color: &'static str,
    /// Lower-half choice breakdown for Gap and Shop nodes.
    pub choice_bar: Vec<BarStop>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelRow {
    pub level: u32,
    pub total: f64,
    pub reach_rate: f64,
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActColumn {
    pub act: u8,
    pub levels: Vec<LevelRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteFlow {
    pub acts: Vec<ActColumn>,
    pub total_runs: f64,
    pub act_stats: BTreeMap<u8, ActStats>,
}

impl RouteFlow {
    #[must_use]
    pub fn build(dataset: &CharacterDataset, lang: Lang) -> Self {
        let route = &dataset.route_data;
        let total_runs = if route.total_runs > 0.0 {
            route.total_runs
        } else {
            1.0
        };

        let mut acts = Vec::new();
        for act in ROUTE_ACTS {
            let mut levels: Vec<LevelRow> = route
                .node_selection
                .iter()
                .filter_map(|(key, counts)| {
                    let (key_act, level) = key.split_once('-')?;
                    if key_act.parse::<u8>().ok()? != act {
                        return None;
                    }
                    let Ok(level) = level.parse::<u32>() else {
                        log::warn!("skipping route level with malformed key {key}");
                        return None;
                    };
                    Some(level_row(dataset, act, level, counts, total_runs, lang))
                })
                .collect();
            if levels.is_empty() {
                continue;
            }
            levels.sort_by_key(|row| row.level);
            acts.push(ActColumn { act, levels });
        }

        let act_stats = ROUTE_ACTS
            .into_iter()
            .map(|act| (act, act_stats(&route.node_details, act)))
            .collect();
        Self {
            acts,
            total_runs,
            act_stats,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.acts.is_empty()
    }

    #[must_use]
    pub fn segment(&self, node_id: &str) -> Option<(u8, u32, &Segment)> {
        self.acts.iter().find_map(|column| {
            column.levels.iter().find_map(|row| {
                row.segments
                    .iter()
                    .find(|s| s.node_id == node_id)
                    .map(|s| (column.act, row.level, s))
            })
        })
    }

    /// Detail panel content for a segment, `None` for an unknown id.
    #[must_use]
    pub fn detail(
        &self,
        dataset: &CharacterDataset,
        node_id: &str,
        lang: Lang,
    ) -> Option<NodeDetail> {
        let (act, level, segment) = self.segment(node_id)?;
        let stats = self.act_stats.get(&act).copied().unwrap_or_default();
        Some(NodeDetail::build(
            dataset,
            act,
            level,
            segment,
            self.total_runs,
            stats,
            lang,
        ))
    }
}

fn level_row(
    dataset: &CharacterDataset,
    act: u8,
    level: u32,
    counts: &BTreeMap<String, f64>,
    total_runs: f64,
    lang: Lang,
) -> LevelRow {
    let total = counts
        .get("total")
        .copied()
        .filter(|t| *t > 0.0)
        .unwrap_or(1.0);
    let mut entries: Vec<(&String, f64)> = counts
        .iter()
        .filter(|(k, _)| k.as_str() != "total")
        .map(|(k, v)| (k, *v))
        .collect();
    entries.sort_by(|a, b| b.1.total_cmp(&a.1));

    let segments = entries
        .into_iter()
        .map(|(raw, count)| {
            let node_type = NodeType::from_name(raw);
            let node_id = format!("{act}-{level}-{raw}");
            let choice_bar = dataset
                .route_data
                .node_details
                .get(&node_id)
                .map(|details| match node_type {
                    NodeType::Gap => stack(
                        gap_choices(&details.choices)
                            .into_iter()
                            .map(|(c, r)| (c.color(), r)),
                    ),
                    NodeType::Shop => stack(
                        shop_choices(details)
                            .into_iter()
                            .map(|(c, r)| (c.color(), r)),
                    ),
                    _ => Vec::new(),
                })
                .unwrap_or_default();
            Segment {
                label: segment_label(node_type, raw, lang),
                node_id,
                node_type,
                raw_type: raw.clone(),
                count,
                share: count / total,
                color: node_type.color(),
                choice_bar,
            }
        })
        .collect();
    LevelRow {
        level,
        total,
        reach_rate: total / total_runs,
        segments,
    }
}

/// Link to a recorded run on the run-log viewer.
#[must_use]
pub fn sample_run_url(version: &str, run_id: &str, act: u8, level: u32) -> Option<String> {
    let short_version = version.split('.').take(3).collect::<Vec<_>>().join(".");
    let mut url = Url::parse(RUN_LOG_BASE).ok()?;
    url.path_segments_mut()
        .ok()?
        .pop_if_empty()
        .extend([short_version.as_str(), run_id, ""]);
    url.query_pairs_mut()
        .append_pair("a", &act.to_string())
        .append_pair("l", &level.to_string());
    Some(url.into())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleLink {
    /// 1-based position shown as the link text.
    pub index: usize,
    pub url: String,
    pub deck: String,
}

fn sample_links(runs: &[SampleRun], act: u8, level: u32) -> Vec<SampleLink> {
    runs.iter()
        .enumerate()
        .filter_map(|(idx, run)| {
            Some(SampleLink {
                index: idx + 1,
                url: sample_run_url(&run.version, &run.run_id, act, level)?,
                deck: run.deck.join(", "),
            })
        })
        .collect()
}

fn track(
    summary: Option<BoxplotSummary>,
    lo: Option<f64>,
    hi: Option<f64>,
    negate: bool,
) -> Option<BoxplotTrack> {
    BoxplotTrack::project(&summary?, lo?, hi?, negate)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncounterColumn {
    pub name: String,
    pub rate: f64,
    pub avg_turns: f64,
    pub turns_track: Option<BoxplotTrack>,
    /// Average HP loss shown as a negative number.
    pub hp_change: f64,
    pub hp_track: Option<BoxplotTrack>,
    pub hp_color: Rgba,
    pub avg_p_change: f64,
    pub p_track: Option<BoxplotTrack>,
    pub p_color: Rgba,
    pub samples: Vec<SampleLink>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ItemKind {
    Card,
    Exhibit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActionKind {
    Add,
    Remove,
    Upgrade,
}

impl ActionKind {
    const ALL: [Self; 3] = [Self::Add, Self::Remove, Self::Upgrade];

    const fn name(self) -> &'static str {
        match self {
            Self::Add => "Add",
            Self::Remove => "Remove",
            Self::Upgrade => "Upgrade",
        }
    }
}

impl ItemKind {
    const fn name(self) -> &'static str {
        match self {
            Self::Card => "Card",
            Self::Exhibit => "Exhibit",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionEntry {
    pub id: String,
    pub name: String,
    pub wiki_url: Option<String>,
    pub count: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionList {
    pub action: ActionKind,
    pub item: ItemKind,
    pub entries: Vec<ActionEntry>,
}

impl ActionList {
    /// Locale key such as `add_card`.
    #[must_use]
    pub fn title_key(&self) -> String {
        format!(
            "{}_{}",
            self.action.name().to_lowercase(),
            self.item.name().to_lowercase()
        )
    }
}

/// Shop removal and upgrade rates as reported, when present.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShopRates {
    pub remove: Option<f64>,
    pub upgrade: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeDetail {
    pub node_id: String,
    pub act: u8,
    pub level: u32,
    pub raw_type: String,
    pub visits: f64,
    pub total_runs: f64,
    pub encounters: Vec<EncounterColumn>,
    pub gap_choices: Vec<(GapChoice, f64)>,
    pub shop: Option<ShopRates>,
    pub samples: Vec<SampleLink>,
    pub card_actions: Vec<ActionList>,
    pub exhibit_actions: Vec<ActionList>,
}

impl NodeDetail {
    fn build(
        dataset: &CharacterDataset,
        act: u8,
        level: u32,
        segment: &Segment,
        total_runs: f64,
        stats: ActStats,
        lang: Lang,
    ) -> Self {
        let route = &dataset.route_data;
        let empty = NodeDetails::default();
        let details = route.node_details.get(&segment.node_id).unwrap_or(&empty);

        let encounters = if segment.node_type.is_combat() {
            encounter_columns(details, &stats, act, level, lang)
        } else {
            Vec::new()
        };
        let gap_choices = if segment.node_type == NodeType::Gap {
            gap_choices(&details.choices)
        } else {
            Vec::new()
        };
        let shop = (segment.node_type == NodeType::Shop
            && (details.remove_card_rate.is_some() || details.upgrade_card_rate.is_some()))
        .then_some(ShopRates {
            remove: details.remove_card_rate,
            upgrade: details.upgrade_card_rate,
        });

        let actions = route.event_actions.get(&segment.node_id);
        let lookups = &dataset.lookup_tables;
        let lists = |item: ItemKind, table: &BTreeMap<String, LocalizedName>| {
            ActionKind::ALL
                .into_iter()
                .filter_map(|action| {
                    let key = format!("{}_{}", action.name(), item.name());
                    let items = actions?.get(&key).filter(|items| !items.is_empty())?;
                    let entries = items
                        .iter()
                        .map(|(id, count)| {
                            let name = table
                                .get(id)
                                .map(|n| n.get(lang))
                                .filter(|n| !n.is_empty())
                                .unwrap_or(id.as_str())
                                .to_string();
                            ActionEntry {
                                id: id.clone(),
                                wiki_url: wiki_url(&name, lang),
                                name,
                                count: *count,
                            }
                        })
                        .collect();
                    Some(ActionList {
                        action,
                        item,
                        entries,
                    })
                })
                .collect::<Vec<_>>()
        };

        Self {
            node_id: segment.node_id.clone(),
            act,
            level,
            raw_type: segment.raw_type.clone(),
            visits: segment.count,
            total_runs,
            encounters,
            gap_choices,
            shop,
            samples: sample_links(&details.sample_runs, act, level),
            card_actions: lists(ItemKind::Card, &lookups.cards),
            exhibit_actions: lists(ItemKind::Exhibit, &lookups.exhibits),
        }
    }

    #[must_use]
    pub fn traversal_rate(&self) -> f64 {
        self.visits / self.total_runs
    }

    #[must_use]
    pub fn has_content(&self) -> bool {
        !self.encounters.is_empty()
            || !self.gap_choices.is_empty()
            || self.shop.is_some()
            || !self.samples.is_empty()
            || !self.card_actions.is_empty()
            || !self.exhibit_actions.is_empty()
    }
}

fn encounter_columns(
    details: &NodeDetails,
    stats: &ActStats,
    act: u8,
    level: u32,
    lang: Lang,
) -> Vec<EncounterColumn> {
    let ActScales {
        turns_min,
        turns_max,
        hp_loss_min,
        hp_loss_max,
        p_change_min,
        p_change_max,
    } = details.scales;
    let mut enemies: Vec<_> = details.enemies.values().collect();
    enemies.sort_by(|a, b| b.rate.total_cmp(&a.rate));
    // Encounter samples link to the level before the fight.
    let sample_level = level.saturating_sub(1);
    enemies
        .into_iter()
        .map(|e| EncounterColumn {
            name: match lang {
                Lang::Ja => e.ja.clone(),
                Lang::En => e.en.clone(),
            },
            rate: e.rate,
            avg_turns: e.avg_turns,
            turns_track: track(e.turns_boxplot, turns_min, turns_max, false),
            hp_change: -e.avg_hp_loss,
            hp_track: track(e.hp_loss_boxplot, hp_loss_min, hp_loss_max, true),
            hp_color: color_for_value(e.avg_hp_loss, stats.hp_min, stats.hp_max, false),
            avg_p_change: e.avg_p_change,
            p_track: track(e.p_change_boxplot, p_change_min, p_change_max, false),
            p_color: color_for_value(e.avg_p_change, stats.p_min, stats.p_max, true),
            samples: sample_links(&e.sample_runs, act, sample_level),
        })
        .collect()
}
