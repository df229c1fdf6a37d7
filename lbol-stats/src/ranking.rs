//! Sorted top-N reports built once per dataset.

use serde::Serialize;

use crate::constants::{
    ACT1_TOP_N, ACT4_TOP_N, ADOPTION_TOP_N, ATTENTION_TOP_N, EVENT_LOG_TOP_N,
    TENDENCY_MIN_ADOPTION_RATE, TENDENCY_TOP_N,
};
use crate::data::{CardAggregateRecord, CharacterDataset, Medal, SituationalRecord};
use crate::numbers::round_f64_to_i64;
use crate::spotlight::{SpotlightReport, SpotlightThresholds};
use crate::text::Lang;

/// The `n` items with the highest metric, descending.
///
/// Items without a metric are dropped; ties keep their input order.
pub fn top_n_by<T, F>(items: &[T], metric: F, n: usize) -> Vec<(&T, f64)>
where
    F: Fn(&T) -> Option<f64>,
{
    let mut scored: Vec<(&T, f64)> = items
        .iter()
        .filter_map(|item| metric(item).filter(|v| !v.is_nan()).map(|v| (item, v)))
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(n);
    scored
}

/// Split a list into two display columns, the first one taking the extra item.
#[must_use]
pub fn split_columns<T>(items: &[T]) -> (&[T], &[T]) {
    items.split_at(items.len().div_ceil(2))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ReportId {
    Attention,
    Adoption,
    Act1Adoption,
    Act1Performance,
    Act4Performance,
    Act4Adoption,
    AttackTendency,
    DefenseTendency,
    Upgrade,
    Remove,
}

impl ReportId {
    pub const ALL: [Self; 10] = [
        Self::Attention,
        Self::Adoption,
        Self::Act1Adoption,
        Self::Act1Performance,
        Self::Act4Performance,
        Self::Act4Adoption,
        Self::AttackTendency,
        Self::DefenseTendency,
        Self::Upgrade,
        Self::Remove,
    ];

    /// DOM id of the report section.
    #[must_use]
    pub const fn element_id(self) -> &'static str {
        match self {
            Self::Attention => "attention-ranking-report",
            Self::Adoption => "adoption-ranking-report",
            Self::Act1Adoption => "act1-adoption-report",
            Self::Act1Performance => "act1-performers-report",
            Self::Act4Performance => "act4-performers-report",
            Self::Act4Adoption => "act4-adoption-report",
            Self::AttackTendency => "attack-tendency-report",
            Self::DefenseTendency => "defense-tendency-report",
            Self::Upgrade => "upgrade-ranking-report",
            Self::Remove => "remove-ranking-report",
        }
    }

    /// Locale key prefix; `_title` and `_desc` are appended.
    #[must_use]
    pub const fn text_key(self) -> &'static str {
        match self {
            Self::Attention => "attention_ranking",
            Self::Adoption => "adoption_ranking",
            Self::Act1Adoption => "act1_top_adoption",
            Self::Act1Performance => "act1_top_performers",
            Self::Act4Performance => "act4_top_performers",
            Self::Act4Adoption => "act4_top_adoption",
            Self::AttackTendency => "attack_tendency_top",
            Self::DefenseTendency => "defense_tendency_top",
            Self::Upgrade => "upgrade_ranking",
            Self::Remove => "remove_ranking",
        }
    }

    /// Locale key of the value label shown next to each entry.
    #[must_use]
    pub const fn value_key(self) -> &'static str {
        match self {
            Self::Attention => "attention_score_label",
            Self::Adoption | Self::Act1Adoption | Self::Act4Adoption => "adoption_count_label",
            Self::Act1Performance | Self::Act4Performance => "performance_score_label",
            Self::AttackTendency => "atk_tendency",
            Self::DefenseTendency => "def_tendency",
            Self::Upgrade => "upgrade_count_label",
            Self::Remove => "remove_count_label",
        }
    }

    #[must_use]
    pub const fn format(self) -> ValueFormat {
        match self {
            Self::Adoption
            | Self::Act1Adoption
            | Self::Act4Adoption
            | Self::Upgrade
            | Self::Remove => ValueFormat::Integer,
            Self::Attention | Self::Act1Performance | Self::Act4Performance => {
                ValueFormat::OneDecimal
            }
            Self::AttackTendency | Self::DefenseTendency => ValueFormat::TwoDecimals,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValueFormat {
    Integer,
    OneDecimal,
    TwoDecimals,
}

impl ValueFormat {
    #[must_use]
    pub fn render(self, value: f64) -> String {
        match self {
            Self::Integer => round_f64_to_i64(value).to_string(),
            Self::OneDecimal => format!("{value:.1}"),
            Self::TwoDecimals => format!("{value:.2}"),
        }
    }
}

/// Extra figures shown by the attention ranking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AttentionStats {
    pub adoption_rate: f64,
    pub performance: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    /// Canonical card name, used to select the card on activation.
    pub name: String,
    pub name_en: String,
    pub value: f64,
    pub medal: Medal,
    pub attention: Option<AttentionStats>,
}

impl RankedEntry {
    fn plain(name: &str, name_en: &str, value: f64) -> Self {
        Self {
            name: name.to_string(),
            name_en: name_en.to_string(),
            value,
            medal: Medal::None,
            attention: None,
        }
    }

    fn from_record(record: &CardAggregateRecord, value: f64) -> Self {
        Self {
            medal: record.medal,
            ..Self::plain(&record.name, &record.name_en, value)
        }
    }

    #[must_use]
    pub fn label(&self, lang: Lang) -> &str {
        match lang {
            Lang::En if !self.name_en.is_empty() => &self.name_en,
            _ => &self.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedReport {
    pub id: ReportId,
    pub entries: Vec<RankedEntry>,
}

impl RankedReport {
    #[must_use]
    pub fn columns(&self) -> (&[RankedEntry], &[RankedEntry]) {
        split_columns(&self.entries)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

struct SituationalTotals<'a> {
    name: &'a str,
    name_en: &'a str,
    perf_sum: f64,
    perf_count: f64,
    fights: f64,
}

/// Per-card performance means and adoption sums over situational rows,
/// in first-seen order.
fn situational_totals<'a>(
    rows: impl Iterator<Item = &'a SituationalRecord>,
) -> Vec<SituationalTotals<'a>> {
    let mut totals: Vec<SituationalTotals<'a>> = Vec::new();
    for row in rows {
        let perf = row.turn_deviation.unwrap_or(0.0) + row.hp_deviation.unwrap_or(0.0);
        if let Some(entry) = totals.iter_mut().find(|t| t.name == row.name) {
            entry.perf_sum += perf;
            entry.perf_count += 1.0;
            entry.fights += row.fights_with;
        } else {
            totals.push(SituationalTotals {
                name: &row.name,
                name_en: &row.name_en,
                perf_sum: perf,
                perf_count: 1.0,
                fights: row.fights_with,
            });
        }
    }
    totals
}

fn situational_reports(
    dataset: &CharacterDataset,
    act: u8,
    top_n: usize,
) -> (Vec<RankedEntry>, Vec<RankedEntry>) {
    let totals = situational_totals(dataset.sit_data.iter().filter(|r| r.act == act));
    let entry = |t: &SituationalTotals<'_>, value: f64| RankedEntry::plain(t.name, t.name_en, value);
    let adoption = top_n_by(&totals, |t| Some(t.fights), top_n)
        .into_iter()
        .map(|(t, v)| entry(t, v))
        .collect();
    let performance = top_n_by(&totals, |t| Some(t.perf_sum / t.perf_count), top_n)
        .into_iter()
        .map(|(t, v)| entry(t, v))
        .collect();
    (adoption, performance)
}

fn record_report<F>(records: &[&CardAggregateRecord], metric: F, n: usize) -> Vec<RankedEntry>
where
    F: Fn(&CardAggregateRecord) -> Option<f64>,
{
    top_n_by(records, |r| metric(r), n)
        .into_iter()
        .map(|(r, v)| RankedEntry::from_record(r, v))
        .collect()
}

/// Spotlight groups plus every ranked report of one dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportSet {
    pub spotlight: SpotlightReport,
    pub reports: Vec<RankedReport>,
    pub rankable_count: usize,
}

impl ReportSet {
    #[must_use]
    pub fn build(dataset: &CharacterDataset, thresholds: &SpotlightThresholds) -> Self {
        let rankable: Vec<&CardAggregateRecord> = dataset.rankable().collect();
        if rankable.is_empty() {
            log::warn!("no rankable records; reports are empty");
            return Self::default();
        }

        let attention = top_n_by(&rankable, |r| r.attention_score, ATTENTION_TOP_N)
            .into_iter()
            .map(|(r, v)| RankedEntry {
                attention: Some(AttentionStats {
                    adoption_rate: r.adoption_rate,
                    performance: r.deviation_sum().map(|sum| sum / 2.0),
                }),
                ..RankedEntry::from_record(r, v)
            })
            .collect();
        let adoption = record_report(&rankable, |r| Some(r.total_fights_with), ADOPTION_TOP_N);
        let act4_performance = record_report(
            &rankable,
            |r| match r.acts.for_act(4) {
                (Some(turn), Some(hp)) => Some(turn + hp),
                _ => None,
            },
            ACT4_TOP_N,
        );

        let (act1_adoption, act1_performance) = situational_reports(dataset, 1, ACT1_TOP_N);
        let (act4_adoption, _) = situational_reports(dataset, 4, ACT4_TOP_N);

        let tendency_base: Vec<&CardAggregateRecord> = dataset
            .agg_data_full
            .iter()
            .filter(|r| !r.name.is_empty() && r.adoption_rate >= TENDENCY_MIN_ADOPTION_RATE)
            .collect();
        let attack = record_report(&tendency_base, |r| r.turn_tendency, TENDENCY_TOP_N);
        let defense = record_report(&tendency_base, |r| r.hp_tendency, TENDENCY_TOP_N);

        let upgrade = top_n_by(&dataset.upgrade_ranking_data, |e| Some(e.count), EVENT_LOG_TOP_N)
            .into_iter()
            .map(|(e, v)| RankedEntry::plain(&e.name, &e.name_en, v))
            .collect();
        let remove = top_n_by(&dataset.remove_ranking_data, |e| Some(e.count), EVENT_LOG_TOP_N)
            .into_iter()
            .map(|(e, v)| RankedEntry::plain(&e.name, &e.name_en, v))
            .collect();

        let reports = [
            (ReportId::Attention, attention),
            (ReportId::Adoption, adoption),
            (ReportId::Act1Adoption, act1_adoption),
            (ReportId::Act1Performance, act1_performance),
            (ReportId::Act4Performance, act4_performance),
            (ReportId::Act4Adoption, act4_adoption),
            (ReportId::AttackTendency, attack),
            (ReportId::DefenseTendency, defense),
            (ReportId::Upgrade, upgrade),
            (ReportId::Remove, remove),
        ]
        .into_iter()
        .map(|(id, entries)| RankedReport { id, entries })
        .collect();

        Self {
            spotlight: SpotlightReport::build(&dataset.agg_data_full, thresholds),
            reports,
            rankable_count: rankable.len(),
        }
    }

    #[must_use]
    pub fn report(&self, id: ReportId) -> Option<&RankedReport> {
        self.reports.iter().find(|r| r.id == id)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rankable_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CardType, CombatType, Rarity, RemoveRankingEntry};
    use crate::test_support::{record, situational};

    #[test]
    fn top_n_is_stable_descending_and_drops_missing() {
        let items = [
            ("a", Some(3.0)),
            ("b", None),
            ("c", Some(5.0)),
            ("d", Some(3.0)),
            ("e", Some(1.0)),
        ];
        let top = top_n_by(&items, |i| i.1, 3);
        let names: Vec<&str> = top.iter().map(|(i, _)| i.0).collect();
        assert_eq!(names, vec!["c", "a", "d"]);
        assert!(top.windows(2).all(|w| w[0].1 >= w[1].1));
        assert!(top_n_by(&items, |i| i.1, 0).is_empty());
    }

    #[test]
    fn columns_split_with_ceiling() {
        let items = [1, 2, 3, 4, 5];
        assert_eq!(split_columns(&items), (&items[..3], &items[3..]));
        let empty: [i32; 0] = [];
        assert_eq!(split_columns(&empty).0.len(), 0);
        assert_eq!(split_columns(&[7]), (&[7][..], &[][..]));
    }

    #[test]
    fn value_formats() {
        assert_eq!(ValueFormat::Integer.render(12.6), "13");
        assert_eq!(ValueFormat::OneDecimal.render(55.04), "55.0");
        assert_eq!(ValueFormat::TwoDecimals.render(-0.256), "-0.26");
    }

    fn dataset() -> CharacterDataset {
        let mut a = record("A", CardType::Attack, Rarity::Common);
        a.attention_score = Some(60.0);
        a.total_fights_with = 10.0;
        a.adoption_rate = 0.5;
        a.turn_tendency = Some(0.4);
        a.acts.turn_act_4 = Some(55.0);
        a.acts.hp_act_4 = Some(52.0);
        let mut b = record("B", CardType::Skill, Rarity::Rare);
        b.attention_score = Some(80.0);
        b.total_fights_with = 30.0;
        b.adoption_rate = 0.01;
        b.turn_tendency = Some(1.4);
        let mut unrankable = record("U", CardType::Skill, Rarity::Rare);
        unrankable.hp_tendency = None;
        unrankable.attention_score = Some(99.0);

        let mut s1 = situational("A", CardType::Attack, 1, CombatType::Enemy);
        s1.fights_with = 4.0;
        s1.turn_deviation = Some(60.0);
        s1.hp_deviation = Some(40.0);
        let mut s2 = situational("A", CardType::Attack, 1, CombatType::Boss);
        s2.fights_with = 3.0;
        s2.turn_deviation = Some(50.0);
        s2.hp_deviation = None;
        let mut s3 = situational("B", CardType::Skill, 1, CombatType::Enemy);
        s3.fights_with = 5.0;

        let mut dataset = CharacterDataset {
            agg_data_full: vec![a, b, unrankable],
            sit_data: vec![s1, s2, s3],
            remove_ranking_data: vec![RemoveRankingEntry {
                name: "A".into(),
                name_en: "A en".into(),
                count: 7.0,
            }],
            ..CharacterDataset::default()
        };
        dataset.finish_load();
        dataset
    }

    #[test]
    fn reports_use_rankable_records_and_situational_groups() {
        let set = ReportSet::build(&dataset(), &SpotlightThresholds::default());
        assert_eq!(set.rankable_count, 2);

        let attention = set.report(ReportId::Attention).unwrap();
        let names: Vec<&str> = attention.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
        assert!(attention.entries[0].attention.is_some());

        let act1_adoption = set.report(ReportId::Act1Adoption).unwrap();
        assert_eq!(act1_adoption.entries[0].name, "A");
        assert!((act1_adoption.entries[0].value - 7.0).abs() < 1e-9);

        let act1_perf = set.report(ReportId::Act1Performance).unwrap();
        // A: ((60 + 40) + (50 + 0)) / 2 = 75; B: 50 + 50 = 100.
        assert_eq!(act1_perf.entries[0].name, "B");
        assert!((act1_perf.entries[1].value - 75.0).abs() < 1e-9);

        let act4 = set.report(ReportId::Act4Performance).unwrap();
        assert_eq!(act4.entries.len(), 1);
        assert!((act4.entries[0].value - 107.0).abs() < 1e-9);

        // B is below the adoption gate for tendency rankings.
        let attack = set.report(ReportId::AttackTendency).unwrap();
        assert_eq!(attack.entries.len(), 1);
        assert_eq!(attack.entries[0].name, "A");

        let remove = set.report(ReportId::Remove).unwrap();
        assert_eq!(remove.entries[0].label(Lang::En), "A en");
        assert!(set.report(ReportId::Upgrade).unwrap().is_empty());
    }

    #[test]
    fn dataset_without_rankable_records_yields_empty_set() {
        let mut r = record("U", CardType::Skill, Rarity::Rare);
        r.turn_tendency = None;
        let mut dataset = CharacterDataset {
            agg_data_full: vec![r],
            ..CharacterDataset::default()
        };
        dataset.finish_load();
        let set = ReportSet::build(&dataset, &SpotlightThresholds::default());
        assert!(set.is_empty());
        assert!(set.report(ReportId::Attention).is_none());
    }
}
