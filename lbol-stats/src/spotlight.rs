//! Spotlight classification: an ordered rule cascade that assigns each
//! rankable card at most one category.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::constants::ADOPTION_TOP_N;
use crate::data::{CardAggregateRecord, CardType, CombatType, Highlight, Medal};
use crate::ranking::top_n_by;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SpotlightCategory {
    Star,
    Honor,
    Balancer,
    HighRoller,
    SolidDefender,
    Counter,
}

impl SpotlightCategory {
    /// Order in which the report lists the categories.
    pub const DISPLAY_ORDER: [Self; 6] = [
        Self::Star,
        Self::Honor,
        Self::Balancer,
        Self::HighRoller,
        Self::SolidDefender,
        Self::Counter,
    ];

    /// Locale key prefix for the category title and description.
    #[must_use]
    pub const fn text_key(self) -> &'static str {
        match self {
            Self::Star => "spotlight_cat0",
            Self::Honor => "spotlight_cat1",
            Self::HighRoller => "spotlight_cat2",
            Self::SolidDefender => "spotlight_cat3",
            Self::Counter => "spotlight_cat4",
            Self::Balancer => "spotlight_cat5",
        }
    }
}

/// Numeric cut-offs used by the classification rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpotlightThresholds {
    /// Both tendencies above this for the tendency-based honor rules.
    pub honor_both_min: f64,
    /// One tendency above this earns honor without a medal.
    pub honor_single_strong: f64,
    /// One tendency above this earns honor with a medal.
    pub honor_single_medal: f64,
    pub honor_sum_min: f64,
    pub honor_deviation_sum: f64,
    pub star_deviation_sum: f64,
    pub star_single_tendency: f64,
    pub specialist_min: f64,
    pub specialist_other_low: f64,
    pub specialist_other_high: f64,
    pub balancer_sum: f64,
    pub counter_sum: f64,
}

impl Default for SpotlightThresholds {
    fn default() -> Self {
        Self {
            honor_both_min: 0.25,
            honor_single_strong: 0.75,
            honor_single_medal: 0.5,
            honor_sum_min: 0.75,
            honor_deviation_sum: 100.0,
            star_deviation_sum: 100.0,
            star_single_tendency: 1.0,
            specialist_min: 0.25,
            specialist_other_low: -0.75,
            specialist_other_high: 0.25,
            balancer_sum: 0.5,
            counter_sum: -1.5,
        }
    }
}

/// The fields the rules look at, extracted from a rankable record.
#[derive(Debug, Clone, Copy)]
pub struct Profile<'a> {
    pub attack: f64,
    pub defense: f64,
    pub medal: Medal,
    pub card_type: CardType,
    pub deviation_sum: Option<f64>,
    pub highlights: &'a [Highlight],
}

impl<'a> Profile<'a> {
    /// `None` for records with a null tendency.
    #[must_use]
    pub fn of(record: &'a CardAggregateRecord) -> Option<Self> {
        Some(Self {
            attack: record.turn_tendency?,
            defense: record.hp_tendency?,
            medal: record.medal,
            card_type: record.card_type,
            deviation_sum: record.deviation_sum(),
            highlights: &record.highlights,
        })
    }

    fn sum(&self) -> f64 {
        self.attack + self.defense
    }
}

type Rule = fn(&Profile<'_>, &SpotlightThresholds) -> bool;

fn is_honor(p: &Profile<'_>, t: &SpotlightThresholds) -> bool {
    let both = p.attack > t.honor_both_min && p.defense > t.honor_both_min;
    let strongest = p.attack.max(p.defense);
    p.medal >= Medal::Silver
        || (both && strongest > t.honor_single_strong)
        || (p.medal >= Medal::Bronze && both && strongest > t.honor_single_medal)
        || (p.card_type != CardType::Misfortune
            && p.sum() >= t.honor_sum_min
            && p.medal >= Medal::Bronze
            && p.deviation_sum.is_some_and(|d| d >= t.honor_deviation_sum))
}

fn is_star(p: &Profile<'_>, t: &SpotlightThresholds) -> bool {
    let final_boss = p
        .highlights
        .iter()
        .any(|h| h.act == 4 && h.combat_type == CombatType::Boss);
    let late_game = !p.highlights.is_empty() && p.highlights.iter().all(|h| h.act >= 3);
    (p.deviation_sum.is_some_and(|d| d < t.star_deviation_sum) && final_boss)
        || (p.medal.is_awarded() && late_game)
        || p.attack > t.star_single_tendency
        || p.defense > t.star_single_tendency
}

fn specialist(lead: f64, other: f64, t: &SpotlightThresholds) -> bool {
    lead >= t.specialist_min && (t.specialist_other_low..=t.specialist_other_high).contains(&other)
}

fn is_high_roller(p: &Profile<'_>, t: &SpotlightThresholds) -> bool {
    specialist(p.attack, p.defense, t)
}

fn is_solid_defender(p: &Profile<'_>, t: &SpotlightThresholds) -> bool {
    specialist(p.defense, p.attack, t)
}

fn is_balancer(p: &Profile<'_>, t: &SpotlightThresholds) -> bool {
    p.attack > 0.0 && p.defense > 0.0 && p.sum() >= t.balancer_sum
}

fn is_counter(p: &Profile<'_>, t: &SpotlightThresholds) -> bool {
    p.sum() < t.counter_sum && p.medal.is_awarded()
}

/// Rules in priority order; the first match wins.
pub const RULES: [(SpotlightCategory, Rule); 6] = [
    (SpotlightCategory::Honor, is_honor),
    (SpotlightCategory::Star, is_star),
    (SpotlightCategory::HighRoller, is_high_roller),
    (SpotlightCategory::SolidDefender, is_solid_defender),
    (SpotlightCategory::Balancer, is_balancer),
    (SpotlightCategory::Counter, is_counter),
];

/// Classify a record. Records with a null tendency are never classified.
#[must_use]
pub fn classify(
    record: &CardAggregateRecord,
    thresholds: &SpotlightThresholds,
) -> Option<SpotlightCategory> {
    let profile = Profile::of(record)?;
    RULES
        .iter()
        .find(|(_, rule)| rule(&profile, thresholds))
        .map(|(category, _)| *category)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpotlightEntry {
    pub name: String,
    pub top_adopted: bool,
}

/// Canonical card names grouped per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpotlightReport {
    pub groups: BTreeMap<SpotlightCategory, Vec<SpotlightEntry>>,
}

impl SpotlightReport {
    #[must_use]
    pub fn build(records: &[CardAggregateRecord], thresholds: &SpotlightThresholds) -> Self {
        let rankable: Vec<&CardAggregateRecord> =
            records.iter().filter(|r| r.is_rankable()).collect();
        let top_adopted: BTreeSet<&str> =
            top_n_by(&rankable, |r| Some(r.total_fights_with), ADOPTION_TOP_N)
                .into_iter()
                .map(|(r, _)| r.name.as_str())
                .collect();

        let mut names: BTreeMap<SpotlightCategory, BTreeSet<&str>> = BTreeMap::new();
        for record in &rankable {
            if let Some(category) = classify(record, thresholds) {
                names.entry(category).or_default().insert(record.name.as_str());
            }
        }

        let groups = names
            .into_iter()
            .map(|(category, set)| {
                let entries = set
                    .into_iter()
                    .map(|name| SpotlightEntry {
                        name: name.to_string(),
                        top_adopted: top_adopted.contains(name),
                    })
                    .collect();
                (category, entries)
            })
            .collect();
        log::debug!("spotlight report built from {} rankable records", rankable.len());
        Self { groups }
    }

    #[must_use]
    pub fn entries(&self, category: SpotlightCategory) -> &[SpotlightEntry] {
        self.groups.get(&category).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn category_of(&self, name: &str) -> Option<SpotlightCategory> {
        self.groups
            .iter()
            .find(|(_, entries)| entries.iter().any(|e| e.name == name))
            .map(|(category, _)| *category)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.values().all(Vec::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CardType, Rarity};
    use crate::test_support::record;

    fn tendency(attack: f64, defense: f64, medal: Medal) -> CardAggregateRecord {
        let mut r = record("テスト", CardType::Skill, Rarity::Common);
        r.turn_tendency = Some(attack);
        r.hp_tendency = Some(defense);
        r.medal = medal;
        r
    }

    fn highlight(act: u8, combat_type: CombatType) -> Highlight {
        Highlight {
            act,
            combat_type,
            ja: String::new(),
            en: String::new(),
        }
    }

    #[test]
    fn gold_medal_alone_earns_honor() {
        let mut r = tendency(0.8, 0.3, Medal::Gold);
        r.card_type = CardType::Attack;
        assert_eq!(classify(&r, &SpotlightThresholds::default()), Some(SpotlightCategory::Honor));
    }

    #[test]
    fn bronze_attacker_below_honor_falls_to_high_roller() {
        let t = SpotlightThresholds::default();
        let mut r = tendency(0.3, -0.5, Medal::Bronze);
        r.turn_deviation = Some(52.0);
        r.hp_deviation = Some(47.0);
        assert_eq!(classify(&r, &t), Some(SpotlightCategory::HighRoller));

        // Defense outside the specialist band and no other rule applies.
        let r = tendency(0.3, -0.9, Medal::Bronze);
        assert_eq!(classify(&r, &t), None);
    }

    #[test]
    fn honor_deviation_sum_boundary_is_inclusive() {
        let t = SpotlightThresholds::default();
        let mut r = tendency(0.5, 0.25, Medal::Bronze);
        r.turn_deviation = Some(50.0);
        r.hp_deviation = Some(50.0);
        assert_eq!(classify(&r, &t), Some(SpotlightCategory::Honor));

        r.hp_deviation = Some(49.99);
        assert_ne!(classify(&r, &t), Some(SpotlightCategory::Honor));

        r.hp_deviation = Some(50.0);
        r.card_type = CardType::Misfortune;
        assert_ne!(classify(&r, &t), Some(SpotlightCategory::Honor));
    }

    #[test]
    fn star_rules_cover_final_boss_and_late_game() {
        let t = SpotlightThresholds::default();
        let mut boss = tendency(0.1, 0.1, Medal::None);
        boss.turn_deviation = Some(49.0);
        boss.hp_deviation = Some(49.0);
        boss.highlights = vec![highlight(4, CombatType::Boss), highlight(1, CombatType::Enemy)];
        assert_eq!(classify(&boss, &t), Some(SpotlightCategory::Star));

        let mut late = tendency(0.1, 0.1, Medal::Bronze);
        late.highlights = vec![highlight(3, CombatType::Enemy), highlight(4, CombatType::EliteEnemy)];
        assert_eq!(classify(&late, &t), Some(SpotlightCategory::Star));

        let empty = tendency(0.1, 0.1, Medal::Bronze);
        assert_ne!(classify(&empty, &t), Some(SpotlightCategory::Star));

        let spike = tendency(1.2, -2.0, Medal::None);
        assert_eq!(classify(&spike, &t), Some(SpotlightCategory::Star));
    }

    #[test]
    fn remaining_rules_follow_priority_order() {
        let t = SpotlightThresholds::default();
        assert_eq!(
            classify(&tendency(-0.5, 0.4, Medal::None), &t),
            Some(SpotlightCategory::SolidDefender)
        );
        assert_eq!(
            classify(&tendency(0.2, 0.3, Medal::None), &t),
            Some(SpotlightCategory::SolidDefender)
        );
        assert_eq!(
            classify(&tendency(0.3, 0.3, Medal::None), &t),
            Some(SpotlightCategory::Balancer)
        );
        assert_eq!(classify(&tendency(0.24, 0.24, Medal::None), &t), None);
        assert_eq!(
            classify(&tendency(-1.0, -0.8, Medal::Bronze), &t),
            Some(SpotlightCategory::Counter)
        );
        assert_eq!(classify(&tendency(-1.0, -0.8, Medal::None), &t), None);
    }

    #[test]
    fn null_tendency_is_never_classified() {
        let mut r = tendency(2.0, 2.0, Medal::Gold);
        r.hp_tendency = None;
        assert_eq!(classify(&r, &SpotlightThresholds::default()), None);
    }

    #[test]
    fn classification_is_deterministic() {
        let t = SpotlightThresholds::default();
        let r = tendency(0.6, 0.4, Medal::Bronze);
        let first = classify(&r, &t);
        for _ in 0..5 {
            assert_eq!(classify(&r, &t), first);
        }
    }

    #[test]
    fn report_groups_sorted_unique_names_and_marks_adoption() {
        let t = SpotlightThresholds::default();
        let mut b = tendency(-0.5, 0.4, Medal::None);
        b.name = "B".into();
        b.total_fights_with = 10.0;
        let mut a = tendency(-0.4, 0.5, Medal::None);
        a.name = "A".into();
        a.total_fights_with = 20.0;
        let mut null = tendency(0.0, 0.0, Medal::None);
        null.name = "N".into();
        null.turn_tendency = None;

        let report = SpotlightReport::build(&[b.clone(), a, b, null], &t);
        let names: Vec<&str> = report
            .entries(SpotlightCategory::SolidDefender)
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["A", "B"]);
        assert!(report.entries(SpotlightCategory::SolidDefender).iter().all(|e| e.top_adopted));
        assert_eq!(report.category_of("A"), Some(SpotlightCategory::SolidDefender));
        assert_eq!(report.category_of("N"), None);
        assert!(report.entries(SpotlightCategory::Star).is_empty());
    }
}
