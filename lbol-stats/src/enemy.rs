//! Per-character enemy encounter table.

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::data::{BoxplotSummary, CharacterDataset, CombatType, EnemyRecord};
use crate::scale::{BoxplotTrack, Rgba, color_for_value};
use crate::text::Lang;

/// `(min, max)` over the values, `None` when empty.
fn bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Boxplot and heat-color bounds for one act.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ActBounds {
    pub turns: Option<(f64, f64)>,
    pub hp_loss: Option<(f64, f64)>,
    pub p_change: Option<(f64, f64)>,
    pub avg_hp_loss: Option<(f64, f64)>,
    pub avg_p_change: Option<(f64, f64)>,
}

impl ActBounds {
    fn of(rows: &[&EnemyRecord]) -> Self {
        let boxplot = |pick: fn(&EnemyRecord) -> Option<BoxplotSummary>| {
            let lo = rows.iter().filter_map(|r| pick(r)).map(|b| b.min);
            let hi = rows.iter().filter_map(|r| pick(r)).map(|b| b.max);
            Some((lo.fold(f64::INFINITY, f64::min), hi.fold(f64::NEG_INFINITY, f64::max)))
                .filter(|(lo, hi)| lo.is_finite() && hi.is_finite())
        };
        Self {
            turns: boxplot(|r| r.turns_boxplot),
            hp_loss: boxplot(|r| r.hp_loss_boxplot),
            p_change: boxplot(|r| r.p_change_boxplot),
            avg_hp_loss: bounds(rows.iter().map(|r| r.avg_hp_loss)),
            avg_p_change: bounds(rows.iter().map(|r| r.avg_p_change)),
        }
    }
}

fn track(
    summary: Option<BoxplotSummary>,
    scale: Option<(f64, f64)>,
    negate: bool,
) -> Option<BoxplotTrack> {
    let (lo, hi) = scale?;
    BoxplotTrack::project(&summary?, lo, hi, negate)
}

fn heat(value: f64, range: Option<(f64, f64)>, reverse: bool) -> Rgba {
    range.map_or(Rgba::TRANSPARENT, |(lo, hi)| color_for_value(value, lo, hi, reverse))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnemyRow {
    pub act: u8,
    pub name: String,
    pub enemy_type: CombatType,
    pub encounters: u64,
    pub avg_turns: f64,
    /// Average HP loss shown as a negative number.
    pub hp_change: f64,
    pub avg_p_change: f64,
    pub turns_track: Option<BoxplotTrack>,
    pub hp_track: Option<BoxplotTrack>,
    pub p_track: Option<BoxplotTrack>,
    pub hp_color: Rgba,
    pub p_color: Rgba,
}

impl EnemyRow {
    #[must_use]
    pub const fn row_class(&self) -> &'static str {
        match self.enemy_type {
            CombatType::Enemy => "",
            CombatType::EliteEnemy => "elite-enemy",
            CombatType::Boss => "boss-enemy",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SortColumn {
    Act,
    Name,
    Encounters,
    AvgTurns,
    HpLoss,
    PChange,
}

impl SortColumn {
    pub const ALL: [Self; 6] = [
        Self::Act,
        Self::Name,
        Self::Encounters,
        Self::AvgTurns,
        Self::HpLoss,
        Self::PChange,
    ];

    #[must_use]
    pub const fn header_key(self) -> &'static str {
        match self {
            Self::Act => "enemy_table_act",
            Self::Name => "enemy_table_name",
            Self::Encounters => "enemy_table_encounters",
            Self::AvgTurns => "enemy_table_avg_t",
            Self::HpLoss => "enemy_table_hp",
            Self::PChange => "enemy_table_p",
        }
    }

    fn compare(self, a: &EnemyRow, b: &EnemyRow) -> Ordering {
        let numeric = |f: fn(&EnemyRow) -> f64| f(a).total_cmp(&f(b));
        match self {
            Self::Act => a.act.cmp(&b.act),
            Self::Name => a.name.cmp(&b.name),
            Self::Encounters => a.encounters.cmp(&b.encounters),
            Self::AvgTurns => numeric(|r| r.avg_turns),
            Self::HpLoss => numeric(|r| r.hp_change),
            Self::PChange => numeric(|r| r.avg_p_change),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Header sort state: a new column sorts ascending, the same column toggles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortState {
    pub active: Option<(SortColumn, SortDirection)>,
}

impl SortState {
    pub fn activate(&mut self, column: SortColumn) -> SortDirection {
        let direction = match self.active {
            Some((current, SortDirection::Ascending)) if current == column => {
                SortDirection::Descending
            }
            _ => SortDirection::Ascending,
        };
        self.active = Some((column, direction));
        direction
    }

    #[must_use]
    pub fn direction_of(&self, column: SortColumn) -> Option<SortDirection> {
        self.active
            .filter(|(current, _)| *current == column)
            .map(|(_, direction)| direction)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnemyTable {
    pub character: String,
    pub rows: Vec<EnemyRow>,
}

impl EnemyTable {
    /// Characters present in the enemy data, sorted.
    #[must_use]
    pub fn characters(dataset: &CharacterDataset) -> Vec<String> {
        dataset
            .enemy_data
            .iter()
            .map(|r| r.character.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    #[must_use]
    pub fn build(dataset: &CharacterDataset, character: &str, lang: Lang) -> Self {
        let mut records: Vec<&EnemyRecord> = dataset
            .enemy_data
            .iter()
            .filter(|r| r.character == character)
            .collect();
        records.sort_by(|a, b| {
            a.act
                .cmp(&b.act)
                .then(a.enemy_type.cmp(&b.enemy_type))
                .then(a.min_level.cmp(&b.min_level))
        });

        let rows = records
            .iter()
            .map(|record| {
                let act_rows: Vec<&EnemyRecord> = records
                    .iter()
                    .copied()
                    .filter(|r| r.act == record.act)
                    .collect();
                let act = ActBounds::of(&act_rows);
                EnemyRow {
                    act: record.act,
                    name: record.display_name(lang).to_string(),
                    enemy_type: record.enemy_type,
                    encounters: record.encounters,
                    avg_turns: record.avg_turns,
                    hp_change: -record.avg_hp_loss,
                    avg_p_change: record.avg_p_change,
                    turns_track: track(record.turns_boxplot, act.turns, false),
                    hp_track: track(record.hp_loss_boxplot, act.hp_loss, true),
                    p_track: track(record.p_change_boxplot, act.p_change, false),
                    hp_color: heat(record.avg_hp_loss, act.avg_hp_loss, false),
                    p_color: heat(record.avg_p_change, act.avg_p_change, true),
                }
            })
            .collect();
        Self {
            character: character.to_string(),
            rows,
        }
    }

    /// Stable re-sort of the current row order.
    pub fn sort(&mut self, column: SortColumn, direction: SortDirection) {
        self.rows.sort_by(|a, b| match direction {
            SortDirection::Ascending => column.compare(a, b),
            SortDirection::Descending => column.compare(b, a),
        });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enemy(act: u8, name: &str, kind: CombatType, level: u32, hp: f64, p: f64) -> EnemyRecord {
        EnemyRecord {
            character: "CirnoA".into(),
            act,
            enemy_id: name.into(),
            enemy_type: kind,
            min_level: level,
            name_ja: name.into(),
            name_en: format!("{name} en"),
            encounters: 10,
            avg_turns: 3.0,
            avg_hp_loss: hp,
            avg_p_change: p,
            turns_boxplot: Some(BoxplotSummary {
                min: 1.0,
                q1: 2.0,
                median: 3.0,
                q3: 4.0,
                max: 6.0,
                mean: 3.0,
            }),
            hp_loss_boxplot: None,
            p_change_boxplot: None,
        }
    }

    fn dataset() -> CharacterDataset {
        let mut other = enemy(1, "Other", CombatType::Enemy, 1, 0.0, 0.0);
        other.character = "ReimuB".into();
        CharacterDataset {
            enemy_data: vec![
                enemy(2, "Boss2", CombatType::Boss, 15, 20.0, 5.0),
                enemy(1, "Elite", CombatType::EliteEnemy, 5, 12.0, 1.0),
                enemy(1, "Slime", CombatType::Enemy, 3, 4.0, 3.0),
                enemy(1, "Fairy", CombatType::Enemy, 1, 2.0, 3.0),
                other,
            ],
            ..CharacterDataset::default()
        }
    }

    #[test]
    fn rows_sort_by_act_type_and_level() {
        let table = EnemyTable::build(&dataset(), "CirnoA", Lang::Ja);
        let names: Vec<&str> = table.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Fairy", "Slime", "Elite", "Boss2"]);
        assert_eq!(table.rows[2].row_class(), "elite-enemy");
        assert!((table.rows[0].hp_change + 2.0).abs() < 1e-9);
        assert_eq!(
            EnemyTable::characters(&dataset()),
            vec!["CirnoA".to_string(), "ReimuB".to_string()]
        );
    }

    #[test]
    fn heat_colors_use_per_act_bounds() {
        let table = EnemyTable::build(&dataset(), "CirnoA", Lang::En);
        assert_eq!(table.rows[0].name, "Fairy en");
        // Lowest HP loss of act 1 is green, highest red.
        assert_eq!(table.rows[0].hp_color.to_string(), "rgba(0, 255, 0, 0.4)");
        assert_eq!(table.rows[2].hp_color.to_string(), "rgba(255, 0, 0, 0.4)");
        // P change is reversed: the highest value reads green.
        assert_eq!(table.rows[0].p_color.to_string(), "rgba(0, 255, 0, 0.4)");
        // A lone boss in act 2 has a degenerate range.
        assert_eq!(table.rows[3].hp_color, Rgba::TRANSPARENT);
        assert!(table.rows[0].turns_track.is_some());
        assert!(table.rows[0].hp_track.is_none());
    }

    #[test]
    fn sort_state_toggles_and_resets() {
        let mut state = SortState::default();
        assert_eq!(state.activate(SortColumn::Encounters), SortDirection::Ascending);
        assert_eq!(state.activate(SortColumn::Encounters), SortDirection::Descending);
        assert_eq!(state.activate(SortColumn::Encounters), SortDirection::Ascending);
        state.activate(SortColumn::Encounters);
        assert_eq!(state.activate(SortColumn::Name), SortDirection::Ascending);
        assert_eq!(state.direction_of(SortColumn::Encounters), None);
    }

    #[test]
    fn sorting_by_hp_uses_displayed_sign() {
        let mut table = EnemyTable::build(&dataset(), "CirnoA", Lang::Ja);
        table.sort(SortColumn::HpLoss, SortDirection::Ascending);
        assert_eq!(table.rows[0].name, "Boss2");
        table.sort(SortColumn::Name, SortDirection::Descending);
        assert_eq!(table.rows[0].name, "Slime");
    }
}
