//! Record builders shared by the unit tests.

use crate::data::{
    ActPerformance, CardAggregateRecord, CardType, CombatType, DeviationSpread, Medal, Rarity,
    SituationalRecord,
};

/// Centered aggregate record with neutral tendencies and no volume.
pub fn record(name: &str, card_type: CardType, rarity: Rarity) -> CardAggregateRecord {
    CardAggregateRecord {
        name: name.to_string(),
        name_en: String::new(),
        card_id: None,
        card_type,
        rarity,
        medal: Medal::None,
        adoption_rate: 0.0,
        attention_score: None,
        stability_score: None,
        turn_deviation: Some(50.0),
        hp_deviation: Some(50.0),
        turn_tendency: Some(0.0),
        hp_tendency: Some(0.0),
        spread: DeviationSpread::default(),
        acts: ActPerformance::default(),
        turn_situational_values: Vec::new(),
        hp_situational_values: Vec::new(),
        total_fights_with: 0.0,
        avg_copies: None,
        avg_upgrade_rate: None,
        partners: Vec::new(),
        partners_en: Vec::new(),
        co_occurrence_ja: None,
        co_occurrence_en: None,
        highlights: Vec::new(),
        highlights_ja_hover: String::new(),
        highlights_en_hover: String::new(),
    }
}

pub fn situational(
    name: &str,
    card_type: CardType,
    act: u8,
    combat_type: CombatType,
) -> SituationalRecord {
    SituationalRecord {
        name: name.to_string(),
        name_en: String::new(),
        card_type,
        act,
        combat_type,
        is_starter: false,
        turn_deviation: Some(50.0),
        hp_deviation: Some(50.0),
        fights_with: 0.0,
        total_fights_in_situation: 0.0,
        co_occurrence_ja: None,
        co_occurrence_en: None,
    }
}
