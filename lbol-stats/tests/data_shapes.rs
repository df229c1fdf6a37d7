use lbol_stats::data::{CardType, CombatType, Medal, Rarity, Situation};
use lbol_stats::enemy::SortColumn;
use lbol_stats::ranking::ReportId;
use lbol_stats::route::GapChoice;
use lbol_stats::spotlight::SpotlightCategory;
use lbol_stats::{CharacterDataset, Lang, UiText};

const FIXTURE: &str = include_str!("../../lbol-web/static/data/CirnoA_data.json");
const LOCALE_JA: &str = include_str!("../../lbol-web/static/locales/ja.json");
const LOCALE_EN: &str = include_str!("../../lbol-web/static/locales/en.json");

fn dataset() -> CharacterDataset {
    CharacterDataset::from_json(FIXTURE).unwrap()
}

#[test]
fn fixture_dataset_parses_every_section() {
    let data = dataset();
    assert_eq!(data.metadata.character, "CirnoA");
    assert_eq!(data.version(), "1.7.2");
    assert_eq!(data.metadata.ordered_situations, vec![
        Situation::new(1, CombatType::Enemy),
        Situation::new(1, CombatType::EliteEnemy),
        Situation::new(4, CombatType::Boss),
    ]);
    assert_eq!(data.agg_data_full.len(), 8);
    assert_eq!(data.sit_data.len(), 8);
    assert_eq!(data.exhibit_data.len(), 5);
    assert_eq!(data.enemy_data.len(), 6);
    assert!((data.route_data.total_runs - 50.0).abs() < f64::EPSILON);
    assert_eq!(data.all_available_characters, vec!["CirnoA", "ReimuA"]);
}

#[test]
fn fixture_records_keep_nulls_and_glyphs() {
    let data = dataset();
    let icicle = data.aggregate("アイシクルフォール").unwrap();
    assert_eq!(icicle.medal, Medal::Silver);
    assert_eq!(icicle.card_type, CardType::Attack);
    assert_eq!(icicle.highlights.len(), 1);
    assert_eq!(icicle.highlights[0].situation(), Situation::new(1, CombatType::EliteEnemy));
    assert_eq!(icicle.highlights[0].text(Lang::En), "Act1 - EliteEnemy (Dev 60.0)");
    assert!(icicle.turn_summary().is_some());

    let blizzard = data.aggregate("ダイヤモンドブリザード").unwrap();
    assert_eq!(blizzard.medal, Medal::None);
    assert_eq!(blizzard.stability_score, None);

    let freeze = data.aggregate("凍結").unwrap();
    assert!(!freeze.is_rankable());
    assert_eq!(data.rankable().count(), 7);
    assert_eq!(data.card_display_name("氷符", Lang::En), "Ice Charm");
}

#[test]
fn fixture_route_details_decode() {
    let data = dataset();
    let route = &data.route_data;
    let gap = &route.node_details["1-2-Gap"];
    assert_eq!(gap.choices.len(), 3);
    let shop = &route.node_details["1-3-Shop"];
    assert_eq!(shop.remove_card_rate, Some(0.45));
    assert!(shop.money_stats.is_some());
    let actions = &route.event_actions["1-2-Adventure"]["Add_Card"];
    assert_eq!(actions[0], ("IceCharm".to_string(), 4.0));
    assert_eq!(data.lookup_tables.exhibit_mana_map["IceWing"], "U");
}

#[test]
fn locales_cover_every_typed_key() {
    for (lang, doc) in [(Lang::Ja, LOCALE_JA), (Lang::En, LOCALE_EN)] {
        let text = UiText::from_json(lang, doc, LOCALE_EN).unwrap();
        let mut keys: Vec<String> = vec![
            "graph_xaxis".into(),
            "graph_yaxis".into(),
            "no_data".into(),
            "agg_view".into(),
            "sit_view".into(),
            "tabs.route".into(),
        ];
        for id in ReportId::ALL {
            keys.push(format!("{}_title", id.text_key()));
            keys.push(format!("{}_desc", id.text_key()));
            keys.push(id.value_key().to_string());
        }
        for category in SpotlightCategory::DISPLAY_ORDER {
            keys.push(format!("{}_title", category.text_key()));
            keys.push(format!("{}_desc", category.text_key()));
        }
        keys.extend(SortColumn::ALL.iter().map(|c| c.header_key().to_string()));
        keys.extend(
            [GapChoice::Rest, GapChoice::Upgrade, GapChoice::Other]
                .iter()
                .map(|c| c.text_key().to_string()),
        );
        for action in ["add", "remove", "upgrade"] {
            for item in ["card", "exhibit"] {
                keys.push(format!("{action}_{item}"));
            }
        }
        for key in keys {
            assert!(text.get(&key).is_ok(), "{lang:?} locale lacks `{key}`");
        }
    }
}

#[test]
fn locale_titles_fill_metadata() {
    let data = dataset();
    let text = UiText::from_json(Lang::Ja, LOCALE_JA, LOCALE_EN).unwrap();
    assert_eq!(
        text.title("agg_title", &data.metadata),
        "CirnoA: カード総合性能 (v1.7.2)"
    );
    // The Japanese document has no wiki label; English fills in.
    assert_eq!(text.t("wiki"), "wiki");
}

#[test]
fn null_type_and_rarity_fall_back_per_record() {
    let mut value: serde_json::Value = serde_json::from_str(FIXTURE).unwrap();
    let first = &mut value["agg_data_full"][0];
    first["Type"] = serde_json::Value::Null;
    first["Rarity"] = serde_json::Value::Null;
    let name = first["Card_Name"].as_str().unwrap().to_string();
    value["sit_data"][0]
        .as_object_mut()
        .unwrap()
        .remove("Type");

    let data = CharacterDataset::from_value(value).unwrap();
    assert_eq!(data.agg_data_full.len(), 8);
    let record = data.aggregate(&name).unwrap();
    assert_eq!(record.card_type, CardType::Unknown);
    assert_eq!(record.rarity, Rarity::Other);
    assert_eq!(data.sit_data[0].card_type, CardType::Unknown);
    assert_eq!(data.agg_data_full[1].rarity, Rarity::Rare);
}
