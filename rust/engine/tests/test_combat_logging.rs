use gambit_engine::cards::{Card, Rank, Suit};
use gambit_engine::combatant::CombatAction;
use gambit_engine::logger::{
    format_combat_id, ActionRecord, CombatLogger, CombatRecord, ShowdownInfo,
};
use gambit_engine::piece::Side;

#[test]
fn combat_ids_are_date_prefixed_sequences() {
    assert_eq!(format_combat_id("20250101", 7), "20250101-000007");

    let mut logger = CombatLogger::with_seq_for_test("20250101");
    assert_eq!(logger.next_id(), "20250101-000001");
    assert_eq!(logger.next_id(), "20250101-000002");
}

#[test]
fn combat_records_round_trip_through_json() {
    let record = CombatRecord {
        combat_id: "20250101-000001".to_string(),
        seed: Some(42),
        actions: vec![
            ActionRecord {
                side: Side::White,
                phase: "faith".to_string(),
                action: CombatAction::Attack(10),
            },
            ActionRecord {
                side: Side::Black,
                phase: "faith".to_string(),
                action: CombatAction::Engage,
            },
        ],
        community: vec![
            Card::new(Suit::Spades, Rank::Queen),
            Card::new(Suit::Spades, Rank::Jack),
            Card::new(Suit::Spades, Rank::Ten),
        ],
        result: Some("Showdown winner=Some(White) damage=10".to_string()),
        ts: Some("2025-01-01T00:00:00Z".to_string()),
        showdown: Some(ShowdownInfo {
            winner: Some(Side::White),
            notes: None,
        }),
    };

    let json = serde_json::to_string(&record).unwrap();
    let parsed: CombatRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, record);
}

#[test]
fn missing_optional_fields_default_when_parsing() {
    let json = r#"{"combat_id":"20250101-000003","seed":null,"actions":[],"community":[],"result":null}"#;
    let parsed: CombatRecord = serde_json::from_str(json).unwrap();
    assert_eq!(parsed.combat_id, "20250101-000003");
    assert!(parsed.ts.is_none());
    assert!(parsed.showdown.is_none());
}
