use gambit_engine::cards::Card;
use gambit_engine::combat::{CombatConfig, CombatState, Phase};
use gambit_engine::combatant::{CombatAction as A, CombatantState};
use gambit_engine::deck::Deck;
use gambit_engine::elements::ElementalBonus;
use gambit_engine::errors::EngineError;
use gambit_engine::piece::Side;

fn cards(codes: &str) -> Vec<Card> {
    codes
        .split_whitespace()
        .map(|c| c.parse().unwrap())
        .collect()
}

fn combatant(side: Side, health: u32, stamina: u32) -> CombatantState {
    let id = if side == Side::White { 1 } else { 2 };
    CombatantState::new(side, id, health, health, stamina, stamina, 10, ElementalBonus::none())
}

/// Deal order: hole cards alternate attacker/defender, then burn+3, burn+1,
/// burn+1 community cards.
const ROYAL_VS_TWO_PAIR: &str = "As 9d Ks 9c 2h Qs Js Ts 3h 2c 4h 2d";

fn scripted_combat(stack: &str, config: CombatConfig) -> CombatState {
    CombatState::new(
        combatant(Side::White, 50, 3),
        combatant(Side::Black, 40, 3),
        Deck::stacked(cards(stack)),
        config,
    )
    .unwrap()
}

#[test]
fn phases_progress_in_strict_order() {
    let mut combat = scripted_combat(ROYAL_VS_TWO_PAIR, CombatConfig::default());
    assert_eq!(combat.phase(), Phase::FirstStrike);
    assert_eq!(combat.advance_phase().unwrap(), Phase::Mulligan);
    assert_eq!(combat.advance_phase().unwrap(), Phase::SpellPet);
    assert_eq!(combat.advance_phase().unwrap(), Phase::Faith);
    assert_eq!(combat.community().len(), 3);

    // The Faith round has not settled: no one is ready.
    assert_eq!(combat.advance_phase(), Err(EngineError::RoundNotSettled));

    combat.perform_action(Side::White, A::Defend).unwrap();
    combat.perform_action(Side::Black, A::Defend).unwrap();
    assert!(combat.round_settled());
    assert_eq!(combat.advance_phase().unwrap(), Phase::Foresight);
    assert_eq!(combat.community().len(), 4);

    combat.perform_action(Side::White, A::Defend).unwrap();
    combat.perform_action(Side::Black, A::Defend).unwrap();
    assert_eq!(combat.advance_phase().unwrap(), Phase::Destiny);
    assert_eq!(combat.community().len(), 5);

    combat.perform_action(Side::White, A::Defend).unwrap();
    combat.perform_action(Side::Black, A::Defend).unwrap();
    assert_eq!(combat.advance_phase().unwrap(), Phase::Resolution);
}

#[test]
fn betting_actions_are_rejected_outside_dealt_phases() {
    let mut combat = scripted_combat(ROYAL_VS_TWO_PAIR, CombatConfig::default());
    let err = combat.perform_action(Side::White, A::Defend).unwrap_err();
    assert!(matches!(err, EngineError::WrongPhase { .. }));
}

#[test]
fn counter_attack_reopens_the_round() {
    let mut combat = scripted_combat(ROYAL_VS_TWO_PAIR, CombatConfig::default());
    for _ in 0..3 {
        combat.advance_phase().unwrap();
    }
    assert_eq!(combat.phase(), Phase::Faith);

    combat.perform_action(Side::White, A::Attack(10)).unwrap();
    assert!(combat.combatant(Side::White).is_ready());
    assert!(!combat.round_settled());

    combat
        .perform_action(Side::Black, A::CounterAttack(5))
        .unwrap();
    // The raise un-readies the original bettor.
    assert!(!combat.combatant(Side::White).is_ready());
    assert!(!combat.round_settled());
    assert_eq!(combat.outstanding(Side::White), 5);

    combat.perform_action(Side::White, A::Engage).unwrap();
    assert!(combat.round_settled());
    assert_eq!(combat.pot(), 30);
}

#[test]
fn simultaneous_zero_health_forces_an_all_in_showdown() {
    let mut combat = scripted_combat(ROYAL_VS_TWO_PAIR, CombatConfig::default());
    for _ in 0..3 {
        combat.advance_phase().unwrap();
    }

    combat.perform_action(Side::White, A::Attack(100)).unwrap();
    assert_eq!(combat.combatant(Side::White).health(), 0);
    assert!(!combat.is_all_in());

    combat.perform_action(Side::Black, A::Engage).unwrap();
    assert_eq!(combat.combatant(Side::Black).health(), 0);
    assert!(combat.is_all_in());

    // Betting is closed; dealing continues straight through to resolution.
    let err = combat.perform_action(Side::White, A::Defend).unwrap_err();
    assert_eq!(err, EngineError::BettingClosed);
    assert_eq!(combat.advance_phase().unwrap(), Phase::Foresight);
    assert_eq!(combat.advance_phase().unwrap(), Phase::Destiny);
    assert_eq!(combat.advance_phase().unwrap(), Phase::Resolution);
}

#[test]
fn mulligan_redraws_hole_cards_once_per_hand() {
    // Two extra cards after the scripted deal feed the redraw.
    let stack = "As 9d Ks 9c 5h 6h 2h Qs Js Ts 3h 2c 4h 2d";
    let mut combat = scripted_combat(stack, CombatConfig::default());
    combat.advance_phase().unwrap();
    assert_eq!(combat.phase(), Phase::Mulligan);

    let before = combat.combatant(Side::White).hole_cards();
    combat.mulligan(Side::White, true).unwrap();
    let after = combat.combatant(Side::White).hole_cards();
    assert_ne!(before, after);
    assert_eq!(after, cards("5h 6h"));

    assert_eq!(
        combat.mulligan(Side::White, true),
        Err(EngineError::MulliganUsed)
    );
    // Declining is always fine.
    combat.mulligan(Side::Black, false).unwrap();
}

#[test]
fn defend_restores_one_stamina_point_up_to_the_cap() {
    let mut combat = CombatState::new(
        CombatantState::new(Side::White, 1, 50, 50, 1, 2, 10, ElementalBonus::none()),
        combatant(Side::Black, 40, 3),
        Deck::stacked(cards(ROYAL_VS_TWO_PAIR)),
        CombatConfig::default(),
    )
    .unwrap();
    for _ in 0..3 {
        combat.advance_phase().unwrap();
    }

    combat.perform_action(Side::White, A::Defend).unwrap();
    assert_eq!(combat.combatant(Side::White).stamina(), 2);

    combat.perform_action(Side::Black, A::Defend).unwrap();
    combat.advance_phase().unwrap();
    combat.perform_action(Side::White, A::Defend).unwrap();
    // Already at the cap.
    assert_eq!(combat.combatant(Side::White).stamina(), 2);
}

#[test]
fn timer_defaults_to_defend_with_nothing_outstanding() {
    let config = CombatConfig {
        max_turn_time: 10,
        ..CombatConfig::default()
    };
    let mut combat = scripted_combat(ROYAL_VS_TWO_PAIR, config);
    for _ in 0..3 {
        combat.advance_phase().unwrap();
    }

    assert!(combat.tick(5).is_empty());
    let applied = combat.tick(5);
    assert_eq!(applied.len(), 2);
    assert!(applied.iter().all(|(_, a)| *a == A::Defend));
    assert!(combat.round_settled());
}

#[test]
fn timer_defaults_to_brace_when_facing_a_bet() {
    let config = CombatConfig {
        max_turn_time: 10,
        ..CombatConfig::default()
    };
    let mut combat = scripted_combat(ROYAL_VS_TWO_PAIR, config);
    for _ in 0..3 {
        combat.advance_phase().unwrap();
    }

    combat.perform_action(Side::White, A::Attack(10)).unwrap();
    let applied = combat.tick(10);
    assert_eq!(applied, vec![(Side::Black, A::Brace)]);
    assert_eq!(combat.phase(), Phase::Resolution);

    let resolution = combat.resolve().unwrap();
    assert_eq!(resolution.winner, Some(Side::White));
}

#[test]
fn blinds_are_posted_when_the_hand_starts() {
    let config = CombatConfig {
        blind: 2,
        ..CombatConfig::default()
    };
    let combat = scripted_combat(ROYAL_VS_TWO_PAIR, config);
    assert_eq!(combat.combatant(Side::White).committed(), 2);
    assert_eq!(combat.combatant(Side::White).blind(), 2);
    assert_eq!(combat.combatant(Side::White).health(), 48);
    assert_eq!(combat.pot(), 4);
}
