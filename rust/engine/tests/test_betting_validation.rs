use gambit_engine::combatant::CombatAction as A;
use gambit_engine::errors::EngineError;
use gambit_engine::rules::{validate_action, ValidatedAction};

#[test]
fn attack_zero_is_invalid() {
    let err = validate_action(
        100,
        /*stamina*/ 3,
        /*to_match*/ 0,
        A::Attack(0),
    )
    .unwrap_err();
    match err {
        EngineError::InvalidCommitment { .. } => {}
        _ => panic!("expected InvalidCommitment"),
    }
}

#[test]
fn attack_over_health_becomes_allin() {
    let va = validate_action(50, 3, 0, A::Attack(100)).unwrap();
    assert_eq!(va, ValidatedAction::AllIn(50));
}

#[test]
fn engage_with_insufficient_health_is_allin_short_call() {
    let va = validate_action(60, 3, 100, A::Engage).unwrap();
    assert_eq!(va, ValidatedAction::AllIn(60));
}

#[test]
fn short_counter_attack_becomes_allin_without_error() {
    // to_match=40, stack=45, CounterAttack(10) -> total 50 >= 45 -> AllIn(45)
    let va = validate_action(45, 3, 40, A::CounterAttack(10)).unwrap();
    assert_eq!(va, ValidatedAction::AllIn(45));
}

#[test]
fn counter_attack_carries_the_outstanding_match() {
    let va = validate_action(100, 3, 20, A::CounterAttack(10)).unwrap();
    assert_eq!(va, ValidatedAction::CounterAttack(30));
}

#[test]
fn defend_facing_a_bet_is_rejected() {
    let err = validate_action(100, 3, 25, A::Defend).unwrap_err();
    assert_eq!(err, EngineError::DefendFacingBet { to_match: 25 });
}

#[test]
fn raising_without_stamina_is_rejected() {
    let err = validate_action(100, 0, 0, A::Attack(10)).unwrap_err();
    assert_eq!(err, EngineError::OutOfStamina);

    // Matching and defending stay free.
    assert!(validate_action(100, 0, 25, A::Engage).is_ok());
    assert!(validate_action(100, 0, 0, A::Defend).is_ok());
}

#[test]
fn brace_is_always_accepted() {
    assert_eq!(validate_action(0, 0, 500, A::Brace), Ok(ValidatedAction::Brace));
}
