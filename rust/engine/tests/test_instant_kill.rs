use gambit_engine::army::{ArmyConfig, UnitConfig};
use gambit_engine::board::{GameStatus, Pos};
use gambit_engine::combat::Phase;
use gambit_engine::combatant::CombatAction as A;
use gambit_engine::elements::Element;
use gambit_engine::engine::{Engine, MatchConfig};
use gambit_engine::errors::EngineError;
use gambit_engine::piece::{PieceId, PieceKind as K, Side};

fn sparse_engine(pieces: &[(K, Side, (i8, i8), u32)]) -> (Engine, Vec<PieceId>) {
    let mut engine = Engine::new(MatchConfig::default());
    engine
        .initialize_board(&ArmyConfig::standard(), &ArmyConfig::standard())
        .unwrap();
    let standard: Vec<PieceId> = engine.board().pieces().iter().map(|p| p.id()).collect();
    for id in standard {
        engine.board_mut().remove_piece(id);
    }
    let ids = pieces
        .iter()
        .map(|&(kind, side, (x, y), hp)| {
            engine.board_mut().place(
                kind,
                side,
                Pos::new(x, y),
                &UnitConfig {
                    max_health: hp,
                    element: Element::Neutral,
                },
            )
        })
        .collect();
    (engine, ids)
}

#[test]
fn pawn_attacker_kills_without_entering_combat() {
    let (mut engine, ids) = sparse_engine(&[
        (K::King, Side::White, (0, 0), 100),
        (K::Pawn, Side::White, (3, 3), 20),
        (K::Knight, Side::Black, (4, 4), 50),
        (K::King, Side::Black, (7, 7), 100),
    ]);
    let pawn = ids[1];
    let knight = ids[2];

    engine.select_piece(pawn).unwrap();
    let collision = engine.move_piece(Pos::new(4, 4)).unwrap().unwrap();
    assert!(collision.instant_kill);

    // No betting phase ever ran.
    assert!(engine.combat().is_none());
    assert!(engine.board().piece(knight).is_none());
    let occupant = engine.board().piece_at(Pos::new(4, 4)).unwrap();
    assert_eq!(occupant.id(), pawn);
    assert_eq!(engine.side_to_move(), Side::Black);
    assert_eq!(engine.status(), GameStatus::Playing);
}

#[test]
fn pawn_defender_never_survives_an_attack() {
    let (mut engine, ids) = sparse_engine(&[
        (K::King, Side::White, (0, 0), 100),
        (K::Knight, Side::White, (3, 3), 50),
        (K::Pawn, Side::Black, (4, 5), 20),
        (K::King, Side::Black, (7, 7), 100),
    ]);
    engine.select_piece(ids[1]).unwrap();
    let collision = engine.move_piece(Pos::new(4, 5)).unwrap().unwrap();
    assert!(collision.instant_kill);
    assert!(engine.board().piece(ids[2]).is_none());
}

#[test]
fn king_attacker_finishes_on_the_spot() {
    let (mut engine, ids) = sparse_engine(&[
        (K::King, Side::White, (3, 3), 100),
        (K::Rook, Side::Black, (4, 4), 60),
        (K::King, Side::Black, (7, 7), 100),
    ]);
    engine.select_piece(ids[0]).unwrap();
    let collision = engine.move_piece(Pos::new(4, 4)).unwrap().unwrap();
    assert!(collision.instant_kill);
    assert!(engine.board().piece(ids[1]).is_none());
}

#[test]
fn non_finishing_collision_waits_behind_the_animation_gate() {
    let (mut engine, ids) = sparse_engine(&[
        (K::King, Side::White, (0, 0), 100),
        (K::Knight, Side::White, (3, 3), 50),
        (K::Rook, Side::Black, (4, 5), 60),
        (K::King, Side::Black, (7, 7), 100),
    ]);
    let knight = ids[1];
    let rook = ids[2];

    engine.select_piece(knight).unwrap();
    let collision = engine.move_piece(Pos::new(4, 5)).unwrap().unwrap();
    assert!(!collision.instant_kill);

    // Board mutation is deferred and further moves are rejected, not queued.
    assert_eq!(
        engine.board().piece(knight).unwrap().pos(),
        Pos::new(3, 3)
    );
    assert!(engine.board().piece(rook).is_some());
    assert_eq!(
        engine.select_piece(knight).unwrap_err(),
        EngineError::AnimationPending
    );

    engine.complete_attack_animation().unwrap();
    engine.initialize_poker_combat().unwrap();
    assert_eq!(engine.status(), GameStatus::Combat);
    assert_eq!(engine.select_piece(knight).unwrap_err(), EngineError::NotPlaying);
}

#[test]
fn combat_runs_to_a_death_and_mutates_the_board() {
    let (mut engine, ids) = sparse_engine(&[
        (K::King, Side::White, (0, 0), 100),
        (K::Knight, Side::White, (3, 3), 50),
        (K::Rook, Side::Black, (4, 5), 60),
        (K::King, Side::Black, (7, 7), 100),
    ]);
    let knight = ids[1];
    let rook = ids[2];

    engine.select_piece(knight).unwrap();
    engine.move_piece(Pos::new(4, 5)).unwrap();
    engine.complete_attack_animation().unwrap();
    engine.initialize_poker_combat().unwrap();

    let mut hands = 0;
    loop {
        let phase = engine.combat().unwrap().phase();
        match phase {
            Phase::FirstStrike | Phase::Mulligan | Phase::SpellPet => {
                engine.advance_poker_phase().unwrap();
            }
            Phase::Faith | Phase::Foresight | Phase::Destiny => {
                run_betting_round(&mut engine);
                if engine.combat().unwrap().phase() != Phase::Resolution {
                    engine.advance_poker_phase().unwrap();
                }
            }
            Phase::Resolution => {
                hands += 1;
                assert!(hands < 200, "combat failed to converge");
                let resolution = engine.resolve_poker_combat().unwrap();
                if resolution.attacker_health == 0 || resolution.defender_health == 0 {
                    let attacker_won = resolution.defender_health == 0;
                    engine.resolve_combat(&resolution).unwrap();

                    assert!(engine.combat().is_none());
                    assert_eq!(engine.side_to_move(), Side::Black);
                    if attacker_won {
                        assert!(engine.board().piece(rook).is_none());
                        assert_eq!(
                            engine.board().piece(knight).unwrap().pos(),
                            Pos::new(4, 5)
                        );
                    } else {
                        assert!(engine.board().piece(knight).is_none());
                        assert_eq!(engine.board().piece(rook).unwrap().pos(), Pos::new(4, 5));
                    }
                    return;
                }
                engine.start_next_hand(&resolution).unwrap();
            }
        }
    }
}

/// White opens every street for 5 HP while stamina lasts; Black calls.
fn run_betting_round(engine: &mut Engine) {
    loop {
        let combat = engine.combat().unwrap();
        if combat.phase() == Phase::Resolution || combat.is_all_in() || combat.round_settled() {
            return;
        }
        for side in [Side::White, Side::Black] {
            let combat = engine.combat().unwrap();
            if combat.phase() == Phase::Resolution || combat.is_all_in() {
                return;
            }
            if combat.combatant(side).is_ready() {
                continue;
            }
            let outstanding = combat.outstanding(side);
            let action = if outstanding > 0 {
                A::Engage
            } else if side == Side::White && combat.combatant(side).stamina() > 0 {
                A::Attack(5)
            } else {
                A::Defend
            };
            engine.perform_poker_action(side, action).unwrap();
        }
    }
}

#[test]
fn delivering_mate_ends_the_match() {
    let (mut engine, ids) = sparse_engine(&[
        (K::King, Side::White, (7, 0), 100),
        (K::Rook, Side::White, (0, 5), 60),
        (K::Rook, Side::White, (1, 6), 60),
        (K::King, Side::Black, (4, 7), 100),
    ]);
    engine.select_piece(ids[1]).unwrap();
    engine.move_piece(Pos::new(0, 7)).unwrap();
    assert_eq!(engine.board().in_check(), Some(Side::Black));
    assert_eq!(engine.status(), GameStatus::SideWins(Side::White));
}

#[test]
fn stalemating_the_opponent_wins_the_match() {
    let (mut engine, ids) = sparse_engine(&[
        (K::King, Side::White, (5, 5), 100),
        (K::Queen, Side::White, (6, 4), 80),
        (K::King, Side::Black, (7, 7), 100),
    ]);
    engine.select_piece(ids[1]).unwrap();
    engine.move_piece(Pos::new(6, 5)).unwrap();
    // No check, no moves: the stalemated side loses outright.
    assert_eq!(engine.board().in_check(), None);
    assert_eq!(engine.status(), GameStatus::SideWins(Side::White));
}

#[test]
fn pawns_promote_to_the_configured_queen() {
    let (mut engine, ids) = sparse_engine(&[
        (K::King, Side::White, (0, 0), 100),
        (K::Pawn, Side::White, (6, 6), 20),
        (K::King, Side::Black, (2, 4), 100),
    ]);
    engine.select_piece(ids[1]).unwrap();
    engine.move_piece(Pos::new(6, 7)).unwrap();

    let promoted = engine.board().piece_at(Pos::new(6, 7)).unwrap();
    assert_eq!(promoted.kind(), K::Queen);
    // Standard army queen configuration.
    assert_eq!(promoted.max_health(), 80);
    assert_eq!(promoted.element(), Element::Fire);
}
