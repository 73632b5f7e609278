//! Simulation command handler: AI-vs-AI matches with JSONL summaries and
//! optional per-hand combat histories.

use std::io::Write;

use chrono::{SecondsFormat, Utc};
use serde_json::json;

use gambit_ai::{create_ai, Opponent};
use gambit_engine::army::ArmyConfig;
use gambit_engine::board::GameStatus;
use gambit_engine::combat::Phase;
use gambit_engine::engine::{Engine, MatchConfig};
use gambit_engine::logger::{ActionRecord, CombatLogger, CombatRecord, ShowdownInfo};
use gambit_engine::piece::Side;

use crate::error::CliError;

const MAX_COMBAT_HANDS: u32 = 1_000;

/// Runs `matches` AI-vs-AI matches with standard armies. Each match derives
/// its seed from the base seed so runs replay exactly.
pub fn handle_sim_command(
    matches: u64,
    output: Option<String>,
    hands_output: Option<String>,
    seed: Option<u64>,
    max_turns: u32,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if matches == 0 {
        writeln!(err, "matches must be >= 1")?;
        return Err(CliError::InvalidInput("matches must be >= 1".to_string()));
    }
    let base_seed = seed.unwrap_or(0xD1CE_D1CE);

    let mut sink: Option<std::fs::File> = match &output {
        Some(path) => Some(std::fs::File::create(path)?),
        None => None,
    };
    let mut hand_log: Option<CombatLogger> = match &hands_output {
        Some(path) => Some(CombatLogger::create(path)?),
        None => None,
    };

    for i in 0..matches {
        let match_seed = base_seed.wrapping_add(i);
        let summary = run_match(match_seed, max_turns, hand_log.as_mut())?;

        writeln!(
            out,
            "match {}: winner={} moves={} combats={}",
            i + 1,
            summary
                .winner
                .map(|s| format!("{:?}", s))
                .unwrap_or_else(|| "none".into()),
            summary.moves,
            summary.combats,
        )?;

        if let Some(file) = sink.as_mut() {
            let line = json!({
                "match_id": format!("{:06}", i + 1),
                "seed": match_seed,
                "winner": summary.winner,
                "moves": summary.moves,
                "combats": summary.combats,
                "hands": summary.hands,
                "ts": Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            });
            writeln!(file, "{}", line)?;
        }
    }
    Ok(())
}

struct MatchSummary {
    winner: Option<Side>,
    moves: u32,
    combats: u32,
    hands: u32,
}

fn run_match(
    seed: u64,
    max_turns: u32,
    mut hand_log: Option<&mut CombatLogger>,
) -> Result<MatchSummary, CliError> {
    let config = MatchConfig {
        seed,
        ..MatchConfig::default()
    };
    let mut engine = Engine::new(config);
    engine.initialize_board(&ArmyConfig::standard(), &ArmyConfig::standard())?;

    let mut white = create_ai("greedy", seed);
    let mut black = create_ai("greedy", seed.wrapping_add(1));
    let mut combats = 0u32;
    let mut hands = 0u32;

    for _ in 0..max_turns {
        if let GameStatus::SideWins(_) = engine.status() {
            break;
        }
        let side = engine.side_to_move();
        let ai = if side == Side::White {
            &mut white
        } else {
            &mut black
        };
        let Some((piece, target)) = ai.choose_move(&engine) else {
            break;
        };
        engine.select_piece(piece)?;
        let collision = engine.move_piece(target)?;

        if let Some(collision) = collision {
            if !collision.instant_kill {
                engine.complete_attack_animation()?;
                engine.initialize_poker_combat()?;
                combats += 1;
                hands += run_combat(&mut engine, &mut white, &mut black, hand_log.as_deref_mut())?;
            }
        }
    }

    let winner = match engine.status() {
        GameStatus::SideWins(side) => Some(side),
        _ => None,
    };
    Ok(MatchSummary {
        winner,
        moves: engine.board().move_count(),
        combats,
        hands,
    })
}

/// Drives one combat to a decision, hand after hand. Returns hands played.
fn run_combat(
    engine: &mut Engine,
    white: &mut Box<dyn Opponent>,
    black: &mut Box<dyn Opponent>,
    mut hand_log: Option<&mut CombatLogger>,
) -> Result<u32, CliError> {
    let mut hands = 0u32;
    let mut actions: Vec<ActionRecord> = Vec::new();
    loop {
        if hands >= MAX_COMBAT_HANDS {
            return Err(CliError::Engine("combat did not converge".to_string()));
        }
        let phase = match engine.combat() {
            Some(combat) => combat.phase(),
            None => return Ok(hands),
        };
        match phase {
            Phase::FirstStrike | Phase::Mulligan | Phase::SpellPet => {
                engine.advance_poker_phase()?;
            }
            Phase::Faith | Phase::Foresight | Phase::Destiny => {
                run_betting_round(engine, white, black, &mut actions)?;
                // A fold inside the round jumps straight to resolution.
                if engine
                    .combat()
                    .map(|c| c.phase() != Phase::Resolution)
                    .unwrap_or(false)
                {
                    engine.advance_poker_phase()?;
                }
            }
            Phase::Resolution => {
                hands += 1;
                let resolution = engine.resolve_poker_combat()?;

                if let Some(logger) = hand_log.as_deref_mut() {
                    let community = engine
                        .combat()
                        .map(|c| c.community().to_vec())
                        .unwrap_or_default();
                    let record = CombatRecord {
                        combat_id: logger.next_id(),
                        seed: None,
                        actions: std::mem::take(&mut actions),
                        community,
                        result: Some(format!(
                            "{:?} winner={:?} damage={}",
                            resolution.kind, resolution.winner, resolution.damage
                        )),
                        ts: None,
                        showdown: Some(ShowdownInfo {
                            winner: resolution.winner,
                            notes: None,
                        }),
                    };
                    logger.write(&record)?;
                } else {
                    actions.clear();
                }

                if resolution.attacker_health == 0 || resolution.defender_health == 0 {
                    engine.resolve_combat(&resolution)?;
                    return Ok(hands);
                }
                engine.start_next_hand(&resolution)?;
            }
        }
    }
}

fn run_betting_round(
    engine: &mut Engine,
    white: &mut Box<dyn Opponent>,
    black: &mut Box<dyn Opponent>,
    actions: &mut Vec<ActionRecord>,
) -> Result<(), CliError> {
    let order = match engine.combat() {
        Some(combat) => {
            let first = combat.attacker().side();
            [first, first.opponent()]
        }
        None => return Ok(()),
    };

    let mut rounds = 0u32;
    loop {
        let Some(combat) = engine.combat() else {
            return Ok(());
        };
        if combat.phase() == Phase::Resolution || combat.is_all_in() || combat.round_settled() {
            return Ok(());
        }
        // AI stalemate safety net: force the timeout default action.
        if rounds >= 64 {
            for (side, action) in engine.tick_combat(u32::MAX)? {
                actions.push(ActionRecord {
                    side,
                    phase: "timeout".to_string(),
                    action,
                });
            }
            return Ok(());
        }
        rounds += 1;

        for side in order {
            let Some(combat) = engine.combat() else {
                return Ok(());
            };
            if combat.phase() == Phase::Resolution || combat.is_all_in() {
                return Ok(());
            }
            if combat.combatant(side).is_ready() {
                continue;
            }
            let phase = combat.phase();
            let ai = if side == Side::White {
                &mut *white
            } else {
                &mut *black
            };
            let action = ai.choose_combat_action(engine, side);
            engine.perform_poker_action(side, action.clone())?;
            actions.push(ActionRecord {
                side,
                phase: phase.name().to_string(),
                action,
            });
        }
    }
}
